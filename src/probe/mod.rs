use byteorder::{LittleEndian, ReadBytesExt};
use claxon::FlacReader;
use log::debug;
use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::path::Path;

const FLAC_MAGIC: &[u8; 4] = b"fLaC";
const RIFF_MAGIC: &[u8; 4] = b"RIFF";
const WAVE_MAGIC: &[u8; 4] = b"WAVE";
const FMT_CHUNK: &[u8; 4] = b"fmt ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamInfo {
    pub kind: String,
    pub bits_per_sample: u32,
    pub sample_rate: u32,
    pub channels: u32,
}

pub trait StreamProber {
    /// `None` when the file is not a recognized audio stream.
    fn probe(&self, path: &Path) -> Option<StreamInfo>;
}

/// Recognizes streams from their headers only, no samples are decoded.
#[derive(Debug, Clone, Default)]
pub struct HeaderProber;

impl StreamProber for HeaderProber {
    fn probe(&self, path: &Path) -> Option<StreamInfo> {
        let magic = read_magic(path).ok()?;

        let result = match &magic {
            FLAC_MAGIC => probe_flac(path),
            RIFF_MAGIC => probe_wav(path),
            _ => return None,
        };

        match result {
            Ok(info) => info,
            Err(err) => {
                debug!("Could not read stream header of {path:?}: {err}");
                None
            }
        }
    }
}

fn read_magic(path: &Path) -> io::Result<[u8; 4]> {
    let mut magic = [0u8; 4];
    File::open(path)?.read_exact(&mut magic)?;
    Ok(magic)
}

fn probe_flac(path: &Path) -> io::Result<Option<StreamInfo>> {
    let reader = match FlacReader::open(path) {
        Ok(reader) => reader,
        Err(claxon::Error::IoError(err)) => return Err(err),
        Err(err) => {
            debug!("Not a valid flac stream {path:?}: {err}");
            return Ok(None);
        }
    };

    let info = reader.streaminfo();
    Ok(Some(StreamInfo {
        kind: "flac".to_string(),
        bits_per_sample: info.bits_per_sample,
        sample_rate: info.sample_rate,
        channels: info.channels,
    }))
}

fn probe_wav(path: &Path) -> io::Result<Option<StreamInfo>> {
    let mut reader = BufReader::new(File::open(path)?);

    let mut riff = [0u8; 4];
    reader.read_exact(&mut riff)?;
    let _riff_size = reader.read_u32::<LittleEndian>()?;
    let mut wave = [0u8; 4];
    reader.read_exact(&mut wave)?;

    if &riff != RIFF_MAGIC || &wave != WAVE_MAGIC {
        return Ok(None);
    }

    loop {
        let mut chunk_id = [0u8; 4];
        match reader.read_exact(&mut chunk_id) {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => return Ok(None),
            Err(err) => return Err(err),
        }
        let chunk_size = reader.read_u32::<LittleEndian>()?;

        if &chunk_id == FMT_CHUNK {
            let _audio_format = reader.read_u16::<LittleEndian>()?;
            let channels = reader.read_u16::<LittleEndian>()?;
            let sample_rate = reader.read_u32::<LittleEndian>()?;
            let _byte_rate = reader.read_u32::<LittleEndian>()?;
            let _block_align = reader.read_u16::<LittleEndian>()?;
            let bits_per_sample = reader.read_u16::<LittleEndian>()?;

            return Ok(Some(StreamInfo {
                kind: "wav".to_string(),
                bits_per_sample: bits_per_sample as u32,
                sample_rate,
                channels: channels as u32,
            }));
        }

        // chunks are padded to an even size
        let skip = chunk_size as i64 + (chunk_size % 2) as i64;
        reader.seek(SeekFrom::Current(skip))?;
    }
}
