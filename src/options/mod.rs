use crate::config::PersistedDefaults;
use crate::formats::{self, AudioFormat};
use crate::options::error::{OptionsError, OptionsResult};
use crate::util::normalize_path;
use clap::ValueEnum;
use log::debug;

pub mod error;

const FLAC_COMPRESSION_RANGE: (i64, i64) = (0, 8);
const OGG_COMPRESSION_RANGE: (i64, i64) = (-1, 10);
const MP3_BITRATE_RANGE: (i64, i64) = (32, 320);

/// Value of `--type` that lists the supported formats instead of cutting.
pub const FORMAT_HELP: &str = "help";

/// Report printed instead of cutting the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DumpMode {
    Cue,
    Tags,
    Tracks,
}

/// The terminal action an invocation resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Report,
    Tags,
    Tracks,
    Split,
}

impl From<Option<DumpMode>> for Action {
    fn from(mode: Option<DumpMode>) -> Self {
        match mode {
            Some(DumpMode::Cue) => Action::Report,
            Some(DumpMode::Tags) => Action::Tags,
            Some(DumpMode::Tracks) => Action::Tracks,
            None => Action::Split,
        }
    }
}

/// Tag values forced onto every output track.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagOverrides {
    pub album: Option<String>,
    pub artist: Option<String>,
    pub date: Option<String>,
    pub genre: Option<String>,
    pub comment: Option<String>,
    pub composer: Option<String>,
    pub albumartist: Option<String>,
}

impl TagOverrides {
    pub fn get(&self, tag: &str) -> Option<&str> {
        let value = match tag {
            "album" => &self.album,
            "artist" => &self.artist,
            "date" => &self.date,
            "genre" => &self.genre,
            "comment" => &self.comment,
            "composer" => &self.composer,
            "albumartist" => &self.albumartist,
            _ => return None,
        };
        value.as_deref()
    }

    fn without_empty(self) -> Self {
        let keep = |value: Option<String>| value.filter(|v| !v.is_empty());
        Self {
            album: keep(self.album),
            artist: keep(self.artist),
            date: keep(self.date),
            genre: keep(self.genre),
            comment: keep(self.comment),
            composer: keep(self.composer),
            albumartist: keep(self.albumartist),
        }
    }
}

/// Sample layout requested for the output files, `None` keeps the source value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamShape {
    pub sample_rate: Option<u32>,
    pub channels: Option<u32>,
    pub bits_per_sample: Option<u32>,
}

/// Options exactly as given on the command line. `None` means the flag was
/// not passed, so a persisted default may apply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawOptions {
    pub ignore: bool,
    pub dump: Option<DumpMode>,
    pub dry_run: bool,
    pub output_type: Option<String>,
    pub coding: Option<String>,
    pub dir: Option<String>,
    pub use_tempdir: Option<bool>,
    pub compression: Option<i64>,
    pub bitrate: Option<i64>,
    pub filename_format: Option<String>,
    pub convert_chars: Option<bool>,
    pub sample_rate: Option<u32>,
    pub channels: Option<u32>,
    pub bits_per_sample: Option<u32>,
    pub tags: TagOverrides,
}

/// Fully resolved options, only obtainable through [`validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CutOptions {
    pub action: Action,
    pub ignore_errors: bool,
    pub dry_run: bool,
    pub output_format: Option<AudioFormat>,
    pub coding: Option<String>,
    pub dir: String,
    pub use_tempdir: bool,
    pub compression: Option<i64>,
    pub bitrate: i64,
    pub filename_format: String,
    pub convert_chars: bool,
    pub stream: StreamShape,
    pub tags: TagOverrides,
}

/// Reconciles the command line with the persisted defaults. Nothing outside
/// the two arguments is consulted.
pub fn validate(raw: RawOptions, defaults: &PersistedDefaults) -> OptionsResult<CutOptions> {
    let output_format = resolve_format(raw.output_type.as_deref(), defaults)?;

    if raw.dump.is_none() && output_format.is_none() {
        return Err(OptionsError::MissingType);
    }

    let bitrate = raw.bitrate.unwrap_or(defaults.mp3_bitrate);
    let compression = match output_format {
        Some(AudioFormat::Flac) => {
            let compression = raw.compression.or(defaults.flac_compression);
            check_range("compression", compression, FLAC_COMPRESSION_RANGE)?;
            compression
        }
        Some(AudioFormat::Ogg) => {
            let compression = raw.compression.or(defaults.ogg_compression);
            check_range("compression", compression, OGG_COMPRESSION_RANGE)?;
            compression
        }
        Some(AudioFormat::Mp3) => {
            check_range("bitrate", Some(bitrate), MP3_BITRATE_RANGE)?;
            raw.compression
        }
        _ => raw.compression,
    };

    let dir = resolve_dir(raw.dir.as_deref().unwrap_or(&defaults.dir));
    let filename_format = resolve_filename_format(
        raw.filename_format
            .as_deref()
            .unwrap_or(&defaults.filename_format),
    )?;

    let options = CutOptions {
        action: Action::from(raw.dump),
        ignore_errors: raw.ignore,
        dry_run: raw.dry_run,
        output_format,
        coding: raw.coding,
        dir,
        use_tempdir: raw.use_tempdir.unwrap_or(defaults.use_tempdir),
        compression,
        bitrate,
        filename_format,
        convert_chars: raw.convert_chars.unwrap_or(defaults.convert_chars),
        stream: StreamShape {
            sample_rate: raw.sample_rate.or(defaults.sample_rate),
            channels: raw.channels.or(defaults.channels),
            bits_per_sample: raw.bits_per_sample.or(defaults.bits_per_sample),
        },
        tags: raw.tags.without_empty(),
    };

    debug!("Resolved options: {options:?}");

    Ok(options)
}

fn resolve_format(
    requested: Option<&str>,
    defaults: &PersistedDefaults,
) -> OptionsResult<Option<AudioFormat>> {
    match requested {
        Some(FORMAT_HELP) => Err(OptionsError::FormatHelp(formats::supported())),
        Some(name) => AudioFormat::from_name(name)
            .map(Some)
            .ok_or_else(|| OptionsError::UnsupportedType(name.to_string())),
        None => match defaults.output_type.as_deref() {
            Some(name) if !formats::is_supported(name) => {
                Err(OptionsError::UnsupportedConfiguredType(name.to_string()))
            }
            configured => Ok(configured.and_then(AudioFormat::from_name)),
        },
    }
}

fn check_range(
    option: &'static str,
    value: Option<i64>,
    (min, max): (i64, i64),
) -> OptionsResult<()> {
    match value {
        Some(value) if value < min || value > max => Err(OptionsError::OutOfRange {
            option,
            value,
            min,
            max,
        }),
        _ => Ok(()),
    }
}

fn resolve_dir(dir: &str) -> String {
    if dir.is_empty() {
        ".".to_string()
    } else {
        normalize_path(dir)
    }
}

fn resolve_filename_format(template: &str) -> OptionsResult<String> {
    let invalid = || OptionsError::InvalidFormatString(template.to_string());

    // the last segment names the file itself
    if template.is_empty() || template.ends_with('/') {
        return Err(invalid());
    }

    let normalized = normalize_path(template);
    let relative = normalized.strip_prefix('/').unwrap_or(&normalized);

    if relative.is_empty() || relative == "." {
        return Err(invalid());
    }

    Ok(relative.to_string())
}
