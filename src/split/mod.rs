use crate::cd::msf;
use crate::cue::models::{CueSheet, CueTrack};
use crate::options::CutOptions;
use crate::split::error::{SplitError, SplitResult};
use crate::split::tags::track_tags;
use crate::util::quote;
use log::{debug, info};
use std::io::Write;

pub mod error;
pub mod tags;

/// The actions that work on the tracks of a validated invocation.
pub trait Splitter {
    fn dump_tags(&self, out: &mut dyn Write) -> SplitResult<()>;

    fn dump_tracks(&self, out: &mut dyn Write) -> SplitResult<()>;

    fn split(&self) -> SplitResult<()>;
}

pub struct CueSplitter<'a> {
    cue: &'a CueSheet,
    options: &'a CutOptions,
}

impl<'a> CueSplitter<'a> {
    pub fn new(cue: &'a CueSheet, options: &'a CutOptions) -> Self {
        Self { cue, options }
    }
}

impl Splitter for CueSplitter<'_> {
    fn dump_tags(&self, out: &mut dyn Write) -> SplitResult<()> {
        let total = self.cue.tracks().count();

        for (i, track) in self.cue.tracks().enumerate() {
            if i > 0 {
                writeln!(out)?;
            }
            writeln!(out, "TRACK {:02}", track.number)?;
            for (tag, value) in track_tags(self.cue, track, total, &self.options.tags) {
                writeln!(out, "\t{}: {}", tag.to_uppercase(), quote(&value))?;
            }
        }

        Ok(())
    }

    fn dump_tracks(&self, out: &mut dyn Write) -> SplitResult<()> {
        for track in self.cue.tracks() {
            match track.title() {
                Some(title) => writeln!(out, "{:02} {}", track.number, title)?,
                None => writeln!(out, "{:02}", track.number)?,
            }
        }

        Ok(())
    }

    fn split(&self) -> SplitResult<()> {
        let format = self.options.output_format.ok_or(SplitError::MissingFormat)?;

        if !self.options.dry_run {
            return Err(SplitError::NoEncoder(format));
        }

        info!(
            "Cutting {} tracks to {format} in {}{}",
            self.cue.tracks().count(),
            quote(&self.options.dir),
            if self.options.use_tempdir {
                " via a temporary directory"
            } else {
                ""
            }
        );

        info!(
            "File names follow {}.{}{}",
            quote(&self.options.filename_format),
            format.extension(),
            if self.options.convert_chars {
                ", illegal characters are replaced"
            } else {
                ""
            }
        );
        debug!(
            "Encoder settings: compression {:?}, bitrate {}, stream {:?}",
            self.options.compression, self.options.bitrate, self.options.stream
        );

        for file in &self.cue.files {
            let source = self.cue.path_of(file);
            for track in &file.tracks {
                info!(
                    "Track {:02}: {} [{}]",
                    track.number,
                    quote(&source.to_string_lossy()),
                    track_range(track)
                );
            }
        }

        Ok(())
    }
}

fn track_range(track: &CueTrack) -> String {
    match track.end {
        Some(end) => format!("{} - {}", msf(track.begin), msf(end)),
        None => format!("{} -", msf(track.begin)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PersistedDefaults;
    use crate::cue::parse_text;
    use crate::options::{DumpMode, RawOptions, validate};
    use std::ops::ControlFlow;

    const SHEET: &str = r#"TITLE "Blue Record"
PERFORMER "Quintet"
FILE "a.wav" WAVE
TRACK 01 AUDIO
TITLE "So It Goes"
INDEX 01 00:00:00
TRACK 02 AUDIO
INDEX 01 05:00:00
"#;

    fn cue() -> CueSheet {
        parse_text(SHEET, |_| ControlFlow::Break(())).unwrap()
    }

    fn options(raw: RawOptions) -> CutOptions {
        validate(raw, &PersistedDefaults::default()).unwrap()
    }

    fn dump(options: &CutOptions, action: impl Fn(&CueSplitter, &mut Vec<u8>)) -> String {
        let cue = cue();
        let splitter = CueSplitter::new(&cue, options);
        let mut out = Vec::new();
        action(&splitter, &mut out);
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn dump_tracks_lists_numbers_and_titles() {
        let options = options(RawOptions {
            dump: Some(DumpMode::Tracks),
            ..Default::default()
        });
        let listing = dump(&options, |s, out| s.dump_tracks(out).unwrap());
        assert_eq!(listing, "01 So It Goes\n02\n");
    }

    #[test]
    fn dump_tags_applies_overrides() {
        let mut raw = RawOptions {
            dump: Some(DumpMode::Tags),
            ..Default::default()
        };
        raw.tags.genre = Some("Hard Bop".to_string());
        let options = options(raw);

        let listing = dump(&options, |s, out| s.dump_tags(out).unwrap());
        assert_eq!(
            listing,
            "TRACK 01\n\
             \tALBUM: \"Blue Record\"\n\
             \tARTIST: Quintet\n\
             \tALBUMARTIST: Quintet\n\
             \tGENRE: \"Hard Bop\"\n\
             \tTITLE: \"So It Goes\"\n\
             \tTRACKNUMBER: 1\n\
             \tTRACKTOTAL: 2\n\
             \n\
             TRACK 02\n\
             \tALBUM: \"Blue Record\"\n\
             \tARTIST: Quintet\n\
             \tALBUMARTIST: Quintet\n\
             \tGENRE: \"Hard Bop\"\n\
             \tTRACKNUMBER: 2\n\
             \tTRACKTOTAL: 2\n"
        );
    }

    #[test]
    fn dry_run_split_only_plans() {
        let options = options(RawOptions {
            output_type: Some("flac".to_string()),
            dry_run: true,
            ..Default::default()
        });
        let cue = cue();
        assert!(CueSplitter::new(&cue, &options).split().is_ok());
    }

    #[test]
    fn split_without_dry_run_reports_the_missing_encoder() {
        let options = options(RawOptions {
            output_type: Some("ogg".to_string()),
            ..Default::default()
        });
        let cue = cue();
        let err = CueSplitter::new(&cue, &options).split().unwrap_err();
        assert!(matches!(err, SplitError::NoEncoder(crate::formats::AudioFormat::Ogg)));
    }

    #[test]
    fn split_needs_a_format() {
        let options = options(RawOptions {
            dump: Some(DumpMode::Cue),
            ..Default::default()
        });
        let cue = cue();
        assert!(matches!(
            CueSplitter::new(&cue, &options).split(),
            Err(SplitError::MissingFormat)
        ));
    }

    #[test]
    fn ranges_are_open_for_the_last_track() {
        let cue = cue();
        let tracks = &cue.files[0].tracks;
        assert_eq!(track_range(&tracks[0]), "0:00:00 - 5:00:00");
        assert_eq!(track_range(&tracks[1]), "5:00:00 -");
    }
}
