use crate::cue::models::CueSheet;
use crate::options::{Action, CutOptions};
use crate::probe::StreamProber;
use crate::report::render_cue_report;
use crate::split::Splitter;
use crate::split::error::SplitResult;
use log::debug;
use std::io::Write;

/// Runs the one action the options resolved to. Expects already validated options.
pub fn dispatch(
    cue: &CueSheet,
    options: &CutOptions,
    prober: &dyn StreamProber,
    splitter: &dyn Splitter,
    out: &mut dyn Write,
) -> SplitResult<()> {
    debug!("Running action {:?}", options.action);

    match options.action {
        Action::Report => out.write_all(render_cue_report(cue, prober).as_bytes())?,
        Action::Tags => splitter.dump_tags(out)?,
        Action::Tracks => splitter.dump_tracks(out)?,
        Action::Split => splitter.split()?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PersistedDefaults;
    use crate::cue::models::{CueFile, CueTrack};
    use crate::options::{DumpMode, RawOptions, validate};
    use crate::probe::StreamInfo;
    use std::cell::RefCell;
    use std::path::Path;

    struct NoProber;

    impl StreamProber for NoProber {
        fn probe(&self, _path: &Path) -> Option<StreamInfo> {
            None
        }
    }

    #[derive(Default)]
    struct RecordingSplitter {
        calls: RefCell<Vec<&'static str>>,
    }

    impl Splitter for RecordingSplitter {
        fn dump_tags(&self, _out: &mut dyn Write) -> SplitResult<()> {
            self.calls.borrow_mut().push("tags");
            Ok(())
        }

        fn dump_tracks(&self, _out: &mut dyn Write) -> SplitResult<()> {
            self.calls.borrow_mut().push("tracks");
            Ok(())
        }

        fn split(&self) -> SplitResult<()> {
            self.calls.borrow_mut().push("split");
            Ok(())
        }
    }

    fn options_for(dump: Option<DumpMode>) -> CutOptions {
        let raw = RawOptions {
            dump,
            output_type: Some("flac".to_string()),
            ..Default::default()
        };
        validate(raw, &PersistedDefaults::default()).unwrap()
    }

    fn two_track_sheet(dir: &Path) -> CueSheet {
        let track = |number, begin| CueTrack {
            number,
            begin,
            end: None,
            ..Default::default()
        };

        CueSheet {
            dir: dir.to_path_buf(),
            files: vec![CueFile {
                name: "image.flac".to_string(),
                file_type: "WAVE".to_string(),
                tracks: vec![track(1, 0), track(2, 3000)],
            }],
            ..Default::default()
        }
    }

    fn run(dump: Option<DumpMode>) -> (Vec<&'static str>, String) {
        let dir = tempfile::tempdir().unwrap();
        let cue = two_track_sheet(dir.path());
        let options = options_for(dump);
        let splitter = RecordingSplitter::default();
        let mut out = Vec::new();

        dispatch(&cue, &options, &NoProber, &splitter, &mut out).unwrap();

        (splitter.calls.into_inner(), String::from_utf8(out).unwrap())
    }

    #[test]
    fn each_action_runs_exactly_one_handler() {
        assert_eq!(run(Some(DumpMode::Tags)).0, vec!["tags"]);
        assert_eq!(run(Some(DumpMode::Tracks)).0, vec!["tracks"]);
        assert_eq!(run(None).0, vec!["split"]);
        assert!(run(Some(DumpMode::Cue)).0.is_empty());
    }

    #[test]
    fn cue_dump_renders_open_ranges_for_both_tracks() {
        let (_, report) = run(Some(DumpMode::Cue));
        let track_lines: Vec<&str> = report
            .lines()
            .filter(|line| line.starts_with("\tTRACK"))
            .collect();

        assert_eq!(
            track_lines,
            vec!["\tTRACK 01: 0:00:00 -", "\tTRACK 02: 0:40:00 -"]
        );
        assert!(report.starts_with("FILE \"image.flac\": not exists\n"));
    }
}
