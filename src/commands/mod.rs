use crate::formats;
use crate::options::{DumpMode, FORMAT_HELP, RawOptions, TagOverrides};
use clap::Parser;
use clap::builder::PossibleValuesParser;
use std::path::PathBuf;

fn type_parser() -> PossibleValuesParser {
    PossibleValuesParser::new(formats::supported().into_iter().chain([FORMAT_HELP]))
}

/// Prints cue sheets and cuts disc images into per-track audio files.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, args_override_self = true)]
pub struct Cli {
    /// Cue sheet, or a directory containing one
    #[arg(value_name = "CUEFILE")]
    pub cue: PathBuf,

    /// Skip malformed cue sheet lines instead of aborting
    #[arg(long)]
    pub ignore: bool,

    /// Print the cue sheet, file tags or track names instead of cutting
    #[arg(long, value_enum, value_name = "cue|tags|tracks")]
    pub dump: Option<DumpMode>,

    /// Only show what would be done
    #[arg(long, short = 'n')]
    pub dry_run: bool,

    /// Output file format, "help" lists the supported formats
    #[arg(
        long = "type",
        short = 't',
        value_name = "TYPE",
        value_parser = type_parser(),
        help_heading = "Encoding options"
    )]
    pub output_type: Option<String>,

    /// Encoding of the cue sheet text
    #[arg(long, help_heading = "Encoding options")]
    pub coding: Option<String>,

    /// Output directory
    #[arg(long, short = 'd', help_heading = "Encoding options")]
    pub dir: Option<String>,

    /// Use a temporary directory for files
    #[arg(long, overrides_with = "no_tempdir", help_heading = "Encoding options")]
    pub use_tempdir: bool,

    /// Write files to the output directory directly
    #[arg(long, overrides_with = "use_tempdir", help_heading = "Encoding options")]
    pub no_tempdir: bool,

    /// Compression factor of the output format (flac, ogg)
    #[arg(
        long,
        short = 'C',
        value_name = "FACTOR",
        allow_negative_numbers = true,
        help_heading = "Encoding options"
    )]
    pub compression: Option<i64>,

    /// Audio bitrate (mp3)
    #[arg(long, help_heading = "Encoding options")]
    pub bitrate: Option<i64>,

    /// Format string of the new file names
    #[arg(long = "format", value_name = "FORMAT", help_heading = "Filename options")]
    pub filename_format: Option<String>,

    /// Replace characters that are illegal in file names
    #[arg(long, overrides_with = "no_convert_chars", help_heading = "Filename options")]
    pub convert_chars: bool,

    /// Keep file name characters as they are
    #[arg(long, overrides_with = "convert_chars", help_heading = "Filename options")]
    pub no_convert_chars: bool,

    #[arg(long, short = 'r', value_name = "RATE", help_heading = "Output format")]
    pub sample_rate: Option<u32>,

    #[arg(long, short = 'c', help_heading = "Output format")]
    pub channels: Option<u32>,

    #[arg(long, short = 'b', value_name = "BITS", help_heading = "Output format")]
    pub bits_per_sample: Option<u32>,

    #[arg(long, help_heading = "Tag options")]
    pub album: Option<String>,

    #[arg(long, help_heading = "Tag options")]
    pub artist: Option<String>,

    #[arg(long, visible_alias = "year", help_heading = "Tag options")]
    pub date: Option<String>,

    #[arg(long, help_heading = "Tag options")]
    pub genre: Option<String>,

    #[arg(long, help_heading = "Tag options")]
    pub comment: Option<String>,

    #[arg(long, help_heading = "Tag options")]
    pub composer: Option<String>,

    #[arg(long, help_heading = "Tag options")]
    pub albumartist: Option<String>,
}

fn tri_state(enabled: bool, disabled: bool) -> Option<bool> {
    match (enabled, disabled) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

impl Cli {
    pub fn raw_options(&self) -> RawOptions {
        RawOptions {
            ignore: self.ignore,
            dump: self.dump,
            dry_run: self.dry_run,
            output_type: self.output_type.clone(),
            coding: self.coding.clone(),
            dir: self.dir.clone(),
            use_tempdir: tri_state(self.use_tempdir, self.no_tempdir),
            compression: self.compression,
            bitrate: self.bitrate,
            filename_format: self.filename_format.clone(),
            convert_chars: tri_state(self.convert_chars, self.no_convert_chars),
            sample_rate: self.sample_rate,
            channels: self.channels,
            bits_per_sample: self.bits_per_sample,
            tags: TagOverrides {
                album: self.album.clone(),
                artist: self.artist.clone(),
                date: self.date.clone(),
                genre: self.genre.clone(),
                comment: self.comment.clone(),
                composer: self.composer.clone(),
                albumartist: self.albumartist.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> RawOptions {
        let argv = std::iter::once("cue-cutter").chain(args.iter().copied());
        Cli::try_parse_from(argv).unwrap().raw_options()
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn unset_switch_pairs_stay_unset() {
        let raw = parse(&["disc.cue"]);
        assert_eq!(raw.use_tempdir, None);
        assert_eq!(raw.convert_chars, None);
        assert_eq!(raw.dump, None);
    }

    #[test]
    fn last_switch_of_a_pair_wins() {
        let raw = parse(&[
            "--use-tempdir",
            "--no-tempdir",
            "--no-convert-chars",
            "--convert-chars",
            "disc.cue",
        ]);
        assert_eq!(raw.use_tempdir, Some(false));
        assert_eq!(raw.convert_chars, Some(true));

        let raw = parse(&["--no-tempdir", "--use-tempdir", "disc.cue"]);
        assert_eq!(raw.use_tempdir, Some(true));
    }

    #[test]
    fn year_is_an_alias_of_date_and_last_one_wins() {
        assert_eq!(parse(&["--year", "1999", "x.cue"]).tags.date.as_deref(), Some("1999"));
        let raw = parse(&["--date", "1999", "--year", "2001", "x.cue"]);
        assert_eq!(raw.tags.date.as_deref(), Some("2001"));
    }

    #[test]
    fn parses_numbers_including_negative_compression() {
        let raw = parse(&[
            "-t", "ogg", "-C", "-1", "--bitrate", "256", "-r", "48000", "x.cue",
        ]);
        assert_eq!(raw.output_type.as_deref(), Some("ogg"));
        assert_eq!(raw.compression, Some(-1));
        assert_eq!(raw.bitrate, Some(256));
        assert_eq!(raw.sample_rate, Some(48000));
    }

    #[test]
    fn type_accepts_supported_formats_and_help_only() {
        assert_eq!(parse(&["--type", "help", "x.cue"]).output_type.as_deref(), Some("help"));
        assert!(Cli::try_parse_from(["cue-cutter", "--type", "ape", "x.cue"]).is_err());
    }

    #[test]
    fn exactly_one_cue_argument_is_required() {
        assert!(Cli::try_parse_from(["cue-cutter"]).is_err());
        assert!(Cli::try_parse_from(["cue-cutter", "a.cue", "b.cue"]).is_err());
    }

    #[test]
    fn dump_modes_parse() {
        assert_eq!(parse(&["--dump", "tracks", "x.cue"]).dump, Some(DumpMode::Tracks));
        assert!(Cli::try_parse_from(["cue-cutter", "--dump", "all", "x.cue"]).is_err());
    }
}
