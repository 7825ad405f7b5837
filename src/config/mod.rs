use crate::config::error::{ConfigError, ConfigResult};
use std::env;
use std::str::FromStr;

pub mod error;

pub const DEFAULT_DIR: &str = ".";
pub const DEFAULT_MP3_BITRATE: i64 = 192;
pub const DEFAULT_FILENAME_FORMAT: &str = "{tracknumber:02}.{title}";

const ENV_PREFIX: &str = "CUTTER_";

/// Defaults applied whenever an option is not given on the command line.
/// Never mutated once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedDefaults {
    pub dir: String,
    pub output_type: Option<String>,
    pub mp3_bitrate: i64,
    pub flac_compression: Option<i64>,
    pub ogg_compression: Option<i64>,
    pub sample_rate: Option<u32>,
    pub channels: Option<u32>,
    pub bits_per_sample: Option<u32>,
    pub filename_format: String,
    pub convert_chars: bool,
    pub use_tempdir: bool,
}

impl Default for PersistedDefaults {
    fn default() -> Self {
        Self {
            dir: DEFAULT_DIR.to_string(),
            output_type: None,
            mp3_bitrate: DEFAULT_MP3_BITRATE,
            flac_compression: None,
            ogg_compression: None,
            sample_rate: None,
            channels: None,
            bits_per_sample: None,
            filename_format: DEFAULT_FILENAME_FORMAT.to_string(),
            convert_chars: false,
            use_tempdir: false,
        }
    }
}

impl PersistedDefaults {
    /// Reads `CUTTER_*` variables from the process environment.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| env::var(format!("{ENV_PREFIX}{key}")).ok())
    }

    /// Builds the defaults from an arbitrary key lookup, keys are given
    /// without the `CUTTER_` prefix. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<Self> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        Ok(Self {
            dir: get("DIR").unwrap_or(defaults.dir),
            output_type: get("TYPE").map(|value| value.trim().to_string()),
            mp3_bitrate: parse_number(&get, "MP3_BITRATE")?.unwrap_or(defaults.mp3_bitrate),
            flac_compression: parse_number(&get, "FLAC_COMPRESSION")?,
            ogg_compression: parse_number(&get, "OGG_COMPRESSION")?,
            sample_rate: parse_number(&get, "SAMPLE_RATE")?,
            channels: parse_number(&get, "CHANNELS")?,
            bits_per_sample: parse_number(&get, "BITS_PER_SAMPLE")?,
            filename_format: get("FILENAME_FORMAT").unwrap_or(defaults.filename_format),
            convert_chars: parse_bool(&get, "CONVERT_CHARS")?.unwrap_or(defaults.convert_chars),
            use_tempdir: parse_bool(&get, "USE_TEMPDIR")?.unwrap_or(defaults.use_tempdir),
        })
    }
}

fn parse_number<T: FromStr>(
    get: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> ConfigResult<Option<T>> {
    get(key)
        .map(|value| {
            value.trim().parse::<T>().map_err(|_| ConfigError::InvalidValue {
                key,
                value,
                expected: "number",
            })
        })
        .transpose()
}

fn parse_bool(
    get: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> ConfigResult<Option<bool>> {
    get(key)
        .map(|value| match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::InvalidValue {
                key,
                value,
                expected: "boolean",
            }),
        })
        .transpose()
}
