use std::fmt::Display;

/// Output formats the cutter knows how to target, in the order they are
/// listed to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Flac,
    Mp3,
    Ogg,
    Wav,
}

pub const SUPPORTED_FORMATS: [AudioFormat; 4] = [
    AudioFormat::Flac,
    AudioFormat::Mp3,
    AudioFormat::Ogg,
    AudioFormat::Wav,
];

impl AudioFormat {
    pub fn name(&self) -> &'static str {
        match self {
            AudioFormat::Flac => "flac",
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Ogg => "ogg",
            AudioFormat::Wav => "wav",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            AudioFormat::Flac => "flac",
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Ogg => "ogg",
            AudioFormat::Wav => "wav",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        SUPPORTED_FORMATS
            .iter()
            .copied()
            .find(|format| format.name() == name)
    }
}

impl Display for AudioFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

pub fn supported() -> Vec<&'static str> {
    SUPPORTED_FORMATS.iter().map(AudioFormat::name).collect()
}

pub fn is_supported(name: &str) -> bool {
    AudioFormat::from_name(name).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_lists_formats_in_order() {
        assert_eq!(supported(), vec!["flac", "mp3", "ogg", "wav"]);
    }

    #[test]
    fn is_supported_is_case_sensitive() {
        assert!(is_supported("flac"));
        assert!(!is_supported("FLAC"));
        assert!(!is_supported("help"));
        assert!(!is_supported(""));
    }

    #[test]
    fn from_name_round_trips_every_format() {
        for format in SUPPORTED_FORMATS {
            assert_eq!(AudioFormat::from_name(format.name()), Some(format));
        }
    }
}
