// src/cue/models
use std::path::{Path, PathBuf};

/// Attribute names with a dedicated rendering, or none at all, in reports.
pub const RESERVED_TRACK_ATTRIBUTES: [&str; 3] = ["pregap", "postgap", "title"];

/// Insertion ordered `name -> value` list, names are lower-case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(String, String)>,
}

impl Attributes {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Sets `key`, replacing an earlier value in place.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();

        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CueSheet {
    /// Directory the referenced files are resolved against.
    pub dir: PathBuf,
    pub attrs: Attributes,
    pub files: Vec<CueFile>,
}

impl CueSheet {
    pub fn path_of(&self, file: &CueFile) -> PathBuf {
        self.dir.join(&file.name)
    }

    pub fn tracks(&self) -> impl Iterator<Item = &CueTrack> {
        self.files.iter().flat_map(|file| file.tracks.iter())
    }

    pub fn with_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.dir = dir.as_ref().to_path_buf();
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CueFile {
    pub name: String,
    pub file_type: String,
    pub tracks: Vec<CueTrack>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CueTrack {
    pub number: u32,
    /// First frame of `INDEX 01`.
    pub begin: u64,
    /// `None` for the last track of a file, which runs to the end of the stream.
    pub end: Option<u64>,
    pub attrs: Attributes,
}

impl CueTrack {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attrs.get(key)
    }

    pub fn title(&self) -> Option<&str> {
        self.get("title").filter(|title| !title.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attributes_keep_insertion_order_and_replace_in_place() {
        let mut attrs = Attributes::default();
        attrs.set("title", "A");
        attrs.set("performer", "B");
        attrs.set("title", "C");

        let entries: Vec<_> = attrs.iter().collect();
        assert_eq!(entries, vec![("title", "C"), ("performer", "B")]);
        assert_eq!(attrs.get("performer"), Some("B"));
        assert_eq!(attrs.get("genre"), None);
    }

    #[test]
    fn empty_title_counts_as_missing() {
        let mut track = CueTrack::default();
        track.attrs.set("title", "");
        assert_eq!(track.title(), None);
    }

    #[test]
    fn files_resolve_against_the_sheet_directory() {
        let sheet = CueSheet::default().with_dir("/discs/album");
        let file = CueFile {
            name: "image.flac".to_string(),
            ..Default::default()
        };
        assert_eq!(sheet.path_of(&file), PathBuf::from("/discs/album/image.flac"));
    }
}
