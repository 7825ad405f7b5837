use crate::cd::Msf;
use crate::cue::error::{CueError, CueResult};
use crate::cue::models::{Attributes, CueFile, CueSheet, CueTrack};
use encoding_rs::{Encoding, WINDOWS_1252};
use lazy_static::lazy_static;
use log::{debug, warn};
use regex::Regex;
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};

pub mod error;
pub mod fs;
pub mod models;

pub struct CueParser {
    cue_path: PathBuf,
    encoding: Option<String>,
}

impl CueParser {
    pub fn new(cue_path: impl AsRef<Path>) -> Self {
        Self {
            cue_path: cue_path.as_ref().to_path_buf(),
            encoding: None,
        }
    }

    /// Decode the sheet with the given encoding label instead of guessing.
    pub fn with_encoding(mut self, encoding: Option<&str>) -> Self {
        self.encoding = encoding.map(str::to_string);
        self
    }

    /// Reads and parses the sheet. `on_error` sees every malformed line and
    /// decides whether the line is skipped or parsing stops.
    pub async fn parse(
        &self,
        on_error: impl FnMut(&CueError) -> ControlFlow<()>,
    ) -> CueResult<CueSheet> {
        let data = tokio::fs::read(&self.cue_path)
            .await
            .map_err(|source| CueError::Open {
                path: self.cue_path.clone(),
                source,
            })?;

        let text = decode(&data, self.encoding.as_deref())?;
        let dir = self.cue_path.parent().unwrap_or(Path::new(""));

        Ok(parse_text(&text, on_error)?.with_dir(dir))
    }
}

fn decode(data: &[u8], label: Option<&str>) -> CueResult<String> {
    if let Some(label) = label {
        let encoding = Encoding::for_label(label.as_bytes())
            .ok_or_else(|| CueError::UnknownEncoding(label.to_string()))?;
        let (text, used, had_errors) = encoding.decode(data);
        if had_errors {
            warn!("Cue sheet contains bytes invalid in {}", used.name());
        }
        return Ok(text.into_owned());
    }

    if let Some((encoding, bom_length)) = Encoding::for_bom(data) {
        debug!("Cue sheet has a {} byte order mark", encoding.name());
        let (text, _) = encoding.decode_without_bom_handling(&data[bom_length..]);
        return Ok(text.into_owned());
    }

    match std::str::from_utf8(data) {
        Ok(text) => Ok(text.to_string()),
        Err(_) => {
            warn!(
                "Cue sheet is not valid UTF-8, decoding as {}; use --coding to override",
                WINDOWS_1252.name()
            );
            let (text, _, _) = WINDOWS_1252.decode(data);
            Ok(text.into_owned())
        }
    }
}

/// Parses already decoded cue sheet text. The returned sheet has no directory.
pub fn parse_text(
    text: &str,
    mut on_error: impl FnMut(&CueError) -> ControlFlow<()>,
) -> CueResult<CueSheet> {
    let mut builder = SheetBuilder::default();

    for (index, line) in text.lines().enumerate() {
        let line_number = index + 1;

        if let Err(err) = builder.feed(line_number, line) {
            if on_error(&err).is_break() {
                return Err(CueError::Aborted { line: line_number });
            }
        }
    }

    if let Err(err) = builder.finish_file() {
        let line = err.line().unwrap_or_default();
        if on_error(&err).is_break() {
            return Err(CueError::Aborted { line });
        }
    }

    Ok(builder.sheet)
}

struct PendingTrack {
    line: usize,
    number: u32,
    begin: Option<u64>,
    pregap_start: Option<u64>,
    attrs: Attributes,
}

struct PendingFile {
    name: String,
    file_type: String,
    // finished tracks with their INDEX 00 position, ends are filled in on close
    tracks: Vec<(CueTrack, Option<u64>)>,
    // INDEX 00 of a track that continues in the next file
    tail: Option<u64>,
}

#[derive(Default)]
struct SheetBuilder {
    sheet: CueSheet,
    file: Option<PendingFile>,
    track: Option<PendingTrack>,
}

impl SheetBuilder {
    fn feed(&mut self, line_number: usize, line: &str) -> CueResult<()> {
        let tokens = tokenize(line_number, line)?;
        let Some((command, args)) = tokens.split_first() else {
            return Ok(());
        };

        let syntax = |message: String| CueError::syntax(line_number, message);
        let command = command.to_ascii_uppercase();
        let first_arg = || {
            args.first()
                .cloned()
                .ok_or_else(|| syntax(format!("missing argument for {command}")))
        };

        match command.as_str() {
            "REM" => {
                // a lone word after REM is a plain comment
                match args {
                    [key, value @ ..] if !value.is_empty() => {
                        self.attrs().set(key.to_lowercase(), value.join(" "));
                    }
                    _ => {}
                }
            }
            "TITLE" | "PERFORMER" | "SONGWRITER" | "CATALOG" | "CDTEXTFILE" | "ISRC" => {
                let value = first_arg()?;
                self.attrs().set(command.to_lowercase(), value);
            }
            "FLAGS" => {
                first_arg()?;
                self.attrs().set("flags", args.join(" "));
            }
            "PREGAP" | "POSTGAP" => {
                let value = first_arg()?;
                parse_msf(line_number, &value)?;
                let track = self
                    .track
                    .as_mut()
                    .ok_or_else(|| syntax(format!("{command} outside of TRACK")))?;
                track.attrs.set(command.to_lowercase(), value);
            }
            "FILE" => {
                let name = first_arg()?;
                let file_type = args.get(1).cloned().unwrap_or_default();

                // a track without INDEX 01 continues in the new file, its
                // INDEX 00 ends the last track of the current one
                let mut carried = self.track.take_if(|track| track.begin.is_none());
                if let (Some(file), Some(track)) = (self.file.as_mut(), carried.as_mut()) {
                    file.tail = track.pregap_start.take();
                }

                let finished = self.finish_file();
                self.file = Some(PendingFile {
                    name,
                    file_type,
                    tracks: Vec::new(),
                    tail: None,
                });
                self.track = carried;
                finished?;
            }
            "TRACK" => {
                // the previous track ends here even if this line is malformed
                let finished = self.finish_track();
                let started = self.start_track(line_number, args);
                finished.and(started)?;
            }
            "INDEX" => {
                let (Some(number), Some(position)) = (args.first(), args.get(1)) else {
                    return Err(syntax("INDEX requires a number and a position".to_string()));
                };
                let number = number
                    .parse::<u32>()
                    .map_err(|_| syntax(format!("invalid index number \"{number}\"")))?;
                let frames = parse_msf(line_number, position)?.to_frames();

                let track = self
                    .track
                    .as_mut()
                    .ok_or_else(|| syntax("INDEX outside of TRACK".to_string()))?;

                match number {
                    0 => {
                        track.pregap_start = Some(frames);
                        track.attrs.set("pregap", position.clone());
                    }
                    1 => track.begin = Some(frames),
                    _ => {}
                }
            }
            _ => return Err(syntax(format!("unknown command {command}"))),
        }

        Ok(())
    }

    fn start_track(&mut self, line_number: usize, args: &[String]) -> CueResult<()> {
        let number = args
            .first()
            .ok_or_else(|| CueError::syntax(line_number, "missing argument for TRACK"))?;
        let number = number.parse::<u32>().map_err(|_| {
            CueError::syntax(line_number, format!("invalid track number \"{number}\""))
        })?;

        if self.file.is_none() {
            return Err(CueError::syntax(line_number, "TRACK outside of FILE"));
        }

        self.track = Some(PendingTrack {
            line: line_number,
            number,
            begin: None,
            pregap_start: None,
            attrs: Attributes::default(),
        });

        Ok(())
    }

    fn attrs(&mut self) -> &mut Attributes {
        match self.track.as_mut() {
            Some(track) => &mut track.attrs,
            None => &mut self.sheet.attrs,
        }
    }

    fn finish_track(&mut self) -> CueResult<()> {
        let Some(track) = self.track.take() else {
            return Ok(());
        };

        let begin = track.begin.ok_or_else(|| {
            CueError::syntax(
                track.line,
                format!("track {:02} has no INDEX 01", track.number),
            )
        })?;

        if let Some(file) = self.file.as_mut() {
            let finished = CueTrack {
                number: track.number,
                begin,
                end: None,
                attrs: track.attrs,
            };
            file.tracks.push((finished, track.pregap_start));
        }

        Ok(())
    }

    /// Closes the current track and file. The file is closed even when its
    /// last track turns out to be malformed.
    fn finish_file(&mut self) -> CueResult<()> {
        let finished = self.finish_track();

        if let Some(file) = self.file.take() {
            let mut starts: Vec<u64> = file
                .tracks
                .iter()
                .map(|(track, pregap_start)| pregap_start.unwrap_or(track.begin))
                .collect();
            starts.extend(file.tail);

            let tracks = file
                .tracks
                .into_iter()
                .enumerate()
                .map(|(i, (mut track, _))| {
                    track.end = starts.get(i + 1).copied();
                    track
                })
                .collect();

            self.sheet.files.push(CueFile {
                name: file.name,
                file_type: file.file_type,
                tracks,
            });
        }

        finished
    }
}

fn parse_msf(line: usize, value: &str) -> CueResult<Msf> {
    value
        .parse::<Msf>()
        .map_err(|err| CueError::syntax(line, err.to_string()))
}

fn tokenize(line_number: usize, line: &str) -> CueResult<Vec<String>> {
    lazy_static! {
        static ref TOKEN: Regex = Regex::new(r#""([^"]*)"|(\S+)"#).unwrap();
    }

    TOKEN
        .captures_iter(line)
        .map(|captures| match (captures.get(1), captures.get(2)) {
            (Some(quoted), _) => Ok(quoted.as_str().to_string()),
            (None, Some(bare)) if bare.as_str().starts_with('"') => Err(CueError::syntax(
                line_number,
                "unterminated quoted string",
            )),
            (None, Some(bare)) => Ok(bare.as_str().to_string()),
            (None, None) => unreachable!("token regex always captures a group"),
        })
        .collect()
}
