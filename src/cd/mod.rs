// src/cd/mod.rs
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

pub const FRAMES_PER_SECOND: u64 = 75;
pub const SECONDS_PER_MINUTE: u64 = 60;
pub const FRAMES_PER_MINUTE: u64 = FRAMES_PER_SECOND * SECONDS_PER_MINUTE;

/// A disc position as minutes, seconds and frames (75 frames per second).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Msf {
    pub minutes: u64,
    pub seconds: u8,
    pub frames: u8,
}

impl Msf {
    pub fn from_frames(frames: u64) -> Self {
        Self {
            minutes: frames / FRAMES_PER_MINUTE,
            seconds: (frames / FRAMES_PER_SECOND % SECONDS_PER_MINUTE) as u8,
            frames: (frames % FRAMES_PER_SECOND) as u8,
        }
    }

    pub fn to_frames(&self) -> u64 {
        self.minutes * FRAMES_PER_MINUTE
            + self.seconds as u64 * FRAMES_PER_SECOND
            + self.frames as u64
    }
}

impl Display for Msf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{:02}:{:02}", self.minutes, self.seconds, self.frames)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid time code \"{0}\", expected mm:ss:ff")]
pub struct InvalidMsf(pub String);

impl FromStr for Msf {
    type Err = InvalidMsf;

    /// Parses the `mm:ss:ff` notation used by cue sheets.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidMsf(s.to_string());

        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() != 3 {
            return Err(invalid());
        }

        let minutes = parts[0].parse::<u64>().map_err(|_| invalid())?;
        let seconds = parts[1].parse::<u8>().map_err(|_| invalid())?;
        let frames = parts[2].parse::<u8>().map_err(|_| invalid())?;

        if seconds as u64 >= SECONDS_PER_MINUTE || frames as u64 >= FRAMES_PER_SECOND {
            return Err(invalid());
        }

        // the position must fit in a frame count
        minutes
            .checked_mul(FRAMES_PER_MINUTE)
            .and_then(|total| total.checked_add(FRAMES_PER_MINUTE - 1))
            .ok_or_else(invalid)?;

        Ok(Self {
            minutes,
            seconds,
            frames,
        })
    }
}

/// Renders a frame count as `M:SS:FF`.
pub fn msf(frames: u64) -> String {
    Msf::from_frames(frames).to_string()
}
