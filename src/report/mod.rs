use crate::cd::msf;
use crate::cue::models::{CueSheet, CueTrack, RESERVED_TRACK_ATTRIBUTES};
use crate::probe::StreamProber;
use crate::util::{force_quote, quote};
use std::fmt::Write;

/// Renders the parsed sheet together with what is known about the files it
/// references. The output only depends on the sheet and the probe results.
pub fn render_cue_report(cue: &CueSheet, prober: &dyn StreamProber) -> String {
    let mut out = String::new();

    for (key, value) in cue.attrs.iter() {
        let _ = writeln!(out, "{}: {}", key.to_uppercase(), quote(value));
    }

    for file in &cue.files {
        let path = cue.path_of(file);

        let _ = write!(out, "FILE {}", force_quote(&file.name));
        if !path.exists() {
            out.push_str(": not exists\n");
        } else {
            match prober.probe(&path) {
                None => out.push_str(": unknown type\n"),
                Some(info) => {
                    let _ = writeln!(
                        out,
                        " [{}] ({}/{}, {} ch)",
                        info.kind, info.bits_per_sample, info.sample_rate, info.channels
                    );
                }
            }
        }

        for track in &file.tracks {
            render_track(&mut out, track);
        }
    }

    out
}

fn render_track(out: &mut String, track: &CueTrack) {
    let _ = write!(out, "\tTRACK {:02}", track.number);
    if let Some(title) = track.title() {
        let _ = write!(out, " {}", quote(title));
    }

    let _ = write!(out, ": {} -", msf(track.begin));
    if let Some(end) = track.end {
        let _ = write!(out, " {}", msf(end));
    }
    out.push('\n');

    for (key, value) in track.attrs.iter() {
        if RESERVED_TRACK_ATTRIBUTES.contains(&key) {
            continue;
        }
        let _ = writeln!(out, "\t\t{}: {}", key.to_uppercase(), quote(value));
    }
}
