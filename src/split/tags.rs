use crate::cue::models::{CueSheet, CueTrack};
use crate::options::TagOverrides;

/// Tags written to an output track, in output order. Command line overrides
/// win over the values found in the cue sheet, empty values are left out.
pub fn track_tags(
    cue: &CueSheet,
    track: &CueTrack,
    track_total: usize,
    overrides: &TagOverrides,
) -> Vec<(&'static str, String)> {
    let disc = |key: &str| cue.attrs.get(key);
    let own = |key: &str| track.get(key);

    let candidates: [(&'static str, Option<&str>); 8] = [
        ("album", overrides.get("album").or(disc("title"))),
        (
            "artist",
            overrides
                .get("artist")
                .or(own("performer"))
                .or(disc("performer")),
        ),
        (
            "albumartist",
            overrides.get("albumartist").or(disc("performer")),
        ),
        (
            "composer",
            overrides
                .get("composer")
                .or(own("songwriter"))
                .or(disc("songwriter")),
        ),
        ("date", overrides.get("date").or(disc("date"))),
        ("genre", overrides.get("genre").or(disc("genre"))),
        ("comment", overrides.get("comment").or(disc("comment"))),
        ("title", track.title()),
    ];

    let mut tags: Vec<(&'static str, String)> = candidates
        .into_iter()
        .filter_map(|(tag, value)| {
            value
                .filter(|v| !v.is_empty())
                .map(|v| (tag, v.to_string()))
        })
        .collect();

    tags.push(("tracknumber", track.number.to_string()));
    tags.push(("tracktotal", track_total.to_string()));
    tags
}
