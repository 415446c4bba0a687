//! Heuristic path shortening for compact source locations.

const VOWELS: &str = "aeiouAEIOU";

/// Shorten every segment but the last one and join them with `.`.
///
/// `github.com/fogfish/logger/attributes.go` becomes
/// `gthb.fgfs.lggr/attributes.go`.
pub fn shorten(path: &str, sep: &str) -> String {
    let seq: Vec<&str> = path.split(sep).collect();
    let Some((last, dirs)) = seq.split_last() else {
        return path.to_string();
    };
    if dirs.is_empty() {
        return path.to_string();
    }

    let dirs: Vec<String> = dirs.iter().map(|s| shorten_segment(s)).collect();
    format!("{}{sep}{last}", dirs.join("."))
}

/// Keep names up to 3 chars, strip vowels from names up to 6 chars, strip
/// vowels and cut to 4 chars otherwise.
pub fn shorten_segment(segment: &str) -> String {
    match segment.len() {
        0..=3 => segment.to_string(),
        4..=6 => remove_vowels(segment),
        _ => remove_vowels(segment).chars().take(4).collect(),
    }
}

/// Remove vowels except the first char. Returns the segment unchanged if
/// fewer than 2 chars would remain.
pub fn remove_vowels(segment: &str) -> String {
    let keep: String = segment
        .chars()
        .enumerate()
        .filter(|(i, c)| *i == 0 || !VOWELS.contains(*c))
        .map(|(_, c)| c)
        .collect();

    if keep.chars().count() < 2 {
        return segment.to_string();
    }
    keep
}
