//! Whitespace handling for literal text runs.

use std::borrow::Cow;

/// Condense a raw text run the way JSX does.
///
/// The run is split into lines. Lines are trimmed at every line break (not at the
/// run's outer edges), empty lines are dropped, and the remaining lines are joined
/// with a single space. A run without line breaks is therefore kept verbatim,
/// which preserves spaces next to interpolations (`Hello ${name}!`).
///
/// Returns `None` when nothing is left.
pub fn condense_whitespace(raw: &str) -> Option<Cow<'_, str>> {
    if raw.is_empty() {
        return None;
    }
    if !raw.contains(['\n', '\r']) {
        return Some(if raw.contains('\t') {
            Cow::Owned(raw.replace('\t', " "))
        } else {
            Cow::Borrowed(raw)
        });
    }

    let normalized = raw.replace("\r\n", "\n").replace('\r', "\n");
    let lines: Vec<&str> = normalized.split('\n').collect();
    let last_non_empty = lines
        .iter()
        .rposition(|line| line.bytes().any(|b| b != b' ' && b != b'\t'));

    let mut out = String::new();
    for (i, line) in lines.iter().enumerate() {
        let is_first = i == 0;
        let is_last = i == lines.len() - 1;

        let line = line.replace('\t', " ");
        let mut trimmed = line.as_str();
        if !is_first {
            trimmed = trimmed.trim_start_matches(' ');
        }
        if !is_last {
            trimmed = trimmed.trim_end_matches(' ');
        }
        if trimmed.is_empty() {
            continue;
        }
        out.push_str(trimmed);
        if Some(i) != last_non_empty {
            out.push(' ');
        }
    }

    (!out.is_empty()).then_some(Cow::Owned(out))
}
