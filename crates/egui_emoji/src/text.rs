//! Splitting raw text into literal runs and emoji runs.
//!
//! Two passes: [`mark_resolved`] rewrites every resolved `:shortcode:` into a
//! delimited token, then [`runs`] splits on the delimiter and interleaves
//! text and emoji. Shortcodes without a resolved entry are never rewritten,
//! so they survive as literal `:shortcode:` text; that is the fallback for
//! unknown and failed emoji.

/// Delimiter inserted around resolved shortcodes by [`mark_resolved`].
///
/// First private-use codepoint, so it cannot occur in ordinary input.
pub(crate) const SHORTCODE_SEP: char = '\u{e000}';

fn is_shortcode_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '+' | '-')
}

/// First pass: replace every `:shortcode:` occurrence for which `is_resolved`
/// returns `true` with `SEP shortcode SEP`.
///
/// Scanning is left-to-right and a closing colon is never reused as the
/// opener of the next candidate, so `":a:b:"` with both shortcodes resolved
/// marks only `a`.
pub(crate) fn mark_resolved(text: &str, is_resolved: impl Fn(&str) -> bool) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(colon) = rest.find(':') {
        out.push_str(&rest[..colon]);
        let after = &rest[colon + 1..];
        let candidate_end = after.find(|c: char| !is_shortcode_char(c));
        match candidate_end {
            Some(end)
                if end > 0 && after[end..].starts_with(':') && is_resolved(&after[..end]) =>
            {
                out.push(SHORTCODE_SEP);
                out.push_str(&after[..end]);
                out.push(SHORTCODE_SEP);
                rest = &after[end + 1..];
            }
            _ => {
                out.push(':');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Run<'a> {
    /// Literal text, shown as-is.
    Text(&'a str),

    /// The shortcode of a resolved emoji.
    Emoji(&'a str),
}

/// Second pass: split marked text on [`SHORTCODE_SEP`] into text and emoji runs.
///
/// [`mark_resolved`] emits balanced delimiter pairs, so the segments at odd
/// indices are exactly the resolved shortcodes. Literal text that happens to
/// equal a shortcode name is therefore never mistaken for an emoji.
pub(crate) fn runs(marked: &str) -> impl Iterator<Item = Run<'_>> {
    marked
        .split(SHORTCODE_SEP)
        .enumerate()
        .filter(|(_, segment)| !segment.is_empty())
        .map(|(i, segment)| {
            if i % 2 == 1 {
                Run::Emoji(segment)
            } else {
                Run::Text(segment)
            }
        })
}
