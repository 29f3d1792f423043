use std::borrow::Cow;

/// Placeholder used for a browser name or version that could not be read.
pub(crate) const UNKNOWN: &str = "Unknown";

/// Dot-separated numeric comparison: is `a < b`?  Missing components are
/// treated as 0.  Returns `None` when either side has a non-numeric
/// component, so callers can tell "older" apart from "unreadable".
pub(crate) fn version_lt(a: &str, b: &str) -> Option<bool> {
    let mut ai = a.split('.');
    let mut bi = b.split('.');
    loop {
        let (an, bn) = match (ai.next(), bi.next()) {
            (None, None) => return Some(false),
            (Some(av), None) => (av.parse::<u32>().ok()?, 0),
            (None, Some(bv)) => (0, bv.parse::<u32>().ok()?),
            (Some(av), Some(bv)) => (av.parse::<u32>().ok()?, bv.parse::<u32>().ok()?),
        };
        if an != bn {
            return Some(an < bn);
        }
    }
}

/// Is `version` at least `minimum`?  `None` when either is unreadable.
pub(crate) fn version_ge(version: &str, minimum: &str) -> Option<bool> {
    version_lt(version, minimum).map(|lt| !lt)
}

/// Text of capture group `group`, or [`UNKNOWN`] when the group did not
/// participate in the match.
pub(crate) fn capture_or_unknown<'a>(captures: &fancy_regex::Captures<'a>, group: usize) -> Cow<'a, str> {
    captures
        .get(group)
        .map(|m| Cow::Borrowed(m.as_str()))
        .unwrap_or(Cow::Borrowed(UNKNOWN))
}
