use fancy_regex::Regex;

use super::error::Result;

/// Gate applied before a platform browser table is consulted.
///
/// The iOS and Android signature lists contain generic names ("Safari",
/// "Chrome") that also appear in desktop user agents; the table only applies
/// once the UA has identified itself as that platform.
pub(crate) enum PlatformGate {
    /// No gate: the table is always consulted.
    None,
    /// UA must match this regex to proceed.
    Regex(Regex),
}

impl PlatformGate {
    /// An empty pattern means "no gate".
    pub fn build(pattern: &str) -> Result<PlatformGate> {
        if pattern.trim().is_empty() {
            return Ok(PlatformGate::None);
        }
        Ok(PlatformGate::Regex(Regex::new(pattern)?))
    }

    pub fn matches(&self, ua: &str) -> bool {
        match self {
            Self::None => true,
            Self::Regex(re) => re.is_match(ua).unwrap_or(false),
        }
    }
}
