use indexmap::IndexMap;
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Rule file  (regexes/browsers.yml)
//
// Every list is ordered: the first matching entry wins.
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct RuleFile {
    pub in_app_browsers: Vec<SignatureEntry>,
    pub ios: PlatformRules<Vec<SignatureEntry>>,
    pub android: PlatformRules<AndroidBrowserMap>,
    pub browsers: Vec<ProbeEntry>,
    pub mobile: String,
}

/// A named user-agent signature.  `regex` defaults to the name itself.
#[derive(Debug, Deserialize)]
pub(crate) struct SignatureEntry {
    pub name: String,
    #[serde(default)]
    pub regex: Option<String>,
}

/// Browser table consulted only when the platform gate matches the UA.
#[derive(Debug, Deserialize)]
pub(crate) struct PlatformRules<B> {
    pub gate: String,
    pub browsers: B,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AndroidBrowserEntry {
    pub package: String,
    #[serde(default)]
    pub regex: Option<String>,
}

/// Browser name -> entry.  IndexMap keeps YAML order (first-match-wins).
pub(crate) type AndroidBrowserMap = IndexMap<String, AndroidBrowserEntry>;

/// Version probe: capture group 1 of `regex` is the version.
#[derive(Debug, Deserialize)]
pub(crate) struct ProbeEntry {
    pub name: String,
    pub regex: String,
    #[serde(default)]
    pub min_version: Option<String>,
    #[serde(default)]
    pub unsupported: bool,
}

impl SignatureEntry {
    pub fn pattern(&self) -> String {
        self.regex.clone().unwrap_or_else(|| literal_pattern(&self.name))
    }
}

impl AndroidBrowserEntry {
    pub fn pattern(&self, name: &str) -> String {
        self.regex.clone().unwrap_or_else(|| literal_pattern(name))
    }
}

fn literal_pattern(name: &str) -> String {
    regex_syntax::escape(name)
}
