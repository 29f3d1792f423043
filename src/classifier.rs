use super::db;
use super::error::{Error, Result};
use super::helpers::*;
use super::parser::CompiledParser;
use super::parser_data::*;
use super::platform_gate::PlatformGate;
use super::types::*;
use fancy_regex::Regex;
use rayon::prelude::*;
use std::borrow::Cow;
use std::path::Path;

/// Rule table compiled into the crate.
const BUILTIN_RULES: &str = include_str!("../regexes/browsers.yml");

pub struct BrowserClassifier {
    in_app_parser: CompiledParser<SignatureData>,
    ios_gate: PlatformGate,
    ios_parser: CompiledParser<SignatureData>,
    android_gate: PlatformGate,
    android_parser: CompiledParser<AndroidBrowserData>,
    probe_parser: CompiledParser<ProbeData>,
    mobile: Regex,
}

impl BrowserClassifier {
    /// Build the classifier from the rule table shipped with the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_yaml_str(BUILTIN_RULES)
    }

    /// Load a rule file (same schema as `regexes/browsers.yml`).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        log::info!("loading browser rules from {}", path.display());
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let rules: db::RuleFile = serde_yaml::from_str(content)?;
        Self::from_rules(rules)
    }

    fn from_rules(rules: db::RuleFile) -> Result<Self> {
        validate_rules(&rules)?;
        let db::RuleFile {
            in_app_browsers,
            ios,
            android,
            browsers,
            mobile,
        } = rules;

        // Signature tables and probes compile concurrently.
        let (signatures, probes) = rayon::join(
            || -> Result<_> {
                let in_app_parser = build_signature_parser(in_app_browsers)?;
                let ios_gate = PlatformGate::build(&ios.gate)?;
                let ios_parser = build_signature_parser(ios.browsers)?;
                let android_gate = PlatformGate::build(&android.gate)?;
                let android_parser =
                    CompiledParser::build(android.browsers.into_iter().map(|(name, e)| {
                        (
                            e.pattern(&name),
                            AndroidBrowserData {
                                name,
                                package: e.package,
                            },
                        )
                    }))?;
                Ok((in_app_parser, ios_gate, ios_parser, android_gate, android_parser))
            },
            || -> Result<_> {
                CompiledParser::build(browsers.into_iter().map(|p| {
                    let support = if p.unsupported {
                        Support::Never
                    } else {
                        match p.min_version {
                            Some(min) => Support::Minimum(min),
                            None => Support::Any,
                        }
                    };
                    (
                        p.regex,
                        ProbeData {
                            name: p.name,
                            support,
                        },
                    )
                }))
            },
        );

        let (in_app_parser, ios_gate, ios_parser, android_gate, android_parser) = signatures?;
        let probe_parser = probes?;
        let mobile = Regex::new(&mobile)?;

        log::debug!(
            "browser classifier ready: {} in-app, {} ios, {} android, {} probes",
            in_app_parser.len(),
            ios_parser.len(),
            android_parser.len(),
            probe_parser.len()
        );

        Ok(Self {
            in_app_parser,
            ios_gate,
            ios_parser,
            android_gate,
            android_parser,
            probe_parser,
            mobile,
        })
    }

    /// Classify a User-Agent string.
    ///
    /// Pure function of `ua`: the same input always yields the same result.
    pub fn classify<'a>(&'a self, ua: &'a str) -> BrowserInfo<'a> {
        // 1. Embedded web views
        let in_app_browser = self
            .in_app_parser
            .match_first(ua)
            .map(|m| m.data.name.as_str());

        // 2. iOS browsers
        let is_ios_browser = self.ios_gate.matches(ua) && self.ios_parser.is_match(ua);

        // 3. Android browsers (first match wins)
        let android = if self.android_gate.matches(ua) {
            self.android_parser.match_first(ua)
        } else {
            None
        };

        let mut name: Cow<'a, str> = Cow::Borrowed(UNKNOWN);
        let mut version: Cow<'a, str> = Cow::Borrowed(UNKNOWN);
        let mut is_supported = true;
        let mut browser_package = None;

        if let Some(m) = &android {
            name = Cow::Borrowed(m.data.name.as_str());
            browser_package = Some(m.data.package.as_str());
        } else if let Some(m) = self.probe_parser.match_first(ua) {
            // 4. Version probes, only when no name was assigned yet
            name = Cow::Borrowed(m.data.name.as_str());
            version = capture_or_unknown(&m.captures, 1);
            is_supported = m.data.support.allows(&version);
        }

        // 5. Mobile
        let is_mobile = self.mobile.is_match(ua).unwrap_or(false);

        BrowserInfo {
            name,
            version,
            is_supported,
            is_mobile,
            is_in_app_browser: in_app_browser.is_some(),
            is_ios_browser,
            is_android_browser: android.is_some(),
            browser_package,
            in_app_browser,
        }
    }

    /// Classify many user agents in parallel; output order matches input.
    pub fn classify_many<'a>(&'a self, uas: &[&'a str]) -> Vec<BrowserInfo<'a>> {
        uas.par_iter().map(|ua| self.classify(*ua)).collect()
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn build_signature_parser(entries: Vec<db::SignatureEntry>) -> Result<CompiledParser<SignatureData>> {
    CompiledParser::build(
        entries
            .into_iter()
            .map(|e| (e.pattern(), SignatureData { name: e.name })),
    )
}

fn validate_rules(rules: &db::RuleFile) -> Result<()> {
    if rules.in_app_browsers.is_empty() {
        return Err(Error::Config("in_app_browsers must not be empty".into()));
    }
    if rules.mobile.trim().is_empty() {
        return Err(Error::Config("mobile pattern must not be empty".into()));
    }
    for (name, entry) in &rules.android.browsers {
        if entry.package.trim().is_empty() {
            return Err(Error::Config(format!(
                "android browser '{}' has no package id",
                name
            )));
        }
    }
    for probe in &rules.browsers {
        if let Some(min) = &probe.min_version {
            if version_ge(min, "0").is_none() {
                return Err(Error::Config(format!(
                    "browser '{}' has unreadable min_version '{}'",
                    probe.name, min
                )));
            }
        }
    }
    Ok(())
}
