use aho_corasick::{AhoCorasick, AhoCorasickBuilder, MatchKind};
use fancy_regex::{Captures, Regex};
use rayon::prelude::*;

use crate::error::Result;
use crate::literal::extract_literals;

/// Needles shorter than this make the prefilter fire on nearly every UA.
const MIN_LITERAL_LEN: usize = 3;

/// Result of a successful match.
pub(crate) struct MatchResult<'a, T> {
    pub data: &'a T,
    pub captures: Captures<'a>,
}

/// Ordered rule list: first matching entry wins.
///
/// Every entry is compiled with fancy_regex (rule files use lookahead for
/// exclusions such as "Chrome but not Edge").  An Aho-Corasick automaton over
/// the literal prefixes of each pattern skips entries whose required text is
/// absent from the input.
pub(crate) struct CompiledParser<T> {
    regexes: Vec<Regex>,
    data: Vec<T>,
    /// Aho-Corasick pattern index -> entry index.
    needle_to_entry: Vec<usize>,
    prefilter: Option<AhoCorasick>,
    /// Entries without usable literals; tried on every input.
    always: Vec<bool>,
}

impl<T> CompiledParser<T> {
    /// Build a parser from `(regex_pattern, data)` pairs, preserving order.
    pub fn build(items: impl IntoIterator<Item = (String, T)>) -> Result<Self>
    where
        T: Send,
    {
        let (patterns, data): (Vec<String>, Vec<T>) = items.into_iter().unzip();

        let regexes: Vec<Regex> = patterns
            .par_iter()
            .map(|p| Regex::new(p).map_err(crate::error::Error::from))
            .collect::<Result<Vec<_>>>()?;

        let mut needles: Vec<String> = Vec::new();
        let mut needle_to_entry: Vec<usize> = Vec::new();
        let mut always = vec![false; patterns.len()];

        for (idx, pattern) in patterns.iter().enumerate() {
            let literals = extract_literals(pattern, MIN_LITERAL_LEN);
            if literals.is_empty() {
                always[idx] = true;
                continue;
            }
            for lit in literals {
                needles.push(lit);
                needle_to_entry.push(idx);
            }
        }

        let prefilter = if needles.is_empty() {
            None
        } else {
            Some(
                AhoCorasickBuilder::new()
                    .ascii_case_insensitive(true)
                    .match_kind(MatchKind::Standard)
                    .build(&needles)?,
            )
        };

        log::debug!(
            "compiled {} rules ({} prefiltered needles, {} always tried)",
            regexes.len(),
            needles.len(),
            always.iter().filter(|a| **a).count()
        );

        Ok(Self {
            regexes,
            data,
            needle_to_entry,
            prefilter,
            always,
        })
    }

    pub fn len(&self) -> usize {
        self.regexes.len()
    }

    /// Entries worth running the regex for, in ascending entry order.
    fn candidates(&self, ua: &str) -> Vec<bool> {
        let mut candidate = self.always.clone();
        if let Some(ac) = &self.prefilter {
            for m in ac.find_overlapping_iter(ua) {
                candidate[self.needle_to_entry[m.pattern().as_usize()]] = true;
            }
        }
        candidate
    }

    /// Find the first matching entry (preserving rule order).
    pub fn match_first<'a>(&'a self, ua: &'a str) -> Option<MatchResult<'a, T>> {
        let candidate = self.candidates(ua);
        self.regexes
            .iter()
            .enumerate()
            .filter(|(idx, _)| candidate[*idx])
            .find_map(|(idx, re)| match re.captures(ua) {
                Ok(Some(captures)) => Some(MatchResult {
                    data: &self.data[idx],
                    captures,
                }),
                _ => None,
            })
    }

    /// Does any entry match?
    pub fn is_match(&self, ua: &str) -> bool {
        let candidate = self.candidates(ua);
        self.regexes
            .iter()
            .enumerate()
            .any(|(idx, re)| candidate[idx] && re.is_match(ua).unwrap_or(false))
    }
}
