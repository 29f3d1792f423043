use regex_syntax::hir::literal::{ExtractKind, Extractor};

/// Extract the literal prefixes every match of `pattern` must start with, for
/// use as Aho-Corasick prefilter needles.
///
/// Returns an empty vec when the pattern cannot be reduced to a finite set of
/// literals of at least `min_len` bytes: the entry must then be tried on every
/// input.  Patterns using PCRE-only syntax (lookaround) fail to parse here and
/// land in that bucket too.
pub(crate) fn extract_literals(pattern: &str, min_len: usize) -> Vec<String> {
    let hir = match regex_syntax::parse(pattern) {
        Ok(h) => h,
        Err(_) => return Vec::new(),
    };

    let mut extractor = Extractor::new();
    extractor.kind(ExtractKind::Prefix);

    let seq = extractor.extract(&hir);
    let Some(literals) = seq.literals() else {
        return Vec::new();
    };

    let mut out = Vec::with_capacity(literals.len());
    for lit in literals {
        // A single short alternative makes the whole set useless as a filter.
        match std::str::from_utf8(lit.as_bytes()) {
            Ok(s) if s.len() >= min_len => out.push(s.to_lowercase()),
            _ => return Vec::new(),
        }
    }
    out.sort();
    out.dedup();
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_literal() {
        assert_eq!(extract_literals("Instagram", 3), vec!["instagram"]);
    }

    #[test]
    fn alternation() {
        let lits = extract_literals("FBAN|FBAV|FB_IAB", 3);
        assert_eq!(lits, vec!["fb_iab", "fban", "fbav"]);
    }

    #[test]
    fn short_alternative_disables_filter() {
        assert!(extract_literals("TikTok|X", 3).is_empty());
    }

    #[test]
    fn lookaround_is_always_candidate() {
        assert!(extract_literals(r"^(?!.*Chrome/).*Safari/", 3).is_empty());
    }
}
