//! Category keyword tables.
//!
//! Category strings come from the vision service and from users, so they are
//! noisy: mixed case, punctuation, plurals. Classification normalizes the text
//! and then picks the entry whose keyword is the longest match, falling back to
//! table order on ties. One table shape serves every category-driven lookup.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Anything that is not a lowercase letter or digit
    static ref NON_WORD: Regex = Regex::new(r"[^a-z0-9]+").unwrap();
}

/// Lowercase, strip punctuation, collapse whitespace
pub fn normalize_category(text: &str) -> String {
    let lower = text.to_lowercase();
    NON_WORD.replace_all(&lower, " ").trim().to_string()
}

/// Whole-word match of `keyword` in a space-padded haystack, allowing the
/// plural endings `s`, `es` and `y -> ies`
fn contains_word(haystack: &str, keyword: &str) -> bool {
    let plural_y = keyword
        .strip_suffix('y')
        .map(|stem| format!(" {}ies ", stem));
    if plural_y.is_some_and(|needle| haystack.contains(&needle)) {
        return true;
    }

    let needle = format!(" {}", keyword);
    haystack.match_indices(&needle).any(|(at, _)| {
        let rest = &haystack[at + needle.len()..];
        rest.starts_with(' ') || rest.starts_with("s ") || rest.starts_with("es ")
    })
}

/// One `{keyword-set -> family}` row
#[derive(Debug, Clone, Copy)]
pub struct KeywordEntry<F: 'static> {
    pub family: F,
    pub keywords: &'static [&'static str],
}

/// Result of a successful classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordMatch<F> {
    pub family: F,
    pub keyword: &'static str,
}

/// Ordered keyword table
#[derive(Debug, Clone, Copy)]
pub struct KeywordTable<F: 'static> {
    entries: &'static [KeywordEntry<F>],
}

impl<F: Copy + std::fmt::Debug> KeywordTable<F> {
    pub const fn new(entries: &'static [KeywordEntry<F>]) -> Self {
        Self { entries }
    }

    /// Classify a single piece of text
    pub fn classify(&self, text: &str) -> Option<KeywordMatch<F>> {
        let normalized = normalize_category(text);
        if normalized.is_empty() {
            return None;
        }
        // Padding on both sides anchors every keyword at word boundaries.
        let haystack = format!(" {} ", normalized);

        let mut best: Option<KeywordMatch<F>> = None;
        for entry in self.entries {
            for &keyword in entry.keywords {
                if !contains_word(&haystack, keyword) {
                    continue;
                }
                let longer = best.map_or(true, |b| keyword.len() > b.keyword.len());
                if longer {
                    best = Some(KeywordMatch {
                        family: entry.family,
                        keyword,
                    });
                }
            }
        }

        if let Some(m) = &best {
            tracing::debug!(family = ?m.family, keyword = m.keyword, "category matched");
        }
        best
    }

    /// Classify several optional fields joined together
    pub fn classify_all(&self, parts: &[Option<&str>]) -> Option<KeywordMatch<F>> {
        let joined = parts
            .iter()
            .flatten()
            .copied()
            .collect::<Vec<_>>()
            .join(" ");
        self.classify(&joined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Family {
        Sweets,
        Chocolate,
        Drinks,
    }

    const ENTRIES: &[KeywordEntry<Family>] = &[
        KeywordEntry { family: Family::Sweets, keywords: &["candy", "sweet", "chocolate"] },
        KeywordEntry { family: Family::Chocolate, keywords: &["dark chocolate"] },
        KeywordEntry { family: Family::Drinks, keywords: &["drink", "juice"] },
    ];

    const TABLE: KeywordTable<Family> = KeywordTable::new(ENTRIES);

    #[test]
    fn test_normalize() {
        assert_eq!(normalize_category("  Snacks & Sweets!! "), "snacks sweets");
        assert_eq!(normalize_category("Soft-Drinks"), "soft drinks");
    }

    #[test]
    fn test_longest_keyword_wins() {
        let m = TABLE.classify("Premium Dark Chocolate Bar").unwrap();
        assert_eq!(m.family, Family::Chocolate);
        assert_eq!(m.keyword, "dark chocolate");
    }

    #[test]
    fn test_table_order_breaks_ties() {
        // "candy" and "juice" have equal length; the earlier row wins.
        let m = TABLE.classify("juice candy").unwrap();
        assert_eq!(m.family, Family::Sweets);
    }

    #[test]
    fn test_plural_keyword_matches() {
        assert_eq!(TABLE.classify("Fruit Juices").unwrap().family, Family::Drinks);
        assert!(TABLE.classify("undrinkable").is_none());
    }

    #[test]
    fn test_keyword_must_end_at_word_boundary() {
        assert!(TABLE.classify("Sweetcorn kernels").is_none());
        assert!(TABLE.classify("Drinking glass").is_none());
        assert_eq!(TABLE.classify("Boiled sweets").unwrap().family, Family::Sweets);
        assert_eq!(TABLE.classify("Assorted Candies").unwrap().keyword, "candy");
    }

    #[test]
    fn test_classify_all_joins_fields() {
        let m = TABLE.classify_all(&[None, Some("food"), Some("drinks")]).unwrap();
        assert_eq!(m.family, Family::Drinks);
        assert!(TABLE.classify_all(&[None, None]).is_none());
    }
}
