// crates/geosync-core/src/text.rs

//! Text folding helpers shared by the tokenizer, the resolver and the
//! re-ranking rules.
//!
//! Nothing here transliterates: names are compared in their own alphabet,
//! only case and a handful of well-known region spellings are folded.

/// Adjectival region forms rewritten to the stem the city names share.
///
/// Applied in order, before [`ADMIN_NOUNS`] are stripped, so that a generic
/// noun embedded in a longer form never leaks through half-rewritten.
pub const REGION_REWRITES: &[(&str, &str)] = &[
    ("ленинградская", "ленинград"),
    ("московская", "москов"),
    ("курская", "курск"),
    ("кемеровская", "кемеров"),
    ("свердловская", "свердлов"),
    ("нижегородская", "нижегород"),
    ("новосибирская", "новосибирск"),
    ("тамбовская", "тамбов"),
    ("красноярская", "красноярск"),
];

/// Generic administrative nouns (and their abbreviations) removed from a
/// region qualifier. Longer spellings come first, dotted abbreviations before
/// the bare ones.
pub const ADMIN_NOUNS: &[&str] = &[
    "область",
    "обл.",
    "обл",
    "край",
    "республика",
    "респ.",
    "респ",
];

/// Substrings that mark a word as an administrative-unit noun.
pub const ADMIN_KEYWORDS: &[&str] = &["област", "край", "республик", "округ"];

/// Stems of the well-known regions that can open a region part on their own.
pub const REGION_STEMS: &[&str] = &[
    "ленинград",
    "москов",
    "курск",
    "кемеров",
    "свердлов",
    "нижегород",
    "новосибирск",
    "тамбов",
    "красноярск",
];

/// Trimmed, lowercased comparison key.
#[inline]
pub fn fold_key(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Canonicalizes a region qualifier for loose comparison.
///
/// ```rust
/// use geosync_core::text::normalize_region;
///
/// assert_eq!(normalize_region("Ленинградская область"), "ленинград");
/// assert_eq!(normalize_region("Респ. Татарстан"), "татарстан");
/// ```
pub fn normalize_region(text: &str) -> String {
    let mut out = text.to_lowercase();
    for (from, to) in REGION_REWRITES {
        out = out.replace(from, to);
    }
    for noun in ADMIN_NOUNS {
        out = out.replace(noun, "");
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// The part of a gazetteer name before any parenthetical qualifier.
///
/// `"Кировск (Мурманская область)"` -> `"Кировск"`.
pub fn base_name(name: &str) -> &str {
    match name.find('(') {
        Some(pos) => name[..pos].trim(),
        None => name.trim(),
    }
}

/// The parenthetical qualifier of a gazetteer name, if any.
///
/// `"Кировск (Мурманская область)"` -> `Some("Мурманская область")`.
pub fn qualifier(name: &str) -> Option<&str> {
    let open = name.find('(')?;
    let rest = &name[open + 1..];
    let inner = match rest.find(')') {
        Some(close) => &rest[..close],
        None => rest,
    };
    Some(inner.trim())
}

/// Whether the text contains an administrative-unit noun.
pub fn has_admin_keyword(text: &str) -> bool {
    let lower = text.to_lowercase();
    ADMIN_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// Whether a single word opens the region part of a place string.
pub fn is_region_marker(word: &str) -> bool {
    let lower = word.to_lowercase();
    ADMIN_KEYWORDS
        .iter()
        .chain(REGION_STEMS.iter())
        .any(|k| lower.contains(k))
}

#[inline]
pub(crate) fn char_len(s: &str) -> usize {
    s.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewrites_adjective_before_stripping_nouns() {
        assert_eq!(normalize_region("Ленинградская область"), "ленинград");
        assert_eq!(normalize_region("МОСКОВСКАЯ обл"), "москов");
        assert_eq!(normalize_region("Красноярский край"), "красноярский");
    }

    #[test]
    fn strips_generic_nouns_and_collapses_spaces() {
        assert_eq!(normalize_region("Республика  Карелия"), "карелия");
        assert_eq!(normalize_region("  область  "), "");
    }

    #[test]
    fn dotted_abbreviations_leave_no_punctuation() {
        assert_eq!(normalize_region("Респ. Татарстан"), "татарстан");
        assert_eq!(normalize_region("Нижегородская обл."), "нижегород");
        assert_eq!(normalize_region("обл.Московская"), "москов");
    }

    #[test]
    fn base_and_qualifier() {
        let name = "Кировск (Ленинградская область)";
        assert_eq!(base_name(name), "Кировск");
        assert_eq!(qualifier(name), Some("Ленинградская область"));
        assert_eq!(base_name("Москва"), "Москва");
        assert_eq!(qualifier("Москва"), None);
        assert_eq!(qualifier("Город (без скобки"), Some("без скобки"));
    }

    #[test]
    fn keyword_detection_is_case_insensitive() {
        assert!(has_admin_keyword("Кировск ОБЛАСТЬ"));
        assert!(has_admin_keyword("Ханты-Мансийский автономный округ"));
        assert!(!has_admin_keyword("Москва"));
        assert!(is_region_marker("Ленинградская"));
        assert!(is_region_marker("Курской"));
        assert!(!is_region_marker("Кировск"));
    }
}
