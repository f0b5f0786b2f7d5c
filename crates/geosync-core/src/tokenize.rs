// crates/geosync-core/src/tokenize.rs
use crate::text::is_region_marker;

/// A raw place string split into its city part and optional region part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceParts<'a> {
    pub city: std::borrow::Cow<'a, str>,
    pub region: Option<String>,
}

/// Splits a trimmed place string at the first word that looks like a region.
///
/// Every word from the first region marker onwards (an administrative noun or
/// the stem of a well-known region) forms the region part. The city part is
/// never empty: when the very first word is a marker the whole input stays the
/// city part, and the region words are still reported.
///
/// ```rust
/// use geosync_core::tokenize::split_place;
///
/// let parts = split_place("Кировск Ленинградская область");
/// assert_eq!(parts.city, "Кировск");
/// assert_eq!(parts.region.as_deref(), Some("Ленинградская область"));
/// ```
pub fn split_place(text: &str) -> PlaceParts<'_> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() <= 1 {
        return PlaceParts {
            city: text.into(),
            region: None,
        };
    }

    let Some(split) = words.iter().position(|w| is_region_marker(w)) else {
        return PlaceParts {
            city: text.into(),
            region: None,
        };
    };

    let region = Some(words[split..].join(" "));
    let city = if split == 0 {
        text.into()
    } else {
        words[..split].join(" ").into()
    };
    PlaceParts { city, region }
}
