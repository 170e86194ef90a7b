#![forbid(unsafe_code)]

//! Human-readable swatch names from dotted palette paths.

/// Derive a card title from a dotted path.
///
/// The first segment (the palette group) is dropped; every remaining segment
/// is split on `_`, each word gets its first character uppercased, and the
/// words are joined with single spaces.
///
/// ```
/// use swatchbook_core::naming::display_name;
///
/// assert_eq!(display_name("brand.colors.primary_dark"), "Colors Primary Dark");
/// ```
#[must_use]
pub fn display_name(path: &str) -> String {
    path.split('.')
        .skip(1)
        .map(|segment| {
            segment
                .split('_')
                .map(capitalize)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
