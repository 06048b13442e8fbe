use unicode_normalization::UnicodeNormalization;

/// Combining Diacritical Marks, the block NFD splits Latin accents into.
const COMBINING_DIACRITICS: std::ops::RangeInclusive<char> = '\u{0300}'..='\u{036F}';

/// Turn a facility name into a lowercase, hyphenated, filesystem-safe slug.
///
/// The name is lowercased and NFD-decomposed so accented letters split into a
/// base letter plus combining marks; marks in U+0300..=U+036F are dropped.
/// Other combining marks (e.g. enclosing circles) act as separators. Every run of
/// characters outside `[a-z0-9]` then collapses into a single `-`, and
/// leading/trailing hyphens are trimmed.
///
/// Letters with no decomposition (e.g. `ø`, `đ`) are not transliterated and
/// act as separators.
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for c in name.to_lowercase().nfd().filter(|c| !COMBINING_DIACRITICS.contains(c)) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }

    slug
}
