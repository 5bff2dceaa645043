//! Canonicalization of free-form categorical labels
//!
//! Form inputs arrive as `black_soil`, `BLACK SOIL`, `rabi` and so on; the
//! encoders only know the title-cased vocabulary they were fitted on.

/// Convert a free-form label into the canonical vocabulary form.
///
/// Underscores become spaces, surrounding and repeated whitespace is
/// collapsed, and every word is title-cased: a letter is upper-cased when it
/// does not follow another letter and lower-cased otherwise.
///
/// ```
/// assert_eq!(shared::normalize_label("black_soil"), "Black Soil");
/// assert_eq!(shared::normalize_label("KHARIF"), "Kharif");
/// ```
pub fn normalize_label(value: &str) -> String {
    value
        .replace('_', " ")
        .split_whitespace()
        .map(title_case_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case_word(word: &str) -> String {
    let mut out = String::with_capacity(word.len());

    for ch in word.chars() {
        // Decided on what was emitted so a second pass sees the same context
        let after_letter = matches!(out.chars().next_back(), Some(c) if c.is_alphabetic());
        if after_letter {
            out.extend(ch.to_lowercase());
        } else {
            // `ß` upper-cases to `SS`; only the first char stays upper
            let mut upper = ch.to_uppercase();
            out.extend(upper.next());
            out.extend(upper.flat_map(char::to_lowercase));
        }
    }

    out
}
