//! Case detection and re-casing of replacement text.

use icu_casemap::CaseMapper;
use icu_locale_core::langid;
use unicode_segmentation::UnicodeSegmentation;

/// The case shape of a matched piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseShape {
    /// Two or more cased letters, all upper case (`"DAT IS"`).
    Upper,
    /// The first cased letter is upper case (`"Dat is"`, `"I"`).
    Capitalized,
    /// Anything else.
    Other,
}

impl CaseShape {
    /// Classify `text` by its letters.
    pub fn of(text: &str) -> Self {
        let mut cased = text.chars().filter(|c| c.is_lowercase() || c.is_uppercase());
        let Some(first) = cased.next() else {
            return CaseShape::Other;
        };
        if !first.is_uppercase() {
            return CaseShape::Other;
        }
        let mut rest = cased.peekable();
        if rest.peek().is_some() && rest.all(char::is_uppercase) {
            CaseShape::Upper
        } else {
            CaseShape::Capitalized
        }
    }

    /// Re-case `replacement` to this shape. `Other` leaves it unchanged.
    pub fn apply(self, replacement: &str) -> String {
        match self {
            CaseShape::Upper => uppercase(replacement),
            CaseShape::Capitalized => capitalize_first(replacement),
            CaseShape::Other => replacement.to_string(),
        }
    }
}

/// Returns true if the first letter of `text` is upper case.
pub fn starts_uppercase(text: &str) -> bool {
    text.chars()
        .find(|c| c.is_alphabetic())
        .is_some_and(char::is_uppercase)
}

/// Upper-case the first grapheme of `text`, leaving the rest as is.
pub fn capitalize_first(text: &str) -> String {
    let mut graphemes = text.graphemes(true);
    match graphemes.next() {
        Some(first) => {
            let mut out = uppercase(first);
            out.push_str(graphemes.as_str());
            out
        }
        None => String::new(),
    }
}

/// Full Unicode upper-casing with Dutch tailoring.
pub fn uppercase(text: &str) -> String {
    CaseMapper::new()
        .uppercase_to_string(text, &langid!("nl"))
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_shapes() {
        assert_eq!(CaseShape::of("DAT IS"), CaseShape::Upper);
        assert_eq!(CaseShape::of("Dat is"), CaseShape::Capitalized);
        assert_eq!(CaseShape::of("dat IS"), CaseShape::Other);
        assert_eq!(CaseShape::of("I"), CaseShape::Capitalized);
        assert_eq!(CaseShape::of("123"), CaseShape::Other);
    }

    #[test]
    fn capitalizes_only_the_first_letter() {
        assert_eq!(capitalize_first("gij"), "Gij");
        assert_eq!(capitalize_first("da’s"), "Da’s");
        assert_eq!(capitalize_first("éénmaal"), "Éénmaal");
        assert_eq!(capitalize_first(""), "");
    }

    #[test]
    fn upper_cases_whole_replacement() {
        assert_eq!(CaseShape::Upper.apply("da's"), "DA'S");
    }
}
