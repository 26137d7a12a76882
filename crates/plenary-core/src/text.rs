//! Text cleaning for transcript fragments.
//!
//! Transcripts are exported from an office suite and carry its artefacts:
//! non-breaking spaces, soft hyphens, hard line breaks inside paragraphs and
//! conditional comments. Every string the extractor compares goes through
//! [`clean_text`] first; names additionally go through [`normalize`].

use unicode_normalization::UnicodeNormalization;

/// Fragments that show up in name lists but are not member names.
///
/// Compared against cleaned fragments. Covers technical remarks printed
/// inside name lists, office metadata leaking into paragraphs, and names of
/// people who were recorded in a vote but never sat in the House.
pub const BANNED_FRAGMENTS: &[&str] = &[
    "Ramaekers Jef",
    "Collignon Christophe",
    "Christophe Collignon",
    "Annane Jihane",
    "Jihane Annane",
    "(Ingevolge een technisch mankement werd de stemming van mevrouw Inge Vervotte",
    "afwezig",
    "opgenomen)",
    "(A la suite d’une erreur technique",
    "le vote de Mme Inge Vervotte",
    "absente",
    "(Om technische redenen is er geen stemming nr 2 / Pour raison technique",
    "il n'y a pas de vote n° 2)",
    "(De heer Guido De Padt heeft gestemd vanop de bank van de heer Ludo Van Campenhout",
    "afwezig)",
    "a été enregistré)",
    "<![if !supportEmptyParas]> <![endif]>",
];

/// Collapse whitespace and strip office artefacts.
///
/// - runs of whitespace (including U+00A0) become one space
/// - full stops are removed (`nr. 2` → `nr 2`, `001.` → `001`)
/// - soft hyphens (U+00AD) become `-`
/// - leading and trailing whitespace is trimmed
pub fn clean_text(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed
        .chars()
        .filter(|c| *c != '.' && *c != '\r')
        .map(|c| match c {
            '\n' | '\u{a0}' => ' ',
            '\u{ad}' => '-',
            other => other,
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Clean a string and fold it to ASCII by dropping combining marks.
///
/// `Hélène Côté` → `Helene Cote`. Case is preserved; callers lowercase when
/// they need case-insensitive comparison.
pub fn normalize(text: &str) -> String {
    clean_text(text).nfkd().filter(char::is_ascii).collect()
}

/// `true` for an empty fragment or one listed in [`BANNED_FRAGMENTS`].
pub fn is_banned_or_empty(fragment: &str) -> bool {
    fragment.is_empty() || BANNED_FRAGMENTS.contains(&fragment)
}

/// Split a comma-joined buffer into cleaned candidate names.
///
/// Blank fragments and banned fragments are dropped.
pub fn split_names(buffer: &str) -> Vec<String> {
    buffer
        .split(',')
        .map(clean_text)
        .filter(|name| !is_banned_or_empty(name))
        .collect()
}

/// Parse a cleaned table cell as a tally.
pub fn parse_count(cell: &str) -> Option<u32> {
    let cleaned = clean_text(cell);
    if cleaned.is_empty() || !cleaned.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    cleaned.parse().ok()
}

/// `true` when a cleaned fragment is an office conditional comment.
pub fn is_office_comment(cleaned: &str) -> bool {
    cleaned.starts_with('<')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_whitespace_and_nbsp() {
        assert_eq!(clean_text("  Ja \u{a0}\n  88 "), "Ja 88");
    }

    #[test]
    fn strips_full_stops() {
        assert_eq!(clean_text("Vote nr. 001."), "Vote nr 001");
        assert_eq!(clean_text("42.5"), "425");
    }

    #[test]
    fn soft_hyphen_becomes_dash() {
        assert_eq!(clean_text("Van\u{ad}dendriessche"), "Van-dendriessche");
    }

    #[test]
    fn normalize_folds_diacritics() {
        assert_eq!(normalize("Hélène  Côté"), "Helene Cote");
        assert_eq!(normalize("Özen Ünal"), "Ozen Unal");
    }

    #[test]
    fn split_names_drops_blank_and_banned() {
        let names = split_names("Anseeuw Björn, , Bacquelaine Daniel, afwezig,<![if !supportEmptyParas]> <![endif]>");
        assert_eq!(names, vec!["Anseeuw Björn", "Bacquelaine Daniel"]);
    }

    #[test]
    fn banned_historic_names_are_dropped() {
        assert!(split_names("Collignon Christophe, Ramaekers Jef").is_empty());
    }

    #[test]
    fn parse_count_accepts_digits_only() {
        assert_eq!(parse_count(" 88 "), Some(88));
        assert_eq!(parse_count("Ja"), None);
        assert_eq!(parse_count(""), None);
        assert_eq!(parse_count("-3"), None);
    }

    #[test]
    fn office_comment_detection() {
        assert!(is_office_comment("<![if !supportEmptyParas]>"));
        assert!(!is_office_comment("12 Wetsontwerp"));
    }
}
