//! Cleanup of encoding damage in extracted PDF text.
//!
//! Badly-embedded fonts produce two kinds of garbage: `(cid:NNN)`
//! placeholders for glyphs with no Unicode mapping, and single Latin
//! characters wrapped in interpuncts (`・O・n・l・i・n・e・` for `Online`) when a
//! CJK font's fallback dot leaks between glyphs.

use once_cell::sync::Lazy;
use regex::Regex;

/// `・X・` where X is a single ASCII letter or digit, plus trailing spaces.
static INTERPUNCT_WRAPPED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"・([A-Za-z0-9])・\s*").expect("valid regex"));

/// Known CID placeholders and the glyph they stand for.
const CID_REPLACEMENTS: [(&str, &str); 3] = [
    ("(cid:127)", "・"),
    ("(cid127)", "・"),
    ("(cid:149)", "・"),
];

/// Repair interpunct-wrapped glyph runs and CID placeholders.
pub fn fix_encoding_issues(text: &str) -> String {
    let unwrapped = INTERPUNCT_WRAPPED.replace_all(text, "$1");

    let mut result = unwrapped
        .trim_matches(|c: char| c == '・' || c.is_whitespace())
        .to_string();

    for (cid, glyph) in CID_REPLACEMENTS {
        if result.contains(cid) {
            result = result.replace(cid, glyph);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unwraps_interpunct_run() {
        assert_eq!(fix_encoding_issues("・O・n・l・i・n・e・"), "Online");
    }

    #[test]
    fn unwraps_run_inside_sentence() {
        assert_eq!(
            fix_encoding_issues("See the ・F・A・Q・ page"),
            "See the FAQ page"
        );
    }

    #[test]
    fn replaces_cid_placeholders() {
        assert_eq!(
            fix_encoding_issues("item (cid:127) and (cid127) and (cid:149)"),
            "item ・ and ・ and ・"
        );
    }

    #[test]
    fn strips_stray_edge_interpuncts() {
        assert_eq!(fix_encoding_issues("・plain text・"), "plain text");
    }

    #[test]
    fn leaves_clean_text_alone() {
        let text = "Pump capacity: 120 L/min at 0.4 MPa.";
        assert_eq!(fix_encoding_issues(text), text);
    }

    #[test]
    fn leaves_japanese_interpunct_words_alone() {
        // Multi-char runs between interpuncts are legitimate katakana separators.
        assert_eq!(
            fix_encoding_issues("バルブ・ポンプ構成"),
            "バルブ・ポンプ構成"
        );
    }
}
