//! Cleanup of raw model output before it is returned to clients.

use once_cell::sync::Lazy;
use regex::Regex;

static THINK_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<think>.*?</think>").expect("valid regex"));

/// Remove `<think>…</think>` reasoning blocks and any orphan tags the model
/// left behind when it ignored the system instruction.
pub fn strip_think_tags(text: &str) -> String {
    let without_blocks = THINK_BLOCK.replace_all(text, "");
    without_blocks.replace("<think>", "").replace("</think>", "")
}

/// Normalise CID leftovers and bullet glyphs in model output.
/// Mirrors the extraction-side cleanup so glossary bullets round-trip.
pub fn fix_output_encoding(text: &str) -> String {
    text.replace("(cid127)", "・")
        .replace("(cid:127)", "・")
        .replace('•', "・")
}

/// Full post-processing chain applied to every backend response.
pub fn clean_response(text: &str) -> String {
    fix_output_encoding(&strip_think_tags(text)).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_think_block_and_content() {
        let raw = "<think>considering the phrasing...\nmore thoughts</think>バルブを閉じる";
        assert_eq!(strip_think_tags(raw), "バルブを閉じる");
    }

    #[test]
    fn strips_orphan_tags() {
        assert_eq!(strip_think_tags("<think>訳文"), "訳文");
        assert_eq!(strip_think_tags("訳文</think>"), "訳文");
    }

    #[test]
    fn normalises_bullets_and_cid() {
        assert_eq!(fix_output_encoding("• item (cid:127)"), "・ item ・");
    }

    #[test]
    fn clean_response_trims() {
        let raw = "  <think>x</think>\n  翻訳結果  \n";
        assert_eq!(clean_response(raw), "翻訳結果");
    }
}
