//! Paragraph-based sectioning of page text.

use honyaku_core::{Section, SectionMeta};

const LIST_MARKERS: [char; 4] = ['-', '•', '○', '●'];
const MAX_HEADING_LEN: usize = 80;

/// Split page text into sections on blank lines, tagging each with
/// heading/list heuristics.
pub fn split_into_sections(text: &str) -> Vec<Section> {
    text.split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .enumerate()
        .map(|(index, paragraph)| Section {
            text: paragraph.to_string(),
            metadata: SectionMeta {
                index,
                is_heading: is_heading(paragraph),
                is_list: is_list_item(paragraph),
                length: paragraph.chars().count(),
            },
        })
        .collect()
}

/// Heading heuristic: short text that is all-caps, digit-leading, or lacks a
/// closing period. Long paragraphs are never headings.
pub fn is_heading(text: &str) -> bool {
    let text = text.trim();
    if text.is_empty() || text.chars().count() > MAX_HEADING_LEN {
        return false;
    }

    let has_letters = text.chars().any(|c| c.is_alphabetic());
    if has_letters && text.chars().filter(|c| c.is_alphabetic()).all(|c| c.is_uppercase()) {
        return true;
    }
    if text.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        return true;
    }
    !text.ends_with('.')
}

fn is_list_item(text: &str) -> bool {
    text.trim_start()
        .chars()
        .next()
        .is_some_and(|c| LIST_MARKERS.contains(&c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_blank_lines() {
        let sections = split_into_sections("First paragraph.\n\nSecond paragraph.\n\n\n");
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].text, "First paragraph.");
        assert_eq!(sections[1].metadata.index, 1);
    }

    #[test]
    fn all_caps_is_heading() {
        assert!(is_heading("SAFETY PRECAUTIONS"));
    }

    #[test]
    fn numbered_line_is_heading() {
        assert!(is_heading("3.2 Installation procedure"));
    }

    #[test]
    fn sentence_with_period_is_not_heading() {
        assert!(!is_heading("The pump must be primed before operation."));
    }

    #[test]
    fn long_text_is_not_heading() {
        let long = "a".repeat(81);
        assert!(!is_heading(&long));
    }

    #[test]
    fn detects_list_markers() {
        let sections = split_into_sections("- first item\n\n• second item\n\nplain text.");
        assert!(sections[0].metadata.is_list);
        assert!(sections[1].metadata.is_list);
        assert!(!sections[2].metadata.is_list);
    }

    #[test]
    fn length_counts_chars_not_bytes() {
        let sections = split_into_sections("ポンプ仕様");
        assert_eq!(sections[0].metadata.length, 5);
    }
}
