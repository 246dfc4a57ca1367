//! Prompt assembly for the English→Japanese translation request.

use crate::glossary::Glossary;

/// System instruction sent with every request. Qwen3 models emit `<think>`
/// reasoning blocks unless told not to; the instruction suppresses them and
/// [`crate::postprocess::strip_think_tags`] removes any that slip through.
pub const SYSTEM_PROMPT: &str = "You are a technical translator. Translate directly without \
explanation. Do NOT use <think> tags or any thinking process. Output only the final Japanese \
translation.";

/// Build the user prompt for a single text, embedding glossary overrides.
pub fn build_prompt(text: &str, context: &str, glossary: &Glossary) -> String {
    let mut prompt = String::from(
        "Translate the following English text to Japanese. Output ONLY the Japanese \
         translation, nothing else.",
    );
    prompt.push_str(&format_glossary(glossary));
    if !context.is_empty() {
        prompt.push_str("\n\nContext: ");
        prompt.push_str(context);
    }
    prompt.push_str("\n\nEnglish:\n");
    prompt.push_str(text);
    prompt.push_str("\n\nJapanese:");
    prompt
}

/// Render the glossary as `term → 訳語` lines, one per entry.
/// Empty glossaries contribute nothing to the prompt.
pub fn format_glossary(glossary: &Glossary) -> String {
    if glossary.is_empty() {
        return String::new();
    }
    let lines: Vec<String> = glossary
        .iter()
        .map(|(en, ja)| format!("{en} → {ja}"))
        .collect();
    format!("\n\nUse these terminology translations:\n{}", lines.join("\n"))
}
