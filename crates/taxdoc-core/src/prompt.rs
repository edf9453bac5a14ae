/// Prompt sent to the completion service. `{input_text}` is replaced with
/// the extracted document text, verbatim.
pub const TAX_REVIEW_TEMPLATE: &str = r#"You are a tax assistant. The following is a tax form. Your goal is to point out any issues.

Tax Document:
"{input_text}"

Your response:
"#;

/// Render the tax review prompt for `document_text`.
pub fn build_prompt(document_text: &str) -> String {
    TAX_REVIEW_TEMPLATE.replacen("{input_text}", document_text, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embeds_document_text_verbatim() {
        let prompt = build_prompt("Total income: $50,000");
        assert!(prompt.starts_with("You are a tax assistant."));
        assert!(prompt.contains("Tax Document:\n\"Total income: $50,000\"\n"));
        assert!(prompt.ends_with("Your response:\n"));
    }

    #[test]
    fn placeholders_inside_document_are_not_expanded() {
        let prompt = build_prompt("literal {input_text} in a form field");
        assert_eq!(prompt.matches("{input_text}").count(), 1);
    }
}
