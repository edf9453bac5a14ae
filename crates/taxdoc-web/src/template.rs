use axum::response::Html;

const HOME_HTML: &str = include_str!("../templates/home.html");
const DOCUMENT_HTML: &str = include_str!("../templates/document.html");

pub const INVALID_PDF_FRAGMENT: &str = "<p>Please upload a valid PDF file.</p>";
pub const MISSING_KEY_FRAGMENT: &str = "<p>API key is required.</p>";

/// Render the static landing page.
pub fn render_home() -> Html<&'static str> {
    Html(HOME_HTML)
}

/// Render the upload page. `None` leaves a slot empty.
pub fn render_document(llm_response: Option<&str>, document_contents: Option<&str>) -> Html<String> {
    Html(substitute(
        DOCUMENT_HTML,
        &[
            ("llm_response", llm_response.unwrap_or("")),
            ("document_contents", document_contents.unwrap_or("")),
        ],
    ))
}

/// `<h2>Analysis:</h2>` block holding the escaped model output.
pub fn analysis_fragment(result: &str) -> String {
    format!(
        "<h2>Analysis:</h2><pre>{}</pre>",
        html_escape::encode_text(result)
    )
}

/// `<h2>File Contents:</h2>` block holding the escaped document text.
pub fn contents_fragment(content: &str) -> String {
    format!(
        "<h2>File Contents:</h2><pre>{}</pre>",
        html_escape::encode_text(content)
    )
}

/// Shown when the completion service call fails.
pub fn completion_failed_fragment(error: &str) -> String {
    format!(
        "<p>Analysis failed: {}</p>",
        html_escape::encode_text(error)
    )
}

/// Shown when the upload body goes over the configured limit.
pub fn too_large_fragment(limit_bytes: usize) -> String {
    format!(
        "<p>The uploaded file is too large. The limit is {}.</p>",
        format_limit(limit_bytes)
    )
}

/// Whole MiB when the limit is a multiple of one, bytes otherwise.
fn format_limit(limit_bytes: usize) -> String {
    const MIB: usize = 1024 * 1024;
    if limit_bytes >= MIB && limit_bytes % MIB == 0 {
        format!("{} MB", limit_bytes / MIB)
    } else {
        format!("{} bytes", limit_bytes)
    }
}

/// Replace `{{ name }}` slots in a single pass, so substituted values are
/// never scanned for further slots. Unknown slots are left as they are.
fn substitute(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{ ") {
        let Some(len) = rest[start..].find(" }}") else {
            break;
        };
        let name = &rest[start + 3..start + len];
        out.push_str(&rest[..start]);
        match values.iter().find(|(key, _)| *key == name) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[start..start + len + 3]),
        }
        rest = &rest[start + len + 3..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_page_has_no_slots_left() {
        let Html(html) = render_document(None, None);
        assert!(html.contains("name=\"pdfFile\""));
        assert!(html.contains("name=\"apiKey\""));
        assert!(!html.contains("{{"));
        assert!(!html.contains("Analysis:"));
    }

    #[test]
    fn fragments_escape_markup() {
        assert_eq!(
            contents_fragment("<Unreadable PDF content>"),
            "<h2>File Contents:</h2><pre>&lt;Unreadable PDF content&gt;</pre>"
        );
        assert_eq!(
            analysis_fragment("<script>alert(1)</script> & more"),
            "<h2>Analysis:</h2><pre>&lt;script&gt;alert(1)&lt;/script&gt; &amp; more</pre>"
        );
    }

    #[test]
    fn substituted_values_are_not_rescanned() {
        let out = substitute(
            "[{{ a }}][{{ b }}]",
            &[("a", "{{ b }}"), ("b", "second")],
        );
        assert_eq!(out, "[{{ b }}][second]");
    }

    #[test]
    fn size_limit_is_stated_in_megabytes() {
        assert_eq!(
            too_large_fragment(25 * 1024 * 1024),
            "<p>The uploaded file is too large. The limit is 25 MB.</p>"
        );
        assert_eq!(
            too_large_fragment(1024),
            "<p>The uploaded file is too large. The limit is 1024 bytes.</p>"
        );
    }

    #[test]
    fn unknown_slots_are_kept() {
        assert_eq!(substitute("x {{ other }} y", &[]), "x {{ other }} y");
    }
}
