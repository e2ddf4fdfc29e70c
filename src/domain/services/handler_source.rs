//! Handler Source Renderer
//!
//! Many edge platforms only accept handler code as literal source text,
//! so the apex domain has to be embedded into a function body. This
//! module isolates that substitution step: the apex value is validated
//! and escaped so a malformed domain can never alter the handler logic.

/// Error raised when an apex value cannot be embedded safely.
#[derive(Debug, Clone, thiserror::Error)]
pub enum HandlerSourceError {
    #[error("apex domain '{0}' contains characters outside [A-Za-z0-9.-]")]
    InjectionRisk(String),
}

/// Template for the viewer-request handler.
///
/// `__APEX__` is replaced with the escaped apex hostname; an empty string
/// disables redirection so the same template serves both topologies.
const HANDLER_TEMPLATE: &str = r#"function handler(event) {
    var request = event.request;
    var host = request.headers.host.value;
    var apex = '__APEX__';
    if (apex !== '' && host !== apex) {
        return {
            statusCode: 301,
            statusDescription: 'Moved Permanently',
            headers: { location: { value: 'https://' + apex + request.uri } },
        };
    }
    if (request.uri.endsWith('/')) {
        request.uri = request.uri + 'index.html';
    }
    return request;
}
"#;

/// Render the handler source with the apex embedded.
///
/// The embedded value must equal the live apex byte-for-byte, so the
/// charset gate rejects rather than mutates: any character outside
/// `[A-Za-z0-9.-]` fails with `InjectionRisk`.
pub fn render(apex: Option<&str>) -> Result<String, HandlerSourceError> {
    let apex = apex.unwrap_or("");
    if !apex
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    {
        return Err(HandlerSourceError::InjectionRisk(apex.to_string()));
    }

    Ok(HANDLER_TEMPLATE.replace("__APEX__", &escape_js(apex)))
}

/// Escape a value for inclusion inside a single-quoted JS string literal.
fn escape_js(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("\\'"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            _ => escaped.push(c),
        }
    }
    escaped
}
