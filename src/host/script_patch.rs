//! host::script_patch
//!
//! Decide whether a URL really serves a script before it is installed as a
//! patch.
//!
//! # Rule
//!
//! The strict host check demanded a JavaScript `Content-Type`. Many static
//! hosts serve scripts as `text/plain` or `application/octet-stream`, so the
//! relaxed rule also accepts those (or a missing header) when the URL path
//! ends in `.js` or the body opens with a userscript header. HTML is always
//! rejected; it usually means a login wall or an error page.

use super::traits::{FetchedResource, HostError, HttpFetch};

/// MIME types that are JavaScript.
const SCRIPT_MIME_TYPES: &[&str] = &[
    "application/javascript",
    "text/javascript",
    "application/x-javascript",
    "application/ecmascript",
    "text/ecmascript",
];

/// MIME types that are ambiguous enough to fall back to URL/body sniffing.
const GENERIC_MIME_TYPES: &[&str] = &["text/plain", "application/octet-stream"];

/// Start of a userscript metadata block.
const USERSCRIPT_MARKER: &str = "// ==UserScript==";

/// Outcome of validating a script URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptVerdict {
    pub accepted: bool,
    pub reason: String,
}

impl ScriptVerdict {
    fn accept(reason: impl Into<String>) -> Self {
        Self {
            accepted: true,
            reason: reason.into(),
        }
    }

    fn reject(reason: impl Into<String>) -> Self {
        Self {
            accepted: false,
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for ScriptVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let verdict = if self.accepted { "accepted" } else { "rejected" };
        write!(f, "{}: {}", verdict, self.reason)
    }
}

/// Validates script patch URLs against the relaxed rule.
pub struct ScriptPatchValidator<'a> {
    fetcher: &'a dyn HttpFetch,
}

impl<'a> ScriptPatchValidator<'a> {
    /// Create a validator that fetches through `fetcher`.
    pub fn new(fetcher: &'a dyn HttpFetch) -> Self {
        Self { fetcher }
    }

    /// Fetch `url` and judge whether it serves a script.
    ///
    /// # Errors
    ///
    /// Fetch failures are returned as errors, not as rejections.
    pub async fn validate(&self, url: &str) -> Result<ScriptVerdict, HostError> {
        let resource = self.fetcher.fetch_head(url).await?;
        Ok(judge(&resource))
    }
}

/// Apply the relaxed rule to an already fetched resource.
pub fn judge(resource: &FetchedResource) -> ScriptVerdict {
    if !(200..300).contains(&resource.status) {
        return ScriptVerdict::reject(format!("HTTP status {}", resource.status));
    }

    let mime = resource.content_type.as_deref().map(essence);

    match mime.as_deref() {
        Some(m) if SCRIPT_MIME_TYPES.contains(&m) => {
            ScriptVerdict::accept(format!("content type {}", m))
        }
        Some("text/html") => ScriptVerdict::reject("content type text/html"),
        Some(m) if !GENERIC_MIME_TYPES.contains(&m) => {
            ScriptVerdict::reject(format!("content type {}", m))
        }
        generic => {
            let described = generic.unwrap_or("missing");
            if path_is_script(&resource.url) {
                ScriptVerdict::accept(format!("content type {} with .js path", described))
            } else if body_is_userscript(&resource.body_prefix) {
                ScriptVerdict::accept(format!("content type {} with userscript header", described))
            } else {
                ScriptVerdict::reject(format!(
                    "content type {} and no script path or header",
                    described
                ))
            }
        }
    }
}

/// The MIME essence: type/subtype, lower-cased, without parameters.
fn essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase()
}

fn path_is_script(url: &str) -> bool {
    let without_fragment = url.split('#').next().unwrap_or("");
    let path = without_fragment.split('?').next().unwrap_or("");
    path.to_ascii_lowercase().ends_with(".js")
}

fn body_is_userscript(prefix: &[u8]) -> bool {
    let text = String::from_utf8_lossy(prefix);
    text.trim_start_matches('\u{feff}')
        .trim_start()
        .starts_with(USERSCRIPT_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resource(url: &str, status: u16, content_type: Option<&str>, body: &str) -> FetchedResource {
        FetchedResource {
            url: url.to_string(),
            status,
            content_type: content_type.map(str::to_string),
            body_prefix: body.as_bytes().to_vec(),
        }
    }

    #[test]
    fn accepts_script_mime_with_parameters() {
        let r = resource(
            "https://cdn.example.com/x",
            200,
            Some("Text/JavaScript; charset=utf-8"),
            "",
        );
        assert!(judge(&r).accepted);
    }

    #[test]
    fn rejects_error_status() {
        let r = resource("https://e.com/a.js", 404, Some("application/javascript"), "");
        let verdict = judge(&r);
        assert!(!verdict.accepted);
        assert_eq!(verdict.reason, "HTTP status 404");
    }

    #[test]
    fn rejects_html_even_with_js_path() {
        let r = resource("https://e.com/a.js", 200, Some("text/html"), "<html>");
        assert!(!judge(&r).accepted);
    }

    #[test]
    fn plain_text_with_js_path_accepted() {
        let r = resource("https://raw.e.com/patch.user.js?raw=1#top", 200, Some("text/plain"), "");
        assert!(judge(&r).accepted);
    }

    #[test]
    fn octet_stream_with_userscript_header_accepted() {
        let body = "\u{feff}\n// ==UserScript==\n// @name demo\n";
        let r = resource("https://e.com/download", 200, Some("application/octet-stream"), body);
        let verdict = judge(&r);
        assert!(verdict.accepted);
        assert!(verdict.reason.contains("userscript"));
    }

    #[test]
    fn missing_content_type_needs_evidence() {
        let r = resource("https://e.com/file", 200, None, "hello");
        let verdict = judge(&r);
        assert!(!verdict.accepted);
        assert!(verdict.reason.contains("missing"));

        let r = resource("https://e.com/file.JS", 200, None, "");
        assert!(judge(&r).accepted);
    }

    #[test]
    fn other_types_rejected() {
        let r = resource("https://e.com/a.js", 200, Some("image/png"), "");
        assert!(!judge(&r).accepted);
    }

    #[test]
    fn verdict_display() {
        let verdict = ScriptVerdict::reject("HTTP status 500");
        assert_eq!(verdict.to_string(), "rejected: HTTP status 500");
    }
}
