//! Static HTML templates with literal placeholder substitution.
//!
//! The demo pages are plain files carrying a single textual placeholder that
//! is replaced at response time. There is no template language beyond
//! find-and-replace.
use std::{fs, path::Path};

use tracing::error;

use crate::error::Error;

/// Placeholder in the index page, replaced with the welcome line.
pub static WELCOME_MESSAGE: &str = "WELCOME_MESSAGE";

/// Placeholder in the widget page, replaced with the URL-encoded request body.
pub static JAVASCRIPT_ESCAPED_POST_BODY: &str = "JAVASCRIPT_ESCAPED_POST_BODY";

/// Reads the template at `path` and replaces every occurrence of
/// `placeholder` with `value`. A missing or unreadable file is reported as
/// `Error::Template` carrying the I/O error text.
pub fn render_file(path: &Path, placeholder: &str, value: &str) -> Result<String, Error> {
    let raw = fs::read_to_string(path).map_err(|e| {
        error!("Failed to read template {}: {}", path.display(), e);
        Error::Template(e.to_string())
    })?;
    Ok(raw.replace(placeholder, value))
}

// ==========Tests==========
#[cfg(test)]
mod tests {
    use std::path::Path;

    use crate::error::Error;

    use super::{JAVASCRIPT_ESCAPED_POST_BODY, WELCOME_MESSAGE, render_file};

    #[test]
    fn test_render_index_template() {
        let body = render_file(
            Path::new("templates/index.html"),
            WELCOME_MESSAGE,
            "Welcome back!",
        )
        .unwrap();

        assert!(body.contains("Welcome back!"));
        assert!(!body.contains(WELCOME_MESSAGE));
    }

    #[test]
    fn test_render_widget_template() {
        let body = render_file(
            Path::new("templates/gitkit-widget.html"),
            JAVASCRIPT_ESCAPED_POST_BODY,
            "mode%3Dselect",
        )
        .unwrap();

        assert!(body.contains("mode%3Dselect"));
        assert!(!body.contains(JAVASCRIPT_ESCAPED_POST_BODY));
    }

    #[test]
    fn test_render_missing_file() {
        let rendered = render_file(
            Path::new("templates/no-such-template.html"),
            WELCOME_MESSAGE,
            "",
        );

        match rendered {
            Err(Error::Template(text)) => assert!(!text.is_empty()),
            other => panic!("expected template error, got {:?}", other),
        }
    }
}
