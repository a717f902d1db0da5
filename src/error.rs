use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to read config file at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Error creating request: {0}")]
    RequestBuild(String),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Request failed: no scheme in URL {0:?}")]
    MissingScheme(String),

    #[error("Failed to decode teams: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Error writing report file {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Logger error: {0}")]
    Logger(String),
}

pub type Result<T> = std::result::Result<T, ReportError>;

/// printf-style verb such as `%v`, `%s`, `%+v` or `%-10s`.
static FORMAT_VERB: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"%[-+# 0]*\d*(?:\.\d+)?[vsdqxXT]").expect("format verb pattern is valid")
});

/// Render a configured error template with the underlying cause.
///
/// The first format verb in `template` is replaced by `cause`; a template
/// without a verb gets `": <cause>"` appended. An empty template falls back
/// to `fallback`.
pub fn render_message(template: &str, fallback: &str, cause: &str) -> String {
    let template = if template.is_empty() { fallback } else { template };

    match FORMAT_VERB.find(template) {
        Some(verb) => {
            let head = template[..verb.start()].replace("%%", "%");
            let tail = template[verb.end()..].replace("%%", "%");
            format!("{head}{cause}{tail}")
        }
        None => format!("{}: {cause}", template.replace("%%", "%")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_message_replaces_verb() {
        let msg = render_message("Cannot create request: %v", "unused", "bad url");
        assert_eq!(msg, "Cannot create request: bad url");
    }

    #[test]
    fn test_render_message_only_first_verb() {
        let msg = render_message("%s then %s", "unused", "boom");
        assert_eq!(msg, "boom then %s");
    }

    #[test]
    fn test_render_message_flagged_verb() {
        let msg = render_message("[%+v] failed", "unused", "timeout");
        assert_eq!(msg, "[timeout] failed");
    }

    #[test]
    fn test_render_message_without_verb_appends_cause() {
        let msg = render_message("Request failed", "unused", "connection refused");
        assert_eq!(msg, "Request failed: connection refused");
    }

    #[test]
    fn test_render_message_empty_template_uses_fallback() {
        let msg = render_message("", "Error writing file: %v", "disk full");
        assert_eq!(msg, "Error writing file: disk full");
    }

    #[test]
    fn test_render_message_literal_percent() {
        let msg = render_message("100%% broken: %v", "unused", "x");
        assert_eq!(msg, "100% broken: x");
    }
}
