//! Go version extraction from loosely structured text
//!
//! Recognizes the version in:
//! - Dockerfiles (`FROM golang:1.22`, `ARG GO_VERSION=1.22.0`)
//! - go.mod (`go 1.21`)
//! - JSON / YAML / key-value configs (`"goVersion": "1.22.0"`, `go_version = 1.21`)
//! - plain version files (`1.22.1`)
//!
//! Extraction is content-driven: the file name or extension is never consulted.

mod rules;

pub use rules::{ExtractionRule, RULES};

/// Extract a Go version from `text`, trying each rule in priority order.
///
/// Returns `None` when no rule matches; callers decide whether that is an error.
pub fn extract_version(text: &str) -> Option<String> {
    RULES.iter().find_map(|rule| {
        let version = rule.apply(text)?;
        tracing::debug!(rule = rule.name, %version, "extracted version");
        Some(version)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_dockerfile() {
        assert_eq!(
            extract_version("FROM golang:1.17.5"),
            Some("1.17.5".to_string())
        );
    }

    #[test]
    fn test_extract_go_mod() {
        assert_eq!(extract_version("go 1.17"), Some("1.17".to_string()));
        assert_eq!(extract_version("go 1.18"), Some("1.18".to_string()));
    }

    #[test]
    fn test_extract_json() {
        assert_eq!(
            extract_version(r#"{"go_version": "1.18.0"}"#),
            Some("1.18.0".to_string())
        );
        assert_eq!(
            extract_version(r#"{"goVersion": "1.22.0"}"#),
            Some("1.22.0".to_string())
        );
        assert_eq!(
            extract_version(r#"{"golangVersion": "1.23.0"}"#),
            Some("1.23.0".to_string())
        );
        assert_eq!(
            extract_version(r#"{"GO_VERSION": "1.24.0"}"#),
            Some("1.24.0".to_string())
        );
    }

    #[test]
    fn test_extract_key_value() {
        assert_eq!(
            extract_version("go_version = 1.17.1"),
            Some("1.17.1".to_string())
        );
        assert_eq!(
            extract_version("golang_version: 1.18.0"),
            Some("1.18.0".to_string())
        );
    }

    #[test]
    fn test_extract_arg_env() {
        assert_eq!(
            extract_version("ARG GO_VERSION=1.20.0"),
            Some("1.20.0".to_string())
        );
        assert_eq!(
            extract_version("ENV GO_VERSION=1.21.0"),
            Some("1.21.0".to_string())
        );
    }

    #[test]
    fn test_extract_bare() {
        assert_eq!(extract_version("1.19.0"), Some("1.19.0".to_string()));
    }

    #[test]
    fn test_extract_none() {
        assert_eq!(extract_version("Some random content"), None);
        assert_eq!(extract_version(""), None);
    }

    #[test]
    fn test_from_wins_over_go_directive() {
        let text = "go 1.20\nFROM golang:1.22.3\n";
        assert_eq!(extract_version(text), Some("1.22.3".to_string()));
    }

    #[test]
    fn test_go_directive_wins_over_key() {
        let text = "go_version = 1.19\ngo 1.21\n";
        assert_eq!(extract_version(text), Some("1.21".to_string()));
    }

    #[test]
    fn test_key_wins_over_bare_token() {
        let text = "app_version = 2.4.1\ngolang_version = 1.21.0\n";
        assert_eq!(extract_version(text), Some("1.21.0".to_string()));
    }

    #[test]
    fn test_full_go_mod() {
        let content = r#"module example.com/test

go 1.21

require github.com/gin-gonic/gin v1.9.0
"#;
        assert_eq!(extract_version(content), Some("1.21".to_string()));
    }

    #[test]
    fn test_full_dockerfile() {
        let content = r#"ARG GO_VERSION=1.20.0
FROM golang:1.22.1-alpine AS build
WORKDIR /src
"#;
        assert_eq!(extract_version(content), Some("1.22.1".to_string()));
    }
}
