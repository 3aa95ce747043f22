//! Extraction rules for locating a Go version token
//!
//! Each rule is a named regex whose first capture group is the version token
//! (two or three dot-separated digit groups). Rules are listed in priority
//! order in [`RULES`].

use regex::Regex;
use std::sync::LazyLock;

// Dockerfile base image: FROM golang:1.22.1, FROM --platform=$P docker.io/library/golang:1.21-alpine
static DOCKERFILE_FROM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bFROM\s+(?:--\S+\s+)*(?:\S*/)?[\w.\-]+:(\d+\.\d+(?:\.\d+)?)").unwrap()
});

// go.mod directive: go 1.21, go 1.21.5
static GO_DIRECTIVE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bgo\s+(\d+\.\d+(?:\.\d+)?)").unwrap());

// go_version = 1.17.1, golangVersion: 1.18, {"goVersion": "1.22.0"}
static VERSION_KEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)["']?\b(?:go_?version|golang_?version)["']?\s*[:=]\s*["']?(\d+\.\d+(?:\.\d+)?)"#,
    )
    .unwrap()
});

// ARG GO_VERSION=1.20.0, ENV GO_VERSION=1.21.0, ENV GO_VERSION 1.21.0
static ARG_ENV_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:ARG|ENV)\s+GO_VERSION(?:=|\s+)(\d+\.\d+(?:\.\d+)?)").unwrap()
});

// Any dotted numeric token
static BARE_VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+\.\d+(?:\.\d+)?)").unwrap());

/// A single pattern that maps raw text to a candidate version
pub struct ExtractionRule {
    /// Short identifier used in logs and tests
    pub name: &'static str,
    pattern: &'static LazyLock<Regex>,
}

impl ExtractionRule {
    /// Apply this rule to `text`, returning the first captured version token
    pub fn apply(&self, text: &str) -> Option<String> {
        self.pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }
}

/// All extraction rules, highest priority first
pub static RULES: [ExtractionRule; 5] = [
    ExtractionRule {
        name: "dockerfile-from",
        pattern: &DOCKERFILE_FROM_RE,
    },
    ExtractionRule {
        name: "go-directive",
        pattern: &GO_DIRECTIVE_RE,
    },
    ExtractionRule {
        name: "version-key",
        pattern: &VERSION_KEY_RE,
    },
    ExtractionRule {
        name: "dockerfile-arg-env",
        pattern: &ARG_ENV_RE,
    },
    ExtractionRule {
        name: "bare-version",
        pattern: &BARE_VERSION_RE,
    },
];
