//! Source code generation from the request IR
//!
//! Each target style has one [`Renderer`]. Renderers only read the
//! [`Request`]; they never touch the files or variables it names, and every
//! variable reference becomes a lookup in the generated program.

pub mod go;
pub mod http;
pub mod python;
pub mod rust;

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::Deserialize;

use crate::errors::Result;
use crate::request::Request;
use crate::shell::{EnvRef, Word, WordPart};

/// Supported output styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Deserialize)]
#[serde(try_from = "String")]
pub enum TargetStyle {
    /// Go with net/http
    #[value(alias = "golang")]
    Go,
    /// Python with requests
    #[value(alias = "py")]
    Python,
    /// Rust with reqwest's blocking client
    #[value(alias = "rs")]
    Rust,
    /// Raw HTTP/1.1 request message
    #[value(alias = "raw")]
    Http,
}

impl TargetStyle {
    pub const ALL: [TargetStyle; 4] = [
        TargetStyle::Go,
        TargetStyle::Python,
        TargetStyle::Rust,
        TargetStyle::Http,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TargetStyle::Go => "go",
            TargetStyle::Python => "python",
            TargetStyle::Rust => "rust",
            TargetStyle::Http => "http",
        }
    }

    /// File extension for generated sources
    pub fn extension(self) -> &'static str {
        match self {
            TargetStyle::Go => "go",
            TargetStyle::Python => "py",
            TargetStyle::Rust => "rs",
            TargetStyle::Http => "http",
        }
    }

    pub fn renderer(self) -> &'static dyn Renderer {
        match self {
            TargetStyle::Go => &go::GoRenderer,
            TargetStyle::Python => &python::PythonRenderer,
            TargetStyle::Rust => &rust::RustRenderer,
            TargetStyle::Http => &http::HttpRenderer,
        }
    }
}

impl fmt::Display for TargetStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TargetStyle {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "go" | "golang" => Ok(TargetStyle::Go),
            "python" | "py" => Ok(TargetStyle::Python),
            "rust" | "rs" => Ok(TargetStyle::Rust),
            "http" | "raw" => Ok(TargetStyle::Http),
            _ => Err(format!(
                "Unknown style '{}'. Supported: go, python, rust, http",
                s
            )),
        }
    }
}

impl TryFrom<String> for TargetStyle {
    type Error = String;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        s.parse()
    }
}

/// Generated program text plus what it needs to build
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedSource {
    pub source: String,
    /// Modules the source imports, sorted
    pub imports: Vec<String>,
    /// Third-party packages to install; empty for standard-library-only output
    pub dependencies: Vec<String>,
}

/// Turns a request into source code in one target style
pub trait Renderer: Sync {
    fn style(&self) -> TargetStyle;

    fn render(&self, request: &Request) -> Result<RenderedSource>;
}

/// Render `request` in `style`
pub fn render(request: &Request, style: TargetStyle) -> Result<RenderedSource> {
    style.renderer().render(request)
}

/// Expression for a word: quoted literals and variable lookups joined by `join`.
///
/// An empty word is the empty literal.
pub(crate) fn concat(
    word: &Word,
    literal: impl Fn(&str) -> String,
    lookup: impl Fn(&EnvRef) -> String,
    join: &str,
) -> String {
    if word.is_empty() {
        return literal("");
    }
    word.parts()
        .iter()
        .map(|part| match part {
            WordPart::Text(text) => literal(text),
            WordPart::Env(env) => lookup(env),
        })
        .collect::<Vec<_>>()
        .join(join)
}

/// Sorted, de-duplicated import list
pub(crate) fn sorted(imports: impl IntoIterator<Item = &'static str>) -> Vec<String> {
    let mut imports: Vec<String> = imports.into_iter().map(String::from).collect();
    imports.sort();
    imports.dedup();
    imports
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_from_str() {
        assert_eq!("go".parse::<TargetStyle>(), Ok(TargetStyle::Go));
        assert_eq!("golang".parse::<TargetStyle>(), Ok(TargetStyle::Go));
        assert_eq!("PY".parse::<TargetStyle>(), Ok(TargetStyle::Python));
        assert_eq!("rs".parse::<TargetStyle>(), Ok(TargetStyle::Rust));
        assert_eq!("raw".parse::<TargetStyle>(), Ok(TargetStyle::Http));
        assert!("cobol".parse::<TargetStyle>().is_err());
    }

    #[test]
    fn test_every_style_has_its_renderer() {
        for style in TargetStyle::ALL {
            assert_eq!(style.renderer().style(), style);
            assert_eq!(style.name().parse::<TargetStyle>(), Ok(style));
        }
    }

    #[test]
    fn test_concat() {
        let mut word = Word::literal("Bearer ");
        word.push_env(EnvRef::new("TOKEN"));
        let expr = concat(&word, |s| format!("'{}'", s), |e| format!("env({})", e.name), " + ");
        assert_eq!(expr, "'Bearer ' + env(TOKEN)");
        assert_eq!(concat(&Word::new(), |s| format!("'{}'", s), |_| String::new(), " + "), "''");
    }

    #[test]
    fn test_sorted_imports() {
        assert_eq!(sorted(["os", "fmt", "os"]), vec!["fmt", "os"]);
    }
}
