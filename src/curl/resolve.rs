//! Token stream to canonical options

use super::opts::{lookup_long, lookup_short, Flag, FlagSpec};
use crate::errors::{CurlgenError, Result};
use crate::shell::{Token, Word, WordPart};

/// One resolved command-line option
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurlOpt {
    pub flag: Flag,
    /// The flag as written (`-H`, `--header`); empty for positional URLs
    pub name: String,
    pub value: Option<Word>,
    /// Written with a `--no-` prefix
    pub negated: bool,
}

impl CurlOpt {
    fn new(flag: Flag, name: impl Into<String>, value: Option<Word>) -> Self {
        Self {
            flag,
            name: name.into(),
            value,
            negated: false,
        }
    }

    /// The option's argument; empty for switches
    pub fn word(&self) -> Word {
        self.value.clone().unwrap_or_default()
    }
}

/// Map tokens to options in command-line order.
///
/// Exactly one URL must be present, either positional or via `--url`.
pub fn resolve(tokens: &[Token]) -> Result<Vec<CurlOpt>> {
    let mut options = Vec::new();
    let mut rest = tokens.iter();
    let mut only_urls = false;

    while let Some(token) = rest.next() {
        let word = &token.word;

        let text = match flag_text(word) {
            Some(text) if !only_urls => text,
            _ => {
                options.push(CurlOpt::new(Flag::Url, "", Some(word.clone())));
                continue;
            }
        };

        if text == "--" && word.as_literal().is_some() {
            only_urls = true;
            continue;
        }

        if let Some(long) = text.strip_prefix("--") {
            if word.as_literal().is_none() {
                return Err(CurlgenError::UnknownFlag {
                    flag: word.to_string(),
                });
            }
            let (spec, negated) = lookup_long_or_negated(long).ok_or_else(|| {
                CurlgenError::UnknownFlag {
                    flag: text.to_string(),
                }
            })?;
            let value = if spec.takes_value {
                Some(next_value(&mut rest, text)?)
            } else {
                None
            };
            options.push(CurlOpt {
                negated,
                ..CurlOpt::new(spec.flag, text, value)
            });
            continue;
        }

        resolve_cluster(word, text, &mut rest, &mut options)?;
    }

    check_urls(&options)?;
    Ok(options)
}

/// Leading text of a flag token: literal text starting with `-` and more after it
fn flag_text(word: &Word) -> Option<&str> {
    match word.parts().first() {
        Some(WordPart::Text(text)) if text.starts_with('-') && word.as_literal() != Some("-") => {
            Some(text)
        }
        _ => None,
    }
}

fn lookup_long_or_negated(long: &str) -> Option<(&'static FlagSpec, bool)> {
    if let Some(spec) = lookup_long(long) {
        return Some((spec, false));
    }
    let spec = lookup_long(long.strip_prefix("no-")?)?;
    if spec.takes_value {
        return None;
    }
    Some((spec, true))
}

/// Resolve a short cluster such as `-sSL` or `-XPOST`
fn resolve_cluster<'a>(
    word: &Word,
    text: &str,
    rest: &mut impl Iterator<Item = &'a Token>,
    options: &mut Vec<CurlOpt>,
) -> Result<()> {
    for (offset, c) in text.char_indices().skip(1) {
        let name = format!("-{}", c);
        let spec = lookup_short(c).ok_or_else(|| CurlgenError::UnknownFlag {
            flag: name.clone(),
        })?;

        if !spec.takes_value {
            options.push(CurlOpt::new(spec.flag, name, None));
            continue;
        }

        let attached = word.tail(offset + c.len_utf8());
        let value = if attached.is_empty() {
            next_value(rest, &name)?
        } else {
            attached
        };
        options.push(CurlOpt::new(spec.flag, name, Some(value)));
        return Ok(());
    }

    // Switches only, but the word continues past its leading text
    if word.as_literal().is_none() {
        return Err(CurlgenError::UnknownFlag {
            flag: word.to_string(),
        });
    }
    Ok(())
}

fn next_value<'a>(rest: &mut impl Iterator<Item = &'a Token>, flag: &str) -> Result<Word> {
    rest.next()
        .map(|token| token.word.clone())
        .ok_or_else(|| CurlgenError::MissingArgument {
            flag: flag.to_string(),
        })
}

fn check_urls(options: &[CurlOpt]) -> Result<()> {
    let mut urls = options
        .iter()
        .filter(|opt| opt.flag == Flag::Url)
        .map(CurlOpt::word);
    let first = urls.next().ok_or(CurlgenError::MissingUrl)?;
    if let Some(second) = urls.next() {
        return Err(CurlgenError::MultipleUrls {
            first: first.to_string(),
            second: second.to_string(),
        });
    }
    Ok(())
}
