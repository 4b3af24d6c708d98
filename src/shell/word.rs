//! Shell words
//!
//! A [`Word`] is what a shell word turns into after quote removal: a run of
//! literal text that may contain environment variable references. The
//! references are kept as data so that generated programs can look them up at
//! their own run time instead of the generator baking in a value.

use std::fmt;

/// Reference to an environment variable, as written in the command
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnvRef {
    pub name: String,
    /// Written as `${NAME}` rather than `$NAME`
    pub braced: bool,
}

impl EnvRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            braced: false,
        }
    }
}

impl fmt::Display for EnvRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.braced {
            write!(f, "${{{}}}", self.name)
        } else {
            write!(f, "${}", self.name)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WordPart {
    Text(String),
    Env(EnvRef),
}

/// A shell word: literal text interleaved with environment variable references.
///
/// Adjacent text is always merged and empty text parts are never stored, so two
/// words spelling the same thing compare equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Word {
    parts: Vec<WordPart>,
}

impl Word {
    pub fn new() -> Self {
        Self::default()
    }

    /// A word made only of literal text
    pub fn literal(text: impl Into<String>) -> Self {
        let mut word = Self::new();
        word.push_str(&text.into());
        word
    }

    pub fn parts(&self) -> &[WordPart] {
        &self.parts
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn push_str(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(WordPart::Text(last)) = self.parts.last_mut() {
            last.push_str(text);
        } else {
            self.parts.push(WordPart::Text(text.to_string()));
        }
    }

    pub fn push_char(&mut self, c: char) {
        let mut buf = [0u8; 4];
        self.push_str(c.encode_utf8(&mut buf));
    }

    pub fn push_env(&mut self, env: EnvRef) {
        self.parts.push(WordPart::Env(env));
    }

    pub fn push_word(&mut self, other: &Word) {
        for part in &other.parts {
            match part {
                WordPart::Text(text) => self.push_str(text),
                WordPart::Env(env) => self.push_env(env.clone()),
            }
        }
    }

    /// Does the word contain environment variable references?
    pub fn has_env(&self) -> bool {
        self.parts.iter().any(|p| matches!(p, WordPart::Env(_)))
    }

    /// The text of the word if it has no variable references
    pub fn as_literal(&self) -> Option<&str> {
        match self.parts.as_slice() {
            [] => Some(""),
            [WordPart::Text(text)] => Some(text),
            _ => None,
        }
    }

    /// Names of the referenced variables, in order of appearance
    pub fn env_names(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().filter_map(|p| match p {
            WordPart::Env(env) => Some(env.name.as_str()),
            WordPart::Text(_) => None,
        })
    }

    /// Text with every variable reference replaced by `placeholder`.
    ///
    /// Used for shape checks that only care about the literal characters.
    pub fn shape(&self, placeholder: &str) -> String {
        self.parts
            .iter()
            .map(|p| match p {
                WordPart::Text(text) => text.as_str(),
                WordPart::Env(_) => placeholder,
            })
            .collect()
    }

    pub fn starts_with(&self, c: char) -> bool {
        matches!(self.parts.first(), Some(WordPart::Text(text)) if text.starts_with(c))
    }

    /// Literal text comparison, ignoring ASCII case
    pub fn eq_ignore_ascii_case(&self, other: &str) -> bool {
        self.as_literal()
            .is_some_and(|text| text.eq_ignore_ascii_case(other))
    }

    /// Is `c` present in the literal text?
    pub fn contains(&self, c: char) -> bool {
        self.parts
            .iter()
            .any(|p| matches!(p, WordPart::Text(text) if text.contains(c)))
    }

    /// Remove a leading literal character
    pub fn strip_prefix(&self, c: char) -> Option<Word> {
        if !self.starts_with(c) {
            return None;
        }
        Some(self.tail(c.len_utf8()))
    }

    /// Remove a trailing literal character
    pub fn strip_suffix(&self, c: char) -> Option<Word> {
        let mut parts = self.parts.clone();
        match parts.last_mut() {
            Some(WordPart::Text(text)) if text.ends_with(c) => {
                text.truncate(text.len() - c.len_utf8());
                if text.is_empty() {
                    parts.pop();
                }
                Some(Word { parts })
            }
            _ => None,
        }
    }

    /// Everything after the first `byte` bytes of the leading text part.
    ///
    /// `byte` must fall on a char boundary inside the first part.
    pub fn tail(&self, byte: usize) -> Word {
        let mut rest = Word::new();
        let mut parts = self.parts.iter();
        match parts.next() {
            Some(WordPart::Text(text)) => rest.push_str(&text[byte..]),
            Some(WordPart::Env(env)) => rest.push_env(env.clone()),
            None => return rest,
        }
        for part in parts {
            rest.push_part(part);
        }
        rest
    }

    /// Split around the first literal occurrence of `sep`
    pub fn split_once(&self, sep: char) -> Option<(Word, Word)> {
        let (index, offset) = self.find(sep, false)?;
        Some(self.cut(index, offset, sep.len_utf8()))
    }

    /// Split around the last literal occurrence of `sep`
    pub fn rsplit_once(&self, sep: char) -> Option<(Word, Word)> {
        let (index, offset) = self.find(sep, true)?;
        Some(self.cut(index, offset, sep.len_utf8()))
    }

    /// Split on every literal occurrence of `sep`
    pub fn split(&self, sep: char) -> Vec<Word> {
        let mut pieces = Vec::new();
        let mut rest = self.clone();
        while let Some((head, tail)) = rest.split_once(sep) {
            pieces.push(head);
            rest = tail;
        }
        pieces.push(rest);
        pieces
    }

    /// The last path segment, splitting on both `/` and `\`
    pub fn basename(&self) -> Word {
        let last = self
            .find('/', true)
            .into_iter()
            .chain(self.find('\\', true))
            .max();
        match last {
            Some((index, offset)) => self.cut(index, offset, 1).1,
            None => self.clone(),
        }
    }

    pub fn trim_start(&self) -> Word {
        let mut parts = self.parts.clone();
        while let Some(WordPart::Text(text)) = parts.first_mut() {
            let trimmed = text.trim_start();
            if trimmed.is_empty() {
                parts.remove(0);
            } else {
                *text = trimmed.to_string();
                break;
            }
        }
        Word { parts }
    }

    pub fn trim_end(&self) -> Word {
        let mut parts = self.parts.clone();
        while let Some(WordPart::Text(text)) = parts.last_mut() {
            let trimmed = text.trim_end();
            if trimmed.is_empty() {
                parts.pop();
            } else {
                *text = trimmed.to_string();
                break;
            }
        }
        Word { parts }
    }

    pub fn trim(&self) -> Word {
        self.trim_start().trim_end()
    }

    /// Apply `f` to every literal text part, leaving references untouched
    pub fn map_text(&self, f: impl Fn(&str) -> String) -> Word {
        let mut mapped = Word::new();
        for part in &self.parts {
            match part {
                WordPart::Text(text) => mapped.push_str(&f(text)),
                WordPart::Env(env) => mapped.push_env(env.clone()),
            }
        }
        mapped
    }

    fn push_part(&mut self, part: &WordPart) {
        match part {
            WordPart::Text(text) => self.push_str(text),
            WordPart::Env(env) => self.push_env(env.clone()),
        }
    }

    /// Locate `c` in the literal text as (part index, byte offset)
    fn find(&self, c: char, last: bool) -> Option<(usize, usize)> {
        let mut found = None;
        for (index, part) in self.parts.iter().enumerate() {
            if let WordPart::Text(text) = part {
                let offset = if last { text.rfind(c) } else { text.find(c) };
                if let Some(offset) = offset {
                    found = Some((index, offset));
                    if !last {
                        break;
                    }
                }
            }
        }
        found
    }

    fn cut(&self, index: usize, offset: usize, len: usize) -> (Word, Word) {
        let mut head = Word::new();
        let mut tail = Word::new();
        for part in &self.parts[..index] {
            head.push_part(part);
        }
        if let WordPart::Text(text) = &self.parts[index] {
            head.push_str(&text[..offset]);
            tail.push_str(&text[offset + len..]);
        }
        for part in &self.parts[index + 1..] {
            tail.push_part(part);
        }
        (head, tail)
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for part in &self.parts {
            match part {
                WordPart::Text(text) => f.write_str(text)?,
                WordPart::Env(env) => write!(f, "{}", env)?,
            }
        }
        Ok(())
    }
}

/// A word equals a string only when it is that exact literal text
impl PartialEq<&str> for Word {
    fn eq(&self, other: &&str) -> bool {
        self.as_literal() == Some(*other)
    }
}

impl From<&str> for Word {
    fn from(text: &str) -> Self {
        Word::literal(text)
    }
}

impl From<String> for Word {
    fn from(text: String) -> Self {
        Word::literal(text)
    }
}
