//! Ordered header multimap

use crate::shell::Word;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub name: Word,
    pub value: Word,
}

/// Request headers in the order they were given.
///
/// Repeated names are separate entries; nothing is ever merged or replaced.
/// Lookups compare names case-insensitively but entries keep their spelling.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<Header>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<Word>, value: impl Into<Word>) {
        self.entries.push(Header {
            name: name.into(),
            value: value.into(),
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Header> {
        self.entries.iter()
    }

    /// Value of the first header called `name`
    pub fn get(&self, name: &str) -> Option<&Word> {
        self.entries
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case(name))
            .map(|h| &h.value)
    }

    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Word> + 'a {
        self.entries
            .iter()
            .filter(move |h| h.name.eq_ignore_ascii_case(name))
            .map(|h| &h.value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Keep only the entries `keep` accepts, in order
    pub fn retain(&mut self, keep: impl FnMut(&Header) -> bool) {
        self.entries.retain(keep);
    }

    /// Does any header name occur more than once?
    pub fn has_repeated_names(&self) -> bool {
        self.entries.iter().enumerate().any(|(i, h)| {
            self.entries[..i]
                .iter()
                .any(|earlier| same_name(&earlier.name, &h.name))
        })
    }
}

/// Header names are case-insensitive; names with variable references only
/// match when spelled identically.
pub fn same_name(a: &Word, b: &Word) -> bool {
    match (a.as_literal(), b.as_literal()) {
        (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
        _ => a == b,
    }
}

impl<'a> IntoIterator for &'a Headers {
    type Item = &'a Header;
    type IntoIter = std::slice::Iter<'a, Header>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
