//! Non-fatal conversion notes
//!
//! The parser never logs. Anything worth telling the user that does not stop
//! the conversion is collected here and handed back to the caller.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    /// Flag the warning is about, as written on the command line
    pub flag: Option<String>,
    pub message: String,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.flag {
            Some(flag) => write!(f, "{}: {}", flag, self.message),
            None => f.write_str(&self.message),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Warnings(Vec<Warning>);

impl Warnings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, flag: Option<&str>, message: impl Into<String>) {
        self.0.push(Warning {
            flag: flag.map(String::from),
            message: message.into(),
        });
    }

    pub fn flag(&mut self, flag: &str, message: impl Into<String>) {
        self.push(Some(flag), message);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Warning> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<Warning> {
        self.0
    }
}

impl<'a> IntoIterator for &'a Warnings {
    type Item = &'a Warning;
    type IntoIter = std::slice::Iter<'a, Warning>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
