//! Request body variants

use crate::http;
use crate::shell::Word;

/// One entry of a multipart/form-data body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    /// `name=value`
    Field { name: Word, value: Word },
    /// `name=@path`: file contents sent as an attachment called `filename`
    File {
        name: Word,
        filename: Word,
        source_path: Word,
    },
    /// `name=<path`: file contents sent as a plain field value
    FileContent { name: Word, source_path: Word },
}

impl Part {
    pub fn name(&self) -> &Word {
        match self {
            Part::Field { name, .. } | Part::File { name, .. } | Part::FileContent { name, .. } => {
                name
            }
        }
    }

    /// Path of the file the generated program has to open, if any
    pub fn source_path(&self) -> Option<&Word> {
        match self {
            Part::Field { .. } => None,
            Part::File { source_path, .. } | Part::FileContent { source_path, .. } => {
                Some(source_path)
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Body {
    #[default]
    None,
    /// Data sent as-is with its effective content type
    Raw { content: Word, content_type: Word },
    /// `key=value` pairs, already encoded, in the order given
    UrlEncoded(Vec<(Word, Word)>),
    Multipart(Vec<Part>),
    /// Contents of a file read by the generated program
    File {
        path: Word,
        content_type: Option<Word>,
    },
}

impl Body {
    pub fn is_none(&self) -> bool {
        matches!(self, Body::None)
    }

    pub fn is_some(&self) -> bool {
        !self.is_none()
    }

    /// Content type implied by the body itself.
    ///
    /// Multipart bodies return `None`: their type carries a boundary chosen by
    /// the client library at run time.
    pub fn content_type(&self) -> Option<Word> {
        match self {
            Body::None | Body::Multipart(_) => None,
            Body::Raw { content_type, .. } => Some(content_type.clone()),
            Body::UrlEncoded(_) => Some(Word::literal(http::FORM_URLENCODED)),
            Body::File { content_type, .. } => content_type.clone(),
        }
    }

    /// The `key=value&...` string of an urlencoded body
    pub fn encoded(pairs: &[(Word, Word)]) -> Word {
        let mut encoded = Word::new();
        for (i, (key, value)) in pairs.iter().enumerate() {
            if i > 0 {
                encoded.push_char('&');
            }
            encoded.push_word(key);
            encoded.push_char('=');
            encoded.push_word(value);
        }
        encoded
    }

    /// Every word in the body, for collecting variable references
    pub(crate) fn words(&self) -> Vec<&Word> {
        match self {
            Body::None => Vec::new(),
            Body::Raw { content, content_type } => vec![content, content_type],
            Body::UrlEncoded(pairs) => pairs.iter().flat_map(|(k, v)| [k, v]).collect(),
            Body::Multipart(parts) => parts
                .iter()
                .flat_map(|part| match part {
                    Part::Field { name, value } => vec![name, value],
                    Part::File {
                        name,
                        filename,
                        source_path,
                    } => vec![name, filename, source_path],
                    Part::FileContent { name, source_path } => vec![name, source_path],
                })
                .collect(),
            Body::File { path, content_type } => {
                let mut words = vec![path];
                words.extend(content_type);
                words
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_implied_content_types() {
        assert_eq!(Body::None.content_type(), None);
        assert_eq!(Body::Multipart(Vec::new()).content_type(), None);
        assert_eq!(
            Body::UrlEncoded(Vec::new()).content_type(),
            Some(Word::literal("application/x-www-form-urlencoded"))
        );
        let raw = Body::Raw {
            content: Word::literal("{}"),
            content_type: Word::literal("application/json"),
        };
        assert_eq!(raw.content_type(), Some(Word::literal("application/json")));
    }

    #[test]
    fn test_encoded_pairs() {
        let pairs = vec![
            (Word::literal("a"), Word::literal("1")),
            (Word::literal("b"), Word::new()),
        ];
        assert_eq!(Body::encoded(&pairs), Word::literal("a=1&b="));
    }
}
