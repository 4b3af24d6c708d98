//! Body classification
//!
//! Turns the data and form options of a command into one [`Body`]. Forms win
//! over data; data is joined in flag order; the effective content type decides
//! between a structured urlencoded body and raw text.

use once_cell::sync::Lazy;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;

use super::opts::DataKind;
use crate::errors::{CurlgenError, Result};
use crate::http;
use crate::request::{Body, Part};
use crate::shell::Word;
use crate::warnings::Warnings;

/// Characters `--data-urlencode` leaves alone
const CURL_UNRESERVED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// `key=value(&key=value)*` with keys that need no further encoding
static URLENCODED_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_.~%+\-\[\]]+=[^&\r\n]*(&[A-Za-z0-9_.~%+\-\[\]]+=[^&\r\n]*)*$")
        .expect("Invalid urlencoded shape regex")
});

/// One `-d`/`--data*`/`--json` argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataArg {
    pub kind: DataKind,
    /// The flag as written, for messages
    pub flag: String,
    pub value: Word,
}

/// One `-F`/`--form-string` argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormArg {
    pub flag: String,
    pub value: Word,
    /// `--form-string`: `@` and `<` are not special
    pub literal: bool,
}

/// What the data options add up to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataContent {
    Text(Word),
    /// `@path`: the generated program reads the file
    File(Word),
}

/// Classify data and form options into a body.
pub fn classify(
    data: &[DataArg],
    forms: &[FormArg],
    explicit_content_type: Option<&Word>,
    warnings: &mut Warnings,
) -> Result<Body> {
    if !forms.is_empty() {
        for arg in data {
            warnings.flag(&arg.flag, "ignored because the request has form fields");
        }
        let parts = forms
            .iter()
            .map(|arg| form_part(arg, warnings))
            .collect::<Result<Vec<_>>>()?;
        return Ok(Body::Multipart(parts));
    }

    if data.is_empty() {
        return Ok(Body::None);
    }

    let content_type = match explicit_content_type {
        Some(content_type) => content_type.clone(),
        None if data.iter().any(|arg| arg.kind == DataKind::Json) => Word::literal(http::JSON),
        None => Word::literal(http::FORM_URLENCODED),
    };

    let content = match join_data(data)? {
        DataContent::File(path) => {
            return Ok(Body::File {
                path,
                content_type: Some(content_type),
            })
        }
        DataContent::Text(content) => content,
    };

    let urlencoded = content_type
        .as_literal()
        .is_some_and(http::is_form_urlencoded);
    if urlencoded && URLENCODED_SHAPE.is_match(&content.shape("x")) {
        let pairs = content
            .split('&')
            .into_iter()
            .filter_map(|pair| pair.split_once('='))
            .collect();
        return Ok(Body::UrlEncoded(pairs));
    }

    Ok(Body::Raw {
        content,
        content_type,
    })
}

/// Join data values in flag order.
///
/// Values are separated by `&`, except between two `--json` values which are
/// concatenated. A lone `@path` value becomes [`DataContent::File`].
pub fn join_data(data: &[DataArg]) -> Result<DataContent> {
    let mut joined = Word::new();
    let mut previous: Option<DataKind> = None;

    for arg in data {
        let value = match data_value(arg)? {
            DataContent::Text(value) => value,
            DataContent::File(path) if data.len() == 1 => return Ok(DataContent::File(path)),
            DataContent::File(_) => {
                return Err(CurlgenError::ConflictingBody(format!(
                    "{} {} reads a file and cannot be combined with other data",
                    arg.flag, arg.value
                )))
            }
        };

        match previous {
            Some(DataKind::Json) if arg.kind == DataKind::Json => {}
            Some(_) => joined.push_char('&'),
            None => {}
        }
        joined.push_word(&value);
        previous = Some(arg.kind);
    }

    Ok(DataContent::Text(joined))
}

fn data_value(arg: &DataArg) -> Result<DataContent> {
    match arg.kind {
        DataKind::Raw => Ok(DataContent::Text(arg.value.clone())),
        DataKind::UrlEncode => urlencode_value(arg).map(DataContent::Text),
        DataKind::Ascii | DataKind::Binary | DataKind::Json => match arg.value.strip_prefix('@') {
            Some(path) if path.as_literal() == Some("-") => Err(CurlgenError::invalid(
                &arg.flag,
                "reading data from stdin is not supported",
            )),
            Some(path) => Ok(DataContent::File(path)),
            None => Ok(DataContent::Text(arg.value.clone())),
        },
    }
}

/// `--data-urlencode` forms: `content`, `=content`, `name=content`.
///
/// `name@file` and `@file` need the file contents at generation time and are
/// rejected.
fn urlencode_value(arg: &DataArg) -> Result<Word> {
    let value = &arg.value;
    if let Some((name, content)) = value.split_once('=') {
        let mut encoded = Word::new();
        if !name.is_empty() {
            encoded.push_word(&name);
            encoded.push_char('=');
        }
        encoded.push_word(&curl_escape(&content));
        return Ok(encoded);
    }
    if value.contains('@') {
        return Err(CurlgenError::invalid(
            &arg.flag,
            format!("cannot encode the contents of a file: {}", value),
        ));
    }
    Ok(curl_escape(value))
}

/// Percent-encode the literal text of a word the way curl does, with spaces as `+`
pub fn curl_escape(word: &Word) -> Word {
    word.map_text(escape_str)
}

fn escape_str(text: &str) -> String {
    utf8_percent_encode(text, CURL_UNRESERVED)
        .to_string()
        .replace("%20", "+")
}

fn form_part(arg: &FormArg, warnings: &mut Warnings) -> Result<Part> {
    let (name, value) = arg
        .value
        .split_once('=')
        .ok_or_else(|| CurlgenError::invalid(&arg.flag, format!("expected name=value, got '{}'", arg.value)))?;

    if arg.literal {
        return Ok(Part::Field { name, value });
    }

    if let Some(spec) = value.strip_prefix('@') {
        let (source_path, filename) = file_modifiers(&arg.flag, &spec, warnings);
        let filename = filename.unwrap_or_else(|| source_path.basename());
        return Ok(Part::File {
            name,
            filename,
            source_path,
        });
    }

    if let Some(spec) = value.strip_prefix('<') {
        let (source_path, filename) = file_modifiers(&arg.flag, &spec, warnings);
        if filename.is_some() {
            warnings.flag(&arg.flag, "filename= has no effect on a field read from a file");
        }
        return Ok(Part::FileContent { name, source_path });
    }

    Ok(Part::Field { name, value })
}

/// Split `path;filename=x;type=t` into the path and the filename override
fn file_modifiers(flag: &str, spec: &Word, warnings: &mut Warnings) -> (Word, Option<Word>) {
    let mut pieces = spec.split(';').into_iter();
    let path = pieces.next().unwrap_or_default();
    let mut filename = None;

    for modifier in pieces {
        match modifier.split_once('=') {
            Some((key, value)) if key.eq_ignore_ascii_case("filename") => filename = Some(value),
            Some((key, _)) if key.eq_ignore_ascii_case("type") => {
                warnings.flag(flag, format!("content type of {} is not set: {}", path, modifier))
            }
            _ => warnings.flag(flag, format!("unsupported form modifier ignored: {}", modifier)),
        }
    }

    (path, filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(kind: DataKind, value: &str) -> DataArg {
        DataArg {
            kind,
            flag: "-d".to_string(),
            value: Word::literal(value),
        }
    }

    fn form(value: &str) -> FormArg {
        FormArg {
            flag: "-F".to_string(),
            value: Word::literal(value),
            literal: false,
        }
    }

    fn pairs(body: &Body) -> Vec<(String, String)> {
        match body {
            Body::UrlEncoded(pairs) => pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            other => panic!("not urlencoded: {:?}", other),
        }
    }

    #[test]
    fn test_no_options_no_body() {
        let mut warnings = Warnings::new();
        assert_eq!(classify(&[], &[], None, &mut warnings).unwrap(), Body::None);
    }

    #[test]
    fn test_data_joined_in_order() {
        let mut warnings = Warnings::new();
        let body = classify(
            &[data(DataKind::Ascii, "a=1"), data(DataKind::Raw, "b=2")],
            &[],
            None,
            &mut warnings,
        )
        .unwrap();
        assert_eq!(
            pairs(&body),
            vec![
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "2".to_string())
            ]
        );
    }

    #[test]
    fn test_non_pair_data_is_raw() {
        let mut warnings = Warnings::new();
        let body = classify(&[data(DataKind::Ascii, "{\"a\":1}")], &[], None, &mut warnings).unwrap();
        assert_eq!(
            body,
            Body::Raw {
                content: Word::literal("{\"a\":1}"),
                content_type: Word::literal(http::FORM_URLENCODED),
            }
        );
    }

    #[test]
    fn test_explicit_content_type_keeps_pairs_raw() {
        let mut warnings = Warnings::new();
        let content_type = Word::literal("text/plain");
        let body = classify(
            &[data(DataKind::Ascii, "a=1")],
            &[],
            Some(&content_type),
            &mut warnings,
        )
        .unwrap();
        assert_eq!(
            body,
            Body::Raw {
                content: Word::literal("a=1"),
                content_type,
            }
        );
    }

    #[test]
    fn test_json_values_concatenate() {
        let mut warnings = Warnings::new();
        let body = classify(
            &[data(DataKind::Json, "{\"a\":"), data(DataKind::Json, "1}")],
            &[],
            None,
            &mut warnings,
        )
        .unwrap();
        assert_eq!(
            body,
            Body::Raw {
                content: Word::literal("{\"a\":1}"),
                content_type: Word::literal(http::JSON),
            }
        );
    }

    #[test]
    fn test_data_urlencode() {
        let cases = [
            ("name=hello world", "name=hello+world"),
            ("=a&b", "a%26b"),
            ("plain text", "plain+text"),
            ("q=caf\u{e9}~", "q=caf%C3%A9~"),
        ];
        for (input, expected) in cases {
            let joined = join_data(&[data(DataKind::UrlEncode, input)]).unwrap();
            assert_eq!(joined, DataContent::Text(Word::literal(expected)), "{}", input);
        }

        let err = join_data(&[data(DataKind::UrlEncode, "name@file.txt")]).unwrap_err();
        assert!(matches!(err, CurlgenError::InvalidArgument { .. }));
    }

    #[test]
    fn test_single_file_data() {
        let mut warnings = Warnings::new();
        let body = classify(&[data(DataKind::Binary, "@payload.bin")], &[], None, &mut warnings).unwrap();
        assert_eq!(
            body,
            Body::File {
                path: Word::literal("payload.bin"),
                content_type: Some(Word::literal(http::FORM_URLENCODED)),
            }
        );

        // --data-raw never reads files
        let raw = join_data(&[data(DataKind::Raw, "@payload.bin")]).unwrap();
        assert_eq!(raw, DataContent::Text(Word::literal("@payload.bin")));
    }

    #[test]
    fn test_file_data_cannot_be_mixed() {
        let err = join_data(&[data(DataKind::Ascii, "@a"), data(DataKind::Ascii, "b=1")]).unwrap_err();
        assert!(matches!(err, CurlgenError::ConflictingBody(_)));
    }

    #[test]
    fn test_forms_override_data() {
        let mut warnings = Warnings::new();
        let body = classify(
            &[data(DataKind::Ascii, "a=1")],
            &[form("f=v")],
            None,
            &mut warnings,
        )
        .unwrap();
        assert_eq!(
            body,
            Body::Multipart(vec![Part::Field {
                name: Word::literal("f"),
                value: Word::literal("v"),
            }])
        );
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_form_parts() {
        let mut warnings = Warnings::new();
        let forms = [
            form("file=@./dir/photo.jpg"),
            form("renamed=@C:\\tmp\\a.txt;filename=b.txt;type=text/plain"),
            form("notes=<notes.txt"),
            FormArg {
                literal: true,
                ..form("raw=@not-a-file")
            },
        ];
        let body = classify(&[], &forms, None, &mut warnings).unwrap();
        assert_eq!(
            body,
            Body::Multipart(vec![
                Part::File {
                    name: Word::literal("file"),
                    filename: Word::literal("photo.jpg"),
                    source_path: Word::literal("./dir/photo.jpg"),
                },
                Part::File {
                    name: Word::literal("renamed"),
                    filename: Word::literal("b.txt"),
                    source_path: Word::literal("C:\\tmp\\a.txt"),
                },
                Part::FileContent {
                    name: Word::literal("notes"),
                    source_path: Word::literal("notes.txt"),
                },
                Part::Field {
                    name: Word::literal("raw"),
                    value: Word::literal("@not-a-file"),
                },
            ])
        );
        // the dropped ;type=
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_form_without_equals() {
        let mut warnings = Warnings::new();
        let err = classify(&[], &[form("novalue")], None, &mut warnings).unwrap_err();
        assert!(matches!(err, CurlgenError::InvalidArgument { .. }));
    }

    #[test]
    fn test_shape_ignores_references() {
        let mut value = Word::literal("token=");
        value.push_env(crate::shell::EnvRef::new("TOKEN"));
        let arg = DataArg {
            kind: DataKind::Ascii,
            flag: "-d".to_string(),
            value,
        };
        let mut warnings = Warnings::new();
        let body = classify(&[arg], &[], None, &mut warnings).unwrap();
        assert!(matches!(body, Body::UrlEncoded(ref pairs) if pairs[0].1.has_env()));
    }
}
