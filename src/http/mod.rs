//! HTTP protocol constants
//!
//! Method names and the content types curl implies for request bodies.

mod method;

pub use method::*;

/// Content type curl sends with `-d` data unless told otherwise
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Content type (and Accept value) implied by `--json`
pub const JSON: &str = "application/json";

/// Is `content_type` the urlencoded form type, ignoring parameters and case?
pub fn is_form_urlencoded(content_type: &str) -> bool {
    content_type
        .parse::<mime::Mime>()
        .map(|m| m.essence_str() == mime::APPLICATION_WWW_FORM_URLENCODED.essence_str())
        .unwrap_or(false)
}

/// Is `content_type` `multipart/form-data` without a boundary parameter?
///
/// Such a header cannot be parsed by a server; the client library has to
/// supply its own boundary.
pub fn is_unbounded_form_data(content_type: &str) -> bool {
    content_type
        .parse::<mime::Mime>()
        .map(|m| {
            m.essence_str() == mime::MULTIPART_FORM_DATA.essence_str()
                && m.get_param(mime::BOUNDARY).is_none()
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_match_mime() {
        assert_eq!(FORM_URLENCODED, mime::APPLICATION_WWW_FORM_URLENCODED.as_ref());
        assert_eq!(JSON, mime::APPLICATION_JSON.as_ref());
    }

    #[test]
    fn test_is_form_urlencoded() {
        assert!(is_form_urlencoded("application/x-www-form-urlencoded"));
        assert!(is_form_urlencoded("Application/X-WWW-Form-Urlencoded; charset=UTF-8"));
        assert!(!is_form_urlencoded("application/json"));
        assert!(!is_form_urlencoded("not a type"));
    }

    #[test]
    fn test_is_unbounded_form_data() {
        assert!(is_unbounded_form_data("multipart/form-data"));
        assert!(is_unbounded_form_data("Multipart/Form-Data; charset=utf-8"));
        assert!(!is_unbounded_form_data("multipart/form-data; boundary=xyz"));
        assert!(!is_unbounded_form_data("multipart/mixed"));
    }
}
