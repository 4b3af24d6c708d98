//! Request methods as curl and the generated code spell them

pub const GET: &str = "GET";
pub const POST: &str = "POST";
pub const PUT: &str = "PUT";
pub const PATCH: &str = "PATCH";
pub const DELETE: &str = "DELETE";
pub const HEAD: &str = "HEAD";
pub const OPTIONS: &str = "OPTIONS";
pub const TRACE: &str = "TRACE";
pub const CONNECT: &str = "CONNECT";

/// Methods every client library knows by name
pub const STANDARD_METHODS: [&str; 9] = [GET, POST, PUT, PATCH, DELETE, HEAD, OPTIONS, TRACE, CONNECT];

pub fn is_standard(method: &str) -> bool {
    STANDARD_METHODS.iter().any(|m| m.eq_ignore_ascii_case(method))
}

/// Spelling of a `-X` argument in the request.
///
/// Standard methods are upper-cased (`post` becomes `POST`). Anything else is
/// sent exactly as written, the way curl does.
pub fn normalize(verb: &str) -> String {
    let verb = verb.trim();
    if is_standard(verb) {
        verb.to_ascii_uppercase()
    } else {
        verb.to_string()
    }
}

/// Method curl picks when no flag sets one
pub fn infer(has_body: bool) -> &'static str {
    if has_body {
        POST
    } else {
        GET
    }
}
