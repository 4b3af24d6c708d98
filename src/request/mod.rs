//! Request intermediate representation
//!
//! [`Request`] is the renderer-agnostic description of the HTTP call a curl
//! command makes. The builder in [`crate::curl`] produces it and the renderers
//! in [`crate::codegen`] only ever read it.

mod body;
mod headers;

pub use body::{Body, Part};
pub use headers::{same_name, Header, Headers};

use indexmap::IndexSet;

use crate::http;
use crate::shell::Word;

/// Credentials for HTTP Basic authentication
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Auth {
    pub user: Word,
    pub password: Word,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Method set by a flag (`-X`, `-I`, `-T`, `-G`); `None` means inferred.
    /// `-X "$VERB"` keeps the reference.
    pub method: Option<Word>,
    pub url: Word,
    pub headers: Headers,
    pub auth: Option<Auth>,
    pub body: Body,
    /// Environment variables referenced anywhere in the request, first use first
    pub env_refs: IndexSet<String>,
}

impl Request {
    pub fn new(url: impl Into<Word>) -> Self {
        Self {
            method: None,
            url: url.into(),
            headers: Headers::new(),
            auth: None,
            body: Body::None,
            env_refs: IndexSet::new(),
        }
    }

    /// The method to send: the explicit one, else POST with a body, else GET
    pub fn method(&self) -> Word {
        match &self.method {
            Some(method) => method.clone(),
            None => Word::literal(http::infer(self.body.is_some())),
        }
    }

    /// Content-Type header given explicitly on the command line
    pub fn explicit_content_type(&self) -> Option<&Word> {
        self.headers.get("Content-Type")
    }

    /// Content type a renderer must add itself: the body's implied type when
    /// no explicit header exists.
    pub fn implied_content_type(&self) -> Option<Word> {
        if self.explicit_content_type().is_some() {
            return None;
        }
        self.body.content_type()
    }

    /// Recompute `env_refs` from every word in the request
    pub fn collect_env_refs(&mut self) {
        let mut refs = IndexSet::new();
        let mut words: Vec<&Word> = self.method.iter().collect();
        words.push(&self.url);
        for header in &self.headers {
            words.push(&header.name);
            words.push(&header.value);
        }
        if let Some(auth) = &self.auth {
            words.push(&auth.user);
            words.push(&auth.password);
        }
        words.extend(self.body.words());
        for word in words {
            refs.extend(word.env_names().map(String::from));
        }
        self.env_refs = refs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::EnvRef;

    #[test]
    fn test_method_inference() {
        let mut request = Request::new("http://x");
        assert_eq!(request.method(), "GET");

        request.body = Body::Raw {
            content: Word::literal("a"),
            content_type: Word::literal(http::FORM_URLENCODED),
        };
        assert_eq!(request.method(), "POST");

        request.method = Some(Word::literal("PUT"));
        assert_eq!(request.method(), "PUT");
    }

    #[test]
    fn test_explicit_content_type_wins() {
        let mut request = Request::new("http://x");
        request.body = Body::UrlEncoded(vec![(Word::literal("a"), Word::literal("1"))]);
        assert_eq!(
            request.implied_content_type(),
            Some(Word::literal(http::FORM_URLENCODED))
        );

        request.headers.push("content-type", "text/plain");
        assert_eq!(request.implied_content_type(), None);
    }

    #[test]
    fn test_collect_env_refs_in_order() {
        let mut token = Word::literal("Bearer ");
        token.push_env(EnvRef::new("TOKEN"));
        let mut user = Word::new();
        user.push_env(EnvRef::new("USER"));
        let mut url = Word::new();
        url.push_env(EnvRef::new("HOST"));

        let mut verb = Word::new();
        verb.push_env(EnvRef::new("VERB"));

        let mut request = Request::new(url);
        request.method = Some(verb);
        request.headers.push("Authorization", token.clone());
        request.headers.push("X-Again", token);
        request.auth = Some(Auth {
            user,
            password: Word::new(),
        });
        request.collect_env_refs();

        let refs: Vec<&str> = request.env_refs.iter().map(String::as_str).collect();
        assert_eq!(refs, vec!["VERB", "HOST", "TOKEN", "USER"]);
    }
}
