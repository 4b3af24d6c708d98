//! Raw HTTP/1.1 request message
//!
//! The message is the exact bytes a client would send, so everything has to
//! be known at generation time: no variable lookups, no files.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use url::Url;

use super::{RenderedSource, Renderer, TargetStyle};
use crate::errors::{CurlgenError, Result};
use crate::request::{Body, Request};
use crate::shell::Word;

const STYLE: &str = "http";

pub struct HttpRenderer;

impl Renderer for HttpRenderer {
    fn style(&self) -> TargetStyle {
        TargetStyle::Http
    }

    fn render(&self, request: &Request) -> Result<RenderedSource> {
        if let Some(name) = request.env_refs.first() {
            return Err(CurlgenError::unsupported(
                STYLE,
                format!("environment variable ${}", name),
            ));
        }

        let body = match &request.body {
            Body::None => None,
            Body::Raw { content, .. } => Some(text(content)?),
            Body::UrlEncoded(pairs) => Some(text(&Body::encoded(pairs))?),
            Body::Multipart(_) => return Err(CurlgenError::unsupported(STYLE, "multipart bodies")),
            Body::File { path, .. } => {
                return Err(CurlgenError::unsupported(
                    STYLE,
                    format!("a body read from {}", path),
                ))
            }
        };

        let url = Url::parse(&text(&request.url)?)
            .map_err(|e| CurlgenError::invalid("url", e.to_string()))?;
        let mut target = url.path().to_string();
        if let Some(query) = url.query() {
            target.push('?');
            target.push_str(query);
        }

        let mut message = format!("{} {} HTTP/1.1\r\n", text(&request.method())?, target);

        if !request.headers.contains("Host") {
            let host = url
                .host_str()
                .ok_or_else(|| CurlgenError::invalid("url", "URL has no host"))?;
            match url.port() {
                Some(port) => message.push_str(&format!("Host: {}:{}\r\n", host, port)),
                None => message.push_str(&format!("Host: {}\r\n", host)),
            }
        }

        for header in &request.headers {
            message.push_str(&field_line(&header.name, &header.value)?);
        }
        if let Some(content_type) = request.implied_content_type() {
            message.push_str(&field_line(&Word::literal("Content-Type"), &content_type)?);
        }
        if let Some(auth) = &request.auth {
            let credentials = format!("{}:{}", text(&auth.user)?, text(&auth.password)?);
            message.push_str(&format!(
                "Authorization: Basic {}\r\n",
                STANDARD.encode(credentials)
            ));
        }
        if let Some(body) = &body {
            if !request.headers.contains("Content-Length") {
                message.push_str(&format!("Content-Length: {}\r\n", body.len()));
            }
        }

        message.push_str("\r\n");
        if let Some(body) = &body {
            message.push_str(body);
        }

        Ok(RenderedSource {
            source: message,
            imports: Vec::new(),
            dependencies: Vec::new(),
        })
    }
}

fn text(word: &Word) -> Result<String> {
    word.as_literal()
        .map(String::from)
        .ok_or_else(|| CurlgenError::unsupported(STYLE, format!("environment variable in {}", word)))
}

fn field_line(name: &Word, value: &Word) -> Result<String> {
    let name = text(name)?;
    let value = text(value)?;
    if name.contains(['\r', '\n']) || value.contains(['\r', '\n']) {
        return Err(CurlgenError::unsupported(
            STYLE,
            format!("line breaks in header {}", name.trim()),
        ));
    }
    Ok(format!("{}: {}\r\n", name, value))
}
