//! Rust output using reqwest's blocking client

use super::{sorted, RenderedSource, Renderer, TargetStyle};
use crate::errors::Result;
use crate::http::{CONNECT, DELETE, GET, HEAD, OPTIONS, PATCH, POST, PUT, TRACE};
use crate::request::{Body, Part, Request};
use crate::shell::{Word, WordPart};

/// Methods with their own `Client` shortcut
const SHORTCUTS: &[&str] = &[GET, POST, PUT, PATCH, DELETE, HEAD];

/// Standard methods that only exist as `reqwest::Method` constants
const CONSTANTS: &[&str] = &[OPTIONS, TRACE, CONNECT];

pub struct RustRenderer;

impl Renderer for RustRenderer {
    fn style(&self) -> TargetStyle {
        TargetStyle::Rust
    }

    fn render(&self, request: &Request) -> Result<RenderedSource> {
        let mut imports = vec!["reqwest::blocking::Client"];
        let mut code = String::from("    let client = Client::new();\n");

        if let Body::Multipart(parts) = &request.body {
            imports.push("reqwest::blocking::multipart");
            code.push_str("    let form = multipart::Form::new()");
            for part in parts {
                code.push_str(&format!("\n        {}", form_call(part)));
            }
            code.push_str(";\n");
        }

        let method = request.method();
        let url = expr(&request.url);
        let start = match method.as_literal() {
            Some(verb) if SHORTCUTS.contains(&verb) => {
                format!("client.{}({})", verb.to_lowercase(), url)
            }
            Some(verb) if CONSTANTS.contains(&verb) => {
                format!("client.request(reqwest::Method::{}, {})", verb, url)
            }
            _ => format!(
                "client.request(reqwest::Method::from_bytes({}.as_bytes())?, {})",
                expr(&method),
                url
            ),
        };

        let mut chain = vec![start];
        for header in &request.headers {
            chain.push(format!(
                ".header({}, {})",
                expr(&header.name),
                expr(&header.value)
            ));
        }
        if let Some(content_type) = request.implied_content_type() {
            chain.push(format!(".header(\"Content-Type\", {})", expr(&content_type)));
        }
        if let Some(auth) = &request.auth {
            chain.push(format!(
                ".basic_auth({}, Some({}))",
                expr(&auth.user),
                expr(&auth.password)
            ));
        }
        match &request.body {
            Body::None => {}
            Body::Raw { content, .. } => chain.push(format!(".body({})", expr(content))),
            Body::UrlEncoded(pairs) => {
                chain.push(format!(".body({})", expr(&Body::encoded(pairs))))
            }
            Body::File { path, .. } => {
                chain.push(format!(".body(std::fs::File::open({})?)", expr(path)))
            }
            Body::Multipart(_) => chain.push(".multipart(form)".to_string()),
        }
        chain.push(".send()?;".to_string());

        code.push_str(&format!("    let response = {}\n", chain[0]));
        for call in &chain[1..] {
            code.push_str(&format!("        {}\n", call));
        }
        code.push_str("    println!(\"{}\", response.text()?);\n");
        code.push_str("    Ok(())\n");

        let imports = sorted(imports);
        let mut source = String::new();
        for import in &imports {
            source.push_str(&format!("use {};\n", import));
        }
        source.push_str("\nfn main() -> Result<(), Box<dyn std::error::Error>> {\n");
        source.push_str(&code);
        source.push_str("}\n");

        Ok(RenderedSource {
            source,
            imports,
            dependencies: vec!["reqwest".to_string()],
        })
    }
}

fn form_call(part: &Part) -> String {
    match part {
        Part::Field { name, value } => format!(".text({}, {})", expr(name), expr(value)),
        Part::File {
            name,
            filename,
            source_path,
        } => {
            if *filename == source_path.basename() && !source_path.contains('\\') {
                format!(".file({}, {})?", expr(name), expr(source_path))
            } else {
                format!(
                    ".part({}, multipart::Part::file({})?.file_name({}))",
                    expr(name),
                    expr(source_path),
                    expr(filename)
                )
            }
        }
        Part::FileContent { name, source_path } => format!(
            ".text({}, std::fs::read_to_string({})?)",
            expr(name),
            expr(source_path)
        ),
    }
}

/// Literals are `&'static str`; anything with a lookup is an owned `String`
fn expr(word: &Word) -> String {
    match word.parts() {
        [] => quote(""),
        [WordPart::Text(text)] => quote(text),
        [WordPart::Env(env)] => lookup(&env.name),
        parts => {
            let pieces: Vec<String> = parts
                .iter()
                .map(|part| match part {
                    WordPart::Text(text) => quote(text),
                    WordPart::Env(env) => format!("{}.as_str()", lookup(&env.name)),
                })
                .collect();
            format!("[{}].concat()", pieces.join(", "))
        }
    }
}

fn lookup(name: &str) -> String {
    format!("std::env::var({}).unwrap_or_default()", quote(name))
}

/// Rust string literal for `s`, raw when that avoids escapes
pub fn quote(s: &str) -> String {
    let needs_escapes = s.contains('"') || s.contains('\\');
    let raw_ok = !s.contains("\"#") && !s.chars().any(|c| c.is_control() && c != '\n' && c != '\t');
    if needs_escapes && raw_ok {
        return format!("r#\"{}\"#", s);
    }

    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('"');
    for c in s.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            c if c.is_control() => quoted.push_str(&format!("\\u{{{:x}}}", c as u32)),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}
