//! Python output using requests

use super::{concat, sorted, RenderedSource, Renderer, TargetStyle};
use crate::errors::{CurlgenError, Result};
use crate::http::{DELETE, GET, HEAD, OPTIONS, PATCH, POST, PUT};
use crate::request::{same_name, Body, Part, Request};
use crate::shell::Word;

/// Methods with their own function in requests
const SHORTCUTS: &[&str] = &[GET, POST, PUT, PATCH, DELETE, HEAD, OPTIONS];

pub struct PythonRenderer;

impl Renderer for PythonRenderer {
    fn style(&self) -> TargetStyle {
        TargetStyle::Python
    }

    fn render(&self, request: &Request) -> Result<RenderedSource> {
        let headers: Vec<_> = request.headers.iter().collect();
        if let Some((i, _)) = headers.iter().enumerate().find(|(i, h)| {
            headers[..*i]
                .iter()
                .any(|earlier| same_name(&earlier.name, &h.name))
        }) {
            return Err(CurlgenError::unsupported(
                "python",
                format!("repeated header {}", headers[i].name),
            ));
        }

        let mut imports = vec!["requests"];
        if !request.env_refs.is_empty() {
            imports.push("os");
        }

        let mut code = String::new();
        let mut args = vec![expr(&request.url)];

        // Headers, then the content type the body implies
        let mut entries: Vec<(String, String)> = headers
            .iter()
            .map(|h| (expr(&h.name), expr(&h.value)))
            .collect();
        if let Some(content_type) = request.implied_content_type() {
            entries.push((quote("Content-Type"), expr(&content_type)));
        }
        if !entries.is_empty() {
            code.push_str("headers = {\n");
            for (name, value) in &entries {
                code.push_str(&format!("    {}: {},\n", name, value));
            }
            code.push_str("}\n\n");
            args.push("headers=headers".to_string());
        }

        // Body; files are opened by a with statement around the request
        let mut files: Vec<&Word> = Vec::new();
        let mut block = String::new();
        match &request.body {
            Body::None => {}
            Body::Raw { content, .. } => {
                code.push_str(&format!("data = {}\n\n", expr(content)));
                args.push("data=data".to_string());
            }
            Body::UrlEncoded(pairs) => {
                code.push_str(&format!("data = {}\n\n", expr(&Body::encoded(pairs))));
                args.push("data=data".to_string());
            }
            Body::File { path, .. } => {
                files.push(path);
                args.push("data=file_0".to_string());
            }
            Body::Multipart(parts) => {
                block.push_str("files = [\n");
                for part in parts {
                    let value = match part {
                        Part::Field { value, .. } => format!("(None, {})", expr(value)),
                        Part::File {
                            filename,
                            source_path,
                            ..
                        } => {
                            files.push(source_path);
                            format!("({}, file_{})", expr(filename), files.len() - 1)
                        }
                        Part::FileContent { source_path, .. } => {
                            files.push(source_path);
                            format!("(None, file_{}.read())", files.len() - 1)
                        }
                    };
                    block.push_str(&format!("    ({}, {}),\n", expr(part.name()), value));
                }
                block.push_str("]\n");
                args.push("files=files".to_string());
            }
        }

        // Auth
        if let Some(auth) = &request.auth {
            args.push(format!(
                "auth=({}, {})",
                expr(&auth.user),
                expr(&auth.password)
            ));
        }

        let method = request.method();
        let call = match method.as_literal() {
            Some(verb) if SHORTCUTS.contains(&verb) => {
                format!("requests.{}({})", verb.to_lowercase(), args.join(", "))
            }
            _ => format!("requests.request({}, {})", expr(&method), args.join(", ")),
        };
        block.push_str(&format!("response = {}\n", call));

        if files.is_empty() {
            code.push_str(&block);
        } else {
            let handles: Vec<String> = files
                .iter()
                .enumerate()
                .map(|(i, path)| format!("open({}, 'rb') as file_{}", expr(path), i))
                .collect();
            code.push_str(&format!("with {}:\n", handles.join(", ")));
            for line in block.lines() {
                code.push_str(&format!("    {}\n", line));
            }
        }
        code.push_str("\nprint(response.text)\n");

        let imports = sorted(imports);
        let mut source = String::new();
        for import in &imports {
            source.push_str(&format!("import {}\n", import));
        }
        source.push('\n');
        source.push_str(&code);

        Ok(RenderedSource {
            source,
            imports,
            dependencies: vec!["requests".to_string()],
        })
    }
}

fn expr(word: &Word) -> String {
    concat(
        word,
        quote,
        |env| format!("os.getenv({}, '')", quote(&env.name)),
        " + ",
    )
}

/// Python string literal for `s`, single-quoted unless double quotes avoid escapes
pub fn quote(s: &str) -> String {
    let delimiter = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push(delimiter);
    for c in s.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            c if c == delimiter => {
                quoted.push('\\');
                quoted.push(c);
            }
            c if c.is_control() => quoted.push_str(&format!("\\x{:02x}", c as u32)),
            c => quoted.push(c),
        }
    }
    quoted.push(delimiter);
    quoted
}
