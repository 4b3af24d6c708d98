//! Go output using net/http

use super::{concat, sorted, RenderedSource, Renderer, TargetStyle};
use crate::errors::Result;
use crate::request::{same_name, Body, Part, Request};
use crate::shell::Word;

const ERR_CHECK: &str = "\tif err != nil {\n\t\tlog.Fatal(err)\n\t}\n";

pub struct GoRenderer;

impl Renderer for GoRenderer {
    fn style(&self) -> TargetStyle {
        TargetStyle::Go
    }

    fn render(&self, request: &Request) -> Result<RenderedSource> {
        let mut imports = vec!["fmt", "io", "log", "net/http"];
        if !request.env_refs.is_empty() {
            imports.push("os");
        }

        let mut code = String::new();

        // Multipart body, written before the request is created
        if let Body::Multipart(parts) = &request.body {
            imports.extend(["bytes", "mime/multipart"]);
            code.push_str("\tform := new(bytes.Buffer)\n");
            code.push_str("\twriter := multipart.NewWriter(form)\n");
            let mut declared = Declared::default();
            for part in parts {
                write_part(&mut code, part, &mut declared, &mut imports);
            }
            code.push_str("\twriter.Close()\n\n");
        }

        code.push_str("\tclient := &http.Client{}\n");

        // Body
        let body_arg = match &request.body {
            Body::None => "nil",
            Body::Multipart(_) => "form",
            Body::Raw { content, .. } => {
                imports.push("strings");
                code.push_str(&format!("\tvar data = strings.NewReader({})\n", expr(content)));
                "data"
            }
            Body::UrlEncoded(pairs) => {
                imports.push("strings");
                code.push_str(&format!(
                    "\tvar data = strings.NewReader({})\n",
                    expr(&Body::encoded(pairs))
                ));
                "data"
            }
            Body::File { path, .. } => {
                imports.push("os");
                code.push_str(&format!("\tdata, err := os.Open({})\n", expr(path)));
                code.push_str(ERR_CHECK);
                code.push_str("\tdefer data.Close()\n");
                "data"
            }
        };

        code.push_str(&format!(
            "\treq, err := http.NewRequest({}, {}, {})\n",
            expr(&request.method()),
            expr(&request.url),
            body_arg
        ));
        code.push_str(ERR_CHECK);

        // Headers
        let headers: Vec<_> = request.headers.iter().collect();
        for (i, header) in headers.iter().enumerate() {
            let repeated = headers[..i]
                .iter()
                .any(|earlier| same_name(&earlier.name, &header.name));
            code.push_str(&format!(
                "\treq.Header.{}({}, {})\n",
                if repeated { "Add" } else { "Set" },
                expr(&header.name),
                expr(&header.value)
            ));
        }
        if let Some(content_type) = request.implied_content_type() {
            code.push_str(&format!(
                "\treq.Header.Set(\"Content-Type\", {})\n",
                expr(&content_type)
            ));
        } else if matches!(request.body, Body::Multipart(_))
            && request.explicit_content_type().is_none()
        {
            code.push_str("\treq.Header.Set(\"Content-Type\", writer.FormDataContentType())\n");
        }

        // Auth
        if let Some(auth) = &request.auth {
            code.push_str(&format!(
                "\treq.SetBasicAuth({}, {})\n",
                expr(&auth.user),
                expr(&auth.password)
            ));
        }

        code.push_str("\tresp, err := client.Do(req)\n");
        code.push_str(ERR_CHECK);
        code.push_str("\tdefer resp.Body.Close()\n");
        code.push_str("\tbodyText, err := io.ReadAll(resp.Body)\n");
        code.push_str(ERR_CHECK);
        code.push_str("\tfmt.Printf(\"%s\\n\", bodyText)\n");

        let imports = sorted(imports);
        let mut source = String::from("package main\n\nimport (\n");
        for import in &imports {
            source.push_str(&format!("\t\"{}\"\n", import));
        }
        source.push_str(")\n\nfunc main() {\n");
        source.push_str(&code);
        source.push_str("}\n");

        Ok(RenderedSource {
            source,
            imports,
            dependencies: Vec::new(),
        })
    }
}

/// Variables already declared in the multipart section
#[derive(Default)]
struct Declared {
    form_field: bool,
    fw: bool,
    fd: bool,
}

/// `:=` the first time a variable is assigned, `=` afterwards
fn assign(declared: &mut bool) -> &'static str {
    if std::mem::replace(declared, true) {
        "="
    } else {
        ":="
    }
}

fn write_part(code: &mut String, part: &Part, declared: &mut Declared, imports: &mut Vec<&str>) {
    match part {
        Part::Field { name, value } => {
            code.push_str(&format!(
                "\tformField, err {} writer.CreateFormField({})\n",
                assign(&mut declared.form_field),
                expr(name)
            ));
            code.push_str(ERR_CHECK);
            code.push_str(&format!(
                "\t_, err = formField.Write([]byte({}))\n",
                expr(value)
            ));
        }
        Part::File {
            name,
            filename,
            source_path,
        } => {
            let filename = if *filename == source_path.basename() && !source_path.contains('\\') {
                imports.push("path/filepath");
                format!("filepath.Base({})", expr(source_path))
            } else {
                expr(filename)
            };
            code.push_str(&format!(
                "\tfw, err {} writer.CreateFormFile({}, {})\n",
                assign(&mut declared.fw),
                expr(name),
                filename
            ));
            code.push_str(ERR_CHECK);
            write_copy(code, "fw", source_path, declared, imports);
        }
        Part::FileContent { name, source_path } => {
            code.push_str(&format!(
                "\tformField, err {} writer.CreateFormField({})\n",
                assign(&mut declared.form_field),
                expr(name)
            ));
            code.push_str(ERR_CHECK);
            write_copy(code, "formField", source_path, declared, imports);
        }
    }
    code.push('\n');
}

/// Open `path` and copy it into `target`
fn write_copy(
    code: &mut String,
    target: &str,
    path: &Word,
    declared: &mut Declared,
    imports: &mut Vec<&str>,
) {
    imports.push("os");
    code.push_str(&format!(
        "\tfd, err {} os.Open({})\n",
        assign(&mut declared.fd),
        expr(path)
    ));
    code.push_str(ERR_CHECK);
    code.push_str("\tdefer fd.Close()\n");
    code.push_str(&format!("\t_, err = io.Copy({}, fd)\n", target));
    code.push_str(ERR_CHECK);
}

fn expr(word: &Word) -> String {
    concat(
        word,
        quote,
        |env| format!("os.Getenv({})", quote(&env.name)),
        " + ",
    )
}

/// Go string literal for `s`.
///
/// Raw backtick strings are used for text containing double quotes when they
/// can represent it exactly. Go rejects a byte order mark anywhere in a source
/// file, so U+FEFF is always escaped.
pub fn quote(s: &str) -> String {
    let raw_ok = !s.contains(['`', '\u{feff}'])
        && !s.chars().any(|c| c.is_control() && c != '\n' && c != '\t');
    if s.contains('"') && raw_ok {
        return format!("`{}`", s);
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
            '\u{feff}' => quoted.push_str("\\ufeff"),
            c if c.is_control() => quoted.push_str(&format!("\\u{:04x}", c as u32)),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Auth;
    use crate::shell::EnvRef;

    #[test]
    fn test_quote() {
        assert_eq!(quote("plain"), "\"plain\"");
        assert_eq!(quote("{\"a\":1}"), "`{\"a\":1}`");
        assert_eq!(quote("say \"`hi`\""), "\"say \\\"`hi`\\\"\"");
        assert_eq!(quote("a\\b\n"), "\"a\\\\b\\n\"");
        assert_eq!(quote("\u{1}"), "\"\\u0001\"");
    }

    #[test]
    fn test_quote_escapes_byte_order_mark() {
        assert_eq!(quote("\u{feff}"), "\"\\ufeff\"");
        assert_eq!(quote("a\u{feff}b"), "\"a\\ufeffb\"");
        // would otherwise take the raw string path
        assert_eq!(quote("\"\u{feff}\""), "\"\\\"\\ufeff\\\"\"");
    }

    #[test]
    fn test_env_concatenation() {
        let mut value = Word::literal("Bearer ");
        value.push_env(EnvRef::new("DO_API_TOKEN"));
        assert_eq!(expr(&value), "\"Bearer \" + os.Getenv(\"DO_API_TOKEN\")");
    }

    #[test]
    fn test_repeated_headers_use_add() {
        let mut request = Request::new("http://x");
        request.headers.push("X-A", "1");
        request.headers.push("x-a", "2");
        let source = GoRenderer.render(&request).unwrap().source;
        assert!(source.contains("\treq.Header.Set(\"X-A\", \"1\")\n\treq.Header.Add(\"x-a\", \"2\")\n"));
    }

    #[test]
    fn test_urlencoded_body() {
        let mut request = Request::new("http://x");
        request.body = Body::UrlEncoded(vec![(Word::literal("a"), Word::literal("1"))]);
        let rendered = GoRenderer.render(&request).unwrap();
        assert!(rendered.source.contains("\tvar data = strings.NewReader(\"a=1\")\n"));
        assert!(rendered.source.contains("http.NewRequest(\"POST\", \"http://x\", data)"));
        assert!(rendered
            .source
            .contains("req.Header.Set(\"Content-Type\", \"application/x-www-form-urlencoded\")"));
        assert!(rendered.imports.contains(&"strings".to_string()));
        assert!(rendered.dependencies.is_empty());
    }

    #[test]
    fn test_file_body_is_closed() {
        let mut request = Request::new("http://x");
        request.method = Some(Word::literal("PUT"));
        request.body = Body::File {
            path: Word::literal("report.csv"),
            content_type: None,
        };
        let source = GoRenderer.render(&request).unwrap().source;
        assert!(source.contains("\tdata, err := os.Open(\"report.csv\")\n"));
        assert!(source.contains("\tdefer data.Close()\n"));
        assert!(!source.contains("Content-Type"));
    }

    #[test]
    fn test_explicit_filename_and_file_content() {
        let mut request = Request::new("http://x");
        request.body = Body::Multipart(vec![
            Part::File {
                name: Word::literal("a"),
                filename: Word::literal("renamed.txt"),
                source_path: Word::literal("orig.txt"),
            },
            Part::FileContent {
                name: Word::literal("b"),
                source_path: Word::literal("notes.txt"),
            },
        ]);
        let rendered = GoRenderer.render(&request).unwrap();
        let source = &rendered.source;
        assert!(source.contains("\tfw, err := writer.CreateFormFile(\"a\", \"renamed.txt\")\n"));
        assert!(source.contains("\tfd, err := os.Open(\"orig.txt\")\n"));
        assert!(source.contains("\tfd, err = os.Open(\"notes.txt\")\n"));
        assert!(source.contains("\t_, err = io.Copy(formField, fd)\n"));
        assert!(!rendered.imports.contains(&"path/filepath".to_string()));
    }

    #[test]
    fn test_basic_auth_after_headers() {
        let mut request = Request::new("http://x");
        request.headers.push("Accept", "*/*");
        request.auth = Some(Auth {
            user: Word::literal("u"),
            password: Word::literal("p"),
        });
        let source = GoRenderer.render(&request).unwrap().source;
        assert!(source.contains("\treq.Header.Set(\"Accept\", \"*/*\")\n\treq.SetBasicAuth(\"u\", \"p\")\n"));
    }
}
