//! The whole pipeline: command string in, source code out

use crate::codegen::{self, RenderedSource, TargetStyle};
use crate::curl;
use crate::errors::Result;
use crate::request::Request;
use crate::shell::{self, Token};
use crate::warnings::Warnings;

/// Result of converting one command
#[derive(Debug, Clone)]
pub struct Conversion {
    pub request: Request,
    pub source: RenderedSource,
    pub warnings: Warnings,
}

/// Convert a curl command into source code in `style`.
///
/// A leading `curl` word is optional.
pub fn convert(command: &str, style: TargetStyle) -> Result<Conversion> {
    let (request, warnings) = parse(command)?;
    let source = codegen::render(&request, style)?;
    Ok(Conversion {
        request,
        source,
        warnings,
    })
}

/// Parse a curl command into the request it makes
pub fn parse(command: &str) -> Result<(Request, Warnings)> {
    let tokens = shell::tokenize_all(command)?;
    let options = curl::resolve(strip_program(&tokens))?;
    let mut warnings = Warnings::new();
    let request = curl::build(&options, &mut warnings)?;
    Ok((request, warnings))
}

fn strip_program(tokens: &[Token]) -> &[Token] {
    match tokens.split_first() {
        Some((first, rest)) if first.word.eq_ignore_ascii_case("curl") => rest,
        _ => tokens,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CurlgenError;
    use crate::request::Body;

    #[test]
    fn test_program_name_is_optional() {
        let (with, _) = parse("curl http://x").unwrap();
        let (without, _) = parse("http://x").unwrap();
        assert_eq!(with, without);

        let (upper, _) = parse("CURL http://x").unwrap();
        assert_eq!(upper.url.to_string(), "http://x");
    }

    #[test]
    fn test_convert_chains_all_stages() {
        let conversion = convert("curl -s -d 'a=1' http://x", TargetStyle::Python).unwrap();
        assert!(matches!(conversion.request.body, Body::UrlEncoded(_)));
        assert!(conversion.source.source.contains("requests.post('http://x'"));
        assert_eq!(conversion.warnings.len(), 1);
    }

    #[test]
    fn test_errors_propagate() {
        assert!(matches!(convert("curl 'unterminated", TargetStyle::Go), Err(CurlgenError::Syntax { .. })));
        assert!(matches!(convert("curl", TargetStyle::Go), Err(CurlgenError::MissingUrl)));
        assert!(matches!(
            convert("curl -H \"A: $X\" http://x", TargetStyle::Http),
            Err(CurlgenError::UnsupportedFeature { .. })
        ));
    }
}
