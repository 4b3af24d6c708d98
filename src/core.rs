use clap::Parser;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::cli::Args;
use crate::codegen::TargetStyle;
use crate::config::Config;
use crate::convert::{convert, Conversion};
use crate::errors::{CurlgenError, Result};
use crate::logging;
use crate::status::ExitStatus;

/// Style used when neither -l nor the config file picks one
pub const DEFAULT_STYLE: TargetStyle = TargetStyle::Python;

/// One curl command to convert and where it came from
#[derive(Debug, Clone)]
struct Input {
    name: String,
    /// File the command was read from
    path: Option<PathBuf>,
    command: String,
}

/// Main entry point for the CLI.
///
/// Handles argument parsing, configuration loading, and converts every input
/// independently. One failed input never stops the others.
pub fn run(args: Vec<String>) -> ExitStatus {
    let (config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };

    let (merged_args, ignored) = merge_default_options(args, &config);

    let parsed = match Args::try_parse_from(&merged_args) {
        Ok(args) => args,
        Err(e) => {
            e.print().ok();
            return if e.kind() == clap::error::ErrorKind::DisplayHelp
                || e.kind() == clap::error::ErrorKind::DisplayVersion
            {
                ExitStatus::Success
            } else {
                ExitStatus::Error
            };
        }
    };

    let log_format = parsed.log_format.or(config.log_format).unwrap_or_default();
    logging::init(parsed.log_level(), log_format);

    if let Some(e) = config_error {
        warn!(dir = %config.config_dir.display(), "Failed to load config: {}", e);
    }
    if let Some(reason) = ignored {
        warn!(
            options = ?config.default_options,
            "Ignoring default options from config: {}", reason
        );
    }

    if parsed.list_styles {
        for style in TargetStyle::ALL {
            println!("{}\t.{}", style, style.extension());
        }
        return ExitStatus::Success;
    }

    let style = parsed.style.or(config.style).unwrap_or(DEFAULT_STYLE);
    debug!(%style, "Target style selected");

    let mut failures = 0;
    let inputs = match collect_inputs(&parsed) {
        Ok(inputs) => inputs,
        Err(e) => {
            eprintln!("curlgen: {}", e);
            return ExitStatus::Error;
        }
    };
    let batch = inputs.len() > 1;

    let mut outputs = Vec::new();
    for input in inputs {
        let command = match input {
            Ok(input) => input,
            Err((name, e)) => {
                eprintln!("curlgen: {}: {}", name, e);
                failures += 1;
                continue;
            }
        };

        match convert(&command.command, style) {
            Ok(conversion) => {
                for warning in &conversion.warnings {
                    warn!(input = %command.name, "{}", warning);
                }
                info!(
                    input = %command.name,
                    method = %conversion.request.method(),
                    env_refs = conversion.request.env_refs.len(),
                    "Converted"
                );
                outputs.push((command, conversion));
            }
            Err(e) => {
                if batch {
                    eprintln!("curlgen: {}: {}", command.name, e);
                } else {
                    eprintln!("curlgen: {}", e);
                }
                failures += 1;
            }
        }
    }

    if let Err(e) = write_outputs(&parsed, style, &outputs, batch) {
        eprintln!("curlgen: {}", e);
        failures += 1;
    }

    ExitStatus::from_failures(failures)
}

/// Prepend the config file's default options to the command line.
///
/// The defaults are parsed on their own first and are only used when they
/// form a valid option list that names no input files. Options from the
/// command line override them. Returns the reason when they were ignored.
fn merge_default_options(args: Vec<String>, config: &Config) -> (Vec<String>, Option<String>) {
    let defaults = &config.default_options;
    if defaults.is_empty() {
        return (args, None);
    }

    match Args::try_parse_from(std::iter::once("curlgen").chain(defaults.iter().map(String::as_str))) {
        Ok(parsed) if !parsed.files.is_empty() => {
            return (args, Some("default options must not name input files".to_string()));
        }
        Ok(_) => {}
        Err(e) => {
            let reason = e.kind().as_str().unwrap_or("invalid options");
            return (args, Some(reason.to_string()));
        }
    }

    let mut merged = Vec::with_capacity(args.len() + defaults.len());
    let mut args = args.into_iter();
    if let Some(program) = args.next() {
        merged.push(program);
    }
    merged.extend(defaults.iter().cloned());
    merged.extend(args);

    (merged, None)
}

type InputResult = std::result::Result<Input, (String, CurlgenError)>;

fn collect_inputs(args: &Args) -> Result<Vec<InputResult>> {
    if let Some(command) = &args.command {
        return Ok(vec![Ok(Input {
            name: "<command>".to_string(),
            path: None,
            command: command.clone(),
        })]);
    }

    if args.files.is_empty() {
        let mut command = String::new();
        std::io::stdin().read_to_string(&mut command)?;
        return Ok(vec![Ok(Input {
            name: "<stdin>".to_string(),
            path: None,
            command,
        })]);
    }

    Ok(args
        .files
        .iter()
        .map(|path| {
            let name = path.display().to_string();
            match std::fs::read_to_string(path) {
                Ok(command) => Ok(Input {
                    name,
                    path: Some(path.clone()),
                    command,
                }),
                Err(e) => Err((name, CurlgenError::Io(e))),
            }
        })
        .collect())
}

/// The text to emit for one conversion: the source, or its dependencies
fn output_text(args: &Args, conversion: &Conversion) -> String {
    if args.deps {
        let mut text = String::new();
        for dependency in &conversion.source.dependencies {
            text.push_str(dependency);
            text.push('\n');
        }
        text
    } else {
        conversion.source.source.clone()
    }
}

fn write_outputs(
    args: &Args,
    style: TargetStyle,
    outputs: &[(Input, Conversion)],
    batch: bool,
) -> Result<()> {
    match &args.output {
        None => {
            let stdout = std::io::stdout();
            let mut stdout = stdout.lock();
            for (i, (_, conversion)) in outputs.iter().enumerate() {
                if i > 0 && !args.deps {
                    writeln!(stdout)?;
                }
                stdout.write_all(output_text(args, conversion).as_bytes())?;
            }
            stdout.flush()?;
        }
        Some(path) if !batch => {
            if let Some((_, conversion)) = outputs.first() {
                std::fs::write(path, output_text(args, conversion))?;
                info!(path = %path.display(), "Wrote output");
            }
        }
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            for (input, conversion) in outputs {
                let path = dir.join(output_name(input, style, args.deps));
                std::fs::write(&path, output_text(args, conversion))?;
                info!(path = %path.display(), "Wrote output");
            }
        }
    }
    Ok(())
}

/// `<stem>.<ext>` for an input file, or `<stem>.deps` with --deps
fn output_name(input: &Input, style: TargetStyle, deps: bool) -> String {
    let stem = input
        .path
        .as_deref()
        .and_then(Path::file_stem)
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "output".to_string());
    let extension = if deps { "deps" } else { style.extension() };
    format!("{}.{}", stem, extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(options: &[&str]) -> Config {
        Config {
            default_options: options.iter().map(|s| s.to_string()).collect(),
            ..Config::default()
        }
    }

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_merge_default_options() {
        let args = argv(&["curlgen", "-c", "curl x"]);
        let (merged, ignored) = merge_default_options(args, &config_with(&["-v", "-l", "go"]));
        assert_eq!(merged, argv(&["curlgen", "-v", "-l", "go", "-c", "curl x"]));
        assert_eq!(ignored, None);
    }

    #[test]
    fn test_default_option_keeps_its_value() {
        let args = argv(&["curlgen", "a.sh"]);
        let (merged, ignored) = merge_default_options(args, &config_with(&["-o", "out.py"]));
        assert_eq!(merged, argv(&["curlgen", "-o", "out.py", "a.sh"]));
        assert_eq!(ignored, None);

        let parsed = Args::try_parse_from(&merged).unwrap();
        assert_eq!(parsed.output, Some(PathBuf::from("out.py")));
        assert_eq!(parsed.files, vec![PathBuf::from("a.sh")]);
    }

    #[test]
    fn test_command_line_overrides_defaults() {
        let args = argv(&["curlgen", "-l", "rust", "a.sh"]);
        let (merged, _) = merge_default_options(args, &config_with(&["-l", "go"]));
        let parsed = Args::try_parse_from(&merged).unwrap();
        assert_eq!(parsed.style, Some(TargetStyle::Rust));
    }

    #[test]
    fn test_invalid_defaults_are_ignored() {
        let args = argv(&["curlgen", "a.sh"]);
        for defaults in [&["stray"][..], &["-l"], &["--no-such-flag"], &["-l", "cobol"]] {
            let (merged, ignored) = merge_default_options(args.clone(), &config_with(defaults));
            assert_eq!(merged, args, "{:?}", defaults);
            assert!(ignored.is_some(), "{:?}", defaults);
        }
    }

    #[test]
    fn test_merge_without_defaults() {
        let args = argv(&["curlgen"]);
        let (merged, ignored) = merge_default_options(args.clone(), &config_with(&[]));
        assert_eq!(merged, args);
        assert_eq!(ignored, None);
    }

    #[test]
    fn test_output_name() {
        let input = Input {
            name: "cmds/get_users.sh".to_string(),
            path: Some(PathBuf::from("cmds/get_users.sh")),
            command: String::new(),
        };
        assert_eq!(output_name(&input, TargetStyle::Go, false), "get_users.go");
        assert_eq!(output_name(&input, TargetStyle::Python, true), "get_users.deps");
    }
}
