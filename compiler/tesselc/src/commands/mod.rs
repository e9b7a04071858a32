//! CLI commands.
//!
//! Every command reads a schema file, reports problems on stderr and exits
//! with status 1 on failure, so `main` never has to inspect a result.

use std::path::PathBuf;

use tessel_diagnostic::GenerationFailed;
use tessel_gen::{generate_schema, GeneratedUnit, GeneratorConfig};
use tessel_ir::{load_schema, LoadedSchema};

/// Options shared by `generate`, `check` and `plan`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    pub schema: Option<PathBuf>,
    /// Write here instead of stdout.
    pub output: Option<PathBuf>,
    pub config: GeneratorConfig,
}

/// A command-line problem, reported before any work starts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UsageError(pub String);

impl std::fmt::Display for UsageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parse the arguments following the command name.
pub fn parse_options(args: &[String]) -> Result<GenerateOptions, UsageError> {
    let mut options = GenerateOptions::default();
    let mut i = 0;
    while i < args.len() {
        let arg = &args[i];
        if arg == "-o" {
            let Some(path) = args.get(i + 1) else {
                return Err(UsageError("-o needs a path".to_string()));
            };
            options.output = Some(PathBuf::from(path));
            i += 2;
            continue;
        }
        if let Some(tag) = arg.strip_prefix("--tag=") {
            if tag.is_empty() {
                return Err(UsageError("--tag must not be empty".to_string()));
            }
            options.config.tag_member = tag.to_string();
        } else if let Some(suffix) = arg.strip_prefix("--suffix=") {
            options.config.codec_suffix = suffix.to_string();
        } else if let Some(prefix) = arg.strip_prefix("--strip-prefix=") {
            options.config.strip_member_prefix =
                (!prefix.is_empty()).then(|| prefix.to_string());
        } else if let Some(limit) = arg.strip_prefix("--error-limit=") {
            options.config.error_limit = limit
                .parse()
                .map_err(|_| UsageError(format!("invalid error limit '{limit}'")))?;
        } else if arg.starts_with('-') {
            return Err(UsageError(format!("unknown option '{arg}'")));
        } else if options.schema.is_none() {
            options.schema = Some(PathBuf::from(arg));
        } else {
            return Err(UsageError(format!("unexpected argument '{arg}'")));
        }
        i += 1;
    }
    Ok(options)
}

/// Parse options or exit with a usage message.
fn options_or_exit(command: &str, args: &[String]) -> (PathBuf, GenerateOptions) {
    match parse_options(args) {
        Ok(mut options) => match options.schema.take() {
            Some(schema) => (schema, options),
            None => {
                eprintln!("Usage: tessel {command} <schema.json> [options]");
                std::process::exit(1);
            }
        },
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

/// Read a file, exiting with a message on failure.
fn read_file(path: &std::path::Path) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            let shown = path.display();
            let msg = match e.kind() {
                std::io::ErrorKind::NotFound => format!("cannot find file '{shown}'"),
                std::io::ErrorKind::PermissionDenied => {
                    format!("permission denied reading '{shown}'")
                }
                std::io::ErrorKind::InvalidData => {
                    format!("'{shown}' contains invalid UTF-8 data")
                }
                _ => format!("error reading '{shown}': {e}"),
            };
            eprintln!("{msg}");
            std::process::exit(1);
        }
    }
}

fn load_or_exit(path: &std::path::Path) -> LoadedSchema {
    tracing::debug!(path = %path.display(), "loading schema");
    let source = read_file(path);
    match load_schema(&source) {
        Ok(schema) => schema,
        Err(err) => {
            eprintln!("error: {}: {err}", path.display());
            std::process::exit(1);
        }
    }
}

fn report_failure(failed: &GenerationFailed) -> ! {
    eprintln!("{}", failed.render());
    std::process::exit(1);
}

fn generate_or_exit(schema: &LoadedSchema, config: GeneratorConfig) -> GeneratedUnit {
    generate_schema(schema, config).unwrap_or_else(|failed| report_failure(&failed))
}

fn write_output(output: Option<&PathBuf>, text: &str) {
    match output {
        Some(path) => {
            if let Err(e) = std::fs::write(path, text) {
                eprintln!("error writing '{}': {e}", path.display());
                std::process::exit(1);
            }
        }
        None => print!("{text}"),
    }
}

/// `tessel generate`: emit Rust source for every codec.
pub fn generate_file(args: &[String]) {
    let (path, options) = options_or_exit("generate", args);
    let schema = load_or_exit(&path);
    let unit = generate_or_exit(&schema, options.config);
    write_output(options.output.as_ref(), unit.source());
    if options.output.is_some() {
        eprintln!("generated {} codecs", unit.len());
    }
}

/// `tessel check`: run the walk and report diagnostics without emitting.
pub fn check_file(args: &[String]) {
    let (path, options) = options_or_exit("check", args);
    let schema = load_or_exit(&path);
    let unit = generate_or_exit(&schema, options.config);
    for (type_name, identity) in &unit.identities {
        println!("{type_name} -> {identity}");
    }
    println!("ok: {} codecs", unit.len());
}

/// `tessel plan`: print the codec plans as JSON.
pub fn plan_file(args: &[String]) {
    let (path, options) = options_or_exit("plan", args);
    let schema = load_or_exit(&path);
    let unit = generate_or_exit(&schema, options.config);
    match unit.plans_json() {
        Ok(mut json) => {
            json.push('\n');
            write_output(options.output.as_ref(), &json);
        }
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}
