//! Command line parsing shared by both front ends.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cli {
    /// Binding file to open directly.
    pub file: Option<PathBuf>,
    pub mappings: Option<PathBuf>,
    pub dir: Option<PathBuf>,
    pub filter: Option<String>,
    pub show_unbound: bool,
    pub config: Option<PathBuf>,
    pub no_update_check: bool,
    /// Non-interactive export target (terminal front end only).
    pub output: Option<PathBuf>,
    pub help: bool,
    pub version: bool,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CliError {
    #[error("{0} requires a value")]
    MissingValue(String),

    #[error("Unknown option: {0}")]
    UnknownOption(String),

    #[error("Unexpected argument: {0}")]
    UnexpectedArgument(String),
}

/// Parse `args` (without the program name).
///
/// `allow_output` enables `-o/--output`.
pub fn parse_args<I>(args: I, allow_output: bool) -> Result<Cli, CliError>
where
    I: IntoIterator<Item = String>,
{
    let mut cli = Cli::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        let mut value = |flag: &str| {
            args.next()
                .ok_or_else(|| CliError::MissingValue(flag.to_string()))
        };
        match arg.as_str() {
            "-h" | "--help" => cli.help = true,
            "-V" | "--version" => cli.version = true,
            "-u" | "--show-unbound" => cli.show_unbound = true,
            "--no-update-check" => cli.no_update_check = true,
            "-m" | "--mappings" => cli.mappings = Some(PathBuf::from(value("--mappings")?)),
            "-d" | "--dir" => cli.dir = Some(PathBuf::from(value("--dir")?)),
            "-f" | "--filter" => cli.filter = Some(value("--filter")?),
            "--config" => cli.config = Some(PathBuf::from(value("--config")?)),
            "-o" | "--output" if allow_output => {
                cli.output = Some(PathBuf::from(value("--output")?))
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::UnknownOption(other.to_string()));
            }
            _ => {
                if cli.file.is_some() {
                    return Err(CliError::UnexpectedArgument(arg));
                }
                cli.file = Some(PathBuf::from(arg));
            }
        }
    }
    Ok(cli)
}

pub fn usage(program: &str, allow_output: bool) -> String {
    let mut lines = vec![
        format!("Usage: {} [OPTIONS] [FILE]", program),
        String::new(),
        "Arguments:".to_string(),
        "  [FILE]                    Binding file to open (.binds or .xml)".to_string(),
        String::new(),
        "Options:".to_string(),
        "  -m, --mappings <FILE>     Mapping table (default: mappings.edbv)".to_string(),
        "  -d, --dir <DIR>           Bindings directory to scan".to_string(),
        "  -f, --filter <TEXT>       Initial filter text".to_string(),
        "  -u, --show-unbound        Highlight controls with no input assigned".to_string(),
    ];
    if allow_output {
        lines.push(
            "  -o, --output <FILE>       Export rows to .csv or .md (non-interactive)".to_string(),
        );
    }
    lines.extend(
        [
            "  --config <FILE>           Settings file (default: config.toml in config dir)",
            "  --no-update-check         Skip the background release check",
            "  -h, --help                Print help",
            "  -V, --version             Print version",
        ]
        .into_iter()
        .map(str::to_string),
    );
    lines.join("\n")
}
