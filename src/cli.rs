use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;

const FALLBACK_PROGRAM_NAME: &str = "team-report";

#[derive(Parser)]
#[command(name = "team-report")]
#[command(about = "Fetch teams from the reporting endpoint and write a volunteer count report", version)]
#[command(after_help = "EXAMPLES:
    team-report /etc/team-report/config.toml
    team-report ./config.json")]
pub struct Cli {
    /// Path to the configuration file (TOML, or JSON with a .json extension)
    pub config_file: Option<PathBuf>,

    /// Anything after the config path is accepted and ignored
    #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub ignored: Vec<String>,
}

/// File name of the running executable.
pub fn program_name() -> String {
    std::env::current_exe()
        .ok()
        .and_then(|path| path.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| FALLBACK_PROGRAM_NAME.to_string())
}

pub fn write_usage<W: Write>(out: &mut W, program: &str) -> io::Result<()> {
    writeln!(out, "Config file parameter missing")?;
    writeln!(out, "Usage: {program} config_file")?;
    writeln!(out, "config_file - path to config file")?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config_path() {
        let cli = Cli::try_parse_from(["team-report", "config.toml"]).unwrap();
        assert_eq!(cli.config_file, Some(PathBuf::from("config.toml")));
    }

    #[test]
    fn test_parse_without_argument() {
        let cli = Cli::try_parse_from(["team-report"]).unwrap();
        assert!(cli.config_file.is_none());
    }

    #[test]
    fn test_ignores_extra_arguments() {
        let cli = Cli::try_parse_from(["team-report", "a.toml", "b.toml", "--verbose"]).unwrap();
        assert_eq!(cli.config_file, Some(PathBuf::from("a.toml")));
        assert_eq!(cli.ignored, ["b.toml", "--verbose"]);
    }

    #[test]
    fn test_usage_text() {
        let mut out = Vec::new();
        write_usage(&mut out, "team-report").unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Config file parameter missing\nUsage: team-report config_file\nconfig_file - path to config file\n\n"
        );
    }
}
