use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// schooladmin - onboard schools and their administrators
#[derive(Parser, Debug)]
#[command(name = "schooladmin")]
#[command(about = "Create schools and their administrators against the platform backend")]
#[command(version)]
pub struct Cli {
    /// Client configuration file (JSON)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend base URL, overrides the config file
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Bearer token for the backend
    #[arg(long, global = true, env = "SCHOOLADMIN_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Dry-run mode: log what would be sent and answer with canned data.
    ///
    /// Nothing is sent to the backend. Identifiers returned in this mode are
    /// synthetic (`dry-run-N`).
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Log file for the interactive UI (defaults to the temp directory)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the interactive school-creation wizard
    Wizard {
        /// Pre-fill the wizard from a draft file
        #[arg(short, long)]
        draft: Option<PathBuf>,
    },
    /// Create a school and its administrator from a draft file, without the UI
    ///
    /// Exit status: 0 created, 2 school created but administrator failed,
    /// 1 nothing created or invalid input.
    Create {
        /// Draft file with `school` and `admin` sections
        #[arg(short, long)]
        draft: PathBuf,
    },
    /// Validate a draft file
    Validate {
        /// Path to the draft file to validate
        draft: PathBuf,
    },
    /// Print subscription plans and countries
    Catalog,
    /// Print the schools listing
    Schools,
    /// Configuration file helpers
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Write a default configuration file
    Init {
        /// Where to write the file
        path: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as clap::Parser>::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_no_args() {
        // Running with no args should succeed (defaults to the wizard)
        let cli = Cli::try_parse_from(["schooladmin"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.dry_run);
    }

    #[test]
    fn test_cli_wizard_with_draft() {
        let cli = Cli::try_parse_from(["schooladmin", "wizard", "--draft", "/tmp/d.json"]).unwrap();
        match cli.command {
            Some(Commands::Wizard { draft }) => {
                assert_eq!(draft.unwrap().to_str().unwrap(), "/tmp/d.json");
            }
            _ => panic!("Expected Wizard command"),
        }
    }

    #[test]
    fn test_cli_create_requires_draft() {
        assert!(Cli::try_parse_from(["schooladmin", "create"]).is_err());
        let cli = Cli::try_parse_from(["schooladmin", "create", "-d", "school.json"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Create { .. })));
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "schooladmin",
            "schools",
            "--api-url",
            "https://api.example.org",
            "--token",
            "abc",
            "--dry-run",
        ])
        .unwrap();
        assert_eq!(cli.api_url.as_deref(), Some("https://api.example.org"));
        assert_eq!(cli.token.as_deref(), Some("abc"));
        assert!(cli.dry_run);
        assert!(matches!(cli.command, Some(Commands::Schools)));
    }

    #[test]
    fn test_cli_validate_command() {
        let cli = Cli::try_parse_from(["schooladmin", "validate", "/path/to/draft.json"]).unwrap();
        match cli.command {
            Some(Commands::Validate { draft }) => {
                assert_eq!(draft.to_str().unwrap(), "/path/to/draft.json");
            }
            _ => panic!("Expected Validate command"),
        }
    }

    #[test]
    fn test_cli_config_init() {
        let cli = Cli::try_parse_from(["schooladmin", "config", "init", "cfg.json", "--force"])
            .unwrap();
        match cli.command {
            Some(Commands::Config {
                action: ConfigCommands::Init { path, force },
            }) => {
                assert_eq!(path.to_str().unwrap(), "cfg.json");
                assert!(force);
            }
            _ => panic!("Expected Config Init command"),
        }
    }
}
