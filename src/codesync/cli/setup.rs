use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "codesync", bin_name = "codesync", version)]
#[command(
    about = "Sync editor settings, keybindings, locale and extensions across machines",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Comment out sync regions and upload the local configuration
    #[command(alias = "up", display_order = 1)]
    Upload,

    /// Download the remote configuration and apply matching sync regions
    #[command(alias = "down", display_order = 2)]
    Download,

    /// Compare the local configuration with the remote snapshot
    #[command(alias = "st", display_order = 3)]
    Status,

    /// Show how one file would look after upload or download
    #[command(display_order = 4)]
    Preview {
        /// settings, keybindings or locale
        file: String,

        /// Resolve the remote copy for this machine instead of annotating the local one
        #[arg(short, long)]
        download: bool,
    },

    /// Get or set configuration values
    #[command(display_order = 10)]
    Config {
        /// Configuration key (e.g. filename, remote-dir)
        key: Option<String>,

        /// Value to set
        value: Option<String>,
    },

    /// Show local file locations and the remote directory
    #[command(display_order = 11)]
    Paths,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_preview_with_flag_after_file() {
        let cli = Cli::parse_from(["codesync", "preview", "settings", "--download"]);
        match cli.command {
            Commands::Preview { file, download } => {
                assert_eq!(file, "settings");
                assert!(download);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn verbose_is_global() {
        let cli = Cli::parse_from(["codesync", "status", "-v"]);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Status));
    }

    #[test]
    fn config_key_and_value_are_optional() {
        let cli = Cli::parse_from(["codesync", "config", "filename"]);
        match cli.command {
            Commands::Config { key, value } => {
                assert_eq!(key.as_deref(), Some("filename"));
                assert!(value.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
