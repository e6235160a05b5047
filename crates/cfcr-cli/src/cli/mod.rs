use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{ColorMode, GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `cfcr` binary.
#[derive(Debug, Parser)]
#[command(name = "cfcr", version, about = "Browse and book gym classes")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "table")]
    pub format: OutputFormat,

    /// Color table output: auto, always, never
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorMode,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            color: self.color,
            quiet: self.quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use pretty_assertions::assert_eq;

    use super::{Cli, ColorMode, Commands, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn table_is_the_default_format() {
        let cli = Cli::try_parse_from(["cfcr", "locations"]).expect("cli should parse");
        assert_eq!(cli.format, OutputFormat::Table);
        assert_eq!(cli.color, ColorMode::Auto);
        assert!(matches!(cli.command, Commands::Locations));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["cfcr", "booked", "--format", "json", "--quiet"])
            .expect("cli should parse");
        let flags = cli.global_flags();
        assert_eq!(flags.format, OutputFormat::Json);
        assert!(flags.quiet);
    }

    #[test]
    fn sessions_accepts_repeated_locations() {
        let cli = Cli::try_parse_from([
            "cfcr",
            "sessions",
            "-L",
            "City Road",
            "--location",
            "Annex",
            "--unbooked",
        ])
        .expect("cli should parse");
        let Commands::Sessions(args) = cli.command else {
            panic!("expected sessions command");
        };
        assert_eq!(args.locations, vec!["City Road", "Annex"]);
        assert!(args.unbooked);
    }

    #[test]
    fn book_requires_at_least_one_id() {
        assert!(Cli::try_parse_from(["cfcr", "book"]).is_err());

        let cli = Cli::try_parse_from(["cfcr", "book", "31001", "31002", "--dry-run"])
            .expect("cli should parse");
        let Commands::Book(args) = cli.command else {
            panic!("expected book command");
        };
        assert_eq!(args.ids, vec!["31001", "31002"]);
        assert!(args.dry_run);
    }

    #[test]
    fn color_mode_rejects_invalid_value() {
        assert!(Cli::try_parse_from(["cfcr", "--color", "sometimes", "locations"]).is_err());
    }
}
