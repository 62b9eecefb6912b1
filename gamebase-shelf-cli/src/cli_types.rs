//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "gamebase-shelf")]
#[command(about = "Sort GameBase game archives into folders by their VERSION.NFO metadata", long_about = None)]
pub(crate) struct Cli {
    /// Only show warnings and errors (suppress normal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Language filter flags shared by `organize` and `scan`.
#[derive(Args, Clone, Copy, Default)]
pub(crate) struct LanguageArgs {
    /// Only keep games whose language includes English
    #[arg(long)]
    pub english_only: bool,

    /// With --english-only, also keep games marked "(No Text)"
    #[arg(long)]
    pub include_no_text: bool,
}

#[derive(Args, Clone)]
pub(crate) struct OrganizeArgs {
    /// Folder containing the game archives (searched recursively)
    pub source: PathBuf,

    /// Folder the organized games are placed in
    pub destination: PathBuf,

    /// Destination template, e.g. "{primary_genre}/{publisher}/{name}"
    #[arg(short, long)]
    pub template: Option<String>,

    /// Move instead of copy (the source archive is removed)
    #[arg(long = "move")]
    pub move_files: bool,

    #[command(flatten)]
    pub language: LanguageArgs,

    /// Cut publisher names at the first '/' or '\'
    #[arg(long)]
    pub collapse_publishers: bool,

    /// Place the original .zip instead of extracting it
    #[arg(long)]
    pub keep_zipped: bool,

    /// Show where each game would go without touching anything
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Maximum number of archives to process
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Don't write organization_log.txt into the destination
    #[arg(long)]
    pub no_log: bool,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Extract archives and file them under the destination by metadata
    Organize(OrganizeArgs),

    /// List the metadata of every archive without organizing
    Scan {
        /// Folder containing the game archives
        source: PathBuf,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        language: LanguageArgs,

        /// Maximum number of archives to read
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// List the placeholders a template may use
    Fields,

    /// Manage saved defaults
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show the saved settings
    Show,

    /// Print the settings file path
    Path,

    /// Save a default destination template
    SetTemplate {
        /// Template to save; every placeholder is checked first
        template: String,
    },

    /// Restore the built-in defaults
    Reset,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_organize_flags() {
        let cli = Cli::parse_from([
            "gamebase-shelf",
            "organize",
            "in",
            "out",
            "--move",
            "--english-only",
            "-n",
            "--limit",
            "3",
        ]);
        let Commands::Organize(args) = cli.command else {
            panic!("expected organize");
        };
        assert_eq!(args.source, PathBuf::from("in"));
        assert!(args.move_files);
        assert!(args.language.english_only);
        assert!(!args.language.include_no_text);
        assert!(args.dry_run);
        assert_eq!(args.limit, Some(3));
        assert!(args.template.is_none());
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["gamebase-shelf", "-q", "-v", "fields"]);
        assert!(result.is_err());
    }
}
