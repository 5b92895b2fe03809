use clap::{Parser, ValueEnum};
use std::fmt;
use std::path::PathBuf;

// ── Enums ──────────────────────────────────────────────────────────────────────

/// A block of the stats report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum)]
pub enum Section {
    /// NC, GLG, HCL, ACL and MDL per player.
    Player,
    /// Cause-of-death breakdown and dead-to-living ratio.
    Death,
    /// Survival rate per class.
    Class,
}

impl Section {
    /// Every section in report order.
    pub const ALL: [Section; 3] = [Section::Player, Section::Death, Section::Class];
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Section::Player => "player",
            Section::Death => "death",
            Section::Class => "class",
        };
        f.write_str(name)
    }
}

/// How the report is written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Titled console tables.
    #[default]
    Text,
    /// Pretty-printed JSON document.
    Json,
}

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Generate stats reports for the GNK-HXC challenge
#[derive(Parser, Debug, Clone)]
#[command(
    name = "hxc-stats",
    about = "Generate stats reports for the GNK-HXC challenge",
    version
)]
pub struct Settings {
    /// CSV file in the GNK-HXC roster format
    pub input: Option<PathBuf>,

    /// Only print the given report sections (repeatable)
    #[arg(long = "only", value_enum)]
    pub sections: Vec<Section>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Logging level
    #[arg(long, default_value = "WARNING", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    /// Parse an explicit argument list and apply the `--debug` override.
    pub fn from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::resolve(Settings::parse_from(args))
    }

    /// Parse the process arguments.
    pub fn load() -> Self {
        Self::from_args(std::env::args_os())
    }

    /// Sections to render, deduplicated and in report order.
    pub fn selected_sections(&self) -> Vec<Section> {
        if self.sections.is_empty() {
            return Section::ALL.to_vec();
        }
        let mut sections = self.sections.clone();
        sections.sort();
        sections.dedup();
        sections
    }

    fn resolve(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
