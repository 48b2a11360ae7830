//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "jjaw-site", version, about = "Site configuration, color scheme and blog index for jjaw.cn")]
pub struct Cli {
    /// Site config file (.yml, .yaml or .json); the built-in site when omitted
    #[arg(long, short, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the validated site configuration
    Config {
        #[arg(long, value_enum, default_value_t = Format::Yaml)]
        format: Format,
    },
    /// Read or change the persisted color scheme
    Scheme(SchemeArgs),
    /// List articles sorted by last update
    Blog(BlogArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Json,
}

#[derive(Args, Debug)]
pub struct SchemeArgs {
    /// State file holding the preference
    #[arg(long, value_name = "FILE")]
    pub state: Option<PathBuf>,

    /// Ambient preference to resolve against
    #[arg(long, value_enum, default_value_t = Ambient::System)]
    pub ambient: Ambient,

    #[command(subcommand)]
    pub action: Option<SchemeAction>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ambient {
    System,
    Light,
    Dark,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemeAction {
    /// Show the current state (default)
    Get,
    /// Request a color scheme
    Set {
        #[arg(value_enum)]
        value: SchemeValue,
    },
    /// Flip the effective value
    Toggle,
}

/// What the user asks for. `auto` follows the ambient preference.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchemeValue {
    Auto,
    Light,
    Dark,
}

#[derive(Args, Debug)]
pub struct BlogArgs {
    /// Exported pages JSON file, or a directory of markdown sources
    #[arg(value_name = "PAGES")]
    pub pages: PathBuf,

    /// Site source directory the articles directory is resolved against.
    /// Defaults to the markdown directory, or the working directory for a
    /// pages JSON file
    #[arg(long, value_name = "DIR")]
    pub source: Option<PathBuf>,

    /// Only list articles with this tag
    #[arg(long, conflicts_with = "stars")]
    pub tag: Option<String>,

    /// Only list starred articles
    #[arg(long)]
    pub stars: bool,

    /// Print the listing as JSON
    #[arg(long)]
    pub json: bool,

    /// Maximum title width in terminal columns
    #[arg(long, default_value_t = 48)]
    pub width: usize,
}
