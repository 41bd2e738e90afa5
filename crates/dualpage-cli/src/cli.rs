use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use dualpage_dom::ElementScope;

#[derive(Parser)]
#[command(
    name = "dualpage",
    about = "Merge the legacy and modern builds of a page into one index.html",
    version,
)]
pub struct Cli {
    /// Defaults to `merge`.
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub overrides: ConfigArgs,

    /// Echo the composite document
    #[arg(long, global = true)]
    pub print: bool,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum ScopeArg {
    /// Direct children of <body>
    Children,
    /// Every element inside <body>
    Descendants,
}

impl From<ScopeArg> for ElementScope {
    fn from(scope: ScopeArg) -> Self {
        match scope {
            ScopeArg::Children => ElementScope::Children,
            ScopeArg::Descendants => ElementScope::Descendants,
        }
    }
}

/// Flags that override the config file.
#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
    /// Directory holding the build output
    #[arg(long, global = true)]
    pub static_dir: Option<PathBuf>,
    /// Legacy document, relative to the static dir
    #[arg(long, global = true)]
    pub legacy: Option<PathBuf>,
    /// Modern document, relative to the static dir
    #[arg(long, global = true)]
    pub modern: Option<PathBuf>,
    /// Composite document, relative to the static dir
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,
    /// Which body elements are merged
    #[arg(long, global = true)]
    pub scope: Option<ScopeArg>,
    /// Leave the input documents on disk
    #[arg(long, global = true)]
    pub keep_inputs: bool,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Merge both documents, write the output and remove the inputs
    Merge,
    /// Show what a merge would produce without writing anything
    Inspect,
}
