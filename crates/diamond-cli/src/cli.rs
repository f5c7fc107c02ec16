//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// diamond - Install and namespace stylesheet packages
#[derive(Parser, Debug)]
#[command(name = "diamond")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project root containing the `diamond/` directory
    #[arg(long, global = true, default_value = ".")]
    pub project: PathBuf,

    /// Package manager executable
    #[arg(long, global = true, env = "DIAMOND_NPM")]
    pub npm: Option<String>,

    /// Stylesheet compiler executable
    #[arg(long, global = true, env = "DIAMOND_SASS")]
    pub sass: Option<String>,

    /// How long to wait for another installer, in milliseconds (0 fails at once)
    #[arg(long, global = true)]
    pub lock_timeout_ms: Option<u64>,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Install one or more packages
    ///
    /// Examples:
    ///   diamond install widgets                 # Latest from the registry
    ///   diamond install @acme/grid@^2.0.0       # Scoped package with a range
    ///   diamond install scm:acme/widgets#v1.4   # GitHub shorthand at a tag
    ///   diamond install --from packages.json    # Descriptors from a file
    Install(InstallArgs),

    /// List installed packages
    List {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct InstallArgs {
    /// `name[@version]` or `scm:<url|user/repo>[#reference]`
    #[arg(required_unless_present = "from")]
    pub specs: Vec<String>,

    /// Destination under `diamond/packages` (single package only)
    #[arg(long)]
    pub path: Option<String>,

    /// Entry file relative to the package
    #[arg(long)]
    pub main: Option<String>,

    /// Package ships server-side functions
    #[arg(long)]
    pub functions: bool,

    /// Package ships a stylesheet importer
    #[arg(long)]
    pub importer: bool,

    /// Package runs a post-compile step
    #[arg(long)]
    pub post_compile: bool,

    /// Read package descriptors from a JSON array
    #[arg(long)]
    pub from: Option<PathBuf>,
}
