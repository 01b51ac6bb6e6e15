use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::engine::path::PathStyle;
use crate::vars::VariableTable;

/// lbm - output path templating for build scripts
#[derive(Parser)]
#[command(name = "lbm")]
#[command(about = "Expand output path templates and canonicalize paths without touching the filesystem")]
#[command(version)]
pub struct Cli {
    /// Path convention to emit (unix or windows). Defaults to the config file, then the host.
    #[arg(long, global = true)]
    pub style: Option<PathStyle>,

    /// Path to an engine configuration file (JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log engine activity to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Expand a template against variables
    Interp {
        /// Template such as "{NAME}.{EXT}"
        template: String,
        /// Variable binding (repeatable)
        #[arg(short = 'D', long = "var", value_name = "NAME=VALUE", value_parser = parse_var)]
        vars: Vec<(String, String)>,
        /// JSON object file of variables; -D bindings override it
        #[arg(long)]
        vars_file: Option<PathBuf>,
    },
    /// Join a path onto a base directory and normalize it
    Canonicalize {
        /// Path to canonicalize
        path: String,
        /// Base directory for relative paths (default: current directory)
        #[arg(short, long)]
        base: Option<String>,
    },
    /// Resolve an output path template for a source file
    Resolve {
        /// Template such as "obj/{BASENAME}.o"
        template: String,
        /// Source file whose stem becomes BASENAME
        #[arg(short, long)]
        path: Option<String>,
        /// Root directory to canonicalize the result against
        #[arg(short, long)]
        root: Option<String>,
    },
}

fn parse_var(binding: &str) -> Result<(String, String), String> {
    VariableTable::parse_assignment(binding).map_err(|e| e.to_string())
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as clap::Parser>::parse()
    }
}
