//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// assetpack bundle CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: assetpack.toml)
    #[arg(short = 'C', long, default_value = "assetpack.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Environment name, checked against ignore_environments
    #[arg(short, long, default_value = "production")]
    pub environment: String,

    /// Prefix the configured base_url on the rendered URL
    #[arg(long, global = true)]
    pub full_url: bool,

    /// Print the artifact URL instead of markup
    #[arg(long, global = true)]
    pub only_url: bool,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Bundle JavaScript files into one minified artifact
    Js {
        /// Source files (public-root-relative paths or URLs), in order
        #[arg(value_name = "FILE", required = true)]
        files: Vec<String>,
    },

    /// Bundle stylesheet files into one minified artifact
    Css {
        /// Source files (public-root-relative paths or URLs), in order
        #[arg(value_name = "FILE", required = true)]
        files: Vec<String>,
    },

    /// Bundle every .js file under a directory
    JsDir {
        /// Directory relative to the public root
        #[arg(value_hint = clap::ValueHint::DirPath)]
        dir: String,
    },

    /// Bundle every .css file under a directory
    CssDir {
        /// Directory relative to the public root
        #[arg(value_hint = clap::ValueHint::DirPath)]
        dir: String,
    },
}
