//! assetpack - combine, minify and fingerprint js/css bundles.

use anyhow::Result;
use clap::{ColorChoice, Parser};

use assetpack::cli::{Cli, Commands};
use assetpack::{AttributeMap, BundleConfig, Bundler, RequestHeaders};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    assetpack::logger::set_verbose(cli.verbose);

    let config = BundleConfig::load(&cli.config)?;
    let minify_enabled = config.minify_for(&cli.environment);

    let mut bundler = Bundler::new(&config, minify_enabled, RequestHeaders::default());
    match &cli.command {
        Commands::Js { files } => bundler.javascript(files, AttributeMap::new())?,
        Commands::Css { files } => bundler.stylesheet(files, AttributeMap::new())?,
        Commands::JsDir { dir } => bundler.javascript_dir(dir, AttributeMap::new())?,
        Commands::CssDir { dir } => bundler.stylesheet_dir(dir, AttributeMap::new())?,
    };

    if cli.full_url {
        bundler.with_full_url();
    }
    if cli.only_url {
        bundler.only_url();
    }

    print!("{}", bundler.render());
    Ok(())
}
