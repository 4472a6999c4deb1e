//! Shared argument types for CLI commands.

use clap::Args;
use mdcontent::ParserConfig;
use std::path::PathBuf;

#[derive(Args, Clone)]
pub struct ParseArgs {
    /// Path of the content file (frontmatter plus markdown body)
    pub file: PathBuf,

    /// Output file to write the result to
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// YAML file overriding the image roles and icon libraries
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print JSON on a single line
    #[arg(long)]
    pub compact: bool,
}

impl ParseArgs {
    pub fn parser_config(&self) -> mdcontent::Result<ParserConfig> {
        match &self.config {
            Some(path) => ParserConfig::from_path(path),
            None => Ok(ParserConfig::default()),
        }
    }
}

#[derive(Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
    Summary,
}
