use std::path::PathBuf;

/// Failures outside the parser proper.
///
/// Parsing a body never fails; these cover reading files, splitting
/// frontmatter and loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid frontmatter in {path}: {source}")]
    Frontmatter {
        path: String,
        source: serde_yaml::Error,
    },
    #[error("invalid parser config: {0}")]
    Config(#[from] serde_yaml::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
