use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnalyzerError>;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to set language: {0}")]
    LanguageError(#[from] tree_sitter::LanguageError),

    #[error("Failed to parse {0}")]
    ParseError(String),

    #[error("Invalid source path: {0}")]
    InvalidPath(String),

    #[error("Invalid exclude pattern: {0}")]
    InvalidPattern(#[from] globset::Error),
}
