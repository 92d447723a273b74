use thiserror::Error;

pub type Result<T> = std::result::Result<T, ValidatorError>;

#[derive(Error, Debug)]
pub enum ValidatorError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Analyzer error: {0}")]
    AnalyzerError(#[from] graphdoc_analyzer::AnalyzerError),

    #[error("Graph validation failed: dependency found but not documented. See errors above.")]
    ValidationFailed { errors: Vec<String> },
}
