use thiserror::Error;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("renderer process failed: {0}")]
    Engine(String),

    #[error("renderer produced invalid output: {0}")]
    InvalidOutput(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
