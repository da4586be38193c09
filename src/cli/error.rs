use miette::Diagnostic;
use thiserror::Error;

/// Root error type for CLI operations
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    #[diagnostic(code(file_creator::json))]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Execute(#[from] crate::execute::ExecuteError),
}
