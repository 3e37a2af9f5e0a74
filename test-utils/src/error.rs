use thiserror::Error;

/// Errors that can occur while preparing a test environment.
#[derive(Error, Debug)]
pub enum TestError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
