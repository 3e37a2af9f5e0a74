use thiserror::Error;

/// Failures fetching third-party content for the content commands.
#[derive(Error, Debug)]
pub enum ContentError {
    /// The HTTP request failed or returned an error status.
    #[error(transparent)]
    ReqwestErr(#[from] reqwest::Error),

    /// The response arrived but did not have the expected shape.
    #[error("Unexpected response from {source_name}: {reason}")]
    UnexpectedResponse { source_name: String, reason: String },
}
