use thiserror::Error;

/// Failures of a single request to the NFT ownership API.
#[derive(Error, Debug)]
pub enum OwnershipError {
    /// The request could not be sent or the body could not be read.
    #[error("Ownership API request to {url} failed: {source}")]
    Request {
        /// Endpoint that was requested
        url: String,
        /// The underlying transport error
        #[source]
        source: reqwest::Error,
    },

    /// The API answered with a non-success status code.
    #[error("Ownership API returned status {status} for {url}")]
    Status {
        /// Endpoint that was requested
        url: String,
        /// HTTP status returned
        status: u16,
    },

    /// The endpoint URL could not be built from the configured base URL.
    #[error("Invalid ownership API url: {0}")]
    Url(#[from] url::ParseError),
}
