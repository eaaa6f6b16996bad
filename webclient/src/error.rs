pub use reqwest::StatusCode;
use url::Url;

pub type Result<T> = ::std::result::Result<T, Error>;

/// Any failure of a call to the credentials service.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to parse as URL '{url}'")]
    InvalidSyntaxUrl {
        url: String,

        #[source]
        source: url::ParseError,
    },

    #[error("Not a base URL for the credentials service '{0}'")]
    NotBaseUrl(Url),

    #[error("Credential '{alias}' has no id; only stored credentials can be updated")]
    MissingId { alias: String },

    #[error("Not authorized while requesting to {requested_url} (status '{got}')")]
    Unauthorized {
        got: StatusCode,
        requested_url: String,
    },

    #[error("Unexpected response code '{got}' while requesting to {requested_url}")]
    UnexpectedResponseCode {
        got: StatusCode,
        requested_url: String,
    },

    #[error("Http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
