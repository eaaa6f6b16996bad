// exported modules
pub mod client;
pub mod error;
pub mod model;

// client impls
pub mod rest;

// re-exports
pub use client::*;
pub use error::*;
pub use model::*;
pub use rest::ScvRestClient;
pub use util::parse_url;

use std::sync::Arc;

/// Builds the REST client shared by the alias directory and the credential editor.
pub fn new_client(base_url: &Url, auth: Option<rest::BasicAuth>) -> Result<SharedClient> {
    let mut cli = ScvRestClient::new(base_url)?;
    if let Some(auth) = auth {
        cli = cli.with_basic_auth(auth);
    }
    Ok(Arc::new(cli))
}

// internal modules
mod util;
