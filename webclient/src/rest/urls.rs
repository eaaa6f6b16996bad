use crate::{error::*, model::CredentialId, util, Url};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8980/opennms/";
pub const SCV_PATH: [&str; 2] = ["rest", "scv"];
pub const ALIASES_SEGMENT: &str = "aliases";

/// Endpoints of the credentials service under one base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScvUrls {
    endpoint: Url,
}

impl ScvUrls {
    pub fn new(base_url: &Url) -> Result<Self> {
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(Error::NotBaseUrl(base_url.to_owned()));
        }
        let endpoint = util::join_segments(base_url, SCV_PATH)?;
        Ok(Self { endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn aliases(&self) -> Result<Url> {
        util::join_segments(&self.endpoint, [ALIASES_SEGMENT])
    }

    /// URL of the credential named `alias`.
    ///
    /// The alias `"aliases"` maps onto the same URL as [`aliases`](Self::aliases),
    /// so such a credential cannot be fetched by alias.
    pub fn by_alias(&self, alias: &str) -> Result<Url> {
        util::join_segments(&self.endpoint, [alias])
    }

    pub fn by_id(&self, id: CredentialId) -> Result<Url> {
        util::join_segments(&self.endpoint, [id.to_string().as_str()])
    }
}
