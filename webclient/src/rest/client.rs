use ::async_trait::async_trait;
use ::reqwest::{header, Method, RequestBuilder, StatusCode};

use super::{
    auth::BasicAuth,
    urls::{ScvUrls, ALIASES_SEGMENT},
};
use crate::{client::Client, error::*, model::*, util};

/// [`Client`] talking JSON to the service's REST endpoint (`<base>/rest/scv`).
pub struct ScvRestClient {
    http: reqwest::Client,
    urls: ScvUrls,
    auth: Option<BasicAuth>,
}

impl ScvRestClient {
    pub fn new(base_url: &Url) -> Result<Self> {
        let http = reqwest::Client::builder().gzip(true).build()?;
        Ok(Self {
            http,
            urls: ScvUrls::new(base_url)?,
            auth: None,
        })
    }

    pub fn with_basic_auth(mut self, auth: BasicAuth) -> Self {
        self.auth = Some(auth);
        self
    }

    pub fn urls(&self) -> &ScvUrls {
        &self.urls
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let req = self
            .http
            .request(method, url)
            .header(header::ACCEPT, "application/json");
        match &self.auth {
            Some(BasicAuth { username, password }) => req.basic_auth(username, password.as_ref()),
            None => req,
        }
    }

    /// Sends `record` and tells whether the service accepted it.
    async fn save(&self, method: Method, url: Url, record: &Credential) -> Result<bool> {
        log::debug!("{} {}", method, url);
        let resp = self.request(method, url.clone()).json(record).send().await?;

        let status = resp.status();
        util::ensure_authorized(status, &url)?;
        if status.is_success() {
            return Ok(true);
        }
        if util::is_rejection(status) {
            log::warn!(
                "Service declined credential '{}' (status '{}')",
                record.alias,
                status
            );
            return Ok(false);
        }
        Err(util::unexpected_status(status, &url))
    }
}

#[async_trait]
impl Client for ScvRestClient {
    async fn list_aliases(&self) -> Result<Vec<String>> {
        let url = self.urls.aliases()?;
        log::debug!("GET {}", url);
        let resp = self.request(Method::GET, url.clone()).send().await?;

        let status = resp.status();
        util::ensure_authorized(status, &url)?;
        match status {
            StatusCode::OK => util::read_json(resp).await,
            StatusCode::NO_CONTENT => Ok(Vec::new()),
            _ => Err(util::unexpected_status(status, &url)),
        }
    }

    async fn get_credential_by_alias(&self, alias: &str) -> Result<Option<Credential>> {
        if alias == ALIASES_SEGMENT {
            log::warn!(
                "Alias '{}' is the alias-list endpoint; it cannot be fetched by alias",
                alias
            );
        }
        let url = self.urls.by_alias(alias)?;
        log::debug!("GET {}", url);
        let resp = self.request(Method::GET, url.clone()).send().await?;

        let status = resp.status();
        util::ensure_authorized(status, &url)?;
        match status {
            StatusCode::OK => util::read_json(resp).await.map(Some),
            StatusCode::NOT_FOUND | StatusCode::NO_CONTENT => Ok(None),
            _ => Err(util::unexpected_status(status, &url)),
        }
    }

    async fn create_credential(&self, record: &Credential) -> Result<bool> {
        let url = self.urls.endpoint().to_owned();
        self.save(Method::POST, url, record).await
    }

    async fn update_credential(&self, record: &Credential) -> Result<bool> {
        let Some(id) = record.id else {
            return Err(Error::MissingId {
                alias: record.alias.clone(),
            });
        };
        let url = self.urls.by_id(id)?;
        self.save(Method::PUT, url, record).await
    }
}
