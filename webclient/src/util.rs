use reqwest::{Response, StatusCode};
use serde::de::{Deserialize, DeserializeOwned, Deserializer};
use url::Url;

use crate::error::*;

pub fn parse_url(url: impl AsRef<str>) -> Result<Url> {
    match Url::parse(url.as_ref()) {
        Ok(url) => Ok(url),
        Err(e) => Err(Error::InvalidSyntaxUrl {
            url: url.as_ref().to_owned(),
            source: e,
        }),
    }
}

/// Appends `segments` to the path of `base`, percent-encoding each one.
/// A trailing slash of `base` does not produce an empty segment.
pub fn join_segments<'a, I>(base: &Url, segments: I) -> Result<Url>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut url = base.clone();
    {
        let Ok(mut path) = url.path_segments_mut() else {
            return Err(Error::NotBaseUrl(base.to_owned()));
        };
        path.pop_if_empty();
        path.extend(segments);
    }
    Ok(url)
}

pub fn ensure_authorized(status: StatusCode, requested_url: &Url) -> Result<()> {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(Error::Unauthorized {
            got: status,
            requested_url: requested_url.to_string(),
        }),
        _ => Ok(()),
    }
}

/// Statuses with which the service declines a record for a domain reason.
pub fn is_rejection(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::BAD_REQUEST
            | StatusCode::NOT_FOUND
            | StatusCode::CONFLICT
            | StatusCode::UNPROCESSABLE_ENTITY
    )
}

pub fn unexpected_status(status: StatusCode, requested_url: &Url) -> Error {
    Error::UnexpectedResponseCode {
        got: status,
        requested_url: requested_url.to_string(),
    }
}

pub async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T> {
    let body = resp.text().await?;
    Ok(serde_json::from_str(&body)?)
}

/// Reads an explicit JSON `null` as `T::default()`.
pub fn null_as_default<'de, D, T>(d: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}
