use std::sync::Arc;

use async_trait::async_trait;

use crate::{error::*, model::*};

/// Remote credentials service.
///
/// Every method fails with [`Error`] on transport or server failure.
#[async_trait]
pub trait Client: Send + Sync {
    /// Lists all known aliases in the order the service returns them.
    async fn list_aliases(&self) -> Result<Vec<String>>;

    /// Returns `Ok(None)` when no record has the alias.
    async fn get_credential_by_alias(&self, alias: &str) -> Result<Option<Credential>>;

    /// Returns `Ok(false)` when the service declines the record (e.g. duplicate alias).
    async fn create_credential(&self, record: &Credential) -> Result<bool>;

    /// Overwrites the record identified by `record.id`.
    /// Returns `Ok(false)` when the service declines the record.
    async fn update_credential(&self, record: &Credential) -> Result<bool>;
}

pub type SharedClient = Arc<dyn Client>;
