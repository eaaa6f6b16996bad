use scv_webclient::{Result, SharedClient};
use tokio::sync::watch;

/// Cache of every alias known to the service.
///
/// The list is replaced wholesale on each successful [`refresh`](Self::refresh).
pub struct AliasDirectory {
    client: SharedClient,
    aliases: watch::Sender<Vec<String>>,
}

impl AliasDirectory {
    pub fn new(client: SharedClient) -> Self {
        let (aliases, _) = watch::channel(Vec::new());
        Self { client, aliases }
    }

    pub fn aliases(&self) -> watch::Ref<'_, Vec<String>> {
        self.aliases.borrow()
    }

    pub fn contains(&self, alias: &str) -> bool {
        self.aliases.borrow().iter().any(|a| a == alias)
    }

    /// Notified each time the alias list is replaced.
    pub fn subscribe(&self) -> watch::Receiver<Vec<String>> {
        self.aliases.subscribe()
    }

    /// Fetches the alias list. On failure the previous list is kept.
    pub async fn refresh(&mut self) -> Result<()> {
        let fetched = self.client.list_aliases().await?;
        log::debug!("Alias directory refreshed ({} aliases)", fetched.len());
        self.aliases.send_replace(fetched);
        Ok(())
    }
}
