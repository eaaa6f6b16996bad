use scv_webclient::{Result, SharedClient};

use crate::directory::AliasDirectory;
use crate::editor::{CreateOutcome, CredentialEditor, LoadOutcome, SaveOutcome};

/// Owns the alias directory and the credential editor of one session.
pub struct ScvStore {
    directory: AliasDirectory,
    editor: CredentialEditor,
}

impl ScvStore {
    /// Empty store: no aliases, empty credential, `Creating`.
    pub fn new(client: SharedClient) -> Self {
        Self {
            directory: AliasDirectory::new(client.clone()),
            editor: CredentialEditor::new(client),
        }
    }

    /// Creates the store and fills the alias directory.
    pub async fn connect(client: SharedClient) -> Result<Self> {
        let mut store = Self::new(client);
        store.directory.refresh().await?;
        Ok(store)
    }

    pub fn directory(&self) -> &AliasDirectory {
        &self.directory
    }

    pub fn editor(&self) -> &CredentialEditor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut CredentialEditor {
        &mut self.editor
    }

    /// Loads the credential chosen from the alias list.
    pub async fn select(&mut self, alias: &str) -> Result<LoadOutcome> {
        if !self.directory.contains(alias) {
            log::debug!("Selecting alias '{}' not in the directory", alias);
        }
        self.editor.load(alias).await
    }

    pub async fn create(&mut self) -> Result<CreateOutcome> {
        self.editor.create(&mut self.directory).await
    }

    pub async fn update(&mut self) -> Result<SaveOutcome> {
        self.editor.update().await
    }
}
