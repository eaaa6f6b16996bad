use scv_webclient::{Credential, Field, FieldPatch, Result, SharedClient};
use tokio::sync::watch;

use crate::directory::AliasDirectory;

/// Whether the working credential is a new record or a stored one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, strum::Display)]
pub enum Mode {
    #[default]
    Creating,
    Editing,
}

/// Everything the credential form renders.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EditorState {
    /// Record being composed or edited.
    pub credential: Credential,
    /// Last record fetched from (or reset after saving to) the service.
    /// Only ever replaced as a whole.
    pub baseline: Credential,
    pub mode: Mode,
}

impl EditorState {
    /// True when the working record differs from the baseline.
    pub fn is_dirty(&self) -> bool {
        self.credential != self.baseline
    }

    fn reset(&mut self) {
        *self = Self::default();
    }

    fn replace_with_loaded(&mut self, record: Credential) {
        self.baseline = record.clone();
        self.credential = record;
        self.mode = Mode::Editing;
    }

    /// Adds the unnamed `"" => ""` entry the form shows as an empty row.
    /// There is at most one such entry; an existing one has its value reset.
    pub fn add_attribute_slot(&mut self) {
        self.credential
            .attributes
            .insert(String::new(), String::new());
    }

    /// Sets the value at `old_key`, or renames `old_key` to `new_key` holding `new_value`.
    ///
    /// A rename moves the entry to the end. Renaming onto an existing key
    /// overwrites that key's value in place and drops `old_key`.
    pub fn update_attribute(&mut self, old_key: &str, new_key: String, new_value: String) {
        let attrs = &mut self.credential.attributes;
        if old_key != new_key {
            attrs.shift_remove(old_key);
        }
        attrs.insert(new_key, new_value);
    }

    /// Returns whether an entry was removed.
    pub fn remove_attribute(&mut self, key: &str) -> bool {
        self.credential.attributes.shift_remove(key).is_some()
    }
}

/// Outcome of [`CredentialEditor::load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    NotFound,
}

/// Outcome of [`CredentialEditor::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    /// The service declined the record; the editor is unchanged.
    Rejected,
}

/// Outcome of [`CredentialEditor::create`].
#[derive(Debug)]
pub enum CreateOutcome {
    /// The record was created and the editor reset.
    /// `refresh` is the result of the alias directory refresh that followed.
    Created { refresh: Result<()> },
    /// The service declined the record; the editor is unchanged.
    Rejected,
}

impl CreateOutcome {
    pub fn is_created(&self) -> bool {
        matches!(self, CreateOutcome::Created { .. })
    }
}

/// Holds the credential being created or edited in the form.
///
/// Service calls leave the state untouched until they succeed.
pub struct CredentialEditor {
    client: SharedClient,
    state: watch::Sender<EditorState>,
}

impl CredentialEditor {
    pub fn new(client: SharedClient) -> Self {
        let (state, _) = watch::channel(EditorState::default());
        Self { client, state }
    }

    pub fn state(&self) -> watch::Ref<'_, EditorState> {
        self.state.borrow()
    }

    /// Notified on every change of the editor state.
    pub fn subscribe(&self) -> watch::Receiver<EditorState> {
        self.state.subscribe()
    }

    pub fn mode(&self) -> Mode {
        self.state.borrow().mode
    }

    pub fn credential(&self) -> Credential {
        self.state.borrow().credential.clone()
    }

    pub fn baseline(&self) -> Credential {
        self.state.borrow().baseline.clone()
    }

    pub fn is_dirty(&self) -> bool {
        self.state.borrow().is_dirty()
    }

    /// Fetches the record for `alias` and starts editing it.
    /// When there is no such record nothing changes.
    pub async fn load(&mut self, alias: &str) -> Result<LoadOutcome> {
        let Some(record) = self.client.get_credential_by_alias(alias).await? else {
            log::debug!("No credential with alias '{}'", alias);
            return Ok(LoadOutcome::NotFound);
        };
        log::debug!("Loaded credential '{}' (id: {:?})", alias, record.id);
        self.state.send_modify(|s| s.replace_with_loaded(record));
        Ok(LoadOutcome::Loaded)
    }

    /// Sends the working record as a new credential.
    /// On success the editor is reset and `directory` refreshed.
    pub async fn create(&mut self, directory: &mut AliasDirectory) -> Result<CreateOutcome> {
        let record = self.working_copy(Mode::Creating, "create");
        if !self.client.create_credential(&record).await? {
            return Ok(CreateOutcome::Rejected);
        }
        log::debug!("Created credential '{}'", record.alias);
        self.clear();

        let refresh = directory.refresh().await;
        if let Err(e) = &refresh {
            log::error!("Failed to refresh aliases after create: {}", e);
        }
        Ok(CreateOutcome::Created { refresh })
    }

    /// Overwrites the stored record with the working one. On success the editor is reset.
    pub async fn update(&mut self) -> Result<SaveOutcome> {
        let record = self.working_copy(Mode::Editing, "update");
        if !self.client.update_credential(&record).await? {
            return Ok(SaveOutcome::Rejected);
        }
        log::debug!("Updated credential '{}'", record.alias);
        self.clear();
        Ok(SaveOutcome::Saved)
    }

    /// Merges the given scalar fields into the working record.
    pub fn set_fields(&mut self, patch: FieldPatch) {
        if patch.is_empty() {
            return;
        }
        self.state.send_modify(|s| patch.apply_to(&mut s.credential));
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.set_fields(FieldPatch::new().with(field, value));
    }

    /// Resets to an empty new record.
    pub fn clear(&mut self) {
        self.state.send_modify(EditorState::reset);
    }

    pub fn add_attribute_slot(&mut self) {
        self.state.send_modify(EditorState::add_attribute_slot);
    }

    /// See [`EditorState::update_attribute`].
    pub fn update_attribute(
        &mut self,
        old_key: &str,
        new_key: impl Into<String>,
        new_value: impl Into<String>,
    ) {
        let (new_key, new_value) = (new_key.into(), new_value.into());
        self.state
            .send_modify(|s| s.update_attribute(old_key, new_key, new_value));
    }

    pub fn remove_attribute(&mut self, key: &str) {
        self.state.send_if_modified(|s| s.remove_attribute(key));
    }

    fn working_copy(&self, expected: Mode, op: &str) -> Credential {
        let state = self.state.borrow();
        if state.mode != expected {
            log::warn!("Calling {} while {} a credential", op, state.mode);
        }
        state.credential.clone()
    }
}
