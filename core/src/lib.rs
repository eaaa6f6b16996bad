pub mod directory;
pub mod editor;
pub mod interactive;
pub mod store;
pub mod style;

pub use crate::directory::AliasDirectory;
pub use crate::editor::{CreateOutcome, CredentialEditor, EditorState, LoadOutcome, Mode, SaveOutcome};
pub use crate::store::ScvStore;

/// Failure of a call to the credentials service.
pub use scv_webclient::Error as ServiceError;
pub use scv_webclient::Result;
