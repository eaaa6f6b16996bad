pub mod credential;

pub use credential::*;
pub use url::Url;
