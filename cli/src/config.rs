use serde::{Deserialize, Serialize};
use std::{fs::File, io, path::PathBuf};

use scv_webclient::{rest::BasicAuth, rest::DEFAULT_BASE_URL, SharedClient, Url};

use crate::{cmd::GlobalArgs, util};

pub const APP_NAME: &str = "scv-cli";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default = "GlobalConfig::default_base_url")]
    pub base_url: Url,

    /// Account used to authenticate to the credentials service.
    #[serde(default)]
    pub auth: Option<BasicAuth>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        GlobalConfig {
            base_url: Self::default_base_url(),
            auth: None,
        }
    }
}

impl GlobalConfig {
    pub const FILENAME: &str = "scv-cli.toml";

    pub fn filepath() -> PathBuf {
        let dir = dirs::config_dir().expect("Failed to get user's config dir path");
        dir.join(APP_NAME).join(Self::FILENAME)
    }

    fn default_base_url() -> Url {
        Url::parse(DEFAULT_BASE_URL).expect("DEFAULT_BASE_URL must be a valid URL")
    }

    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    pub fn from_file_or_default() -> Self {
        let path = Self::filepath();
        let toml_str = match File::open(&path).and_then(io::read_to_string) {
            Ok(toml) => toml,
            _ => return GlobalConfig::default(),
        };
        Self::from_toml(&toml_str).unwrap_or_else(|e| {
            log::error!(
                "Invalid config '{:?}': {:#}",
                util::replace_homedir_to_tilde(path),
                e
            );
            std::process::exit(1)
        })
    }

    pub fn with_args(mut self, args: &GlobalArgs) -> Self {
        let GlobalArgs {
            subcmd: _,
            base_url,
            user,
        } = args;

        if let Some(url) = base_url {
            self.base_url = url.clone();
        }
        if let Some(username) = user {
            let password = self.auth.take().and_then(|a| a.password);
            self.auth = Some(BasicAuth::new(username, password));
        }
        self
    }

    pub fn from_file_and_args(args: &GlobalArgs) -> Self {
        Self::from_file_or_default().with_args(args)
    }

    pub fn client(&self) -> scv_webclient::Result<SharedClient> {
        scv_webclient::new_client(&self.base_url, self.auth.clone())
    }
}
