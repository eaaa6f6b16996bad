pub mod add;
pub mod aliases;
pub mod edit;
pub mod show;

use anyhow::Context as _;
use scv_core::ScvStore;
use scv_webclient::Url;

use crate::config::GlobalConfig;

#[derive(Debug, clap::Parser)]
#[command(author, version, about, long_about = None)]
pub struct GlobalArgs {
    #[command(subcommand)]
    pub subcmd: Subcommand,

    /// Base URL of the service, e.g. http://localhost:8980/opennms/
    #[arg(long)]
    pub base_url: Option<Url>,

    /// Service account name (the password comes from the config file)
    #[arg(long)]
    pub user: Option<String>,
}

#[derive(Debug, clap::Subcommand)]
pub enum Subcommand {
    #[command(alias("ls"))]
    Aliases(aliases::Args),
    Show(show::Args),
    Add(add::Args),
    Edit(edit::Args),
}

pub type SubcmdResult = anyhow::Result<()>;

impl GlobalArgs {
    pub async fn exec_subcmd(&self) -> SubcmdResult {
        use Subcommand::*;
        match &self.subcmd {
            Aliases(args) => aliases::exec(args, self).await,
            Show(args) => show::exec(args, self).await,
            Add(args) => add::exec(args, self).await,
            Edit(args) => edit::exec(args, self).await,
        }
    }
}

/// Store with an empty alias directory.
pub(crate) fn open_store(global_args: &GlobalArgs) -> anyhow::Result<ScvStore> {
    let cfg = GlobalConfig::from_file_and_args(global_args);
    let client = cfg.client().context("Failed to set up the service client")?;
    Ok(ScvStore::new(client))
}

/// Store with the alias directory fetched.
pub(crate) async fn connect_store(global_args: &GlobalArgs) -> anyhow::Result<ScvStore> {
    let cfg = GlobalConfig::from_file_and_args(global_args);
    let client = cfg.client().context("Failed to set up the service client")?;
    ScvStore::connect(client)
        .await
        .with_context(|| format!("Failed to fetch aliases from {}", cfg.base_url))
}
