use std::io;

use anyhow::{bail, Context as _};
use colored::Colorize as _;
use scv_core::{style, LoadOutcome};
use scv_webclient::Credential;

use super::{GlobalArgs, SubcmdResult};

#[derive(Debug, clap::Args)]
pub struct Args {
    #[arg()] // positional argument
    pub alias: String,

    /// Print the password instead of a mask
    #[arg(short, long)]
    pub reveal: bool,

    #[arg(short, long)]
    pub json: bool,
}

pub async fn exec(args: &Args, global_args: &GlobalArgs) -> SubcmdResult {
    let mut store = super::open_store(global_args)?;

    let outcome = store
        .select(&args.alias)
        .await
        .with_context(|| format!("Failed to fetch credential '{}'", args.alias))?;
    if outcome == LoadOutcome::NotFound {
        bail!("No credential with alias '{}'", args.alias);
    }

    let mut cred = store.editor().credential();
    if !args.reveal {
        cred.password = style::mask(&cred.password).to_owned();
    }

    if args.json {
        serde_json::to_writer_pretty(io::stdout(), &cred)?;
        println!();
        return Ok(());
    }
    print_credential(&cred);
    Ok(())
}

fn print_credential(cred: &Credential) {
    let id = cred.id.map(|id| id.to_string()).unwrap_or_default();
    println!("{:>10}: {}", "id".bold(), id);
    println!("{:>10}: {}", "alias".bold(), cred.alias);
    println!("{:>10}: {}", "username".bold(), cred.username);
    println!("{:>10}: {}", "password".bold(), cred.password);
    if cred.attributes.is_empty() {
        return;
    }
    println!("{:>10}:", "attributes".bold());
    for (key, value) in &cred.attributes {
        println!("  {} = {}", key.cyan(), value);
    }
}
