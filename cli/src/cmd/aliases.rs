use std::io;

use super::{GlobalArgs, SubcmdResult};

#[derive(Debug, clap::Args)]
pub struct Args {
    #[arg(short, long)]
    pub json: bool,
}

pub async fn exec(args: &Args, global_args: &GlobalArgs) -> SubcmdResult {
    let store = super::connect_store(global_args).await?;
    let aliases = store.directory().aliases().clone();

    if args.json {
        serde_json::to_writer_pretty(io::stdout(), &aliases)?;
        println!();
        return Ok(());
    }

    for alias in aliases {
        println!("{}", alias);
    }
    Ok(())
}
