use anyhow::{bail, Context as _};
use scv_core::{interactive, print_success, print_warn, CreateOutcome};
use scv_webclient::{Field, FieldPatch};

use super::{GlobalArgs, SubcmdResult};
use crate::util;

#[derive(Debug, clap::Args)]
pub struct Args {
    #[arg(long)]
    pub alias: String,

    /// Asked interactively when omitted
    #[arg(short, long)]
    pub username: Option<String>,

    /// Asked interactively when omitted
    #[arg(short, long)]
    pub password: Option<String>,

    /// Extra attribute (repeatable)
    #[arg(short = 'a', long = "attr", value_name = "KEY=VALUE", value_parser = util::parse_key_val)]
    pub attrs: Vec<(String, String)>,
}

pub async fn exec(args: &Args, global_args: &GlobalArgs) -> SubcmdResult {
    let mut store = super::connect_store(global_args).await?;
    if store.directory().contains(&args.alias) {
        log::warn!("Alias '{}' is already in use", args.alias);
    }

    let username = match &args.username {
        Some(u) => u.clone(),
        None => interactive::ask_text("username")?,
    };
    let password = match &args.password {
        Some(p) => p.clone(),
        None => interactive::ask_password("password")?,
    };

    let editor = store.editor_mut();
    editor.set_fields(
        FieldPatch::new()
            .with(Field::Alias, &args.alias)
            .with(Field::Username, username)
            .with(Field::Password, password),
    );
    for (key, value) in &args.attrs {
        editor.add_attribute_slot();
        editor.update_attribute("", key, value);
    }

    let outcome = store
        .create()
        .await
        .with_context(|| format!("Failed to create credential '{}'", args.alias))?;
    match outcome {
        CreateOutcome::Created { refresh } => {
            print_success!("Created credential '{}'", args.alias);
            if let Err(e) = refresh {
                print_warn!("Could not refresh the alias list: {}", e);
            }
            Ok(())
        }
        CreateOutcome::Rejected => bail!("Service declined credential '{}'", args.alias),
    }
}
