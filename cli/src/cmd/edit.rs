use anyhow::{bail, Context as _};
use scv_core::{interactive, print_success, print_warn, CredentialEditor, LoadOutcome, SaveOutcome};
use scv_webclient::FieldPatch;

use super::{GlobalArgs, SubcmdResult};
use crate::util;

#[derive(Debug, clap::Args)]
pub struct Args {
    #[arg()] // positional argument
    pub alias: String,

    /// Rename the credential
    #[arg(long)]
    pub new_alias: Option<String>,

    #[arg(short, long)]
    pub username: Option<String>,

    #[arg(short, long, conflicts_with = "ask_password")]
    pub password: Option<String>,

    /// Ask for the new password interactively
    #[arg(short = 'P', long)]
    pub ask_password: bool,

    /// Set an attribute value, adding it if missing (repeatable)
    #[arg(short, long, value_name = "KEY=VALUE", value_parser = util::parse_key_val)]
    pub set: Vec<(String, String)>,

    /// Rename an attribute keeping its value (repeatable)
    #[arg(short, long, value_name = "OLD=NEW", value_parser = util::parse_key_val)]
    pub rename: Vec<(String, String)>,

    /// Remove an attribute (repeatable)
    #[arg(long, value_name = "KEY")]
    pub unset: Vec<String>,
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

    let password = match (&args.password, args.ask_password) {
        (Some(p), _) => Some(p.clone()),
        (None, true) => Some(interactive::ask_password("new password")?),
        (None, false) => None,
    };
    let patch = FieldPatch {
        alias: args.new_alias.clone(),
        username: args.username.clone(),
        password,
    };

    let editor = store.editor_mut();
    editor.set_fields(patch);
    apply_attribute_edits(editor, args)?;

    if !editor.is_dirty() {
        println!("Nothing to change");
        return Ok(());
    }

    let outcome = store
        .update()
        .await
        .with_context(|| format!("Failed to update credential '{}'", args.alias))?;
    match outcome {
        SaveOutcome::Saved => {
            let alias = args.new_alias.as_ref().unwrap_or(&args.alias);
            print_success!("Updated credential '{}'", alias);
            Ok(())
        }
        SaveOutcome::Rejected => bail!("Service declined credential '{}'", args.alias),
    }
}

fn apply_attribute_edits(editor: &mut CredentialEditor, args: &Args) -> anyhow::Result<()> {
    for (old, new) in &args.rename {
        let (value, overwrites) = {
            let state = editor.state();
            let attrs = &state.credential.attributes;
            let Some(value) = attrs.get(old) else {
                bail!(
                    "Credential '{}' has no attribute '{}'",
                    state.credential.alias,
                    old
                );
            };
            (value.clone(), old != new && attrs.contains_key(new))
        };
        if overwrites {
            print_warn!("Attribute '{}' is overwritten by '{}'", new, old);
        }
        editor.update_attribute(old, new, value);
    }
    for (key, value) in &args.set {
        editor.update_attribute(key, key, value);
    }
    for key in &args.unset {
        editor.remove_attribute(key);
    }
    Ok(())
}

