use scv_core::*;
use scv_webclient::{Credential, CredentialId, Field, FieldPatch};

use fake_client::{FakeClient, Op};

fn bob() -> Credential {
    Credential::new("bob", "bob", "p")
        .with_id(CredentialId::new(7))
        .with_attribute("role", "admin")
}

fn snapshot(editor: &CredentialEditor) -> EditorState {
    editor.state().clone()
}

#[tokio::test]
async fn starts_empty_in_creating_mode() {
    let (_, client) = FakeClient::shared();
    let editor = CredentialEditor::new(client);

    assert_eq!(editor.mode(), Mode::Creating);
    assert_eq!(editor.credential(), Credential::default());
    assert_eq!(editor.baseline(), Credential::default());
    assert!(!editor.is_dirty());
}

#[tokio::test]
async fn load_then_rename_then_update() {
    let (fake, client) = FakeClient::shared();
    fake.insert(bob());
    let mut editor = CredentialEditor::new(client);

    assert_eq!(editor.load("bob").await.unwrap(), LoadOutcome::Loaded);
    assert_eq!(editor.credential(), bob());
    assert_eq!(editor.baseline(), bob());
    assert_eq!(editor.mode(), Mode::Editing);

    editor.update_attribute("role", "group", "admin");
    let attrs: Vec<_> = editor.credential().attributes.into_iter().collect();
    assert_eq!(attrs, [("group".to_owned(), "admin".to_owned())]);

    assert_eq!(editor.update().await.unwrap(), SaveOutcome::Saved);
    assert_eq!(editor.credential(), Credential::default());
    assert_eq!(editor.mode(), Mode::Creating);

    let stored = fake.stored("bob").unwrap();
    assert_eq!(stored.attributes.get("group").map(String::as_str), Some("admin"));
    assert!(stored.attributes.get("role").is_none());
}

#[tokio::test]
async fn load_not_found_leaves_state_alone() {
    let (_, client) = FakeClient::shared();
    let mut editor = CredentialEditor::new(client);
    editor.set_field(Field::Alias, "draft");
    editor.add_attribute_slot();
    let before = snapshot(&editor);

    assert_eq!(editor.load("nobody").await.unwrap(), LoadOutcome::NotFound);
    assert_eq!(snapshot(&editor), before);
}

#[tokio::test]
async fn load_failure_leaves_state_alone() {
    let (fake, client) = FakeClient::shared();
    fake.insert(bob());
    let mut editor = CredentialEditor::new(client);
    editor.set_field(Field::Username, "typing");
    let before = snapshot(&editor);

    fake.fail(Op::Get);
    assert!(editor.load("bob").await.is_err());
    assert_eq!(snapshot(&editor), before);
    assert_eq!(editor.mode(), Mode::Creating);
}

#[tokio::test]
async fn edits_after_load_never_reach_baseline() {
    let (fake, client) = FakeClient::shared();
    fake.insert(bob().with_attribute("port", "22"));
    let mut editor = CredentialEditor::new(client);
    editor.load("bob").await.unwrap();
    let baseline = editor.baseline();

    editor.update_attribute("role", "role", "guest");
    editor.update_attribute("port", "ssh_port", "2222");
    editor.add_attribute_slot();
    editor.remove_attribute("role");
    editor.set_fields(FieldPatch::new().with(Field::Password, "new"));

    assert_eq!(editor.baseline(), baseline);
    assert_eq!(
        editor.baseline().attributes.get("role").map(String::as_str),
        Some("admin")
    );
    assert!(editor.is_dirty());
}

#[tokio::test]
async fn set_fields_merges_only_given_fields() {
    let (fake, client) = FakeClient::shared();
    fake.insert(bob());
    let mut editor = CredentialEditor::new(client);
    editor.load("bob").await.unwrap();

    let patch: FieldPatch = [(Field::Username, "robert"), (Field::Password, "q")]
        .into_iter()
        .collect();
    editor.set_fields(patch);

    let cred = editor.credential();
    assert_eq!(cred.alias, "bob");
    assert_eq!(cred.username, "robert");
    assert_eq!(cred.password, "q");
    assert_eq!(cred.id, Some(CredentialId::new(7)));
    assert_eq!(cred.attributes, bob().attributes);
}

#[tokio::test]
async fn clear_twice_equals_clear_once() {
    let (fake, client) = FakeClient::shared();
    fake.insert(bob());
    let mut editor = CredentialEditor::new(client);
    editor.load("bob").await.unwrap();

    editor.clear();
    let once = snapshot(&editor);
    editor.clear();
    let twice = snapshot(&editor);

    assert_eq!(once, twice);
    assert_eq!(twice, EditorState::default());
    assert_eq!(twice.mode, Mode::Creating);
    assert!(twice.credential.attributes.is_empty());
    assert!(twice.credential.id.is_none());
}

#[tokio::test]
async fn mode_transitions() {
    let (fake, client) = FakeClient::shared();
    fake.insert(bob());
    let mut editor = CredentialEditor::new(client);

    editor.load("bob").await.unwrap();
    assert_eq!(editor.mode(), Mode::Editing);
    editor.clear();
    assert_eq!(editor.mode(), Mode::Creating);

    editor.load("bob").await.unwrap();
    assert_eq!(editor.update().await.unwrap(), SaveOutcome::Saved);
    assert_eq!(editor.mode(), Mode::Creating);
}

#[tokio::test]
async fn create_resets_and_refreshes_directory() {
    let (fake, client) = FakeClient::shared();
    let mut directory = AliasDirectory::new(client.clone());
    let mut editor = CredentialEditor::new(client);

    editor.set_fields(
        FieldPatch::new()
            .with(Field::Alias, "router")
            .with(Field::Username, "admin")
            .with(Field::Password, "secret"),
    );
    editor.add_attribute_slot();
    editor.update_attribute("", "port", "");
    editor.update_attribute("port", "port", "22");

    let outcome = editor.create(&mut directory).await.unwrap();
    assert!(matches!(outcome, CreateOutcome::Created { refresh: Ok(()) }));
    assert_eq!(snapshot(&editor), EditorState::default());
    assert_eq!(*directory.aliases(), ["router"]);

    let stored = fake.stored("router").unwrap();
    assert!(stored.id.is_some());
    assert_eq!(stored.attributes.get("port").map(String::as_str), Some("22"));
}

#[tokio::test]
async fn create_rejected_keeps_record() {
    let (fake, client) = FakeClient::shared();
    fake.insert(bob());
    let mut directory = AliasDirectory::new(client.clone());
    let mut editor = CredentialEditor::new(client);

    // duplicate alias
    editor.set_fields(FieldPatch::new().with(Field::Alias, "bob"));
    let before = snapshot(&editor);

    let outcome = editor.create(&mut directory).await.unwrap();
    assert!(matches!(outcome, CreateOutcome::Rejected));
    assert_eq!(snapshot(&editor), before);
    assert!(!fake.calls().contains(&Op::ListAliases));
}

#[tokio::test]
async fn create_failure_keeps_record() {
    let (fake, client) = FakeClient::shared();
    let mut directory = AliasDirectory::new(client.clone());
    let mut editor = CredentialEditor::new(client);
    editor.set_field(Field::Alias, "x");
    let before = snapshot(&editor);

    fake.fail(Op::Create);
    assert!(editor.create(&mut directory).await.is_err());
    assert_eq!(snapshot(&editor), before);
    assert!(fake.stored("x").is_none());
}

#[tokio::test]
async fn failed_refresh_does_not_undo_create() {
    let (fake, client) = FakeClient::shared();
    fake.insert(bob());
    let mut directory = AliasDirectory::new(client.clone());
    directory.refresh().await.unwrap();
    let mut editor = CredentialEditor::new(client);
    editor.set_field(Field::Alias, "alice");

    fake.fail(Op::ListAliases);
    let outcome = editor.create(&mut directory).await.unwrap();

    let CreateOutcome::Created { refresh } = outcome else {
        panic!("expected the create to succeed");
    };
    assert!(refresh.is_err());
    assert_eq!(snapshot(&editor), EditorState::default());
    assert!(fake.stored("alice").is_some());
    assert_eq!(*directory.aliases(), ["bob"]);
}

#[tokio::test]
async fn update_failure_leaves_state_alone() {
    let (fake, client) = FakeClient::shared();
    fake.insert(bob());
    let mut editor = CredentialEditor::new(client);
    editor.load("bob").await.unwrap();
    editor.update_attribute("role", "role", "root");
    let before = snapshot(&editor);

    fake.fail(Op::Update);
    assert!(editor.update().await.is_err());
    assert_eq!(snapshot(&editor), before);
    assert_eq!(editor.mode(), Mode::Editing);
}

#[tokio::test]
async fn update_rejected_leaves_state_alone() {
    let (fake, client) = FakeClient::shared();
    fake.insert(bob());
    let mut editor = CredentialEditor::new(client);
    editor.load("bob").await.unwrap();
    let before = snapshot(&editor);

    fake.reject(Op::Update);
    assert_eq!(editor.update().await.unwrap(), SaveOutcome::Rejected);
    assert_eq!(snapshot(&editor), before);
}

#[tokio::test]
async fn update_does_not_refresh_aliases() {
    let (fake, client) = FakeClient::shared();
    fake.insert(bob());
    let mut editor = CredentialEditor::new(client);
    editor.load("bob").await.unwrap();
    editor.set_field(Field::Alias, "robert");

    assert_eq!(editor.update().await.unwrap(), SaveOutcome::Saved);
    assert_eq!(fake.calls(), [Op::Get, Op::Update]);
    assert!(fake.stored("robert").is_some());
}

#[tokio::test]
async fn update_of_new_record_is_an_error() {
    let (_, client) = FakeClient::shared();
    let mut editor = CredentialEditor::new(client);
    editor.set_field(Field::Alias, "never-stored");
    let before = snapshot(&editor);

    let err = editor.update().await.unwrap_err();
    assert!(matches!(err, ServiceError::MissingId { .. }));
    assert_eq!(snapshot(&editor), before);
}

#[tokio::test]
async fn subscribers_see_changes() {
    let (fake, client) = FakeClient::shared();
    fake.insert(bob());
    let mut editor = CredentialEditor::new(client);
    let mut rx = editor.subscribe();

    editor.load("bob").await.unwrap();
    assert!(rx.has_changed().unwrap());
    assert_eq!(rx.borrow_and_update().mode, Mode::Editing);

    editor.remove_attribute("no-such-key");
    assert!(!rx.has_changed().unwrap());

    editor.remove_attribute("role");
    assert!(rx.has_changed().unwrap());
    assert!(rx.borrow_and_update().credential.attributes.is_empty());
}
