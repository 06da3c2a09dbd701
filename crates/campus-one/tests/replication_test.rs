use campus_one::config::Config;
use campus_one::lifecycle::CampusSystem;
use campus_one::model::{Credential, User, UserRole};
use campus_one::registry::{LoginRequest, MergeReport, RegistryError};
use campus_one::relay::ConsoleTransport;
use campus_one::replication::{self, ReplicaExport};
use ledger_actor::store::MemoryStore;
use std::sync::Arc;

fn quiet_config() -> Config {
    Config {
        sweep_interval: std::time::Duration::from_secs(3600),
        relay_flip_delay: std::time::Duration::from_millis(10),
        ..Config::default()
    }
}

fn fresh_system() -> CampusSystem {
    CampusSystem::with_store(
        quiet_config(),
        Arc::new(MemoryStore::new()),
        Arc::new(ConsoleTransport),
    )
}

fn student(name: &str, email: &str) -> LoginRequest {
    LoginRequest {
        name: Some(name.to_string()),
        email: email.to_string(),
        password: "pw".to_string(),
        role: UserRole::Student,
        shop_id: None,
    }
}

#[tokio::test]
async fn importing_your_own_export_changes_nothing() {
    let system = fresh_system();
    system.registry.login(student("Asha", "a@x.edu")).await.unwrap();
    system.registry.login(student("Ravi", "r@x.edu")).await.unwrap();

    let before = system.registry.users().await.unwrap();
    let token = system.export_replica().await.unwrap();

    let report = system.import_replica(&token).await.unwrap();
    assert_eq!(report, MergeReport::default());
    assert_eq!(system.registry.users().await.unwrap(), before);

    // Twice over, still nothing.
    let report = system.import_replica(&token).await.unwrap();
    assert_eq!(report, MergeReport::default());
    assert_eq!(system.registry.users().await.unwrap(), before);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn an_import_carries_one_directory_into_another() {
    let source = fresh_system();
    source.registry.login(student("Asha", "a@x.edu")).await.unwrap();
    source.registry.login(student("Ravi", "r@x.edu")).await.unwrap();
    let token = source.export_replica().await.unwrap();
    source.shutdown().await.unwrap();

    let target = fresh_system();
    target.registry.login(student("Meera", "m@x.edu")).await.unwrap();

    let report = target.import_replica(&token).await.unwrap();
    assert_eq!(report, MergeReport { added: 2, replaced: 0 });

    let emails: Vec<String> = target
        .registry
        .users()
        .await
        .unwrap()
        .iter()
        .map(|u| u.email.clone())
        .collect();
    assert_eq!(emails, vec!["m@x.edu", "a@x.edu", "r@x.edu"]);

    target.shutdown().await.unwrap();
}

#[tokio::test]
async fn on_a_conflicting_email_the_incoming_record_wins() {
    let system = fresh_system();
    system.registry.login(student("Old", "a@x.edu")).await.unwrap();

    let incoming = User {
        id: "imported-1".to_string(),
        name: "New".to_string(),
        email: "A@X.edu".to_string(),
        credential: Credential::derive("imported-password"),
        role: UserRole::Student,
        shop_id: None,
    };
    let token = replication::encode(&ReplicaExport {
        users: vec![incoming],
        activity: None,
    })
    .unwrap();

    let report = system.import_replica(&token).await.unwrap();
    assert_eq!(report, MergeReport { added: 0, replaced: 1 });

    let users = system.registry.users().await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].name, "New");
    // The imported credential is now the one that counts.
    assert!(users[0].credential.matches("imported-password"));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn a_malformed_token_is_rejected_whole() {
    let system = fresh_system();
    system.registry.login(student("Asha", "a@x.edu")).await.unwrap();
    let before = system.registry.users().await.unwrap();

    for token in ["*** garbage ***", "", "cGxhaW4gdGV4dA=="] {
        let err = system.import_replica(token).await.unwrap_err();
        assert!(matches!(err, RegistryError::Replication(_)));
    }
    assert_eq!(system.registry.users().await.unwrap(), before);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn the_export_carries_the_activity_trail() {
    let system = fresh_system();
    let user = system.session.login(student("Asha", "a@x.edu")).await.unwrap();
    system.session.record(&user, "custom_action", "").await.unwrap();

    let token = system.export_replica().await.unwrap();
    let export = replication::decode(&token).unwrap();

    assert_eq!(export.users.len(), 1);
    let activity = export.activity.expect("activity rides along");
    assert!(activity.iter().any(|e| e.action == "login"));
    assert!(activity.iter().any(|e| e.action == "custom_action"));

    system.shutdown().await.unwrap();
}
