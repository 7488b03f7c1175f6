#![allow(clippy::unwrap_used)]

use junoset_api::{Error, MemoryDevice, Operation, Transport, display_set_command};
use pretty_assertions::assert_eq;

const SNAPSHOT: &str = "\
set system host-name edge1
set system services ssh port 2222
set system services netconf ssh
set interfaces ge-0/0/0 unit 0 family inet address 192.0.2.1/24
";

#[tokio::test]
async fn query_returns_relative_set_lines_in_markers() {
    let device = MemoryDevice::from_snapshot(SNAPSHOT).unwrap();
    let mut session = device.open().await.unwrap();

    let output = device
        .query(&mut session, &display_set_command("system"))
        .await
        .unwrap();
    device.close(session).await.unwrap();

    assert_eq!(
        output,
        "<configuration-output>\n\
         set host-name edge1\n\
         set services ssh port 2222\n\
         set services netconf ssh\n\
         </configuration-output>\n"
    );
}

#[tokio::test]
async fn commit_replaces_committed_configuration() {
    let device = MemoryDevice::from_snapshot(SNAPSHOT).unwrap();
    let mut session = device.open().await.unwrap();
    device.lock(&mut session).await.unwrap();
    device
        .apply(
            &mut session,
            &[
                "delete system host-name".into(),
                "set system host-name edge2".into(),
            ],
        )
        .await
        .unwrap();
    device.commit(&mut session, "rename").await.unwrap();
    device.close(session).await.unwrap();

    let lines = device.committed_lines().await;
    assert!(lines.contains(&"system host-name edge2".to_owned()));
    assert!(!lines.contains(&"system host-name edge1".to_owned()));

    let commits = device.commits().await;
    assert_eq!(commits.len(), 1);
    assert_eq!(commits[0].comment, "rename");
    assert!(!device.is_locked().await);
}

#[tokio::test]
async fn discard_drops_uncommitted_candidate() {
    let device = MemoryDevice::from_snapshot(SNAPSHOT).unwrap();
    let before = device.snapshot().await;

    let mut session = device.open().await.unwrap();
    device.lock(&mut session).await.unwrap();
    device
        .apply(&mut session, &["delete system".into()])
        .await
        .unwrap();
    device.discard(&mut session).await.unwrap();
    device.commit(&mut session, "noop").await.unwrap();
    device.close(session).await.unwrap();

    assert_eq!(device.snapshot().await, before);
}

#[tokio::test]
async fn lock_held_elsewhere_is_denied() {
    let device = MemoryDevice::new();
    device.hold_lock(99).await;

    let mut session = device.open().await.unwrap();
    let err = device.lock(&mut session).await.unwrap_err();
    assert!(err.is_lock_denied());
    assert!(err.to_string().contains("session 99"));
}

#[tokio::test]
async fn commit_without_lock_is_rejected() {
    let device = MemoryDevice::new();
    let mut session = device.open().await.unwrap();
    let err = device.commit(&mut session, "x").await.unwrap_err();
    assert!(matches!(err, Error::InvalidState { .. }));
}

#[tokio::test]
async fn injected_failure_fires_once_and_is_journaled() {
    let device = MemoryDevice::new();
    device
        .fail_next(
            Operation::Apply,
            Error::Rpc {
                operation: "load-configuration".into(),
                message: "syntax error".into(),
            },
        )
        .await;

    let mut session = device.open().await.unwrap();
    let statements = vec!["set system host-name edge1".to_owned()];
    assert!(device.apply(&mut session, &statements).await.is_err());
    device.apply(&mut session, &statements).await.unwrap();
    device.close(session).await.unwrap();

    assert_eq!(
        device.journal().await,
        [
            Operation::Open,
            Operation::Apply,
            Operation::Apply,
            Operation::Close
        ]
    );
}

#[tokio::test]
async fn snapshot_round_trips_committed_lines() {
    let device = MemoryDevice::from_snapshot(SNAPSHOT).unwrap();
    let copy = MemoryDevice::from_snapshot(&device.snapshot().await).unwrap();
    assert_eq!(copy.committed_lines().await, device.committed_lines().await);
}

#[test]
fn snapshot_skips_comments_and_rejects_bare_paths() {
    let device = MemoryDevice::from_snapshot("# saved by hand\n\nset system host-name a\n").unwrap();
    let lines = tokio_test::block_on(device.committed_lines());
    assert_eq!(lines, vec!["system host-name a".to_owned()]);

    let err = MemoryDevice::from_snapshot("set system ntp\nsystem host-name a\n").unwrap_err();
    assert!(err.to_string().contains("snapshot line 2"), "{err}");
}
