#![allow(clippy::unwrap_used)]

use junoset_api::{Error, MemoryDevice, Operation};
use junoset_core::model::{Services, SshService};
use junoset_core::{ErrorKind, SubtreeLock, SystemConfig, SystemResource, schema};
use pretty_assertions::assert_eq;

const RUNNING: &str = "\
set system host-name old-name
set system name-server 192.0.2.1
set system services netconf ssh
set system services ssh port 22
set system services ssh root-login allow
set system login user netops class super-user
set system syslog file messages any notice
set system internet-options tcp-mss 1200
set interfaces ge-0/0/0 unit 0 family inet address 192.0.2.10/24
";

fn desired() -> SystemConfig {
    SystemConfig {
        host_name: Some("edge1".into()),
        services: Some(Services {
            ssh: Some(SshService {
                port: Some(2222),
                tcp_forwarding: true,
                ..SshService::default()
            }),
        }),
        ..SystemConfig::default()
    }
}

fn device() -> MemoryDevice {
    MemoryDevice::from_snapshot(RUNNING).unwrap()
}

#[tokio::test]
async fn read_maps_only_managed_statements() {
    let resource = SystemResource::new(device());
    let config = resource.read().await.unwrap();

    assert_eq!(config.host_name.as_deref(), Some("old-name"));
    assert_eq!(config.name_server, ["192.0.2.1"]);
    let ssh = config.services.unwrap().ssh.unwrap();
    assert_eq!(ssh.port, Some(22));
    assert_eq!(ssh.root_login.as_deref(), Some("allow"));
    assert_eq!(config.internet_options.unwrap().tcp_mss, Some(1200));
    assert!(config.syslog.is_none());
}

#[tokio::test]
async fn update_replaces_managed_and_keeps_unmanaged() {
    let device = device();
    let resource = SystemResource::new(device.clone());

    let state = resource.begin().await.update(&desired()).await.unwrap();
    assert_eq!(state, desired());

    let committed = device.committed_lines().await;
    assert_eq!(
        committed,
        [
            "system services netconf ssh",
            "system login user netops class super-user",
            "system syslog file messages any notice",
            "interfaces ge-0/0/0 unit 0 family inet address 192.0.2.10/24",
            "system host-name edge1",
            "system services ssh port 2222",
            "system services ssh tcp-forwarding",
        ]
    );

    let commits = device.commits().await;
    assert_eq!(commits.len(), 1);
    assert_eq!(commits[0].comment, "update resource junos_system");
    assert!(!device.is_locked().await);
}

#[tokio::test]
async fn create_sets_without_deleting() {
    let device = device();
    let resource = SystemResource::new(device.clone());

    let state = resource.begin().await.create(&desired()).await.unwrap();

    // Existing managed values survive, so the read-back sees both.
    assert_eq!(state.host_name.as_deref(), Some("edge1"));
    assert_eq!(state.name_server, ["192.0.2.1"]);
    let committed = device.committed_lines().await;
    assert!(committed.contains(&"system host-name old-name".to_owned()));
    assert_eq!(
        device.commits().await[0].comment,
        "create resource junos_system"
    );
}

#[tokio::test]
async fn create_replaces_single_valued_leaves() {
    let device = device().with_leaves(schema::value_leaves());
    let resource = SystemResource::new(device.clone());
    let config = SystemConfig {
        name_server: vec!["192.0.2.2".into()],
        ..desired()
    };

    let state = resource.begin().await.create(&config).await.unwrap();

    assert_eq!(state.host_name.as_deref(), Some("edge1"));
    assert_eq!(state.name_server, ["192.0.2.1", "192.0.2.2"]);
    assert_eq!(state.services.unwrap().ssh.unwrap().port, Some(2222));
    let committed = device.committed_lines().await;
    assert!(!committed.contains(&"system host-name old-name".to_owned()));
    assert!(!committed.contains(&"system services ssh port 22".to_owned()));
}

#[tokio::test]
async fn update_keeps_inner_spacing_of_quoted_values() {
    let device = device().with_leaves(schema::value_leaves());
    let resource = SystemResource::new(device.clone());
    let config = SystemConfig {
        tracing_dest_override_syslog_host: Some("a  b".into()),
        ..desired()
    };

    let state = resource.begin().await.update(&config).await.unwrap();
    assert_eq!(state, config);
    assert_eq!(resource.read().await.unwrap(), config);
}

#[tokio::test]
async fn update_with_empty_model_clears_managed_paths() {
    let device = device();
    let resource = SystemResource::new(device.clone());

    let state = resource
        .begin()
        .await
        .update(&SystemConfig::default())
        .await
        .unwrap();
    assert!(state.is_empty());
    assert!(
        device
            .committed_lines()
            .await
            .contains(&"system services netconf ssh".to_owned())
    );
}

#[tokio::test]
async fn failed_commit_discards_and_leaves_device_untouched() {
    let device = device();
    let before = device.committed_lines().await;
    let resource = SystemResource::new(device.clone());

    device
        .fail_next(
            Operation::Commit,
            Error::CommitFailed {
                message: "'ssh' is not enabled".into(),
            },
        )
        .await;
    let err = resource.begin().await.update(&desired()).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(err.to_string(), "commit failed: configuration rejected: 'ssh' is not enabled");
    assert_eq!(device.committed_lines().await, before);
    assert!(device.commits().await.is_empty());
    assert!(device.journal().await.contains(&Operation::Discard));
    assert!(!device.is_locked().await);
}

#[tokio::test]
async fn failed_apply_discards_before_commit() {
    let device = device();
    let before = device.committed_lines().await;
    let resource = SystemResource::new(device.clone());

    device
        .fail_next(
            Operation::Apply,
            Error::Rpc {
                operation: "load-configuration".into(),
                message: "syntax error".into(),
            },
        )
        .await;
    let err = resource.begin().await.update(&desired()).await.unwrap_err();

    assert!(err.to_string().starts_with("delete failed"));
    assert_eq!(
        device.journal().await,
        [
            Operation::Open,
            Operation::Lock,
            Operation::Apply,
            Operation::Discard,
            Operation::Close,
        ]
    );
    assert_eq!(device.committed_lines().await, before);
}

#[tokio::test]
async fn lock_denial_is_reported_without_discard() {
    let device = device();
    device.hold_lock(99).await;
    let resource = SystemResource::new(device.clone());

    let err = resource.begin().await.update(&desired()).await.unwrap_err();

    assert!(err.is_lock_denied());
    assert_eq!(
        device.journal().await,
        [Operation::Open, Operation::Lock, Operation::Close]
    );
    // The outside holder keeps its lock.
    assert!(device.is_locked().await);
}

#[tokio::test]
async fn invalid_model_never_reaches_the_device() {
    let device = device();
    let resource = SystemResource::new(device.clone());
    let mut config = desired();
    if let Some(ssh) = config.services.as_mut().and_then(|s| s.ssh.as_mut()) {
        ssh.no_tcp_forwarding = true;
    }

    let err = resource.begin().await.update(&config).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(device.journal().await.is_empty());
}

#[tokio::test]
async fn cycles_sharing_a_lock_do_not_interleave() {
    let device = MemoryDevice::new();
    let lock = SubtreeLock::new();
    let first = SystemResource::new(device.clone()).with_lock(lock.clone());
    let second = SystemResource::new(device.clone()).with_lock(lock);

    let cycle = first.begin().await;
    let waiting = tokio::time::timeout(std::time::Duration::from_millis(50), second.begin()).await;
    assert!(waiting.is_err(), "second cycle started while the first was open");

    cycle.update(&desired()).await.unwrap();
    let state = second.begin().await.read().await.unwrap();
    assert_eq!(state, desired());
}
