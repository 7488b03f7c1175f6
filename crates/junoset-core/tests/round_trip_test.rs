#![allow(clippy::unwrap_used)]

use junoset_core::model::{
    IcmpRateLimit, Inet6BackupRouter, InternetOptions, Services, SshService, Syslog,
    SyslogArchive,
};
use junoset_core::{FieldId, SystemConfig, ValidationError, build, parse};
use pretty_assertions::assert_eq;

/// A model touching every block and every value shape.
fn full_model() -> SystemConfig {
    SystemConfig {
        authentication_order: vec!["radius".into(), "password".into()],
        auto_snapshot: true,
        domain_name: Some("example.net".into()),
        host_name: Some("edge1".into()),
        inet6_backup_router: Some(Inet6BackupRouter {
            address: Some("2001:db8::1".into()),
            destination: vec!["::/0".into(), "2001:db8:ffff::/48".into()],
        }),
        internet_options: Some(InternetOptions {
            gre_path_mtu_discovery: true,
            icmpv4_rate_limit: Some(IcmpRateLimit {
                bucket_size: Some(0),
                packet_rate: Some(1000),
            }),
            icmpv6_rate_limit: Some(IcmpRateLimit {
                bucket_size: None,
                packet_rate: Some(0),
            }),
            ipv6_duplicate_addr_detection_transmits: Some(3),
            no_ipv6_path_mtu_discovery: true,
            no_tcp_reset: Some("drop-all-tcp".into()),
            source_port_upper_limit: Some(60000),
            tcp_mss: Some(1400),
            ..InternetOptions::default()
        }),
        max_configuration_rollbacks: Some(0),
        max_configurations_on_flash: Some(49),
        name_server: vec!["192.0.2.53".into(), "2001:db8::53".into()],
        no_redirects: true,
        services: Some(Services {
            ssh: Some(SshService {
                ciphers: vec!["aes256-ctr".into(), "aes128-ctr".into()],
                client_alive_count_max: Some(0),
                fingerprint_hash: Some("sha2-256".into()),
                no_passwords: true,
                port: Some(2222),
                protocol_version: vec!["v2".into()],
                root_login: Some("deny".into()),
                tcp_forwarding: true,
                ..SshService::default()
            }),
        }),
        syslog: Some(Syslog {
            archive: Some(SyslogArchive {
                no_binary_data: true,
                files: Some(10),
                size: Some(1_048_576),
                ..SyslogArchive::default()
            }),
            log_rotate_frequency: Some(15),
            source_address: Some("192.0.2.1".into()),
        }),
        time_zone: Some("Europe/Paris".into()),
        tracing_dest_override_syslog_host: Some("192.0.2.200".into()),
        ..SystemConfig::default()
    }
}

#[test]
fn end_to_end_scenario() {
    let text = "set authentication-order password\n\
                set host-name edge1\n\
                set services ssh port 2222\n\
                set services ssh tcp-forwarding\n";
    let config = parse(text).unwrap();

    let expected = SystemConfig {
        authentication_order: vec!["password".into()],
        host_name: Some("edge1".into()),
        services: Some(Services {
            ssh: Some(SshService {
                port: Some(2222),
                tcp_forwarding: true,
                ..SshService::default()
            }),
        }),
        ..SystemConfig::default()
    };
    assert_eq!(config, expected);

    let mut rebuilt: Vec<String> = build(&config)
        .unwrap()
        .iter()
        .map(ToString::to_string)
        .collect();
    rebuilt.sort();
    let mut original: Vec<String> = text
        .lines()
        .map(|l| l.trim_start_matches("set ").to_owned())
        .collect();
    original.sort();
    assert_eq!(rebuilt, original);
}

#[test]
fn full_model_round_trips() {
    let model = full_model();
    let text = build(&model).unwrap().to_display_set();
    assert_eq!(parse(&text).unwrap(), model);
}

#[test]
fn round_trip_is_order_independent() {
    let model = full_model();
    let text = build(&model).unwrap().to_display_set();
    let reversed: String = text.lines().rev().map(|l| format!("{l}\n")).collect();
    assert_eq!(parse(&reversed).unwrap(), model);
}

#[test]
fn build_is_idempotent() {
    let model = full_model();
    assert_eq!(build(&model).unwrap(), build(&model).unwrap());
}

#[test]
fn rendered_display_set() {
    let text = build(&full_model()).unwrap().to_display_set();
    insta::assert_snapshot!(text, @r"
    set authentication-order radius
    set authentication-order password
    set auto-snapshot
    set domain-name example.net
    set host-name edge1
    set inet6-backup-router 2001:db8::1
    set inet6-backup-router destination ::/0
    set inet6-backup-router destination 2001:db8:ffff::/48
    set internet-options gre-path-mtu-discovery
    set internet-options icmpv4-rate-limit bucket-size 0
    set internet-options icmpv4-rate-limit packet-rate 1000
    set internet-options icmpv6-rate-limit packet-rate 0
    set internet-options ipv6-duplicate-addr-detection-transmits 3
    set internet-options no-ipv6-path-mtu-discovery
    set internet-options no-tcp-reset drop-all-tcp
    set internet-options source-port upper-limit 60000
    set internet-options tcp-mss 1400
    set max-configuration-rollbacks 0
    set max-configurations-on-flash 49
    set name-server 192.0.2.53
    set name-server 2001:db8::53
    set no-redirects
    set services ssh ciphers aes256-ctr
    set services ssh ciphers aes128-ctr
    set services ssh client-alive-count-max 0
    set services ssh fingerprint-hash sha2-256
    set services ssh no-passwords
    set services ssh port 2222
    set services ssh protocol-version v2
    set services ssh root-login deny
    set services ssh tcp-forwarding
    set syslog archive
    set syslog archive no-binary-data
    set syslog archive files 10
    set syslog archive size 1048576
    set syslog log-rotate-frequency 15
    set syslog source-address 192.0.2.1
    set time-zone Europe/Paris
    set tracing destination-override syslog host 192.0.2.200
    ");
}

#[test]
fn statement_set_serializes_with_field_names() {
    let config = parse("set services ssh port 2222\nset auto-snapshot\n").unwrap();
    let json = serde_json::to_value(build(&config).unwrap()).unwrap();
    assert_eq!(
        json,
        serde_json::json!([
            { "field": "auto_snapshot", "path": "auto-snapshot" },
            { "field": "services.ssh.port", "path": "services ssh port", "value": "2222" },
        ])
    );
}

#[test]
fn conflict_scenario_emits_nothing() {
    let mut model = full_model();
    if let Some(ssh) = model.services.as_mut().and_then(|s| s.ssh.as_mut()) {
        ssh.no_tcp_forwarding = true;
    }
    assert_eq!(
        build(&model).unwrap_err(),
        ValidationError::Conflict {
            first: FieldId::SshNoTcpForwarding,
            second: FieldId::SshTcpForwarding,
        }
    );
}

#[test]
fn sentinel_scalars_never_appear() {
    let yaml = "\
host_name: edge1
max_configuration_rollbacks: -1
max_configurations_on_flash: 0
domain_name: ''
services:
  ssh:
    port: 0
    client_alive_interval: -1
    tcp_forwarding: true
";
    let model: SystemConfig = serde_yaml::from_str(yaml).unwrap();
    let lines: Vec<String> = build(&model)
        .unwrap()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(
        lines,
        [
            "host-name edge1",
            "max-configurations-on-flash 0",
            "services ssh tcp-forwarding",
        ]
    );
}

#[test]
fn parsed_model_survives_yaml_reload() {
    let text = "set services ssh port 0\n\
                set services ssh root-login deny\n\
                set syslog archive files 0\n\
                set syslog archive size 0\n\
                set max-configuration-rollbacks 0\n";
    let parsed = parse(text).unwrap();
    let yaml = serde_yaml::to_string(&parsed).unwrap();
    let reloaded: SystemConfig = serde_yaml::from_str(&yaml).unwrap();

    assert_eq!(reloaded, parsed);
    assert_eq!(build(&reloaded).unwrap(), build(&parsed).unwrap());
    assert!(parsed.syslog.is_none());
    assert_eq!(parsed.max_configuration_rollbacks, Some(0));
}

#[test]
fn list_accumulates_in_encounter_order() {
    let text = "set name-server 192.0.2.3\n\
                set host-name edge1\n\
                set name-server 192.0.2.1\n\
                set login message hello\n\
                set name-server 192.0.2.2\n";
    let config = parse(text).unwrap();
    assert_eq!(
        config.name_server,
        ["192.0.2.3", "192.0.2.1", "192.0.2.2"]
    );
}

#[test]
fn blocks_exist_only_when_mentioned() {
    let config = parse("set host-name edge1\n").unwrap();
    assert!(config.syslog.is_none());
    assert!(config.internet_options.is_none());

    let config = parse("set syslog archive files 5\n").unwrap();
    let syslog = config.syslog.unwrap();
    assert_eq!(syslog.log_rotate_frequency, None);
    assert_eq!(syslog.source_address, None);
    assert_eq!(
        syslog.archive,
        Some(SyslogArchive {
            files: Some(5),
            ..SyslogArchive::default()
        })
    );
}

#[test]
fn serde_output_omits_unset_fields() {
    let config = parse("set host-name edge1\nset services ssh port 2222\n").unwrap();
    let json = serde_json::to_value(&config).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "host_name": "edge1",
            "services": { "ssh": { "port": 2222 } }
        })
    );
}

#[test]
fn unknown_model_keys_are_rejected() {
    let err = serde_yaml::from_str::<SystemConfig>("hostname: edge1\n").unwrap_err();
    assert!(err.to_string().contains("unknown field"));
}
