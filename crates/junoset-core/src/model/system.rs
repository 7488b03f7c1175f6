// ── System configuration model ──
//
// One struct per configuration block. Optional blocks are `Option<_>`,
// repeated statements are `Vec<String>` in device order, and unset
// scalars are `None`.

use serde::{Deserialize, Serialize};

use super::sentinel;

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(value: &bool) -> bool {
    !*value
}

/// The `system` subtree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SystemConfig {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub authentication_order: Vec<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub auto_snapshot: bool,
    #[serde(with = "sentinel::text", skip_serializing_if = "Option::is_none")]
    pub domain_name: Option<String>,
    #[serde(with = "sentinel::text", skip_serializing_if = "Option::is_none")]
    pub host_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inet6_backup_router: Option<Inet6BackupRouter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internet_options: Option<InternetOptions>,
    #[serde(with = "sentinel::minus_one", skip_serializing_if = "Option::is_none")]
    pub max_configuration_rollbacks: Option<u32>,
    #[serde(with = "sentinel::minus_one", skip_serializing_if = "Option::is_none")]
    pub max_configurations_on_flash: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub name_server: Vec<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub no_ping_record_route: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub no_ping_time_stamp: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub no_redirects: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub no_redirects_ipv6: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub services: Option<Services>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub syslog: Option<Syslog>,
    #[serde(with = "sentinel::text", skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    /// `tracing destination-override syslog host`
    #[serde(with = "sentinel::text", skip_serializing_if = "Option::is_none")]
    pub tracing_dest_override_syslog_host: Option<String>,
}

/// `inet6-backup-router`: the address is required once the block exists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Inet6BackupRouter {
    #[serde(with = "sentinel::text", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub destination: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InternetOptions {
    #[serde(skip_serializing_if = "is_false")]
    pub gre_path_mtu_discovery: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icmpv4_rate_limit: Option<IcmpRateLimit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icmpv6_rate_limit: Option<IcmpRateLimit>,
    #[serde(skip_serializing_if = "is_false")]
    pub ipip_path_mtu_discovery: bool,
    #[serde(with = "sentinel::minus_one", skip_serializing_if = "Option::is_none")]
    pub ipv6_duplicate_addr_detection_transmits: Option<u32>,
    #[serde(skip_serializing_if = "is_false")]
    pub ipv6_path_mtu_discovery: bool,
    #[serde(with = "sentinel::zero", skip_serializing_if = "Option::is_none")]
    pub ipv6_path_mtu_discovery_timeout: Option<u32>,
    #[serde(skip_serializing_if = "is_false")]
    pub ipv6_reject_zero_hop_limit: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub no_gre_path_mtu_discovery: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub no_ipip_path_mtu_discovery: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub no_ipv6_path_mtu_discovery: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub no_ipv6_reject_zero_hop_limit: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub no_path_mtu_discovery: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub no_source_quench: bool,
    /// `drop-all-tcp` or `drop-tcp-with-syn-only`.
    #[serde(with = "sentinel::text", skip_serializing_if = "Option::is_none")]
    pub no_tcp_reset: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub no_tcp_rfc1323: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub no_tcp_rfc1323_paws: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub path_mtu_discovery: bool,
    #[serde(with = "sentinel::zero", skip_serializing_if = "Option::is_none")]
    pub source_port_upper_limit: Option<u32>,
    #[serde(skip_serializing_if = "is_false")]
    pub source_quench: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub tcp_drop_synfin_set: bool,
    #[serde(with = "sentinel::zero", skip_serializing_if = "Option::is_none")]
    pub tcp_mss: Option<u32>,
}

/// `icmpv4-rate-limit` / `icmpv6-rate-limit`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IcmpRateLimit {
    #[serde(with = "sentinel::minus_one", skip_serializing_if = "Option::is_none")]
    pub bucket_size: Option<u32>,
    #[serde(with = "sentinel::minus_one", skip_serializing_if = "Option::is_none")]
    pub packet_rate: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Services {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssh: Option<SshService>,
}

/// `services ssh`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SshService {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub authentication_order: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ciphers: Vec<String>,
    #[serde(with = "sentinel::minus_one", skip_serializing_if = "Option::is_none")]
    pub client_alive_count_max: Option<u32>,
    #[serde(with = "sentinel::minus_one", skip_serializing_if = "Option::is_none")]
    pub client_alive_interval: Option<u32>,
    #[serde(with = "sentinel::zero", skip_serializing_if = "Option::is_none")]
    pub connection_limit: Option<u32>,
    #[serde(with = "sentinel::text", skip_serializing_if = "Option::is_none")]
    pub fingerprint_hash: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hostkey_algorithm: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub key_exchange: Vec<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub log_key_changes: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub macs: Vec<String>,
    #[serde(with = "sentinel::zero", skip_serializing_if = "Option::is_none")]
    pub max_pre_authentication_packets: Option<u32>,
    #[serde(with = "sentinel::zero", skip_serializing_if = "Option::is_none")]
    pub max_sessions_per_connection: Option<u32>,
    #[serde(skip_serializing_if = "is_false")]
    pub no_passwords: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub no_public_keys: bool,
    #[serde(with = "sentinel::zero", skip_serializing_if = "Option::is_none")]
    pub port: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub protocol_version: Vec<String>,
    #[serde(with = "sentinel::zero", skip_serializing_if = "Option::is_none")]
    pub rate_limit: Option<u32>,
    #[serde(with = "sentinel::text", skip_serializing_if = "Option::is_none")]
    pub root_login: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub no_tcp_forwarding: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub tcp_forwarding: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Syslog {
    /// Present means `syslog archive` is configured, even with no options.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archive: Option<SyslogArchive>,
    #[serde(with = "sentinel::zero", skip_serializing_if = "Option::is_none")]
    pub log_rotate_frequency: Option<u32>,
    #[serde(with = "sentinel::text", skip_serializing_if = "Option::is_none")]
    pub source_address: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyslogArchive {
    #[serde(skip_serializing_if = "is_false")]
    pub binary_data: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub no_binary_data: bool,
    #[serde(with = "sentinel::zero", skip_serializing_if = "Option::is_none")]
    pub files: Option<u32>,
    #[serde(with = "sentinel::zero", skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    #[serde(skip_serializing_if = "is_false")]
    pub no_world_readable: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub world_readable: bool,
}

impl SystemConfig {
    /// `true` when nothing at all is configured.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
