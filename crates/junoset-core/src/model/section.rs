// Typed per-block field access for the catalog-driven builder and parser.

use super::system::{
    IcmpRateLimit, Inet6BackupRouter, InternetOptions, Services, SshService, Syslog,
    SyslogArchive, SystemConfig,
};
use crate::schema::{BlockId, FieldId, Sentinel};

/// Current value of an active field. Unset scalars, `false` flags and
/// empty lists have no value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Flag,
    Text(&'a str),
    Int(u32),
    List(&'a [String]),
}

/// A decoded statement value, ready to store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assignment {
    /// Flag set (or marker seen).
    Present,
    /// Scalar text, or one list element.
    Text(String),
    Int(u32),
}

impl Assignment {
    /// The value is how an unset field is spelled: empty text anywhere,
    /// or `0` on a field whose unset sentinel is zero.
    pub fn is_unset(&self, sentinel: Sentinel) -> bool {
        match self {
            Self::Present => false,
            Self::Text(value) => value.is_empty(),
            Self::Int(value) => *value == 0 && sentinel == Sentinel::Zero,
        }
    }
}

/// Read/assign access to the fields one block declares.
///
/// Ids that do not belong to the block read as `None` and ignore
/// assignment; the catalog only routes a field to its own block.
pub trait Section {
    fn value(&self, field: FieldId) -> Option<FieldValue<'_>>;
    fn assign(&mut self, field: FieldId, assignment: Assignment);
}

// ── Helpers ─────────────────────────────────────────────────────────

fn flag(value: bool) -> Option<FieldValue<'static>> {
    value.then_some(FieldValue::Flag)
}

fn text(value: Option<&String>) -> Option<FieldValue<'_>> {
    value.map(|v| FieldValue::Text(v.as_str()))
}

fn int(value: Option<u32>) -> Option<FieldValue<'static>> {
    value.map(FieldValue::Int)
}

fn list(value: &[String]) -> Option<FieldValue<'_>> {
    (!value.is_empty()).then_some(FieldValue::List(value))
}

impl Assignment {
    fn set_flag(self, slot: &mut bool) {
        if self == Self::Present {
            *slot = true;
        }
    }

    fn set_text(self, slot: &mut Option<String>) {
        if let Self::Text(value) = self {
            *slot = Some(value);
        }
    }

    fn set_int(self, slot: &mut Option<u32>) {
        if let Self::Int(value) = self {
            *slot = Some(value);
        }
    }

    fn push(self, slot: &mut Vec<String>) {
        if let Self::Text(value) = self {
            slot.push(value);
        }
    }
}

// ── Blocks ──────────────────────────────────────────────────────────

impl Section for SystemConfig {
    fn value(&self, field: FieldId) -> Option<FieldValue<'_>> {
        match field {
            FieldId::AuthenticationOrder => list(&self.authentication_order),
            FieldId::AutoSnapshot => flag(self.auto_snapshot),
            FieldId::DomainName => text(self.domain_name.as_ref()),
            FieldId::HostName => text(self.host_name.as_ref()),
            FieldId::MaxConfigurationRollbacks => int(self.max_configuration_rollbacks),
            FieldId::MaxConfigurationsOnFlash => int(self.max_configurations_on_flash),
            FieldId::NameServer => list(&self.name_server),
            FieldId::NoPingRecordRoute => flag(self.no_ping_record_route),
            FieldId::NoPingTimeStamp => flag(self.no_ping_time_stamp),
            FieldId::NoRedirects => flag(self.no_redirects),
            FieldId::NoRedirectsIpv6 => flag(self.no_redirects_ipv6),
            FieldId::TimeZone => text(self.time_zone.as_ref()),
            FieldId::TracingDestOverrideSyslogHost => {
                text(self.tracing_dest_override_syslog_host.as_ref())
            }
            _ => None,
        }
    }

    fn assign(&mut self, field: FieldId, assignment: Assignment) {
        match field {
            FieldId::AuthenticationOrder => assignment.push(&mut self.authentication_order),
            FieldId::AutoSnapshot => assignment.set_flag(&mut self.auto_snapshot),
            FieldId::DomainName => assignment.set_text(&mut self.domain_name),
            FieldId::HostName => assignment.set_text(&mut self.host_name),
            FieldId::MaxConfigurationRollbacks => {
                assignment.set_int(&mut self.max_configuration_rollbacks);
            }
            FieldId::MaxConfigurationsOnFlash => {
                assignment.set_int(&mut self.max_configurations_on_flash);
            }
            FieldId::NameServer => assignment.push(&mut self.name_server),
            FieldId::NoPingRecordRoute => assignment.set_flag(&mut self.no_ping_record_route),
            FieldId::NoPingTimeStamp => assignment.set_flag(&mut self.no_ping_time_stamp),
            FieldId::NoRedirects => assignment.set_flag(&mut self.no_redirects),
            FieldId::NoRedirectsIpv6 => assignment.set_flag(&mut self.no_redirects_ipv6),
            FieldId::TimeZone => assignment.set_text(&mut self.time_zone),
            FieldId::TracingDestOverrideSyslogHost => {
                assignment.set_text(&mut self.tracing_dest_override_syslog_host);
            }
            _ => {}
        }
    }
}

impl Section for Inet6BackupRouter {
    fn value(&self, field: FieldId) -> Option<FieldValue<'_>> {
        match field {
            FieldId::Inet6BackupRouterAddress => text(self.address.as_ref()),
            FieldId::Inet6BackupRouterDestination => list(&self.destination),
            _ => None,
        }
    }

    fn assign(&mut self, field: FieldId, assignment: Assignment) {
        match field {
            FieldId::Inet6BackupRouterAddress => assignment.set_text(&mut self.address),
            FieldId::Inet6BackupRouterDestination => assignment.push(&mut self.destination),
            _ => {}
        }
    }
}

impl Section for InternetOptions {
    fn value(&self, field: FieldId) -> Option<FieldValue<'_>> {
        match field {
            FieldId::GrePathMtuDiscovery => flag(self.gre_path_mtu_discovery),
            FieldId::IpipPathMtuDiscovery => flag(self.ipip_path_mtu_discovery),
            FieldId::Ipv6DuplicateAddrDetectionTransmits => {
                int(self.ipv6_duplicate_addr_detection_transmits)
            }
            FieldId::Ipv6PathMtuDiscovery => flag(self.ipv6_path_mtu_discovery),
            FieldId::Ipv6PathMtuDiscoveryTimeout => int(self.ipv6_path_mtu_discovery_timeout),
            FieldId::Ipv6RejectZeroHopLimit => flag(self.ipv6_reject_zero_hop_limit),
            FieldId::NoGrePathMtuDiscovery => flag(self.no_gre_path_mtu_discovery),
            FieldId::NoIpipPathMtuDiscovery => flag(self.no_ipip_path_mtu_discovery),
            FieldId::NoIpv6PathMtuDiscovery => flag(self.no_ipv6_path_mtu_discovery),
            FieldId::NoIpv6RejectZeroHopLimit => flag(self.no_ipv6_reject_zero_hop_limit),
            FieldId::NoPathMtuDiscovery => flag(self.no_path_mtu_discovery),
            FieldId::NoSourceQuench => flag(self.no_source_quench),
            FieldId::NoTcpReset => text(self.no_tcp_reset.as_ref()),
            FieldId::NoTcpRfc1323 => flag(self.no_tcp_rfc1323),
            FieldId::NoTcpRfc1323Paws => flag(self.no_tcp_rfc1323_paws),
            FieldId::PathMtuDiscovery => flag(self.path_mtu_discovery),
            FieldId::SourcePortUpperLimit => int(self.source_port_upper_limit),
            FieldId::SourceQuench => flag(self.source_quench),
            FieldId::TcpDropSynfinSet => flag(self.tcp_drop_synfin_set),
            FieldId::TcpMss => int(self.tcp_mss),
            _ => None,
        }
    }

    fn assign(&mut self, field: FieldId, assignment: Assignment) {
        match field {
            FieldId::GrePathMtuDiscovery => assignment.set_flag(&mut self.gre_path_mtu_discovery),
            FieldId::IpipPathMtuDiscovery => {
                assignment.set_flag(&mut self.ipip_path_mtu_discovery);
            }
            FieldId::Ipv6DuplicateAddrDetectionTransmits => {
                assignment.set_int(&mut self.ipv6_duplicate_addr_detection_transmits);
            }
            FieldId::Ipv6PathMtuDiscovery => {
                assignment.set_flag(&mut self.ipv6_path_mtu_discovery);
            }
            FieldId::Ipv6PathMtuDiscoveryTimeout => {
                assignment.set_int(&mut self.ipv6_path_mtu_discovery_timeout);
            }
            FieldId::Ipv6RejectZeroHopLimit => {
                assignment.set_flag(&mut self.ipv6_reject_zero_hop_limit);
            }
            FieldId::NoGrePathMtuDiscovery => {
                assignment.set_flag(&mut self.no_gre_path_mtu_discovery);
            }
            FieldId::NoIpipPathMtuDiscovery => {
                assignment.set_flag(&mut self.no_ipip_path_mtu_discovery);
            }
            FieldId::NoIpv6PathMtuDiscovery => {
                assignment.set_flag(&mut self.no_ipv6_path_mtu_discovery);
            }
            FieldId::NoIpv6RejectZeroHopLimit => {
                assignment.set_flag(&mut self.no_ipv6_reject_zero_hop_limit);
            }
            FieldId::NoPathMtuDiscovery => assignment.set_flag(&mut self.no_path_mtu_discovery),
            FieldId::NoSourceQuench => assignment.set_flag(&mut self.no_source_quench),
            FieldId::NoTcpReset => assignment.set_text(&mut self.no_tcp_reset),
            FieldId::NoTcpRfc1323 => assignment.set_flag(&mut self.no_tcp_rfc1323),
            FieldId::NoTcpRfc1323Paws => assignment.set_flag(&mut self.no_tcp_rfc1323_paws),
            FieldId::PathMtuDiscovery => assignment.set_flag(&mut self.path_mtu_discovery),
            FieldId::SourcePortUpperLimit => {
                assignment.set_int(&mut self.source_port_upper_limit);
            }
            FieldId::SourceQuench => assignment.set_flag(&mut self.source_quench),
            FieldId::TcpDropSynfinSet => assignment.set_flag(&mut self.tcp_drop_synfin_set),
            FieldId::TcpMss => assignment.set_int(&mut self.tcp_mss),
            _ => {}
        }
    }
}

/// Shared by the v4 and v6 blocks; each answers to its own field ids.
impl Section for IcmpRateLimit {
    fn value(&self, field: FieldId) -> Option<FieldValue<'_>> {
        match field {
            FieldId::Icmpv4BucketSize | FieldId::Icmpv6BucketSize => int(self.bucket_size),
            FieldId::Icmpv4PacketRate | FieldId::Icmpv6PacketRate => int(self.packet_rate),
            _ => None,
        }
    }

    fn assign(&mut self, field: FieldId, assignment: Assignment) {
        match field {
            FieldId::Icmpv4BucketSize | FieldId::Icmpv6BucketSize => {
                assignment.set_int(&mut self.bucket_size);
            }
            FieldId::Icmpv4PacketRate | FieldId::Icmpv6PacketRate => {
                assignment.set_int(&mut self.packet_rate);
            }
            _ => {}
        }
    }
}

impl Section for Services {
    fn value(&self, _field: FieldId) -> Option<FieldValue<'_>> {
        None
    }

    fn assign(&mut self, _field: FieldId, _assignment: Assignment) {}
}

impl Section for SshService {
    fn value(&self, field: FieldId) -> Option<FieldValue<'_>> {
        match field {
            FieldId::SshAuthenticationOrder => list(&self.authentication_order),
            FieldId::SshCiphers => list(&self.ciphers),
            FieldId::SshClientAliveCountMax => int(self.client_alive_count_max),
            FieldId::SshClientAliveInterval => int(self.client_alive_interval),
            FieldId::SshConnectionLimit => int(self.connection_limit),
            FieldId::SshFingerprintHash => text(self.fingerprint_hash.as_ref()),
            FieldId::SshHostkeyAlgorithm => list(&self.hostkey_algorithm),
            FieldId::SshKeyExchange => list(&self.key_exchange),
            FieldId::SshLogKeyChanges => flag(self.log_key_changes),
            FieldId::SshMacs => list(&self.macs),
            FieldId::SshMaxPreAuthenticationPackets => int(self.max_pre_authentication_packets),
            FieldId::SshMaxSessionsPerConnection => int(self.max_sessions_per_connection),
            FieldId::SshNoPasswords => flag(self.no_passwords),
            FieldId::SshNoPublicKeys => flag(self.no_public_keys),
            FieldId::SshPort => int(self.port),
            FieldId::SshProtocolVersion => list(&self.protocol_version),
            FieldId::SshRateLimit => int(self.rate_limit),
            FieldId::SshRootLogin => text(self.root_login.as_ref()),
            FieldId::SshNoTcpForwarding => flag(self.no_tcp_forwarding),
            FieldId::SshTcpForwarding => flag(self.tcp_forwarding),
            _ => None,
        }
    }

    fn assign(&mut self, field: FieldId, assignment: Assignment) {
        match field {
            FieldId::SshAuthenticationOrder => assignment.push(&mut self.authentication_order),
            FieldId::SshCiphers => assignment.push(&mut self.ciphers),
            FieldId::SshClientAliveCountMax => {
                assignment.set_int(&mut self.client_alive_count_max);
            }
            FieldId::SshClientAliveInterval => assignment.set_int(&mut self.client_alive_interval),
            FieldId::SshConnectionLimit => assignment.set_int(&mut self.connection_limit),
            FieldId::SshFingerprintHash => assignment.set_text(&mut self.fingerprint_hash),
            FieldId::SshHostkeyAlgorithm => assignment.push(&mut self.hostkey_algorithm),
            FieldId::SshKeyExchange => assignment.push(&mut self.key_exchange),
            FieldId::SshLogKeyChanges => assignment.set_flag(&mut self.log_key_changes),
            FieldId::SshMacs => assignment.push(&mut self.macs),
            FieldId::SshMaxPreAuthenticationPackets => {
                assignment.set_int(&mut self.max_pre_authentication_packets);
            }
            FieldId::SshMaxSessionsPerConnection => {
                assignment.set_int(&mut self.max_sessions_per_connection);
            }
            FieldId::SshNoPasswords => assignment.set_flag(&mut self.no_passwords),
            FieldId::SshNoPublicKeys => assignment.set_flag(&mut self.no_public_keys),
            FieldId::SshPort => assignment.set_int(&mut self.port),
            FieldId::SshProtocolVersion => assignment.push(&mut self.protocol_version),
            FieldId::SshRateLimit => assignment.set_int(&mut self.rate_limit),
            FieldId::SshRootLogin => assignment.set_text(&mut self.root_login),
            FieldId::SshNoTcpForwarding => assignment.set_flag(&mut self.no_tcp_forwarding),
            FieldId::SshTcpForwarding => assignment.set_flag(&mut self.tcp_forwarding),
            _ => {}
        }
    }
}

impl Section for Syslog {
    fn value(&self, field: FieldId) -> Option<FieldValue<'_>> {
        match field {
            FieldId::SyslogLogRotateFrequency => int(self.log_rotate_frequency),
            FieldId::SyslogSourceAddress => text(self.source_address.as_ref()),
            _ => None,
        }
    }

    fn assign(&mut self, field: FieldId, assignment: Assignment) {
        match field {
            FieldId::SyslogLogRotateFrequency => assignment.set_int(&mut self.log_rotate_frequency),
            FieldId::SyslogSourceAddress => assignment.set_text(&mut self.source_address),
            _ => {}
        }
    }
}

impl Section for SyslogArchive {
    fn value(&self, field: FieldId) -> Option<FieldValue<'_>> {
        match field {
            FieldId::SyslogArchiveBinaryData => flag(self.binary_data),
            FieldId::SyslogArchiveNoBinaryData => flag(self.no_binary_data),
            FieldId::SyslogArchiveFiles => int(self.files),
            FieldId::SyslogArchiveSize => int(self.size),
            FieldId::SyslogArchiveNoWorldReadable => flag(self.no_world_readable),
            FieldId::SyslogArchiveWorldReadable => flag(self.world_readable),
            _ => None,
        }
    }

    fn assign(&mut self, field: FieldId, assignment: Assignment) {
        match field {
            FieldId::SyslogArchiveBinaryData => assignment.set_flag(&mut self.binary_data),
            FieldId::SyslogArchiveNoBinaryData => assignment.set_flag(&mut self.no_binary_data),
            FieldId::SyslogArchiveFiles => assignment.set_int(&mut self.files),
            FieldId::SyslogArchiveSize => assignment.set_int(&mut self.size),
            FieldId::SyslogArchiveNoWorldReadable => {
                assignment.set_flag(&mut self.no_world_readable);
            }
            FieldId::SyslogArchiveWorldReadable => assignment.set_flag(&mut self.world_readable),
            _ => {}
        }
    }
}

// ── Block navigation ────────────────────────────────────────────────

impl SystemConfig {
    /// The block's section if the block is present.
    pub fn section(&self, block: BlockId) -> Option<&dyn Section> {
        match block {
            BlockId::Root => Some(self as &dyn Section),
            BlockId::Inet6BackupRouter => {
                self.inet6_backup_router.as_ref().map(|b| b as &dyn Section)
            }
            BlockId::InternetOptions => self.internet_options.as_ref().map(|b| b as &dyn Section),
            BlockId::Icmpv4RateLimit => self
                .internet_options
                .as_ref()?
                .icmpv4_rate_limit
                .as_ref()
                .map(|b| b as &dyn Section),
            BlockId::Icmpv6RateLimit => self
                .internet_options
                .as_ref()?
                .icmpv6_rate_limit
                .as_ref()
                .map(|b| b as &dyn Section),
            BlockId::Services => self.services.as_ref().map(|b| b as &dyn Section),
            BlockId::Ssh => self
                .services
                .as_ref()?
                .ssh
                .as_ref()
                .map(|b| b as &dyn Section),
            BlockId::Syslog => self.syslog.as_ref().map(|b| b as &dyn Section),
            BlockId::SyslogArchive => self
                .syslog
                .as_ref()?
                .archive
                .as_ref()
                .map(|b| b as &dyn Section),
        }
    }

    pub fn is_present(&self, block: BlockId) -> bool {
        self.section(block).is_some()
    }

    /// The block's section, creating it and every missing ancestor.
    pub fn materialize(&mut self, block: BlockId) -> &mut dyn Section {
        match block {
            BlockId::Root => self,
            BlockId::Inet6BackupRouter => self.inet6_backup_router.get_or_insert_with(Default::default),
            BlockId::InternetOptions => self.internet_options.get_or_insert_with(Default::default),
            BlockId::Icmpv4RateLimit => self
                .internet_options
                .get_or_insert_with(Default::default)
                .icmpv4_rate_limit
                .get_or_insert_with(Default::default),
            BlockId::Icmpv6RateLimit => self
                .internet_options
                .get_or_insert_with(Default::default)
                .icmpv6_rate_limit
                .get_or_insert_with(Default::default),
            BlockId::Services => self.services.get_or_insert_with(Default::default),
            BlockId::Ssh => self
                .services
                .get_or_insert_with(Default::default)
                .ssh
                .get_or_insert_with(Default::default),
            BlockId::Syslog => self.syslog.get_or_insert_with(Default::default),
            BlockId::SyslogArchive => self
                .syslog
                .get_or_insert_with(Default::default)
                .archive
                .get_or_insert_with(Default::default),
        }
    }

    /// Current value of any field, `None` if unset or its block is absent.
    pub fn value(&self, field: FieldId) -> Option<FieldValue<'_>> {
        let block = crate::schema::field(field).block;
        self.section(block)?.value(field)
    }
}
