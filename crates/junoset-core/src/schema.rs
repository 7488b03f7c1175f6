// ── Field catalog for the `system` subtree ──
//
// Every statement the engine reads or writes is described here once.
// The builder emits in table order, the parser resolves statements
// against it, and the delete list is derived from it.

use std::fmt;

use junoset_api::Leaf;
use strum::{Display, EnumIter, IntoStaticStr};

/// Root token of the managed subtree.
pub const SCOPE: &str = "system";

// ── Identifiers ─────────────────────────────────────────────────────

/// A configuration block. Names are model paths.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, IntoStaticStr, EnumIter,
)]
pub enum BlockId {
    #[strum(serialize = "system")]
    Root,
    #[strum(serialize = "inet6_backup_router")]
    Inet6BackupRouter,
    #[strum(serialize = "internet_options")]
    InternetOptions,
    #[strum(serialize = "internet_options.icmpv4_rate_limit")]
    Icmpv4RateLimit,
    #[strum(serialize = "internet_options.icmpv6_rate_limit")]
    Icmpv6RateLimit,
    #[strum(serialize = "services")]
    Services,
    #[strum(serialize = "services.ssh")]
    Ssh,
    #[strum(serialize = "syslog")]
    Syslog,
    #[strum(serialize = "syslog.archive")]
    SyslogArchive,
}

/// A configurable field. Names are model paths; declaration order is
/// emission order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, IntoStaticStr, EnumIter,
)]
pub enum FieldId {
    #[strum(serialize = "authentication_order")]
    AuthenticationOrder,
    #[strum(serialize = "auto_snapshot")]
    AutoSnapshot,
    #[strum(serialize = "domain_name")]
    DomainName,
    #[strum(serialize = "host_name")]
    HostName,
    #[strum(serialize = "inet6_backup_router.address")]
    Inet6BackupRouterAddress,
    #[strum(serialize = "inet6_backup_router.destination")]
    Inet6BackupRouterDestination,
    #[strum(serialize = "internet_options.gre_path_mtu_discovery")]
    GrePathMtuDiscovery,
    #[strum(serialize = "internet_options.icmpv4_rate_limit.bucket_size")]
    Icmpv4BucketSize,
    #[strum(serialize = "internet_options.icmpv4_rate_limit.packet_rate")]
    Icmpv4PacketRate,
    #[strum(serialize = "internet_options.icmpv6_rate_limit.bucket_size")]
    Icmpv6BucketSize,
    #[strum(serialize = "internet_options.icmpv6_rate_limit.packet_rate")]
    Icmpv6PacketRate,
    #[strum(serialize = "internet_options.ipip_path_mtu_discovery")]
    IpipPathMtuDiscovery,
    #[strum(serialize = "internet_options.ipv6_duplicate_addr_detection_transmits")]
    Ipv6DuplicateAddrDetectionTransmits,
    #[strum(serialize = "internet_options.ipv6_path_mtu_discovery")]
    Ipv6PathMtuDiscovery,
    #[strum(serialize = "internet_options.ipv6_path_mtu_discovery_timeout")]
    Ipv6PathMtuDiscoveryTimeout,
    #[strum(serialize = "internet_options.ipv6_reject_zero_hop_limit")]
    Ipv6RejectZeroHopLimit,
    #[strum(serialize = "internet_options.no_gre_path_mtu_discovery")]
    NoGrePathMtuDiscovery,
    #[strum(serialize = "internet_options.no_ipip_path_mtu_discovery")]
    NoIpipPathMtuDiscovery,
    #[strum(serialize = "internet_options.no_ipv6_path_mtu_discovery")]
    NoIpv6PathMtuDiscovery,
    #[strum(serialize = "internet_options.no_ipv6_reject_zero_hop_limit")]
    NoIpv6RejectZeroHopLimit,
    #[strum(serialize = "internet_options.no_path_mtu_discovery")]
    NoPathMtuDiscovery,
    #[strum(serialize = "internet_options.no_source_quench")]
    NoSourceQuench,
    #[strum(serialize = "internet_options.no_tcp_reset")]
    NoTcpReset,
    #[strum(serialize = "internet_options.no_tcp_rfc1323")]
    NoTcpRfc1323,
    #[strum(serialize = "internet_options.no_tcp_rfc1323_paws")]
    NoTcpRfc1323Paws,
    #[strum(serialize = "internet_options.path_mtu_discovery")]
    PathMtuDiscovery,
    #[strum(serialize = "internet_options.source_port_upper_limit")]
    SourcePortUpperLimit,
    #[strum(serialize = "internet_options.source_quench")]
    SourceQuench,
    #[strum(serialize = "internet_options.tcp_drop_synfin_set")]
    TcpDropSynfinSet,
    #[strum(serialize = "internet_options.tcp_mss")]
    TcpMss,
    #[strum(serialize = "max_configuration_rollbacks")]
    MaxConfigurationRollbacks,
    #[strum(serialize = "max_configurations_on_flash")]
    MaxConfigurationsOnFlash,
    #[strum(serialize = "name_server")]
    NameServer,
    #[strum(serialize = "no_ping_record_route")]
    NoPingRecordRoute,
    #[strum(serialize = "no_ping_time_stamp")]
    NoPingTimeStamp,
    #[strum(serialize = "no_redirects")]
    NoRedirects,
    #[strum(serialize = "no_redirects_ipv6")]
    NoRedirectsIpv6,
    #[strum(serialize = "services.ssh.authentication_order")]
    SshAuthenticationOrder,
    #[strum(serialize = "services.ssh.ciphers")]
    SshCiphers,
    #[strum(serialize = "services.ssh.client_alive_count_max")]
    SshClientAliveCountMax,
    #[strum(serialize = "services.ssh.client_alive_interval")]
    SshClientAliveInterval,
    #[strum(serialize = "services.ssh.connection_limit")]
    SshConnectionLimit,
    #[strum(serialize = "services.ssh.fingerprint_hash")]
    SshFingerprintHash,
    #[strum(serialize = "services.ssh.hostkey_algorithm")]
    SshHostkeyAlgorithm,
    #[strum(serialize = "services.ssh.key_exchange")]
    SshKeyExchange,
    #[strum(serialize = "services.ssh.log_key_changes")]
    SshLogKeyChanges,
    #[strum(serialize = "services.ssh.macs")]
    SshMacs,
    #[strum(serialize = "services.ssh.max_pre_authentication_packets")]
    SshMaxPreAuthenticationPackets,
    #[strum(serialize = "services.ssh.max_sessions_per_connection")]
    SshMaxSessionsPerConnection,
    #[strum(serialize = "services.ssh.no_passwords")]
    SshNoPasswords,
    #[strum(serialize = "services.ssh.no_public_keys")]
    SshNoPublicKeys,
    #[strum(serialize = "services.ssh.port")]
    SshPort,
    #[strum(serialize = "services.ssh.protocol_version")]
    SshProtocolVersion,
    #[strum(serialize = "services.ssh.rate_limit")]
    SshRateLimit,
    #[strum(serialize = "services.ssh.root_login")]
    SshRootLogin,
    #[strum(serialize = "services.ssh.no_tcp_forwarding")]
    SshNoTcpForwarding,
    #[strum(serialize = "services.ssh.tcp_forwarding")]
    SshTcpForwarding,
    #[strum(serialize = "syslog.archive")]
    SyslogArchive,
    #[strum(serialize = "syslog.archive.binary_data")]
    SyslogArchiveBinaryData,
    #[strum(serialize = "syslog.archive.no_binary_data")]
    SyslogArchiveNoBinaryData,
    #[strum(serialize = "syslog.archive.files")]
    SyslogArchiveFiles,
    #[strum(serialize = "syslog.archive.size")]
    SyslogArchiveSize,
    #[strum(serialize = "syslog.archive.no_world_readable")]
    SyslogArchiveNoWorldReadable,
    #[strum(serialize = "syslog.archive.world_readable")]
    SyslogArchiveWorldReadable,
    #[strum(serialize = "syslog.log_rotate_frequency")]
    SyslogLogRotateFrequency,
    #[strum(serialize = "syslog.source_address")]
    SyslogSourceAddress,
    #[strum(serialize = "time_zone")]
    TimeZone,
    #[strum(serialize = "tracing_dest_override_syslog_host")]
    TracingDestOverrideSyslogHost,
}

// ── Descriptors ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    Text,
    Int,
}

/// What a statement looks like after its path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// No value; only says its block exists.
    Marker,
    /// No value; present means `true`.
    Flag,
    /// Exactly one value; the last statement wins.
    Scalar(ScalarKind),
    /// One value per statement, accumulated in order.
    List,
}

impl Shape {
    /// Whether statements of this shape carry a value token.
    pub fn takes_value(self) -> bool {
        matches!(self, Self::Scalar(_) | Self::List)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Marker => "marker",
            Self::Flag => "flag",
            Self::Scalar(ScalarKind::Text) => "string",
            Self::Scalar(ScalarKind::Int) => "int",
            Self::List => "list",
        })
    }
}

/// How an unset scalar is spelled in model files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Sentinel {
    #[strum(serialize = "-")]
    None,
    #[strum(serialize = "-1")]
    MinusOne,
    #[strum(serialize = "0")]
    Zero,
    #[strum(serialize = "\"\"")]
    Empty,
}

/// Whether every statement under a block belongs to this subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Ownership {
    /// Deleted as one unit.
    Whole,
    /// Other statements may live here; only managed leaves are deleted.
    Shared,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockDescriptor {
    pub id: BlockId,
    pub parent: Option<BlockId>,
    /// Statement path relative to the scope; empty for the root.
    pub path: &'static str,
    pub ownership: Ownership,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub id: FieldId,
    pub block: BlockId,
    /// Statement path relative to the scope.
    pub path: &'static str,
    pub shape: Shape,
    pub sentinel: Sentinel,
    /// Must be set whenever its block is present.
    pub required: bool,
    pub conflicts_with: Option<FieldId>,
}

impl BlockDescriptor {
    const fn new(
        id: BlockId,
        parent: Option<BlockId>,
        path: &'static str,
        ownership: Ownership,
    ) -> Self {
        Self {
            id,
            parent,
            path,
            ownership,
        }
    }
}

impl FieldDescriptor {
    const fn new(id: FieldId, block: BlockId, path: &'static str, shape: Shape) -> Self {
        Self {
            id,
            block,
            path,
            shape,
            sentinel: Sentinel::None,
            required: false,
            conflicts_with: None,
        }
    }

    const fn sentinel(mut self, sentinel: Sentinel) -> Self {
        self.sentinel = sentinel;
        self
    }

    const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    const fn conflicts_with(mut self, other: FieldId) -> Self {
        self.conflicts_with = Some(other);
        self
    }

    /// Number of path tokens.
    pub fn depth(&self) -> usize {
        self.path.split(' ').count()
    }
}

// ── Tables ──────────────────────────────────────────────────────────

static BLOCKS: &[BlockDescriptor] = &[
    BlockDescriptor::new(BlockId::Root, None, "", Ownership::Shared),
    BlockDescriptor::new(
        BlockId::Inet6BackupRouter,
        Some(BlockId::Root),
        "inet6-backup-router",
        Ownership::Whole,
    ),
    BlockDescriptor::new(
        BlockId::InternetOptions,
        Some(BlockId::Root),
        "internet-options",
        Ownership::Whole,
    ),
    BlockDescriptor::new(
        BlockId::Icmpv4RateLimit,
        Some(BlockId::InternetOptions),
        "internet-options icmpv4-rate-limit",
        Ownership::Whole,
    ),
    BlockDescriptor::new(
        BlockId::Icmpv6RateLimit,
        Some(BlockId::InternetOptions),
        "internet-options icmpv6-rate-limit",
        Ownership::Whole,
    ),
    BlockDescriptor::new(BlockId::Services, Some(BlockId::Root), "services", Ownership::Shared),
    BlockDescriptor::new(BlockId::Ssh, Some(BlockId::Services), "services ssh", Ownership::Shared),
    BlockDescriptor::new(BlockId::Syslog, Some(BlockId::Root), "syslog", Ownership::Shared),
    BlockDescriptor::new(
        BlockId::SyslogArchive,
        Some(BlockId::Syslog),
        "syslog archive",
        Ownership::Whole,
    ),
];

const TEXT: Shape = Shape::Scalar(ScalarKind::Text);
const INT: Shape = Shape::Scalar(ScalarKind::Int);

const fn flag(id: FieldId, block: BlockId, path: &'static str) -> FieldDescriptor {
    FieldDescriptor::new(id, block, path, Shape::Flag)
}

const fn list(id: FieldId, block: BlockId, path: &'static str) -> FieldDescriptor {
    FieldDescriptor::new(id, block, path, Shape::List)
}

const fn text(id: FieldId, block: BlockId, path: &'static str) -> FieldDescriptor {
    FieldDescriptor::new(id, block, path, TEXT).sentinel(Sentinel::Empty)
}

const fn int(id: FieldId, block: BlockId, path: &'static str, unset: Sentinel) -> FieldDescriptor {
    FieldDescriptor::new(id, block, path, INT).sentinel(unset)
}

use self::BlockId as B;
use self::FieldId as F;
use self::Sentinel::{MinusOne, Zero};

static FIELDS: &[FieldDescriptor] = &[
    list(F::AuthenticationOrder, B::Root, "authentication-order"),
    flag(F::AutoSnapshot, B::Root, "auto-snapshot"),
    text(F::DomainName, B::Root, "domain-name"),
    text(F::HostName, B::Root, "host-name"),
    text(F::Inet6BackupRouterAddress, B::Inet6BackupRouter, "inet6-backup-router").required(),
    list(
        F::Inet6BackupRouterDestination,
        B::Inet6BackupRouter,
        "inet6-backup-router destination",
    ),
    flag(
        F::GrePathMtuDiscovery,
        B::InternetOptions,
        "internet-options gre-path-mtu-discovery",
    )
    .conflicts_with(F::NoGrePathMtuDiscovery),
    int(
        F::Icmpv4BucketSize,
        B::Icmpv4RateLimit,
        "internet-options icmpv4-rate-limit bucket-size",
        MinusOne,
    ),
    int(
        F::Icmpv4PacketRate,
        B::Icmpv4RateLimit,
        "internet-options icmpv4-rate-limit packet-rate",
        MinusOne,
    ),
    int(
        F::Icmpv6BucketSize,
        B::Icmpv6RateLimit,
        "internet-options icmpv6-rate-limit bucket-size",
        MinusOne,
    ),
    int(
        F::Icmpv6PacketRate,
        B::Icmpv6RateLimit,
        "internet-options icmpv6-rate-limit packet-rate",
        MinusOne,
    ),
    flag(
        F::IpipPathMtuDiscovery,
        B::InternetOptions,
        "internet-options ipip-path-mtu-discovery",
    )
    .conflicts_with(F::NoIpipPathMtuDiscovery),
    int(
        F::Ipv6DuplicateAddrDetectionTransmits,
        B::InternetOptions,
        "internet-options ipv6-duplicate-addr-detection-transmits",
        MinusOne,
    ),
    flag(
        F::Ipv6PathMtuDiscovery,
        B::InternetOptions,
        "internet-options ipv6-path-mtu-discovery",
    )
    .conflicts_with(F::NoIpv6PathMtuDiscovery),
    int(
        F::Ipv6PathMtuDiscoveryTimeout,
        B::InternetOptions,
        "internet-options ipv6-path-mtu-discovery-timeout",
        Zero,
    ),
    flag(
        F::Ipv6RejectZeroHopLimit,
        B::InternetOptions,
        "internet-options ipv6-reject-zero-hop-limit",
    )
    .conflicts_with(F::NoIpv6RejectZeroHopLimit),
    flag(
        F::NoGrePathMtuDiscovery,
        B::InternetOptions,
        "internet-options no-gre-path-mtu-discovery",
    ),
    flag(
        F::NoIpipPathMtuDiscovery,
        B::InternetOptions,
        "internet-options no-ipip-path-mtu-discovery",
    ),
    flag(
        F::NoIpv6PathMtuDiscovery,
        B::InternetOptions,
        "internet-options no-ipv6-path-mtu-discovery",
    ),
    flag(
        F::NoIpv6RejectZeroHopLimit,
        B::InternetOptions,
        "internet-options no-ipv6-reject-zero-hop-limit",
    ),
    flag(
        F::NoPathMtuDiscovery,
        B::InternetOptions,
        "internet-options no-path-mtu-discovery",
    )
    .conflicts_with(F::PathMtuDiscovery),
    flag(F::NoSourceQuench, B::InternetOptions, "internet-options no-source-quench")
        .conflicts_with(F::SourceQuench),
    text(F::NoTcpReset, B::InternetOptions, "internet-options no-tcp-reset"),
    flag(F::NoTcpRfc1323, B::InternetOptions, "internet-options no-tcp-rfc1323"),
    flag(
        F::NoTcpRfc1323Paws,
        B::InternetOptions,
        "internet-options no-tcp-rfc1323-paws",
    ),
    flag(
        F::PathMtuDiscovery,
        B::InternetOptions,
        "internet-options path-mtu-discovery",
    ),
    int(
        F::SourcePortUpperLimit,
        B::InternetOptions,
        "internet-options source-port upper-limit",
        Zero,
    ),
    flag(F::SourceQuench, B::InternetOptions, "internet-options source-quench"),
    flag(
        F::TcpDropSynfinSet,
        B::InternetOptions,
        "internet-options tcp-drop-synfin-set",
    ),
    int(F::TcpMss, B::InternetOptions, "internet-options tcp-mss", Zero),
    int(
        F::MaxConfigurationRollbacks,
        B::Root,
        "max-configuration-rollbacks",
        MinusOne,
    ),
    int(
        F::MaxConfigurationsOnFlash,
        B::Root,
        "max-configurations-on-flash",
        MinusOne,
    ),
    list(F::NameServer, B::Root, "name-server"),
    flag(F::NoPingRecordRoute, B::Root, "no-ping-record-route"),
    flag(F::NoPingTimeStamp, B::Root, "no-ping-time-stamp"),
    flag(F::NoRedirects, B::Root, "no-redirects"),
    flag(F::NoRedirectsIpv6, B::Root, "no-redirects-ipv6"),
    list(F::SshAuthenticationOrder, B::Ssh, "services ssh authentication-order"),
    list(F::SshCiphers, B::Ssh, "services ssh ciphers"),
    int(
        F::SshClientAliveCountMax,
        B::Ssh,
        "services ssh client-alive-count-max",
        MinusOne,
    ),
    int(
        F::SshClientAliveInterval,
        B::Ssh,
        "services ssh client-alive-interval",
        MinusOne,
    ),
    int(F::SshConnectionLimit, B::Ssh, "services ssh connection-limit", Zero),
    text(F::SshFingerprintHash, B::Ssh, "services ssh fingerprint-hash"),
    list(F::SshHostkeyAlgorithm, B::Ssh, "services ssh hostkey-algorithm"),
    list(F::SshKeyExchange, B::Ssh, "services ssh key-exchange"),
    flag(F::SshLogKeyChanges, B::Ssh, "services ssh log-key-changes"),
    list(F::SshMacs, B::Ssh, "services ssh macs"),
    int(
        F::SshMaxPreAuthenticationPackets,
        B::Ssh,
        "services ssh max-pre-authentication-packets",
        Zero,
    ),
    int(
        F::SshMaxSessionsPerConnection,
        B::Ssh,
        "services ssh max-sessions-per-connection",
        Zero,
    ),
    flag(F::SshNoPasswords, B::Ssh, "services ssh no-passwords")
        .conflicts_with(F::SshNoPublicKeys),
    flag(F::SshNoPublicKeys, B::Ssh, "services ssh no-public-keys"),
    int(F::SshPort, B::Ssh, "services ssh port", Zero),
    list(F::SshProtocolVersion, B::Ssh, "services ssh protocol-version"),
    int(F::SshRateLimit, B::Ssh, "services ssh rate-limit", Zero),
    text(F::SshRootLogin, B::Ssh, "services ssh root-login"),
    flag(F::SshNoTcpForwarding, B::Ssh, "services ssh no-tcp-forwarding")
        .conflicts_with(F::SshTcpForwarding),
    flag(F::SshTcpForwarding, B::Ssh, "services ssh tcp-forwarding"),
    FieldDescriptor::new(
        F::SyslogArchive,
        B::SyslogArchive,
        "syslog archive",
        Shape::Marker,
    ),
    flag(
        F::SyslogArchiveBinaryData,
        B::SyslogArchive,
        "syslog archive binary-data",
    )
    .conflicts_with(F::SyslogArchiveNoBinaryData),
    flag(
        F::SyslogArchiveNoBinaryData,
        B::SyslogArchive,
        "syslog archive no-binary-data",
    ),
    int(F::SyslogArchiveFiles, B::SyslogArchive, "syslog archive files", Zero),
    int(F::SyslogArchiveSize, B::SyslogArchive, "syslog archive size", Zero),
    flag(
        F::SyslogArchiveNoWorldReadable,
        B::SyslogArchive,
        "syslog archive no-world-readable",
    )
    .conflicts_with(F::SyslogArchiveWorldReadable),
    flag(
        F::SyslogArchiveWorldReadable,
        B::SyslogArchive,
        "syslog archive world-readable",
    ),
    int(
        F::SyslogLogRotateFrequency,
        B::Syslog,
        "syslog log-rotate-frequency",
        Zero,
    ),
    text(F::SyslogSourceAddress, B::Syslog, "syslog source-address"),
    text(F::TimeZone, B::Root, "time-zone"),
    text(
        F::TracingDestOverrideSyslogHost,
        B::Root,
        "tracing destination-override syslog host",
    ),
];

// ── Accessors ───────────────────────────────────────────────────────

/// All fields in emission order.
pub fn fields() -> &'static [FieldDescriptor] {
    FIELDS
}

/// All blocks, parents before children.
pub fn blocks() -> &'static [BlockDescriptor] {
    BLOCKS
}

/// Tables are declared in enum order, so the discriminant is the index.
#[allow(clippy::as_conversions)]
pub fn field(id: FieldId) -> &'static FieldDescriptor {
    &FIELDS[id as usize]
}

#[allow(clippy::as_conversions)]
pub fn block(id: BlockId) -> &'static BlockDescriptor {
    &BLOCKS[id as usize]
}

/// Subtree root token (`system`).
pub fn scope() -> &'static str {
    SCOPE
}

/// Fields declared directly in `id`.
pub fn fields_in(id: BlockId) -> impl Iterator<Item = &'static FieldDescriptor> {
    FIELDS.iter().filter(move |f| f.block == id)
}

/// Direct child blocks of `id`.
pub fn children_of(id: BlockId) -> impl Iterator<Item = &'static BlockDescriptor> {
    BLOCKS.iter().filter(move |b| b.parent == Some(id))
}

/// Every declared mutual-exclusion pair, each once.
pub fn conflict_pairs() -> impl Iterator<Item = (FieldId, FieldId)> {
    FIELDS
        .iter()
        .filter_map(|f| f.conflicts_with.map(|other| (f.id, other)))
}

// ── Lookup ──────────────────────────────────────────────────────────

/// A statement resolved against the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match<'a> {
    pub field: &'static FieldDescriptor,
    /// Raw value text (still quoted if the device quoted it).
    pub value: Option<&'a str>,
}

/// Strip `path` from the front of `statement`, token by token.
fn strip_path<'a>(statement: &'a str, path: &str) -> Option<&'a str> {
    let mut rest = statement;
    for token in path.split(' ') {
        rest = rest.trim_start().strip_prefix(token)?;
        if !(rest.is_empty() || rest.starts_with(char::is_whitespace)) {
            return None;
        }
    }
    Some(rest.trim())
}

/// Resolve a statement (path relative to the scope, no `set`) to the
/// most specific field whose path prefixes it and whose shape fits the
/// remaining token count.
pub fn lookup(statement: &str) -> Option<Match<'_>> {
    let mut best: Option<(usize, Match<'_>)> = None;
    for field in FIELDS {
        let Some(rest) = strip_path(statement, field.path) else {
            continue;
        };
        if field.shape.takes_value() == rest.is_empty() {
            continue;
        }
        let depth = field.depth();
        if best.as_ref().is_none_or(|(d, _)| depth > *d) {
            let value = (!rest.is_empty()).then_some(rest);
            best = Some((depth, Match { field, value }));
        }
    }
    best.map(|(_, found)| found)
}

// ── Managed paths ───────────────────────────────────────────────────

/// Path deleted on behalf of `field`: its outermost wholly owned
/// enclosing block, or the field itself.
fn managed_path(field: &FieldDescriptor) -> &'static str {
    let mut owner = None;
    let mut current = Some(field.block);
    while let Some(id) = current {
        let descriptor = block(id);
        if descriptor.ownership == Ownership::Whole {
            owner = Some(descriptor.path);
        }
        current = descriptor.parent;
    }
    owner.unwrap_or(field.path)
}

/// Every statement path the engine may have written, in catalog order.
/// Deleting all of them clears everything this subtree manages without
/// touching unmanaged siblings.
pub fn all_managed_paths() -> Vec<&'static str> {
    let mut paths: Vec<&'static str> = Vec::new();
    for field in FIELDS {
        let path = managed_path(field);
        if !paths.contains(&path) {
            paths.push(path);
        }
    }
    paths
}

/// `delete system <path>` for every managed path.
pub fn delete_commands() -> Vec<String> {
    all_managed_paths()
        .into_iter()
        .map(|path| format!("delete {SCOPE} {path}"))
        .collect()
}

/// Full path and multiplicity of every value-carrying field, for
/// devices that keep one value per scalar leaf.
pub fn value_leaves() -> impl Iterator<Item = (String, Leaf)> {
    FIELDS.iter().filter_map(|field| {
        let kind = match field.shape {
            Shape::Scalar(_) => Leaf::Single,
            Shape::List => Leaf::Multi,
            Shape::Flag | Shape::Marker => return None,
        };
        Some((format!("{SCOPE} {}", field.path), kind))
    })
}
