// Typed model of the `system` subtree.

pub mod sentinel;
mod section;
mod system;

pub use section::{Assignment, FieldValue, Section};
pub use system::{
    IcmpRateLimit, Inet6BackupRouter, InternetOptions, Services, SshService, Syslog,
    SyslogArchive, SystemConfig,
};
