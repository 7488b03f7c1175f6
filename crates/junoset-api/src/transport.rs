// Connection settings for the NETCONF transport.
//
// The transport never handles credentials itself: authentication, host
// key checking, and ciphers are whatever the local ssh client is
// configured to do. These settings only describe how to invoke it.

use std::path::PathBuf;
use std::time::Duration;

/// Default NETCONF-over-SSH port.
pub const NETCONF_PORT: u16 = 830;

/// How to reach a device's NETCONF subsystem.
#[derive(Debug, Clone)]
pub struct NetconfConfig {
    /// Device host name or address.
    pub host: String,
    pub port: u16,
    /// Login user; `None` leaves it to ssh config.
    pub username: Option<String>,
    /// ssh executable to spawn.
    pub ssh_program: PathBuf,
    /// Extra arguments placed before the host (e.g. `-o`, `StrictHostKeyChecking=yes`).
    pub ssh_options: Vec<String>,
    /// Upper bound for each reply from the device.
    pub timeout: Duration,
}

impl Default for NetconfConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: NETCONF_PORT,
            username: None,
            ssh_program: PathBuf::from("ssh"),
            ssh_options: Vec::new(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl NetconfConfig {
    /// Config for `host` with every other setting at its default.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Self::default()
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Arguments passed to the ssh program, ending with the subsystem request.
    pub fn ssh_args(&self) -> Vec<String> {
        let mut args = vec!["-p".to_owned(), self.port.to_string()];
        if let Some(ref user) = self.username {
            args.push("-l".to_owned());
            args.push(user.clone());
        }
        args.extend(self.ssh_options.iter().cloned());
        args.push(self.host.clone());
        args.push("-s".to_owned());
        args.push("netconf".to_owned());
        args
    }
}
