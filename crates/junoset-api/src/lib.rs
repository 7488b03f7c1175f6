// junoset-api: Session transports for Junos configuration (NETCONF over ssh, in-memory)

pub mod error;
pub mod memory;
pub mod netconf;
pub mod session;
pub mod transport;

pub use error::Error;
pub use memory::{CommitRecord, Leaf, MemoryDevice, MemorySession, Operation};
pub use netconf::{NetconfSession, NetconfTransport};
pub use session::{Transport, display_set_command};
pub use transport::{NETCONF_PORT, NetconfConfig};
