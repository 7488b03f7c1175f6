// NETCONF 1.0 over the local ssh client.

mod client;
mod rpc;

pub use client::{NetconfSession, NetconfTransport};
