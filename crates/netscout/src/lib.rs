#![allow(rustdoc::broken_intra_doc_links, clippy::doc_markdown)]
#![doc = include_str!("../README.md")]

// Re-export the user facing libraries, so they may be used from netscout crate directly.

#[cfg(feature = "core")]
/// Echo probing, ping and traceroute.
pub mod core {
    pub use netscout_core::*;
}

#[cfg(feature = "dns")]
/// A blocking forward and reverse DNS resolver.
pub mod dns {
    pub use netscout_dns::*;
}

#[cfg(feature = "net")]
/// TCP port checks and local network interfaces.
pub mod net {
    pub use netscout_net::*;
}

#[cfg(feature = "sim")]
/// Simulated echo probing.
pub mod sim {
    pub use netscout_sim::*;
}
