//! This crate provides a cheaply cloneable, blocking, forward and reverse DNS
//! resolver.
//!
//! Lookups may use the OS resolver, the `/etc/resolv.conf` configuration or
//! one of the Google or Cloudflare public DNS services.
//!
//! # Example
//!
//! The following example resolves a hostname and then performs a reverse DNS
//! lookup of each resolved address using the Cloudflare 1.1.1.1 public DNS
//! service.
//!
//! ```no_run
//! # fn main() -> anyhow::Result<()> {
//! # use std::time::Duration;
//! use netscout_dns::{Config, DnsResolver, IpAddrFamily, ResolveMethod, Resolver};
//!
//! let config = Config::new(
//!     ResolveMethod::Cloudflare,
//!     IpAddrFamily::Ipv4Only,
//!     Duration::from_secs(5),
//! );
//! let resolver = DnsResolver::new(config)?;
//! let entry = resolver.host_entry("example.com")?;
//! println!("{} is also known as {:?}", entry.hostname, entry.aliases);
//! for addr in entry.addrs {
//!     println!("{addr} resolves to {}", resolver.reverse_lookup(addr));
//! }
//! # Ok(())
//! # }
//! ```
#![forbid(unsafe_code)]

mod config;
mod dns_resolver;
mod resolver;

pub use config::{defaults, Config};
pub use dns_resolver::{DnsResolver, IpAddrFamily, ResolveMethod};
pub use resolver::{
    DnsEntry, Error, HostEntry, ResolvedHostnames, ResolvedIpAddrs, Resolver, Result,
};
