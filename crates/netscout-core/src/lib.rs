//! Netscout - echo probing and traceroute.
//!
//! This crate provides the ping and traceroute facilities used by the
//! netscout library.
//!
//! Probing is delegated to an [`EchoProber`], which sends a single ICMP echo
//! request with a given time-to-live and reports how it was answered.  The
//! [`Traceroute`] engine drives a prober with an increasing time-to-live to
//! discover the hops between this host and a target.
//!
//! # Example
//!
//! The following example traces the route to a host and prints the address
//! of each hop which answered:
//!
//! ```no_run
//! # fn main() -> anyhow::Result<()> {
//! # use netscout_core::{EchoProber, ProbeOptions, ProbeReply, Result, Target};
//! # struct IcmpProber;
//! # impl EchoProber for IcmpProber {
//! #     fn probe(&self, _: &Target, _: &ProbeOptions) -> Result<ProbeReply> {
//! #         Ok(ProbeReply::timed_out())
//! #     }
//! # }
//! use netscout_core::Builder;
//!
//! let traceroute = Builder::new(IcmpProber).max_ttl(16).build();
//! for (i, addr) in traceroute.trace_addresses("example.com")?.iter().enumerate() {
//!     println!("{} {addr}", i + 1);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # See Also
//!
//! - [`Builder`] - Build a [`Traceroute`].
//! - [`Traceroute::trace_addresses`] - Trace the addresses of the hops to a host.
//! - [`Traceroute::trace_detailed`] - Trace the hops to a host with a direct echo to each.
//! - [`Pinger`] - Send plain echo requests.
#![warn(clippy::all, clippy::pedantic, clippy::nursery, rust_2018_idioms)]
#![allow(
    clippy::module_name_repetitions,
    clippy::option_if_let_else,
    clippy::missing_const_for_fn,
    clippy::cast_possible_truncation,
    clippy::missing_errors_doc
)]
#![deny(unsafe_code)]

mod builder;
mod config;
mod constants;
mod error;
mod ping;
mod probe;
mod prober;
mod tracer;
mod types;

pub use builder::Builder;
pub use config::{default_payload, defaults, PingConfig, TraceOptions};
pub use constants::{MAX_PAYLOAD_SIZE, UNRESTRICTED_TTL};
pub use error::{BoxError, Error, ErrorKind, Result};
pub use ping::{PingSummary, Pinger};
pub use probe::{ProbeOptions, ProbeReply, ProbeStatus, Target, TraceHop};
pub use prober::EchoProber;
pub use tracer::Traceroute;
pub use types::{HopIndex, TimeToLive};
