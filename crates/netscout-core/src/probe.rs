use crate::config::{default_payload, defaults};
use crate::constants::UNRESTRICTED_TTL;
use crate::error::{Error, Result};
use crate::types::{HopIndex, TimeToLive};
use std::fmt::{Display, Formatter};
use std::net::IpAddr;
use std::str::FromStr;
use std::time::Duration;

/// The destination of an echo probe.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum Target {
    /// A pre-resolved address.
    Addr(IpAddr),
    /// A hostname to be resolved by the prober.
    Hostname(String),
}

impl Target {
    /// Parse a target from a hostname or an address literal.
    ///
    /// Fails with `Error::InvalidInput` if `hostname` is empty or blank.
    pub fn parse(hostname: &str) -> Result<Self> {
        let hostname = hostname.trim();
        if hostname.is_empty() {
            return Err(Error::InvalidInput(String::from(
                "hostname is null or an empty string",
            )));
        }
        Ok(IpAddr::from_str(hostname).map_or_else(
            |_| Self::Hostname(hostname.to_string()),
            Self::Addr,
        ))
    }

    /// The address of this target, if already resolved.
    #[must_use]
    pub const fn addr(&self) -> Option<IpAddr> {
        match self {
            Self::Addr(addr) => Some(*addr),
            Self::Hostname(_) => None,
        }
    }
}

impl FromStr for Target {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<IpAddr> for Target {
    fn from(addr: IpAddr) -> Self {
        Self::Addr(addr)
    }
}

impl Display for Target {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Addr(addr) => write!(f, "{addr}"),
            Self::Hostname(hostname) => write!(f, "{hostname}"),
        }
    }
}

/// The options of a single echo probe.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ProbeOptions {
    /// The number of hops the probe may traverse.
    pub time_to_live: TimeToLive,
    /// Forbid fragmentation of the probe.
    pub dont_fragment: bool,
    /// How long to wait for a reply.
    pub timeout: Duration,
    /// The bytes carried by the probe and echoed by the responder.
    pub payload: Vec<u8>,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            time_to_live: TimeToLive(UNRESTRICTED_TTL),
            dont_fragment: defaults::DEFAULT_DONT_FRAGMENT,
            timeout: defaults::DEFAULT_TIMEOUT,
            payload: default_payload(),
        }
    }
}

/// The outcome of an echo probe.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ProbeStatus {
    /// The target replied.
    Success,
    /// A router discarded the probe as its time-to-live reached zero.
    TtlExpired,
    /// No reply arrived before the timeout.
    TimedOut,
    /// Any other reply, such as destination unreachable.
    Other,
}

impl Display for ProbeStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::TtlExpired => write!(f, "ttl expired"),
            Self::TimedOut => write!(f, "timed out"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// The reply to an echo probe.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ProbeReply {
    pub status: ProbeStatus,
    /// The responder, if any host answered.
    pub address: Option<IpAddr>,
    pub round_trip_time: Duration,
    pub echoed_payload: Vec<u8>,
}

impl ProbeReply {
    #[must_use]
    pub const fn new(
        status: ProbeStatus,
        address: Option<IpAddr>,
        round_trip_time: Duration,
        echoed_payload: Vec<u8>,
    ) -> Self {
        Self {
            status,
            address,
            round_trip_time,
            echoed_payload,
        }
    }

    /// A reply for a probe which was not answered in time.
    #[must_use]
    pub const fn timed_out() -> Self {
        Self::new(ProbeStatus::TimedOut, None, Duration::ZERO, Vec::new())
    }
}

/// A hop discovered by a detailed trace.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TraceHop {
    /// The position of the hop in the trace result.
    pub sequence_index: HopIndex,
    /// The time-to-live of the probe which discovered the hop.
    ///
    /// Hops which did not answer are not recorded, so this may differ from `sequence_index`.
    pub ttl: TimeToLive,
    pub address: IpAddr,
    /// The reply to an unrestricted echo sent directly to `address`.
    pub detail: Option<ProbeReply>,
}
