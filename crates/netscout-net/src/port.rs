use crate::error::{Error, Result};
use netscout_dns::Resolver;
use socket2::{Domain, Protocol, SockAddr, Socket, Type};
use std::fmt::{Display, Formatter};
use std::net::{IpAddr, SocketAddr};
use std::ops::RangeInclusive;
use std::time::Duration;
use tracing::instrument;

/// Default values for configuration.
pub mod defaults {
    use std::time::Duration;

    /// The default value for `connect-timeout`.
    pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_millis(1000);
}

/// Whether a TCP port accepted a connection.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PortStatus {
    Open,
    Closed,
}

impl Display for PortStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Closed => write!(f, "closed"),
        }
    }
}

/// The outcome of checking a single TCP port.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct PortReply {
    pub port: u16,
    pub status: PortStatus,
}

/// Check TCP ports by attempting a connection to each.
///
/// A port is `Open` if the connection is established within the connect
/// timeout and `Closed` otherwise, whatever the reason the connection failed.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct PortScanner {
    connect_timeout: Duration,
}

impl Default for PortScanner {
    fn default() -> Self {
        Self::new(defaults::DEFAULT_CONNECT_TIMEOUT)
    }
}

impl PortScanner {
    #[must_use]
    pub const fn new(connect_timeout: Duration) -> Self {
        Self { connect_timeout }
    }

    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    /// Check whether `port` on `addr` accepts a TCP connection.
    #[instrument(skip(self), level = "trace")]
    pub fn check(&self, addr: IpAddr, port: u16) -> Result<PortReply> {
        validate_port(port)?;
        Ok(self.connect(addr, port))
    }

    /// Check whether `port` on `hostname` accepts a TCP connection.
    ///
    /// The first address `resolver` returns for `hostname` is checked.
    #[instrument(skip(self, resolver), level = "trace")]
    pub fn check_host(
        &self,
        resolver: &impl Resolver,
        hostname: &str,
        port: u16,
    ) -> Result<PortReply> {
        validate_port(port)?;
        Ok(self.connect(resolve(resolver, hostname)?, port))
    }

    /// Check each port of `ports` on `addr` in turn.
    ///
    /// The range must start at 1 or above and span at least two ports.
    #[instrument(skip(self), level = "trace")]
    pub fn scan(&self, addr: IpAddr, ports: RangeInclusive<u16>) -> Result<Vec<PortReply>> {
        validate_range(&ports)?;
        Ok(ports.map(|port| self.connect(addr, port)).collect())
    }

    /// Check each port of `ports` on `hostname` in turn.
    ///
    /// The first address `resolver` returns for `hostname` is scanned.
    #[instrument(skip(self, resolver), level = "trace")]
    pub fn scan_host(
        &self,
        resolver: &impl Resolver,
        hostname: &str,
        ports: RangeInclusive<u16>,
    ) -> Result<Vec<PortReply>> {
        validate_range(&ports)?;
        let addr = resolve(resolver, hostname)?;
        Ok(ports.map(|port| self.connect(addr, port)).collect())
    }

    fn connect(&self, addr: IpAddr, port: u16) -> PortReply {
        let status = match try_connect(SocketAddr::new(addr, port), self.connect_timeout) {
            Ok(()) => PortStatus::Open,
            Err(err) => {
                tracing::trace!(%addr, port, %err, "connect failed");
                PortStatus::Closed
            }
        };
        tracing::debug!(%addr, port, %status);
        PortReply { port, status }
    }
}

fn validate_port(port: u16) -> Result<()> {
    if port == 0 {
        return Err(Error::PortOutOfRange(port));
    }
    Ok(())
}

fn validate_range(ports: &RangeInclusive<u16>) -> Result<()> {
    let (start, end) = (*ports.start(), *ports.end());
    if start == 0 || end <= start {
        return Err(Error::PortRangeOutOfRange { start, end });
    }
    Ok(())
}

fn resolve(resolver: &impl Resolver, hostname: &str) -> Result<IpAddr> {
    resolver
        .lookup(hostname)?
        .into_iter()
        .next()
        .ok_or_else(|| Error::HostNotFound(hostname.to_string()))
}

fn try_connect(addr: SocketAddr, timeout: Duration) -> std::io::Result<()> {
    let socket = Socket::new(Domain::for_address(addr), Type::STREAM, Some(Protocol::TCP))?;
    socket.connect_timeout(&SockAddr::from(addr), timeout)
}
