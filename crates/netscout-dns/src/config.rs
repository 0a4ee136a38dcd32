use crate::{IpAddrFamily, ResolveMethod};
use std::time::Duration;

/// Default values for configuration.
pub mod defaults {
    use crate::{IpAddrFamily, ResolveMethod};
    use std::time::Duration;

    /// The default value for `resolve-method`.
    pub const DEFAULT_RESOLVE_METHOD: ResolveMethod = ResolveMethod::System;

    /// The default value for `addr-family`.
    pub const DEFAULT_ADDR_FAMILY: IpAddrFamily = IpAddrFamily::Ipv4thenIpv6;

    /// The default value for `dns-timeout`.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);
}

/// Configuration for the `DnsResolver`.
///
/// # Example
///
/// ```
/// use netscout_dns::{Config, IpAddrFamily};
///
/// let config = Config::default().with_addr_family(IpAddrFamily::Ipv4Only);
/// assert_eq!(IpAddrFamily::Ipv4Only, config.addr_family);
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Config {
    pub resolve_method: ResolveMethod,
    pub addr_family: IpAddrFamily,
    /// Not applied when resolving with `ResolveMethod::System`.
    pub timeout: Duration,
}

impl Config {
    #[must_use]
    pub const fn new(
        resolve_method: ResolveMethod,
        addr_family: IpAddrFamily,
        timeout: Duration,
    ) -> Self {
        Self {
            resolve_method,
            addr_family,
            timeout,
        }
    }

    #[must_use]
    pub const fn with_resolve_method(self, resolve_method: ResolveMethod) -> Self {
        Self {
            resolve_method,
            ..self
        }
    }

    #[must_use]
    pub const fn with_addr_family(self, addr_family: IpAddrFamily) -> Self {
        Self {
            addr_family,
            ..self
        }
    }

    #[must_use]
    pub const fn with_timeout(self, timeout: Duration) -> Self {
        Self { timeout, ..self }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(
            defaults::DEFAULT_RESOLVE_METHOD,
            defaults::DEFAULT_ADDR_FAMILY,
            defaults::DEFAULT_TIMEOUT,
        )
    }
}
