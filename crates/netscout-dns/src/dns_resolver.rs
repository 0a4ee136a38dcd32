use crate::config::Config;
use crate::resolver::{DnsEntry, Error, HostEntry, ResolvedIpAddrs, Resolver, Result};
use dns_lookup::{AddrInfo, AddrInfoHints, SockType};
use hickory_resolver::config::{LookupIpStrategy, ResolverConfig, ResolverOpts};
use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::proto::rr::{RData, Record};
use hickory_resolver::system_conf::read_system_conf;
use hickory_resolver::Name;
use itertools::{Either, Itertools};
use std::fmt::{Display, Formatter};
use std::net::IpAddr;
use std::str::FromStr;
use std::sync::Arc;
use tracing::instrument;

#[cfg(unix)]
const AI_CANONNAME: i32 = libc::AI_CANONNAME;

// winsock
#[cfg(not(unix))]
const AI_CANONNAME: i32 = 0x2;

/// How DNS queries will be resolved.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ResolveMethod {
    /// Resolve using the OS resolver.
    System,
    /// Resolve using the `/etc/resolv.conf` DNS configuration.
    Resolv,
    /// Resolve using the Google `8.8.8.8` DNS service.
    Google,
    /// Resolve using the Cloudflare `1.1.1.1` DNS service.
    Cloudflare,
}

/// How to resolve IP addresses.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum IpAddrFamily {
    /// Lookup IPv4 only.
    Ipv4Only,
    /// Lookup IPv6 only.
    Ipv6Only,
    /// Lookup IPv6 with a fallback to IPv4.
    Ipv6thenIpv4,
    /// Lookup IPv4 with a fallback to IPv6.
    Ipv4thenIpv6,
    /// Use every IP address returned by the OS resolver when using `ResolveMethod::System`,
    /// otherwise lookup IPv4 with a fallback to IPv6.
    System,
}

impl Display for IpAddrFamily {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ipv4Only => write!(f, "Ipv4Only"),
            Self::Ipv6Only => write!(f, "Ipv6Only"),
            Self::Ipv6thenIpv4 => write!(f, "Ipv6thenIpv4"),
            Self::Ipv4thenIpv6 => write!(f, "Ipv4thenIpv6"),
            Self::System => write!(f, "System"),
        }
    }
}

#[derive(Clone)]
enum DnsProvider {
    Hickory(Arc<hickory_resolver::Resolver>),
    DnsLookup,
}

/// A cheaply cloneable, blocking, forward and reverse DNS resolver.
///
/// Every call performs a fresh query; nothing is cached.
#[derive(Clone)]
pub struct DnsResolver {
    config: Config,
    provider: DnsProvider,
}

impl DnsResolver {
    /// Create a new `DnsResolver`.
    ///
    /// Fails if the system resolver configuration is requested but cannot be read.
    pub fn new(config: Config) -> std::io::Result<Self> {
        let provider = if matches!(config.resolve_method, ResolveMethod::System) {
            DnsProvider::DnsLookup
        } else {
            let ip_strategy = match config.addr_family {
                IpAddrFamily::Ipv4Only => LookupIpStrategy::Ipv4Only,
                IpAddrFamily::Ipv6Only => LookupIpStrategy::Ipv6Only,
                IpAddrFamily::Ipv6thenIpv4 => LookupIpStrategy::Ipv6thenIpv4,
                IpAddrFamily::Ipv4thenIpv6 | IpAddrFamily::System => LookupIpStrategy::Ipv4thenIpv6,
            };
            let (resolver_cfg, mut options) = match config.resolve_method {
                ResolveMethod::Resolv => read_system_conf()?,
                ResolveMethod::Google => (ResolverConfig::google(), ResolverOpts::default()),
                ResolveMethod::Cloudflare | ResolveMethod::System => {
                    (ResolverConfig::cloudflare(), ResolverOpts::default())
                }
            };
            options.timeout = config.timeout;
            options.ip_strategy = ip_strategy;
            DnsProvider::Hickory(Arc::new(hickory_resolver::Resolver::new(
                resolver_cfg,
                options,
            )?))
        };
        Ok(Self { config, provider })
    }

    /// Get the `Config`.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }
}

impl Resolver for DnsResolver {
    #[instrument(skip_all, fields(hostname = hostname.as_ref()), level = "trace")]
    fn lookup(&self, hostname: impl AsRef<str>) -> Result<ResolvedIpAddrs> {
        let hostname = validate(hostname.as_ref())?;
        let addrs = match &self.provider {
            DnsProvider::Hickory(resolver) => resolver
                .lookup_ip(hostname)
                .map_err(resolve_error)?
                .iter()
                .collect::<Vec<_>>(),
            DnsProvider::DnsLookup => filter_family(
                dns_lookup::lookup_host(hostname).map_err(|err| Error::LookupFailed(Box::new(err)))?,
                self.config.addr_family,
            ),
        };
        tracing::debug!(hostname, ?addrs, "lookup");
        Ok(ResolvedIpAddrs(addrs))
    }

    #[instrument(skip_all, fields(hostname = hostname.as_ref()), level = "trace")]
    fn host_entry(&self, hostname: impl AsRef<str>) -> Result<HostEntry> {
        let hostname = validate(hostname.as_ref())?;
        if let Ok(addr) = IpAddr::from_str(hostname) {
            return Ok(literal_entry(self.reverse_lookup(addr)));
        }
        let entry = match &self.provider {
            DnsProvider::Hickory(resolver) => {
                let lookup = resolver.lookup_ip(hostname).map_err(resolve_error)?;
                let (canonical, aliases) = fold_cnames(lookup.as_lookup().record_iter(), hostname);
                HostEntry {
                    hostname: canonical,
                    aliases,
                    addrs: lookup.iter().collect(),
                }
            }
            DnsProvider::DnsLookup => {
                let infos =
                    system_addr_info(hostname).map_err(|err| Error::LookupFailed(Box::new(err)))?;
                canonical_entry(hostname, &infos, self.config.addr_family)
            }
        };
        tracing::debug!(hostname, ?entry, "host entry");
        Ok(entry)
    }

    #[instrument(skip_all, level = "trace")]
    fn reverse_lookup(&self, addr: impl Into<IpAddr>) -> DnsEntry {
        let addr = addr.into();
        let entry = match &self.provider {
            // we can't distinguish between a failed lookup or a genuine error, and so we just
            // assume all failures are `DnsEntry::NotFound`.
            DnsProvider::DnsLookup => match dns_lookup::lookup_addr(&addr) {
                Ok(dns) => DnsEntry::Resolved(addr, vec![dns]),
                Err(_) => DnsEntry::NotFound(addr),
            },
            DnsProvider::Hickory(resolver) => match resolver.reverse_lookup(addr) {
                Ok(name) => DnsEntry::Resolved(
                    addr,
                    name.into_iter().map(|ptr| relative_name(&ptr.0)).collect(),
                ),
                Err(err) => classify(addr, err.kind()),
            },
        };
        tracing::debug!(%addr, %entry, "reverse lookup");
        entry
    }
}

fn validate(hostname: &str) -> Result<&str> {
    let trimmed = hostname.trim();
    if trimmed.is_empty() {
        Err(Error::InvalidHostname(hostname.to_string()))
    } else {
        Ok(trimmed)
    }
}

/// Select the addresses of the preferred family from those returned by the OS resolver.
fn filter_family(all: Vec<IpAddr>, family: IpAddrFamily) -> Vec<IpAddr> {
    let (ipv4, ipv6): (Vec<_>, Vec<_>) = all.iter().partition_map(|ip| match ip {
        IpAddr::V4(_) => Either::Left(*ip),
        IpAddr::V6(_) => Either::Right(*ip),
    });
    match family {
        IpAddrFamily::Ipv4Only => ipv4,
        IpAddrFamily::Ipv6Only => ipv6,
        IpAddrFamily::Ipv6thenIpv4 if ipv6.is_empty() => ipv4,
        IpAddrFamily::Ipv6thenIpv4 => ipv6,
        IpAddrFamily::Ipv4thenIpv6 if ipv4.is_empty() => ipv6,
        IpAddrFamily::Ipv4thenIpv6 => ipv4,
        IpAddrFamily::System => all,
    }
}

/// Query the OS resolver for the addresses and canonical name of `hostname`.
fn system_addr_info(hostname: &str) -> std::io::Result<Vec<AddrInfo>> {
    let hints = AddrInfoHints {
        flags: AI_CANONNAME,
        socktype: SockType::Stream.into(),
        ..AddrInfoHints::default()
    };
    dns_lookup::getaddrinfo(Some(hostname), None, Some(hints))?.collect()
}

/// Build the `HostEntry` of `queried` from the OS resolver results.
///
/// The queried name is an alias of the canonical name when the two differ.
fn canonical_entry(queried: &str, infos: &[AddrInfo], family: IpAddrFamily) -> HostEntry {
    let hostname = infos
        .iter()
        .find_map(|info| info.canonname.clone())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| queried.to_string());
    let aliases = if hostname.eq_ignore_ascii_case(queried) {
        vec![]
    } else {
        vec![queried.to_string()]
    };
    let addrs = infos.iter().map(|info| info.sockaddr.ip()).unique().collect();
    HostEntry {
        hostname,
        aliases,
        addrs: filter_family(addrs, family),
    }
}

/// The canonical name and aliases of `queried` from the records of a forward lookup.
///
/// The owner of each CNAME record is an alias and the target of the last CNAME
/// record is the canonical name.
fn fold_cnames<'a>(
    records: impl Iterator<Item = &'a Record>,
    queried: &str,
) -> (String, Vec<String>) {
    let mut aliases = vec![];
    let mut canonical = None;
    for record in records {
        if let Some(RData::CNAME(cname)) = record.data() {
            aliases.push(relative_name(record.name()));
            canonical = Some(relative_name(&cname.0));
        }
    }
    (
        canonical.unwrap_or_else(|| queried.to_string()),
        aliases.into_iter().unique().collect(),
    )
}

/// The `HostEntry` of an address literal from its reverse lookup.
fn literal_entry(entry: DnsEntry) -> HostEntry {
    let addr = entry.addr();
    let mut names = entry.hostnames().map(String::from);
    HostEntry {
        hostname: names.next().unwrap_or_else(|| addr.to_string()),
        aliases: names.collect(),
        addrs: vec![addr],
    }
}

/// Classify a failed reverse lookup of `addr`.
fn classify(addr: IpAddr, kind: &ResolveErrorKind) -> DnsEntry {
    match kind {
        ResolveErrorKind::NoRecordsFound { .. } => DnsEntry::NotFound(addr),
        ResolveErrorKind::Timeout => DnsEntry::Timeout(addr),
        _ => DnsEntry::Failed(addr),
    }
}

/// Render a DNS name without the trailing root label.
fn relative_name(name: &Name) -> String {
    let mut name = name.clone();
    name.set_fqdn(false);
    name.to_string()
}

/// Convert a `ResolveError` to an `Error::LookupFailed`.
fn resolve_error(err: ResolveError) -> Error {
    Error::LookupFailed(Box::new(err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hickory_resolver::proto::op::{Query, ResponseCode};
    use hickory_resolver::proto::rr::rdata::{A, CNAME};
    use hickory_resolver::proto::rr::RecordType;
    use std::net::{Ipv4Addr, SocketAddr};
    use test_case::test_case;

    fn addrs(all: &[&str]) -> Vec<IpAddr> {
        all.iter().map(|s| IpAddr::from_str(s).unwrap()).collect()
    }

    const MIXED: &[&str] = &["10.0.0.1", "::1", "10.0.0.2", "fe80::1"];

    #[test_case(MIXED, IpAddrFamily::Ipv4Only, &["10.0.0.1", "10.0.0.2"]; "ipv4 only")]
    #[test_case(MIXED, IpAddrFamily::Ipv6Only, &["::1", "fe80::1"]; "ipv6 only")]
    #[test_case(MIXED, IpAddrFamily::Ipv4thenIpv6, &["10.0.0.1", "10.0.0.2"]; "ipv4 then ipv6")]
    #[test_case(MIXED, IpAddrFamily::Ipv6thenIpv4, &["::1", "fe80::1"]; "ipv6 then ipv4")]
    #[test_case(&["::1"], IpAddrFamily::Ipv4thenIpv6, &["::1"]; "ipv4 then ipv6 fallback")]
    #[test_case(&["10.0.0.1"], IpAddrFamily::Ipv6thenIpv4, &["10.0.0.1"]; "ipv6 then ipv4 fallback")]
    #[test_case(&["10.0.0.1"], IpAddrFamily::Ipv6Only, &[]; "ipv6 only without ipv6")]
    #[test_case(MIXED, IpAddrFamily::System, MIXED; "system")]
    fn test_filter_family(all: &[&str], family: IpAddrFamily, expected: &[&str]) {
        assert_eq!(addrs(expected), filter_family(addrs(all), family));
    }

    #[test_case(""; "empty")]
    #[test_case(" \t"; "blank")]
    fn test_empty_hostname_is_rejected(hostname: &str) -> anyhow::Result<()> {
        let resolver = DnsResolver::new(Config::default())?;
        assert!(matches!(
            resolver.lookup(hostname),
            Err(Error::InvalidHostname(_))
        ));
        assert!(matches!(
            resolver.host_entry(hostname),
            Err(Error::InvalidHostname(_))
        ));
        Ok(())
    }

    #[test]
    fn test_config() -> anyhow::Result<()> {
        let config = Config::default();
        let resolver = DnsResolver::new(config)?;
        assert_eq!(&config, resolver.config());
        Ok(())
    }

    fn name(s: &str) -> Name {
        Name::from_str(s).unwrap()
    }

    fn cname(alias: &str, target: &str) -> Record {
        Record::from_rdata(name(alias), 300, RData::CNAME(CNAME(name(target))))
    }

    fn a_record(owner: &str, addr: Ipv4Addr) -> Record {
        Record::from_rdata(name(owner), 300, RData::A(A(addr)))
    }

    #[test_case(&[], "example.com", &[]; "no cname")]
    #[test_case(&[("example.com.", "edge.example.net.")], "edge.example.net", &["example.com"]; "single cname")]
    #[test_case(&[("example.com.", "edge.example.net."), ("edge.example.net.", "host.example.org.")], "host.example.org", &["example.com", "edge.example.net"]; "cname chain")]
    #[test_case(&[("example.com.", "edge.example.net."), ("example.com.", "edge.example.net.")], "edge.example.net", &["example.com"]; "duplicate alias")]
    fn test_fold_cnames(chain: &[(&str, &str)], canonical: &str, aliases: &[&str]) {
        let records = chain
            .iter()
            .map(|(alias, target)| cname(alias, target))
            .chain([a_record("host.example.org.", Ipv4Addr::new(192, 0, 2, 1))])
            .collect::<Vec<_>>();
        let (hostname, found) = fold_cnames(records.iter(), "example.com");
        assert_eq!(canonical, hostname);
        assert_eq!(aliases, found);
    }

    fn no_records() -> ResolveErrorKind {
        ResolveErrorKind::NoRecordsFound {
            query: Box::new(Query::query(name("1.2.0.192.in-addr.arpa."), RecordType::PTR)),
            soa: None,
            negative_ttl: None,
            response_code: ResponseCode::NXDomain,
            trusted: true,
        }
    }

    #[test_case(&no_records(), DnsEntry::NotFound; "no records")]
    #[test_case(&ResolveErrorKind::Timeout, DnsEntry::Timeout; "timeout")]
    #[test_case(&ResolveErrorKind::NoConnections, DnsEntry::Failed; "no connections")]
    #[test_case(&ResolveErrorKind::Message("refused"), DnsEntry::Failed; "other")]
    fn test_classify(kind: &ResolveErrorKind, expected: fn(IpAddr) -> DnsEntry) {
        let addr = IpAddr::from_str("192.0.2.1").unwrap();
        assert_eq!(expected(addr), classify(addr, kind));
    }

    fn addr_info(addr: &str, canonname: Option<&str>) -> AddrInfo {
        AddrInfo {
            flags: 0,
            address: 0,
            socktype: SockType::Stream.into(),
            protocol: 0,
            sockaddr: SocketAddr::new(IpAddr::from_str(addr).unwrap(), 0),
            canonname: canonname.map(String::from),
        }
    }

    #[test]
    fn test_canonical_entry() {
        let infos = [
            addr_info("192.0.2.1", Some("host.example.org")),
            addr_info("2001:db8::1", None),
            addr_info("192.0.2.1", None),
        ];
        let entry = canonical_entry("www.example.com", &infos, IpAddrFamily::System);
        assert_eq!("host.example.org", entry.hostname);
        assert_eq!(vec![String::from("www.example.com")], entry.aliases);
        assert_eq!(addrs(&["192.0.2.1", "2001:db8::1"]), entry.addrs);
    }

    #[test_case(None; "no canonical name")]
    #[test_case(Some(""); "empty canonical name")]
    #[test_case(Some("EXAMPLE.com"); "same canonical name")]
    fn test_canonical_entry_without_alias(canonname: Option<&str>) {
        let infos = [addr_info("192.0.2.1", canonname), addr_info("2001:db8::1", None)];
        let entry = canonical_entry("example.com", &infos, IpAddrFamily::Ipv6Only);
        assert!(entry.hostname.eq_ignore_ascii_case("example.com"));
        assert!(entry.aliases.is_empty());
        assert_eq!(addrs(&["2001:db8::1"]), entry.addrs);
    }

    #[test]
    fn test_literal_entry() {
        let addr = IpAddr::from_str("127.0.0.1").unwrap();
        let entry = literal_entry(DnsEntry::Resolved(
            addr,
            vec![String::from("localhost"), String::from("localhost.localdomain")],
        ));
        assert_eq!(
            HostEntry {
                hostname: String::from("localhost"),
                aliases: vec![String::from("localhost.localdomain")],
                addrs: vec![addr],
            },
            entry
        );
    }

    #[test_case(DnsEntry::NotFound(IpAddr::from_str("192.0.2.1").unwrap()); "not found")]
    #[test_case(DnsEntry::Timeout(IpAddr::from_str("192.0.2.1").unwrap()); "timeout")]
    fn test_literal_entry_unresolved(entry: DnsEntry) {
        let entry = literal_entry(entry);
        assert_eq!("192.0.2.1", entry.hostname);
        assert!(entry.aliases.is_empty());
    }

    #[test]
    fn test_host_entry_of_address_literal() -> anyhow::Result<()> {
        let resolver = DnsResolver::new(Config::default())?;
        let addr = IpAddr::from_str("127.0.0.1")?;
        let entry = resolver.host_entry("127.0.0.1")?;
        assert_eq!(literal_entry(resolver.reverse_lookup(addr)), entry);
        assert_eq!(vec![addr], entry.addrs);
        Ok(())
    }
}
