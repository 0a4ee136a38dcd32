use netscout_core::{defaults, Error, TraceOptions};
use serde::Deserialize;
use std::net::IpAddr;
use std::time::Duration;

/// A simulated network path.
#[derive(Debug, Clone, Deserialize)]
pub struct Simulation {
    pub name: String,
    /// The hostname which resolves to `target`, if any.
    pub hostname: Option<String>,
    pub target: IpAddr,
    pub first_ttl: Option<u8>,
    pub max_ttl: Option<u8>,
    pub timeout_ms: Option<u64>,
    /// The simulated round trip time of the target in ms.
    #[serde(default)]
    pub target_rtt_ms: u16,
    pub hops: Vec<Hop>,
}

impl Simulation {
    /// Parse a simulation from TOML.
    pub fn from_toml(data: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(data)
    }

    /// The trace options described by this simulation.
    #[must_use]
    pub fn trace_options(&self) -> TraceOptions {
        TraceOptions::default()
            .first_ttl(self.first_ttl.unwrap_or(defaults::DEFAULT_FIRST_TTL))
            .max_ttl(self.max_ttl.unwrap_or(defaults::DEFAULT_MAX_TTL))
            .timeout(
                self.timeout_ms
                    .map_or(defaults::DEFAULT_TIMEOUT, Duration::from_millis),
            )
    }

    /// The hop simulated for `ttl`, if any.
    #[must_use]
    pub fn hop(&self, ttl: u8) -> Option<&Hop> {
        self.hops.iter().find(|hop| hop.ttl == ttl)
    }

    /// The highest simulated time-to-live.
    #[must_use]
    pub(crate) fn latest_ttl(&self) -> u8 {
        self.hops.iter().map(|hop| hop.ttl).max().unwrap_or_default()
    }
}

/// A simulated hop.
#[derive(Debug, Clone, Deserialize)]
pub struct Hop {
    /// The simulated time-to-live (TTL).
    pub ttl: u8,
    /// The simulated probe response.
    pub resp: Response,
}

/// A simulated probe response.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "tag")]
pub enum Response {
    /// Simulate a hop which does not respond to probes.
    NoResponse,
    /// Simulate a hop which responds to probes from a single host.
    SingleHost(SingleHost),
    /// Simulate a prober failure when probing this hop.
    Error(SimulatedError),
}

/// A simulated probe response with a single addr and fixed round trip time.
#[derive(Debug, Clone, Deserialize)]
pub struct SingleHost {
    /// The simulated host responding to the probe.
    pub addr: IpAddr,
    /// The simulated round trip time (RTT) in ms.
    pub rtt_ms: u16,
}

/// A simulated prober failure.
#[derive(Debug, Clone, Deserialize)]
pub struct SimulatedError {
    pub kind: SimulatedErrorKind,
    #[serde(default)]
    pub message: String,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SimulatedErrorKind {
    InvalidInput,
    OutOfRange,
    ProtocolFailure,
    ResourceDisposed,
    Other,
}

impl From<&SimulatedError> for Error {
    fn from(value: &SimulatedError) -> Self {
        let message = value.message.clone();
        match value.kind {
            SimulatedErrorKind::InvalidInput => Self::InvalidInput(message),
            SimulatedErrorKind::OutOfRange => Self::OutOfRange(message),
            SimulatedErrorKind::ProtocolFailure => Self::ProtocolFailure {
                message,
                source: None,
            },
            SimulatedErrorKind::ResourceDisposed => Self::ResourceDisposed(message),
            SimulatedErrorKind::Other => Self::other(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use netscout_core::{ErrorKind, TimeToLive};
    use test_case::test_case;

    const SIM: &str = r#"
        name = "three hops"
        target = "10.0.0.254"
        max_ttl = 8
        timeout_ms = 500

        [[hops]]
        ttl = 1
        resp = { tag = "SingleHost", addr = "10.0.0.1", rtt_ms = 10 }

        [[hops]]
        ttl = 2
        resp = { tag = "NoResponse" }

        [[hops]]
        ttl = 3
        resp = { tag = "Error", kind = "out-of-range", message = "timeout" }
    "#;

    #[test]
    fn test_parse() {
        let sim = Simulation::from_toml(SIM).unwrap();
        assert_eq!("three hops", sim.name);
        assert_eq!(None, sim.hostname);
        assert_eq!(3, sim.hops.len());
        assert_eq!(3, sim.latest_ttl());
        assert!(matches!(sim.hop(2).map(|hop| &hop.resp), Some(Response::NoResponse)));
        assert!(sim.hop(4).is_none());
    }

    #[test]
    fn test_trace_options() {
        let options = Simulation::from_toml(SIM).unwrap().trace_options();
        assert_eq!(TimeToLive(1), options.first_ttl);
        assert_eq!(TimeToLive(8), options.max_ttl);
        assert_eq!(Duration::from_millis(500), options.timeout);
    }

    #[test_case(SimulatedErrorKind::InvalidInput, ErrorKind::InvalidInput)]
    #[test_case(SimulatedErrorKind::OutOfRange, ErrorKind::OutOfRange)]
    #[test_case(SimulatedErrorKind::ProtocolFailure, ErrorKind::ProtocolFailure)]
    #[test_case(SimulatedErrorKind::ResourceDisposed, ErrorKind::ResourceLifecycle)]
    #[test_case(SimulatedErrorKind::Other, ErrorKind::Unclassified)]
    fn test_simulated_error_kind(kind: SimulatedErrorKind, expected: ErrorKind) {
        let err = Error::from(&SimulatedError {
            kind,
            message: String::from("simulated"),
        });
        assert_eq!(expected, err.kind());
    }
}
