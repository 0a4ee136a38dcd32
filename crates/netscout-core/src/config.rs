use crate::constants::UNRESTRICTED_TTL;
use crate::probe::ProbeOptions;
use crate::types::TimeToLive;
use std::time::Duration;

/// Default values for configuration.
pub mod defaults {
    use std::time::Duration;

    /// The default value for `timeout`.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(4000);

    /// The default value for `payload-size`.
    pub const DEFAULT_PAYLOAD_SIZE: usize = 32;

    /// The default value for `dont-fragment`.
    pub const DEFAULT_DONT_FRAGMENT: bool = false;

    /// The default value for `first-ttl`.
    pub const DEFAULT_FIRST_TTL: u8 = 1;

    /// The default value for `max-ttl`.
    pub const DEFAULT_MAX_TTL: u8 = 30;

    /// The default value for `ping-count`.
    pub const DEFAULT_PING_COUNT: usize = 4;
}

/// The default echo payload, `DEFAULT_PAYLOAD_SIZE` zero bytes.
#[must_use]
pub fn default_payload() -> Vec<u8> {
    vec![0; defaults::DEFAULT_PAYLOAD_SIZE]
}

/// Options for a single trace.
///
/// Use [`TraceOptions::default`] and override only the fields that matter:
///
/// ```
/// use std::time::Duration;
/// use netscout_core::TraceOptions;
///
/// let options = TraceOptions::default()
///     .timeout(Duration::from_millis(500))
///     .max_ttl(8);
/// assert_eq!(1, options.first_ttl.0);
/// ```
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TraceOptions {
    /// How long to wait for each probe reply.
    pub timeout: Duration,
    /// The bytes carried by each probe.
    pub payload: Vec<u8>,
    /// Set the don't-fragment flag on each probe.
    pub dont_fragment: bool,
    /// The time-to-live of the first probe.
    pub first_ttl: TimeToLive,
    /// The time-to-live of the last probe.
    pub max_ttl: TimeToLive,
}

impl Default for TraceOptions {
    fn default() -> Self {
        Self {
            timeout: defaults::DEFAULT_TIMEOUT,
            payload: default_payload(),
            dont_fragment: defaults::DEFAULT_DONT_FRAGMENT,
            first_ttl: TimeToLive(defaults::DEFAULT_FIRST_TTL),
            max_ttl: TimeToLive(defaults::DEFAULT_MAX_TTL),
        }
    }
}

impl TraceOptions {
    #[must_use]
    pub fn timeout(self, timeout: Duration) -> Self {
        Self { timeout, ..self }
    }

    #[must_use]
    pub fn payload(self, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            payload: payload.into(),
            ..self
        }
    }

    #[must_use]
    pub fn dont_fragment(self, dont_fragment: bool) -> Self {
        Self {
            dont_fragment,
            ..self
        }
    }

    #[must_use]
    pub fn first_ttl(self, first_ttl: u8) -> Self {
        Self {
            first_ttl: TimeToLive(first_ttl),
            ..self
        }
    }

    #[must_use]
    pub fn max_ttl(self, max_ttl: u8) -> Self {
        Self {
            max_ttl: TimeToLive(max_ttl),
            ..self
        }
    }

    /// The number of probes a trace issues if the target is never reached.
    #[must_use]
    pub fn max_probes(&self) -> usize {
        usize::from(self.max_ttl.0.saturating_sub(self.first_ttl.0))
            + usize::from(self.first_ttl <= self.max_ttl)
    }

    /// The options for the hop-limited probe sent with `ttl`.
    pub(crate) fn hop_probe(&self, ttl: TimeToLive) -> ProbeOptions {
        ProbeOptions {
            time_to_live: ttl,
            dont_fragment: self.dont_fragment,
            timeout: self.timeout,
            payload: self.payload.clone(),
        }
    }

    /// The options for the unrestricted probe sent directly to a discovered hop.
    pub(crate) fn detail_probe(&self) -> ProbeOptions {
        ProbeOptions {
            time_to_live: TimeToLive(UNRESTRICTED_TTL),
            dont_fragment: false,
            timeout: self.timeout,
            payload: default_payload(),
        }
    }
}

/// Ping configuration.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct PingConfig {
    /// The options of every echo request.
    pub probe: ProbeOptions,
    /// The number of echo requests sent by a repeated ping.
    pub count: usize,
}

impl Default for PingConfig {
    fn default() -> Self {
        Self {
            probe: ProbeOptions::default(),
            count: defaults::DEFAULT_PING_COUNT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_trace_options_defaults() {
        let options = TraceOptions::default();
        assert_eq!(Duration::from_millis(4000), options.timeout);
        assert_eq!(vec![0; 32], options.payload);
        assert!(!options.dont_fragment);
        assert_eq!(TimeToLive(1), options.first_ttl);
        assert_eq!(TimeToLive(30), options.max_ttl);
    }

    #[test]
    fn test_trace_options_overrides() {
        let options = TraceOptions::default()
            .timeout(Duration::from_millis(100))
            .payload([1, 2, 3])
            .dont_fragment(true)
            .first_ttl(3)
            .max_ttl(9);
        assert_eq!(Duration::from_millis(100), options.timeout);
        assert_eq!(vec![1, 2, 3], options.payload);
        assert!(options.dont_fragment);
        assert_eq!(TimeToLive(3), options.first_ttl);
        assert_eq!(TimeToLive(9), options.max_ttl);
    }

    #[test_case(1, 30, 30)]
    #[test_case(1, 1, 1)]
    #[test_case(5, 5, 1)]
    #[test_case(4, 10, 7)]
    #[test_case(10, 4, 0)]
    #[test_case(0, 255, 256)]
    fn test_max_probes(first: u8, max: u8, expected: usize) {
        let options = TraceOptions::default().first_ttl(first).max_ttl(max);
        assert_eq!(expected, options.max_probes());
    }

    #[test]
    fn test_hop_probe() {
        let options = TraceOptions::default()
            .dont_fragment(true)
            .payload([7; 4])
            .timeout(Duration::from_millis(250));
        let probe = options.hop_probe(TimeToLive(5));
        assert_eq!(TimeToLive(5), probe.time_to_live);
        assert!(probe.dont_fragment);
        assert_eq!(Duration::from_millis(250), probe.timeout);
        assert_eq!(vec![7; 4], probe.payload);
    }

    #[test]
    fn test_detail_probe_threads_timeout() {
        let options = TraceOptions::default()
            .dont_fragment(true)
            .payload([7; 4])
            .timeout(Duration::from_millis(250));
        let probe = options.detail_probe();
        assert_eq!(TimeToLive(UNRESTRICTED_TTL), probe.time_to_live);
        assert!(!probe.dont_fragment);
        assert_eq!(Duration::from_millis(250), probe.timeout);
        assert_eq!(default_payload(), probe.payload);
    }
}
