use crate::config::TraceOptions;
use crate::prober::EchoProber;
use crate::tracer::Traceroute;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Build a traceroute.
///
/// The options given here are the defaults of every trace run by the resulting
/// [`Traceroute`]; they may be overridden per trace with
/// [`Traceroute::trace_addresses_with`] and [`Traceroute::trace_detailed_with`].
///
/// # Examples
///
/// ```
/// use netscout_core::{Builder, EchoProber, ProbeOptions, ProbeReply, Result, Target};
/// use std::time::Duration;
///
/// struct Silent;
///
/// impl EchoProber for Silent {
///     fn probe(&self, _: &Target, _: &ProbeOptions) -> Result<ProbeReply> {
///         Ok(ProbeReply::timed_out())
///     }
/// }
///
/// let traceroute = Builder::new(Silent)
///     .timeout(Duration::from_millis(100))
///     .max_ttl(5)
///     .build();
/// assert!(traceroute.trace_addresses("192.0.2.1")?.is_empty());
/// # Ok::<(), netscout_core::Error>(())
/// ```
#[derive(Debug)]
pub struct Builder<P> {
    prober: P,
    options: TraceOptions,
    cancellation_token: Option<CancellationToken>,
}

impl<P: EchoProber> Builder<P> {
    /// Build a traceroute builder for a given prober.
    #[must_use]
    pub fn new(prober: P) -> Self {
        Self {
            prober,
            options: TraceOptions::default(),
            cancellation_token: None,
        }
    }

    /// Replace all trace options.
    #[must_use]
    pub fn options(self, options: TraceOptions) -> Self {
        Self { options, ..self }
    }

    /// Set how long to wait for each probe reply.
    #[must_use]
    pub fn timeout(self, timeout: Duration) -> Self {
        Self {
            options: self.options.timeout(timeout),
            ..self
        }
    }

    /// Set the bytes carried by each probe.
    #[must_use]
    pub fn payload(self, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            options: self.options.payload(payload),
            ..self
        }
    }

    /// Set the don't-fragment flag on each probe.
    #[must_use]
    pub fn dont_fragment(self, dont_fragment: bool) -> Self {
        Self {
            options: self.options.dont_fragment(dont_fragment),
            ..self
        }
    }

    /// Set the time-to-live of the first probe.
    #[must_use]
    pub fn first_ttl(self, first_ttl: u8) -> Self {
        Self {
            options: self.options.first_ttl(first_ttl),
            ..self
        }
    }

    /// Set the time-to-live of the last probe.
    #[must_use]
    pub fn max_ttl(self, max_ttl: u8) -> Self {
        Self {
            options: self.options.max_ttl(max_ttl),
            ..self
        }
    }

    /// Abort traces when `token` is cancelled.
    ///
    /// The token is checked before every probe is sent.
    #[must_use]
    pub fn cancellation_token(self, token: CancellationToken) -> Self {
        Self {
            cancellation_token: Some(token),
            ..self
        }
    }

    /// Build the [`Traceroute`].
    #[must_use]
    pub fn build(self) -> Traceroute<P> {
        Traceroute::new(self.prober, self.options, self.cancellation_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults;
    use crate::prober::MockEchoProber;
    use crate::types::TimeToLive;

    #[test]
    fn test_builder_minimal() {
        let traceroute = Builder::new(MockEchoProber::new()).build();
        let options = traceroute.options();
        assert_eq!(defaults::DEFAULT_TIMEOUT, options.timeout);
        assert_eq!(defaults::DEFAULT_PAYLOAD_SIZE, options.payload.len());
        assert_eq!(defaults::DEFAULT_DONT_FRAGMENT, options.dont_fragment);
        assert_eq!(TimeToLive(defaults::DEFAULT_FIRST_TTL), options.first_ttl);
        assert_eq!(TimeToLive(defaults::DEFAULT_MAX_TTL), options.max_ttl);
        assert!(!traceroute.is_cancelled());
    }

    #[test]
    fn test_builder_full() {
        let token = CancellationToken::new();
        let traceroute = Builder::new(MockEchoProber::new())
            .timeout(Duration::from_millis(750))
            .payload(vec![0xff; 64])
            .dont_fragment(true)
            .first_ttl(2)
            .max_ttl(16)
            .cancellation_token(token.clone())
            .build();
        let options = traceroute.options();
        assert_eq!(Duration::from_millis(750), options.timeout);
        assert_eq!(vec![0xff; 64], options.payload);
        assert!(options.dont_fragment);
        assert_eq!(TimeToLive(2), options.first_ttl);
        assert_eq!(TimeToLive(16), options.max_ttl);
        assert!(!traceroute.is_cancelled());
        token.cancel();
        assert!(traceroute.is_cancelled());
    }

    #[test]
    fn test_builder_options() {
        let options = TraceOptions::default().max_ttl(3);
        let traceroute = Builder::new(MockEchoProber::new())
            .options(options.clone())
            .build();
        assert_eq!(&options, traceroute.options());
    }
}
