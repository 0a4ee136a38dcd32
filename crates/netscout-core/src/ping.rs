use crate::config::PingConfig;
use crate::error::Result;
use crate::probe::{ProbeOptions, ProbeReply, ProbeStatus, Target};
use crate::prober::EchoProber;
use std::time::Duration;
use tracing::instrument;

/// Send plain echo requests to a host.
#[derive(Debug)]
pub struct Pinger<P> {
    prober: P,
    config: PingConfig,
}

impl<P: EchoProber> Pinger<P> {
    /// Create a `Pinger` with the default configuration.
    #[must_use]
    pub fn new(prober: P) -> Self {
        Self::with_config(prober, PingConfig::default())
    }

    #[must_use]
    pub const fn with_config(prober: P, config: PingConfig) -> Self {
        Self { prober, config }
    }

    /// Send a single echo request to `hostname`.
    pub fn ping(&self, hostname: &str) -> Result<ProbeReply> {
        self.ping_with(hostname, &self.config.probe)
    }

    /// Send a single echo request to `hostname` with the given options.
    #[instrument(skip(self, options), level = "trace")]
    pub fn ping_with(&self, hostname: &str, options: &ProbeOptions) -> Result<ProbeReply> {
        let target = Target::parse(hostname)?;
        let reply = self
            .prober
            .probe(&target, options)
            .map_err(|err| err.context(format!("ping to {target}")))?;
        tracing::debug!(%target, status = %reply.status, rtt = ?reply.round_trip_time);
        Ok(reply)
    }

    /// Send `count` echo requests to `hostname`, one after the other.
    ///
    /// Stops at the first error.
    #[instrument(skip(self), level = "trace")]
    pub fn ping_repeat(&self, hostname: &str, count: usize) -> Result<Vec<ProbeReply>> {
        let target = Target::parse(hostname)?;
        (0..count)
            .map(|seq| {
                self.prober
                    .probe(&target, &self.config.probe)
                    .map_err(|err| err.context(format!("ping {seq} to {target}")))
            })
            .collect()
    }

    /// Send the configured number of echo requests to `hostname`.
    pub fn ping_default_count(&self, hostname: &str) -> Result<Vec<ProbeReply>> {
        self.ping_repeat(hostname, self.config.count)
    }

    #[must_use]
    pub const fn config(&self) -> &PingConfig {
        &self.config
    }
}

/// Statistics over a series of echo replies.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct PingSummary {
    pub sent: usize,
    /// The number of `Success` replies.
    pub received: usize,
    pub lost: usize,
    /// Round trip statistics of the successful replies, if any.
    pub min_rtt: Option<Duration>,
    pub avg_rtt: Option<Duration>,
    pub max_rtt: Option<Duration>,
}

impl PingSummary {
    /// The percentage of requests without a successful reply.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn loss_pct(&self) -> f64 {
        if self.sent == 0 {
            0_f64
        } else {
            self.lost as f64 * 100_f64 / self.sent as f64
        }
    }
}

impl From<&[ProbeReply]> for PingSummary {
    fn from(replies: &[ProbeReply]) -> Self {
        let rtts = replies
            .iter()
            .filter(|reply| reply.status == ProbeStatus::Success)
            .map(|reply| reply.round_trip_time)
            .collect::<Vec<_>>();
        let sent = replies.len();
        let received = rtts.len();
        let avg_rtt = u32::try_from(received)
            .ok()
            .filter(|&n| n > 0)
            .map(|n| rtts.iter().sum::<Duration>() / n);
        Self {
            sent,
            received,
            lost: sent - received,
            min_rtt: rtts.iter().min().copied(),
            avg_rtt,
            max_rtt: rtts.iter().max().copied(),
        }
    }
}
