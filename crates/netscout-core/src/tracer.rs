use crate::config::TraceOptions;
use crate::error::{Error, Result};
use crate::probe::{ProbeStatus, Target, TraceHop};
use crate::prober::EchoProber;
use crate::types::{HopIndex, TimeToLive};
use std::net::IpAddr;
use tokio_util::sync::CancellationToken;
use tracing::instrument;

/// A traceroute implementation.
///
/// Discovers the hops between this host and a target by sending echo probes
/// with an increasing time-to-live.  Each router which discards a probe
/// answers with `TtlExpired` and so reveals its address; the trace ends as
/// soon as the target itself answers, or once the maximum time-to-live has
/// been probed.
///
/// Hops which do not answer are skipped rather than recorded as placeholders.
///
/// Probes are sent strictly one at a time and any error raised by the prober
/// aborts the trace.
///
/// Use the [`crate::Builder`] type to create a [`Traceroute`].
#[derive(Debug)]
pub struct Traceroute<P> {
    prober: P,
    options: TraceOptions,
    cancellation_token: Option<CancellationToken>,
}

impl<P: EchoProber> Traceroute<P> {
    pub(crate) const fn new(
        prober: P,
        options: TraceOptions,
        cancellation_token: Option<CancellationToken>,
    ) -> Self {
        Self {
            prober,
            options,
            cancellation_token,
        }
    }

    /// Trace the addresses of the hops to `hostname` using the default options.
    ///
    /// See [`Traceroute::trace_addresses_with`].
    pub fn trace_addresses(&self, hostname: &str) -> Result<Vec<IpAddr>> {
        self.trace_addresses_with(hostname, &self.options)
    }

    /// Trace the addresses of the hops to `hostname`.
    ///
    /// The result holds the address of every hop which answered, in the order
    /// discovered; if the target was reached its address is the last element.
    ///
    /// There is no distinct signal for an unreachable target: a trace which
    /// exhausts `max_ttl` simply returns the hops it found.
    #[instrument(skip(self), level = "trace")]
    pub fn trace_addresses_with(
        &self,
        hostname: &str,
        options: &TraceOptions,
    ) -> Result<Vec<IpAddr>> {
        let target = Target::parse(hostname)?;
        let mut addrs = Vec::with_capacity(options.max_probes());
        self.walk(&target, options, |_, addr| {
            addrs.push(addr);
            Ok(())
        })?;
        Ok(addrs)
    }

    /// Trace the hops to `hostname`, with detail, using the default options.
    ///
    /// See [`Traceroute::trace_detailed_with`].
    pub fn trace_detailed(&self, hostname: &str) -> Result<Vec<TraceHop>> {
        self.trace_detailed_with(hostname, &self.options)
    }

    /// Trace the hops to `hostname`, with detail.
    ///
    /// Each hop found is followed by a second, unrestricted, echo probe sent
    /// directly to that hop, and the reply is kept as the hop detail.  The
    /// follow-up probe uses the same timeout as the trace.
    #[instrument(skip(self), level = "trace")]
    pub fn trace_detailed_with(
        &self,
        hostname: &str,
        options: &TraceOptions,
    ) -> Result<Vec<TraceHop>> {
        let target = Target::parse(hostname)?;
        let mut hops = Vec::with_capacity(options.max_probes());
        self.walk(&target, options, |ttl, address| {
            self.check_cancelled()?;
            let detail = self
                .prober
                .probe(&Target::Addr(address), &options.detail_probe())
                .map_err(|err| err.context(format!("detail probe to {address}")))?;
            tracing::debug!(%ttl, %address, status = %detail.status, rtt = ?detail.round_trip_time, "hop detail");
            let sequence_index = HopIndex(hops.len() + 1);
            hops.push(TraceHop {
                sequence_index,
                ttl,
                address,
                detail: Some(detail),
            });
            Ok(())
        })?;
        Ok(hops)
    }

    /// The default options of this traceroute.
    #[must_use]
    pub const fn options(&self) -> &TraceOptions {
        &self.options
    }

    /// The prober used by this traceroute.
    #[must_use]
    pub const fn prober(&self) -> &P {
        &self.prober
    }

    /// Has the cancellation token of this traceroute been cancelled?
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancellation_token
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
    }

    /// Probe `target` with each time-to-live in turn, recording every hop which answers.
    ///
    /// The walk halts after the target answers, or after `max_ttl` is probed.
    fn walk<F>(&self, target: &Target, options: &TraceOptions, mut record: F) -> Result<()>
    where
        F: FnMut(TimeToLive, IpAddr) -> Result<()>,
    {
        for ttl in (options.first_ttl.0..=options.max_ttl.0).map(TimeToLive) {
            self.check_cancelled()?;
            let reply = self
                .prober
                .probe(target, &options.hop_probe(ttl))
                .map_err(|err| err.context(format!("probe to {target} with ttl {ttl}")))?;
            tracing::debug!(%ttl, status = %reply.status, address = ?reply.address, rtt = ?reply.round_trip_time);
            match (reply.status, reply.address) {
                (ProbeStatus::Success, Some(addr)) => {
                    record(ttl, addr)?;
                    return Ok(());
                }
                (ProbeStatus::Success, None) => return Ok(()),
                (ProbeStatus::TtlExpired, Some(addr)) => record(ttl, addr)?,
                (ProbeStatus::TtlExpired, None) | (ProbeStatus::TimedOut | ProbeStatus::Other, _) => {}
            }
        }
        Ok(())
    }

    fn check_cancelled(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(Error::Cancelled)
        } else {
            Ok(())
        }
    }
}
