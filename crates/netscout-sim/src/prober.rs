use crate::simulation::{Response, Simulation, SingleHost};
use netscout_core::{
    EchoProber, Error, ProbeOptions, ProbeReply, ProbeStatus, Result, Target, TimeToLive,
    MAX_PAYLOAD_SIZE,
};
use parking_lot::Mutex;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

/// A probe received by a [`SimulatedProber`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ProbeRecord {
    pub target: Target,
    pub ttl: TimeToLive,
}

/// An [`EchoProber`] which answers from a [`Simulation`] rather than the network.
///
/// A probe sent to the simulation target is answered by the hop configured for
/// its time-to-live; probes with a time-to-live beyond the last configured hop
/// reach the target.  A probe sent directly to the address of a configured hop
/// is answered by that hop if its time-to-live is large enough to reach it.
#[derive(Debug)]
pub struct SimulatedProber {
    sim: Arc<Simulation>,
    probes: Mutex<Vec<ProbeRecord>>,
}

impl SimulatedProber {
    #[must_use]
    pub fn new(sim: Arc<Simulation>) -> Self {
        Self {
            sim,
            probes: Mutex::new(Vec::new()),
        }
    }

    /// The number of probes received, including those answered with a simulated error.
    ///
    /// Probes rejected before reaching the simulated network are not counted.
    #[must_use]
    pub fn probe_count(&self) -> usize {
        self.probes.lock().len()
    }

    /// The probes received, in order.
    #[must_use]
    pub fn probes(&self) -> Vec<ProbeRecord> {
        self.probes.lock().clone()
    }

    fn resolve(&self, target: &Target) -> Result<IpAddr> {
        match target {
            Target::Addr(addr) => Ok(*addr),
            Target::Hostname(hostname) if self.sim.hostname.as_ref() == Some(hostname) => {
                Ok(self.sim.target)
            }
            Target::Hostname(hostname) => Err(Error::ProtocolFailure {
                message: format!("no such host {hostname}"),
                source: None,
            }),
        }
    }

    fn probe_target(&self, ttl: TimeToLive, options: &ProbeOptions) -> Result<ProbeReply> {
        Ok(match self.sim.hop(ttl.0).map(|hop| &hop.resp) {
            Some(Response::NoResponse) => ProbeReply::timed_out(),
            Some(Response::SingleHost(SingleHost { addr, rtt_ms })) if *addr == self.sim.target => {
                reply(ProbeStatus::Success, *addr, *rtt_ms, options)
            }
            Some(Response::SingleHost(SingleHost { addr, rtt_ms })) => {
                reply(ProbeStatus::TtlExpired, *addr, *rtt_ms, options)
            }
            Some(Response::Error(err)) => return Err(Error::from(err)),
            None if ttl.0 > self.sim.latest_ttl() => reply(
                ProbeStatus::Success,
                self.sim.target,
                self.sim.target_rtt_ms,
                options,
            ),
            None => ProbeReply::timed_out(),
        })
    }

    fn probe_hop(&self, addr: IpAddr, ttl: TimeToLive, options: &ProbeOptions) -> ProbeReply {
        self.sim
            .hops
            .iter()
            .find_map(|hop| match &hop.resp {
                Response::SingleHost(host) if host.addr == addr && hop.ttl <= ttl.0 => {
                    Some(reply(ProbeStatus::Success, addr, host.rtt_ms, options))
                }
                _ => None,
            })
            .unwrap_or_else(ProbeReply::timed_out)
    }
}

/// A reply from `addr`, or a time out if `rtt_ms` exceeds the probe timeout.
fn reply(status: ProbeStatus, addr: IpAddr, rtt_ms: u16, options: &ProbeOptions) -> ProbeReply {
    let rtt = Duration::from_millis(u64::from(rtt_ms));
    if rtt > options.timeout {
        return ProbeReply::timed_out();
    }
    let echoed = if status == ProbeStatus::Success {
        options.payload.clone()
    } else {
        vec![]
    };
    ProbeReply::new(status, Some(addr), rtt, echoed)
}

impl EchoProber for SimulatedProber {
    fn probe(&self, target: &Target, options: &ProbeOptions) -> Result<ProbeReply> {
        if options.payload.len() > MAX_PAYLOAD_SIZE {
            return Err(Error::InvalidInput(format!(
                "payload of {} bytes exceeds {MAX_PAYLOAD_SIZE} bytes",
                options.payload.len()
            )));
        }
        let addr = self.resolve(target)?;
        self.probes.lock().push(ProbeRecord {
            target: target.clone(),
            ttl: options.time_to_live,
        });
        let reply = if addr == self.sim.target {
            self.probe_target(options.time_to_live, options)?
        } else {
            self.probe_hop(addr, options.time_to_live, options)
        };
        tracing::debug!(%target, ttl = %options.time_to_live, status = %reply.status, "simulated probe");
        Ok(reply)
    }
}
