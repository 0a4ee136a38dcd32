//! Simulated echo probing.
//!
//! A [`Simulation`] describes a network path as the response of each hop,
//! and a [`SimulatedProber`] answers echo probes from it, so that traces can
//! be run deterministically and without privileges.
#![forbid(unsafe_code)]

mod prober;
mod simulation;

pub use prober::{ProbeRecord, SimulatedProber};
pub use simulation::{Hop, Response, SimulatedError, SimulatedErrorKind, Simulation, SingleHost};
