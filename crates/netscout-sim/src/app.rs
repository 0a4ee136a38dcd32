use anyhow::Context;
use clap::{Parser, ValueEnum};
use netscout_core::{Builder, TraceOptions};
use netscout_sim::{SimulatedProber, Simulation};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::fmt::format::FmtSpan;

/// Trace a route through a simulated network
#[derive(Parser, Debug)]
#[command(name = "netscout-sim", author, version, about, long_about = None, arg_required_else_help(true))]
pub struct Args {
    /// A simulation file to run.
    pub simulation: String,

    /// Send a direct echo to each hop found
    #[arg(short = 'd', long, default_value_t = false)]
    pub detailed: bool,

    /// The TTL to start from [default: simulation or 1]
    #[arg(short = 'f', long)]
    pub first_ttl: Option<u8>,

    /// The maximum number of TTL hops [default: simulation or 30]
    #[arg(short = 'm', long)]
    pub max_ttl: Option<u8>,

    /// The probe reply timeout [default: simulation or 4s]
    #[arg(short = 'T', long, value_parser = parse_duration)]
    pub timeout: Option<Duration>,

    /// The debug log filter
    #[arg(long, default_value = "netscout=debug")]
    pub log_filter: String,

    /// The debug log format
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// How to format log data.
#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
pub enum LogFormat {
    /// Display log data in a compact format.
    Compact,
    /// Display log data in a pretty format.
    Pretty,
    /// Display log data in a json format.
    Json,
}

pub fn run() -> anyhow::Result<()> {
    let args = Args::parse();
    configure_logging(args.log_format, &args.log_filter);
    let simulation_file =
        std::fs::read_to_string(&args.simulation).context(args.simulation.clone())?;
    let sim = Arc::new(Simulation::from_toml(&simulation_file)?);
    let options = trace_options(&args, &sim);
    let prober = SimulatedProber::new(sim.clone());
    let traceroute = Builder::new(&prober).options(options).build();
    let hostname = sim
        .hostname
        .clone()
        .unwrap_or_else(|| sim.target.to_string());
    println!("{}: tracing {hostname}", sim.name);
    if args.detailed {
        for hop in traceroute.trace_detailed(&hostname)? {
            let detail = hop
                .detail
                .map(|reply| format!("{} {:?}", reply.status, reply.round_trip_time))
                .unwrap_or_default();
            println!(
                "{:>3} ttl={:<3} {:<40} {detail}",
                hop.sequence_index.0, hop.ttl.0, hop.address
            );
        }
    } else {
        for (i, addr) in traceroute.trace_addresses(&hostname)?.iter().enumerate() {
            println!("{:>3} {addr}", i + 1);
        }
    }
    println!("{} probes sent", prober.probe_count());
    Ok(())
}

fn trace_options(args: &Args, sim: &Simulation) -> TraceOptions {
    let defaults = sim.trace_options();
    TraceOptions {
        first_ttl: args.first_ttl.map_or(defaults.first_ttl, netscout_core::TimeToLive),
        max_ttl: args.max_ttl.map_or(defaults.max_ttl, netscout_core::TimeToLive),
        timeout: args.timeout.unwrap_or(defaults.timeout),
        ..defaults
    }
}

fn configure_logging(format: LogFormat, filter: &str) {
    match format {
        LogFormat::Compact => {
            tracing_subscriber::fmt()
                .with_span_events(FmtSpan::NONE)
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .compact()
                .init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::fmt()
                .with_span_events(FmtSpan::NONE)
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .pretty()
                .init();
        }
        LogFormat::Json => {
            tracing_subscriber::fmt()
                .with_span_events(FmtSpan::NONE)
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .json()
                .init();
        }
    }
}

fn parse_duration(value: &str) -> anyhow::Result<Duration> {
    Ok(humantime::parse_duration(value)?)
}
