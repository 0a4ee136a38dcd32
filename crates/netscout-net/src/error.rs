use std::io;
use thiserror::Error;

/// A network utility error result.
pub type Result<T> = std::result::Result<T, Error>;

/// A network utility error.
#[derive(Error, Debug)]
pub enum Error {
    #[error("port {0} is out of range, must be between 1 and 65535")]
    PortOutOfRange(u16),
    #[error("port range {start}..={end} is out of range")]
    PortRangeOutOfRange { start: u16, end: u16 },
    #[error("no address found for host {0}")]
    HostNotFound(String),
    #[error("failed to resolve host: {0}")]
    Resolve(#[from] netscout_dns::Error),
    #[error("interface lookup failed: {0}")]
    InterfaceLookupFailed(#[from] io::Error),
    #[error("unsupported on this platform: {0}")]
    Unsupported(&'static str),
}
