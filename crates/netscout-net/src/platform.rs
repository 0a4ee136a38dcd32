#[cfg(unix)]
mod unix;

#[cfg(unix)]
pub use unix::*;

#[cfg(not(unix))]
mod unsupported;

#[cfg(not(unix))]
pub use self::unsupported::*;
