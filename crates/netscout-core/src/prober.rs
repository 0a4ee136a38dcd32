use crate::error::Result;
use crate::probe::{ProbeOptions, ProbeReply, Target};

/// Send a single ICMP echo request and wait for its reply.
///
/// Implementations own the transport for the duration of one call and report
/// invalid input (`Error::InvalidInput`), illegal timeouts (`Error::OutOfRange`),
/// failed exchanges (`Error::ProtocolFailure`) and use after release
/// (`Error::ResourceDisposed`) as errors.  A probe which is simply not answered
/// is not an error and is reported as `ProbeStatus::TimedOut`.
#[cfg_attr(test, mockall::automock)]
pub trait EchoProber {
    /// Probe `target` with `options`.
    fn probe(&self, target: &Target, options: &ProbeOptions) -> Result<ProbeReply>;
}

impl<P: EchoProber + ?Sized> EchoProber for &P {
    fn probe(&self, target: &Target, options: &ProbeOptions) -> Result<ProbeReply> {
        (**self).probe(target, options)
    }
}

impl<P: EchoProber + ?Sized> EchoProber for Box<P> {
    fn probe(&self, target: &Target, options: &ProbeOptions) -> Result<ProbeReply> {
        (**self).probe(target, options)
    }
}
