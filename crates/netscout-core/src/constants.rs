/// The time-to-live used for a plain echo which is not restricted in the number of hops it may
/// traverse.
pub const UNRESTRICTED_TTL: u8 = 128;

/// The largest payload an echo request may carry.
pub const MAX_PAYLOAD_SIZE: usize = 65500;
