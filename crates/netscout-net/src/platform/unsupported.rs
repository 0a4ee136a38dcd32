use crate::error::{Error, Result};
use crate::interface::LocalInterface;

pub fn interfaces() -> Result<Vec<LocalInterface>> {
    Err(Error::Unsupported("interface enumeration"))
}
