//! Database access for the compliance engine service

pub mod airports;
pub mod records;
pub mod regulations;

use acms_common::{Error, Result};
use std::str::FromStr;
use uuid::Uuid;

/// Parse a stored UUID column
pub(crate) fn parse_guid(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|e| Error::InvalidInput(format!("Invalid stored UUID: {}", e)))
}

/// Parse an optional enum column strictly: unknown values are a data error
pub(crate) fn parse_opt_enum<T>(raw: Option<String>) -> Result<Option<T>>
where
    T: FromStr<Err = Error>,
{
    raw.map(|s| s.parse()).transpose()
}
