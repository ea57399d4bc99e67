use shared_kernel::integer_key;
use std::str::FromStr;

integer_key!(LocationId);

const PLACEHOLDERS: [&str; 2] = ["null", "undefined"];

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LocationCodeError {
    #[error("location code is missing")]
    Missing,
    #[error("`{0}` is a placeholder, not a location code")]
    Placeholder(String),
    #[error("`{0}` is not an integer location code")]
    NotAnInteger(String),
}

/// External-facing code of a parking location. Always a base-10 integer.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct LocationCode(i64);

impl LocationCode {
    pub fn inner(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for LocationCode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl TryFrom<&str> for LocationCode {
    type Error = LocationCodeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let value = value.trim();
        if value.is_empty() {
            return Err(LocationCodeError::Missing);
        }
        if PLACEHOLDERS
            .iter()
            .any(|placeholder| value.eq_ignore_ascii_case(placeholder))
        {
            return Err(LocationCodeError::Placeholder(value.to_string()));
        }
        i64::from_str(value)
            .map(LocationCode)
            .map_err(|_| LocationCodeError::NotAnInteger(value.to_string()))
    }
}

impl TryFrom<Option<&str>> for LocationCode {
    type Error = LocationCodeError;

    fn try_from(value: Option<&str>) -> Result<Self, Self::Error> {
        value.map_or(Err(LocationCodeError::Missing), LocationCode::try_from)
    }
}
