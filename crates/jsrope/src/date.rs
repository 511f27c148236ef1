//! `Date` values.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::code::{Code, Render};
use crate::literal::impl_node_literal;
use crate::value::{Int, Object};

/// A JavaScript `Date`, optionally pinned to a moment in epoch milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Date {
    millis: Option<i64>,
}

impl Date {
    /// The current time when evaluated.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_millis(millis: i64) -> Self {
        Self {
            millis: Some(millis),
        }
    }

    /// Pin to a host timestamp. Times before the epoch are negative.
    pub fn from_system_time(time: SystemTime) -> Self {
        let millis = match time.duration_since(UNIX_EPOCH) {
            Ok(after) => i64::try_from(after.as_millis()).unwrap_or(i64::MAX),
            Err(before) => i64::try_from(before.duration().as_millis())
                .map(|ms| -ms)
                .unwrap_or(i64::MIN),
        };
        Self::from_millis(millis)
    }

    pub fn millis(&self) -> Option<i64> {
        self.millis
    }

    /// `Date.now()`
    pub fn now() -> Int {
        Int::explicit("Date.now()")
    }

    /// `new Date(<ms>)`, or `new Date()` when unpinned.
    pub fn construct(&self) -> Object {
        match self.millis {
            Some(ms) => Object::explicit(format!("new Date({})", ms)),
            None => Object::explicit("new Date()"),
        }
    }
}

impl From<SystemTime> for Date {
    fn from(time: SystemTime) -> Self {
        Self::from_system_time(time)
    }
}

impl Render for Date {
    fn to_code(&self) -> Code {
        match self.millis {
            Some(ms) => Code::new(format!("Date({})", ms)),
            None => Code::new("Date()"),
        }
    }
}

impl_node_literal!(Date);

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_render() {
        assert_eq!(Date::new().to_code().as_str(), "Date()");
        assert_eq!(
            Date::from_millis(1_500_000_000_000).to_code().as_str(),
            "Date(1500000000000)"
        );
        assert_eq!(Date::from_millis(0).to_code().as_str(), "Date(0)");
    }

    #[test]
    fn test_construct() {
        assert_eq!(Date::new().construct().to_code().as_str(), "new Date()");
        assert_eq!(
            Date::from_millis(42).construct().to_code().as_str(),
            "new Date(42)"
        );
        assert_eq!(Date::now().to_code().as_str(), "Date.now()");
    }

    #[test]
    fn test_from_system_time() {
        let after = UNIX_EPOCH + Duration::from_millis(1234);
        assert_eq!(Date::from(after).millis(), Some(1234));
        let before = UNIX_EPOCH - Duration::from_millis(10);
        assert_eq!(Date::from_system_time(before).millis(), Some(-10));
    }
}
