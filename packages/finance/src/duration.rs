use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    ops::Add,
};

use serde::{Deserialize, Serialize};

use sdk::{
    cosmwasm_std::Timestamp,
    schemars::{self, JsonSchema},
};

pub type Units = u64;

/// A more storage and compute optimal version of its counterpart in the std::time.
/// Designed to represent a timespan between cosmwasm_std::Timestamp-s.
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct Duration(Units);

impl Duration {
    const UNITS_IN_SECOND: Units = 1000 * 1000 * 1000;
    const UNITS_IN_MINUTE: Units = 60 * Self::UNITS_IN_SECOND;
    const UNITS_IN_HOUR: Units = 60 * Self::UNITS_IN_MINUTE;
    const UNITS_IN_DAY: Units = 24 * Self::UNITS_IN_HOUR;

    pub const YEAR: Duration = Duration::from_days(365);
    pub const ZERO: Duration = Duration::from_nanos(0);

    pub const fn from_nanos(nanos: Units) -> Self {
        Self(nanos)
    }

    pub const fn from_secs(secs: u32) -> Self {
        Self::from_nanos(secs as Units * Self::UNITS_IN_SECOND)
    }

    pub const fn from_minutes(minutes: u16) -> Self {
        Self::from_nanos(minutes as Units * Self::UNITS_IN_MINUTE)
    }

    pub const fn from_hours(hours: u16) -> Self {
        Self::from_nanos(hours as Units * Self::UNITS_IN_HOUR)
    }

    pub const fn from_days(days: u16) -> Self {
        Self::from_nanos(days as Units * Self::UNITS_IN_DAY)
    }

    /// The timespan from `start` to `end`, zero if `end` precedes `start`
    pub fn between(start: Timestamp, end: Timestamp) -> Self {
        Self(end.nanos().saturating_sub(start.nanos()))
    }

    pub const fn nanos(&self) -> Units {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// `start` moved forward by this timespan, `None` on overflow
    pub fn checked_after(self, start: Timestamp) -> Option<Timestamp> {
        start.nanos().checked_add(self.0).map(Timestamp::from_nanos)
    }
}

impl Add<Duration> for Timestamp {
    type Output = Timestamp;

    fn add(self, rhs: Duration) -> Self::Output {
        self.plus_nanos(rhs.nanos())
    }
}

impl Display for Duration {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}ns", self.0)
    }
}

#[cfg(test)]
mod tests {
    use sdk::cosmwasm_std::{self, Timestamp};

    use super::Duration;

    #[test]
    fn units() {
        assert_eq!(Duration::from_secs(60), Duration::from_minutes(1));
        assert_eq!(Duration::from_minutes(60), Duration::from_hours(1));
        assert_eq!(Duration::from_hours(24), Duration::from_days(1));
        assert_eq!(31_536_000_000_000_000, Duration::YEAR.nanos());
    }

    #[test]
    fn between() {
        let start = Timestamp::from_seconds(100);
        let end = Timestamp::from_seconds(160);
        assert_eq!(Duration::from_minutes(1), Duration::between(start, end));
        assert_eq!(Duration::ZERO, Duration::between(end, start));
        assert_eq!(end, start + Duration::from_secs(60));
    }

    #[test]
    fn checked_add() {
        let one = Duration::from_hours(1);
        assert_eq!(Some(Duration::from_hours(2)), one.checked_add(one));
        assert_eq!(None, Duration::from_nanos(u64::MAX).checked_add(one));
    }

    #[test]
    fn checked_after() {
        let start = Timestamp::from_seconds(100);
        assert_eq!(
            Some(Timestamp::from_seconds(160)),
            Duration::from_minutes(1).checked_after(start)
        );
        assert_eq!(None, Duration::from_nanos(u64::MAX).checked_after(start));
    }

    #[test]
    fn serde_as_nanos() {
        let d = Duration::from_secs(3);
        assert_eq!(
            br#"3000000000"#.to_vec(),
            cosmwasm_std::to_json_vec(&d).expect("serializable")
        );
        assert_eq!(
            d,
            cosmwasm_std::from_json::<Duration>(br#"3000000000"#).expect("deserializable")
        );
    }
}
