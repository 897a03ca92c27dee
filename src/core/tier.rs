//! Tier: the closed set of power brackets used to partition entities.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A tier outside the closed set {1, 2, 3, 4}.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid tier `{0}` (expected 1, 2, 3 or 4)")]
pub struct InvalidTier(pub String);

/// Tier bracket, always within `Tier::MIN..=Tier::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Tier(u8);

impl Tier {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 4;

    /// Every tier in ascending order.
    pub const ALL: [Self; 4] = [Self(1), Self(2), Self(3), Self(4)];

    pub const fn get(self) -> u8 {
        self.0
    }

    /// Parse a route segment. Only the canonical digits `1`..`4` are
    /// accepted; `01`, `+1` and padded forms are not tiers.
    pub fn from_segment(segment: &str) -> Result<Self, InvalidTier> {
        match segment.as_bytes() {
            [digit @ b'1'..=b'4'] => Ok(Self(digit - b'0')),
            _ => Err(InvalidTier(segment.to_string())),
        }
    }

    /// Parse a tier out of a JSON value: an integer or a numeric string.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Number(n) => n.as_u64().and_then(|n| Self::try_from(n).ok()),
            serde_json::Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }
}

impl TryFrom<u64> for Tier {
    type Error = InvalidTier;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        if (u64::from(Self::MIN)..=u64::from(Self::MAX)).contains(&value) {
            #[allow(clippy::cast_possible_truncation)] // Checked range above
            Ok(Self(value as u8))
        } else {
            Err(InvalidTier(value.to_string()))
        }
    }
}

impl TryFrom<u8> for Tier {
    type Error = InvalidTier;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::try_from(u64::from(value))
    }
}

impl From<Tier> for u8 {
    fn from(tier: Tier) -> Self {
        tier.0
    }
}

impl FromStr for Tier {
    type Err = InvalidTier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map_err(|_| InvalidTier(s.to_string()))
            .and_then(Self::try_from)
            .map_err(|_| InvalidTier(s.to_string()))
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tier_range() {
        assert!(Tier::try_from(0u64).is_err());
        assert_eq!(Tier::try_from(1u64).unwrap().get(), 1);
        assert_eq!(Tier::try_from(4u64).unwrap().get(), 4);
        assert!(Tier::try_from(5u64).is_err());
    }

    #[test]
    fn test_tier_parse() {
        assert_eq!("2".parse::<Tier>().unwrap().get(), 2);
        assert_eq!(" 3 ".parse::<Tier>().unwrap().get(), 3);
        assert_eq!("7".parse::<Tier>(), Err(InvalidTier("7".into())));
        assert!("two".parse::<Tier>().is_err());
        assert!("-1".parse::<Tier>().is_err());
    }

    #[test]
    fn test_tier_from_segment_is_exact() {
        assert_eq!(Tier::from_segment("1"), Ok(Tier(1)));
        assert_eq!(Tier::from_segment("4"), Ok(Tier(4)));
        for segment in ["01", "+1", " 1 ", "1 ", "0", "5", "", "one", "12"] {
            assert_eq!(Tier::from_segment(segment), Err(InvalidTier(segment.into())), "{segment:?}");
        }
    }

    #[test]
    fn test_tier_from_json() {
        assert_eq!(Tier::from_json(&json!(1)), Some(Tier(1)));
        assert_eq!(Tier::from_json(&json!("4")), Some(Tier(4)));
        assert_eq!(Tier::from_json(&json!(9)), None);
        assert_eq!(Tier::from_json(&json!(1.5)), None);
        assert_eq!(Tier::from_json(&json!(null)), None);
    }

    #[test]
    fn test_tier_all_sorted() {
        let mut sorted = Tier::ALL;
        sorted.sort();
        assert_eq!(sorted, Tier::ALL);
        assert_eq!(Tier::ALL.map(Tier::get), [1, 2, 3, 4]);
    }

    #[test]
    fn test_tier_serde() {
        let tier: Tier = serde_json::from_value(json!(3)).unwrap();
        assert_eq!(tier.to_string(), "3");
        assert!(serde_json::from_value::<Tier>(json!(0)).is_err());
    }
}
