//! Priority classes and stop kinds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Delivery urgency, ordered `High < Medium < Low`.
///
/// Stratification sorts stops ascending by this order, so high-priority
/// stops come first.
///
/// # Examples
///
/// ```
/// use u_delivery::models::PriorityClass;
///
/// let p: PriorityClass = " Medium ".parse().unwrap();
/// assert_eq!(p, PriorityClass::Medium);
/// assert!(PriorityClass::High < PriorityClass::Low);
/// assert!("urgent".parse::<PriorityClass>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityClass {
    /// Delivered first.
    High,
    /// Delivered after all high-priority stops.
    Medium,
    /// Delivered last.
    Low,
}

impl PriorityClass {
    /// All classes in stratification order.
    pub const ALL: [PriorityClass; 3] = [Self::High, Self::Medium, Self::Low];

    /// Lowercase label used at the input boundary.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Rank in stratification order (1 = high).
    pub fn rank(&self) -> u8 {
        match self {
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
        }
    }
}

impl fmt::Display for PriorityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PriorityClass {
    type Err = Error;

    /// Parses `high`, `medium` or `low`, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            other => Err(Error::invalid_input(format!(
                "unrecognized priority label '{other}' (expected high, medium, or low)"
            ))),
        }
    }
}

/// What a stop is: the depot, or a delivery with a priority class.
///
/// Serialized as its label: `"depot"`, `"high"`, `"medium"` or `"low"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum StopKind {
    /// Start and end of every route. Never sorted against deliveries.
    Depot,
    /// A delivery point.
    Delivery(PriorityClass),
}

impl StopKind {
    /// Label used at the boundary and by renderers.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Depot => "depot",
            Self::Delivery(p) => p.as_str(),
        }
    }

    /// Returns `true` for the depot marker.
    pub fn is_depot(&self) -> bool {
        matches!(self, Self::Depot)
    }

    /// Priority class of a delivery, `None` for the depot.
    pub fn priority(&self) -> Option<PriorityClass> {
        match self {
            Self::Depot => None,
            Self::Delivery(p) => Some(*p),
        }
    }
}

impl fmt::Display for StopKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for StopKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("depot") {
            return Ok(Self::Depot);
        }
        s.parse().map(Self::Delivery)
    }
}

impl From<StopKind> for String {
    fn from(kind: StopKind) -> Self {
        kind.label().to_string()
    }
}

impl TryFrom<String> for StopKind {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<PriorityClass> for StopKind {
    fn from(p: PriorityClass) -> Self {
        Self::Delivery(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_order() {
        assert!(PriorityClass::High < PriorityClass::Medium);
        assert!(PriorityClass::Medium < PriorityClass::Low);
        let mut v = vec![PriorityClass::Low, PriorityClass::High, PriorityClass::Medium];
        v.sort();
        assert_eq!(v, PriorityClass::ALL.to_vec());
    }

    #[test]
    fn test_priority_rank_matches_order() {
        for w in PriorityClass::ALL.windows(2) {
            assert!(w[0].rank() < w[1].rank());
        }
    }

    #[test]
    fn test_priority_parse() {
        assert_eq!("high".parse::<PriorityClass>().expect("valid"), PriorityClass::High);
        assert_eq!("  LOW\n".parse::<PriorityClass>().expect("valid"), PriorityClass::Low);
        assert_eq!("Medium".parse::<PriorityClass>().expect("valid"), PriorityClass::Medium);
    }

    #[test]
    fn test_priority_parse_rejects_unknown() {
        let err = "urgent".parse::<PriorityClass>().unwrap_err();
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("urgent"));
        assert!("".parse::<PriorityClass>().is_err());
        assert!("depot".parse::<PriorityClass>().is_err());
    }

    #[test]
    fn test_stop_kind_parse() {
        assert_eq!("depot".parse::<StopKind>().expect("valid"), StopKind::Depot);
        assert_eq!(
            "high".parse::<StopKind>().expect("valid"),
            StopKind::Delivery(PriorityClass::High)
        );
        assert!("urgent".parse::<StopKind>().is_err());
    }

    #[test]
    fn test_stop_kind_accessors() {
        assert!(StopKind::Depot.is_depot());
        assert_eq!(StopKind::Depot.priority(), None);
        let k = StopKind::from(PriorityClass::Low);
        assert!(!k.is_depot());
        assert_eq!(k.priority(), Some(PriorityClass::Low));
        assert_eq!(k.to_string(), "low");
    }
}
