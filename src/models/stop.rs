//! Stops and the priority-stratified stop list.

use serde::{Deserialize, Serialize};

use super::{Point, PriorityClass, StopKind};
use crate::error::{Error, Result};

/// A location paired with its kind (depot or prioritized delivery).
///
/// # Examples
///
/// ```
/// use u_delivery::models::{Point, PriorityClass, Stop};
///
/// let depot = Stop::depot(Point::origin());
/// let s = Stop::parse(Point::new(1.0, 2.0), "High").unwrap();
/// assert!(depot.is_depot());
/// assert_eq!(s.priority(), Some(PriorityClass::High));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    point: Point,
    #[serde(rename = "priority")]
    kind: StopKind,
}

impl Stop {
    /// Creates a stop of the given kind.
    pub fn new(point: Point, kind: StopKind) -> Self {
        Self { point, kind }
    }

    /// Creates the depot stop.
    pub fn depot(point: Point) -> Self {
        Self::new(point, StopKind::Depot)
    }

    /// Creates a delivery stop.
    pub fn delivery(point: Point, priority: PriorityClass) -> Self {
        Self::new(point, StopKind::Delivery(priority))
    }

    /// Creates a delivery stop from a raw priority label.
    ///
    /// Fails with [`Error::InvalidInput`] on an unrecognized label.
    pub fn parse(point: Point, label: &str) -> Result<Self> {
        Ok(Self::delivery(point, label.parse()?))
    }

    /// Location of this stop.
    pub fn point(&self) -> Point {
        self.point
    }

    /// Depot marker or priority class.
    pub fn kind(&self) -> StopKind {
        self.kind
    }

    /// Priority class, `None` for the depot.
    pub fn priority(&self) -> Option<PriorityClass> {
        self.kind.priority()
    }

    /// Returns `true` if this is the depot.
    pub fn is_depot(&self) -> bool {
        self.kind.is_depot()
    }
}

/// Stops ordered for optimization.
///
/// Invariant: element 0 is the depot and no other element is; elements
/// `1..` have non-decreasing priority, keeping input order among equals.
/// Built by [`stratify`](crate::stratification::stratify), or validated
/// through [`StratifiedStopList::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "Vec<Stop>", try_from = "Vec<Stop>")]
pub struct StratifiedStopList {
    stops: Vec<Stop>,
}

impl StratifiedStopList {
    /// Validates an already-ordered stop list.
    ///
    /// Fails with [`Error::InvalidInput`] if the list is empty, does not
    /// start with the depot, contains a second depot, or is not sorted by
    /// priority.
    pub fn new(stops: Vec<Stop>) -> Result<Self> {
        let first = stops
            .first()
            .ok_or_else(|| Error::invalid_input("stop list is empty"))?;
        if !first.is_depot() {
            return Err(Error::invalid_input("first stop must be the depot"));
        }
        let mut prev = PriorityClass::High;
        for (i, stop) in stops.iter().enumerate().skip(1) {
            let p = stop
                .priority()
                .ok_or_else(|| Error::invalid_input(format!("unexpected depot at position {i}")))?;
            if p < prev {
                return Err(Error::invalid_input(format!(
                    "stop {i} ({p}) is out of priority order"
                )));
            }
            prev = p;
        }
        Ok(Self { stops })
    }

    /// Wraps stops whose order the caller has already established.
    pub(crate) fn from_ordered(stops: Vec<Stop>) -> Self {
        debug_assert!(stops.first().is_some_and(Stop::is_depot));
        Self { stops }
    }

    /// All stops, depot first.
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// The depot stop.
    pub fn depot(&self) -> &Stop {
        &self.stops[0]
    }

    /// Stop at position `index`.
    pub fn get(&self, index: usize) -> Option<&Stop> {
        self.stops.get(index)
    }

    /// Number of stops including the depot.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Always `false`: a valid list holds at least the depot.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Coordinates in list order.
    pub fn points(&self) -> Vec<Point> {
        self.stops.iter().map(Stop::point).collect()
    }

    /// Labels in list order (`depot`, `high`, `medium`, `low`).
    pub fn labels(&self) -> Vec<&'static str> {
        self.stops.iter().map(|s| s.kind().label()).collect()
    }
}

impl From<StratifiedStopList> for Vec<Stop> {
    fn from(list: StratifiedStopList) -> Self {
        list.stops
    }
}

impl TryFrom<Vec<Stop>> for StratifiedStopList {
    type Error = Error;

    fn try_from(stops: Vec<Stop>) -> Result<Self> {
        Self::new(stops)
    }
}
