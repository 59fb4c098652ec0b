//! Closed tours and optimization results.

use serde::{Deserialize, Serialize};

use super::{Point, StratifiedStopList};
use crate::error::{Error, Result};

/// A closed tour as indices into a [`StratifiedStopList`].
///
/// Starts and ends at index 0 (the depot) and visits every other index
/// exactly once.
///
/// # Examples
///
/// ```
/// use u_delivery::models::Route;
///
/// let route = Route::from_order(&[2, 1, 3]);
/// assert_eq!(route.indices(), &[0, 2, 1, 3, 0]);
/// assert_eq!(route.num_deliveries(), 3);
/// assert!(route.is_valid_for(4));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "Vec<usize>", try_from = "Vec<usize>")]
pub struct Route {
    indices: Vec<usize>,
}

impl Route {
    /// Builds the closed tour `[0, order..., 0]`.
    pub fn from_order(order: &[usize]) -> Self {
        let mut indices = Vec::with_capacity(order.len() + 2);
        indices.push(0);
        indices.extend_from_slice(order);
        indices.push(0);
        Self { indices }
    }

    /// The route for a depot-only list: `[0, 0]`.
    pub fn depot_only() -> Self {
        Self::from_order(&[])
    }

    /// Full index sequence including both depot visits.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Delivery indices in visit order (depot excluded).
    pub fn deliveries(&self) -> &[usize] {
        &self.indices[1..self.indices.len() - 1]
    }

    /// Number of deliveries visited.
    pub fn num_deliveries(&self) -> usize {
        self.indices.len() - 2
    }

    /// Consecutive index pairs, including the closing edge to the depot.
    pub fn legs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.indices.windows(2).map(|w| (w[0], w[1]))
    }

    /// Returns `true` if this is a Hamiltonian cycle through the depot
    /// over `n` stops.
    pub fn is_valid_for(&self, n: usize) -> bool {
        if n == 0 || self.indices.len() != n + 1 {
            return false;
        }
        if self.indices[0] != 0 || self.indices[n] != 0 {
            return false;
        }
        let mut seen = vec![false; n];
        for &i in self.deliveries() {
            if i == 0 || i >= n || seen[i] {
                return false;
            }
            seen[i] = true;
        }
        true
    }

    /// Sum of leg lengths over the given coordinates, accumulated in
    /// visit order.
    pub fn length(&self, points: &[Point]) -> f64 {
        self.legs()
            .map(|(a, b)| points[a].distance_to(&points[b]))
            .fold(0.0, |acc, d| acc + d)
    }
}

impl From<Route> for Vec<usize> {
    fn from(route: Route) -> Self {
        route.indices
    }
}

impl TryFrom<Vec<usize>> for Route {
    type Error = Error;

    /// Accepts any index sequence that leaves from and returns to the depot.
    fn try_from(indices: Vec<usize>) -> Result<Self> {
        match (indices.first(), indices.last()) {
            (Some(0), Some(0)) if indices.len() >= 2 => Ok(Self { indices }),
            _ => Err(Error::invalid_input(format!(
                "route {indices:?} must start and end at the depot"
            ))),
        }
    }
}

/// The optimal route, its length, and the stop list it indexes.
///
/// This is what the presentation layer receives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRouteResult")]
pub struct RouteResult {
    route: Route,
    total_distance: f64,
    stops: StratifiedStopList,
}

impl RouteResult {
    /// Pairs a route with its length and stop list.
    pub fn new(route: Route, total_distance: f64, stops: StratifiedStopList) -> Self {
        Self {
            route,
            total_distance,
            stops,
        }
    }

    /// The closed tour.
    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Total tour length.
    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    /// The stratified stops the route indexes into.
    pub fn stops(&self) -> &StratifiedStopList {
        &self.stops
    }

    /// Coordinates in visit order, depot at both ends.
    pub fn ordered_points(&self) -> Vec<Point> {
        self.route
            .indices()
            .iter()
            .map(|&i| self.stops.stops()[i].point())
            .collect()
    }
}

#[derive(Deserialize)]
struct RawRouteResult {
    route: Route,
    total_distance: f64,
    stops: StratifiedStopList,
}

impl TryFrom<RawRouteResult> for RouteResult {
    type Error = Error;

    fn try_from(raw: RawRouteResult) -> Result<Self> {
        if !raw.route.is_valid_for(raw.stops.len()) {
            return Err(Error::invalid_input(format!(
                "route {:?} is not a tour over {} stops",
                raw.route.indices(),
                raw.stops.len()
            )));
        }
        Ok(Self::new(raw.route, raw.total_distance, raw.stops))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PriorityClass, Stop};

    #[test]
    fn test_route_depot_only() {
        let r = Route::depot_only();
        assert_eq!(r.indices(), &[0, 0]);
        assert_eq!(r.num_deliveries(), 0);
        assert!(r.deliveries().is_empty());
        assert!(r.is_valid_for(1));
        assert_eq!(r.length(&[Point::new(3.0, 3.0)]), 0.0);
    }

    #[test]
    fn test_route_legs() {
        let r = Route::from_order(&[1, 2]);
        let legs: Vec<_> = r.legs().collect();
        assert_eq!(legs, vec![(0, 1), (1, 2), (2, 0)]);
    }

    #[test]
    fn test_route_validity() {
        assert!(Route::from_order(&[3, 1, 2]).is_valid_for(4));
        assert!(!Route::from_order(&[1, 1, 2]).is_valid_for(4));
        assert!(!Route::from_order(&[1, 2]).is_valid_for(4));
        assert!(!Route::from_order(&[1, 2, 4]).is_valid_for(4));
        assert!(!Route::from_order(&[0, 1, 2]).is_valid_for(4));
        assert!(!Route::depot_only().is_valid_for(0));
    }

    #[test]
    fn test_route_length() {
        let pts = [Point::new(0.0, 0.0), Point::new(3.0, 0.0), Point::new(3.0, 4.0)];
        let r = Route::from_order(&[1, 2]);
        assert!((r.length(&pts) - 12.0).abs() < 1e-10);
    }

    #[test]
    fn test_result_ordered_points() {
        let stops = StratifiedStopList::new(vec![
            Stop::depot(Point::origin()),
            Stop::delivery(Point::new(1.0, 0.0), PriorityClass::High),
            Stop::delivery(Point::new(0.0, 1.0), PriorityClass::Low),
        ])
        .expect("valid");
        let result = RouteResult::new(Route::from_order(&[2, 1]), 3.0, stops);
        assert_eq!(
            result.ordered_points(),
            vec![
                Point::origin(),
                Point::new(0.0, 1.0),
                Point::new(1.0, 0.0),
                Point::origin()
            ]
        );
        assert_eq!(result.total_distance(), 3.0);
        assert_eq!(result.route().num_deliveries(), 2);
    }

    #[test]
    fn test_route_json_is_index_array() {
        let json = serde_json::to_string(&Route::from_order(&[2, 1])).expect("serialize");
        assert_eq!(json, "[0,2,1,0]");
    }

    #[test]
    fn test_route_json_rejects_open_tours() {
        for bad in ["[]", "[0]", "[5]", "[0,1]", "[1,0]"] {
            let r: std::result::Result<Route, _> = serde_json::from_str(bad);
            assert!(r.is_err(), "{bad} should be rejected");
        }
        let r: Route = serde_json::from_str("[0,2,1,0]").expect("closed tour");
        assert_eq!(r.deliveries(), &[2, 1]);
        assert_eq!(r.num_deliveries(), 2);
    }

    #[test]
    fn test_result_json_checks_route_against_stops() {
        let stops = StratifiedStopList::new(vec![
            Stop::depot(Point::origin()),
            Stop::delivery(Point::new(1.0, 0.0), PriorityClass::High),
        ])
        .expect("valid");
        let good = RouteResult::new(Route::from_order(&[1]), 2.0, stops.clone());
        let json = serde_json::to_string(&good).expect("serialize");
        let back: RouteResult = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, good);

        let stops_json = serde_json::to_string(&stops).expect("serialize");
        let bad = format!(r#"{{"route":[0,5,0],"total_distance":2.0,"stops":{stops_json}}}"#);
        let r: std::result::Result<RouteResult, _> = serde_json::from_str(&bad);
        assert!(r.is_err());
    }
}
