//! Route summaries for the presentation layer.
//!
//! Produces the text summary printed after optimization and the drawing
//! primitives (labelled points, line segments in draw order) a plotting
//! front end needs. Nothing here renders graphics.

use std::fmt::{self, Write as _};

use serde::{Deserialize, Serialize};

use crate::models::{Point, RouteResult, StopKind};

/// A stop as a renderer sees it: position in the stratified list, location,
/// and label for colouring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    /// Index into the stratified stop list.
    pub index: usize,
    /// Location.
    pub point: Point,
    /// Depot or priority class.
    pub kind: StopKind,
}

/// One leg of the route, from one stop to the next.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Start of the leg.
    pub from: Point,
    /// End of the leg.
    pub to: Point,
    /// Leg length.
    pub length: f64,
}

/// Everything needed to draw a route.
///
/// # Examples
///
/// ```
/// use u_delivery::models::{Point, PriorityClass, Stop};
/// use u_delivery::optimizer::optimize_route;
/// use u_delivery::report::RoutePlot;
///
/// let result = optimize_route(&[
///     Stop::depot(Point::new(0.0, 0.0)),
///     Stop::delivery(Point::new(0.0, 2.0), PriorityClass::High),
/// ])
/// .unwrap();
/// let plot = RoutePlot::from_result(&result);
/// assert_eq!(plot.markers.len(), 2);
/// assert_eq!(plot.segments.len(), 2);
/// assert_eq!(plot.title, "Optimized Delivery Route");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePlot {
    /// Plot title.
    pub title: String,
    /// One marker per stop, in stratified order.
    pub markers: Vec<Marker>,
    /// Route legs in draw order.
    pub segments: Vec<Segment>,
}

impl RoutePlot {
    /// Builds the drawing primitives for a result.
    pub fn from_result(result: &RouteResult) -> Self {
        let stops = result.stops().stops();
        let markers = stops
            .iter()
            .enumerate()
            .map(|(index, s)| Marker {
                index,
                point: s.point(),
                kind: s.kind(),
            })
            .collect();
        let segments = result
            .route()
            .legs()
            .map(|(a, b)| {
                let from = stops[a].point();
                let to = stops[b].point();
                Segment {
                    from,
                    to,
                    length: from.distance_to(&to),
                }
            })
            .collect();
        Self {
            title: "Optimized Delivery Route".to_string(),
            markers,
            segments,
        }
    }
}

/// Text summary of a result:
///
/// ```text
/// Optimized Route: [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)]
/// Total Distance: 4.00 units
/// ```
pub struct Summary<'a>(pub &'a RouteResult);

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut points = String::new();
        for (i, p) in self.0.ordered_points().iter().enumerate() {
            if i > 0 {
                points.push_str(", ");
            }
            write!(points, "{p}")?;
        }
        writeln!(f, "Optimized Route: [{points}]")?;
        write!(f, "Total Distance: {:.2} units", self.0.total_distance())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PriorityClass, Stop};
    use crate::optimizer::optimize_route;

    fn scenario() -> RouteResult {
        optimize_route(&[
            Stop::depot(Point::new(0.0, 0.0)),
            Stop::delivery(Point::new(1.0, 0.0), PriorityClass::High),
            Stop::delivery(Point::new(0.0, 1.0), PriorityClass::Low),
            Stop::delivery(Point::new(1.0, 1.0), PriorityClass::Medium),
        ])
        .expect("valid")
    }

    #[test]
    fn test_summary_text() {
        let text = Summary(&scenario()).to_string();
        assert_eq!(
            text,
            "Optimized Route: [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)]\nTotal Distance: 4.00 units"
        );
    }

    #[test]
    fn test_plot_markers() {
        let plot = RoutePlot::from_result(&scenario());
        let labels: Vec<_> = plot.markers.iter().map(|m| m.kind.label()).collect();
        assert_eq!(labels, vec!["depot", "high", "medium", "low"]);
        assert_eq!(plot.markers[2].point, Point::new(1.0, 1.0));
    }

    #[test]
    fn test_plot_segments_close_loop() {
        let plot = RoutePlot::from_result(&scenario());
        assert_eq!(plot.segments.len(), 4);
        assert_eq!(plot.segments[0].from, Point::origin());
        assert_eq!(plot.segments[3].to, Point::origin());
        let total: f64 = plot.segments.iter().map(|s| s.length).sum();
        assert!((total - 4.0).abs() < 1e-10);
    }
}
