//! Stable partition of stops by priority class.

use crate::error::{Error, Result};
use crate::models::{Point, PriorityClass, Stop, StratifiedStopList};

/// Orders stops for optimization.
///
/// `stops[0]` must be the depot. The remaining stops are stably sorted by
/// priority class (`high`, `medium`, `low`), so stops of equal class keep
/// their input order, and the depot is reinserted at position 0.
///
/// Fails with [`Error::InvalidInput`] if `stops` is empty, the first stop
/// is not the depot, a later stop is a depot, or a coordinate is not
/// finite.
///
/// # Examples
///
/// ```
/// use u_delivery::models::{Point, PriorityClass, Stop};
/// use u_delivery::stratification::stratify;
///
/// let stops = vec![
///     Stop::depot(Point::new(0.0, 0.0)),
///     Stop::delivery(Point::new(1.0, 0.0), PriorityClass::High),
///     Stop::delivery(Point::new(0.0, 1.0), PriorityClass::Low),
///     Stop::delivery(Point::new(1.0, 1.0), PriorityClass::Medium),
/// ];
/// let list = stratify(&stops).unwrap();
/// assert_eq!(list.labels(), vec!["depot", "high", "medium", "low"]);
/// ```
pub fn stratify(stops: &[Stop]) -> Result<StratifiedStopList> {
    let (depot, deliveries) = stops
        .split_first()
        .ok_or_else(|| Error::invalid_input("stop list is empty"))?;
    if !depot.is_depot() {
        return Err(Error::invalid_input("first stop must be the depot"));
    }

    let mut keyed = Vec::with_capacity(deliveries.len());
    for (i, stop) in deliveries.iter().enumerate() {
        let priority = stop.priority().ok_or_else(|| {
            Error::invalid_input(format!("unexpected depot at position {}", i + 1))
        })?;
        keyed.push((priority, *stop));
    }
    for (i, stop) in stops.iter().enumerate() {
        if !stop.point().is_finite() {
            return Err(Error::invalid_input(format!(
                "stop {i} has non-finite coordinates {}",
                stop.point()
            )));
        }
    }

    // sort_by_key is stable
    keyed.sort_by_key(|&(priority, _)| priority);

    let mut ordered = Vec::with_capacity(stops.len());
    ordered.push(*depot);
    ordered.extend(keyed.into_iter().map(|(_, stop)| stop));

    log::debug!(
        "stratified {} deliveries: {:?}",
        deliveries.len(),
        class_counts(&ordered)
    );

    Ok(StratifiedStopList::from_ordered(ordered))
}

/// Parses raw `(point, label)` pairs and stratifies them.
///
/// Entry 0 is the depot and its label is ignored. Every other entry must
/// carry `high`, `medium` or `low` (case-insensitive); anything else fails
/// with [`Error::InvalidInput`].
///
/// # Examples
///
/// ```
/// use u_delivery::models::Point;
/// use u_delivery::stratification::stratify_labeled;
///
/// let raw = [
///     (Point::new(0.0, 0.0), "depot"),
///     (Point::new(1.0, 0.0), "low"),
///     (Point::new(2.0, 0.0), "high"),
/// ];
/// let list = stratify_labeled(&raw).unwrap();
/// assert_eq!(list.points()[1], Point::new(2.0, 0.0));
///
/// assert!(stratify_labeled(&[(Point::new(0.0, 0.0), "depot"), (Point::new(1.0, 1.0), "urgent")]).is_err());
/// ```
pub fn stratify_labeled<S: AsRef<str>>(raw: &[(Point, S)]) -> Result<StratifiedStopList> {
    let (&(depot, _), deliveries) = raw
        .split_first()
        .ok_or_else(|| Error::invalid_input("stop list is empty"))?;
    let mut stops = Vec::with_capacity(raw.len());
    stops.push(Stop::depot(depot));
    for (point, label) in deliveries {
        stops.push(Stop::parse(*point, label.as_ref())?);
    }
    stratify(&stops)
}

/// Number of delivery stops per class, in stratification order.
pub fn class_counts(stops: &[Stop]) -> [(PriorityClass, usize); 3] {
    PriorityClass::ALL.map(|class| {
        let count = stops
            .iter()
            .filter(|s| s.priority() == Some(class))
            .count();
        (class, count)
    })
}
