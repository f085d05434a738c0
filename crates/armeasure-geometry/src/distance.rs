use crate::pose::Pose;

/// Compute the straight-line distance between the positions of two poses.
///
/// The result is in the length unit of the poses, meters by convention.
///
/// # Example
///
/// ```
/// use armeasure_geometry::{distance, Pose};
///
/// let a = Pose::from_xyz(0.0, 0.0, 0.0);
/// let b = Pose::from_xyz(3.0, 4.0, 0.0);
/// assert_eq!(distance(&a, &b), 5.0);
/// ```
pub fn distance(a: &Pose, b: &Pose) -> f32 {
    a.translation().distance(b.translation())
}

/// Format a distance in meters as a centimeter label with one decimal place.
///
/// # Example
///
/// ```
/// use armeasure_geometry::format_distance_cm;
///
/// assert_eq!(format_distance_cm(0.0123), "1.2 cm");
/// ```
pub fn format_distance_cm(meters: f32) -> String {
    format!("{:.1} cm", meters * 100.0)
}
