// core/src/geometry.rs
use crate::error::GeometryError;
use crate::models::PixelPoint;

/// Skulderavstand (px) under denne regnes som "Aligned".
pub const ALIGNMENT_OFFSET_PX: f64 = 100.0;

/// Vinkel (grader) mellom vektoren origin→point_a og referansevektoren (0, -origin.y).
///
/// θ = acos((a.y - o.y)·(-o.y) / (|a - o| · o.y))
///
/// Referansen har x = 0, så for o.y > 0 er dette vinkelen mot loddlinjen rett opp.
/// Cosinus klemmes til [-1, 1] slik at svaret alltid ligger i [0, 180].
pub fn angle_between(origin: PixelPoint, point_a: PixelPoint) -> Result<f64, GeometryError> {
    if origin.y == 0 {
        return Err(GeometryError::OriginOnTopEdge);
    }
    let dx = (point_a.x - origin.x) as f64;
    let dy = (point_a.y - origin.y) as f64;
    let norm = (dx * dx + dy * dy).sqrt();
    if norm == 0.0 {
        return Err(GeometryError::ZeroLength);
    }

    let oy = origin.y as f64;
    let cos_theta = (dy * -oy) / (norm * oy);
    Ok(cos_theta.clamp(-1.0, 1.0).acos().to_degrees())
}

/// Euklidsk avstand i piksler.
#[inline]
pub fn euclidean_distance(a: PixelPoint, b: PixelPoint) -> f64 {
    let dx = (b.x - a.x) as f64;
    let dy = (b.y - a.y) as f64;
    (dx * dx + dy * dy).sqrt()
}
