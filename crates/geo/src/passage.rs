//! Passage refinement.
//!
//! Densifies a sparse list of waypoints into a track whose consecutive
//! points are no more than a target spacing apart, keeping every original
//! waypoint in its original order.
//!
//! With [`BearingMode::Fixed`] the initial bearing of a segment is computed
//! once and every interpolated point is projected from the segment start
//! along it. This is an approximation: on long segments floating-point error
//! in that single bearing accumulates into cross-track drift away from the
//! true great circle. [`BearingMode::Tracking`] re-aims at the segment end
//! after every step instead.
//!
//! Duplicate suppression compares interpolated points by great-circle
//! distance against [`DEDUP_TOLERANCE_KM`] rather than by exact float
//! equality. Waypoints themselves are never suppressed: an interpolated point
//! that lands within the tolerance of a waypoint gives way to it, and only
//! bit-for-bit identical consecutive waypoints collapse into one.

use crate::{destination, distance, initial_bearing, GeoError, GeoPoint, Result};
use serde::{Deserialize, Serialize, Serializer};

/// Two points closer than this (in kilometers) are treated as the same point
/// when suppressing duplicates.
pub const DEDUP_TOLERANCE_KM: f64 = 1e-9;

/// How the direction of travel is chosen while stepping along a segment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BearingMode {
    /// Compute the initial bearing once per segment and step every point from
    /// the segment start along it.
    #[default]
    Fixed,
    /// Recompute the bearing at every step, from the last interpolated point
    /// towards the segment end.
    Tracking,
}

impl std::str::FromStr for BearingMode {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixed" => Ok(BearingMode::Fixed),
            "tracking" => Ok(BearingMode::Tracking),
            other => Err(GeoError::InvalidArgument(format!(
                "unknown bearing mode '{other}', expected 'fixed' or 'tracking'"
            ))),
        }
    }
}

/// A densified passage.
///
/// The first and last points are the first and last waypoints of the source
/// passage, and every source waypoint appears in its original relative order.
/// Serializes as a flat array of `[lat, lon]` pairs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RefinedPassage(Vec<GeoPoint>);

impl RefinedPassage {
    pub fn points(&self) -> &[GeoPoint] {
        &self.0
    }

    pub fn into_points(self) -> Vec<GeoPoint> {
        self.0
    }

    pub fn first(&self) -> Option<&GeoPoint> {
        self.0.first()
    }

    pub fn last(&self) -> Option<&GeoPoint> {
        self.0.last()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the passage as `[lat, lon]` pairs, ready for map rendering.
    pub fn to_pairs(&self) -> Vec<[f64; 2]> {
        self.0.iter().map(|&p| p.into()).collect()
    }

    /// Sum of great-circle distances between consecutive points.
    pub fn length_km(&self) -> f64 {
        self.0.windows(2).map(|w| distance(&w[0], &w[1])).sum()
    }
}

impl Serialize for RefinedPassage {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter().map(|&p| <[f64; 2]>::from(p)))
    }
}

impl<'a> IntoIterator for &'a RefinedPassage {
    type Item = &'a GeoPoint;
    type IntoIter = std::slice::Iter<'a, GeoPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Densifies waypoint lists at a fixed target spacing.
///
/// # Example
/// ```
/// use seaway_geo::{BearingMode, GeoPoint, PassageRefiner};
///
/// let refiner = PassageRefiner::new(10.0)?.with_bearing_mode(BearingMode::Tracking);
/// let refined = refiner.refine(&[GeoPoint::new(44.3367, -68.7425), GeoPoint::new(44.3333, -68.3117)]);
/// assert_eq!(refined.len(), 5);
/// # Ok::<(), seaway_geo::GeoError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassageRefiner {
    spacing_km: f64,
    bearing_mode: BearingMode,
    dedup_tolerance_km: f64,
}

impl PassageRefiner {
    /// Creates a refiner with the given target spacing in kilometers.
    ///
    /// Fails with [`GeoError::InvalidArgument`] unless the spacing is a
    /// finite number strictly above [`DEDUP_TOLERANCE_KM`].
    pub fn new(spacing_km: f64) -> Result<Self> {
        if !(spacing_km.is_finite() && spacing_km > 0.0) {
            return Err(GeoError::InvalidArgument(format!(
                "interpolation spacing must be a positive number of kilometers, got {spacing_km}"
            )));
        }
        if spacing_km <= DEDUP_TOLERANCE_KM {
            return Err(GeoError::InvalidArgument(format!(
                "interpolation spacing must be above the {DEDUP_TOLERANCE_KM} km duplicate tolerance, got {spacing_km}"
            )));
        }

        Ok(Self {
            spacing_km,
            bearing_mode: BearingMode::default(),
            dedup_tolerance_km: DEDUP_TOLERANCE_KM,
        })
    }

    pub fn with_bearing_mode(mut self, mode: BearingMode) -> Self {
        self.bearing_mode = mode;
        self
    }

    /// Overrides the duplicate-suppression tolerance.
    ///
    /// The tolerance must be finite, non-negative and strictly below the
    /// spacing, otherwise [`GeoError::InvalidArgument`] is returned. Zero keeps
    /// only bit-for-bit duplicates out.
    pub fn with_dedup_tolerance(mut self, tolerance_km: f64) -> Result<Self> {
        if !(tolerance_km.is_finite() && tolerance_km >= 0.0) {
            return Err(GeoError::InvalidArgument(format!(
                "duplicate tolerance must be a non-negative number of kilometers, got {tolerance_km}"
            )));
        }
        if tolerance_km >= self.spacing_km {
            return Err(GeoError::InvalidArgument(format!(
                "duplicate tolerance {tolerance_km} km must be below the {} km spacing",
                self.spacing_km
            )));
        }

        self.dedup_tolerance_km = tolerance_km;
        Ok(self)
    }

    pub fn spacing_km(&self) -> f64 {
        self.spacing_km
    }

    pub fn bearing_mode(&self) -> BearingMode {
        self.bearing_mode
    }

    pub fn dedup_tolerance_km(&self) -> f64 {
        self.dedup_tolerance_km
    }

    /// Refines a passage.
    ///
    /// Passages with fewer than two waypoints are returned unchanged.
    pub fn refine(&self, waypoints: &[GeoPoint]) -> RefinedPassage {
        if waypoints.len() < 2 {
            return RefinedPassage(waypoints.to_vec());
        }

        let mut refined = Vec::with_capacity(waypoints.len());
        refined.push(waypoints[0]);
        // Length of `refined` right after the latest waypoint was placed.
        let mut anchored = refined.len();

        for segment in waypoints.windows(2) {
            let (start, end) = (&segment[0], &segment[1]);
            let length = distance(start, end);

            if length > self.spacing_km {
                match self.bearing_mode {
                    BearingMode::Fixed => self.step_fixed(start, end, length, &mut refined),
                    BearingMode::Tracking => self.step_tracking(start, end, length, &mut refined),
                }
            }

            self.push_waypoint(&mut refined, anchored, *end);
            anchored = refined.len();
        }

        tracing::debug!(
            waypoints = waypoints.len(),
            points = refined.len(),
            spacing_km = self.spacing_km,
            mode = ?self.bearing_mode,
            "Refined passage"
        );

        RefinedPassage(refined)
    }

    // Every point is projected from the segment start along one initial bearing.
    fn step_fixed(&self, start: &GeoPoint, end: &GeoPoint, length: f64, out: &mut Vec<GeoPoint>) {
        let bearing = initial_bearing(start, end);
        for j in 1..=step_count(length, self.spacing_km) {
            let point = destination(start, bearing, j as f64 * self.spacing_km);
            self.push_point(out, point);
        }
    }

    fn step_tracking(&self, start: &GeoPoint, end: &GeoPoint, length: f64, out: &mut Vec<GeoPoint>) {
        let mut current = *start;
        for _ in 0..step_count(length, self.spacing_km) {
            let bearing = initial_bearing(&current, end);
            current = destination(&current, bearing, self.spacing_km);
            self.push_point(out, current);
        }
    }

    fn push_point(&self, out: &mut Vec<GeoPoint>, point: GeoPoint) {
        if out.last().is_some_and(|last| self.coincident(last, &point)) {
            return;
        }
        out.push(point);
    }

    // Waypoints always land in the output. Everything past `anchored` is
    // interpolated, and a trailing interpolated point that crowds the waypoint
    // is replaced by it as long as the gap behind stays within the spacing.
    fn push_waypoint(&self, out: &mut Vec<GeoPoint>, anchored: usize, waypoint: GeoPoint) {
        let replaceable = out.len() > anchored
            && out.len() >= 2
            && distance(&out[out.len() - 2], &waypoint) <= self.spacing_km + DEDUP_TOLERANCE_KM;

        if let Some(last) = out.last_mut() {
            if *last == waypoint {
                return;
            }
            if replaceable && self.coincident(last, &waypoint) {
                *last = waypoint;
                return;
            }
        }
        out.push(waypoint);
    }

    fn coincident(&self, a: &GeoPoint, b: &GeoPoint) -> bool {
        a == b || distance(a, b) < self.dedup_tolerance_km
    }
}

#[inline]
fn step_count(length: f64, spacing: f64) -> usize {
    (length / spacing).floor() as usize
}

/// Refines a passage with the default fixed-bearing strategy.
///
/// # Example
/// ```
/// use seaway_geo::{refine_passage, GeoPoint};
///
/// let passage = [GeoPoint::new(44.3367, -68.7425), GeoPoint::new(44.3333, -68.3117)];
/// let refined = refine_passage(&passage, 10.0).unwrap();
/// assert_eq!(refined.len(), 5);
///
/// assert!(refine_passage(&passage, 0.0).is_err());
/// ```
pub fn refine_passage(waypoints: &[GeoPoint], spacing_km: f64) -> Result<RefinedPassage> {
    Ok(PassageRefiner::new(spacing_km)?.refine(waypoints))
}

/// Refines a passage of planar `(x, y)` coordinates.
///
/// Suitable for abstract grids or projected coordinates where straight-line
/// distance applies. Same contract as [`refine_passage`], with exact equality
/// for duplicate suppression.
pub fn refine_cartesian(waypoints: &[(f64, f64)], spacing: f64) -> Result<Vec<(f64, f64)>> {
    if !(spacing.is_finite() && spacing > 0.0) {
        return Err(GeoError::InvalidArgument(format!(
            "interpolation spacing must be a positive number, got {spacing}"
        )));
    }

    if waypoints.len() < 2 {
        return Ok(waypoints.to_vec());
    }

    let mut refined = vec![waypoints[0]];
    let push = |out: &mut Vec<(f64, f64)>, point: (f64, f64)| {
        if out.last() != Some(&point) {
            out.push(point);
        }
    };

    for segment in waypoints.windows(2) {
        let (start, end) = (segment[0], segment[1]);
        let (dx, dy) = (end.0 - start.0, end.1 - start.1);
        let length = dx.hypot(dy);

        if length > spacing {
            let (unit_x, unit_y) = (dx / length, dy / length);
            for j in 1..=step_count(length, spacing) {
                let step = j as f64 * spacing;
                let point = (start.0 + step * unit_x, start.1 + step * unit_y);
                if point != end {
                    push(&mut refined, point);
                }
            }
        }

        push(&mut refined, end);
    }

    Ok(refined)
}
