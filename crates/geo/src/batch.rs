//! Batch processing with optional parallelism.
//!
//! Refinement and normalization are pure, so whole documents or passages fan
//! out across threads with no coordination beyond the shared, read-only
//! refiner or normalizer.

use crate::{
    distance, CoordinateNormalizer, CoordinateToken, GeoPoint, NormalizationFailure, Notation,
    PassageRefiner, RefinedPassage,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Default radius for proximity searches, in kilometers.
pub const DEFAULT_SEARCH_RADIUS_KM: f64 = 10.0;

/// Coordinate candidates extracted from one document section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionCandidates {
    /// Section identifier, e.g. `"3.12"`
    pub section_id: String,
    /// Candidate `{name, coords}` pairs
    pub candidates: Vec<CoordinateToken>,
}

/// A normalized feature ready to be indexed as a point geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexedFeature {
    pub feature_id: String,
    pub name: String,
    pub location: GeoPoint,
    pub notation: Notation,
    pub section_id: String,
}

/// Outcome of normalizing one section.
#[derive(Debug, Clone, Serialize)]
pub struct SectionFeatures {
    pub section_id: String,
    pub features: Vec<IndexedFeature>,
    pub failures: Vec<NormalizationFailure>,
}

/// Distance from a search center to one feature.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureDistance<'a> {
    pub feature: &'a IndexedFeature,
    /// Distance in kilometers
    pub distance: f64,
}

/// Builds the index identifier of a feature within a section.
pub fn feature_id(section_id: &str, name: &str) -> String {
    format!("{section_id}_{}", name.replace(' ', "_"))
}

/// Refine many passages with the same refiner.
///
/// # Example
/// ```
/// use seaway_geo::{batch::refine_passages, GeoPoint, PassageRefiner};
///
/// let refiner = PassageRefiner::new(10.0).unwrap();
/// let passages = vec![
///     vec![GeoPoint::new(44.3367, -68.7425), GeoPoint::new(44.3333, -68.3117)],
///     vec![GeoPoint::new(44.3333, -68.3117)],
/// ];
///
/// let refined = refine_passages(&refiner, &passages);
/// assert_eq!(refined[0].len(), 5);
/// assert_eq!(refined[1].len(), 1);
/// ```
pub fn refine_passages(refiner: &PassageRefiner, passages: &[Vec<GeoPoint>]) -> Vec<RefinedPassage> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        passages.par_iter().map(|waypoints| refiner.refine(waypoints)).collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        passages.iter().map(|waypoints| refiner.refine(waypoints)).collect()
    }
}

/// Normalize the candidates of many sections leniently.
///
/// Results keep the order of `sections`. Unnamed candidates are dropped, and
/// a feature whose name and position repeat within one section is kept once.
pub fn normalize_sections(
    normalizer: &CoordinateNormalizer,
    sections: &[SectionCandidates],
) -> Vec<SectionFeatures> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        sections
            .par_iter()
            .map(|section| normalize_section(normalizer, section))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        sections
            .iter()
            .map(|section| normalize_section(normalizer, section))
            .collect()
    }
}

/// Normalize the candidates of one section leniently.
pub fn normalize_section(normalizer: &CoordinateNormalizer, section: &SectionCandidates) -> SectionFeatures {
    let named: Vec<CoordinateToken> = section
        .candidates
        .iter()
        .filter(|token| token.feature.as_deref().is_some_and(|name| !name.trim().is_empty()))
        .cloned()
        .collect();

    let batch = normalizer.normalize_lenient(&named);

    let mut seen = HashSet::new();
    let features: Vec<IndexedFeature> = batch
        .successes
        .into_iter()
        .filter_map(|named| {
            let name = named.name?;
            let point = named.coordinate.point;
            let key = (name.clone(), point.latitude.to_bits(), point.longitude.to_bits());
            if !seen.insert(key) {
                return None;
            }
            Some(IndexedFeature {
                feature_id: feature_id(&section.section_id, &name),
                name,
                location: point,
                notation: named.coordinate.notation,
                section_id: section.section_id.clone(),
            })
        })
        .collect();

    tracing::info!(
        section = %section.section_id,
        features = features.len(),
        skipped = batch.failures.len(),
        "Normalized section"
    );

    SectionFeatures {
        section_id: section.section_id.clone(),
        features,
        failures: batch.failures,
    }
}

/// Features within `radius_km` of `center`, closest first.
pub fn features_within_radius<'a>(
    center: &GeoPoint,
    features: &'a [IndexedFeature],
    radius_km: f64,
) -> Vec<FeatureDistance<'a>> {
    let mut results: Vec<FeatureDistance<'a>> = features
        .iter()
        .map(|feature| FeatureDistance {
            feature,
            distance: distance(center, &feature.location),
        })
        .filter(|result| result.distance <= radius_km)
        .collect();

    results.sort_by(|a, b| a.distance.total_cmp(&b.distance));

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(id: &str, candidates: &[(&str, &str)]) -> SectionCandidates {
        SectionCandidates {
            section_id: id.to_string(),
            candidates: candidates
                .iter()
                .map(|(name, raw)| CoordinateToken::named(*name, *raw))
                .collect(),
        }
    }

    fn create_test_sections() -> Vec<SectionCandidates> {
        vec![
            section(
                "3.12",
                &[
                    ("Egg Rock", "442110N 0680815W"),
                    ("Bass Harbor Head", "441320N 0682013W"),
                    ("Egg Rock", "442110N 0680815W"),
                    ("Garbled", "44-13N 68-20W"),
                ],
            ),
            section("3.13", &[("Mount Desert Rock", "435810N 0680740W")]),
            section("3.14", &[]),
        ]
    }

    #[test]
    fn test_feature_id() {
        assert_eq!(feature_id("3.12", "Bass Harbor Head"), "3.12_Bass_Harbor_Head");
    }

    #[test]
    fn test_normalize_sections() {
        let normalizer = CoordinateNormalizer::new(Notation::Dms);
        let results = normalize_sections(&normalizer, &create_test_sections());

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].section_id, "3.12");
        // duplicate Egg Rock kept once, Garbled dropped
        assert_eq!(results[0].features.len(), 2);
        assert_eq!(results[0].failures.len(), 1);
        assert_eq!(results[0].features[0].feature_id, "3.12_Egg_Rock");
        assert_eq!(results[1].features.len(), 1);
        assert!(results[2].features.is_empty());
    }

    #[test]
    fn test_unnamed_candidates_are_skipped() {
        let normalizer = CoordinateNormalizer::new(Notation::Dms);
        let mut input = section("1.1", &[(" ", "442110N 0680815W")]);
        input.candidates.push(CoordinateToken::new("441320N 0682013W"));

        let result = normalize_section(&normalizer, &input);
        assert!(result.features.is_empty());
        assert!(result.failures.is_empty());
    }

    #[test]
    fn test_refine_passages_preserves_order() {
        let refiner = PassageRefiner::new(5.0).unwrap();
        let a = vec![GeoPoint::new(44.0, -68.0), GeoPoint::new(44.0, -68.5)];
        let b = vec![GeoPoint::new(43.0, -70.0), GeoPoint::new(43.1, -70.0)];

        let refined = refine_passages(&refiner, &[a.clone(), b.clone()]);

        assert_eq!(refined.len(), 2);
        assert_eq!(refined[0].first(), a.first());
        assert_eq!(refined[1].last(), b.last());
        assert!(refined[0].len() > refined[1].len());
    }

    #[test]
    fn test_features_within_radius() {
        let normalizer = CoordinateNormalizer::new(Notation::Dms);
        let sections = normalize_sections(&normalizer, &create_test_sections());
        let features: Vec<IndexedFeature> = sections.into_iter().flat_map(|s| s.features).collect();

        // near Bass Harbor Head
        let center = GeoPoint::new(44.22, -68.34);
        let nearby = features_within_radius(&center, &features, DEFAULT_SEARCH_RADIUS_KM);

        assert_eq!(nearby.len(), 1);
        assert_eq!(nearby[0].feature.name, "Bass Harbor Head");

        let all = features_within_radius(&center, &features, 100.0);
        assert_eq!(all.len(), 3);
        for window in all.windows(2) {
            assert!(window[0].distance <= window[1].distance);
        }
    }
}
