use cosmos_core::*;
use glam::DVec3;

use crate::cosmos::Cosmos;

/// Find a point for a ball of `radius` that lies wholly inside `region` and
/// clear of the bounding sphere of every shape in `occupied`.
///
/// Candidates are drawn from `focus` when given, otherwise from `region`.
/// Gives up after `config.placement_attempts` candidates.
pub fn search_open_space(
    region: &Shape,
    focus: Option<&Shape>,
    occupied: &[Shape],
    radius: f64,
    config: &GenerationConfig,
    rng: &mut RandomSource,
) -> Result<DVec3> {
    if !(radius.is_finite() && radius >= 0.0) {
        return Err(CosmosError::construction(format!(
            "cannot place a body of radius {radius}"
        )));
    }

    let exhausted = CosmosError::PlacementExhausted {
        radius,
        attempts: config.placement_attempts,
    };
    // Nothing this large fits, no point sampling
    if radius >= region.bounding_radius() {
        return Err(exhausted);
    }

    let sampler = focus.unwrap_or(region);
    for _ in 0..config.placement_attempts {
        let Some(candidate) = sampler.sample_point(rng, config.sample_attempts) else {
            continue;
        };
        if !region.contains_sphere(candidate, radius) {
            continue;
        }
        if occupied
            .iter()
            .any(|shape| shape.bounds_overlap_sphere(candidate, radius))
        {
            continue;
        }
        return Ok(candidate);
    }
    Err(exhausted)
}

impl Cosmos {
    /// Open space for a body of `radius` anywhere inside `parent`.
    ///
    /// The parent's dominant child is generated first so the search steers
    /// clear of it.
    pub fn find_open_space(
        &mut self,
        parent: LocationId,
        radius: f64,
        rng: &mut RandomSource,
    ) -> Result<DVec3> {
        self.search_in(parent, None, radius, rng)
    }

    /// Open space inside `parent` with its center in `focus` (parent frame)
    pub fn find_open_space_within(
        &mut self,
        parent: LocationId,
        focus: &Shape,
        radius: f64,
        rng: &mut RandomSource,
    ) -> Result<DVec3> {
        self.search_in(parent, Some(focus), radius, rng)
    }

    fn search_in(
        &mut self,
        parent: LocationId,
        focus: Option<&Shape>,
        radius: f64,
        rng: &mut RandomSource,
    ) -> Result<DVec3> {
        self.dominant_child(parent)?;

        let node = self.location(parent)?;
        let region = node.shape().with_center(DVec3::ZERO);
        let mut occupied = Vec::with_capacity(node.children().len());
        for child in node.children() {
            occupied.push(self.location(*child)?.occupied_shape());
        }
        search_open_space(&region, focus, &occupied, radius, &self.config, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_space_in_empty_region() {
        let region = Shape::sphere(DVec3::ZERO, 100.0).unwrap();
        let config = GenerationConfig::default();
        let mut rng = RandomSource::new(1);
        let point = search_open_space(&region, None, &[], 10.0, &config, &mut rng).unwrap();
        assert!(region.contains_sphere(point, 10.0));
    }

    #[test]
    fn test_avoids_occupied_space() {
        let region = Shape::sphere(DVec3::ZERO, 100.0).unwrap();
        let blocker = Shape::sphere(DVec3::new(20.0, 0.0, 0.0), 50.0).unwrap();
        let config = GenerationConfig::default();
        let mut rng = RandomSource::new(2);
        for _ in 0..50 {
            let point =
                search_open_space(&region, None, &[blocker], 5.0, &config, &mut rng).unwrap();
            assert!(point.distance(blocker.center()) >= 55.0);
            assert!(point.length() + 5.0 <= 100.0);
        }
    }

    #[test]
    fn test_shell_blocks_its_hollow() {
        let region = Shape::sphere(DVec3::ZERO, 100.0).unwrap();
        let shell = Shape::hollow_sphere(DVec3::ZERO, 50.0, 100.0).unwrap();
        let config = GenerationConfig {
            placement_attempts: 50,
            ..GenerationConfig::default()
        };
        let mut rng = RandomSource::new(3);
        let err = search_open_space(&region, None, &[shell], 5.0, &config, &mut rng).unwrap_err();
        assert!(matches!(err, CosmosError::PlacementExhausted { .. }));
    }

    #[test]
    fn test_flat_sibling_blocks_its_bounding_sphere() {
        let region = Shape::sphere(DVec3::ZERO, 1000.0).unwrap();
        let disc = Shape::ellipsoid(DVec3::ZERO, DVec3::new(200.0, 10.0, 10.0)).unwrap();
        let config = GenerationConfig::default();
        let mut rng = RandomSource::new(7);
        for _ in 0..50 {
            let point =
                search_open_space(&region, None, &[disc], 5.0, &config, &mut rng).unwrap();
            assert!(point.length() >= 205.0);
        }
    }

    #[test]
    fn test_saturated_region_is_exhausted() {
        let region = Shape::sphere(DVec3::ZERO, 100.0).unwrap();
        let filler = Shape::sphere(DVec3::ZERO, 100.0).unwrap();
        let config = GenerationConfig {
            placement_attempts: 20,
            ..GenerationConfig::default()
        };
        let mut rng = RandomSource::new(4);
        let err = search_open_space(&region, None, &[filler], 1.0, &config, &mut rng).unwrap_err();
        assert_eq!(
            err,
            CosmosError::PlacementExhausted {
                radius: 1.0,
                attempts: 20
            }
        );

        let err = search_open_space(&region, None, &[], 150.0, &config, &mut rng).unwrap_err();
        assert!(matches!(err, CosmosError::PlacementExhausted { .. }));
    }

    #[test]
    fn test_focus_limits_candidates() {
        let region = Shape::sphere(DVec3::ZERO, 1000.0).unwrap();
        let focus = Shape::sphere(DVec3::new(500.0, 0.0, 0.0), 50.0).unwrap();
        let config = GenerationConfig::default();
        let mut rng = RandomSource::new(5);
        for _ in 0..20 {
            let point =
                search_open_space(&region, Some(&focus), &[], 1.0, &config, &mut rng).unwrap();
            assert!(focus.contains_point(point));
        }
    }

    #[test]
    fn test_bad_radius_is_rejected() {
        let region = Shape::sphere(DVec3::ZERO, 1.0).unwrap();
        let config = GenerationConfig::default();
        let mut rng = RandomSource::new(6);
        let err = search_open_space(&region, None, &[], f64::NAN, &config, &mut rng).unwrap_err();
        assert!(matches!(err, CosmosError::Construction(_)));
    }
}
