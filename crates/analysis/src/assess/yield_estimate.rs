//! Expected-yield estimate from mean vigor and moisture readings.

use serde::Serialize;

/// Reference yield of a healthy field, tons per hectare.
const BASE_YIELD_T_PER_HA: f64 = 5.0;

/// Yield factors and the resulting estimate.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct YieldEstimate {
    pub biomass_factor: f64,
    pub chlorophyll_factor: f64,
    pub water_factor: f64,
    pub expected_yield_tons_per_ha: f64,
}

/// Estimate expected yield from region-mean EVI, NDRE and NDMI.
///
/// Biomass scales EVI by 1.5 clamped to [0.2, 1], chlorophyll scales
/// NDRE by 3 clamped to [0.3, 1], and moisture maps NDMI above 0.1 to
/// full yield, above -0.1 to 0.8, and 0.6 below that. The estimate is
/// the 5 t/ha reference scaled by all three.
pub fn estimate_yield(evi: f64, ndre: f64, ndmi: f64) -> YieldEstimate {
    let biomass_factor = (evi * 1.5).clamp(0.2, 1.0);
    let chlorophyll_factor = (ndre * 3.0).clamp(0.3, 1.0);
    let water_factor = if ndmi > 0.1 {
        1.0
    } else if ndmi > -0.1 {
        0.8
    } else {
        0.6
    };
    YieldEstimate {
        biomass_factor,
        chlorophyll_factor,
        water_factor,
        expected_yield_tons_per_ha: BASE_YIELD_T_PER_HA
            * biomass_factor
            * chlorophyll_factor
            * water_factor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn vigorous_moist_field_reaches_reference_yield() {
        let est = estimate_yield(0.7, 0.4, 0.3);
        assert_relative_eq!(est.biomass_factor, 1.0);
        assert_relative_eq!(est.chlorophyll_factor, 1.0);
        assert_relative_eq!(est.water_factor, 1.0);
        assert_relative_eq!(est.expected_yield_tons_per_ha, 5.0);
    }

    #[test]
    fn factors_are_clamped_at_their_floors() {
        let est = estimate_yield(0.0, 0.0, -0.5);
        assert_relative_eq!(est.biomass_factor, 0.2);
        assert_relative_eq!(est.chlorophyll_factor, 0.3);
        assert_relative_eq!(est.water_factor, 0.6);
        assert_relative_eq!(est.expected_yield_tons_per_ha, 5.0 * 0.2 * 0.3 * 0.6);
    }

    #[test]
    fn moisture_bands_step_the_water_factor() {
        assert_relative_eq!(estimate_yield(0.5, 0.3, 0.2).water_factor, 1.0);
        assert_relative_eq!(estimate_yield(0.5, 0.3, 0.0).water_factor, 0.8);
        assert_relative_eq!(estimate_yield(0.5, 0.3, -0.2).water_factor, 0.6);
    }

    #[test]
    fn midrange_readings_scale_linearly() {
        let est = estimate_yield(0.4, 0.2, 0.15);
        assert_relative_eq!(est.biomass_factor, 0.6);
        assert_relative_eq!(est.chlorophyll_factor, 0.6);
        assert_relative_eq!(est.expected_yield_tons_per_ha, 5.0 * 0.6 * 0.6);
    }
}
