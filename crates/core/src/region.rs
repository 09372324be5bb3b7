//! Region of interest geometry
//!
//! A [`Region`] is an immutable polygon or multipolygon parsed from a
//! GeoJSON Feature or Geometry. Analyses only ever read it: centroid for
//! point-based weather lookups, geodesic area for sanity bounds.

use geo::{Centroid, GeodesicArea};
use geo_types::Geometry;
use serde_json::Value;

use crate::error::{Error, Result};

/// Immutable region of interest.
#[derive(Debug, Clone)]
pub struct Region {
    geometry: Geometry<f64>,
}

impl Region {
    /// Parse a region from a GeoJSON value (Feature or bare Geometry).
    ///
    /// Only `Polygon` and `MultiPolygon` geometries are accepted.
    pub fn from_geojson(value: &Value) -> Result<Self> {
        let gj = geojson::GeoJson::from_json_value(value.clone())
            .map_err(|e| Error::InvalidRegion(format!("not valid GeoJSON: {e}")))?;

        let geometry = match gj {
            geojson::GeoJson::Feature(f) => f
                .geometry
                .ok_or_else(|| Error::InvalidRegion("feature has no geometry".into()))?,
            geojson::GeoJson::Geometry(g) => g,
            geojson::GeoJson::FeatureCollection(_) => {
                return Err(Error::InvalidRegion(
                    "expected a single Feature or Geometry, got a FeatureCollection".into(),
                ));
            }
        };

        let geometry: Geometry<f64> = geometry
            .value
            .try_into()
            .map_err(|e| Error::InvalidRegion(format!("unsupported geometry: {e}")))?;

        match geometry {
            Geometry::Polygon(_) | Geometry::MultiPolygon(_) => Ok(Self { geometry }),
            other => Err(Error::InvalidRegion(format!(
                "expected Polygon or MultiPolygon, got {}",
                geometry_name(&other)
            ))),
        }
    }

    /// The underlying geometry.
    pub fn geometry(&self) -> &Geometry<f64> {
        &self.geometry
    }

    /// Centroid as `(lat, lon)`.
    pub fn centroid(&self) -> Result<(f64, f64)> {
        let point = self
            .geometry
            .centroid()
            .ok_or_else(|| Error::InvalidRegion("region has no centroid".into()))?;
        Ok((point.y(), point.x()))
    }

    /// Geodesic area in square kilometres.
    pub fn area_km2(&self) -> f64 {
        let area_m2 = match &self.geometry {
            Geometry::Polygon(p) => p.geodesic_area_unsigned(),
            Geometry::MultiPolygon(mp) => mp.geodesic_area_unsigned(),
            _ => 0.0,
        };
        area_m2 / 1e6
    }

    /// Geodesic area in acres (used by farm-scale breakdowns).
    pub fn area_acres(&self) -> f64 {
        self.area_km2() * 1e6 / 4047.0
    }
}

fn geometry_name(g: &Geometry<f64>) -> &'static str {
    match g {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn square_feature() -> Value {
        json!({
            "type": "Feature",
            "properties": {},
            "geometry": {
                "type": "Polygon",
                "coordinates": [[
                    [77.0, 28.0], [77.1, 28.0], [77.1, 28.1], [77.0, 28.1], [77.0, 28.0]
                ]]
            }
        })
    }

    #[test]
    fn parses_feature_polygon() {
        let region = Region::from_geojson(&square_feature()).unwrap();
        let (lat, lon) = region.centroid().unwrap();
        assert!((lat - 28.05).abs() < 1e-6);
        assert!((lon - 77.05).abs() < 1e-6);
    }

    #[test]
    fn parses_bare_geometry() {
        let geom = square_feature()["geometry"].clone();
        assert!(Region::from_geojson(&geom).is_ok());
    }

    #[test]
    fn rejects_point() {
        let value = json!({"type": "Point", "coordinates": [77.0, 28.0]});
        assert!(matches!(
            Region::from_geojson(&value),
            Err(Error::InvalidRegion(_))
        ));
    }

    #[test]
    fn area_is_positive() {
        let region = Region::from_geojson(&square_feature()).unwrap();
        // ~0.1 deg square near 28N is roughly 100 km2.
        let area = region.area_km2();
        assert!(area > 50.0 && area < 200.0, "area = {area}");
    }
}
