use geojson::{Feature, FeatureCollection, ser::serialize_geometry};
use itertools::Itertools;
use serde::Serialize;

use crate::catalogue::{NotFound, TransportCatalogue};

#[derive(Serialize)]
struct RouteFeature<'a> {
    name: &'a str,
    is_roundtrip: bool,
    #[serde(serialize_with = "serialize_geometry")]
    geometry: geo_types::LineString<f64>,
}

#[derive(Serialize)]
struct StopFeature<'a> {
    name: &'a str,
    #[serde(serialize_with = "serialize_geometry")]
    geometry: geo_types::Point<f64>,
}

/// Every non-empty route as a line along its full traversal, then every stop that
/// at least one route serves. Both groups are ordered by name.
pub fn network_map(catalogue: &TransportCatalogue) -> anyhow::Result<FeatureCollection> {
    let routes = catalogue
        .buses()
        .filter(|bus| !bus.stops.is_empty())
        .sorted_by(|a, b| a.name.cmp(&b.name))
        .map(|bus| {
            let line = bus
                .traversal()
                .map(|name| {
                    catalogue
                        .find_stop(name)
                        .map(|stop| geo_types::Coord::from(stop.coordinates))
                        .ok_or_else(|| NotFound::Stop(name.to_owned()))
                })
                .collect::<Result<Vec<_>, _>>()?;

            let feature = geojson::ser::to_feature(RouteFeature {
                name: &bus.name,
                is_roundtrip: bus.is_circular,
                geometry: geo_types::LineString::new(line),
            })?;
            anyhow::Ok(feature)
        });

    let mut features = routes.collect::<anyhow::Result<Vec<Feature>>>()?;

    let served_stops = catalogue
        .stops()
        .filter(|stop| {
            catalogue
                .buses_by_stop(&stop.name)
                .is_ok_and(|buses| !buses.is_empty())
        })
        .sorted_by(|a, b| a.name.cmp(&b.name))
        .map(|stop| {
            geojson::ser::to_feature(StopFeature {
                name: &stop.name,
                geometry: stop.coordinates.into(),
            })
        })
        .collect::<Result<Vec<Feature>, geojson::Error>>()?;
    features.extend(served_stops);

    Ok(FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Coordinates;
    use geojson::Value;
    use rstest::rstest;

    fn names(stops: &[&str]) -> Vec<String> {
        stops.iter().map(|s| s.to_string()).collect()
    }

    fn feature_name(feature: &Feature) -> Option<&str> {
        feature.property("name").and_then(|v| v.as_str())
    }

    #[rstest]
    fn routes_then_served_stops() {
        let mut catalogue = TransportCatalogue::new();
        catalogue.add_stop("B", Coordinates::new(1.0, 2.0));
        catalogue.add_stop("A", Coordinates::new(3.0, 4.0));
        catalogue.add_stop("Unused", Coordinates::new(5.0, 6.0));
        catalogue.add_bus("7", names(&["A", "B"]), false).unwrap();
        catalogue.add_bus("10", names(&["B", "A"]), true).unwrap();
        catalogue.add_bus("empty", vec![], true).unwrap();

        let map = network_map(&catalogue).unwrap();

        let order: Vec<_> = map.features.iter().filter_map(feature_name).collect();
        assert_eq!(order, ["10", "7", "A", "B"]);

        let Some(Value::LineString(line)) = map.features[1].geometry.as_ref().map(|g| &g.value)
        else {
            panic!("expected a line string");
        };
        // lng, lat order; linear route runs A, B, A
        assert_eq!(line, &vec![vec![4.0, 3.0], vec![2.0, 1.0], vec![4.0, 3.0]]);

        assert_eq!(
            map.features[0].property("is_roundtrip"),
            Some(&serde_json::Value::Bool(true))
        );
    }
}
