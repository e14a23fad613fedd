use crate::{
    catalogue::{Bus, DistanceRecord, Stop, adapters::CatalogueAdapter, adapters::close_loop},
    geo::Coordinates,
    input::json::{BaseRequest, JsonDocument},
};

pub struct JsonAdapter<'a> {
    document: &'a JsonDocument,
}

impl<'a> JsonAdapter<'a> {
    pub fn new(document: &'a JsonDocument) -> Self {
        Self { document }
    }
}

impl<'a> CatalogueAdapter for JsonAdapter<'a> {
    type Error = anyhow::Error;

    fn stops(&self) -> anyhow::Result<Vec<Stop>> {
        let stops = self
            .document
            .base_requests
            .iter()
            .filter_map(|request| match request {
                BaseRequest::Stop {
                    name,
                    latitude,
                    longitude,
                    ..
                } => Some(Stop::new(name.clone(), Coordinates::new(*latitude, *longitude))),
                BaseRequest::Bus { .. } => None,
            })
            .collect();

        Ok(stops)
    }

    fn buses(&self) -> anyhow::Result<Vec<Bus>> {
        let buses = self
            .document
            .base_requests
            .iter()
            .filter_map(|request| match request {
                BaseRequest::Bus {
                    name,
                    stops,
                    is_roundtrip: true,
                } => Some(Bus::new(name.clone(), close_loop(stops.clone()), true)),
                BaseRequest::Bus {
                    name,
                    stops,
                    is_roundtrip: false,
                } => Some(Bus::new(name.clone(), stops.clone(), false)),
                BaseRequest::Stop { .. } => None,
            })
            .collect();

        Ok(buses)
    }

    fn distances(&self) -> anyhow::Result<Vec<DistanceRecord>> {
        let distances = self
            .document
            .base_requests
            .iter()
            .filter_map(|request| match request {
                BaseRequest::Stop {
                    name,
                    road_distances,
                    ..
                } => Some(
                    road_distances
                        .iter()
                        .map(move |(to, &meters)| DistanceRecord::new(name.clone(), to.clone(), meters)),
                ),
                BaseRequest::Bus { .. } => None,
            })
            .flatten()
            .collect();

        Ok(distances)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn splits_base_requests_by_kind() {
        let document: JsonDocument = r#"{"base_requests": [
            {"type": "Bus", "name": "14", "stops": ["A", "B", "C", "A"], "is_roundtrip": true},
            {"type": "Bus", "name": "114", "stops": ["A", "B"], "is_roundtrip": false},
            {"type": "Stop", "name": "A", "latitude": 43.58, "longitude": 39.71,
             "road_distances": {"B": 850, "C": 1740}},
            {"type": "Stop", "name": "B", "latitude": 43.59, "longitude": 39.72},
            {"type": "Stop", "name": "C", "latitude": 43.57, "longitude": 39.73}
        ]}"#
        .parse()
        .unwrap();

        let adapter = JsonAdapter::new(&document);

        let stops = adapter.stops().unwrap();
        assert_eq!(stops.len(), 3);
        assert_eq!(stops[0], Stop::new("A", Coordinates::new(43.58, 39.71)));

        let buses = adapter.buses().unwrap();
        assert_eq!(buses[0], Bus::new("14", vec!["A".into(), "B".into(), "C".into()], true));
        assert_eq!(buses[1], Bus::new("114", vec!["A".into(), "B".into()], false));

        assert_eq!(
            adapter.distances().unwrap(),
            vec![
                DistanceRecord::new("A", "B", 850),
                DistanceRecord::new("A", "C", 1740),
            ]
        );
    }
}
