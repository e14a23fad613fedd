use anyhow::{Context, Result};
use serde::Deserialize;
use std::{collections::BTreeMap, str::FromStr};

use crate::input::Query;

/// A request document with `base_requests` and `stat_requests`. Other top-level
/// keys, such as rendering settings, are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct JsonDocument {
    #[serde(default)]
    pub base_requests: Vec<BaseRequest>,
    #[serde(default)]
    pub stat_requests: Vec<StatRequest>,
}

impl FromStr for JsonDocument {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        serde_json::from_str(s).context("parsing JSON request document")
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum BaseRequest {
    Stop {
        name: String,
        latitude: f64,
        longitude: f64,
        #[serde(default)]
        road_distances: BTreeMap<String, u32>,
    },
    Bus {
        name: String,
        stops: Vec<String>,
        is_roundtrip: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatRequest {
    pub id: i64,
    #[serde(flatten)]
    pub query: Query,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn parses_requests() {
        let input = r#"{
            "base_requests": [
                {"type": "Bus", "name": "114", "stops": ["Морской вокзал", "Ривьерский мост"], "is_roundtrip": false},
                {"type": "Stop", "name": "Ривьерский мост", "latitude": 43.587795, "longitude": 39.716901,
                 "road_distances": {"Морской вокзал": 850}},
                {"type": "Stop", "name": "Морской вокзал", "latitude": 43.581969, "longitude": 39.719848}
            ],
            "render_settings": {"width": 200},
            "stat_requests": [
                {"id": 1, "type": "Stop", "name": "Ривьерский мост"},
                {"id": 2, "type": "Bus", "name": "114"},
                {"id": 3, "type": "Map"}
            ]
        }"#;

        let document: JsonDocument = input.parse().unwrap();

        assert_eq!(document.base_requests.len(), 3);
        assert_eq!(
            document.base_requests[0],
            BaseRequest::Bus {
                name: "114".into(),
                stops: vec!["Морской вокзал".into(), "Ривьерский мост".into()],
                is_roundtrip: false,
            }
        );
        let BaseRequest::Stop { road_distances, .. } = &document.base_requests[1] else {
            panic!("expected a stop");
        };
        assert_eq!(road_distances.get("Морской вокзал"), Some(&850));
        assert!(matches!(
            &document.base_requests[2],
            BaseRequest::Stop { road_distances, .. } if road_distances.is_empty()
        ));

        assert_eq!(
            document.stat_requests,
            vec![
                StatRequest {
                    id: 1,
                    query: Query::Stop {
                        name: "Ривьерский мост".into()
                    }
                },
                StatRequest {
                    id: 2,
                    query: Query::Bus { name: "114".into() }
                },
                StatRequest {
                    id: 3,
                    query: Query::Map
                },
            ]
        );
    }

    #[rstest]
    #[case(r#"{"base_requests": [{"type": "Tram", "name": "1"}]}"#)]
    #[case(r#"{"base_requests": [{"type": "Stop", "name": "A", "latitude": 1.0}]}"#)]
    #[case(r#"{"stat_requests": [{"type": "Bus", "name": "1"}]}"#)]
    #[case(r#"{"base_requests": [{"type": "Stop", "name": "A", "latitude": 1.0, "longitude": 2.0, "road_distances": {"B": -5}}]}"#)]
    fn rejects_malformed_requests(#[case] input: &str) {
        assert!(input.parse::<JsonDocument>().is_err());
    }
}
