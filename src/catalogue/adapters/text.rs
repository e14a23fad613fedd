use anyhow::{Context, Result, bail};
use std::str::FromStr;

use crate::{
    catalogue::{Bus, DistanceRecord, Stop, adapters::CatalogueAdapter, adapters::close_loop},
    geo::Coordinates,
    input::text::{CommandKind, TextDocument},
};

/// `<lat>, <lng>[, <D>m to <stop>]*`
#[derive(Debug, PartialEq)]
struct StopDescription {
    coordinates: Coordinates,
    road_distances: Vec<(String, u32)>,
}

impl FromStr for StopDescription {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split(',').map(str::trim);

        let mut coordinate = |axis: &str| -> Result<f64> {
            let value = parts
                .next()
                .filter(|v| !v.is_empty())
                .with_context(|| format!("missing {axis} in {s:?}"))?;
            value
                .parse()
                .with_context(|| format!("invalid {axis} {value:?} in {s:?}"))
        };
        let lat = coordinate("latitude")?;
        let lng = coordinate("longitude")?;

        let road_distances = parts
            .map(|part| {
                let Some((meters, stop)) = part.split_once("m to ") else {
                    bail!("invalid road distance {part:?}");
                };
                let meters = meters
                    .trim()
                    .parse()
                    .with_context(|| format!("invalid distance in {part:?}"))?;
                Ok((stop.trim().to_owned(), meters))
            })
            .collect::<Result<_>>()?;

        Ok(Self {
            coordinates: Coordinates::new(lat, lng),
            road_distances,
        })
    }
}

/// `A > B > C > A` is circular, `A - B - C` is linear.
fn parse_route(s: &str) -> (Vec<String>, bool) {
    let is_circular = s.contains('>');
    let delimiter = if is_circular { '>' } else { '-' };

    let stops = s
        .split(delimiter)
        .map(str::trim)
        .filter(|stop| !stop.is_empty())
        .map(str::to_owned)
        .collect();

    if is_circular {
        (close_loop(stops), true)
    } else {
        (stops, false)
    }
}

pub struct TextAdapter {
    stops: Vec<Stop>,
    buses: Vec<Bus>,
    distances: Vec<DistanceRecord>,
}

impl TextAdapter {
    pub fn new(document: &TextDocument) -> Result<Self> {
        let mut stops = vec![];
        let mut buses = vec![];
        let mut distances = vec![];

        for command in &document.commands {
            match command.kind {
                CommandKind::Stop => {
                    let description: StopDescription = command
                        .description
                        .parse()
                        .with_context(|| format!("stop {:?}", command.id))?;

                    stops.push(Stop::new(command.id.clone(), description.coordinates));
                    distances.extend(
                        description
                            .road_distances
                            .into_iter()
                            .map(|(to, meters)| DistanceRecord::new(command.id.clone(), to, meters)),
                    );
                }
                CommandKind::Bus => {
                    let (route, is_circular) = parse_route(&command.description);
                    buses.push(Bus::new(command.id.clone(), route, is_circular));
                }
            }
        }

        Ok(Self {
            stops,
            buses,
            distances,
        })
    }
}

impl CatalogueAdapter for TextAdapter {
    type Error = anyhow::Error;

    fn stops(&self) -> Result<Vec<Stop>> {
        Ok(self.stops.clone())
    }

    fn buses(&self) -> Result<Vec<Bus>> {
        Ok(self.buses.clone())
    }

    fn distances(&self) -> Result<Vec<DistanceRecord>> {
        Ok(self.distances.clone())
    }
}
