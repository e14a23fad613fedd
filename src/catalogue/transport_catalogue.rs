use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use crate::{
    catalogue::{
        Bus, BusInfo, NotFound, Result, Stop,
        adapters::CatalogueAdapter,
    },
    geo::{self, Coordinates},
};

#[derive(Debug, Default)]
pub struct TransportCatalogue {
    stops: HashMap<String, Stop>,
    buses: HashMap<String, Bus>,
    stop_to_buses: HashMap<String, BTreeSet<String>>,
    distances: HashMap<(String, String), u32>,
}

impl TransportCatalogue {
    pub fn new() -> Self {
        Default::default()
    }

    /// Bulk-loads stops, then buses, then distances.
    pub fn from_adapter<A>(adapter: &A) -> std::result::Result<Self, A::Error>
    where
        A: CatalogueAdapter,
        A::Error: From<NotFound>,
    {
        let mut catalogue = Self::new();

        for stop in adapter.stops()? {
            catalogue.add_stop(stop.name, stop.coordinates);
        }

        for bus in adapter.buses()? {
            catalogue.add_bus(bus.name, bus.stops, bus.is_circular)?;
        }

        for d in adapter.distances()? {
            catalogue.set_distance(&d.from, &d.to, d.meters)?;
        }

        debug!(
            stops = catalogue.stops.len(),
            buses = catalogue.buses.len(),
            distances = catalogue.distances.len(),
            "catalogue loaded"
        );

        Ok(catalogue)
    }

    pub fn add_stop(&mut self, name: impl Into<String>, coordinates: Coordinates) {
        let name = name.into();
        self.stops.insert(name.clone(), Stop::new(name, coordinates));
    }

    /// Every stop must already exist; otherwise nothing is written.
    pub fn add_bus(
        &mut self,
        name: impl Into<String>,
        stops: Vec<String>,
        is_circular: bool,
    ) -> Result<()> {
        if let Some(missing) = stops.iter().find(|s| !self.stops.contains_key(*s)) {
            return Err(NotFound::Stop(missing.clone()));
        }

        let name = name.into();
        if let Some(previous) = self.buses.remove(&name) {
            for stop in previous.stops {
                if let Some(served_by) = self.stop_to_buses.get_mut(&stop) {
                    served_by.remove(&name);
                }
            }
        }

        for stop in &stops {
            self.stop_to_buses
                .entry(stop.clone())
                .or_default()
                .insert(name.clone());
        }

        self.buses
            .insert(name.clone(), Bus::new(name, stops, is_circular));
        Ok(())
    }

    pub fn set_distance(&mut self, from: &str, to: &str, meters: u32) -> Result<()> {
        self.stop(from)?;
        self.stop(to)?;
        self.distances
            .insert((from.to_owned(), to.to_owned()), meters);
        Ok(())
    }

    pub fn find_stop(&self, name: &str) -> Option<&Stop> {
        self.stops.get(name)
    }

    pub fn find_bus(&self, name: &str) -> Option<&Bus> {
        self.buses.get(name)
    }

    pub fn stops(&self) -> impl Iterator<Item = &Stop> {
        self.stops.values()
    }

    pub fn buses(&self) -> impl Iterator<Item = &Bus> {
        self.buses.values()
    }

    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    pub fn bus_count(&self) -> usize {
        self.buses.len()
    }

    /// Exact direction first, then the reverse one. A stop is zero meters from
    /// itself unless something else was recorded.
    pub fn distance(&self, from: &str, to: &str) -> Result<u32> {
        self.stop(from)?;
        self.stop(to)?;

        let forward = (from.to_owned(), to.to_owned());
        let backward = (to.to_owned(), from.to_owned());

        self.distances
            .get(&forward)
            .or_else(|| self.distances.get(&backward))
            .copied()
            .or((from == to).then_some(0))
            .ok_or_else(|| NotFound::Distance {
                from: from.to_owned(),
                to: to.to_owned(),
            })
    }

    pub fn bus_info(&self, name: &str) -> Result<BusInfo> {
        let bus = self
            .find_bus(name)
            .ok_or_else(|| NotFound::Bus(name.to_owned()))?;

        let mut route_length = 0u64;
        let mut geo_length = 0.0;
        for (from, to) in bus.legs() {
            route_length += u64::from(self.distance(from, to)?);
            geo_length += geo::compute_distance(
                self.stop(from)?.coordinates,
                self.stop(to)?.coordinates,
            );
        }

        let curvature = if geo::is_zero(geo_length) {
            0.0
        } else {
            route_length as f64 / geo_length
        };

        Ok(BusInfo {
            stop_count: bus.stop_count(),
            unique_stop_count: bus.unique_stop_count(),
            route_length,
            curvature,
        })
    }

    /// Names of the buses serving `stop`, sorted and without duplicates.
    pub fn buses_by_stop(&self, stop: &str) -> Result<Vec<&str>> {
        self.stop(stop)?;
        Ok(self
            .stop_to_buses
            .get(stop)
            .map(|buses| buses.iter().map(String::as_str).collect())
            .unwrap_or_default())
    }

    fn stop(&self, name: &str) -> Result<&Stop> {
        self.find_stop(name)
            .ok_or_else(|| NotFound::Stop(name.to_owned()))
    }
}
