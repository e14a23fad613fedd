use serde::Serialize;

pub mod adapters;
mod entities;
mod transport_catalogue;

pub use entities::{Bus, DistanceRecord, Stop};
pub use transport_catalogue::TransportCatalogue;

/// The only failure the catalogue reports: something named by the caller is absent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotFound {
    #[error("stop not found: {0}")]
    Stop(String),

    #[error("bus not found: {0}")]
    Bus(String),

    #[error("no road distance recorded between {from} and {to}")]
    Distance { from: String, to: String },
}

pub type Result<T> = std::result::Result<T, NotFound>;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BusInfo {
    pub stop_count: usize,
    pub unique_stop_count: usize,
    pub route_length: u64,
    pub curvature: f64,
}
