pub mod json;
pub mod text;

use crate::catalogue::{Bus, DistanceRecord, Stop};

pub trait CatalogueAdapter {
    type Error;

    /// Returns every stop; a later stop with the same name replaces an earlier one.
    fn stops(&self) -> Result<Vec<Stop>, Self::Error>;

    /// Returns buses in the canonical representation: circular routes without the
    /// closing repeat, linear routes as the outbound leg only.
    fn buses(&self) -> Result<Vec<Bus>, Self::Error>;

    /// Returns directed road distances.
    fn distances(&self) -> Result<Vec<DistanceRecord>, Self::Error>;
}

/// Drops the repeated start stop a circular route is usually written with.
pub(crate) fn close_loop(mut stops: Vec<String>) -> Vec<String> {
    if stops.len() > 1 && stops.first() == stops.last() {
        stops.pop();
    }
    stops
}
