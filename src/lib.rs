//! In-memory transport catalogue: stops, bus routes and road distances, with route
//! statistics and stop-to-route lookups.

pub mod catalogue;
pub mod geo;
pub mod input;
pub mod map;
pub mod report;
pub mod server;

use anyhow::Result;

use crate::{
    catalogue::{
        TransportCatalogue,
        adapters::{json::JsonAdapter, text::TextAdapter},
    },
    input::Document,
};

/// Runs the load phase for the base requests of `document`.
pub fn build_catalogue(document: &Document) -> Result<TransportCatalogue> {
    match document {
        Document::Text(text) => TransportCatalogue::from_adapter(&TextAdapter::new(text)?),
        Document::Json(json) => TransportCatalogue::from_adapter(&JsonAdapter::new(json)),
    }
}
