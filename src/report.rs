use anyhow::Result;
use geojson::FeatureCollection;
use itertools::Itertools;
use serde::Serialize;
use tracing::debug;

use crate::{
    catalogue::{BusInfo, TransportCatalogue},
    input::{Document, Query, json::StatRequest},
    map::network_map,
};

const NOT_FOUND: &str = "not found";

#[derive(Serialize)]
pub struct Response {
    pub request_id: i64,
    #[serde(flatten)]
    pub body: ResponseBody,
}

#[derive(Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Bus(BusInfo),
    Stop { buses: Vec<String> },
    Map { map: FeatureCollection },
    Error { error_message: &'static str },
}

/// Answers every stat request of `document`, in the document's own output format.
pub fn answer(catalogue: &TransportCatalogue, document: &Document) -> Result<String> {
    match document {
        Document::Text(text) => {
            let lines = text
                .queries
                .iter()
                .map(|query| text_line(catalogue, query))
                .collect::<Result<Vec<_>>>()?;
            Ok(lines.join("\n"))
        }
        Document::Json(json) => {
            let responses = json
                .stat_requests
                .iter()
                .map(|request| json_response(catalogue, request))
                .collect::<Result<Vec<_>>>()?;
            Ok(serde_json::to_string_pretty(&responses)?)
        }
    }
}

pub fn text_line(catalogue: &TransportCatalogue, query: &Query) -> Result<String> {
    debug!(?query, "answering stat request");

    let line = match query {
        Query::Bus { name } => match catalogue.bus_info(name) {
            Ok(info) => format!(
                "Bus {name}: {} stops on route, {} unique stops, {} route length, {} curvature",
                info.stop_count,
                info.unique_stop_count,
                info.route_length,
                significant(info.curvature, 6),
            ),
            Err(_) => format!("Bus {name}: {NOT_FOUND}"),
        },
        Query::Stop { name } => match catalogue.buses_by_stop(name) {
            Ok(buses) if buses.is_empty() => format!("Stop {name}: no buses"),
            Ok(buses) => format!("Stop {name}: buses {}", buses.iter().join(" ")),
            Err(_) => format!("Stop {name}: {NOT_FOUND}"),
        },
        Query::Map => serde_json::to_string(&network_map(catalogue)?)?,
    };

    Ok(line)
}

pub fn json_response(catalogue: &TransportCatalogue, request: &StatRequest) -> Result<Response> {
    debug!(id = request.id, query = ?request.query, "answering stat request");

    let not_found = ResponseBody::Error {
        error_message: NOT_FOUND,
    };

    let body = match &request.query {
        Query::Bus { name } => catalogue
            .bus_info(name)
            .map_or(not_found, ResponseBody::Bus),
        Query::Stop { name } => catalogue.buses_by_stop(name).map_or(not_found, |buses| {
            ResponseBody::Stop {
                buses: buses.into_iter().map(str::to_owned).collect(),
            }
        }),
        Query::Map => ResponseBody::Map {
            map: network_map(catalogue)?,
        },
    };

    Ok(Response {
        request_id: request.id,
        body,
    })
}

/// Formats like a C++ stream at the given precision: `digits` significant digits,
/// trailing zeros dropped, scientific notation for very large or small magnitudes.
fn significant(value: f64, digits: usize) -> String {
    if value == 0.0 || !value.is_finite() {
        return value.to_string();
    }

    let precision = digits.max(1) - 1;
    // the exponent after rounding decides the notation
    let scientific = format!("{value:.precision$e}");
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i64 = exponent.parse().unwrap_or_default();

    if exponent < -4 || exponent >= digits as i64 {
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!("{}e{sign}{:02}", trim_fraction(mantissa), exponent.abs());
    }

    let decimals = (digits as i64 - 1 - exponent).max(0) as usize;
    trim_fraction(&format!("{value:.decimals$}")).to_owned()
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
