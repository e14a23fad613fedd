use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use geojson::FeatureCollection;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::net::{TcpListener, ToSocketAddrs};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::{
    catalogue::{BusInfo, NotFound, TransportCatalogue},
    map::network_map,
};

type Catalogue = Arc<TransportCatalogue>;

#[derive(Debug)]
pub enum ApiError {
    NotFound(NotFound),
    Internal(anyhow::Error),
}

impl From<NotFound> for ApiError {
    fn from(e: NotFound) -> Self {
        Self::NotFound(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(e) => {
                (StatusCode::NOT_FOUND, Json(json!({ "error_message": e.to_string() })))
                    .into_response()
            }
            ApiError::Internal(e) => {
                warn!("request failed: {e:#}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error_message": e.to_string() })),
                )
                    .into_response()
            }
        }
    }
}

#[derive(Serialize)]
pub struct StopBuses {
    pub buses: Vec<String>,
}

#[derive(Deserialize)]
pub struct DistanceParams {
    pub from: String,
    pub to: String,
}

#[derive(Serialize)]
pub struct Distance {
    pub from: String,
    pub to: String,
    pub meters: u32,
}

pub fn router(catalogue: Catalogue) -> Router {
    Router::new()
        .route("/buses/{name}", get(bus_info))
        .route("/stops/{name}/buses", get(buses_by_stop))
        .route("/distance", get(distance))
        .route("/map", get(map))
        .layer(CorsLayer::permissive())
        .with_state(catalogue)
}

/// Serves the read-only query API until the process is stopped.
pub async fn serve<A: ToSocketAddrs>(catalogue: TransportCatalogue, addr: A) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(
        addr = %listener.local_addr()?,
        stops = catalogue.stop_count(),
        buses = catalogue.bus_count(),
        "serving transport catalogue"
    );

    axum::serve(listener, router(Arc::new(catalogue))).await?;
    Ok(())
}

pub async fn bus_info(
    State(catalogue): State<Catalogue>,
    Path(name): Path<String>,
) -> Result<Json<BusInfo>, ApiError> {
    Ok(Json(catalogue.bus_info(&name)?))
}

pub async fn buses_by_stop(
    State(catalogue): State<Catalogue>,
    Path(name): Path<String>,
) -> Result<Json<StopBuses>, ApiError> {
    let buses = catalogue
        .buses_by_stop(&name)?
        .into_iter()
        .map(str::to_owned)
        .collect();
    Ok(Json(StopBuses { buses }))
}

pub async fn distance(
    State(catalogue): State<Catalogue>,
    Query(params): Query<DistanceParams>,
) -> Result<Json<Distance>, ApiError> {
    let meters = catalogue.distance(&params.from, &params.to)?;
    Ok(Json(Distance {
        from: params.from,
        to: params.to,
        meters,
    }))
}

pub async fn map(State(catalogue): State<Catalogue>) -> Result<Json<FeatureCollection>, ApiError> {
    network_map(&catalogue)
        .map(Json)
        .map_err(ApiError::Internal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Coordinates;
    use rstest::{fixture, rstest};

    #[fixture]
    fn catalogue() -> Catalogue {
        let mut catalogue = TransportCatalogue::new();
        catalogue.add_stop("A", Coordinates::new(55.574371, 37.6517));
        catalogue.add_stop("B", Coordinates::new(55.581065, 37.64839));
        catalogue.add_stop("C", Coordinates::new(55.587655, 37.645687));
        catalogue
            .add_bus("256", vec!["A".into(), "B".into()], true)
            .unwrap();
        catalogue.set_distance("A", "B", 1200).unwrap();
        catalogue.set_distance("B", "A", 900).unwrap();
        Arc::new(catalogue)
    }

    #[rstest]
    #[tokio::test]
    async fn serves_bus_info(catalogue: Catalogue) {
        let Json(info) = bus_info(State(catalogue), Path("256".into()))
            .await
            .unwrap();
        assert_eq!(info.stop_count, 2);
        assert_eq!(info.route_length, 2100);
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_bus_is_404(catalogue: Catalogue) {
        let response = bus_info(State(catalogue), Path("751".into()))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[rstest]
    #[tokio::test]
    async fn serves_buses_by_stop(catalogue: Catalogue) {
        let Json(stop) = buses_by_stop(State(catalogue.clone()), Path("A".into()))
            .await
            .unwrap();
        assert_eq!(stop.buses, ["256"]);

        let Json(stop) = buses_by_stop(State(catalogue.clone()), Path("C".into()))
            .await
            .unwrap();
        assert!(stop.buses.is_empty());

        let response = buses_by_stop(State(catalogue), Path("Z".into()))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[rstest]
    #[tokio::test]
    async fn serves_distances(catalogue: Catalogue) {
        let params = |from: &str, to: &str| {
            Query(DistanceParams {
                from: from.into(),
                to: to.into(),
            })
        };

        let Json(d) = distance(State(catalogue.clone()), params("B", "A"))
            .await
            .unwrap();
        assert_eq!(d.meters, 900);

        let response = distance(State(catalogue), params("A", "C"))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[rstest]
    #[tokio::test]
    async fn serves_map(catalogue: Catalogue) {
        let Json(collection) = map(State(catalogue)).await.unwrap();
        assert_eq!(collection.features.len(), 3);
    }
}
