use axum::Json;
use axum::extract::State;
use tracing::instrument;

use crate::models::info::PortResponse;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/port",
    tag = "Info",
    operation_id = "getPort",
    summary = "Port the server was configured to listen on",
    responses((status = 200, description = "Configured port", body = PortResponse)),
)]
#[instrument(skip(state))]
pub async fn get_port(State(state): State<AppState>) -> Json<PortResponse> {
    Json(PortResponse {
        port: state.config.server.port,
    })
}
