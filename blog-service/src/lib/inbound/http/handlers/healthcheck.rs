use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn healthcheck(State(state): State<AppState>) -> ApiSuccess<HealthcheckResponseData> {
    ApiSuccess::new(
        StatusCode::OK,
        HealthcheckResponseData {
            status: "available".to_string(),
            system_info: SystemInfo {
                environment: state.environment.clone(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthcheckResponseData {
    pub status: String,
    pub system_info: SystemInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SystemInfo {
    pub environment: String,
    pub version: String,
}
