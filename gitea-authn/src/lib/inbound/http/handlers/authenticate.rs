use std::collections::BTreeMap;

use auth::Principal;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use secrecy::SecretString;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn authenticate(
    State(state): State<AppState>,
    Json(body): Json<AuthenticateRequestBody>,
) -> Result<ApiSuccess<AuthenticateResponseData>, ApiError> {
    let principal = Principal::new(body.username)
        .map_err(|_| ApiError::Unauthorized("Invalid credentials".to_string()))?;
    let credential = SecretString::from(body.password);

    let labels = state
        .authenticator
        .authenticate(&principal, &credential)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        AuthenticateResponseData {
            username: principal.as_str().to_string(),
            labels: labels.into_inner(),
        },
    ))
}

#[derive(Deserialize)]
pub struct AuthenticateRequestBody {
    username: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticateResponseData {
    pub username: String,
    pub labels: BTreeMap<String, Vec<String>>,
}
