//! Mock of the Hermes-DPD partner REST service.
//!
//! Emulates the two endpoints the SDK talks to, including the upstream
//! quirks the client has to normalize:
//! - successful JSON bodies are prefixed with a UTF-8 BOM,
//! - `GetParcels` answers with a completely empty body when nothing matches,
//! - authentication failures carry a windows-1251 encoded body,
//! - every call requires HTTP Basic auth.
//!
//! `AppState` records every received call (path + raw body) so tests can
//! assert exact request shapes and call counts.

use std::sync::{Arc, Mutex};

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use base64::Engine;
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

/// Credentials the mock accepts.
pub const LOGIN: &str = "testlogin";
pub const PASSWORD: &str = "testpassword";

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// A parcel scheduled for handoff to the partner.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct Parcel {
    pub parcel_barcode: String,
    pub partner_point_code: String,
    /// Date the parcel is planned to be handed over, ISO-8601.
    pub planned_date: String,
}

/// One request received by the mock, as raw data.
#[derive(Clone, Debug)]
pub struct RecordedCall {
    pub path: String,
    pub body: String,
}

/// Shared state: the seeded parcel list and the log of received calls.
#[derive(Clone, Default)]
pub struct AppState {
    pub calls: Arc<Mutex<Vec<RecordedCall>>>,
    pub parcels: Arc<Mutex<Vec<Parcel>>>,
}

impl AppState {
    pub fn with_parcels(parcels: Vec<Parcel>) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            parcels: Arc::new(Mutex::new(parcels)),
        }
    }
}

/// `GetParcels` request body.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ParcelQuery {
    date_from: String,
    #[serde(default)]
    date_to: Option<String>,
    #[serde(default)]
    partner_point_codes: Vec<String>,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/SendParcelStatuses", post(send_parcel_statuses))
        .route("/GetParcels", post(get_parcels))
        .with_state(state)
}

pub async fn run(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    axum::serve(listener, app(state)).await
}

fn authorized(headers: &HeaderMap) -> bool {
    let expected = format!(
        "Basic {}",
        base64::engine::general_purpose::STANDARD.encode(format!("{LOGIN}:{PASSWORD}"))
    );
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value == expected)
}

/// 401 with the error text encoded in windows-1251, like the real service.
fn auth_failure() -> Response {
    let (bytes, _, _) = encoding_rs::WINDOWS_1251.encode("Ошибка авторизации пользователя");
    (StatusCode::UNAUTHORIZED, bytes.into_owned()).into_response()
}

/// 200 with a BOM-prefixed JSON body, like the real service.
fn bom_json(value: serde_json::Value) -> Response {
    let mut bytes = UTF8_BOM.to_vec();
    bytes.extend(value.to_string().into_bytes());
    ([(header::CONTENT_TYPE, "application/json")], bytes).into_response()
}

async fn send_parcel_statuses(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Response {
    if !authorized(&headers) {
        return auth_failure();
    }
    tracing::info!(bytes = body.len(), "SendParcelStatuses");
    state.calls.lock().unwrap().push(RecordedCall {
        path: "/SendParcelStatuses".to_string(),
        body: body.clone(),
    });

    let parsed: Result<serde_json::Value, _> = serde_json::from_str(&body);
    match parsed {
        Ok(value) if value.get("ParcelStatusData").is_some_and(|v| v.is_array()) => {
            bom_json(serde_json::json!({"ErrorCode": 0, "ErrorName": "Success"}))
        }
        _ => (StatusCode::BAD_REQUEST, "Deserialization").into_response(),
    }
}

async fn get_parcels(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Response {
    if !authorized(&headers) {
        return auth_failure();
    }
    tracing::info!(bytes = body.len(), "GetParcels");
    state.calls.lock().unwrap().push(RecordedCall {
        path: "/GetParcels".to_string(),
        body: body.clone(),
    });

    let query: ParcelQuery = match serde_json::from_str(&body) {
        Ok(query) => query,
        Err(_) => return (StatusCode::BAD_REQUEST, "Deserialization").into_response(),
    };

    let parcels = state.parcels.lock().unwrap();
    let matching: Vec<Parcel> = parcels
        .iter()
        .filter(|p| {
            p.planned_date >= query.date_from
                && query
                    .date_to
                    .as_ref()
                    .map_or(true, |to| p.planned_date <= *to)
                && (query.partner_point_codes.is_empty()
                    || query.partner_point_codes.contains(&p.partner_point_code))
        })
        .cloned()
        .collect();

    if matching.is_empty() {
        // Nothing scheduled comes back as a zero-length body.
        StatusCode::OK.into_response()
    } else {
        bom_json(serde_json::json!(matching))
    }
}
