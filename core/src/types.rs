//! Wire DTOs for the partner API.
//!
//! # Design
//! `ParcelStatusRecord` is caller-built and passed through to the server as
//! the request payload; the client never inspects it. The wire casing of the
//! record is PascalCase (`ParcelBarcode`, `Statuses`, ...), matching the
//! service contract, while the `GetParcels` body uses camelCase — the serde
//! renames below are the single source of truth for both. Responses are kept
//! generic (`serde_json::Value` or raw text) because the service schema is
//! owned by the partner and interpreted by the caller.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A single parcel status submission: one barcode plus the status to apply.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct ParcelStatusRecord {
    pub parcel_barcode: String,
    pub statuses: ParcelStatus,
}

/// The status applied to a parcel at a partner point.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct ParcelStatus {
    pub status_system_name: StatusSystemName,
    /// ISO-8601 timestamp of the status event. Format is the caller's
    /// responsibility; the client does not validate it.
    pub status_timestamp: String,
    pub partner_point_code: String,
    #[serde(default)]
    pub extra_params: HashMap<String, String>,
}

/// The fixed set of status tokens the service accepts.
///
/// Serializes to the exact server strings (`ARRIVED_AT_PARCEL_SHOP`, ...).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusSystemName {
    ArrivedAtParcelShop,
    Received,
    Undelivered,
    Inventoried,
    Missing,
}

impl StatusSystemName {
    /// Every status token, in the order the service documents them.
    pub const ALL: [StatusSystemName; 5] = [
        StatusSystemName::ArrivedAtParcelShop,
        StatusSystemName::Received,
        StatusSystemName::Undelivered,
        StatusSystemName::Inventoried,
        StatusSystemName::Missing,
    ];

    /// The wire token for this status.
    pub fn system_name(self) -> &'static str {
        match self {
            StatusSystemName::ArrivedAtParcelShop => "ARRIVED_AT_PARCEL_SHOP",
            StatusSystemName::Received => "RECEIVED",
            StatusSystemName::Undelivered => "UNDELIVERED",
            StatusSystemName::Inventoried => "INVENTORIED",
            StatusSystemName::Missing => "MISSING",
        }
    }

    /// The fixed human-readable label, reproduced verbatim from the service
    /// documentation.
    pub fn label(self) -> &'static str {
        match self {
            StatusSystemName::ArrivedAtParcelShop => "Принята в пункте выдачи",
            StatusSystemName::Received => "Выдана",
            StatusSystemName::Undelivered => "Отправлена на терминал (возврат)",
            StatusSystemName::Inventoried => "Инвентаризирована",
            StatusSystemName::Missing => "Потеряна",
        }
    }
}

/// Outcome of one API call.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResult {
    /// The normalized response body.
    pub result: ResponsePayload,
    /// The fully resolved URL the request was sent to, query string included.
    pub request_url: String,
}

/// Normalized response body of a successful call.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponsePayload {
    /// The server answered with a zero-length body.
    Empty,
    /// BOM-stripped body parsed as JSON (`decode_json` on).
    Json(serde_json::Value),
    /// BOM-stripped body returned as text (`decode_json` off).
    Raw(String),
}

impl ResponsePayload {
    pub fn is_empty(&self) -> bool {
        matches!(self, ResponsePayload::Empty)
    }

    /// The parsed JSON value, if the body was decoded.
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            ResponsePayload::Json(value) => Some(value),
            _ => None,
        }
    }

    /// The raw text, if the body was left undecoded.
    pub fn as_raw(&self) -> Option<&str> {
        match self {
            ResponsePayload::Raw(text) => Some(text),
            _ => None,
        }
    }
}
