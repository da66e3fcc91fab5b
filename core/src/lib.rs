//! Synchronous client SDK for the Hermes-DPD parcel-delivery partner API.
//!
//! # Overview
//! Two typed operations over the partner's REST service:
//! [`PartnerApiClient::submit_parcel_statuses`] (`SendParcelStatuses`) and
//! [`PartnerApiClient::fetch_parcels`] (`GetParcels`). The client performs
//! one blocking authenticated round trip per call and normalizes the wire
//! response: empty-body detection, UTF-8 BOM stripping, optional JSON
//! decoding, and transcoding of the upstream legacy-codepage error channel.
//!
//! # Design
//! - `PartnerApiClient` is immutable after construction — a validated
//!   [`ClientConfig`] plus a reusable HTTP agent, nothing else.
//! - Every failure surfaces as one uniform [`ApiError`]; no retries, no
//!   recovery, no fallback values.
//! - Response payloads stay generic ([`ResponsePayload`]) because the
//!   response schema is owned by the partner; the [`reference`] tables give
//!   callers the documented status tokens and outcome codes to interpret it.

pub mod client;
pub mod error;
pub mod reference;
pub mod types;

pub use client::{ClientConfig, PartnerApiClient, PRODUCTION_URL, TEST_URL};
pub use error::ApiError;
pub use reference::{error_code, ErrorCodeInfo, ERROR_CODES};
pub use types::{ApiResult, ParcelStatus, ParcelStatusRecord, ResponsePayload, StatusSystemName};
