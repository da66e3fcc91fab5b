//! Synchronous client for the partner REST API.
//!
//! # Design
//! `PartnerApiClient` holds an immutable `ClientConfig` and a ureq agent
//! built once at construction; it carries no mutable state between calls.
//! Both public operations funnel into one private `execute` routine that
//! performs the blocking round trip and normalizes the wire response:
//! Basic auth on every call, empty-body detection, UTF-8 BOM stripping,
//! optional JSON decoding, and best-effort transcoding of the upstream
//! legacy-codepage error channel. Each call is one round trip — no retries,
//! no caching, no de-duplication. Repeated calls and separate instances are
//! fully independent; serializing calls is the caller's concern.

use base64::Engine;
use serde::Serialize;
use tracing::debug;
use ureq::http::Method;
use ureq::tls::TlsConfig;
use ureq::{Agent, ResponseExt};

use crate::error::ApiError;
use crate::types::{ApiResult, ParcelStatusRecord, ResponsePayload};

/// Production endpoint of the partner service.
pub const PRODUCTION_URL: &str = "https://api.hermes-dpd.ru/ps/restservice.svc/rest";
/// Test endpoint of the partner service.
pub const TEST_URL: &str = "https://test-api.hermes-dpd.ru/ps/restservice.svc/rest";

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Immutable connection settings for `PartnerApiClient`.
///
/// All three strings are trimmed at construction (the URL additionally loses
/// trailing slashes) and must be non-empty afterwards.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    base_url: String,
    login: String,
    password: String,
    decode_json: bool,
    verify_tls: bool,
}

impl ClientConfig {
    /// Validate and trim the connection settings.
    ///
    /// JSON decoding of responses defaults to on; TLS certificate
    /// verification defaults to off (see [`ClientConfig::verify_tls`]).
    pub fn new(base_url: &str, login: &str, password: &str) -> Result<Self, ApiError> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        let login = login.trim().to_string();
        let password = password.trim().to_string();
        if base_url.is_empty() || login.is_empty() || password.is_empty() {
            return Err(ApiError::Configuration(
                "url, login and password must be non-empty strings".to_string(),
            ));
        }
        Ok(Self {
            base_url,
            login,
            password,
            decode_json: true,
            verify_tls: false,
        })
    }

    /// Settings for the production endpoint ([`PRODUCTION_URL`]).
    pub fn production(login: &str, password: &str) -> Result<Self, ApiError> {
        Self::new(PRODUCTION_URL, login, password)
    }

    /// Whether responses are decoded as JSON (`true`, the default) or
    /// returned as raw BOM-stripped text.
    pub fn decode_json(mut self, decode_json: bool) -> Self {
        self.decode_json = decode_json;
        self
    }

    /// Enable TLS certificate verification.
    ///
    /// **Security warning**: verification is *disabled* by default. The
    /// partner service historically presents certificates that fail
    /// verification, and the reference integration runs with verification
    /// off; the default preserves that behavior. Opt in with
    /// `verify_tls(true)` whenever your environment allows it.
    pub fn verify_tls(mut self, verify_tls: bool) -> Self {
        self.verify_tls = verify_tls;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Request body of `SendParcelStatuses`.
#[derive(Serialize)]
struct StatusSubmission<'a> {
    #[serde(rename = "ParcelStatusData")]
    parcel_status_data: &'a [ParcelStatusRecord],
}

/// Request body of `GetParcels`. `dateTo` is serialized as JSON `null` when
/// absent, matching the service contract.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ParcelQuery<'a> {
    date_from: &'a str,
    date_to: Option<&'a str>,
    partner_point_codes: &'a [String],
}

/// Synchronous client for the partner API.
///
/// Construct once with a validated [`ClientConfig`]; every call performs
/// exactly one blocking HTTP round trip.
#[derive(Debug)]
pub struct PartnerApiClient {
    config: ClientConfig,
    agent: Agent,
}

impl PartnerApiClient {
    pub fn new(config: ClientConfig) -> Self {
        // No client-side timeout: the agent default applies, matching the
        // reference integration.
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .tls_config(
                TlsConfig::builder()
                    .disable_verification(!config.verify_tls)
                    .build(),
            )
            .build()
            .new_agent();
        Self { config, agent }
    }

    /// Submit parcel status updates (`POST {base}/SendParcelStatuses`).
    ///
    /// The records are wrapped under the top-level `ParcelStatusData` key
    /// and passed through verbatim. Server-side contract: if applying one
    /// status in the batch fails, the remaining statuses for that same
    /// parcel in the same call are not applied. The client does not inspect
    /// or special-case this — it returns whatever the server answers.
    pub fn submit_parcel_statuses(
        &self,
        records: &[ParcelStatusRecord],
    ) -> Result<ApiResult, ApiError> {
        let body = serde_json::to_string(&StatusSubmission {
            parcel_status_data: records,
        })
        .map_err(|e| ApiError::Transport {
            status: None,
            message: format!("failed to serialize request body: {e}"),
        })?;
        let url = format!("{}/SendParcelStatuses", self.config.base_url);
        self.execute(Method::POST, &url, Some(&body), &[])
    }

    /// Retrieve parcels scheduled for handoff (`POST {base}/GetParcels`).
    ///
    /// `date_from` is mandatory; its format is the caller's responsibility.
    /// `partner_point_codes` narrows the result to specific pickup points.
    /// `date_to` is normally `None` — fill it only when re-fetching an old
    /// period after a gap on the partner side.
    pub fn fetch_parcels(
        &self,
        date_from: &str,
        partner_point_codes: &[String],
        date_to: Option<&str>,
    ) -> Result<ApiResult, ApiError> {
        let body = serde_json::to_string(&ParcelQuery {
            date_from,
            date_to,
            partner_point_codes,
        })
        .map_err(|e| ApiError::Transport {
            status: None,
            message: format!("failed to serialize request body: {e}"),
        })?;
        let url = format!("{}/GetParcels", self.config.base_url);
        self.execute(Method::POST, &url, Some(&body), &[])
    }

    /// Perform one authenticated round trip and normalize the response.
    ///
    /// Success with an empty body maps to `ResponsePayload::Empty`; a
    /// non-empty body is BOM-stripped and then JSON-decoded or returned raw
    /// depending on `decode_json`. A non-success status or a transport
    /// failure becomes `ApiError::Transport` with the server text passed
    /// through the legacy-encoding shim.
    fn execute(
        &self,
        method: Method,
        url: &str,
        body: Option<&str>,
        query: &[(&str, &str)],
    ) -> Result<ApiResult, ApiError> {
        let auth = basic_auth_header(&self.config.login, &self.config.password);
        debug!(url, method = method.as_str(), "sending request");

        // Both service operations are POSTs; GET covers the generic path.
        let sent = if method == Method::GET {
            self.agent
                .get(url)
                .query_pairs(query.iter().copied())
                .header("Authorization", auth.as_str())
                .call()
        } else {
            let builder = self
                .agent
                .post(url)
                .query_pairs(query.iter().copied())
                .header("Authorization", auth.as_str());
            match body {
                Some(body) => builder
                    .content_type("application/json")
                    .send(body.as_bytes()),
                None => builder.send_empty(),
            }
        };

        let mut response = sent.map_err(|e| ApiError::Transport {
            status: None,
            message: e.to_string(),
        })?;

        let request_url = response.get_uri().to_string();
        let status = response.status();
        debug!(status = status.as_u16(), url = request_url.as_str(), "response received");

        if !status.is_success() {
            // Best effort: an unreadable error body still yields an error
            // message via the canonical reason phrase.
            let bytes = response.body_mut().read_to_vec().unwrap_or_default();
            let mut message = decode_legacy_text(&bytes);
            if message.is_empty() {
                message = status.canonical_reason().unwrap_or("unknown error").to_string();
            }
            return Err(ApiError::Transport {
                status: Some(status.as_u16()),
                message,
            });
        }

        let bytes = response
            .body_mut()
            .read_to_vec()
            .map_err(|e| ApiError::Transport {
                status: None,
                message: e.to_string(),
            })?;

        if bytes.is_empty() {
            return Ok(ApiResult {
                result: ResponsePayload::Empty,
                request_url,
            });
        }

        // The server is known to sometimes prepend a UTF-8 BOM, which
        // breaks JSON parsing if left in place.
        let text_bytes = strip_bom(&bytes);
        let result = if self.config.decode_json {
            let value = serde_json::from_slice(text_bytes)
                .map_err(|e| ApiError::Decode(e.to_string()))?;
            ResponsePayload::Json(value)
        } else {
            ResponsePayload::Raw(String::from_utf8_lossy(text_bytes).into_owned())
        };

        Ok(ApiResult {
            result,
            request_url,
        })
    }
}

fn basic_auth_header(login: &str, password: &str) -> String {
    let credentials =
        base64::engine::general_purpose::STANDARD.encode(format!("{login}:{password}"));
    format!("Basic {credentials}")
}

/// Strip one leading UTF-8 byte-order-mark, if present.
fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(&UTF8_BOM).unwrap_or(bytes)
}

/// Normalize upstream error text to UTF-8.
///
/// The upstream error channel is known to emit windows-1251 text. Bytes
/// that are already valid UTF-8 pass through untouched; anything else is
/// decoded as windows-1251. This never fails — undecodable bytes become
/// replacement characters rather than a secondary error.
fn decode_legacy_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => {
            let (text, _, _) = encoding_rs::WINDOWS_1251.decode(bytes);
            text.into_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use serde_json::json;

    use super::*;
    use crate::types::{ParcelStatus, StatusSystemName};

    #[test]
    fn config_trims_url_login_and_password() {
        let config = ClientConfig::new(" https://x/ ", " login ", " password ").unwrap();
        assert_eq!(config.base_url(), "https://x");
        assert_eq!(config.login, "login");
        assert_eq!(config.password, "password");
        assert!(config.decode_json);
        assert!(!config.verify_tls);
    }

    #[test]
    fn config_strips_repeated_trailing_slashes() {
        let config = ClientConfig::new("https://api.example.com/base//", "l", "p").unwrap();
        assert_eq!(config.base_url(), "https://api.example.com/base");
    }

    #[test]
    fn config_rejects_empty_fields() {
        assert!(matches!(
            ClientConfig::new("", "login", "password"),
            Err(ApiError::Configuration(_))
        ));
        assert!(matches!(
            ClientConfig::new("https://x", "", "password"),
            Err(ApiError::Configuration(_))
        ));
        assert!(matches!(
            ClientConfig::new("https://x", "login", ""),
            Err(ApiError::Configuration(_))
        ));
    }

    #[test]
    fn config_rejects_whitespace_only_fields() {
        assert!(matches!(
            ClientConfig::new("https://x", "   ", "password"),
            Err(ApiError::Configuration(_))
        ));
        assert!(matches!(
            ClientConfig::new("  /  ", "login", "password"),
            Err(ApiError::Configuration(_))
        ));
    }

    #[test]
    fn production_config_uses_the_production_endpoint() {
        let config = ClientConfig::production("login", "password").unwrap();
        assert_eq!(config.base_url(), PRODUCTION_URL);
    }

    #[test]
    fn builder_flags_are_applied() {
        let config = ClientConfig::new(TEST_URL, "l", "p")
            .unwrap()
            .decode_json(false)
            .verify_tls(true);
        assert!(!config.decode_json);
        assert!(config.verify_tls);
    }

    #[test]
    fn basic_auth_header_is_rfc_shaped() {
        assert_eq!(
            basic_auth_header("Aladdin", "open sesame"),
            "Basic QWxhZGRpbjpvcGVuIHNlc2FtZQ=="
        );
    }

    #[test]
    fn strip_bom_removes_exactly_one_leading_bom() {
        assert_eq!(strip_bom(b"\xEF\xBB\xBF{\"a\":1}"), b"{\"a\":1}");
        assert_eq!(strip_bom(b"{\"a\":1}"), b"{\"a\":1}");
        assert_eq!(strip_bom(b"\xEF\xBB\xBF"), b"");
        // Only a leading BOM is stripped.
        assert_eq!(strip_bom(b"x\xEF\xBB\xBF"), b"x\xEF\xBB\xBF");
    }

    #[test]
    fn legacy_text_passes_valid_utf8_through() {
        assert_eq!(decode_legacy_text("Ошибка".as_bytes()), "Ошибка");
        assert_eq!(decode_legacy_text(b"plain ascii"), "plain ascii");
    }

    #[test]
    fn legacy_text_decodes_windows_1251() {
        // "Ошибка" in windows-1251.
        let bytes = [0xCE, 0xF8, 0xE8, 0xE1, 0xEA, 0xE0];
        assert_eq!(decode_legacy_text(&bytes), "Ошибка");
    }

    #[test]
    fn submit_body_wraps_records_under_parcel_status_data() {
        let records = vec![ParcelStatusRecord {
            parcel_barcode: "21750100012392".to_string(),
            statuses: ParcelStatus {
                status_system_name: StatusSystemName::Missing,
                status_timestamp: "2024-01-01T00:00:00Z".to_string(),
                partner_point_code: "soPS2".to_string(),
                extra_params: HashMap::new(),
            },
        }];
        let body = serde_json::to_value(StatusSubmission {
            parcel_status_data: &records,
        })
        .unwrap();
        assert_eq!(
            body,
            json!({
                "ParcelStatusData": [{
                    "ParcelBarcode": "21750100012392",
                    "Statuses": {
                        "StatusSystemName": "MISSING",
                        "StatusTimestamp": "2024-01-01T00:00:00Z",
                        "PartnerPointCode": "soPS2",
                        "ExtraParams": {}
                    }
                }]
            })
        );
    }

    #[test]
    fn fetch_body_serializes_absent_date_to_as_null() {
        let body = serde_json::to_value(ParcelQuery {
            date_from: "2014-08-12",
            date_to: None,
            partner_point_codes: &[],
        })
        .unwrap();
        assert_eq!(
            body,
            json!({
                "dateFrom": "2014-08-12",
                "dateTo": null,
                "partnerPointCodes": []
            })
        );
    }

    #[test]
    fn fetch_body_carries_filters_when_given() {
        let codes = vec!["soPS2".to_string(), "soPS3".to_string()];
        let body = serde_json::to_value(ParcelQuery {
            date_from: "2014-08-12",
            date_to: Some("2014-08-13"),
            partner_point_codes: &codes,
        })
        .unwrap();
        assert_eq!(body["dateTo"], "2014-08-13");
        assert_eq!(body["partnerPointCodes"], json!(["soPS2", "soPS3"]));
    }

    #[test]
    fn client_builds_from_valid_config() {
        let config = ClientConfig::new(TEST_URL, "login", "password").unwrap();
        let client = PartnerApiClient::new(config);
        assert_eq!(client.config.base_url(), TEST_URL);
    }
}
