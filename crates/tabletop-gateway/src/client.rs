// SPDX-FileCopyrightText: 2026 Tabletop Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client that forwards bookings to restaurant reservation APIs.
//!
//! Provides [`HttpBookingGateway`], which looks up the restaurant's endpoint,
//! sends exactly one request with the configured method, and classifies the
//! result. It never returns an error: transport failures become
//! [`OutcomeKind::Unreachable`](tabletop_core::OutcomeKind::Unreachable).

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde::Serialize;
use tabletop_core::time::format_date_time;
use tabletop_core::types::DEFAULT_CONFIRMATION_MESSAGE;
use tabletop_core::{
    BookingGateway, BookingRequest, Component, EndpointRegistry, ExternalBookingOutcome,
    HealthStatus, RestaurantBookingEndpoint, RestaurantId, TabletopError,
};
use tracing::{debug, info, warn};

use crate::classify::classify_response;
use crate::signature::sign_payload;

/// Header carrying the HMAC signature of the request body.
pub const SIGNATURE_HEADER: &str = "x-tabletop-signature";
/// Header carrying a fresh correlation id for each outbound attempt.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// JSON body sent to a restaurant's reservation API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalBookingPayload<'a> {
    pub booking_date_time: String,
    pub number_of_people: u32,
    pub special_requests: Option<&'a str>,
    pub customer_name: &'a str,
}

impl<'a> ExternalBookingPayload<'a> {
    pub fn new(request: &'a BookingRequest, customer_name: &'a str) -> Self {
        Self {
            booking_date_time: format_date_time(&request.booking_date_time),
            number_of_people: request.number_of_people,
            special_requests: request.special_requests.as_deref(),
            customer_name,
        }
    }
}

/// Gateway to restaurant reservation systems over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBookingGateway {
    client: reqwest::Client,
    registry: Arc<EndpointRegistry>,
    confirmation_message: String,
}

impl HttpBookingGateway {
    /// Creates a gateway over the given endpoint registry.
    ///
    /// `timeout` bounds each outbound call end to end; redirects are not
    /// followed.
    pub fn new(registry: Arc<EndpointRegistry>, timeout: Duration) -> Result<Self, TabletopError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| TabletopError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            registry,
            confirmation_message: DEFAULT_CONFIRMATION_MESSAGE.to_string(),
        })
    }

    /// Overrides the confirmation used when a restaurant sends no `message`.
    pub fn with_confirmation_message(mut self, message: impl Into<String>) -> Self {
        self.confirmation_message = message.into();
        self
    }

    /// The registry this gateway resolves endpoints from.
    pub fn registry(&self) -> &EndpointRegistry {
        &self.registry
    }

    async fn send(
        &self,
        endpoint: &RestaurantBookingEndpoint,
        body: Vec<u8>,
    ) -> ExternalBookingOutcome {
        let method = match Method::from_bytes(endpoint.http_method.as_bytes()) {
            Ok(method) => method,
            Err(e) => {
                warn!(
                    restaurant_id = %endpoint.restaurant_id,
                    method = %endpoint.http_method,
                    error = %e,
                    "invalid HTTP method for restaurant endpoint"
                );
                return ExternalBookingOutcome::unreachable();
            }
        };

        let request_id = uuid::Uuid::new_v4().to_string();
        let mut request = self
            .client
            .request(method, &endpoint.url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .header(REQUEST_ID_HEADER, &request_id);

        if let Some(secret) = endpoint.secret_key.as_deref() {
            match sign_payload(secret, &body) {
                Some(signature) => request = request.header(SIGNATURE_HEADER, signature),
                None => warn!(
                    restaurant_id = %endpoint.restaurant_id,
                    "could not sign payload, sending unsigned"
                ),
            }
        }

        debug!(
            restaurant_id = %endpoint.restaurant_id,
            url = %endpoint.url,
            method = %endpoint.http_method,
            request_id = %request_id,
            "sending booking to restaurant"
        );

        let response = match request.body(body).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(
                    restaurant_id = %endpoint.restaurant_id,
                    request_id = %request_id,
                    timeout = e.is_timeout(),
                    error = %e,
                    "restaurant booking request failed"
                );
                return ExternalBookingOutcome::unreachable();
            }
        };

        let status = response.status();
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                warn!(
                    restaurant_id = %endpoint.restaurant_id,
                    request_id = %request_id,
                    status = %status,
                    error = %e,
                    "failed to read restaurant response body"
                );
                return ExternalBookingOutcome::unreachable();
            }
        };

        let outcome = classify_response(status, &text, &self.confirmation_message);
        if outcome.success() {
            info!(
                restaurant_id = %endpoint.restaurant_id,
                request_id = %request_id,
                status = %status,
                "restaurant confirmed booking"
            );
        } else {
            warn!(
                restaurant_id = %endpoint.restaurant_id,
                request_id = %request_id,
                status = %status,
                kind = %outcome.kind,
                "restaurant did not confirm booking"
            );
        }
        outcome
    }
}

#[async_trait]
impl BookingGateway for HttpBookingGateway {
    async fn book(
        &self,
        restaurant_id: RestaurantId,
        request: &BookingRequest,
        customer_name: &str,
    ) -> ExternalBookingOutcome {
        let Some(endpoint) = self.registry.lookup_endpoint(restaurant_id) else {
            debug!(restaurant_id = %restaurant_id, "no booking endpoint configured");
            return ExternalBookingOutcome::not_configured();
        };

        let payload = ExternalBookingPayload::new(request, customer_name);
        let body = match serde_json::to_vec(&payload) {
            Ok(body) => body,
            Err(e) => {
                warn!(restaurant_id = %restaurant_id, error = %e, "failed to encode booking payload");
                return ExternalBookingOutcome::unreachable();
            }
        };

        self.send(endpoint, body).await
    }
}

#[async_trait]
impl Component for HttpBookingGateway {
    fn name(&self) -> &str {
        "booking-gateway"
    }

    async fn health_check(&self) -> Result<HealthStatus, TabletopError> {
        if self.registry.is_empty() {
            Ok(HealthStatus::Degraded(
                "no restaurant booking endpoints configured".to_string(),
            ))
        } else {
            Ok(HealthStatus::Healthy)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use chrono::{TimeZone, Utc};
    use tabletop_core::{OutcomeKind, UserId};
    use wiremock::matchers::{body_json, header, header_exists, method, path};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    use super::*;
    use crate::signature::verify_signature;

    fn booking_request(restaurant_id: i64) -> BookingRequest {
        BookingRequest {
            restaurant_id: RestaurantId(restaurant_id),
            user_id: UserId(1),
            booking_date_time: Utc.with_ymd_and_hms(2030, 1, 1, 19, 0, 0).unwrap(),
            number_of_people: 2,
            special_requests: Some("Window seat".to_string()),
        }
    }

    fn endpoint(restaurant_id: i64, url: String, method: &str) -> RestaurantBookingEndpoint {
        RestaurantBookingEndpoint {
            restaurant_id: RestaurantId(restaurant_id),
            url,
            http_method: method.to_string(),
            secret_key: None,
        }
    }

    fn gateway_for(endpoints: Vec<RestaurantBookingEndpoint>) -> HttpBookingGateway {
        let registry: EndpointRegistry = endpoints.into_iter().collect();
        HttpBookingGateway::new(Arc::new(registry), Duration::from_secs(2)).unwrap()
    }

    async fn book(gateway: &HttpBookingGateway, restaurant_id: i64) -> ExternalBookingOutcome {
        gateway
            .book(RestaurantId(restaurant_id), &booking_request(restaurant_id), "Amara Perera")
            .await
    }

    #[tokio::test]
    async fn sends_camel_case_payload_and_confirms() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/colombo-spice/booking"))
            .and(header("content-type", "application/json"))
            .and(header_exists(REQUEST_ID_HEADER))
            .and(body_json(serde_json::json!({
                "bookingDateTime": "2030-01-01T19:00:00.000Z",
                "numberOfPeople": 2,
                "specialRequests": "Window seat",
                "customerName": "Amara Perera"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "confirmationCode": "CS-1001"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let gateway = gateway_for(vec![endpoint(
            1,
            format!("{}/api/v1/colombo-spice/booking", server.uri()),
            "POST",
        )]);
        let outcome = book(&gateway, 1).await;

        assert_eq!(outcome.kind, OutcomeKind::Confirmed);
        assert_eq!(outcome.message, "Booking confirmed with restaurant");
        assert_eq!(outcome.raw_response.unwrap()["confirmationCode"], "CS-1001");
    }

    #[tokio::test]
    async fn created_with_message_uses_restaurant_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(serde_json::json!({"message": "Reserved"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let gateway = gateway_for(vec![endpoint(1, server.uri(), "POST")]);
        let outcome = book(&gateway, 1).await;

        assert!(outcome.success());
        assert_eq!(outcome.message, "Reserved");
    }

    #[tokio::test]
    async fn custom_confirmation_message_applies_without_body_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let gateway = gateway_for(vec![endpoint(1, server.uri(), "POST")])
            .with_confirmation_message("Table held");
        let outcome = book(&gateway, 1).await;

        assert!(outcome.success());
        assert_eq!(outcome.message, "Table held");
        assert!(outcome.raw_response.is_none());
    }

    #[tokio::test]
    async fn uses_configured_http_method() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/galle/api/v2/fort/reservations"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let gateway = gateway_for(vec![endpoint(
            3,
            format!("{}/galle/api/v2/fort/reservations", server.uri()),
            "PUT",
        )]);
        assert!(book(&gateway, 3).await.success());
    }

    #[tokio::test]
    async fn client_error_includes_raw_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_string(r#"{"error":"No tables"}"#))
            .expect(1)
            .mount(&server)
            .await;

        let gateway = gateway_for(vec![endpoint(1, server.uri(), "POST")]);
        let outcome = book(&gateway, 1).await;

        assert_eq!(outcome.kind, OutcomeKind::ClientRejected);
        assert_eq!(
            outcome.message,
            r#"Restaurant booking not available: {"error":"No tables"}"#
        );
    }

    #[tokio::test]
    async fn server_error_is_unavailable_and_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .expect(1)
            .mount(&server)
            .await;

        let gateway = gateway_for(vec![endpoint(1, server.uri(), "POST")]);
        let outcome = book(&gateway, 1).await;

        assert_eq!(outcome.kind, OutcomeKind::Unavailable);
        assert_eq!(outcome.message, "Restaurant system temporarily unavailable");
    }

    #[tokio::test]
    async fn timeout_is_unreachable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&server)
            .await;

        let registry: EndpointRegistry =
            std::iter::once(endpoint(1, server.uri(), "POST")).collect();
        let gateway =
            HttpBookingGateway::new(Arc::new(registry), Duration::from_millis(200)).unwrap();

        let started = Instant::now();
        let outcome = book(&gateway, 1).await;
        assert_eq!(outcome.kind, OutcomeKind::Unreachable);
        assert_eq!(outcome.message, "Unable to connect to restaurant booking system");
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[tokio::test]
    async fn connection_refused_is_unreachable() {
        // Bind and drop to obtain a port nothing listens on.
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let gateway = gateway_for(vec![endpoint(1, format!("http://127.0.0.1:{port}/book"), "POST")]);
        let outcome = book(&gateway, 1).await;
        assert_eq!(outcome.kind, OutcomeKind::Unreachable);
    }

    #[tokio::test]
    async fn missing_endpoint_makes_no_call() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let gateway = gateway_for(vec![endpoint(1, server.uri(), "POST")]);
        let outcome = book(&gateway, 2).await;

        assert_eq!(outcome.kind, OutcomeKind::NotConfigured);
        assert_eq!(outcome.message, "Restaurant API not configured");
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn secret_key_signs_the_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header_exists(SIGNATURE_HEADER))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let mut signed = endpoint(1, server.uri(), "POST");
        signed.secret_key = Some("spice-secret".to_string());
        let gateway = gateway_for(vec![signed]);
        assert!(book(&gateway, 1).await.success());

        let requests: Vec<Request> = server.received_requests().await.unwrap();
        let signature = requests[0]
            .headers
            .get(SIGNATURE_HEADER)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(verify_signature("spice-secret", &requests[0].body, signature));
    }

    #[tokio::test]
    async fn each_attempt_gets_a_fresh_request_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(2)
            .mount(&server)
            .await;

        let gateway = gateway_for(vec![endpoint(1, server.uri(), "POST")]);
        book(&gateway, 1).await;
        book(&gateway, 1).await;

        let requests = server.received_requests().await.unwrap();
        let ids: Vec<_> = requests
            .iter()
            .map(|r| r.headers.get(REQUEST_ID_HEADER).unwrap().to_str().unwrap().to_string())
            .collect();
        assert_ne!(ids[0], ids[1]);
    }

    #[tokio::test]
    async fn health_reports_degraded_without_endpoints() {
        let gateway = gateway_for(vec![]);
        assert!(matches!(
            gateway.health_check().await.unwrap(),
            HealthStatus::Degraded(_)
        ));
        assert_eq!(gateway.name(), "booking-gateway");
    }
}
