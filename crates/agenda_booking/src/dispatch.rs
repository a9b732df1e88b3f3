// --- File: crates/agenda_booking/src/dispatch.rs ---
//! Where a frozen booking goes: the hosted appointment page or the gateway.

use crate::error::BookingError;
use crate::session::BookingRequest;
use agenda_common::models::{
    CreateEventRequest, CreateEventResponse, ErrorResponse, EventStatus, UpdateStatusRequest,
    UpdateStatusResponse,
};
use agenda_common::HTTP_CLIENT;
use agenda_config::BookingConfig;
use async_trait::async_trait;
use reqwest::{Response, StatusCode, Url};
use tracing::{debug, error, info};

/// Result of a successful dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Send the visitor to this URL to finish on the hosted page.
    Redirect { url: String },
    /// The gateway created the calendar event.
    Booked {
        event_id: Option<String>,
        link: Option<String>,
    },
}

impl DispatchOutcome {
    /// A redirect keeps the staged record so a returning visitor is recognised.
    pub fn clears_staging(&self) -> bool {
        matches!(self, DispatchOutcome::Booked { .. })
    }
}

#[async_trait]
pub trait BookingDispatcher: Send + Sync {
    async fn dispatch(&self, request: &BookingRequest) -> Result<DispatchOutcome, BookingError>;
}

/// Builds a pre-filled link into the hosted appointment page.
#[derive(Debug, Clone)]
pub struct DeepLinkDispatcher {
    booking_url: String,
}

impl DeepLinkDispatcher {
    pub fn new(booking_url: impl Into<String>) -> Self {
        Self {
            booking_url: booking_url.into(),
        }
    }

    pub fn from_config(config: &BookingConfig) -> Result<Self, BookingError> {
        Ok(Self::new(config.booking_url()?))
    }

    /// `booking_url?name=…&email=…`, appended with `&` when the URL already has a query.
    pub fn link_for(&self, request: &BookingRequest) -> Result<String, BookingError> {
        let query = serde_urlencoded::to_string([
            ("name", request.contact.name.as_str()),
            ("email", request.contact.email.as_str()),
        ])
        .map_err(|e| BookingError::Encoding(e.to_string()))?;

        let separator = if self.booking_url.contains('?') { '&' } else { '?' };
        Ok(format!("{}{}{}", self.booking_url, separator, query))
    }
}

#[async_trait]
impl BookingDispatcher for DeepLinkDispatcher {
    async fn dispatch(&self, request: &BookingRequest) -> Result<DispatchOutcome, BookingError> {
        let url = self.link_for(request)?;
        debug!("Redirecting to {}", url);
        Ok(DispatchOutcome::Redirect { url })
    }
}

/// Client for the calendar gateway's HTTP API.
#[derive(Debug, Clone)]
pub struct GatewayDispatcher {
    base_url: String,
}

impl GatewayDispatcher {
    /// `base_url` is the server root, e.g. `http://localhost:3000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &BookingConfig) -> Result<Self, BookingError> {
        Ok(Self::new(config.gateway_url()?))
    }

    pub fn create_event_url(&self) -> String {
        format!("{}/api/crear-evento", self.base_url)
    }

    /// The event id is percent-encoded as a single path segment.
    pub fn status_url(&self, event_id: &str) -> Result<Url, BookingError> {
        let mut url =
            Url::parse(&self.base_url).map_err(|e| BookingError::Encoding(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| BookingError::Encoding(format!("{} cannot be a base URL", self.base_url)))?
            .pop_if_empty()
            .extend(["api", "admin", "eventos", event_id, "estado"]);
        Ok(url)
    }

    /// Payment confirmation hook: marks an event as pending or paid.
    pub async fn update_event_status(
        &self,
        event_id: &str,
        status: EventStatus,
    ) -> Result<UpdateStatusResponse, BookingError> {
        let response = HTTP_CLIENT
            .patch(self.status_url(event_id)?)
            .json(&UpdateStatusRequest { status })
            .send()
            .await?;

        let status_code = response.status();
        if status_code.is_success() {
            let body: UpdateStatusResponse = response.json().await?;
            info!("Event {} marked as {}", event_id, body.status);
            Ok(body)
        } else {
            Err(gateway_error(status_code, response).await)
        }
    }
}

/// Reads the `{msg, error}` body of a failed call, falling back to the raw text.
async fn gateway_error(status: StatusCode, response: Response) -> BookingError {
    let body_text = match response.text().await {
        Ok(text) => text,
        Err(e) => return BookingError::Request(e),
    };
    let message = match serde_json::from_str::<ErrorResponse>(&body_text) {
        Ok(body) => body.error,
        Err(_) => body_text,
    };
    error!("Gateway answered {}: {}", status, message);
    BookingError::Gateway {
        status: status.as_u16(),
        message,
    }
}

#[async_trait]
impl BookingDispatcher for GatewayDispatcher {
    async fn dispatch(&self, request: &BookingRequest) -> Result<DispatchOutcome, BookingError> {
        let payload = CreateEventRequest {
            name: request.contact.name.clone(),
            email: request.contact.email.clone(),
            phone: request.contact.phone.clone(),
            date: request.start.to_rfc3339(),
            duration: request.duration().minutes(),
        };

        debug!("POST {}", self.create_event_url());
        let response = HTTP_CLIENT
            .post(self.create_event_url())
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(gateway_error(status, response).await);
        }

        let body: CreateEventResponse = response.json().await?;
        info!("Gateway booked event {:?}", body.event_id);
        Ok(DispatchOutcome::Booked {
            event_id: body.event_id,
            link: body.link,
        })
    }
}
