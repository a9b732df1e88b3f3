// File: crates/agenda_gcal/src/auth.rs
use agenda_config::{GcalConfig, ServiceAccountSource};
use google_calendar3::{
    hyper_rustls::{self, HttpsConnectorBuilder},
    hyper_util::client::legacy::connect::HttpConnector,
    hyper_util::client::legacy::Client,
    yup_oauth2::{read_service_account_key, ServiceAccountAuthenticator, ServiceAccountKey},
    CalendarHub,
};
use serde_json::json;
use std::{error::Error, path::Path};

/// Token endpoint written into inline service-account keys.
pub const GOOGLE_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

// Type aliases for clarity
type Connector = hyper_rustls::HttpsConnector<HttpConnector>;

pub type HubType = CalendarHub<Connector>;

/// Builds a service-account key from an email and a PEM private key.
///
/// Keys pasted into environment variables usually carry literal `\n`
/// sequences; they are turned back into newlines.
pub fn inline_service_account_key(
    client_email: &str,
    private_key: &str,
) -> Result<ServiceAccountKey, serde_json::Error> {
    serde_json::from_value(json!({
        "type": "service_account",
        "client_email": client_email,
        "private_key": private_key.replace("\\n", "\n"),
        "token_uri": GOOGLE_TOKEN_URI,
    }))
}

pub async fn create_calendar_hub(
    config: &GcalConfig,
) -> Result<HubType, Box<dyn Error + Send + Sync>> {
    let sa_key = match config.credentials()? {
        ServiceAccountSource::KeyFile(key_path) => {
            read_service_account_key(Path::new(key_path)).await?
        }
        ServiceAccountSource::Inline {
            client_email,
            private_key,
        } => inline_service_account_key(client_email, private_key)?,
    };

    let auth = ServiceAccountAuthenticator::builder(sa_key).build().await?;

    let https = HttpsConnectorBuilder::new()
        .with_native_roots()?
        .https_or_http()
        .enable_http1()
        .build();

    let client = Client::builder(hyper_util::rt::TokioExecutor::new()).build(https);

    Ok(CalendarHub::new(client, auth))
}
