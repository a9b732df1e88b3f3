// --- File: crates/agenda_common/src/http/client.rs ---
use once_cell::sync::Lazy;
use reqwest::Client;

/// A static HTTP client reused by every outbound call of the booking client.
///
/// No request timeout is set: the caller waits for whatever the gateway
/// answers, and the gateway itself waits on the calendar service.
pub static HTTP_CLIENT: Lazy<Client> = Lazy::new(Client::new);
