// --- File: crates/agenda_gcal/src/routes.rs ---

use crate::auth::create_calendar_hub;
use crate::handlers::{create_event_handler, update_event_status_handler, GcalState};
use crate::service::GoogleCalendarService;
use agenda_common::{config_error, AgendaError};
use agenda_config::AppConfig;
use axum::{
    routing::{patch, post},
    Router,
};
use std::sync::Arc;
use tracing::info;

/// Creates the gateway router backed by Google Calendar.
///
/// The gcal section is validated and the service account authenticated here,
/// so a misconfigured deployment fails at start-up instead of on the first
/// booking.
pub async fn routes(config: Arc<AppConfig>) -> Result<Router, AgendaError> {
    let gcal_config = config.require_gcal()?;

    let calendar_hub = create_calendar_hub(gcal_config)
        .await
        .map_err(|e| config_error(format!("Google Calendar authentication failed: {}", e)))?;
    let service = GoogleCalendarService::new(Arc::new(calendar_hub));

    let state = GcalState::new(gcal_config, Arc::new(service))?;
    info!(
        "Calendar gateway ready for {} ({})",
        state.calendar_id, state.time_zone
    );
    Ok(router(state, gcal_config.enable_status_hook))
}

/// Builds the routes around an already constructed state.
///
/// The status route is only mounted when `expose_status_hook` is set.
pub fn router(state: GcalState, expose_status_hook: bool) -> Router {
    let mut router = Router::new().route("/crear-evento", post(create_event_handler));
    if expose_status_hook {
        info!("Exposing the event status hook");
        router = router.route(
            "/admin/eventos/{event_id}/estado",
            patch(update_event_status_handler),
        );
    }
    router.with_state(Arc::new(state))
}
