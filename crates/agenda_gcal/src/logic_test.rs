#[cfg(test)]
mod tests {
    use crate::logic::{
        build_calendar_event, compute_window, create_booking_event, parse_start,
        reminder_policy, update_booking_status,
    };
    use crate::service::mock::MockCalendarService;
    use crate::service::GcalServiceError;
    use agenda_common::models::{CreateEventRequest, EventStatus};
    use agenda_common::services::ReminderMethod;
    use chrono::DateTime;
    use chrono_tz::America::Mexico_City;

    fn request(date: &str, duration: i64) -> CreateEventRequest {
        CreateEventRequest {
            name: "Ana López".to_string(),
            email: "ana@example.com".to_string(),
            phone: "5512345678".to_string(),
            date: date.to_string(),
            duration,
        }
    }

    #[test]
    fn test_window_keeps_offset_and_adds_duration() {
        let start = parse_start("2025-03-01T10:00:00-06:00", Mexico_City).unwrap();
        let (start, end) = compute_window(start, 30).unwrap();

        assert_eq!(start.to_rfc3339(), "2025-03-01T10:00:00-06:00");
        assert_eq!(end.to_rfc3339(), "2025-03-01T10:30:00-06:00");
    }

    #[test]
    fn test_local_time_is_read_in_configured_zone() {
        let start = parse_start("2025-03-01T10:00", Mexico_City).unwrap();
        assert_eq!(start.to_rfc3339(), "2025-03-01T10:00:00-06:00");

        let utc = parse_start("2025-03-01T16:00:00.000Z", Mexico_City).unwrap();
        assert_eq!(utc, start);
    }

    #[test]
    fn test_unparseable_start_is_rejected() {
        let err = parse_start("mañana a las 10", Mexico_City).unwrap_err();
        assert!(matches!(err, GcalServiceError::TimeParseError(_)));
    }

    #[test]
    fn test_non_positive_duration_is_rejected() {
        let start = DateTime::parse_from_rfc3339("2025-03-01T10:00:00-06:00").unwrap();
        assert!(matches!(
            compute_window(start, 0),
            Err(GcalServiceError::CalculationError(_))
        ));
        assert!(compute_window(start, -15).is_err());
    }

    #[test]
    fn test_event_carries_contact_reminders_and_pending_color() {
        let event =
            build_calendar_event(&request("2025-03-01T10:00:00-06:00", 60), Mexico_City).unwrap();

        assert_eq!(event.summary, "Cita: Ana López");
        assert_eq!(
            event.description,
            "Cliente: Ana López\nEmail: ana@example.com\nTeléfono: 5512345678\n\nEstado: PENDIENTE DE PAGO"
        );
        assert_eq!(event.attendees, vec!["ana@example.com".to_string()]);
        assert_eq!(event.time_zone, "America/Mexico_City");
        assert_eq!(event.status, EventStatus::Pending);
        assert_eq!(event.status.color_id(), "9");
        assert_eq!(event.end.to_rfc3339(), "2025-03-01T11:00:00-06:00");

        let reminders = reminder_policy();
        assert_eq!(event.reminders, reminders);
        assert_eq!(reminders[0].method, ReminderMethod::Email);
        assert_eq!(reminders[0].minutes, 1440);
        assert_eq!(
            reminders.iter().map(|r| r.minutes).collect::<Vec<_>>(),
            vec![1440, 60, 5]
        );
    }

    #[test]
    fn test_missing_contact_fields_are_all_reported() {
        let mut incomplete = request("2025-03-01T10:00:00-06:00", 30);
        incomplete.name = "  ".to_string();
        incomplete.phone = String::new();

        match build_calendar_event(&incomplete, Mexico_City) {
            Err(GcalServiceError::InvalidRequest(message)) => {
                assert_eq!(message, "missing required field(s): name, phone")
            }
            other => panic!("expected InvalidRequest, got {:?}", other),
        }
    }

    #[test]
    fn test_unsupported_duration_is_rejected() {
        for minutes in [45, 100_000] {
            match build_calendar_event(&request("2025-03-01T10:00:00-06:00", minutes), Mexico_City)
            {
                Err(GcalServiceError::InvalidRequest(message)) => {
                    assert!(message.contains("unsupported session duration"), "{}", message)
                }
                other => panic!("expected InvalidRequest for {}, got {:?}", minutes, other),
            }
        }
    }

    #[tokio::test]
    async fn test_unsupported_duration_never_reaches_service() {
        let service = MockCalendarService::new();
        let result = create_booking_event(
            &service,
            "agenda",
            &request("2025-03-01T10:00:00-06:00", 45),
            Mexico_City,
        )
        .await;

        assert!(matches!(result, Err(GcalServiceError::InvalidRequest(_))));
        assert!(service.events("agenda").is_empty());
    }

    #[tokio::test]
    async fn test_create_booking_event_notifies_attendees() {
        let service = MockCalendarService::new();
        let result = create_booking_event(
            &service,
            "agenda",
            &request("2025-03-01T10:00:00-06:00", 30),
            Mexico_City,
        )
        .await
        .unwrap();

        let stored = service.events("agenda");
        assert_eq!(stored.len(), 1);
        assert!(stored[0].notified);
        assert_eq!(result.event_id.as_deref(), Some(stored[0].id.as_str()));
        assert!(result.html_link.is_some());
    }

    #[tokio::test]
    async fn test_failed_service_creates_nothing() {
        let service = MockCalendarService::failing("Quota exceeded");
        let err = create_booking_event(
            &service,
            "agenda",
            &request("2025-03-01T10:00:00-06:00", 30),
            Mexico_City,
        )
        .await
        .unwrap_err();

        assert_eq!(err.to_string(), "Calendar service error: Quota exceeded");
        assert!(service.events("agenda").is_empty());
    }

    #[tokio::test]
    async fn test_invalid_request_never_reaches_service() {
        let service = MockCalendarService::new();
        let result =
            create_booking_event(&service, "agenda", &request("not a date", 30), Mexico_City)
                .await;

        assert!(result.is_err());
        assert!(service.events("agenda").is_empty());
    }

    #[tokio::test]
    async fn test_update_status_marks_event_paid() {
        let service = MockCalendarService::new();
        let created = create_booking_event(
            &service,
            "agenda",
            &request("2025-03-01T10:00:00-06:00", 15),
            Mexico_City,
        )
        .await
        .unwrap();
        let event_id = created.event_id.unwrap();

        update_booking_status(&service, "agenda", &event_id, EventStatus::Paid)
            .await
            .unwrap();

        let stored = &service.events("agenda")[0];
        assert_eq!(stored.event.status, EventStatus::Paid);
        assert!(stored.event.description.ends_with("Estado: PAGADO"));
        assert!(!stored.event.description.contains("PENDIENTE"));
    }

    #[tokio::test]
    async fn test_update_status_unknown_event() {
        let service = MockCalendarService::new();
        let err = update_booking_status(&service, "agenda", "missing", EventStatus::Paid)
            .await
            .unwrap_err();
        assert!(matches!(err, GcalServiceError::NotFound(_)));
    }
}
