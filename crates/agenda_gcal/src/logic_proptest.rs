#[cfg(test)]
mod tests {
    use crate::logic::{build_calendar_event, compute_window, parse_start};
    use agenda_common::models::CreateEventRequest;
    use chrono::{DateTime, Duration, FixedOffset, TimeZone};
    use chrono_tz::America::Mexico_City;
    use proptest::prelude::*;

    // Starts between 2024 and 2030 with offsets from -12h to +14h
    fn arb_start() -> impl Strategy<Value = DateTime<FixedOffset>> {
        (1_704_067_200i64..1_893_456_000i64, -12i32..=14i32).prop_map(|(secs, hours)| {
            let offset = FixedOffset::east_opt(hours * 3600).unwrap();
            offset.timestamp_opt(secs, 0).unwrap()
        })
    }

    proptest! {
        #[test]
        fn window_length_equals_duration(start in arb_start(), minutes in 1i64..=24 * 60) {
            let (window_start, window_end) = compute_window(start, minutes).unwrap();
            prop_assert_eq!(window_start, start);
            prop_assert_eq!(window_end - window_start, Duration::minutes(minutes));
            prop_assert_eq!(window_end.offset(), start.offset());
        }

        #[test]
        fn non_positive_durations_never_produce_a_window(start in arb_start(), minutes in -10_000i64..=0) {
            prop_assert!(compute_window(start, minutes).is_err());
        }

        #[test]
        fn rfc3339_start_round_trips(start in arb_start()) {
            let parsed = parse_start(&start.to_rfc3339(), Mexico_City).unwrap();
            prop_assert_eq!(parsed, start);
        }

        #[test]
        fn built_event_spans_requested_minutes(
            start in arb_start(),
            minutes in prop::sample::select(vec![15i64, 30, 60]),
        ) {
            let request = CreateEventRequest {
                name: "Ana".to_string(),
                email: "ana@example.com".to_string(),
                phone: "5512345678".to_string(),
                date: start.to_rfc3339(),
                duration: minutes,
            };
            let event = build_calendar_event(&request, Mexico_City).unwrap();
            prop_assert_eq!(event.end - event.start, Duration::minutes(minutes));
            prop_assert_eq!(event.attendees, vec!["ana@example.com".to_string()]);
        }
    }
}
