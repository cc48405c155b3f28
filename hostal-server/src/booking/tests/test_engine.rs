use super::*;
use crate::booking::{EngineError, calculate_stay_days, calculate_total};
use chrono::Duration;
use rust_decimal_macros::dec;

#[test]
fn stay_days_floor_to_one_on_equal_dates() {
    let day = d(2026, 5, 1);
    assert_eq!(calculate_stay_days(day, day), 1);
}

#[test]
fn stay_days_match_days_between() {
    assert_eq!(calculate_stay_days(d(2026, 5, 1), d(2026, 5, 4)), 3);
    assert_eq!(calculate_stay_days(d(2026, 5, 1), d(2026, 5, 2)), 1);
}

#[test]
fn total_is_exact_decimal_product() {
    assert_eq!(calculate_total(dec!(150.0), 3), dec!(450.0));
    assert_eq!(calculate_total(dec!(0), 5), dec!(0));
    assert_eq!(calculate_total(dec!(33.33), 3), dec!(99.99));
}

#[tokio::test]
async fn create_reservation_computes_days_and_total() {
    let app = create_test_app();
    let room = seed_room(&app, "101", 50).await;
    let client = seed_client(&app, "11111111").await;

    let r = app
        .state
        .engine
        .create_or_update(
            draft(client.id, room.id, today() + Duration::days(1), today() + Duration::days(3)),
            &admin(),
        )
        .await
        .unwrap();

    assert_eq!(r.status, ReservationStatus::Pending);
    assert_eq!(r.stay_days, 2);
    assert_eq!(r.total_price, dec!(100));
}

#[tokio::test]
async fn create_rejects_equal_dates_even_though_calculator_floors_them() {
    let app = create_test_app();
    let room = seed_room(&app, "101", 50).await;
    let client = seed_client(&app, "11111111").await;

    let day = today() + Duration::days(1);
    let err = app
        .state
        .engine
        .create_or_update(draft(client.id, room.id, day, day), &admin())
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));
}

#[tokio::test]
async fn create_rejects_unknown_client_before_checking_dates() {
    let app = create_test_app();
    let room = seed_room(&app, "101", 50).await;

    let err = app
        .state
        .engine
        .create_or_update(draft(999, room.id, today(), today()), &admin())
        .await
        .unwrap_err();
    // The missing client fails first; the equal dates never get inspected.
    let EngineError::Validation(msg) = err else {
        panic!("expected validation error");
    };
    assert!(msg.contains("client"));
}

#[tokio::test]
async fn create_rejects_room_under_maintenance() {
    let app = create_test_app();
    let room = seed_room_with_status(&app, "203", 160, RoomStatus::Maintenance).await;
    let client = seed_client(&app, "11111111").await;

    let err = app
        .state
        .engine
        .create_or_update(
            draft(client.id, room.id, today() + Duration::days(1), today() + Duration::days(2)),
            &admin(),
        )
        .await
        .unwrap_err();
    let EngineError::Validation(msg) = err else {
        panic!("expected validation error");
    };
    assert!(msg.contains("maintenance"));
}

#[tokio::test]
async fn overlapping_reservation_is_rejected() {
    let app = create_test_app();
    let room = seed_room(&app, "101", 50).await;
    let client = seed_client(&app, "11111111").await;
    let other = seed_client(&app, "22222222").await;

    app.state
        .engine
        .create_or_update(
            draft(client.id, room.id, today() + Duration::days(1), today() + Duration::days(3)),
            &admin(),
        )
        .await
        .unwrap();

    let err = app
        .state
        .engine
        .create_or_update(
            draft(other.id, room.id, today() + Duration::days(2), today() + Duration::days(4)),
            &admin(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));
}

#[tokio::test]
async fn back_to_back_checkout_checkin_is_not_a_conflict() {
    let app = create_test_app();
    let room = seed_room(&app, "101", 50).await;
    let client = seed_client(&app, "11111111").await;
    let other = seed_client(&app, "22222222").await;

    app.state
        .engine
        .create_or_update(
            draft(client.id, room.id, today() + Duration::days(1), today() + Duration::days(3)),
            &admin(),
        )
        .await
        .unwrap();

    // New stay starts exactly on the previous checkout day.
    let second = app
        .state
        .engine
        .create_or_update(
            draft(other.id, room.id, today() + Duration::days(3), today() + Duration::days(5)),
            &admin(),
        )
        .await;
    assert!(second.is_ok());
}

#[tokio::test]
async fn update_excludes_own_id_from_conflict_check() {
    let app = create_test_app();
    let room = seed_room(&app, "101", 50).await;
    let client = seed_client(&app, "11111111").await;

    let r = app
        .state
        .engine
        .create_or_update(
            draft(client.id, room.id, today() + Duration::days(1), today() + Duration::days(3)),
            &admin(),
        )
        .await
        .unwrap();

    // Extending the same reservation overlaps itself only.
    let mut update = draft(client.id, room.id, today() + Duration::days(1), today() + Duration::days(4));
    update.id = Some(r.id);
    let updated = app.state.engine.create_or_update(update, &admin()).await.unwrap();
    assert_eq!(updated.id, r.id);
    assert_eq!(updated.stay_days, 3);
}

#[tokio::test]
async fn future_reservation_leaves_room_available_immediate_occupies() {
    let app = create_test_app();
    let room = seed_room(&app, "101", 50).await;
    let client = seed_client(&app, "11111111").await;
    let other = seed_client(&app, "22222222").await;

    app.state
        .engine
        .create_or_update(
            draft(client.id, room.id, today() + Duration::days(1), today() + Duration::days(3)),
            &admin(),
        )
        .await
        .unwrap();
    assert_eq!(room_status(&app, room.id).await, RoomStatus::Available);

    let room2 = seed_room(&app, "102", 80).await;
    app.state
        .engine
        .create_or_update(
            draft(other.id, room2.id, today(), today() + Duration::days(2)),
            &admin(),
        )
        .await
        .unwrap();
    assert_eq!(room_status(&app, room2.id).await, RoomStatus::Occupied);
}

#[tokio::test]
async fn cancel_is_refused_for_client_role() {
    let app = create_test_app();
    let room = seed_room(&app, "101", 50).await;
    let client = seed_client(&app, "11111111").await;

    let r = app
        .state
        .engine
        .create_or_update(
            draft(client.id, room.id, today() + Duration::days(1), today() + Duration::days(3)),
            &admin(),
        )
        .await
        .unwrap();

    let err = app.state.engine.cancel(r.id, &client_actor()).await.unwrap_err();
    assert!(matches!(err, EngineError::IllegalState(_)));
    assert_eq!(stored_status(&app, r.id).await, ReservationStatus::Pending);
}

#[tokio::test]
async fn cancel_releases_room_and_is_terminal() {
    let app = create_test_app();
    let room = seed_room(&app, "101", 50).await;
    let client = seed_client(&app, "11111111").await;

    let r = app
        .state
        .engine
        .create_or_update(
            draft(client.id, room.id, today(), today() + Duration::days(2)),
            &admin(),
        )
        .await
        .unwrap();
    assert_eq!(room_status(&app, room.id).await, RoomStatus::Occupied);

    let cancelled = app.state.engine.cancel(r.id, &admin()).await.unwrap();
    assert_eq!(cancelled.status, ReservationStatus::Cancelled);
    assert_eq!(room_status(&app, room.id).await, RoomStatus::Available);

    // Terminal: no further transitions.
    let err = app.state.engine.cancel(r.id, &admin()).await.unwrap_err();
    assert!(matches!(err, EngineError::IllegalState(_)));
}

#[tokio::test]
async fn finalize_stamps_departure_and_second_call_is_noop() {
    let app = create_test_app();
    let room = seed_room(&app, "101", 50).await;
    let client = seed_client(&app, "11111111").await;

    let r = app
        .state
        .engine
        .create_or_update(
            draft(client.id, room.id, today(), today() + Duration::days(2)),
            &admin(),
        )
        .await
        .unwrap();

    let finalized = app.state.engine.finalize(r.id, &admin()).await.unwrap();
    assert_eq!(finalized.status, ReservationStatus::Finalized);
    assert_eq!(finalized.actual_departure, Some(today()));
    assert_eq!(room_status(&app, room.id).await, RoomStatus::Available);

    // Move the clock: a second finalize must not re-stamp the departure.
    app.clock.advance_to(today() + Duration::days(5));
    let again = app.state.engine.finalize(r.id, &admin()).await.unwrap();
    assert_eq!(again.status, ReservationStatus::Finalized);
    assert_eq!(again.actual_departure, Some(today()));
}

#[tokio::test]
async fn assign_services_overwrites_set_and_pairs_options_positionally() {
    let app = create_test_app();
    let room = seed_room(&app, "101", 50).await;
    let client = seed_client(&app, "11111111").await;

    let breakfast = app
        .state
        .services
        .create(
            crate::registry::ServiceDraft {
                name: "Breakfast".to_string(),
                description: String::new(),
                price: dec!(10),
                active: true,
                options: vec!["Continental".to_string(), "Buffet".to_string()],
            },
            &admin(),
        )
        .await
        .unwrap();
    let spa = app
        .state
        .services
        .create(
            crate::registry::ServiceDraft {
                name: "Spa".to_string(),
                description: String::new(),
                price: dec!(25),
                active: true,
                options: vec![],
            },
            &admin(),
        )
        .await
        .unwrap();

    let r = app
        .state
        .engine
        .create_or_update(
            draft(client.id, room.id, today() + Duration::days(1), today() + Duration::days(3)),
            &admin(),
        )
        .await
        .unwrap();

    let r = app
        .state
        .engine
        .assign_services(
            r.id,
            &[breakfast.id, spa.id],
            &["Buffet".to_string()],
            &admin(),
        )
        .await
        .unwrap();
    assert_eq!(r.service_ids, vec![breakfast.id, spa.id]);
    assert_eq!(r.service_options.get("Breakfast"), Some(&"Buffet".to_string()));
    assert!(!r.service_options.contains_key("Spa"));

    // Full overwrite: reassigning drops the previous set and options.
    let r = app
        .state
        .engine
        .assign_services(r.id, &[spa.id], &[], &admin())
        .await
        .unwrap();
    assert_eq!(r.service_ids, vec![spa.id]);
    assert!(r.service_options.is_empty());
}

#[tokio::test]
async fn quote_validates_room_and_range() {
    let app = create_test_app();
    let room = seed_room(&app, "101", 50).await;

    let q = app
        .state
        .engine
        .quote(room.id, d(2026, 5, 1), d(2026, 5, 4))
        .await
        .unwrap();
    assert_eq!(q.days, 3);
    assert_eq!(q.total, dec!(150));

    // Same-day quote still bills one night.
    let q = app
        .state
        .engine
        .quote(room.id, d(2026, 5, 1), d(2026, 5, 1))
        .await
        .unwrap();
    assert_eq!(q.days, 1);

    let err = app
        .state
        .engine
        .quote(room.id, d(2026, 5, 4), d(2026, 5, 1))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));

    let err = app
        .state
        .engine
        .quote(999, d(2026, 5, 1), d(2026, 5, 4))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::NotFound(_)));
}

#[tokio::test]
async fn totals_count_income_over_non_cancelled_states() {
    let app = create_test_app();
    let room = seed_room(&app, "101", 50).await;
    let room2 = seed_room(&app, "102", 80).await;
    let client = seed_client(&app, "11111111").await;

    let r1 = app
        .state
        .engine
        .create_or_update(
            draft(client.id, room.id, today() + Duration::days(1), today() + Duration::days(3)),
            &admin(),
        )
        .await
        .unwrap();
    app.state
        .engine
        .create_or_update(
            draft(client.id, room2.id, today() + Duration::days(1), today() + Duration::days(2)),
            &admin(),
        )
        .await
        .unwrap();
    app.state.engine.cancel(r1.id, &admin()).await.unwrap();

    let totals = app.state.engine.totals().await.unwrap();
    assert_eq!(totals.total_reservations, 2);
    assert_eq!(totals.cancelled, 1);
    assert_eq!(totals.pending, 1);
    // Cancelled income is excluded.
    assert_eq!(totals.income, dec!(80));
}
