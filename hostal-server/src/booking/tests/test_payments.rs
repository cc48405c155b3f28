use super::*;
use crate::booking::EngineError;
use crate::ledger::PaymentRequest;
use chrono::Duration;
use rust_decimal_macros::dec;

fn request(reservation_id: i64) -> PaymentRequest {
    PaymentRequest {
        reservation_id,
        method: None,
        payment_method: None,
        channel: None,
    }
}

#[tokio::test]
async fn payment_activates_reservation_and_links_reference() {
    let app = create_test_app();
    let room = seed_room(&app, "101", 150).await;
    let client = seed_client(&app, "11111111").await;

    // 2 nights at 150 → base 300, no services.
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

    let outcome = app.state.ledger.process(request(r.id), &admin()).await.unwrap();
    assert!(outcome.success);
    assert!(!outcome.already_processed);
    assert!(outcome.reference.starts_with("REF-"));

    let stored = app
        .state
        .stores
        .reservations
        .find_by_id(r.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, ReservationStatus::Active);
    assert!(stored.payment_id.is_some());

    let payment = app
        .state
        .ledger
        .find_by_reservation(r.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(payment.base_amount, dec!(300));
    assert_eq!(payment.services_amount, dec!(0));
    assert_eq!(payment.total_amount, dec!(300));
    assert_eq!(payment.method, "CARD");
    assert_eq!(payment.channel, "WEB");
}

#[tokio::test]
async fn repeat_payment_returns_same_reference_without_second_row() {
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

    let first = app.state.ledger.process(request(r.id), &admin()).await.unwrap();
    let second = app.state.ledger.process(request(r.id), &admin()).await.unwrap();

    assert!(second.already_processed);
    assert_eq!(first.reference, second.reference);

    // Still exactly one payment row for the reservation.
    let payment = app
        .state
        .ledger
        .find_by_reservation(r.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(payment.reference, first.reference);
}

#[tokio::test]
async fn legacy_method_field_is_accepted_and_blank_falls_back_to_card() {
    let app = create_test_app();
    let room = seed_room(&app, "101", 50).await;
    let client = seed_client(&app, "11111111").await;
    let other = seed_client(&app, "22222222").await;

    let r = app
        .state
        .engine
        .create_or_update(
            draft(client.id, room.id, today() + Duration::days(1), today() + Duration::days(3)),
            &admin(),
        )
        .await
        .unwrap();

    let mut req = request(r.id);
    req.payment_method = Some("CASH".to_string());
    app.state.ledger.process(req, &admin()).await.unwrap();
    let payment = app
        .state
        .ledger
        .find_by_reservation(r.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(payment.method, "CASH");

    let room2 = seed_room(&app, "102", 80).await;
    let r2 = app
        .state
        .engine
        .create_or_update(
            draft(other.id, room2.id, today() + Duration::days(1), today() + Duration::days(3)),
            &admin(),
        )
        .await
        .unwrap();
    let mut req = request(r2.id);
    req.method = Some("   ".to_string());
    app.state.ledger.process(req, &admin()).await.unwrap();
    let payment = app
        .state
        .ledger
        .find_by_reservation(r2.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(payment.method, "CARD");
}

#[tokio::test]
async fn services_amount_is_added_to_the_total() {
    let app = create_test_app();
    let room = seed_room(&app, "101", 100).await;
    let client = seed_client(&app, "11111111").await;

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
            draft(client.id, room.id, today() + Duration::days(1), today() + Duration::days(2)),
            &admin(),
        )
        .await
        .unwrap();
    app.state
        .engine
        .assign_services(r.id, &[spa.id], &[], &admin())
        .await
        .unwrap();

    app.state.ledger.process(request(r.id), &admin()).await.unwrap();
    let payment = app
        .state
        .ledger
        .find_by_reservation(r.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(payment.base_amount, dec!(100));
    assert_eq!(payment.services_amount, dec!(25));
    assert_eq!(payment.total_amount, dec!(125));
}

#[tokio::test]
async fn invalid_requests_are_rejected() {
    let app = create_test_app();

    let err = app.state.ledger.process(request(0), &admin()).await.unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));

    let err = app.state.ledger.process(request(999), &admin()).await.unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));
}

#[tokio::test]
async fn paid_reservation_cannot_be_cancelled_only_finalized() {
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
    app.state.ledger.process(request(r.id), &admin()).await.unwrap();

    // No role bypasses the payment guard.
    let err = app.state.engine.cancel(r.id, &admin()).await.unwrap_err();
    assert!(matches!(err, EngineError::IllegalState(_)));
    let err = app.state.engine.cancel(r.id, &client_actor()).await.unwrap_err();
    assert!(matches!(err, EngineError::IllegalState(_)));

    let finalized = app.state.engine.finalize(r.id, &admin()).await.unwrap();
    assert_eq!(finalized.status, ReservationStatus::Finalized);
}
