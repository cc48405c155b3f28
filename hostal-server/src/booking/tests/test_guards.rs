use super::*;
use crate::booking::EngineError;
use chrono::Duration;

#[tokio::test]
async fn client_with_blocking_reservation_cannot_be_deleted() {
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

    let err = app.state.clients.delete(client.id, &admin()).await.unwrap_err();
    let EngineError::ClientHasActiveReservations { client_id, blocking } = err else {
        panic!("expected structured conflict");
    };
    assert_eq!(client_id, client.id);
    assert_eq!(blocking.len(), 1);
    assert_eq!(blocking[0].id, r.id);
    assert_eq!(blocking[0].room_number, "101");
    assert_eq!(blocking[0].status, "PENDING");

    // The client and the reservation both survive the refused deletion.
    assert!(app.state.clients.find_by_id(client.id).await.unwrap().is_some());
    assert!(
        app.state
            .stores
            .reservations
            .find_by_id(r.id)
            .await
            .unwrap()
            .is_some()
    );
}

#[tokio::test]
async fn conflict_lists_exactly_the_blocking_reservations() {
    let app = create_test_app();
    let room = seed_room(&app, "101", 50).await;
    let room2 = seed_room(&app, "102", 80).await;
    let client = seed_client(&app, "11111111").await;

    let pending = app
        .state
        .engine
        .create_or_update(
            draft(client.id, room.id, today() + Duration::days(1), today() + Duration::days(3)),
            &admin(),
        )
        .await
        .unwrap();
    let cancelled = app
        .state
        .engine
        .create_or_update(
            draft(client.id, room2.id, today() + Duration::days(1), today() + Duration::days(3)),
            &admin(),
        )
        .await
        .unwrap();
    app.state.engine.cancel(cancelled.id, &admin()).await.unwrap();

    let err = app.state.clients.delete(client.id, &admin()).await.unwrap_err();
    let EngineError::ClientHasActiveReservations { blocking, .. } = err else {
        panic!("expected structured conflict");
    };
    let ids: Vec<i64> = blocking.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![pending.id]);
}

#[tokio::test]
async fn client_with_only_terminal_reservations_is_deleted_with_cascade() {
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
    app.state.engine.cancel(r.id, &admin()).await.unwrap();

    app.state.clients.delete(client.id, &admin()).await.unwrap();

    assert!(app.state.clients.find_by_id(client.id).await.unwrap().is_none());
    assert!(
        app.state
            .stores
            .reservations
            .find_by_id(r.id)
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn client_without_reservations_is_deleted() {
    let app = create_test_app();
    let client = seed_client(&app, "11111111").await;

    app.state.clients.delete(client.id, &admin()).await.unwrap();
    assert!(app.state.clients.find_by_id(client.id).await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_national_id_and_email_are_refused() {
    let app = create_test_app();
    seed_client(&app, "11111111").await;

    let err = app
        .state
        .clients
        .create(
            crate::registry::ClientDraft {
                first_names: "Ana".to_string(),
                last_names: "Diaz".to_string(),
                national_id: "11111111".to_string(),
                nationality: None,
                email: None,
                phone: None,
            },
            &admin(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));
}

#[tokio::test]
async fn national_id_must_be_eight_digits() {
    let app = create_test_app();

    let err = app
        .state
        .clients
        .create(
            crate::registry::ClientDraft {
                first_names: "Ana".to_string(),
                last_names: "Diaz".to_string(),
                national_id: "12AB5678".to_string(),
                nationality: None,
                email: None,
                phone: None,
            },
            &admin(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));
}

/// The availability check and the save are not one atomic step: two callers
/// can both pass the conflict check before either persists. The design
/// accepts this window; the reconciliation sweep restores room-status
/// consistency on the next cycle, and the winning reservation set is
/// whatever the store saw last.
#[tokio::test]
async fn check_then_act_window_is_a_known_gap() {
    let app = create_test_app();
    let room = seed_room(&app, "101", 50).await;
    let client = seed_client(&app, "11111111").await;

    // With sequential calls the second attempt is always refused; the gap
    // only opens between concurrent check and save.
    app.state
        .engine
        .create_or_update(
            draft(client.id, room.id, today() + Duration::days(1), today() + Duration::days(3)),
            &admin(),
        )
        .await
        .unwrap();
    assert!(
        app.state
            .engine
            .create_or_update(
                draft(client.id, room.id, today() + Duration::days(1), today() + Duration::days(3)),
                &admin(),
            )
            .await
            .is_err()
    );
}
