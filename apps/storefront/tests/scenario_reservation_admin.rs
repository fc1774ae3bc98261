//! Scenario: a customer books a table and staff work through it.
//!
//! # Behaviour under test
//!
//! 1. The form starts with two guests, family kind, contact from the user.
//! 2. Invalid forms never reach the reservation desk.
//! 3. Filed reservations are pending, shown on the confirmation screen and
//!    listed first in the admin panel.
//! 4. Staff may move a reservation between any statuses.
//! 5. The dashboard counts seeded history plus the new reservation.

use std::time::Duration;

use chrono::{NaiveDate, TimeZone, Utc};

use delicia_core::{ReservationKind, ReservationStatus};
use storefront::commands::{admin, reservation, session};
use storefront::error::ErrorCode;
use storefront::state::ConfigState;
use storefront::Storefront;

fn storefront() -> Storefront {
    let mut config = ConfigState::default();
    config.mock.seed = Some(99);

    let now = Utc.with_ymd_and_hms(2024, 6, 5, 15, 0, 0).unwrap();
    let local = NaiveDate::from_ymd_opt(2024, 6, 5)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap();
    Storefront::new(config, now, local)
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 5).unwrap()
}

#[tokio::test(start_paused = true)]
async fn reservation_flow() {
    let sf = storefront();
    session::login(&sf.store, &sf.login).await.unwrap();

    let mut form = reservation::reservation_form(&sf.store);
    assert_eq!(form.guests, 2);
    assert_eq!(form.kind, ReservationKind::Family);
    assert_eq!(form.email, "joao@email.com");

    // no date yet
    let err = reservation::submit_reservation(&sf.store, &sf.desk, form.clone(), today())
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationError);
    assert!(reservation::latest_reservation(&sf.store).is_none());

    form.date = NaiveDate::from_ymd_opt(2024, 6, 22);
    form.time = "20:00".parse().ok();
    form.guests = 15;
    form.kind = ReservationKind::Corporate;

    let started = tokio::time::Instant::now();
    let booked = reservation::submit_reservation(&sf.store, &sf.desk, form, today())
        .await
        .unwrap();
    assert!(started.elapsed() >= Duration::from_millis(1500));

    assert!(booked.id.starts_with("RES-"));
    assert_eq!(booked.status, ReservationStatus::Pending);
    assert_eq!(reservation::latest_reservation(&sf.store), Some(booked.clone()));

    let listed = admin::list_reservations(&sf.store).unwrap();
    assert_eq!(listed.len(), 9);
    assert_eq!(listed[0].id, booked.id);

    let confirmed =
        admin::update_reservation_status(&sf.store, &booked.id, ReservationStatus::Confirmed)
            .unwrap();
    assert_eq!(confirmed.status, ReservationStatus::Confirmed);
    let cancelled =
        admin::update_reservation_status(&sf.store, &booked.id, ReservationStatus::Cancelled)
            .unwrap();
    assert_eq!(cancelled.status, ReservationStatus::Cancelled);

    let summary = admin::dashboard(&sf.store, today(), 7).unwrap();
    assert_eq!(summary.total_reservations, 9);
    assert_eq!(summary.total_orders, 15);
}

#[tokio::test(start_paused = true)]
async fn admin_panel_requires_sign_in() {
    let sf = storefront();

    let err = admin::dashboard(&sf.store, today(), 7).unwrap_err();
    assert_eq!(err.code, ErrorCode::LoginRequired);

    let err = admin::update_reservation_status(&sf.store, "RES-000000", ReservationStatus::Confirmed)
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::LoginRequired);
}
