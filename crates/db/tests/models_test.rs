use chrono::{Duration, TimeZone, Utc};
use pretty_assertions::assert_eq;
use rstest::rstest;
use trimbook_core::errors::BookingError;
use trimbook_core::models::appointment::AppointmentStatus;
use trimbook_core::models::directory::{ServiceOffering, Venue};
use trimbook_db::models::{DbAppointment, DbServiceOffering, DbVenue};
use uuid::Uuid;

fn appointment_row(status: &str) -> DbAppointment {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
    let now = Utc::now();
    DbAppointment {
        id: Uuid::new_v4(),
        customer_id: Uuid::new_v4(),
        venue_id: Uuid::new_v4(),
        provider_id: Uuid::new_v4(),
        service_ids: vec![Uuid::new_v4()],
        start_time: start,
        end_time: start + Duration::minutes(30),
        status: status.to_string(),
        active: true,
        created_at: now,
        updated_at: now,
    }
}

#[rstest]
#[case("pending", AppointmentStatus::Pending)]
#[case("confirmed", AppointmentStatus::Confirmed)]
#[case("cancelled", AppointmentStatus::Cancelled)]
fn test_row_status_maps_to_domain(#[case] stored: &str, #[case] expected: AppointmentStatus) {
    let appointment = appointment_row(stored).into_domain().unwrap();

    assert_eq!(appointment.status, expected);
}

#[test]
fn test_row_with_unknown_status_is_rejected() {
    let result = appointment_row("rescheduled").into_domain();

    assert!(matches!(result, Err(BookingError::InvalidInput(_))));
}

#[test]
fn test_row_conversion_preserves_fields() {
    let row = appointment_row("pending");
    let id = row.id;
    let service_ids = row.service_ids.clone();
    let start_time = row.start_time;
    let end_time = row.end_time;

    let appointment = row.into_domain().unwrap();

    assert_eq!(appointment.id, id);
    assert_eq!(appointment.service_ids, service_ids);
    assert_eq!(appointment.start_time, start_time);
    assert_eq!(appointment.end_time, end_time);
    assert!(appointment.active);
}

#[test]
fn test_venue_row_conversion() {
    let row = DbVenue {
        id: Uuid::new_v4(),
        name: "Corner Cuts".to_string(),
        document: "12345678000190".to_string(),
        active: true,
        created_at: Utc::now(),
    };
    let id = row.id;

    let venue: Venue = row.into();

    assert_eq!(venue.id, id);
    assert_eq!(venue.name, "Corner Cuts");
    assert_eq!(venue.document, "12345678000190");
    assert!(venue.active);
}

#[test]
fn test_service_row_keeps_undeclared_duration() {
    let row = DbServiceOffering {
        id: Uuid::new_v4(),
        name: "Haircut".to_string(),
        price_cents: Some(4500),
        duration_minutes: None,
        active: true,
        created_at: Utc::now(),
    };

    let service: ServiceOffering = row.into();

    assert_eq!(service.duration_minutes, None);
    assert_eq!(service.price_cents, Some(4500));
}
