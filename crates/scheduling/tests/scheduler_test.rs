use chrono::{Duration, TimeZone, Utc};
use pretty_assertions::assert_eq;
use trimbook_core::errors::{BookingError, EntityKind};
use trimbook_core::models::appointment::{
    Appointment, AppointmentStatus, CreateAppointmentRequest, UpdateAppointmentRequest,
};
use trimbook_core::models::directory::{Customer, Provider, ServiceOffering, Venue};
use trimbook_db::mock::repositories::{MockAppointments, MockAudit, MockDirectoryStore};
use trimbook_scheduling::Scheduler;
use uuid::Uuid;

struct Ids {
    customer: Uuid,
    venue: Uuid,
    provider: Uuid,
    service: Uuid,
}

impl Ids {
    fn new() -> Self {
        Self {
            customer: Uuid::new_v4(),
            venue: Uuid::new_v4(),
            provider: Uuid::new_v4(),
            service: Uuid::new_v4(),
        }
    }
}

fn customer(id: Uuid) -> Customer {
    Customer {
        id,
        name: "Jo Silva".to_string(),
        email: "jo@example.com".to_string(),
    }
}

fn venue(id: Uuid) -> Venue {
    Venue {
        id,
        name: "Corner Cuts".to_string(),
        document: "12345678000190".to_string(),
        active: true,
    }
}

fn provider(id: Uuid) -> Provider {
    Provider {
        id,
        name: "Sam".to_string(),
        document: "12345678901".to_string(),
        active: true,
    }
}

fn service(id: Uuid, duration_minutes: Option<i32>) -> ServiceOffering {
    ServiceOffering {
        id,
        name: "Haircut".to_string(),
        price_cents: Some(4500),
        duration_minutes,
        active: true,
    }
}

/// Directory that resolves every entity of `ids`, with the given service
/// duration.
fn full_directory(ids: &Ids, duration_minutes: Option<i32>) -> MockDirectoryStore {
    let mut directory = MockDirectoryStore::new();

    let record = customer(ids.customer);
    directory
        .expect_customer_by_id()
        .returning(move |_| Ok(Some(record.clone())));

    let record = venue(ids.venue);
    directory
        .expect_venue_by_id()
        .returning(move |_| Ok(Some(record.clone())));

    let record = provider(ids.provider);
    directory
        .expect_provider_by_id()
        .returning(move |_| Ok(Some(record.clone())));

    let record = service(ids.service, duration_minutes);
    directory
        .expect_service_by_id()
        .returning(move |_| Ok(Some(record.clone())));

    directory
}

fn create_request(ids: &Ids, start: chrono::DateTime<Utc>) -> CreateAppointmentRequest {
    CreateAppointmentRequest {
        customer_id: ids.customer,
        venue_id: ids.venue,
        provider_id: ids.provider,
        service_id: ids.service,
        start_time: start,
    }
}

fn stored_appointment(ids: &Ids, start: chrono::DateTime<Utc>, minutes: i64) -> Appointment {
    Appointment::new(
        ids.customer,
        ids.venue,
        ids.provider,
        vec![ids.service],
        start,
        start + Duration::minutes(minutes),
    )
}

#[test_log::test(tokio::test)]
async fn test_create_books_pending_appointment() {
    let ids = Ids::new();
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
    let expected_end = start + Duration::minutes(30);

    let directory = full_directory(&ids, Some(30));

    let mut store = MockAppointments::new();
    store
        .expect_has_conflict()
        .withf(move |_, _, s, e| *s == start && *e == expected_end)
        .times(1)
        .returning(|_, _, _, _| Ok(false));
    store
        .expect_insert()
        .times(1)
        .returning(|appointment| Ok(appointment.clone()));

    let mut audit = MockAudit::new();
    audit
        .expect_record()
        .withf(|action, _, _| action == "SCHEDULING_CREATED")
        .times(1)
        .return_const(());

    let scheduler = Scheduler::new(directory, store, audit);
    let appointment = scheduler.create(create_request(&ids, start)).await.unwrap();

    assert_eq!(appointment.status, AppointmentStatus::Pending);
    assert!(appointment.active);
    assert_eq!(appointment.customer_id, ids.customer);
    assert_eq!(appointment.service_ids, vec![ids.service]);
    assert_eq!(appointment.start_time, start);
    assert_eq!(appointment.end_time, expected_end);
}

#[tokio::test]
async fn test_create_defaults_to_sixty_minute_duration() {
    let ids = Ids::new();
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
    let expected_end = start + Duration::minutes(60);

    let directory = full_directory(&ids, None);

    let mut store = MockAppointments::new();
    store
        .expect_has_conflict()
        .withf(move |_, _, _, e| *e == expected_end)
        .times(1)
        .returning(|_, _, _, _| Ok(false));
    store
        .expect_insert()
        .returning(|appointment| Ok(appointment.clone()));

    let mut audit = MockAudit::new();
    audit.expect_record().return_const(());

    let scheduler = Scheduler::new(directory, store, audit);
    let appointment = scheduler.create(create_request(&ids, start)).await.unwrap();

    assert_eq!(appointment.end_time, expected_end);
}

#[tokio::test]
async fn test_create_fails_when_provider_missing() {
    let ids = Ids::new();
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();

    let mut directory = MockDirectoryStore::new();
    let record = customer(ids.customer);
    directory
        .expect_customer_by_id()
        .returning(move |_| Ok(Some(record.clone())));
    let record = venue(ids.venue);
    directory
        .expect_venue_by_id()
        .returning(move |_| Ok(Some(record.clone())));
    directory.expect_provider_by_id().returning(|_| Ok(None));
    let record = service(ids.service, Some(30));
    directory
        .expect_service_by_id()
        .returning(move |_| Ok(Some(record.clone())));

    let mut store = MockAppointments::new();
    store.expect_has_conflict().times(0);
    store.expect_insert().times(0);

    let mut audit = MockAudit::new();
    audit.expect_record().times(0);

    let scheduler = Scheduler::new(directory, store, audit);
    let result = scheduler.create(create_request(&ids, start)).await;

    assert!(matches!(
        result,
        Err(BookingError::NotFound(EntityKind::Provider))
    ));
}

#[tokio::test]
async fn test_create_fails_on_overlapping_slot() {
    // An existing 10:00-10:30 booking; the candidate starts at 10:15.
    let ids = Ids::new();
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 10, 15, 0).unwrap();

    let directory = full_directory(&ids, Some(30));

    let mut store = MockAppointments::new();
    store
        .expect_has_conflict()
        .times(1)
        .returning(|_, _, _, _| Ok(true));
    store.expect_insert().times(0);

    let mut audit = MockAudit::new();
    audit.expect_record().times(0);

    let scheduler = Scheduler::new(directory, store, audit);
    let result = scheduler.create(create_request(&ids, start)).await;

    match result {
        Err(BookingError::Conflict(reason)) => assert_eq!(reason, "time not available"),
        other => panic!("expected Conflict, got {:?}", other.map(|a| a.id)),
    }
}

#[tokio::test]
async fn test_create_back_to_back_slot_succeeds() {
    // The candidate starts exactly when the previous booking ends.
    let ids = Ids::new();
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 10, 30, 0).unwrap();

    let directory = full_directory(&ids, Some(30));

    let mut store = MockAppointments::new();
    store
        .expect_has_conflict()
        .withf(move |_, _, s, _| *s == start)
        .times(1)
        .returning(|_, _, _, _| Ok(false));
    store
        .expect_insert()
        .times(1)
        .returning(|appointment| Ok(appointment.clone()));

    let mut audit = MockAudit::new();
    audit.expect_record().return_const(());

    let scheduler = Scheduler::new(directory, store, audit);
    let appointment = scheduler.create(create_request(&ids, start)).await.unwrap();

    assert_eq!(appointment.start_time, start);
}

#[tokio::test]
async fn test_create_surfaces_conflict_from_storage_constraint() {
    // Two concurrent creates can both pass the in-process check; the loser
    // of the race gets the exclusion-constraint violation from the insert.
    let ids = Ids::new();
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();

    let directory = full_directory(&ids, Some(30));

    let mut store = MockAppointments::new();
    store
        .expect_has_conflict()
        .returning(|_, _, _, _| Ok(false));
    store
        .expect_insert()
        .times(1)
        .returning(|_| Err(BookingError::Conflict("time not available".to_string())));

    let mut audit = MockAudit::new();
    audit.expect_record().times(0);

    let scheduler = Scheduler::new(directory, store, audit);
    let result = scheduler.create(create_request(&ids, start)).await;

    assert!(matches!(result, Err(BookingError::Conflict(_))));
}

#[tokio::test]
async fn test_update_replaces_supplied_fields() {
    let ids = Ids::new();
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
    let existing = stored_appointment(&ids, start, 30);
    let appointment_id = existing.id;
    let new_provider = Uuid::new_v4();

    let directory = MockDirectoryStore::new();

    let mut store = MockAppointments::new();
    let found = existing.clone();
    store
        .expect_find_by_id()
        .withf(move |id| *id == appointment_id)
        .returning(move |_| Ok(Some(found.clone())));
    let untouched_venue = existing.venue_id;
    store
        .expect_save()
        .withf(move |a| a.provider_id == new_provider && a.venue_id == untouched_venue)
        .times(1)
        .returning(|appointment| Ok(appointment.clone()));

    let mut audit = MockAudit::new();
    audit.expect_record().times(0);

    let scheduler = Scheduler::new(directory, store, audit);
    let updated = scheduler
        .update(
            appointment_id,
            UpdateAppointmentRequest {
                provider_id: Some(new_provider),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.provider_id, new_provider);
}

#[tokio::test]
async fn test_update_missing_appointment_fails() {
    let directory = MockDirectoryStore::new();

    let mut store = MockAppointments::new();
    store.expect_find_by_id().returning(|_| Ok(None));
    store.expect_save().times(0);

    let mut audit = MockAudit::new();
    audit.expect_record().times(0);

    let scheduler = Scheduler::new(directory, store, audit);
    let result = scheduler
        .update(Uuid::new_v4(), UpdateAppointmentRequest::default())
        .await;

    assert!(matches!(
        result,
        Err(BookingError::NotFound(EntityKind::Appointment))
    ));
}

#[tokio::test]
async fn test_get_by_id_returns_soft_deleted_appointment() {
    let ids = Ids::new();
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
    let mut cancelled = stored_appointment(&ids, start, 30);
    cancelled.cancel();
    let appointment_id = cancelled.id;

    let directory = MockDirectoryStore::new();

    let mut store = MockAppointments::new();
    let found = cancelled.clone();
    store
        .expect_find_by_id()
        .returning(move |_| Ok(Some(found.clone())));

    let audit = MockAudit::new();

    let scheduler = Scheduler::new(directory, store, audit);
    let appointment = scheduler.get_by_id(appointment_id).await.unwrap();

    assert_eq!(appointment.status, AppointmentStatus::Cancelled);
    assert!(!appointment.active);
}

#[tokio::test]
async fn test_get_by_id_missing_appointment_fails() {
    let directory = MockDirectoryStore::new();

    let mut store = MockAppointments::new();
    store.expect_find_by_id().returning(|_| Ok(None));

    let audit = MockAudit::new();

    let scheduler = Scheduler::new(directory, store, audit);
    let result = scheduler.get_by_id(Uuid::new_v4()).await;

    assert!(matches!(
        result,
        Err(BookingError::NotFound(EntityKind::Appointment))
    ));
}

#[test_log::test(tokio::test)]
async fn test_cancel_soft_deletes_and_audits() {
    let ids = Ids::new();
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
    let existing = stored_appointment(&ids, start, 30);
    let appointment_id = existing.id;

    let directory = MockDirectoryStore::new();

    let mut store = MockAppointments::new();
    let found = existing.clone();
    store
        .expect_find_by_id()
        .returning(move |_| Ok(Some(found.clone())));
    store
        .expect_save()
        .withf(|a| a.status == AppointmentStatus::Cancelled && !a.active)
        .times(1)
        .returning(|appointment| Ok(appointment.clone()));

    let mut audit = MockAudit::new();
    audit
        .expect_record()
        .withf(move |action, subject, _| {
            action == "SCHEDULING_CANCELLED" && *subject == appointment_id
        })
        .times(1)
        .return_const(());

    let scheduler = Scheduler::new(directory, store, audit);
    let cancelled = scheduler.cancel(appointment_id).await.unwrap();

    assert_eq!(cancelled.status, AppointmentStatus::Cancelled);
    assert!(!cancelled.active);
}

#[tokio::test]
async fn test_cancel_is_a_noop_on_cancelled_appointment() {
    let ids = Ids::new();
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
    let mut existing = stored_appointment(&ids, start, 30);
    existing.cancel();
    let appointment_id = existing.id;

    let directory = MockDirectoryStore::new();

    let mut store = MockAppointments::new();
    let found = existing.clone();
    store
        .expect_find_by_id()
        .returning(move |_| Ok(Some(found.clone())));
    store
        .expect_save()
        .withf(|a| a.status == AppointmentStatus::Cancelled && !a.active)
        .times(1)
        .returning(|appointment| Ok(appointment.clone()));

    let mut audit = MockAudit::new();
    audit.expect_record().times(1).return_const(());

    let scheduler = Scheduler::new(directory, store, audit);
    let cancelled = scheduler.cancel(appointment_id).await.unwrap();

    assert_eq!(cancelled.status, AppointmentStatus::Cancelled);
    assert!(!cancelled.active);
}

#[tokio::test]
async fn test_cancel_missing_appointment_fails() {
    let directory = MockDirectoryStore::new();

    let mut store = MockAppointments::new();
    store.expect_find_by_id().returning(|_| Ok(None));
    store.expect_save().times(0);

    let mut audit = MockAudit::new();
    audit.expect_record().times(0);

    let scheduler = Scheduler::new(directory, store, audit);
    let result = scheduler.cancel(Uuid::new_v4()).await;

    assert!(matches!(
        result,
        Err(BookingError::NotFound(EntityKind::Appointment))
    ));
}
