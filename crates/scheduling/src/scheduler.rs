//! Appointment lifecycle orchestration: create, update, get, cancel.
//!
//! `create` resolves every referenced entity concurrently, derives the
//! appointment interval from the service duration, and runs the conflict
//! check before persisting. The storage layer's exclusion constraint backs
//! the check up: two concurrent creates for the same (venue, provider) slot
//! can both pass the in-process check, but only one insert commits, and the
//! loser surfaces the same `Conflict` error.

use std::future::Future;

use serde_json::json;
use trimbook_core::audit::AuditSink;
use trimbook_core::errors::{BookingError, BookingResult, EntityKind};
use trimbook_core::models::appointment::{
    appointment_end, Appointment, CreateAppointmentRequest, UpdateAppointmentRequest,
};
use trimbook_core::store::{AppointmentStore, Directory};
use uuid::Uuid;

pub struct Scheduler<D, S, A> {
    pub(crate) directory: D,
    pub(crate) store: S,
    pub(crate) audit: A,
}

impl<D, S, A> Scheduler<D, S, A>
where
    D: Directory,
    S: AppointmentStore,
    A: AuditSink,
{
    pub fn new(directory: D, store: S, audit: A) -> Self {
        Self {
            directory,
            store,
            audit,
        }
    }

    /// Books a new appointment. Fails with `NotFound` when any referenced
    /// entity is missing and `Conflict` when the slot is taken; nothing is
    /// persisted in either case.
    pub async fn create(&self, request: CreateAppointmentRequest) -> BookingResult<Appointment> {
        let (customer, venue, provider, service) = tokio::try_join!(
            resolve(
                self.directory.customer_by_id(request.customer_id),
                EntityKind::Customer,
            ),
            resolve(self.directory.venue_by_id(request.venue_id), EntityKind::Venue),
            resolve(
                self.directory.provider_by_id(request.provider_id),
                EntityKind::Provider,
            ),
            resolve(
                self.directory.service_by_id(request.service_id),
                EntityKind::Service,
            ),
        )?;

        let start_time = request.start_time;
        let end_time = appointment_end(start_time, service.duration_minutes);
        if end_time <= start_time {
            return Err(BookingError::InvalidInput(
                "appointment must end after it starts".to_string(),
            ));
        }

        if self
            .store
            .has_conflict(venue.id, provider.id, start_time, end_time)
            .await?
        {
            return Err(BookingError::Conflict("time not available".to_string()));
        }

        let appointment = Appointment::new(
            customer.id,
            venue.id,
            provider.id,
            vec![service.id],
            start_time,
            end_time,
        );
        let saved = self.store.insert(&appointment).await?;

        self.audit.record(
            "SCHEDULING_CREATED",
            customer.id,
            Some(json!({
                "appointmentId": saved.id,
                "venueId": venue.id,
                "providerId": provider.id,
                "start": saved.start_time,
            })),
        );
        tracing::info!(
            "Appointment created: id={}, venue={}, provider={}",
            saved.id,
            venue.id,
            provider.id
        );

        Ok(saved)
    }

    /// Replaces the supplied fields of an existing appointment. Referenced
    /// entities and the interval are not re-validated in process; the
    /// storage constraints reject a broken reference (`NotFound`) or an
    /// overlapping interval (`Conflict`) on save.
    pub async fn update(
        &self,
        id: Uuid,
        update: UpdateAppointmentRequest,
    ) -> BookingResult<Appointment> {
        let mut appointment = self.load(id).await?;

        appointment.apply_update(&update)?;

        self.store.save(&appointment).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> BookingResult<Appointment> {
        self.load(id).await
    }

    /// Soft-deletes an appointment: the row is retained with
    /// `status = cancelled` and `active = false`, leaving the slot free for
    /// new bookings. Cancelling an already-cancelled appointment is a no-op.
    pub async fn cancel(&self, id: Uuid) -> BookingResult<Appointment> {
        let mut appointment = self.load(id).await?;

        let original_start = appointment.start_time;
        appointment.cancel();
        let saved = self.store.save(&appointment).await?;

        self.audit.record(
            "SCHEDULING_CANCELLED",
            id,
            Some(json!({ "start": original_start })),
        );
        tracing::info!("Appointment cancelled: id={}", id);

        Ok(saved)
    }

    async fn load(&self, id: Uuid) -> BookingResult<Appointment> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(BookingError::NotFound(EntityKind::Appointment))
    }
}

async fn resolve<T>(
    lookup: impl Future<Output = BookingResult<Option<T>>>,
    kind: EntityKind,
) -> BookingResult<T> {
    lookup.await?.ok_or(BookingError::NotFound(kind))
}
