//! Traits the scheduling engine consumes from its collaborators. The sqlx
//! implementations live in `trimbook-db`; tests substitute mockall mocks.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::errors::BookingResult;
use crate::models::appointment::Appointment;
use crate::models::directory::{Customer, Provider, ServiceOffering, Venue};
use crate::models::window::{AppointmentFilter, PageRequest, VenueFilter};

/// Resolves referenced records to full entities. Lookup-only; absence is the
/// `Ok(None)` case, an I/O failure is the error case.
#[async_trait]
pub trait Directory: Send + Sync {
    async fn customer_by_id(&self, id: Uuid) -> BookingResult<Option<Customer>>;

    async fn venue_by_id(&self, id: Uuid) -> BookingResult<Option<Venue>>;

    async fn provider_by_id(&self, id: Uuid) -> BookingResult<Option<Provider>>;

    async fn service_by_id(&self, id: Uuid) -> BookingResult<Option<ServiceOffering>>;

    /// Filtered, counted page of venues for the windowed listing protocol.
    async fn list_venues(
        &self,
        filter: &VenueFilter,
        page: &PageRequest,
    ) -> BookingResult<(Vec<Venue>, i64)>;
}

/// Persistence operations over the appointment collection.
#[async_trait]
pub trait AppointmentStore: Send + Sync {
    /// Persists a new appointment. The storage layer enforces the no-overlap
    /// invariant for active rows of a (venue, provider) pair and reports a
    /// violation as `BookingError::Conflict`, which closes the gap between
    /// the conflict check and the insert under concurrent creates.
    async fn insert(&self, appointment: &Appointment) -> BookingResult<Appointment>;

    /// Fetches by id, including soft-deleted rows.
    async fn find_by_id(&self, id: Uuid) -> BookingResult<Option<Appointment>>;

    /// Writes back every mutable field of an existing appointment.
    async fn save(&self, appointment: &Appointment) -> BookingResult<Appointment>;

    /// True iff an active appointment of the same (venue, provider) pair
    /// intersects `[start_time, end_time)`. Pure read.
    async fn has_conflict(
        &self,
        venue_id: Uuid,
        provider_id: Uuid,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> BookingResult<bool>;

    /// Filtered, counted page of active appointments.
    async fn list(
        &self,
        filter: &AppointmentFilter,
        page: &PageRequest,
    ) -> BookingResult<(Vec<Appointment>, i64)>;
}
