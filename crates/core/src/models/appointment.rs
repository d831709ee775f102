use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{BookingError, BookingResult};

/// Appointment duration applied when a service declares none.
pub const DEFAULT_DURATION_MINUTES: i64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(value: &str) -> BookingResult<Self> {
        match value {
            "pending" => Ok(AppointmentStatus::Pending),
            "confirmed" => Ok(AppointmentStatus::Confirmed),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            other => Err(BookingError::InvalidInput(format!(
                "unknown appointment status: {}",
                other
            ))),
        }
    }
}

/// A booked time slot binding a customer, a venue, a provider, and the
/// ordered services to be performed.
///
/// `status` and `active` always move together: the only paths that touch
/// them are [`Appointment::cancel`] and [`Appointment::apply_update`], so the
/// soft-delete flag can never drift from the lifecycle state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub venue_id: Uuid,
    pub provider_id: Uuid,
    pub service_ids: Vec<Uuid>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: AppointmentStatus,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Appointment {
    pub fn new(
        customer_id: Uuid,
        venue_id: Uuid,
        provider_id: Uuid,
        service_ids: Vec<Uuid>,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            customer_id,
            venue_id,
            provider_id,
            service_ids,
            start_time,
            end_time,
            status: AppointmentStatus::Pending,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Marks the appointment cancelled. Terminal and idempotent: re-running
    /// leaves `status` and `active` unchanged.
    pub fn cancel(&mut self) {
        if self.status == AppointmentStatus::Cancelled {
            return;
        }
        self.status = AppointmentStatus::Cancelled;
        self.active = false;
        self.updated_at = Utc::now();
    }

    /// Applies the supplied fields of an update request. A new start shifts
    /// the interval preserving its duration; no transition leaves the
    /// cancelled state.
    pub fn apply_update(&mut self, update: &UpdateAppointmentRequest) -> BookingResult<()> {
        if let Some(status) = update.status {
            if self.status == AppointmentStatus::Cancelled && status != AppointmentStatus::Cancelled
            {
                return Err(BookingError::InvalidInput(
                    "a cancelled appointment cannot change status".to_string(),
                ));
            }
        }

        if let Some(venue_id) = update.venue_id {
            self.venue_id = venue_id;
        }
        if let Some(provider_id) = update.provider_id {
            self.provider_id = provider_id;
        }
        if let Some(service_id) = update.service_id {
            self.service_ids = vec![service_id];
        }
        if let Some(start_time) = update.start_time {
            let duration = self.end_time - self.start_time;
            self.start_time = start_time;
            self.end_time = start_time + duration;
        }
        if let Some(status) = update.status {
            match status {
                AppointmentStatus::Cancelled => self.cancel(),
                other => self.status = other,
            }
        }
        self.updated_at = Utc::now();

        Ok(())
    }
}

/// Two half-open intervals `[a_start, a_end)` and `[b_start, b_end)`
/// intersect iff each starts before the other ends. Back-to-back intervals
/// do not intersect.
pub fn overlaps(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && a_end > b_start
}

/// Computes the end of an appointment from its start and the service's
/// declared duration, falling back to [`DEFAULT_DURATION_MINUTES`].
pub fn appointment_end(
    start_time: DateTime<Utc>,
    duration_minutes: Option<i32>,
) -> DateTime<Utc> {
    let minutes = duration_minutes.map(i64::from).unwrap_or(DEFAULT_DURATION_MINUTES);
    start_time + Duration::minutes(minutes)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAppointmentRequest {
    pub customer_id: Uuid,
    pub venue_id: Uuid,
    pub provider_id: Uuid,
    pub service_id: Uuid,
    pub start_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAppointmentRequest {
    pub venue_id: Option<Uuid>,
    pub provider_id: Option<Uuid>,
    pub service_id: Option<Uuid>,
    pub start_time: Option<DateTime<Utc>>,
    pub status: Option<AppointmentStatus>,
}
