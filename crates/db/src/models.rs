use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use trimbook_core::errors::BookingResult;
use trimbook_core::models::appointment::{Appointment, AppointmentStatus};
use trimbook_core::models::directory::{Customer, Provider, ServiceOffering, Venue};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAppointment {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub venue_id: Uuid,
    pub provider_id: Uuid,
    pub service_ids: Vec<Uuid>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DbAppointment {
    pub fn into_domain(self) -> BookingResult<Appointment> {
        let status = AppointmentStatus::parse(&self.status)?;
        Ok(Appointment {
            id: self.id,
            customer_id: self.customer_id,
            venue_id: self.venue_id,
            provider_id: self.provider_id,
            service_ids: self.service_ids,
            start_time: self.start_time,
            end_time: self.end_time,
            status,
            active: self.active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbCustomer {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<DbCustomer> for Customer {
    fn from(row: DbCustomer) -> Self {
        Customer {
            id: row.id,
            name: row.name,
            email: row.email,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbVenue {
    pub id: Uuid,
    pub name: String,
    pub document: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<DbVenue> for Venue {
    fn from(row: DbVenue) -> Self {
        Venue {
            id: row.id,
            name: row.name,
            document: row.document,
            active: row.active,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbProvider {
    pub id: Uuid,
    pub name: String,
    pub document: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<DbProvider> for Provider {
    fn from(row: DbProvider) -> Self {
        Provider {
            id: row.id,
            name: row.name,
            document: row.document,
            active: row.active,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbServiceOffering {
    pub id: Uuid,
    pub name: String,
    pub price_cents: Option<i64>,
    pub duration_minutes: Option<i32>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<DbServiceOffering> for ServiceOffering {
    fn from(row: DbServiceOffering) -> Self {
        ServiceOffering {
            id: row.id,
            name: row.name,
            price_cents: row.price_cents,
            duration_minutes: row.duration_minutes,
            active: row.active,
        }
    }
}
