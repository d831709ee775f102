use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::mock;
use trimbook_core::audit::AuditSink;
use trimbook_core::errors::BookingResult;
use trimbook_core::models::appointment::Appointment;
use trimbook_core::models::directory::{Customer, Provider, ServiceOffering, Venue};
use trimbook_core::models::window::{AppointmentFilter, PageRequest, VenueFilter};
use trimbook_core::store::{AppointmentStore, Directory};
use uuid::Uuid;

// Mock collaborators for testing the scheduling engine
mock! {
    pub DirectoryStore {}

    #[async_trait]
    impl Directory for DirectoryStore {
        async fn customer_by_id(&self, id: Uuid) -> BookingResult<Option<Customer>>;

        async fn venue_by_id(&self, id: Uuid) -> BookingResult<Option<Venue>>;

        async fn provider_by_id(&self, id: Uuid) -> BookingResult<Option<Provider>>;

        async fn service_by_id(&self, id: Uuid) -> BookingResult<Option<ServiceOffering>>;

        async fn list_venues(
            &self,
            filter: &VenueFilter,
            page: &PageRequest,
        ) -> BookingResult<(Vec<Venue>, i64)>;
    }
}

mock! {
    pub Appointments {}

    #[async_trait]
    impl AppointmentStore for Appointments {
        async fn insert(&self, appointment: &Appointment) -> BookingResult<Appointment>;

        async fn find_by_id(&self, id: Uuid) -> BookingResult<Option<Appointment>>;

        async fn save(&self, appointment: &Appointment) -> BookingResult<Appointment>;

        async fn has_conflict(
            &self,
            venue_id: Uuid,
            provider_id: Uuid,
            start_time: DateTime<Utc>,
            end_time: DateTime<Utc>,
        ) -> BookingResult<bool>;

        async fn list(
            &self,
            filter: &AppointmentFilter,
            page: &PageRequest,
        ) -> BookingResult<(Vec<Appointment>, i64)>;
    }
}

mock! {
    pub Audit {}

    impl AuditSink for Audit {
        fn record(&self, action: &str, subject_id: Uuid, details: Option<serde_json::Value>);
    }
}
