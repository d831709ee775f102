use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Venue {
    pub id: Uuid,
    pub name: String,
    /// National tax id of the business (CNPJ in the original deployment).
    pub document: String,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Provider {
    pub id: Uuid,
    pub name: String,
    pub document: String,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceOffering {
    pub id: Uuid,
    pub name: String,
    pub price_cents: Option<i64>,
    /// Declared length of the service; `None` means the booking engine
    /// applies its default duration.
    pub duration_minutes: Option<i32>,
    pub active: bool,
}
