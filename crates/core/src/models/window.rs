//! The windowed listing protocol shared by every list endpoint: page
//! request, role scoping, and the cursor law that computes the next offset.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{BookingError, BookingResult};
use crate::models::appointment::AppointmentStatus;

/// Sort fields that exist on appointment listings.
pub const APPOINTMENT_SORT_FIELDS: &[&str] =
    &["start_time", "end_time", "status", "created_at", "updated_at"];

/// Sort fields that exist on venue listings.
pub const VENUE_SORT_FIELDS: &[&str] = &["name", "document", "created_at"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    #[serde(rename = "ASC")]
    Asc,
    #[serde(rename = "DESC")]
    Desc,
}

impl SortOrder {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// One page of a listing: how many rows, from which offset, in which order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRequest {
    pub take: i64,
    pub skip: i64,
    pub sort: String,
    pub order: SortOrder,
}

impl PageRequest {
    pub fn new(take: i64, skip: i64, sort: impl Into<String>, order: SortOrder) -> Self {
        Self {
            take,
            skip,
            sort: sort.into(),
            order,
        }
    }

    /// Rejects sort fields that do not exist on the listed entity. Unknown
    /// fields are an error rather than silently ignored, so a typo in a
    /// caller does not change result ordering unnoticed.
    pub fn validate_sort(&self, allowed: &[&str]) -> BookingResult<()> {
        if allowed.contains(&self.sort.as_str()) {
            Ok(())
        } else {
            Err(BookingError::InvalidInput(format!(
                "unrecognized sort field: {}",
                self.sort
            )))
        }
    }
}

/// A page of results plus the cursor for the page after it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Window<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub next_skip: Option<i64>,
}

impl<T> Window<T> {
    /// The single pagination contract of the system: an empty page has no
    /// next cursor; otherwise the cursor advances by `take` unless the page
    /// reaches the end of the match set.
    pub fn assemble(items: Vec<T>, total: i64, take: i64, skip: i64) -> Self {
        let next_skip = if items.is_empty() {
            None
        } else {
            let remaining = total - take - skip;
            if remaining <= 0 {
                None
            } else {
                Some(skip + take)
            }
        };

        Self {
            items,
            total,
            next_skip,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Provider,
    Admin,
}

/// The caller's identity and privilege level, threaded explicitly into every
/// listing call.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RoleContext {
    pub actor_id: Uuid,
    pub role: Role,
}

impl RoleContext {
    pub fn new(actor_id: Uuid, role: Role) -> Self {
        Self { actor_id, role }
    }
}

/// Optional equality filters recognized for appointment listings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentFilter {
    pub customer_id: Option<Uuid>,
    pub provider_id: Option<Uuid>,
    pub venue_id: Option<Uuid>,
    pub status: Option<AppointmentStatus>,
}

impl AppointmentFilter {
    /// Applies role-based scoping: an unprivileged customer only ever sees
    /// their own appointments, whatever customer filter they asked for.
    pub fn scoped(mut self, ctx: &RoleContext) -> Self {
        if ctx.role == Role::Customer {
            self.customer_id = Some(ctx.actor_id);
        }
        self
    }
}

/// Optional filters recognized for venue listings: exact document match and
/// case-insensitive name substring search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueFilter {
    pub document: Option<String>,
    pub search: Option<String>,
}
