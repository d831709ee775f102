use std::fmt;

use thiserror::Error;

/// The kind of record a lookup failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Customer,
    Venue,
    Provider,
    Service,
    Appointment,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Customer => "customer",
            EntityKind::Venue => "venue",
            EntityKind::Provider => "provider",
            EntityKind::Service => "service",
            EntityKind::Appointment => "appointment",
        };
        write!(f, "{}", name)
    }
}

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("{0} with this id not found")]
    NotFound(EntityKind),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("storage unavailable: {0}")]
    Unavailable(#[from] eyre::Report),

    #[error("internal error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

pub type BookingResult<T> = Result<T, BookingError>;
