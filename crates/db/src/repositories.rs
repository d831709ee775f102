pub mod appointment;
pub mod directory;

use trimbook_core::errors::{BookingError, EntityKind};

/// Wraps a sqlx failure as a transient storage error.
pub(crate) fn unavailable(err: sqlx::Error) -> BookingError {
    BookingError::Unavailable(eyre::Report::new(err))
}

/// Maps constraint violations raised by appointment writes onto the domain
/// taxonomy: the overlap exclusion constraint is a booking conflict, a
/// broken reference is a missing entity, a check violation is bad input.
pub(crate) fn map_write_error(err: sqlx::Error) -> BookingError {
    if let sqlx::Error::Database(db_err) = &err {
        match db_err.code().as_deref() {
            // exclusion_violation
            Some("23P01") => return BookingError::Conflict("time not available".to_string()),
            // foreign_key_violation
            Some("23503") => {
                return BookingError::NotFound(kind_for_constraint(db_err.constraint()));
            }
            // check_violation
            Some("23514") => return BookingError::InvalidInput(db_err.message().to_string()),
            _ => {}
        }
    }
    unavailable(err)
}

fn kind_for_constraint(constraint: Option<&str>) -> EntityKind {
    match constraint {
        Some(name) if name.contains("customer_id") => EntityKind::Customer,
        Some(name) if name.contains("venue_id") => EntityKind::Venue,
        Some(name) if name.contains("provider_id") => EntityKind::Provider,
        _ => EntityKind::Appointment,
    }
}
