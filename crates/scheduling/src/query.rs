//! The windowed query composer: one listing pipeline reused by every
//! list-type operation. Validate the sort field, apply role scoping, fetch
//! the counted page, assemble the window with the shared cursor law.

use trimbook_core::audit::AuditSink;
use trimbook_core::errors::BookingResult;
use trimbook_core::models::appointment::Appointment;
use trimbook_core::models::directory::Venue;
use trimbook_core::models::window::{
    AppointmentFilter, PageRequest, RoleContext, VenueFilter, Window, APPOINTMENT_SORT_FIELDS,
    VENUE_SORT_FIELDS,
};
use trimbook_core::store::{AppointmentStore, Directory};

use crate::scheduler::Scheduler;

impl<D, S, A> Scheduler<D, S, A>
where
    D: Directory,
    S: AppointmentStore,
    A: AuditSink,
{
    /// Lists active appointments. An unprivileged customer is always scoped
    /// to their own appointments, whatever customer filter they requested.
    pub async fn list_appointments(
        &self,
        page: PageRequest,
        filter: AppointmentFilter,
        ctx: &RoleContext,
    ) -> BookingResult<Window<Appointment>> {
        page.validate_sort(APPOINTMENT_SORT_FIELDS)?;

        let filter = filter.scoped(ctx);
        let (items, total) = self.store.list(&filter, &page).await?;

        Ok(Window::assemble(items, total, page.take, page.skip))
    }

    /// Lists active venues, filtered by exact document match and
    /// case-insensitive name search.
    pub async fn list_venues(
        &self,
        page: PageRequest,
        filter: VenueFilter,
    ) -> BookingResult<Window<Venue>> {
        page.validate_sort(VENUE_SORT_FIELDS)?;

        let (items, total) = self.directory.list_venues(&filter, &page).await?;

        Ok(Window::assemble(items, total, page.take, page.skip))
    }
}
