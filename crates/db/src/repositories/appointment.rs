use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres, QueryBuilder};
use trimbook_core::errors::BookingResult;
use trimbook_core::models::appointment::Appointment;
use trimbook_core::models::window::{AppointmentFilter, PageRequest, APPOINTMENT_SORT_FIELDS};
use trimbook_core::store::AppointmentStore;
use uuid::Uuid;

use crate::models::DbAppointment;
use crate::repositories::{map_write_error, unavailable};
use crate::DbPool;

const APPOINTMENT_COLUMNS: &str = "id, customer_id, venue_id, provider_id, service_ids, \
     start_time, end_time, status, active, created_at, updated_at";

pub async fn insert_appointment(
    pool: &Pool<Postgres>,
    appointment: &Appointment,
) -> BookingResult<Appointment> {
    tracing::debug!(
        "Inserting appointment: id={}, venue={}, provider={}, start={}",
        appointment.id,
        appointment.venue_id,
        appointment.provider_id,
        appointment.start_time
    );

    let row = sqlx::query_as::<_, DbAppointment>(
        r#"
        INSERT INTO appointments
            (id, customer_id, venue_id, provider_id, service_ids,
             start_time, end_time, status, active, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING id, customer_id, venue_id, provider_id, service_ids,
                  start_time, end_time, status, active, created_at, updated_at
        "#,
    )
    .bind(appointment.id)
    .bind(appointment.customer_id)
    .bind(appointment.venue_id)
    .bind(appointment.provider_id)
    .bind(&appointment.service_ids)
    .bind(appointment.start_time)
    .bind(appointment.end_time)
    .bind(appointment.status.as_str())
    .bind(appointment.active)
    .bind(appointment.created_at)
    .bind(appointment.updated_at)
    .fetch_one(pool)
    .await
    .map_err(map_write_error)?;

    row.into_domain()
}

pub async fn get_appointment_by_id(
    pool: &Pool<Postgres>,
    id: Uuid,
) -> BookingResult<Option<Appointment>> {
    tracing::debug!("Getting appointment by id: {}", id);

    // Soft-deleted rows stay fetchable by id; only listings exclude them.
    let row = sqlx::query_as::<_, DbAppointment>(
        r#"
        SELECT id, customer_id, venue_id, provider_id, service_ids,
               start_time, end_time, status, active, created_at, updated_at
        FROM appointments
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(unavailable)?;

    row.map(DbAppointment::into_domain).transpose()
}

pub async fn save_appointment(
    pool: &Pool<Postgres>,
    appointment: &Appointment,
) -> BookingResult<Appointment> {
    tracing::debug!(
        "Saving appointment: id={}, status={}",
        appointment.id,
        appointment.status.as_str()
    );

    let row = sqlx::query_as::<_, DbAppointment>(
        r#"
        UPDATE appointments
        SET customer_id = $2, venue_id = $3, provider_id = $4, service_ids = $5,
            start_time = $6, end_time = $7, status = $8, active = $9, updated_at = $10
        WHERE id = $1
        RETURNING id, customer_id, venue_id, provider_id, service_ids,
                  start_time, end_time, status, active, created_at, updated_at
        "#,
    )
    .bind(appointment.id)
    .bind(appointment.customer_id)
    .bind(appointment.venue_id)
    .bind(appointment.provider_id)
    .bind(&appointment.service_ids)
    .bind(appointment.start_time)
    .bind(appointment.end_time)
    .bind(appointment.status.as_str())
    .bind(appointment.active)
    .bind(appointment.updated_at)
    .fetch_one(pool)
    .await
    .map_err(map_write_error)?;

    row.into_domain()
}

/// Two-sided intersection test over the active appointments of a
/// (venue, provider) pair.
pub async fn has_conflict(
    pool: &Pool<Postgres>,
    venue_id: Uuid,
    provider_id: Uuid,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
) -> BookingResult<bool> {
    let exists = sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS (
            SELECT 1
            FROM appointments
            WHERE venue_id = $1
              AND provider_id = $2
              AND active
              AND start_time < $4
              AND end_time > $3
        );
        "#,
    )
    .bind(venue_id)
    .bind(provider_id)
    .bind(start_time)
    .bind(end_time)
    .fetch_one(pool)
    .await
    .map_err(unavailable)?;

    Ok(exists)
}

pub async fn list_appointments(
    pool: &Pool<Postgres>,
    filter: &AppointmentFilter,
    page: &PageRequest,
) -> BookingResult<(Vec<Appointment>, i64)> {
    // Guard the ORDER BY interpolation even though the composer validates
    // the sort field first.
    page.validate_sort(APPOINTMENT_SORT_FIELDS)?;

    tracing::debug!(
        "Listing appointments: take={}, skip={}, sort={}",
        page.take,
        page.skip,
        page.sort
    );

    let mut count_query =
        QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM appointments WHERE active");
    push_filters(&mut count_query, filter);
    let total: i64 = count_query
        .build_query_scalar()
        .fetch_one(pool)
        .await
        .map_err(unavailable)?;

    let mut page_query = QueryBuilder::<Postgres>::new(format!(
        "SELECT {} FROM appointments WHERE active",
        APPOINTMENT_COLUMNS
    ));
    push_filters(&mut page_query, filter);
    page_query.push(format!(" ORDER BY {} {}", page.sort, page.order.as_sql()));
    page_query.push(" LIMIT ");
    page_query.push_bind(page.take);
    page_query.push(" OFFSET ");
    page_query.push_bind(page.skip);

    let rows: Vec<DbAppointment> = page_query
        .build_query_as()
        .fetch_all(pool)
        .await
        .map_err(unavailable)?;

    let appointments = rows
        .into_iter()
        .map(DbAppointment::into_domain)
        .collect::<BookingResult<Vec<_>>>()?;

    Ok((appointments, total))
}

fn push_filters(query: &mut QueryBuilder<'_, Postgres>, filter: &AppointmentFilter) {
    if let Some(customer_id) = filter.customer_id {
        query.push(" AND customer_id = ");
        query.push_bind(customer_id);
    }
    if let Some(provider_id) = filter.provider_id {
        query.push(" AND provider_id = ");
        query.push_bind(provider_id);
    }
    if let Some(venue_id) = filter.venue_id {
        query.push(" AND venue_id = ");
        query.push_bind(venue_id);
    }
    if let Some(status) = filter.status {
        query.push(" AND status = ");
        query.push_bind(status.as_str());
    }
}

/// sqlx-backed [`AppointmentStore`].
pub struct PgAppointmentStore {
    pool: DbPool,
}

impl PgAppointmentStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AppointmentStore for PgAppointmentStore {
    async fn insert(&self, appointment: &Appointment) -> BookingResult<Appointment> {
        insert_appointment(&self.pool, appointment).await
    }

    async fn find_by_id(&self, id: Uuid) -> BookingResult<Option<Appointment>> {
        get_appointment_by_id(&self.pool, id).await
    }

    async fn save(&self, appointment: &Appointment) -> BookingResult<Appointment> {
        save_appointment(&self.pool, appointment).await
    }

    async fn has_conflict(
        &self,
        venue_id: Uuid,
        provider_id: Uuid,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> BookingResult<bool> {
        has_conflict(&self.pool, venue_id, provider_id, start_time, end_time).await
    }

    async fn list(
        &self,
        filter: &AppointmentFilter,
        page: &PageRequest,
    ) -> BookingResult<(Vec<Appointment>, i64)> {
        list_appointments(&self.pool, filter, page).await
    }
}
