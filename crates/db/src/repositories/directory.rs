use async_trait::async_trait;
use sqlx::{Pool, Postgres, QueryBuilder};
use trimbook_core::errors::BookingResult;
use trimbook_core::models::directory::{Customer, Provider, ServiceOffering, Venue};
use trimbook_core::models::window::{PageRequest, VenueFilter, VENUE_SORT_FIELDS};
use trimbook_core::store::Directory;
use uuid::Uuid;

use crate::models::{DbCustomer, DbProvider, DbServiceOffering, DbVenue};
use crate::repositories::unavailable;
use crate::DbPool;

pub async fn get_customer_by_id(
    pool: &Pool<Postgres>,
    id: Uuid,
) -> BookingResult<Option<Customer>> {
    let row = sqlx::query_as::<_, DbCustomer>(
        r#"
        SELECT id, name, email, created_at
        FROM customers
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(unavailable)?;

    Ok(row.map(Customer::from))
}

pub async fn get_venue_by_id(pool: &Pool<Postgres>, id: Uuid) -> BookingResult<Option<Venue>> {
    let row = sqlx::query_as::<_, DbVenue>(
        r#"
        SELECT id, name, document, active, created_at
        FROM venues
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(unavailable)?;

    Ok(row.map(Venue::from))
}

pub async fn get_provider_by_id(
    pool: &Pool<Postgres>,
    id: Uuid,
) -> BookingResult<Option<Provider>> {
    let row = sqlx::query_as::<_, DbProvider>(
        r#"
        SELECT id, name, document, active, created_at
        FROM providers
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(unavailable)?;

    Ok(row.map(Provider::from))
}

pub async fn get_service_by_id(
    pool: &Pool<Postgres>,
    id: Uuid,
) -> BookingResult<Option<ServiceOffering>> {
    let row = sqlx::query_as::<_, DbServiceOffering>(
        r#"
        SELECT id, name, price_cents, duration_minutes, active, created_at
        FROM services
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(unavailable)?;

    Ok(row.map(ServiceOffering::from))
}

pub async fn list_venues(
    pool: &Pool<Postgres>,
    filter: &VenueFilter,
    page: &PageRequest,
) -> BookingResult<(Vec<Venue>, i64)> {
    page.validate_sort(VENUE_SORT_FIELDS)?;

    tracing::debug!(
        "Listing venues: take={}, skip={}, sort={}",
        page.take,
        page.skip,
        page.sort
    );

    let mut count_query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM venues WHERE active");
    push_filters(&mut count_query, filter);
    let total: i64 = count_query
        .build_query_scalar()
        .fetch_one(pool)
        .await
        .map_err(unavailable)?;

    let mut page_query = QueryBuilder::<Postgres>::new(
        "SELECT id, name, document, active, created_at FROM venues WHERE active",
    );
    push_filters(&mut page_query, filter);
    page_query.push(format!(" ORDER BY {} {}", page.sort, page.order.as_sql()));
    page_query.push(" LIMIT ");
    page_query.push_bind(page.take);
    page_query.push(" OFFSET ");
    page_query.push_bind(page.skip);

    let rows: Vec<DbVenue> = page_query
        .build_query_as()
        .fetch_all(pool)
        .await
        .map_err(unavailable)?;

    Ok((rows.into_iter().map(Venue::from).collect(), total))
}

fn push_filters(query: &mut QueryBuilder<'_, Postgres>, filter: &VenueFilter) {
    if let Some(document) = &filter.document {
        query.push(" AND document = ");
        query.push_bind(document.clone());
    }
    if let Some(search) = &filter.search {
        query.push(" AND name ILIKE ");
        query.push_bind(format!("%{}%", search));
    }
}

/// sqlx-backed [`Directory`].
pub struct PgDirectory {
    pool: DbPool,
}

impl PgDirectory {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Directory for PgDirectory {
    async fn customer_by_id(&self, id: Uuid) -> BookingResult<Option<Customer>> {
        get_customer_by_id(&self.pool, id).await
    }

    async fn venue_by_id(&self, id: Uuid) -> BookingResult<Option<Venue>> {
        get_venue_by_id(&self.pool, id).await
    }

    async fn provider_by_id(&self, id: Uuid) -> BookingResult<Option<Provider>> {
        get_provider_by_id(&self.pool, id).await
    }

    async fn service_by_id(&self, id: Uuid) -> BookingResult<Option<ServiceOffering>> {
        get_service_by_id(&self.pool, id).await
    }

    async fn list_venues(
        &self,
        filter: &VenueFilter,
        page: &PageRequest,
    ) -> BookingResult<(Vec<Venue>, i64)> {
        list_venues(&self.pool, filter, page).await
    }
}
