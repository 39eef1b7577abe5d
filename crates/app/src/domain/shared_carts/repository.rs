//! Shared Carts Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, types::Json};
use uuid::Uuid;

use crate::domain::shared_carts::{
    code::ShortCode,
    models::{CartSnapshot, CartStatus, CustomerInfo, SharedCart},
};

const CREATE_SHARED_CART_SQL: &str = include_str!("sql/create_shared_cart.sql");
const RESOLVE_SHARED_CART_SQL: &str = include_str!("sql/resolve_shared_cart.sql");
const GET_SHARED_CART_SQL: &str = include_str!("sql/get_shared_cart.sql");
const LIST_SHARED_CARTS_SQL: &str = include_str!("sql/list_shared_carts.sql");
const SET_STATUS_SQL: &str = include_str!("sql/set_status.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgSharedCartsRepository;

impl PgSharedCartsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_shared_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: Uuid,
        code: &ShortCode,
        cart: &CartSnapshot,
        customer: Option<&CustomerInfo>,
    ) -> Result<SharedCart, sqlx::Error> {
        query_as::<Postgres, SharedCart>(CREATE_SHARED_CART_SQL)
            .bind(uuid)
            .bind(code.as_str())
            .bind(Json(cart))
            .bind(customer.map(Json))
            .fetch_one(&mut **tx)
            .await
    }

    /// Bump the view counter and return the updated row in one statement,
    /// so concurrent resolutions never lose increments.
    pub(crate) async fn resolve_shared_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        code: &ShortCode,
    ) -> Result<SharedCart, sqlx::Error> {
        query_as::<Postgres, SharedCart>(RESOLVE_SHARED_CART_SQL)
            .bind(code.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_shared_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: Uuid,
    ) -> Result<SharedCart, sqlx::Error> {
        query_as::<Postgres, SharedCart>(GET_SHARED_CART_SQL)
            .bind(uuid)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_shared_carts(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<SharedCart>, sqlx::Error> {
        query_as::<Postgres, SharedCart>(LIST_SHARED_CARTS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn set_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: Uuid,
        status: CartStatus,
    ) -> Result<SharedCart, sqlx::Error> {
        query_as::<Postgres, SharedCart>(SET_STATUS_SQL)
            .bind(uuid)
            .bind(status.as_str())
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for SharedCart {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let short_code = try_get_parsed::<ShortCode>(row, "short_code")?;
        let status = try_get_parsed::<CartStatus>(row, "status")?;
        let views = try_get_counter(row, "views")?;

        Ok(Self {
            uuid: row.try_get("uuid")?,
            short_code,
            cart: row.try_get::<Json<CartSnapshot>, _>("cart_data")?.0,
            customer: row
                .try_get::<Option<Json<CustomerInfo>>, _>("customer_info")?
                .map(|json| json.0),
            status,
            views,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            expires_at: row.try_get::<SqlxTimestamp, _>("expires_at")?.to_jiff(),
        })
    }
}

fn try_get_parsed<T>(row: &PgRow, col: &str) -> Result<T, sqlx::Error>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw: String = row.try_get(col)?;

    raw.parse().map_err(|e: T::Err| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

fn try_get_counter(row: &PgRow, col: &str) -> Result<u64, sqlx::Error> {
    let value_i64: i64 = row.try_get(col)?;

    u64::try_from(value_i64).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}
