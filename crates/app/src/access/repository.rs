//! Access Grants Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use innkeeper::{
    access::{AccessGrant, AccessLevel},
    hotels::HotelUuid,
    operators::OperatorUuid,
};

const FIND_GRANT_SQL: &str = include_str!("sql/find_grant.sql");
const FIND_GRANT_WITH_LEVELS_SQL: &str = include_str!("sql/find_grant_with_levels.sql");
const INSERT_GRANT_SQL: &str = include_str!("sql/insert_grant.sql");
const DELETE_GRANT_SQL: &str = include_str!("sql/delete_grant.sql");
const LIST_GRANTS_FOR_OPERATOR_SQL: &str = include_str!("sql/list_grants_for_operator.sql");
const LIST_GRANTS_FOR_HOTEL_SQL: &str = include_str!("sql/list_grants_for_hotel.sql");

/// PostgreSQL-backed access grants repository.
#[derive(Debug, Clone, Default)]
pub(crate) struct PgAccessRepository;

impl PgAccessRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn find_grant(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        operator: OperatorUuid,
        hotel: HotelUuid,
    ) -> Result<Option<AccessGrant>, sqlx::Error> {
        query_as::<Postgres, GrantRow>(FIND_GRANT_SQL)
            .bind(operator.into_uuid())
            .bind(hotel.into_uuid())
            .fetch_optional(&mut **tx)
            .await
            .map(|row| row.map(GrantRow::into_grant))
    }

    /// Looks up the grant for the pair, restricted to the given level set.
    pub(crate) async fn find_grant_with_levels(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        operator: OperatorUuid,
        hotel: HotelUuid,
        levels: &[AccessLevel],
    ) -> Result<Option<AccessGrant>, sqlx::Error> {
        let names: Vec<String> = levels
            .iter()
            .map(|level| level.as_str().to_string())
            .collect();

        query_as::<Postgres, GrantRow>(FIND_GRANT_WITH_LEVELS_SQL)
            .bind(operator.into_uuid())
            .bind(hotel.into_uuid())
            .bind(names)
            .fetch_optional(&mut **tx)
            .await
            .map(|row| row.map(GrantRow::into_grant))
    }

    pub(crate) async fn insert_grant(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        grant: &AccessGrant,
    ) -> Result<AccessGrant, sqlx::Error> {
        query_as::<Postgres, GrantRow>(INSERT_GRANT_SQL)
            .bind(grant.operator.into_uuid())
            .bind(grant.hotel.into_uuid())
            .bind(grant.level.as_str())
            .bind(SqlxTimestamp::from(grant.granted_at))
            .bind(grant.granted_by.map(Uuid::from))
            .fetch_one(&mut **tx)
            .await
            .map(GrantRow::into_grant)
    }

    pub(crate) async fn delete_grant(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        operator: OperatorUuid,
        hotel: HotelUuid,
    ) -> Result<u64, sqlx::Error> {
        let result = query(DELETE_GRANT_SQL)
            .bind(operator.into_uuid())
            .bind(hotel.into_uuid())
            .execute(&mut **tx)
            .await?;

        Ok(result.rows_affected())
    }

    pub(crate) async fn list_grants_for_operator(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        operator: OperatorUuid,
    ) -> Result<Vec<AccessGrant>, sqlx::Error> {
        query_as::<Postgres, GrantRow>(LIST_GRANTS_FOR_OPERATOR_SQL)
            .bind(operator.into_uuid())
            .fetch_all(&mut **tx)
            .await
            .map(|rows| rows.into_iter().map(GrantRow::into_grant).collect())
    }

    pub(crate) async fn list_grants_for_hotel(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        hotel: HotelUuid,
    ) -> Result<Vec<AccessGrant>, sqlx::Error> {
        query_as::<Postgres, GrantRow>(LIST_GRANTS_FOR_HOTEL_SQL)
            .bind(hotel.into_uuid())
            .fetch_all(&mut **tx)
            .await
            .map(|rows| rows.into_iter().map(GrantRow::into_grant).collect())
    }
}

struct GrantRow {
    operator_uuid: Uuid,
    hotel_uuid: Uuid,
    level: AccessLevel,
    granted_at: SqlxTimestamp,
    granted_by: Option<Uuid>,
}

impl GrantRow {
    fn into_grant(self) -> AccessGrant {
        AccessGrant {
            operator: OperatorUuid::from_uuid(self.operator_uuid),
            hotel: HotelUuid::from_uuid(self.hotel_uuid),
            level: self.level,
            granted_at: self.granted_at.to_jiff(),
            granted_by: self.granted_by.map(Into::into),
        }
    }
}

impl<'r> FromRow<'r, PgRow> for GrantRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let level: String = row.try_get("level")?;
        let level = level
            .parse::<AccessLevel>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "level".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            operator_uuid: row.try_get("operator_uuid")?,
            hotel_uuid: row.try_get("hotel_uuid")?,
            level,
            granted_at: row.try_get("granted_at")?,
            granted_by: row.try_get("granted_by")?,
        })
    }
}
