//! Access service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;

use innkeeper::{
    access::{AccessGrant, AccessLevel},
    hotels::HotelUuid,
    operators::OperatorUuid,
};

use crate::{
    access::{
        data::NewAccessGrant, errors::AccessServiceError, repository::PgAccessRepository,
        MANAGE_LEVELS, OWNER_LEVELS,
    },
    database::Db,
};

/// PostgreSQL-backed access service.
#[derive(Debug, Clone)]
pub struct PgAccessService {
    db: Db,
    repository: PgAccessRepository,
}

impl PgAccessService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgAccessRepository::new(),
        }
    }

    async fn grant_for(
        &self,
        operator: OperatorUuid,
        hotel: HotelUuid,
        levels: Option<&[AccessLevel]>,
    ) -> Result<Option<AccessGrant>, AccessServiceError> {
        let mut tx = self.db.begin().await?;

        let grant = match levels {
            Some(levels) => {
                self.repository
                    .find_grant_with_levels(&mut tx, operator, hotel, levels)
                    .await?
            }
            None => self.repository.find_grant(&mut tx, operator, hotel).await?,
        };

        tx.commit().await?;

        Ok(grant)
    }
}

#[async_trait]
impl AccessService for PgAccessService {
    async fn has_access(
        &self,
        operator: OperatorUuid,
        hotel: HotelUuid,
    ) -> Result<bool, AccessServiceError> {
        self.grant_for(operator, hotel, None)
            .await
            .map(|grant| grant.is_some())
    }

    async fn can_manage_bookings(
        &self,
        operator: OperatorUuid,
        hotel: HotelUuid,
    ) -> Result<bool, AccessServiceError> {
        self.grant_for(operator, hotel, Some(&MANAGE_LEVELS))
            .await
            .map(|grant| grant.is_some())
    }

    async fn is_owner(
        &self,
        operator: OperatorUuid,
        hotel: HotelUuid,
    ) -> Result<bool, AccessServiceError> {
        self.grant_for(operator, hotel, Some(&OWNER_LEVELS))
            .await
            .map(|grant| grant.is_some())
    }

    async fn access_level(
        &self,
        operator: OperatorUuid,
        hotel: HotelUuid,
    ) -> Result<Option<AccessLevel>, AccessServiceError> {
        self.grant_for(operator, hotel, None)
            .await
            .map(|grant| grant.map(|g| g.level))
    }

    async fn grants_for_operator(
        &self,
        operator: OperatorUuid,
    ) -> Result<Vec<AccessGrant>, AccessServiceError> {
        let mut tx = self.db.begin().await?;

        let grants = self
            .repository
            .list_grants_for_operator(&mut tx, operator)
            .await?;

        tx.commit().await?;

        Ok(grants)
    }

    async fn grants_for_hotel(
        &self,
        hotel: HotelUuid,
    ) -> Result<Vec<AccessGrant>, AccessServiceError> {
        let mut tx = self.db.begin().await?;

        let grants = self.repository.list_grants_for_hotel(&mut tx, hotel).await?;

        tx.commit().await?;

        Ok(grants)
    }

    async fn grant_access(
        &self,
        acting: OperatorUuid,
        grant: NewAccessGrant,
    ) -> Result<AccessGrant, AccessServiceError> {
        let mut tx = self.db.begin().await?;

        let owner = self
            .repository
            .find_grant_with_levels(&mut tx, acting, grant.hotel, &OWNER_LEVELS)
            .await?;
        if owner.is_none() {
            return Err(AccessServiceError::AccessDenied);
        }

        let created = self
            .repository
            .insert_grant(
                &mut tx,
                &AccessGrant {
                    operator: grant.operator,
                    hotel: grant.hotel,
                    level: grant.level,
                    granted_at: Timestamp::now(),
                    granted_by: Some(acting),
                },
            )
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn revoke_access(
        &self,
        acting: OperatorUuid,
        operator: OperatorUuid,
        hotel: HotelUuid,
    ) -> Result<(), AccessServiceError> {
        let mut tx = self.db.begin().await?;

        let owner = self
            .repository
            .find_grant_with_levels(&mut tx, acting, hotel, &OWNER_LEVELS)
            .await?;
        if owner.is_none() {
            return Err(AccessServiceError::AccessDenied);
        }

        let rows_affected = self.repository.delete_grant(&mut tx, operator, hotel).await?;

        if rows_affected == 0 {
            return Err(AccessServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
/// Authorization queries and grant administration.
pub trait AccessService: Send + Sync {
    /// Whether any grant exists for the pair.
    async fn has_access(
        &self,
        operator: OperatorUuid,
        hotel: HotelUuid,
    ) -> Result<bool, AccessServiceError>;

    /// Whether the operator may manage the hotel's bookings.
    async fn can_manage_bookings(
        &self,
        operator: OperatorUuid,
        hotel: HotelUuid,
    ) -> Result<bool, AccessServiceError>;

    /// Whether the operator owns the hotel.
    async fn is_owner(
        &self,
        operator: OperatorUuid,
        hotel: HotelUuid,
    ) -> Result<bool, AccessServiceError>;

    /// The level granted to the operator for the hotel, if any.
    async fn access_level(
        &self,
        operator: OperatorUuid,
        hotel: HotelUuid,
    ) -> Result<Option<AccessLevel>, AccessServiceError>;

    /// All grants held by an operator.
    async fn grants_for_operator(
        &self,
        operator: OperatorUuid,
    ) -> Result<Vec<AccessGrant>, AccessServiceError>;

    /// All grants attached to a hotel.
    async fn grants_for_hotel(
        &self,
        hotel: HotelUuid,
    ) -> Result<Vec<AccessGrant>, AccessServiceError>;

    /// Issues a grant on behalf of `acting`, which must own the hotel.
    async fn grant_access(
        &self,
        acting: OperatorUuid,
        grant: NewAccessGrant,
    ) -> Result<AccessGrant, AccessServiceError>;

    /// Revokes a grant on behalf of `acting`, which must own the hotel.
    async fn revoke_access(
        &self,
        acting: OperatorUuid,
        operator: OperatorUuid,
        hotel: HotelUuid,
    ) -> Result<(), AccessServiceError>;
}
