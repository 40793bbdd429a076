//! Catalog service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;

use innkeeper::{
    access::{AccessGrant, AccessLevel},
    hotels::{Hotel, Room, RoomType},
    operators::{Operator, OperatorUuid},
};

use crate::{
    access::repository::PgAccessRepository,
    catalog::{
        data::{NewHotel, NewOperator, NewRoom, NewRoomType},
        errors::CatalogServiceError,
        repository::PgCatalogRepository,
    },
    database::Db,
};

/// PostgreSQL-backed catalog service.
#[derive(Debug, Clone)]
pub struct PgCatalogService {
    db: Db,
    repository: PgCatalogRepository,
    access: PgAccessRepository,
}

impl PgCatalogService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCatalogRepository::new(),
            access: PgAccessRepository::new(),
        }
    }
}

#[async_trait]
impl CatalogService for PgCatalogService {
    async fn create_operator(
        &self,
        operator: NewOperator,
    ) -> Result<Operator, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.insert_operator(&mut tx, &operator).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn find_operator(
        &self,
        operator: OperatorUuid,
    ) -> Result<Option<Operator>, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let found = self.repository.find_operator(&mut tx, operator).await?;

        tx.commit().await?;

        Ok(found)
    }

    async fn create_hotel(
        &self,
        creator: OperatorUuid,
        hotel: NewHotel,
    ) -> Result<Hotel, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.insert_hotel(&mut tx, &hotel).await?;

        // The creator becomes the hotel's first owner, atomically with the
        // hotel itself.
        self.access
            .insert_grant(
                &mut tx,
                &AccessGrant {
                    operator: creator,
                    hotel: created.uuid,
                    level: AccessLevel::Owner,
                    granted_at: Timestamp::now(),
                    granted_by: Some(creator),
                },
            )
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn create_room_type(
        &self,
        room_type: NewRoomType,
    ) -> Result<RoomType, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.insert_room_type(&mut tx, &room_type).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn create_room(&self, room: NewRoom) -> Result<Room, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.insert_room(&mut tx, &room).await?;

        tx.commit().await?;

        Ok(created)
    }
}

#[automock]
#[async_trait]
/// Operator, hotel and room administration.
pub trait CatalogService: Send + Sync {
    /// Creates a new operator.
    async fn create_operator(&self, operator: NewOperator)
        -> Result<Operator, CatalogServiceError>;

    /// Looks up an operator.
    async fn find_operator(
        &self,
        operator: OperatorUuid,
    ) -> Result<Option<Operator>, CatalogServiceError>;

    /// Creates a new hotel; the creator receives an `OWNER` grant for it.
    async fn create_hotel(
        &self,
        creator: OperatorUuid,
        hotel: NewHotel,
    ) -> Result<Hotel, CatalogServiceError>;

    /// Creates a new room type.
    async fn create_room_type(
        &self,
        room_type: NewRoomType,
    ) -> Result<RoomType, CatalogServiceError>;

    /// Creates a new room.
    async fn create_room(&self, room: NewRoom) -> Result<Room, CatalogServiceError>;
}
