//! Bookings service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::warn;

use innkeeper::{
    bookings::{refusal_reason, Booking, BookingStatus, BookingUuid, NewBooking},
    operators::OperatorUuid,
};

use crate::{
    access::{repository::PgAccessRepository, MANAGE_LEVELS},
    bookings::{errors::BookingsServiceError, repository::PgBookingsRepository},
    catalog::repository::PgCatalogRepository,
    database::Db,
};

/// PostgreSQL-backed bookings service.
#[derive(Debug, Clone)]
pub struct PgBookingsService {
    db: Db,
    bookings: PgBookingsRepository,
    access: PgAccessRepository,
    catalog: PgCatalogRepository,
}

impl PgBookingsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            bookings: PgBookingsRepository::new(),
            access: PgAccessRepository::new(),
            catalog: PgCatalogRepository::new(),
        }
    }

    async fn ensure_operator(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        operator: OperatorUuid,
    ) -> Result<(), BookingsServiceError> {
        if self.catalog.find_operator(tx, operator).await?.is_none() {
            return Err(BookingsServiceError::NotFound);
        }

        Ok(())
    }

    /// Writes a mutated booking back, guarded on the status observed at
    /// read. Losing the race to a concurrent transition reports
    /// `InvalidTransition` against the status now visible.
    async fn store_transition(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        booking: &Booking,
        prior: BookingStatus,
    ) -> Result<(), BookingsServiceError> {
        let rows_affected = self.bookings.apply_transition(tx, booking, prior).await?;

        if rows_affected == 0 {
            let (current, _) = self.bookings.find_booking(tx, booking.uuid).await?;

            warn!(
                booking = %booking.uuid,
                "transition lost to a concurrent update, booking is now {}",
                current.status
            );

            return Err(BookingsServiceError::InvalidTransition {
                from: current.status,
                to: booking.status,
            });
        }

        Ok(())
    }

    /// Resolves the booking and its hotel, then requires a managing grant.
    ///
    /// The booking is resolved first so that a nonexistent booking reports
    /// `NotFound` even to operators without any grant.
    async fn authorize_manage(
        &self,
        booking: BookingUuid,
        operator: OperatorUuid,
    ) -> Result<(), BookingsServiceError> {
        let mut tx = self.db.begin().await?;

        let (_, hotel) = self.bookings.find_booking(&mut tx, booking).await?;
        let grant = self
            .access
            .find_grant_with_levels(&mut tx, operator, hotel, &MANAGE_LEVELS)
            .await?;

        tx.commit().await?;

        if grant.is_none() {
            return Err(BookingsServiceError::AccessDenied);
        }

        Ok(())
    }

    async fn transition<F>(
        &self,
        booking: BookingUuid,
        operator: OperatorUuid,
        apply: F,
    ) -> Result<Booking, BookingsServiceError>
    where
        F: FnOnce(&mut Booking) -> Result<(), innkeeper::errors::EngineError> + Send,
    {
        let mut tx = self.db.begin().await?;

        let (mut record, _) = self.bookings.find_booking(&mut tx, booking).await?;
        self.ensure_operator(&mut tx, operator).await?;

        let prior = record.status;
        apply(&mut record)?;
        self.store_transition(&mut tx, &record, prior).await?;

        tx.commit().await?;

        Ok(record)
    }
}

#[async_trait]
impl BookingsService for PgBookingsService {
    async fn list_bookings(&self) -> Result<Vec<Booking>, BookingsServiceError> {
        let mut tx = self.db.begin().await?;

        let bookings = self.bookings.list_bookings(&mut tx).await?;

        tx.commit().await?;

        Ok(bookings)
    }

    async fn get_booking(&self, booking: BookingUuid) -> Result<Booking, BookingsServiceError> {
        let mut tx = self.db.begin().await?;

        let (record, _) = self.bookings.find_booking(&mut tx, booking).await?;

        tx.commit().await?;

        Ok(record)
    }

    async fn list_bookings_by_status(
        &self,
        status: BookingStatus,
    ) -> Result<Vec<Booking>, BookingsServiceError> {
        let mut tx = self.db.begin().await?;

        let bookings = self.bookings.list_bookings_by_status(&mut tx, status).await?;

        tx.commit().await?;

        Ok(bookings)
    }

    async fn list_bookings_for_operator(
        &self,
        operator: OperatorUuid,
    ) -> Result<Vec<Booking>, BookingsServiceError> {
        let mut tx = self.db.begin().await?;

        let bookings = self
            .bookings
            .list_bookings_for_operator(&mut tx, operator)
            .await?;

        tx.commit().await?;

        Ok(bookings)
    }

    async fn list_bookings_for_operator_by_status(
        &self,
        operator: OperatorUuid,
        status: BookingStatus,
    ) -> Result<Vec<Booking>, BookingsServiceError> {
        let mut tx = self.db.begin().await?;

        let bookings = self
            .bookings
            .list_bookings_for_operator_by_status(&mut tx, operator, status)
            .await?;

        tx.commit().await?;

        Ok(bookings)
    }

    async fn create_booking(&self, new: NewBooking) -> Result<Booking, BookingsServiceError> {
        // The stay window is validated before the store is touched.
        let record = Booking::create(new)?;

        let mut tx = self.db.begin().await?;

        self.bookings.insert_booking(&mut tx, &record).await?;
        let (stored, _) = self.bookings.find_booking(&mut tx, record.uuid).await?;

        tx.commit().await?;

        Ok(stored)
    }

    async fn confirm_booking(
        &self,
        booking: BookingUuid,
        operator: OperatorUuid,
    ) -> Result<Booking, BookingsServiceError> {
        self.transition(booking, operator, |record| {
            record.confirm(operator, Timestamp::now())
        })
        .await
    }

    async fn refuse_booking(
        &self,
        booking: BookingUuid,
        operator: OperatorUuid,
        reason: String,
    ) -> Result<Booking, BookingsServiceError> {
        // A blank reason fails before any lookup.
        refusal_reason(&reason)?;

        self.transition(booking, operator, |record| {
            record.refuse(operator, &reason, Timestamp::now())
        })
        .await
    }

    async fn complete_booking(
        &self,
        booking: BookingUuid,
        operator: OperatorUuid,
    ) -> Result<Booking, BookingsServiceError> {
        self.transition(booking, operator, |record| {
            record.complete(operator, Timestamp::now())
        })
        .await
    }

    async fn cancel_booking(
        &self,
        booking: BookingUuid,
        operator: OperatorUuid,
    ) -> Result<Booking, BookingsServiceError> {
        self.transition(booking, operator, |record| {
            record.cancel(operator, Timestamp::now())
        })
        .await
    }

    async fn confirm_booking_with_access_control(
        &self,
        booking: BookingUuid,
        operator: OperatorUuid,
    ) -> Result<Booking, BookingsServiceError> {
        self.authorize_manage(booking, operator).await?;
        self.confirm_booking(booking, operator).await
    }

    async fn refuse_booking_with_access_control(
        &self,
        booking: BookingUuid,
        operator: OperatorUuid,
        reason: String,
    ) -> Result<Booking, BookingsServiceError> {
        self.authorize_manage(booking, operator).await?;
        self.refuse_booking(booking, operator, reason).await
    }

    async fn complete_booking_with_access_control(
        &self,
        booking: BookingUuid,
        operator: OperatorUuid,
    ) -> Result<Booking, BookingsServiceError> {
        self.authorize_manage(booking, operator).await?;
        self.complete_booking(booking, operator).await
    }

    async fn cancel_booking_with_access_control(
        &self,
        booking: BookingUuid,
        operator: OperatorUuid,
    ) -> Result<Booking, BookingsServiceError> {
        self.authorize_manage(booking, operator).await?;
        self.cancel_booking(booking, operator).await
    }
}

#[automock]
#[async_trait]
/// Booking lifecycle and query operations.
pub trait BookingsService: Send + Sync {
    /// Every booking, unscoped. Trusted administrative read.
    async fn list_bookings(&self) -> Result<Vec<Booking>, BookingsServiceError>;

    /// Retrieve a single booking.
    async fn get_booking(&self, booking: BookingUuid) -> Result<Booking, BookingsServiceError>;

    /// Every booking in one status, unscoped. Trusted administrative read.
    async fn list_bookings_by_status(
        &self,
        status: BookingStatus,
    ) -> Result<Vec<Booking>, BookingsServiceError>;

    /// Every booking whose hotel has any grant for the operator.
    async fn list_bookings_for_operator(
        &self,
        operator: OperatorUuid,
    ) -> Result<Vec<Booking>, BookingsServiceError>;

    /// The visible set, filtered to one status.
    async fn list_bookings_for_operator_by_status(
        &self,
        operator: OperatorUuid,
        status: BookingStatus,
    ) -> Result<Vec<Booking>, BookingsServiceError>;

    /// Creates a `CREATED` booking for an existing room.
    async fn create_booking(&self, new: NewBooking) -> Result<Booking, BookingsServiceError>;

    /// Confirms a `CREATED` booking.
    async fn confirm_booking(
        &self,
        booking: BookingUuid,
        operator: OperatorUuid,
    ) -> Result<Booking, BookingsServiceError>;

    /// Refuses a `CREATED` booking, storing the trimmed reason.
    async fn refuse_booking(
        &self,
        booking: BookingUuid,
        operator: OperatorUuid,
        reason: String,
    ) -> Result<Booking, BookingsServiceError>;

    /// Completes a `CONFIRMED` booking.
    async fn complete_booking(
        &self,
        booking: BookingUuid,
        operator: OperatorUuid,
    ) -> Result<Booking, BookingsServiceError>;

    /// Cancels a `CREATED` or `CONFIRMED` booking.
    async fn cancel_booking(
        &self,
        booking: BookingUuid,
        operator: OperatorUuid,
    ) -> Result<Booking, BookingsServiceError>;

    /// [`Self::confirm_booking`] gated on a managing grant for the booking's
    /// hotel.
    async fn confirm_booking_with_access_control(
        &self,
        booking: BookingUuid,
        operator: OperatorUuid,
    ) -> Result<Booking, BookingsServiceError>;

    /// [`Self::refuse_booking`] gated on a managing grant for the booking's
    /// hotel.
    async fn refuse_booking_with_access_control(
        &self,
        booking: BookingUuid,
        operator: OperatorUuid,
        reason: String,
    ) -> Result<Booking, BookingsServiceError>;

    /// [`Self::complete_booking`] gated on a managing grant for the
    /// booking's hotel.
    async fn complete_booking_with_access_control(
        &self,
        booking: BookingUuid,
        operator: OperatorUuid,
    ) -> Result<Booking, BookingsServiceError>;

    /// [`Self::cancel_booking`] gated on a managing grant for the booking's
    /// hotel.
    async fn cancel_booking_with_access_control(
        &self,
        booking: BookingUuid,
        operator: OperatorUuid,
    ) -> Result<Booking, BookingsServiceError>;
}
