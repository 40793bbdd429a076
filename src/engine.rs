//! The booking engine: lifecycle transitions, authorization and queries over
//! a single set of in-memory stores.
//!
//! Every mutating booking operation is a short read-validate-write sequence
//! against one booking; there are no cross-booking invariants. Entities are
//! resolved on demand through identifier-keyed lookups rather than held as
//! object references.

use jiff::Timestamp;

use crate::{
    access::{AccessDirectory, AccessGrant, AccessLevel},
    bookings::{refusal_reason, Booking, BookingStatus, BookingStore, BookingUuid, NewBooking},
    errors::EngineError,
    hotels::{Hotel, HotelDirectory, HotelUuid, Room, RoomType, RoomTypeUuid, RoomUuid},
    operators::{Operator, OperatorDirectory, OperatorUuid},
};

/// The booking core: operators, hotels, grants and bookings behind one API.
#[derive(Debug, Default)]
pub struct BookingEngine {
    operators: OperatorDirectory,
    hotels: HotelDirectory,
    access: AccessDirectory,
    bookings: BookingStore,
}

impl BookingEngine {
    /// Creates an empty engine.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The access directory, for read-only authorization queries.
    #[must_use]
    pub fn access(&self) -> &AccessDirectory {
        &self.access
    }

    /// The hotel directory.
    #[must_use]
    pub fn hotels(&self) -> &HotelDirectory {
        &self.hotels
    }

    /// The operator directory.
    #[must_use]
    pub fn operators(&self) -> &OperatorDirectory {
        &self.operators
    }

    /// Registers an operator.
    pub fn add_operator(&mut self, operator: Operator) -> OperatorUuid {
        self.operators.insert(operator)
    }

    /// Registers a hotel. The creator receives an `OWNER` grant for it.
    ///
    /// # Errors
    ///
    /// Fails when the creator does not resolve.
    pub fn add_hotel(
        &mut self,
        creator: OperatorUuid,
        hotel: Hotel,
    ) -> Result<HotelUuid, EngineError> {
        if !self.operators.contains(creator) {
            return Err(EngineError::OperatorNotFound);
        }

        let uuid = self.hotels.add_hotel(hotel);
        self.access.grant(AccessGrant {
            operator: creator,
            hotel: uuid,
            level: AccessLevel::Owner,
            granted_at: Timestamp::now(),
            granted_by: Some(creator),
        })?;

        Ok(uuid)
    }

    /// Registers a room type.
    ///
    /// # Errors
    ///
    /// Fails when the referenced hotel does not resolve.
    pub fn add_room_type(&mut self, room_type: RoomType) -> Result<RoomTypeUuid, EngineError> {
        self.hotels.add_room_type(room_type)
    }

    /// Registers a room.
    ///
    /// # Errors
    ///
    /// Fails when the referenced hotel or room type does not resolve.
    pub fn add_room(&mut self, room: Room) -> Result<RoomUuid, EngineError> {
        self.hotels.add_room(room)
    }

    /// Issues an access grant on behalf of `acting`, which must own the
    /// hotel.
    ///
    /// # Errors
    ///
    /// Fails with [`EngineError::AccessDenied`] when `acting` is not an
    /// `OWNER` of the hotel, and with [`EngineError::GrantExists`] when the
    /// pair is already granted.
    pub fn grant_access(
        &mut self,
        acting: OperatorUuid,
        grant: AccessGrant,
    ) -> Result<(), EngineError> {
        if !self.operators.contains(grant.operator) {
            return Err(EngineError::OperatorNotFound);
        }
        if self.hotels.hotel(grant.hotel).is_none() {
            return Err(EngineError::HotelNotFound);
        }
        if !self.access.control().is_owner(acting, grant.hotel) {
            return Err(EngineError::AccessDenied);
        }

        self.access.grant(grant)
    }

    /// Revokes a grant on behalf of `acting`, which must own the hotel.
    ///
    /// # Errors
    ///
    /// Fails with [`EngineError::AccessDenied`] when `acting` is not an
    /// `OWNER`, and with [`EngineError::GrantNotFound`] when no grant exists
    /// for the pair.
    pub fn revoke_access(
        &mut self,
        acting: OperatorUuid,
        operator: OperatorUuid,
        hotel: HotelUuid,
    ) -> Result<(), EngineError> {
        if !self.access.control().is_owner(acting, hotel) {
            return Err(EngineError::AccessDenied);
        }

        self.access
            .revoke(operator, hotel)
            .map(|_| ())
            .ok_or(EngineError::GrantNotFound)
    }

    /// Creates a `CREATED` booking for an existing room.
    ///
    /// # Errors
    ///
    /// Fails when the room does not resolve or the stay window is invalid.
    pub fn create_booking(&mut self, new: NewBooking) -> Result<Booking, EngineError> {
        if self.hotels.room(new.room).is_none() {
            return Err(EngineError::RoomNotFound);
        }

        let booking = Booking::create(new)?;
        self.bookings.insert(booking.clone());
        Ok(booking)
    }

    /// Confirms a booking.
    ///
    /// # Errors
    ///
    /// Fails when the booking or operator does not resolve, or when the
    /// booking is not `CREATED`.
    pub fn confirm_booking(
        &mut self,
        booking: BookingUuid,
        operator: OperatorUuid,
    ) -> Result<Booking, EngineError> {
        let record = Self::resolve(&mut self.bookings, &self.operators, booking, operator)?;
        record.confirm(operator, Timestamp::now())?;
        Ok(record.clone())
    }

    /// Refuses a booking with a reason.
    ///
    /// # Errors
    ///
    /// Fails on a blank reason (before any lookup), on unresolved
    /// identifiers, or when the booking is not `CREATED`.
    pub fn refuse_booking(
        &mut self,
        booking: BookingUuid,
        operator: OperatorUuid,
        reason: &str,
    ) -> Result<Booking, EngineError> {
        refusal_reason(reason)?;

        let record = Self::resolve(&mut self.bookings, &self.operators, booking, operator)?;
        record.refuse(operator, reason, Timestamp::now())?;
        Ok(record.clone())
    }

    /// Completes a booking.
    ///
    /// # Errors
    ///
    /// Fails when identifiers do not resolve or when the booking is not
    /// exactly `CONFIRMED`.
    pub fn complete_booking(
        &mut self,
        booking: BookingUuid,
        operator: OperatorUuid,
    ) -> Result<Booking, EngineError> {
        let record = Self::resolve(&mut self.bookings, &self.operators, booking, operator)?;
        record.complete(operator, Timestamp::now())?;
        Ok(record.clone())
    }

    /// Cancels a booking.
    ///
    /// # Errors
    ///
    /// Fails when identifiers do not resolve or when the booking is neither
    /// `CREATED` nor `CONFIRMED`.
    pub fn cancel_booking(
        &mut self,
        booking: BookingUuid,
        operator: OperatorUuid,
    ) -> Result<Booking, EngineError> {
        let record = Self::resolve(&mut self.bookings, &self.operators, booking, operator)?;
        record.cancel(operator, Timestamp::now())?;
        Ok(record.clone())
    }

    /// [`Self::confirm_booking`] gated on `can_manage` for the booking's
    /// hotel.
    ///
    /// # Errors
    ///
    /// As the plain operation, plus [`EngineError::AccessDenied`].
    pub fn confirm_booking_with_access_control(
        &mut self,
        booking: BookingUuid,
        operator: OperatorUuid,
    ) -> Result<Booking, EngineError> {
        self.authorize_manage(booking, operator)?;
        self.confirm_booking(booking, operator)
    }

    /// [`Self::refuse_booking`] gated on `can_manage` for the booking's
    /// hotel.
    ///
    /// # Errors
    ///
    /// As the plain operation, plus [`EngineError::AccessDenied`].
    pub fn refuse_booking_with_access_control(
        &mut self,
        booking: BookingUuid,
        operator: OperatorUuid,
        reason: &str,
    ) -> Result<Booking, EngineError> {
        self.authorize_manage(booking, operator)?;
        self.refuse_booking(booking, operator, reason)
    }

    /// [`Self::complete_booking`] gated on `can_manage` for the booking's
    /// hotel.
    ///
    /// # Errors
    ///
    /// As the plain operation, plus [`EngineError::AccessDenied`].
    pub fn complete_booking_with_access_control(
        &mut self,
        booking: BookingUuid,
        operator: OperatorUuid,
    ) -> Result<Booking, EngineError> {
        self.authorize_manage(booking, operator)?;
        self.complete_booking(booking, operator)
    }

    /// [`Self::cancel_booking`] gated on `can_manage` for the booking's
    /// hotel.
    ///
    /// # Errors
    ///
    /// As the plain operation, plus [`EngineError::AccessDenied`].
    pub fn cancel_booking_with_access_control(
        &mut self,
        booking: BookingUuid,
        operator: OperatorUuid,
    ) -> Result<Booking, EngineError> {
        self.authorize_manage(booking, operator)?;
        self.cancel_booking(booking, operator)
    }

    /// Looks up a single booking.
    #[must_use]
    pub fn booking(&self, uuid: BookingUuid) -> Option<Booking> {
        self.bookings.get(uuid).cloned()
    }

    /// Every booking, unscoped. Trusted administrative read.
    #[must_use]
    pub fn all_bookings(&self) -> Vec<Booking> {
        self.bookings.iter().cloned().collect()
    }

    /// Every booking in one status, unscoped. Trusted administrative read.
    #[must_use]
    pub fn bookings_by_status(&self, status: BookingStatus) -> Vec<Booking> {
        self.bookings
            .iter()
            .filter(|booking| booking.status == status)
            .cloned()
            .collect()
    }

    /// Every booking whose hotel has any grant for the operator; view access
    /// suffices for reads.
    #[must_use]
    pub fn bookings_visible_to(&self, operator: OperatorUuid) -> Vec<Booking> {
        self.bookings
            .iter()
            .filter(|booking| self.is_visible(booking, operator))
            .cloned()
            .collect()
    }

    /// The visible set, filtered to one status.
    #[must_use]
    pub fn bookings_by_status_visible_to(
        &self,
        operator: OperatorUuid,
        status: BookingStatus,
    ) -> Vec<Booking> {
        self.bookings
            .iter()
            .filter(|booking| booking.status == status && self.is_visible(booking, operator))
            .cloned()
            .collect()
    }

    fn is_visible(&self, booking: &Booking, operator: OperatorUuid) -> bool {
        self.hotels
            .hotel_of_room(booking.room)
            .is_some_and(|hotel| self.access.control().has_access(operator, hotel))
    }

    // The booking is resolved before the operator so that a missing booking
    // always reports as such, whatever else is wrong with the request.
    fn resolve<'a>(
        bookings: &'a mut BookingStore,
        operators: &OperatorDirectory,
        booking: BookingUuid,
        operator: OperatorUuid,
    ) -> Result<&'a mut Booking, EngineError> {
        let record = bookings
            .get_mut(booking)
            .ok_or(EngineError::BookingNotFound)?;

        if !operators.contains(operator) {
            return Err(EngineError::OperatorNotFound);
        }

        Ok(record)
    }

    // Gating resolves the booking and its hotel first; a nonexistent booking
    // therefore reports NotFound rather than AccessDenied.
    fn authorize_manage(
        &self,
        booking: BookingUuid,
        operator: OperatorUuid,
    ) -> Result<(), EngineError> {
        let record = self
            .bookings
            .get(booking)
            .ok_or(EngineError::BookingNotFound)?;
        let hotel = self
            .hotels
            .hotel_of_room(record.room)
            .ok_or(EngineError::HotelNotFound)?;

        if !self.access.control().can_manage(operator, hotel) {
            return Err(EngineError::AccessDenied);
        }

        Ok(())
    }
}
