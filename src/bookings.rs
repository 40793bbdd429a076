//! Bookings and the lifecycle state machine.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use jiff::Timestamp;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::{errors::EngineError, hotels::RoomUuid, ids::TypedUuid, operators::OperatorUuid};

/// Booking UUID
pub type BookingUuid = TypedUuid<Booking>;

/// Lifecycle status of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    /// Initial status of every booking.
    Created,

    /// Accepted by an operator; the stay is going ahead.
    Confirmed,

    /// Declined by an operator, with a stored reason. Terminal.
    Refused,

    /// Withdrawn before or after confirmation. Terminal.
    Cancelled,

    /// The stay took place. Terminal.
    Completed,
}

impl BookingStatus {
    /// Whether the transition table permits moving to `to`.
    #[must_use]
    pub fn allows(self, to: BookingStatus) -> bool {
        matches!(
            (self, to),
            (
                Self::Created,
                Self::Confirmed | Self::Refused | Self::Cancelled
            ) | (Self::Confirmed, Self::Completed | Self::Cancelled)
        )
    }

    /// Terminal statuses have no outgoing transitions.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Refused | Self::Cancelled | Self::Completed)
    }

    /// Canonical uppercase name, as stored and transported.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Created => "CREATED",
            Self::Confirmed => "CONFIRMED",
            Self::Refused => "REFUSED",
            Self::Cancelled => "CANCELLED",
            Self::Completed => "COMPLETED",
        }
    }
}

impl Display for BookingStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unrecognized status name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized booking status")]
pub struct ParseBookingStatusError;

impl FromStr for BookingStatus {
    type Err = ParseBookingStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CREATED" => Ok(Self::Created),
            "CONFIRMED" => Ok(Self::Confirmed),
            "REFUSED" => Ok(Self::Refused),
            "CANCELLED" => Ok(Self::Cancelled),
            "COMPLETED" => Ok(Self::Completed),
            _ => Err(ParseBookingStatusError),
        }
    }
}

/// Input for creating a booking.
#[derive(Debug, Clone)]
pub struct NewBooking {
    /// UUID to assign to the booking.
    pub uuid: BookingUuid,

    /// Room being booked.
    pub room: RoomUuid,

    /// Identity of the booking client, external to this system.
    pub client: Uuid,

    /// Start of the stay.
    pub check_in: Timestamp,

    /// End of the stay; must be strictly after `check_in`.
    pub check_out: Timestamp,

    /// Names of the guests staying.
    pub guest_names: String,

    /// Free-form special requests.
    pub special_requests: Option<String>,
}

/// A room reservation and its audit trail.
///
/// The lifecycle methods on this type are the only writers of `status`,
/// `refusal_reason`, `updated_by` and `last_updated_at`; everything else is
/// fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// Unique booking identifier.
    pub uuid: BookingUuid,

    /// Room the booking is for; immutable after creation.
    pub room: RoomUuid,

    /// Identity of the booking client.
    pub client: Uuid,

    /// Start of the stay.
    pub check_in: Timestamp,

    /// End of the stay.
    pub check_out: Timestamp,

    /// Names of the guests staying.
    pub guest_names: String,

    /// Free-form special requests.
    pub special_requests: Option<String>,

    /// Current lifecycle status.
    pub status: BookingStatus,

    /// Why the booking was refused; populated only while `REFUSED`.
    pub refusal_reason: Option<String>,

    /// Operator that performed the last transition; null until the first one.
    pub updated_by: Option<OperatorUuid>,

    /// When the last transition happened; null until the first one.
    pub last_updated_at: Option<Timestamp>,
}

impl Booking {
    /// Builds a `CREATED` booking.
    ///
    /// # Errors
    ///
    /// Fails with [`EngineError::InvalidArgument`] unless check-out is
    /// strictly after check-in.
    pub fn create(new: NewBooking) -> Result<Self, EngineError> {
        if new.check_out <= new.check_in {
            return Err(EngineError::InvalidArgument(
                "check-out must be strictly after check-in",
            ));
        }

        Ok(Self {
            uuid: new.uuid,
            room: new.room,
            client: new.client,
            check_in: new.check_in,
            check_out: new.check_out,
            guest_names: new.guest_names,
            special_requests: new.special_requests,
            status: BookingStatus::Created,
            refusal_reason: None,
            updated_by: None,
            last_updated_at: None,
        })
    }

    /// Confirms the booking. Clears any stored refusal reason.
    ///
    /// # Errors
    ///
    /// Fails with [`EngineError::InvalidTransition`] unless the booking is
    /// `CREATED`.
    pub fn confirm(&mut self, operator: OperatorUuid, now: Timestamp) -> Result<(), EngineError> {
        self.transition(BookingStatus::Confirmed, operator, now)?;
        self.refusal_reason = None;
        Ok(())
    }

    /// Refuses the booking, storing the trimmed reason.
    ///
    /// # Errors
    ///
    /// Fails with [`EngineError::InvalidArgument`] on a blank reason — before
    /// the status is inspected — and with [`EngineError::InvalidTransition`]
    /// unless the booking is `CREATED`.
    pub fn refuse(
        &mut self,
        operator: OperatorUuid,
        reason: &str,
        now: Timestamp,
    ) -> Result<(), EngineError> {
        let reason = refusal_reason(reason)?;
        self.transition(BookingStatus::Refused, operator, now)?;
        self.refusal_reason = Some(reason.to_string());
        Ok(())
    }

    /// Completes the booking.
    ///
    /// # Errors
    ///
    /// Fails with [`EngineError::InvalidState`] unless the booking is exactly
    /// `CONFIRMED`. This is an explicit precondition, stricter than the
    /// transition table.
    pub fn complete(&mut self, operator: OperatorUuid, now: Timestamp) -> Result<(), EngineError> {
        if self.status != BookingStatus::Confirmed {
            return Err(EngineError::InvalidState {
                expected: BookingStatus::Confirmed,
                actual: self.status,
            });
        }
        self.transition(BookingStatus::Completed, operator, now)
    }

    /// Cancels the booking.
    ///
    /// # Errors
    ///
    /// Fails with [`EngineError::InvalidTransition`] unless the booking is
    /// `CREATED` or `CONFIRMED`.
    pub fn cancel(&mut self, operator: OperatorUuid, now: Timestamp) -> Result<(), EngineError> {
        self.transition(BookingStatus::Cancelled, operator, now)
    }

    // Audit stamping is part of the transition itself: a successful status
    // change and its who/when are never observable separately.
    fn transition(
        &mut self,
        to: BookingStatus,
        operator: OperatorUuid,
        now: Timestamp,
    ) -> Result<(), EngineError> {
        if !self.status.allows(to) {
            return Err(EngineError::InvalidTransition {
                from: self.status,
                to,
            });
        }

        self.status = to;
        self.updated_by = Some(operator);
        self.last_updated_at = Some(now);
        Ok(())
    }
}

/// Validates a refusal reason, returning it trimmed.
///
/// # Errors
///
/// Fails with [`EngineError::InvalidArgument`] when the reason is blank or
/// whitespace-only.
pub fn refusal_reason(reason: &str) -> Result<&str, EngineError> {
    let trimmed = reason.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidArgument("a refusal reason is required"));
    }
    Ok(trimmed)
}

/// In-memory booking store keyed by identifier.
#[derive(Debug, Default)]
pub struct BookingStore {
    bookings: FxHashMap<BookingUuid, Booking>,
}

impl BookingStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a booking.
    pub fn insert(&mut self, booking: Booking) -> BookingUuid {
        let uuid = booking.uuid;
        self.bookings.insert(uuid, booking);
        uuid
    }

    /// Looks up a booking.
    #[must_use]
    pub fn get(&self, uuid: BookingUuid) -> Option<&Booking> {
        self.bookings.get(&uuid)
    }

    /// Looks up a booking for mutation.
    pub fn get_mut(&mut self, uuid: BookingUuid) -> Option<&mut Booking> {
        self.bookings.get_mut(&uuid)
    }

    /// Iterates over every stored booking, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Booking> {
        self.bookings.values()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn created_booking() -> Booking {
        Booking {
            uuid: BookingUuid::new(),
            room: RoomUuid::new(),
            client: Uuid::now_v7(),
            check_in: Timestamp::UNIX_EPOCH,
            check_out: Timestamp::MAX,
            guest_names: "John Doe".to_string(),
            special_requests: None,
            status: BookingStatus::Created,
            refusal_reason: None,
            updated_by: None,
            last_updated_at: None,
        }
    }

    const ALL_STATUSES: [BookingStatus; 5] = [
        BookingStatus::Created,
        BookingStatus::Confirmed,
        BookingStatus::Refused,
        BookingStatus::Cancelled,
        BookingStatus::Completed,
    ];

    #[test]
    fn transition_table_is_exact() {
        for from in ALL_STATUSES {
            for to in ALL_STATUSES {
                let allowed = matches!(
                    (from, to),
                    (
                        BookingStatus::Created,
                        BookingStatus::Confirmed
                            | BookingStatus::Refused
                            | BookingStatus::Cancelled
                    ) | (
                        BookingStatus::Confirmed,
                        BookingStatus::Completed | BookingStatus::Cancelled
                    )
                );

                assert_eq!(from.allows(to), allowed, "transition {from} -> {to}");
            }
        }
    }

    #[test]
    fn terminal_statuses_allow_nothing() {
        for from in ALL_STATUSES.into_iter().filter(|s| s.is_terminal()) {
            for to in ALL_STATUSES {
                assert!(!from.allows(to), "terminal {from} must not allow {to}");
            }
        }
    }

    #[test]
    fn status_names_round_trip() -> TestResult {
        for status in ALL_STATUSES {
            assert_eq!(status.as_str().parse::<BookingStatus>()?, status);
        }

        assert!("confirmed".parse::<BookingStatus>().is_err());

        Ok(())
    }

    #[test]
    fn create_rejects_a_stay_that_ends_before_it_starts() {
        for (check_in, check_out) in [
            (Timestamp::MAX, Timestamp::UNIX_EPOCH),
            (Timestamp::UNIX_EPOCH, Timestamp::UNIX_EPOCH),
        ] {
            let result = Booking::create(NewBooking {
                uuid: BookingUuid::new(),
                room: RoomUuid::new(),
                client: Uuid::now_v7(),
                check_in,
                check_out,
                guest_names: "John Doe".to_string(),
                special_requests: None,
            });

            assert!(matches!(result, Err(EngineError::InvalidArgument(_))));
        }
    }

    #[test]
    fn create_starts_with_clean_audit_fields() -> TestResult {
        let booking = Booking::create(NewBooking {
            uuid: BookingUuid::new(),
            room: RoomUuid::new(),
            client: Uuid::now_v7(),
            check_in: Timestamp::UNIX_EPOCH,
            check_out: Timestamp::MAX,
            guest_names: "John Doe".to_string(),
            special_requests: Some("late arrival".to_string()),
        })?;

        assert_eq!(booking.status, BookingStatus::Created);
        assert!(booking.refusal_reason.is_none());
        assert!(booking.updated_by.is_none());
        assert!(booking.last_updated_at.is_none());

        Ok(())
    }

    #[test]
    fn confirm_stamps_audit_fields() -> TestResult {
        let mut booking = created_booking();
        let operator = OperatorUuid::new();
        let now = Timestamp::now();

        booking.confirm(operator, now)?;

        assert_eq!(booking.status, BookingStatus::Confirmed);
        assert_eq!(booking.updated_by, Some(operator));
        assert_eq!(booking.last_updated_at, Some(now));

        Ok(())
    }

    #[test]
    fn confirm_clears_a_stored_refusal_reason() -> TestResult {
        let mut booking = created_booking();
        // Not reachable through the state machine, but the clearing contract
        // holds regardless of how the field was populated.
        booking.refusal_reason = Some("overbooked".to_string());

        booking.confirm(OperatorUuid::new(), Timestamp::now())?;

        assert!(booking.refusal_reason.is_none());

        Ok(())
    }

    #[test]
    fn refuse_stores_the_trimmed_reason() -> TestResult {
        let mut booking = created_booking();
        let operator = OperatorUuid::new();

        booking.refuse(operator, "  No rooms \n", Timestamp::now())?;

        assert_eq!(booking.status, BookingStatus::Refused);
        assert_eq!(booking.refusal_reason.as_deref(), Some("No rooms"));
        assert_eq!(booking.updated_by, Some(operator));

        Ok(())
    }

    #[test]
    fn refuse_with_blank_reason_leaves_the_booking_untouched() {
        let mut booking = created_booking();

        for blank in ["", "   ", "\t\n"] {
            let result = booking.refuse(OperatorUuid::new(), blank, Timestamp::now());

            assert!(matches!(result, Err(EngineError::InvalidArgument(_))));
            assert_eq!(booking.status, BookingStatus::Created);
            assert!(booking.updated_by.is_none());
        }
    }

    #[test]
    fn complete_requires_exactly_confirmed() -> TestResult {
        let mut booking = created_booking();
        let operator = OperatorUuid::new();

        let result = booking.complete(operator, Timestamp::now());
        assert!(
            matches!(result, Err(EngineError::InvalidState { .. })),
            "completing a CREATED booking must fail, got {result:?}"
        );
        assert_eq!(booking.status, BookingStatus::Created);

        booking.confirm(operator, Timestamp::now())?;
        booking.complete(operator, Timestamp::now())?;

        assert_eq!(booking.status, BookingStatus::Completed);

        Ok(())
    }

    #[test]
    fn cancel_works_from_created_and_confirmed() -> TestResult {
        let mut from_created = created_booking();
        from_created.cancel(OperatorUuid::new(), Timestamp::now())?;
        assert_eq!(from_created.status, BookingStatus::Cancelled);

        let mut from_confirmed = created_booking();
        from_confirmed.confirm(OperatorUuid::new(), Timestamp::now())?;
        from_confirmed.cancel(OperatorUuid::new(), Timestamp::now())?;
        assert_eq!(from_confirmed.status, BookingStatus::Cancelled);

        Ok(())
    }

    #[test]
    fn terminal_bookings_reject_every_operation() -> TestResult {
        let mut booking = created_booking();
        booking.refuse(OperatorUuid::new(), "No rooms", Timestamp::now())?;

        let operator = OperatorUuid::new();
        let stamp = booking.last_updated_at;

        assert!(booking.confirm(operator, Timestamp::now()).is_err());
        assert!(booking.cancel(operator, Timestamp::now()).is_err());
        assert!(booking.complete(operator, Timestamp::now()).is_err());
        assert!(
            booking
                .refuse(operator, "again", Timestamp::now())
                .is_err()
        );

        assert_eq!(booking.status, BookingStatus::Refused);
        assert_eq!(booking.last_updated_at, stamp, "failed operations must not restamp");

        Ok(())
    }

    #[test]
    fn failed_transition_does_not_stamp_audit_fields() -> TestResult {
        let mut booking = created_booking();
        booking.confirm(OperatorUuid::new(), Timestamp::now())?;
        let stamped_by = booking.updated_by;

        let result = booking.refuse(OperatorUuid::new(), "too late", Timestamp::now());

        assert!(matches!(result, Err(EngineError::InvalidTransition { .. })));
        assert_eq!(booking.updated_by, stamped_by);

        Ok(())
    }
}
