//! Core error taxonomy.

use thiserror::Error;

use crate::bookings::BookingStatus;

/// Errors surfaced by the booking core.
///
/// Every variant is an expected, recoverable outcome reported to the caller;
/// none is fatal to the process, and the core never retries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The referenced booking does not resolve.
    #[error("booking not found")]
    BookingNotFound,

    /// The referenced operator does not resolve.
    #[error("operator not found")]
    OperatorNotFound,

    /// The referenced hotel does not resolve.
    #[error("hotel not found")]
    HotelNotFound,

    /// The referenced room does not resolve.
    #[error("room not found")]
    RoomNotFound,

    /// The referenced room type does not resolve.
    #[error("room type not found")]
    RoomTypeNotFound,

    /// No grant exists for the (operator, hotel) pair.
    #[error("access grant not found")]
    GrantNotFound,

    /// The (operator, hotel) pair already holds a grant.
    #[error("operator already holds a grant for this hotel")]
    GrantExists,

    /// Caller-supplied data failed a precondition independent of state.
    #[error("{0}")]
    InvalidArgument(&'static str),

    /// The requested status change is not permitted from the current status.
    #[error("cannot move a booking from {from} to {to}")]
    InvalidTransition {
        /// Status the booking currently holds.
        from: BookingStatus,
        /// Status the caller asked for.
        to: BookingStatus,
    },

    /// The operation requires a specific current status.
    #[error("booking must be {expected} but is {actual}")]
    InvalidState {
        /// Status the operation requires.
        expected: BookingStatus,
        /// Status the booking currently holds.
        actual: BookingStatus,
    },

    /// The operator lacks a sufficient access level for the hotel owning the
    /// booking.
    #[error("operator may not manage bookings for this hotel")]
    AccessDenied,
}
