//! Bookings service errors.

use innkeeper::{bookings::BookingStatus, errors::EngineError};
use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

/// Bookings service error variants.
#[derive(Debug, Error)]
pub enum BookingsServiceError {
    /// The referenced booking or operator was not found.
    #[error("booking or operator not found")]
    NotFound,

    /// A booking with this UUID already exists.
    #[error("booking already exists")]
    AlreadyExists,

    /// Referenced related row does not exist.
    #[error("related resource not found")]
    InvalidReference,

    /// Required data was missing.
    #[error("missing required data")]
    MissingRequiredData,

    /// Provided data failed validation.
    #[error("invalid data")]
    InvalidData,

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

    /// Underlying SQL/storage error.
    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for BookingsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

impl From<EngineError> for BookingsServiceError {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::BookingNotFound
            | EngineError::OperatorNotFound
            | EngineError::HotelNotFound
            | EngineError::RoomNotFound
            | EngineError::RoomTypeNotFound
            | EngineError::GrantNotFound => Self::NotFound,
            EngineError::GrantExists => Self::AlreadyExists,
            EngineError::InvalidArgument(message) => Self::InvalidArgument(message),
            EngineError::InvalidTransition { from, to } => Self::InvalidTransition { from, to },
            EngineError::InvalidState { expected, actual } => {
                Self::InvalidState { expected, actual }
            }
            EngineError::AccessDenied => Self::AccessDenied,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_maps_to_not_found() {
        let mapped = BookingsServiceError::from(Error::RowNotFound);

        assert!(matches!(mapped, BookingsServiceError::NotFound));
    }

    #[test]
    fn core_taxonomy_survives_the_mapping() {
        let mapped = BookingsServiceError::from(EngineError::InvalidTransition {
            from: BookingStatus::Refused,
            to: BookingStatus::Confirmed,
        });

        assert!(matches!(
            mapped,
            BookingsServiceError::InvalidTransition {
                from: BookingStatus::Refused,
                to: BookingStatus::Confirmed,
            }
        ));

        let mapped = BookingsServiceError::from(EngineError::AccessDenied);
        assert!(matches!(mapped, BookingsServiceError::AccessDenied));

        let mapped = BookingsServiceError::from(EngineError::BookingNotFound);
        assert!(matches!(mapped, BookingsServiceError::NotFound));
    }
}
