//! Booking Errors

use salvo::http::StatusError;
use tracing::error;

use innkeeper_app::bookings::BookingsServiceError;

pub(crate) fn into_status_error(error: BookingsServiceError) -> StatusError {
    match error {
        BookingsServiceError::NotFound => StatusError::not_found(),
        BookingsServiceError::AccessDenied => {
            StatusError::forbidden().brief("You may not manage bookings for this hotel")
        }
        BookingsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Booking already exists")
        }
        BookingsServiceError::InvalidArgument(message) => {
            StatusError::bad_request().brief(message)
        }
        error @ (BookingsServiceError::InvalidTransition { .. }
        | BookingsServiceError::InvalidState { .. }) => {
            StatusError::bad_request().brief(error.to_string())
        }
        BookingsServiceError::InvalidReference
        | BookingsServiceError::MissingRequiredData
        | BookingsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid booking payload")
        }
        BookingsServiceError::Sql(source) => {
            error!("booking operation failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
