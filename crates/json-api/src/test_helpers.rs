//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use innkeeper::{
    bookings::{Booking, BookingStatus, BookingUuid},
    hotels::RoomUuid,
    operators::OperatorUuid,
};
use innkeeper_app::{
    access::MockAccessService, bookings::MockBookingsService, catalog::MockCatalogService,
    context::AppContext,
};

use crate::state::State;

pub(crate) const TEST_OPERATOR_UUID: Uuid = Uuid::nil();

pub(crate) fn make_booking() -> Booking {
    Booking {
        uuid: BookingUuid::new(),
        room: RoomUuid::new(),
        client: Uuid::nil(),
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

fn transitioned_booking(status: BookingStatus) -> Booking {
    Booking {
        status,
        updated_by: Some(OperatorUuid::from_uuid(TEST_OPERATOR_UUID)),
        last_updated_at: Some(Timestamp::UNIX_EPOCH),
        ..make_booking()
    }
}

pub(crate) fn confirmed_booking() -> Booking {
    transitioned_booking(BookingStatus::Confirmed)
}

pub(crate) fn completed_booking() -> Booking {
    transitioned_booking(BookingStatus::Completed)
}

pub(crate) fn cancelled_booking() -> Booking {
    transitioned_booking(BookingStatus::Cancelled)
}

pub(crate) fn refused_booking(reason: &str) -> Booking {
    Booking {
        refusal_reason: Some(reason.to_string()),
        ..transitioned_booking(BookingStatus::Refused)
    }
}

fn strict_access_mock() -> MockAccessService {
    let mut access = MockAccessService::new();

    access.expect_has_access().never();
    access.expect_can_manage_bookings().never();
    access.expect_is_owner().never();
    access.expect_access_level().never();
    access.expect_grants_for_operator().never();
    access.expect_grants_for_hotel().never();
    access.expect_grant_access().never();
    access.expect_revoke_access().never();

    access
}

fn strict_catalog_mock() -> MockCatalogService {
    let mut catalog = MockCatalogService::new();

    catalog.expect_create_operator().never();
    catalog.expect_find_operator().never();
    catalog.expect_create_hotel().never();
    catalog.expect_create_room_type().never();
    catalog.expect_create_room().never();

    catalog
}

pub(crate) fn state_with_bookings(bookings: MockBookingsService) -> Arc<State> {
    Arc::new(State::new(AppContext {
        bookings: Arc::new(bookings),
        access: Arc::new(strict_access_mock()),
        catalog: Arc::new(strict_catalog_mock()),
    }))
}

pub(crate) fn bookings_service(bookings: MockBookingsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_bookings(bookings)))
            .push(route),
    )
}
