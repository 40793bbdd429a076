//! Access Grant Data

use innkeeper::{access::AccessLevel, hotels::HotelUuid, operators::OperatorUuid};

/// New Access Grant Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccessGrant {
    /// Operator receiving the grant.
    pub operator: OperatorUuid,

    /// Hotel the grant applies to.
    pub hotel: HotelUuid,

    /// Capability level to grant.
    pub level: AccessLevel,
}
