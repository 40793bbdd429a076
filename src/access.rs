//! Hotel access grants and the authorization predicates over them.

use std::{
    collections::hash_map::Entry,
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use jiff::Timestamp;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{errors::EngineError, hotels::HotelUuid, operators::OperatorUuid};

/// Ordered capability attached to an access grant.
///
/// The derived ordering is load-bearing: `Owner` implies `Manager` implies
/// `Viewer`, and every predicate below compares against it. New levels must
/// slot into this ordering, not beside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccessLevel {
    /// Read-only visibility into a hotel's bookings.
    Viewer,

    /// May manage bookings.
    Manager,

    /// Full control, including granting and revoking access.
    Owner,
}

impl AccessLevel {
    /// Canonical uppercase name, as stored and transported.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Viewer => "VIEWER",
            Self::Manager => "MANAGER",
            Self::Owner => "OWNER",
        }
    }
}

impl Display for AccessLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unrecognized access level name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized access level")]
pub struct ParseAccessLevelError;

impl FromStr for AccessLevel {
    type Err = ParseAccessLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "VIEWER" => Ok(Self::Viewer),
            "MANAGER" => Ok(Self::Manager),
            "OWNER" => Ok(Self::Owner),
            _ => Err(ParseAccessLevelError),
        }
    }
}

/// A record authorizing one operator to act on one hotel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessGrant {
    /// Operator the grant belongs to.
    pub operator: OperatorUuid,

    /// Hotel the grant applies to.
    pub hotel: HotelUuid,

    /// Capability level.
    pub level: AccessLevel,

    /// When the grant was issued.
    pub granted_at: Timestamp,

    /// Operator that issued the grant, when known.
    pub granted_by: Option<OperatorUuid>,
}

/// Grant store.
///
/// Holds at most one grant per (operator, hotel) pair; every authorization
/// query relies on that uniqueness.
#[derive(Debug, Default)]
pub struct AccessDirectory {
    grants: FxHashMap<(OperatorUuid, HotelUuid), AccessGrant>,
}

impl AccessDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a grant.
    ///
    /// # Errors
    ///
    /// Fails with [`EngineError::GrantExists`] when the pair already holds a
    /// grant.
    pub fn grant(&mut self, grant: AccessGrant) -> Result<(), EngineError> {
        match self.grants.entry((grant.operator, grant.hotel)) {
            Entry::Occupied(_) => Err(EngineError::GrantExists),
            Entry::Vacant(slot) => {
                slot.insert(grant);
                Ok(())
            }
        }
    }

    /// Removes and returns the grant for the pair, if any.
    pub fn revoke(&mut self, operator: OperatorUuid, hotel: HotelUuid) -> Option<AccessGrant> {
        self.grants.remove(&(operator, hotel))
    }

    /// Looks up the grant for the pair. Absence is a normal outcome.
    #[must_use]
    pub fn find_grant(&self, operator: OperatorUuid, hotel: HotelUuid) -> Option<&AccessGrant> {
        self.grants.get(&(operator, hotel))
    }

    /// All grants held by an operator, for administrative listing.
    pub fn grants_for_operator(&self, operator: OperatorUuid) -> Vec<&AccessGrant> {
        self.grants
            .values()
            .filter(|grant| grant.operator == operator)
            .collect()
    }

    /// All grants attached to a hotel, for administrative listing.
    pub fn grants_for_hotel(&self, hotel: HotelUuid) -> Vec<&AccessGrant> {
        self.grants
            .values()
            .filter(|grant| grant.hotel == hotel)
            .collect()
    }

    /// Authorization predicate view over this directory.
    #[must_use]
    pub fn control(&self) -> AccessControl<'_> {
        AccessControl { directory: self }
    }
}

/// Authorization predicates over an [`AccessDirectory`].
///
/// All predicates are pure reads; a missing grant answers `false` or `None`,
/// never an error.
#[derive(Debug, Clone, Copy)]
pub struct AccessControl<'a> {
    directory: &'a AccessDirectory,
}

impl AccessControl<'_> {
    /// The level granted to the operator for the hotel, if any.
    #[must_use]
    pub fn access_level(&self, operator: OperatorUuid, hotel: HotelUuid) -> Option<AccessLevel> {
        self.directory
            .find_grant(operator, hotel)
            .map(|grant| grant.level)
    }

    /// Whether any grant exists for the pair.
    #[must_use]
    pub fn has_access(&self, operator: OperatorUuid, hotel: HotelUuid) -> bool {
        self.access_level(operator, hotel).is_some()
    }

    /// Whether the operator may manage the hotel's bookings.
    #[must_use]
    pub fn can_manage(&self, operator: OperatorUuid, hotel: HotelUuid) -> bool {
        self.access_level(operator, hotel)
            .is_some_and(|level| level >= AccessLevel::Manager)
    }

    /// Whether the operator owns the hotel.
    #[must_use]
    pub fn is_owner(&self, operator: OperatorUuid, hotel: HotelUuid) -> bool {
        self.access_level(operator, hotel) == Some(AccessLevel::Owner)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn grant(operator: OperatorUuid, hotel: HotelUuid, level: AccessLevel) -> AccessGrant {
        AccessGrant {
            operator,
            hotel,
            level,
            granted_at: Timestamp::UNIX_EPOCH,
            granted_by: None,
        }
    }

    #[test]
    fn levels_are_ordered() {
        assert!(AccessLevel::Viewer < AccessLevel::Manager);
        assert!(AccessLevel::Manager < AccessLevel::Owner);
    }

    #[test]
    fn level_names_round_trip() -> TestResult {
        for level in [AccessLevel::Viewer, AccessLevel::Manager, AccessLevel::Owner] {
            assert_eq!(level.as_str().parse::<AccessLevel>()?, level);
        }

        assert!("owner".parse::<AccessLevel>().is_err());

        Ok(())
    }

    #[test]
    fn one_grant_per_pair() -> TestResult {
        let mut directory = AccessDirectory::new();
        let operator = OperatorUuid::new();
        let hotel = HotelUuid::new();

        directory.grant(grant(operator, hotel, AccessLevel::Viewer))?;

        let second = directory.grant(grant(operator, hotel, AccessLevel::Owner));

        assert_eq!(second, Err(EngineError::GrantExists));
        assert_eq!(
            directory.control().access_level(operator, hotel),
            Some(AccessLevel::Viewer),
            "the original grant must survive a rejected duplicate"
        );

        Ok(())
    }

    #[test]
    fn predicates_follow_the_level_ordering() -> TestResult {
        let mut directory = AccessDirectory::new();
        let hotel = HotelUuid::new();

        let viewer = OperatorUuid::new();
        let manager = OperatorUuid::new();
        let owner = OperatorUuid::new();
        let stranger = OperatorUuid::new();

        directory.grant(grant(viewer, hotel, AccessLevel::Viewer))?;
        directory.grant(grant(manager, hotel, AccessLevel::Manager))?;
        directory.grant(grant(owner, hotel, AccessLevel::Owner))?;

        let control = directory.control();

        assert!(control.has_access(viewer, hotel));
        assert!(!control.can_manage(viewer, hotel));
        assert!(!control.is_owner(viewer, hotel));

        assert!(control.has_access(manager, hotel));
        assert!(control.can_manage(manager, hotel));
        assert!(!control.is_owner(manager, hotel));

        assert!(control.has_access(owner, hotel));
        assert!(control.can_manage(owner, hotel));
        assert!(control.is_owner(owner, hotel));

        assert!(!control.has_access(stranger, hotel));
        assert_eq!(control.access_level(stranger, hotel), None);

        Ok(())
    }

    #[test]
    fn revoke_removes_the_grant() -> TestResult {
        let mut directory = AccessDirectory::new();
        let operator = OperatorUuid::new();
        let hotel = HotelUuid::new();

        directory.grant(grant(operator, hotel, AccessLevel::Manager))?;

        assert!(directory.revoke(operator, hotel).is_some());
        assert!(directory.revoke(operator, hotel).is_none());
        assert!(!directory.control().has_access(operator, hotel));

        Ok(())
    }

    #[test]
    fn listing_is_scoped_to_the_key() -> TestResult {
        let mut directory = AccessDirectory::new();
        let operator = OperatorUuid::new();
        let other = OperatorUuid::new();
        let hotel_a = HotelUuid::new();
        let hotel_b = HotelUuid::new();

        directory.grant(grant(operator, hotel_a, AccessLevel::Owner))?;
        directory.grant(grant(operator, hotel_b, AccessLevel::Viewer))?;
        directory.grant(grant(other, hotel_a, AccessLevel::Manager))?;

        assert_eq!(directory.grants_for_operator(operator).len(), 2);
        assert_eq!(directory.grants_for_operator(other).len(), 1);
        assert_eq!(directory.grants_for_hotel(hotel_a).len(), 2);
        assert_eq!(directory.grants_for_hotel(hotel_b).len(), 1);

        Ok(())
    }
}
