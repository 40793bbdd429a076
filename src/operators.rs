//! Operators

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::ids::TypedUuid;

/// Operator UUID
pub type OperatorUuid = TypedUuid<Operator>;

/// A staff identity able to hold hotel access grants and act on bookings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Operator {
    /// Unique operator identifier.
    pub uuid: OperatorUuid,

    /// Display name.
    pub name: String,

    /// Contact email.
    pub email: String,

    /// Hash of the operator's credential; never the credential itself.
    pub password_hash: String,

    /// Free-form role label, e.g. `ADMIN`.
    pub role: String,
}

/// In-memory operator store keyed by identifier.
///
/// Operators are never removed while grants reference them, so no removal is
/// offered.
#[derive(Debug, Default)]
pub struct OperatorDirectory {
    operators: FxHashMap<OperatorUuid, Operator>,
}

impl OperatorDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an operator and returns its identifier.
    pub fn insert(&mut self, operator: Operator) -> OperatorUuid {
        let uuid = operator.uuid;
        self.operators.insert(uuid, operator);
        uuid
    }

    /// Looks up an operator.
    #[must_use]
    pub fn get(&self, uuid: OperatorUuid) -> Option<&Operator> {
        self.operators.get(&uuid)
    }

    /// Whether the identifier resolves to a registered operator.
    #[must_use]
    pub fn contains(&self, uuid: OperatorUuid) -> bool {
        self.operators.contains_key(&uuid)
    }
}
