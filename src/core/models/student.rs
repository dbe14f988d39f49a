//! Student model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Roster-assigned student identifier. Ordered numerically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(pub u64);

impl From<u64> for StudentId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A student identity as supplied by the roster
///
/// Courses never hold a `Student`; they refer to it by [`StudentId`] only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Roster id
    pub id: StudentId,

    /// Display name (e.g., "Ada Lovelace")
    pub name: String,
}

impl Student {
    /// Create a new student
    ///
    /// # Arguments
    /// * `id` - Roster id
    /// * `name` - Display name
    #[must_use]
    pub const fn new(id: StudentId, name: String) -> Self {
        Self { id, name }
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}
