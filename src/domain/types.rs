/// Core types used throughout the domain layer
///
/// This module defines the identifier and frequency types that Habit and the
/// record conversion layer share.

use std::fmt;
use serde::{Deserialize, Serialize};

/// Unique identifier for a habit
///
/// This is a wrapper around a positive integer to provide type safety - you
/// can't accidentally pass an XP amount where a habit ID is expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HabitId(pub u64);

impl HabitId {
    /// The first id handed out by an empty store
    pub const FIRST: HabitId = HabitId(1);

    /// The id that follows this one, or None at the top of the range
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }

    /// Get the raw integer value
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for HabitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How often a habit should be performed
///
/// Frequencies are free-form labels such as "daily" or "weekly". They are
/// kept as written by the user and never checked against a fixed set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Frequency(String);

impl Frequency {
    /// Label used when none is given or a stored record lacks one
    pub const DEFAULT_LABEL: &'static str = "daily";

    /// Create a frequency from a label, falling back to "daily" for blank input
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        if label.trim().is_empty() {
            Self::daily()
        } else {
            Self(label)
        }
    }

    pub fn daily() -> Self {
        Self(Self::DEFAULT_LABEL.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Frequency {
    fn default() -> Self {
        Self::daily()
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
