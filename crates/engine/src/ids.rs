//! Opaque string identifiers.
//!
//! The engine never inspects the structure of an identifier: it only compares
//! and hashes them. Each kind of record gets its own newtype so a payment id
//! cannot be passed where a participant id is expected.

use std::{borrow::Borrow, fmt};

use serde::{Deserialize, Serialize};

/// Generates a string-backed identifier newtype with the usual conversions.
macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(
    /// A participant (user) taking part in events and splits.
    ParticipantId
);
string_id!(
    /// An event grouping expenses and its participant list.
    EventId
);
string_id!(ExpenseId);
string_id!(PaymentId);
