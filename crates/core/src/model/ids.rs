use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Declares a string-backed identifier newtype.
///
/// Catalog and log identifiers come from a seeded dataset (`"1"`, `"ex-3"`,
/// `"custom-1700000000000"`), so they are opaque strings rather than numbers.
macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the underlying string value
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(ParseIdError {
                        kind: stringify!($name),
                    });
                }
                Ok(Self(trimmed.to_owned()))
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }
    };
}

string_id!(
    /// Unique identifier for a workout template
    WorkoutId
);

string_id!(
    /// Unique identifier for an exercise definition
    ExerciseId
);

string_id!(
    /// Unique identifier for a user profile
    UserId
);

string_id!(
    /// Unique identifier for a progress log entry
    LogId
);

// ─── Parse Errors ──────────────────────────────────────────────────────────────

/// Error type for parsing an ID from a string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    kind: &'static str,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {} from an empty string", self.kind)
    }
}

impl std::error::Error for ParseIdError {}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workout_id_display() {
        let id = WorkoutId::new("w-42");
        assert_eq!(id.to_string(), "w-42");
        assert_eq!(format!("{id:?}"), "WorkoutId(w-42)");
    }

    #[test]
    fn exercise_id_from_str_trims() {
        let id: ExerciseId = "  ex-1 ".parse().unwrap();
        assert_eq!(id, ExerciseId::new("ex-1"));
    }

    #[test]
    fn user_id_from_blank_is_error() {
        let result = "   ".parse::<UserId>();
        assert!(result.is_err());
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let json = serde_json::to_string(&WorkoutId::new("7")).unwrap();
        assert_eq!(json, "\"7\"");
        let back: LogId = serde_json::from_str("\"log-1\"").unwrap();
        assert_eq!(back.as_str(), "log-1");
    }
}
