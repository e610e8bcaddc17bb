//! String keys for type-safe record references.
//!
//! Use the `define_key!` macro to create key wrappers that prevent accidentally
//! mixing a good ID with a username. Validation lives in each type's `parse`.

use crate::types::text::{FieldError, check_field};

/// Macro to define a type-safe string key.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - `as_str()`, `into_inner()`, `Display` and `AsRef<str>`
///
/// The generated type has no public constructor; each key supplies its own
/// validating `parse`.
///
/// # Example
///
/// ```rust
/// # use flatmart_core::define_key;
/// define_key!(SkuCode);
/// ```
#[macro_export]
macro_rules! define_key {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Returns the key as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consumes the key and returns its inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_key!(GoodId);
define_key!(Username);

/// Errors that can occur when parsing a [`GoodId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GoodIdError {
    /// The input is empty or only whitespace.
    #[error("good ID cannot be empty")]
    Empty,
    /// The input contains a reserved character.
    #[error("good ID {0}")]
    Field(#[from] FieldError),
}

impl GoodId {
    /// Parse a `GoodId`, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty or contains a comma or
    /// line break.
    pub fn parse(s: &str) -> Result<Self, GoodIdError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(GoodIdError::Empty);
        }
        check_field(s)?;
        Ok(Self(s.to_owned()))
    }
}

impl std::str::FromStr for GoodId {
    type Err = GoodIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Errors that can occur when parsing a [`Username`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum UsernameError {
    /// The input is shorter or longer than allowed.
    #[error("username must be between {min} and {max} characters")]
    Length {
        /// Minimum allowed length.
        min: usize,
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains a reserved character.
    #[error("username {0}")]
    Field(#[from] FieldError),
}

impl Username {
    /// Minimum username length in characters.
    pub const MIN_LENGTH: usize = 3;
    /// Maximum username length in characters.
    pub const MAX_LENGTH: usize = 20;

    /// Parse a `Username`, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is not 3-20 characters long or
    /// contains a comma or line break.
    pub fn parse(s: &str) -> Result<Self, UsernameError> {
        let s = s.trim();
        let len = s.chars().count();
        if !(Self::MIN_LENGTH..=Self::MAX_LENGTH).contains(&len) {
            return Err(UsernameError::Length {
                min: Self::MIN_LENGTH,
                max: Self::MAX_LENGTH,
            });
        }
        check_field(s)?;
        Ok(Self(s.to_owned()))
    }
}

impl std::str::FromStr for Username {
    type Err = UsernameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_good_id_is_trimmed() {
        let id = GoodId::parse("  G-100 ").unwrap();
        assert_eq!(id.as_str(), "G-100");
        assert_eq!(id.to_string(), "G-100");
    }

    #[test]
    fn test_good_id_empty() {
        assert_eq!(GoodId::parse(""), Err(GoodIdError::Empty));
        assert_eq!(GoodId::parse("   "), Err(GoodIdError::Empty));
    }

    #[test]
    fn test_good_id_rejects_comma() {
        assert!(matches!(
            GoodId::parse("a,b"),
            Err(GoodIdError::Field(FieldError::Reserved { found: ',' }))
        ));
    }

    #[test]
    fn test_username_length_bounds() {
        assert!(Username::parse("bob").is_ok());
        assert!(Username::parse(&"x".repeat(20)).is_ok());
        assert!(matches!(
            Username::parse("bo"),
            Err(UsernameError::Length { min: 3, max: 20 })
        ));
        assert!(matches!(
            Username::parse(&"x".repeat(21)),
            Err(UsernameError::Length { .. })
        ));
    }

    #[test]
    fn test_username_counts_characters_not_bytes() {
        assert!(Username::parse("张三丰").is_ok());
    }

    #[test]
    fn test_keys_are_distinct_types() {
        let id: GoodId = "alice".parse().unwrap();
        let user: Username = "alice".parse().unwrap();
        assert_eq!(id.as_str(), user.as_str());
    }
}
