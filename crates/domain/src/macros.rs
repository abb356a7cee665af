//! Macro for implementing Display and FromStr for wire-level status enums
//!
//! Status values travel as lowercase strings ("approved", "revoked",
//! "active"). The macro gives every status enum the same case-insensitive
//! parsing and lowercase rendering.
//!
//! # Example
//!
//! ```rust
//! use edgemgmt_domain::impl_domain_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum KeyState {
//!     Enabled,
//!     Disabled,
//! }
//!
//! impl_domain_status_conversions!(KeyState {
//!     Enabled => "enabled",
//!     Disabled => "disabled",
//! });
//! ```

/// Implements `as_str`, `Display` and `FromStr` for a status enum.
///
/// Parsing is case-insensitive; an unknown value is an
/// [`EdgeError::Parameter`](crate::EdgeError::Parameter) so callers can
/// propagate it with `?`.
#[macro_export]
macro_rules! impl_domain_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Wire representation of this status.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = $crate::errors::EdgeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_ascii_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err($crate::errors::EdgeError::Parameter(format!(
                        "unknown {} value '{}'",
                        stringify!($enum_name),
                        s
                    ))),
                }
            }
        }
    };
}
