//! Macro for defining the closed crew role set.

/// Defines the `Role` enum from a list of `Variant => "LABEL"` pairs.
///
/// This generates:
/// - The `Role` enum with one unit variant per entry
/// - `Role::ALL` in declaration order
/// - `as_str()` returning the canonical upper-case label
/// - `Display` and `FromStr` (exact label, surrounding whitespace ignored)
/// - `Serialize` and `Deserialize` as the canonical label
///
/// # Example
///
/// ```ignore
/// define_roles! {
///     Writer => "WRITER",
///     Dp => "DP",
/// }
///
/// let role: Role = " WRITER ".parse()?;
/// assert_eq!(role.as_str(), "WRITER");
/// ```
#[macro_export]
macro_rules! define_roles {
    ($($variant:ident => $label:literal),+ $(,)?) => {
        /// A crew role. Every person holds exactly one.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum Role {
            $(
                #[doc = concat!("`", $label, "`")]
                $variant,
            )+
        }

        impl Role {
            /// Every role, in declaration order.
            pub const ALL: &'static [Role] = &[$(Role::$variant),+];

            /// Returns the canonical label.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Role::$variant => $label,)+
                }
            }

            /// Parses a role label.
            ///
            /// The label must match exactly; only surrounding whitespace is ignored.
            pub fn parse(s: &str) -> Result<Self, $crate::RosterError> {
                match s.trim() {
                    $($label => Ok(Role::$variant),)+
                    other => Err($crate::RosterError::UnknownRole(other.to_string())),
                }
            }
        }

        impl std::fmt::Display for Role {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for Role {
            type Err = $crate::RosterError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl serde::Serialize for Role {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for Role {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                Self::parse(&s).map_err(serde::de::Error::custom)
            }
        }
    };
}
