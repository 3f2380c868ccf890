//! A single roster entry.

use serde::{Deserialize, Serialize};

use crate::{Role, RosterError};

/// A named person holding exactly one role.
///
/// The name is trimmed and never empty. Fields are private so a constructed
/// person cannot be edited in place; editing a roster replaces entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPerson")]
pub struct Person {
    name: String,
    role: Role,
}

impl Person {
    /// Creates a person, trimming the name.
    pub fn new(name: impl AsRef<str>, role: Role) -> Result<Self, RosterError> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(RosterError::EmptyName);
        }

        Ok(Self {
            name: name.to_string(),
            role,
        })
    }

    /// Creates a person from free-form input, normalizing the role.
    ///
    /// An empty or unrecognised role becomes [`Role::Crew`].
    pub fn from_raw(name: impl AsRef<str>, role: &str) -> Result<Self, RosterError> {
        Self::new(name, Role::normalize(role))
    }

    /// The person's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The person's role.
    pub fn role(&self) -> Role {
        self.role
    }
}

impl std::fmt::Display for Person {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.name, self.role)
    }
}

#[derive(Deserialize)]
struct RawPerson {
    name: String,
    #[serde(default)]
    role: Option<String>,
}

impl TryFrom<RawPerson> for Person {
    type Error = RosterError;

    fn try_from(raw: RawPerson) -> Result<Self, Self::Error> {
        Person::from_raw(raw.name, raw.role.as_deref().unwrap_or(""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_is_trimmed() {
        let person = Person::new("  Ada  ", Role::Writer).unwrap();
        assert_eq!(person.name(), "Ada");
        assert_eq!(person.role(), Role::Writer);
    }

    #[test]
    fn test_empty_name_rejected() {
        assert!(matches!(
            Person::new("   ", Role::Crew),
            Err(RosterError::EmptyName)
        ));
    }

    #[test]
    fn test_from_raw_normalizes_role() {
        assert_eq!(Person::from_raw("Bo", "").unwrap().role(), Role::Crew);
        assert_eq!(Person::from_raw("Bo", "mime").unwrap().role(), Role::Crew);
        assert_eq!(Person::from_raw("Bo", "dp").unwrap().role(), Role::Crew);
        assert_eq!(Person::from_raw("Bo", " DP ").unwrap().role(), Role::Dp);
    }

    #[test]
    fn test_display_matches_export_line() {
        let person = Person::new("Cy", Role::SoundMixer).unwrap();
        assert_eq!(person.to_string(), "Cy - SOUND MIXER");
    }

    #[test]
    fn test_deserialize_normalizes() {
        let person: Person = serde_json::from_str(r#"{"name":" Di ","role":"nobody"}"#).unwrap();
        assert_eq!(person.name(), "Di");
        assert_eq!(person.role(), Role::Crew);

        assert!(serde_json::from_str::<Person>(r#"{"name":""}"#).is_err());
    }
}
