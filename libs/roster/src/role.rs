//! The crew role set.
//!
//! Two roles are distinguished by the group allocator: [`Role::Writer`] and
//! [`Role::Dp`]. [`Role::Crew`] is the default for anything unspecified or
//! unrecognised.

use crate::define_roles;

define_roles! {
    Director => "DIRECTOR",
    Producer => "PRODUCER",
    AssociateProducer => "ASSOCIATE PRODUCER",
    ExecutiveProducer => "EXECUTIVE PRODUCER",
    Writer => "WRITER",
    Screenwriter => "SCREENWRITER",
    StoryDeveloper => "STORY DEVELOPER",
    Dp => "DP",
    Cameraman => "CAMERAMAN",
    Gaffer => "GAFFER",
    BestBoy => "BEST BOY",
    Grip => "GRIP",
    KeyGrip => "KEY GRIP",
    Electrician => "ELECTRICIAN",
    SoundMixer => "SOUND MIXER",
    SoundDesigner => "SOUND DESIGNER",
    SoundRecordist => "SOUND RECORDIST",
    MakeupArtist => "MAKEUP ARTIST",
    HairStylist => "HAIR STYLIST",
    CostumeDesigner => "COSTUME DESIGNER",
    Costumer => "COSTUMER",
    Actor => "ACTOR",
    SupportingActor => "SUPPORTING ACTOR",
    Extra => "EXTRA",
    ScriptSupervisor => "SCRIPT SUPERVISOR",
    ArtDirector => "ART DIRECTOR",
    ProductionDesigner => "PRODUCTION DESIGNER",
    SetDecorator => "SET DECORATOR",
    LocationManager => "LOCATION MANAGER",
    ProductionAssistant => "PRODUCTION ASSISTANT",
    StuntCoordinator => "STUNT COORDINATOR",
    Choreographer => "CHOREOGRAPHER",
    VisualEffectsSupervisor => "VISUAL EFFECTS SUPERVISOR",
    Editor => "EDITOR",
    PostProductionSupervisor => "POST-PRODUCTION SUPERVISOR",
    Colorist => "COLORIST",
    Composer => "COMPOSER",
    MusicSupervisor => "MUSIC SUPERVISOR",
    Crew => "CREW",
}

impl Role {
    /// Normalizes free-form input to a role.
    ///
    /// Empty or unrecognised input maps to [`Role::Crew`].
    #[must_use]
    pub fn normalize(s: &str) -> Self {
        Self::parse(s).unwrap_or_default()
    }

    /// Returns roles whose label contains `query`, ignoring case.
    ///
    /// Results are sorted case-insensitively. An empty query returns every role.
    #[must_use]
    pub fn search(query: &str) -> Vec<Role> {
        let needle = query.trim().to_lowercase();
        let mut matches: Vec<Role> = Self::ALL
            .iter()
            .copied()
            .filter(|role| role.as_str().to_lowercase().contains(&needle))
            .collect();
        matches.sort_by_key(|role| role.as_str().to_lowercase());
        matches
    }

    /// Returns true for the role that can be required once per group (WRITER).
    #[must_use]
    pub fn is_writer(&self) -> bool {
        matches!(self, Role::Writer)
    }

    /// Returns true for the role that can be required once per group and is capped (DP).
    #[must_use]
    pub fn is_dp(&self) -> bool {
        matches!(self, Role::Dp)
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Crew
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RosterError;
    use rstest::rstest;

    #[test]
    fn test_parse_requires_exact_label() {
        assert_eq!(Role::parse("WRITER").unwrap(), Role::Writer);
        assert_eq!(Role::parse("  DP ").unwrap(), Role::Dp);
        assert_eq!(
            Role::parse(Role::PostProductionSupervisor.as_str()).unwrap(),
            Role::PostProductionSupervisor
        );
        assert!(matches!(
            Role::parse(" writer "),
            Err(RosterError::UnknownRole(label)) if label == "writer"
        ));
        assert!(Role::parse("Dp").is_err());
        assert!(Role::parse("BOOM OPERATOR").is_err());
        assert!(Role::parse("").is_err());
    }

    #[rstest]
    #[case("", Role::Crew)]
    #[case("   ", Role::Crew)]
    #[case("caterer", Role::Crew)]
    #[case("GAFFER", Role::Gaffer)]
    #[case(" WRITER ", Role::Writer)]
    #[case("writer", Role::Crew)]
    #[case(" Writer", Role::Crew)]
    #[case("dp", Role::Crew)]
    fn test_normalize(#[case] input: &str, #[case] expected: Role) {
        assert_eq!(Role::normalize(input), expected);
    }

    #[test]
    fn test_all_labels_roundtrip() {
        assert_eq!(Role::ALL.len(), 39);
        for role in Role::ALL {
            assert_eq!(Role::parse(role.as_str()).unwrap(), *role);
        }
    }

    #[test]
    fn test_search() {
        let sound = Role::search("sound");
        assert_eq!(
            sound,
            vec![Role::SoundDesigner, Role::SoundMixer, Role::SoundRecordist]
        );

        assert!(Role::search("zzz").is_empty());
        assert_eq!(Role::search("").len(), Role::ALL.len());
        assert_eq!(Role::search("")[0], Role::Actor);
    }

    #[test]
    fn test_distinguished_roles() {
        assert!(Role::Writer.is_writer());
        assert!(!Role::Screenwriter.is_writer());
        assert!(Role::Dp.is_dp());
        assert!(!Role::Cameraman.is_dp());
    }

    #[test]
    fn test_serde_uses_label() {
        let json = serde_json::to_string(&Role::KeyGrip).unwrap();
        assert_eq!(json, "\"KEY GRIP\"");
        let back: Role = serde_json::from_str("\"KEY GRIP\"").unwrap();
        assert_eq!(back, Role::KeyGrip);
        assert!(serde_json::from_str::<Role>("\"key grip\"").is_err());
    }
}
