//! Property tests for group allocation.

use crewgroup_allocator::{allocate_seeded, plan_group_count, AllocationError, Constraints};
use crewgroup_roster::{Person, Role, Roster};
use proptest::prelude::*;

fn role_strategy() -> impl Strategy<Value = Role> {
    prop_oneof![
        Just(Role::Writer),
        Just(Role::Dp),
        Just(Role::Crew),
        Just(Role::Gaffer),
        Just(Role::Actor),
    ]
}

fn roster_strategy() -> impl Strategy<Value = Roster> {
    prop::collection::vec(role_strategy(), 1..40).prop_map(|roles| {
        roles
            .into_iter()
            .enumerate()
            .map(|(i, role)| Person::new(format!("p{:02}", i), role).unwrap())
            .collect::<Roster>()
    })
}

fn constraints_strategy() -> impl Strategy<Value = Constraints> {
    (1usize..10, 2usize..6, any::<bool>(), any::<bool>()).prop_map(
        |(groups, min_size, writer, dp)| {
            Constraints::new(groups, min_size)
                .with_require_writer(writer)
                .with_require_dp(dp)
        },
    )
}

fn names(roster: &Roster) -> Vec<String> {
    let mut all: Vec<String> = roster.iter().map(|p| p.name().to_string()).collect();
    all.sort();
    all
}

proptest! {
    #[test]
    fn every_person_placed_exactly_once(
        roster in roster_strategy(),
        constraints in constraints_strategy(),
        seed in any::<u64>(),
    ) {
        if let Ok(allocation) = allocate_seeded(&roster, &constraints, seed) {
            let mut placed: Vec<String> = allocation
                .groups()
                .iter()
                .flat_map(|g| g.members().iter().map(|p| p.name().to_string()))
                .collect();
            placed.sort();
            prop_assert_eq!(placed, names(&roster));
        }
    }

    #[test]
    fn group_count_within_bounds(
        roster in roster_strategy(),
        constraints in constraints_strategy(),
        seed in any::<u64>(),
    ) {
        if let Ok(allocation) = allocate_seeded(&roster, &constraints, seed) {
            prop_assert!(allocation.group_count() >= 1);
            prop_assert!(allocation.group_count() <= constraints.group_count);
            prop_assert_eq!(allocation.is_degraded(), allocation.group_count() < constraints.group_count);
        }
    }

    #[test]
    fn groups_reach_minimum_size(
        roster in roster_strategy(),
        constraints in constraints_strategy(),
        seed in any::<u64>(),
    ) {
        if let Ok(allocation) = allocate_seeded(&roster, &constraints, seed) {
            prop_assert!(roster.len() >= allocation.group_count() * constraints.min_group_size);
            for group in allocation.groups() {
                prop_assert!(group.len() >= constraints.min_group_size);
            }
        }
    }

    #[test]
    fn required_roles_seated_in_every_group(
        roster in roster_strategy(),
        constraints in constraints_strategy(),
        seed in any::<u64>(),
    ) {
        if let Ok(allocation) = allocate_seeded(&roster, &constraints, seed) {
            for group in allocation.groups() {
                if constraints.require_writer {
                    prop_assert!(group.count(Role::Writer) >= 1);
                }
                if constraints.require_dp {
                    prop_assert!(group.count(Role::Dp) >= 1);
                }
            }
        }
    }

    #[test]
    fn planning_is_repeatable(
        roster in roster_strategy(),
        constraints in constraints_strategy(),
    ) {
        let first = plan_group_count(&roster, &constraints);
        let second = plan_group_count(&roster, &constraints);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn failures_match_roster_shape(
        roster in roster_strategy(),
        constraints in constraints_strategy(),
        seed in any::<u64>(),
    ) {
        match allocate_seeded(&roster, &constraints, seed) {
            Ok(_) => {}
            Err(AllocationError::InsufficientPeople { people, min_group_size }) => {
                prop_assert!(people < min_group_size);
            }
            Err(AllocationError::NoWriterCandidate) => {
                prop_assert!(constraints.require_writer);
                prop_assert_eq!(roster.count(Role::Writer), 0);
            }
            Err(AllocationError::NoDpCandidate) => {
                prop_assert!(constraints.require_dp);
                prop_assert_eq!(roster.count(Role::Dp), 0);
            }
            Err(other) => prop_assert!(false, "unexpected error: {}", other),
        }
    }
}
