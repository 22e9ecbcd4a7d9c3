//! Availability filter: narrows an exercise pool to what the user can safely do
//! with the equipment they have.

use std::collections::BTreeSet;

use crate::catalog::Exercise;
use crate::profile::{Constraint, Equipment};

/// Whether `owned` covers every item in `required`. Bodyweight exercises
/// (empty `required`) are always covered; a full gym covers everything.
pub fn covers_equipment(owned: &BTreeSet<Equipment>, required: &[Equipment]) -> bool {
    if owned.contains(&Equipment::Gym) {
        return true;
    }
    required.iter().all(|item| owned.contains(item))
}

pub fn is_contraindicated(exercise: &Exercise, constraints: &BTreeSet<Constraint>) -> bool {
    exercise
        .contraindications
        .iter()
        .any(|tag| constraints.contains(tag))
}

pub fn is_available(
    exercise: &Exercise,
    equipment: &BTreeSet<Equipment>,
    constraints: &BTreeSet<Constraint>,
) -> bool {
    covers_equipment(equipment, exercise.equipment) && !is_contraindicated(exercise, constraints)
}

/// Eligible exercises from `pool`, in input order. May be empty.
pub fn filter_available<'a>(
    pool: &[&'a Exercise],
    equipment: &BTreeSet<Equipment>,
    constraints: &BTreeSet<Constraint>,
) -> Vec<&'a Exercise> {
    pool.iter()
        .copied()
        .filter(|exercise| is_available(exercise, equipment, constraints))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{self, ExerciseCategory};

    fn set<T: Ord + Copy>(items: &[T]) -> BTreeSet<T> {
        items.iter().copied().collect()
    }

    #[test]
    fn bodyweight_only_keeps_exercises_without_equipment() {
        let pool = catalog::pool(ExerciseCategory::Upper);
        let out = filter_available(&pool, &set(&[Equipment::None]), &BTreeSet::new());
        assert!(!out.is_empty());
        assert!(out.iter().all(|e| e.is_bodyweight()));
        assert!(!out.iter().any(|e| e.id == "barbell_bench_press"));
    }

    #[test]
    fn every_required_item_must_be_owned() {
        let press = catalog::find("dumbbell_bench_press").unwrap();
        assert!(!is_available(press, &set(&[Equipment::Dumbbells]), &BTreeSet::new()));
        assert!(is_available(
            press,
            &set(&[Equipment::Dumbbells, Equipment::Bench]),
            &BTreeSet::new()
        ));
    }

    #[test]
    fn gym_covers_everything() {
        let pulldown = catalog::find("lat_pulldown").unwrap();
        let squat = catalog::find("barbell_back_squat").unwrap();
        let gym = set(&[Equipment::Gym]);
        assert!(is_available(pulldown, &gym, &BTreeSet::new()));
        assert!(is_available(squat, &gym, &BTreeSet::new()));
    }

    #[test]
    fn contraindicated_exercises_are_removed() {
        let pool = catalog::pool(ExerciseCategory::Hiit);
        let out = filter_available(
            &pool,
            &set(&[Equipment::Gym]),
            &set(&[Constraint::KneeIssue]),
        );
        assert!(out.iter().all(|e| !e.contraindications.contains(&Constraint::KneeIssue)));
        assert!(!out.iter().any(|e| e.id == "burpee" || e.id == "tuck_jump"));
    }

    #[test]
    fn output_preserves_input_order_and_tolerates_empty_pool() {
        let pool = catalog::pool(ExerciseCategory::Stretch);
        let out = filter_available(&pool, &set(&[Equipment::None]), &BTreeSet::new());
        let ids: Vec<&str> = out.iter().map(|e| e.id).collect();
        let expected: Vec<&str> = pool.iter().map(|e| e.id).collect();
        assert_eq!(ids, expected);

        let empty: Vec<&Exercise> = Vec::new();
        assert!(filter_available(&empty, &set(&[Equipment::None]), &BTreeSet::new()).is_empty());
    }
}
