use std::collections::BTreeSet;

use clap::Args;
use serde_json::json;

use fitplan_core::catalog::{self, Exercise, ExerciseCategory};
use fitplan_core::filter::is_available;
use fitplan_core::{Constraint, Equipment};

use crate::util::print_json;

#[derive(Args)]
pub struct CatalogArgs {
    /// Only this category (warmup, upper, lower, core, cardio, hiit, stretch)
    #[arg(long)]
    pub category: Option<ExerciseCategory>,

    /// Keep only exercises doable with this equipment (repeatable)
    #[arg(long = "equipment")]
    pub equipment: Vec<Equipment>,

    /// Drop exercises unsafe for this constraint (repeatable)
    #[arg(long = "constraint")]
    pub constraints: Vec<Constraint>,

    /// Only low-impact exercises
    #[arg(long)]
    pub low_impact: bool,
}

pub fn run(args: CatalogArgs) -> i32 {
    let exercises = select(&args);
    print_json(&json!({
        "count": exercises.len(),
        "exercises": exercises,
    }))
}

fn select(args: &CatalogArgs) -> Vec<&'static Exercise> {
    let equipment: BTreeSet<Equipment> = if args.equipment.is_empty() {
        BTreeSet::from([Equipment::Gym])
    } else {
        args.equipment.iter().copied().collect()
    };
    let constraints: BTreeSet<Constraint> = args.constraints.iter().copied().collect();

    catalog::all()
        .iter()
        .filter(|e| args.category.is_none_or(|category| e.category == category))
        .filter(|e| !(args.low_impact && e.high_impact))
        .filter(|e| is_available(e, &equipment, &constraints))
        .collect()
}
