//! End-to-end tests: feature models through simplification to indexed literals.

use formula_rs::and_or::AndOrSimplifier;
use formula_rs::arena::FormulaArena;
use formula_rs::assignment::{BooleanClause, LiteralSet};
use formula_rs::core_dead::CoreDeadSimplifier;
use formula_rs::feature_model::{Feature, FeatureModel, GroupKind};
use formula_rs::formula::Formula;
use formula_rs::list::BooleanClauseList;
use formula_rs::value::{ValueAssignment, ValueSolution};
use formula_rs::variable_map::VariableMap;

fn phone() -> FeatureModel {
    FeatureModel::new(
        Feature::new("Phone")
            .child(
                Feature::new("Screen")
                    .mandatory()
                    .group(GroupKind::Alternative)
                    .child(Feature::new("Basic"))
                    .child(Feature::new("HighRes")),
            )
            .child(
                Feature::new("Media")
                    .group(GroupKind::Or)
                    .child(Feature::new("Camera"))
                    .child(Feature::new("Mp3")),
            )
            .child(Feature::new("Gps")),
    )
    .with_constraint(Formula::implies(Formula::pos("Camera"), Formula::pos("HighRes")))
    .with_constraint(Formula::not(Formula::and([Formula::pos("Gps"), Formula::pos("Basic")])))
}

/// Every total assignment of `names`, as value assignments.
fn all_assignments(names: &[String]) -> Vec<ValueAssignment> {
    (0..1u32 << names.len())
        .map(|bits| {
            ValueAssignment::from_pairs(
                names
                    .iter()
                    .enumerate()
                    .map(|(i, name)| (name.as_str(), bits & (1 << i) != 0)),
            )
        })
        .collect()
}

// ─── Simplification ────────────────────────────────────────────────────────────

#[test]
fn core_dead_reduction_preserves_models() {
    let fm = phone().to_formula().unwrap();
    let names: Vec<String> = fm.formula.variable_names().into_iter().collect();
    assert_eq!(names.len(), 8);

    let fixed = ValueAssignment::from_pairs([("Phone", true), ("Screen", true), ("Gps", false)]);
    let reduced = CoreDeadSimplifier::new(fixed.clone()).simplify(&fm.formula).unwrap();
    let normalized = AndOrSimplifier::new().simplify(&reduced).unwrap();

    assert!(!normalized.variable_names().contains("Phone"));
    assert!(!normalized.variable_names().contains("Gps"));

    for assignment in all_assignments(&names) {
        let agrees = fixed
            .iter()
            .all(|(name, value)| assignment.get(name) == Some(value));
        if !agrees {
            continue;
        }
        assert_eq!(
            normalized.evaluate(&assignment),
            fm.formula.evaluate(&assignment),
            "under {}",
            assignment
        );
    }
}

#[test]
fn normalizer_preserves_models() {
    let fm = phone().to_formula().unwrap();
    let nested = Formula::and([Formula::or([fm.formula.clone()]), Formula::and([Formula::True])]);
    let normalized = AndOrSimplifier::new().simplify(&nested).unwrap();
    let names: Vec<String> = fm.formula.variable_names().into_iter().collect();
    for assignment in all_assignments(&names) {
        assert_eq!(normalized.evaluate(&assignment), nested.evaluate(&assignment));
    }
}

#[test]
fn reduction_in_shared_arena() {
    let fm = phone().to_formula().unwrap();
    let mut arena = FormulaArena::new();
    let body = arena.insert(&fm.formula);
    let root = arena.mk_reference(body);

    let dead = ValueAssignment::from_pairs([("Phone", false)]);
    CoreDeadSimplifier::new(dead).apply(&mut arena, root).unwrap();
    assert_eq!(arena.to_boxed(arena.children(root)[0]), Formula::False);
}

#[test]
fn reduction_rejects_quantifiers() {
    let f = Formula::and([
        Formula::pos("a"),
        Formula::exists("n", Formula::equals(Formula::variable("n"), Formula::constant(1i64))),
    ]);
    let mut simplifier = CoreDeadSimplifier::new(ValueAssignment::from_pairs([("a", true)]));
    assert!(simplifier.simplify(&f).is_err());
}

// ─── Indexed literals ──────────────────────────────────────────────────────────

#[test]
fn configuration_to_literals_and_back() {
    let fm = phone().to_formula().unwrap();
    let map = VariableMap::from_names(fm.formula.variable_names()).unwrap();

    let mut config = ValueAssignment::new();
    config.set("Phone", true);
    config.set("Screen", true);
    config.set("HighRes", true);
    config.set("Basic", false);
    config.set("Unknown", true);
    assert_eq!(fm.formula.evaluate(&config), None);

    let solution = ValueSolution::new(config).to_boolean(&map);
    assert!(solution.has_warnings());
    assert_eq!(solution.value.len(), 4);
    assert_eq!(solution.value.variable_count(), map.len());

    let named = solution.value.to_value_name(&map);
    assert!(named.is_clean());
    assert_eq!(named.value.get("HighRes").and_then(|v| v.as_bool()), Some(true));
    assert_eq!(named.value.get("Basic").and_then(|v| v.as_bool()), Some(false));

    let reversed = VariableMap::from_names(map.names().collect::<Vec<_>>().into_iter().rev()).unwrap();
    let adapted = solution.value.adapt(&map, &reversed).unwrap();
    let renamed = formula_rs::assignment::BooleanAssignment::new(adapted).to_value_name(&reversed);
    assert_eq!(renamed.value, named.value);
}

#[test]
fn clause_list_from_constraints() {
    let map = VariableMap::from_names(["a", "b", "c"]).unwrap();
    let mut cnf = BooleanClauseList::new(map.len());
    cnf.push(BooleanClause::new(vec![1, -2, 1]));
    cnf.push(BooleanClause::new(vec![2, 3, -2]));
    cnf.push(BooleanClause::new(vec![-3]));

    let simplified = cnf.simplify();
    assert_eq!(simplified.len(), 2);

    let other = VariableMap::from_names(["c", "b", "a", "d"]).unwrap();
    let adapted = simplified.adapt(&map, &other).unwrap();
    assert_eq!(adapted.variable_count(), 4);
    let clauses: Vec<Vec<i32>> = adapted.iter().map(|c| c.literals().to_vec()).collect();
    assert_eq!(clauses, vec![vec![3, -2], vec![-1]]);
}
