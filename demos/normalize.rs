use clap::Parser;
use log::info;

use formula_rs::and_or::AndOrSimplifier;
use formula_rs::arena::FormulaArena;
use formula_rs::core_dead::CoreDeadSimplifier;
use formula_rs::feature_model::{Feature, FeatureModel, GroupKind};
use formula_rs::formula::Formula;
use formula_rs::value::ValueAssignment;
use formula_rs::variable_map::VariableMap;

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Core features (always selected), comma-separated.
    #[arg(long, value_name = "NAMES", value_delimiter = ',')]
    core: Vec<String>,

    /// Dead features (never selected), comma-separated.
    #[arg(long, value_name = "NAMES", value_delimiter = ',')]
    dead: Vec<String>,

    /// Print the reduced formula in DOT format.
    #[clap(long)]
    dot: bool,
}

fn sandwich() -> FeatureModel {
    FeatureModel::new(
        Feature::new("Sandwich")
            .child(
                Feature::new("Bread")
                    .mandatory()
                    .group(GroupKind::Alternative)
                    .child(Feature::new("Sourdough"))
                    .child(Feature::new("Wheat")),
            )
            .child(
                Feature::new("Cheese")
                    .group(GroupKind::Or)
                    .child(Feature::new("Gouda"))
                    .child(Feature::new("Cheddar")),
            )
            .child(Feature::new("Sauce").hidden()),
    )
    .with_constraint(Formula::implies(Formula::pos("Sauce"), Formula::neg("Cheddar")))
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Debug,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let args = Cli::parse();
    println!("args = {:?}", args);

    let fm = sandwich().to_formula()?;
    println!("formula = {}", fm.formula);
    println!("hidden = {:?}", fm.hidden_variables);

    let map = VariableMap::from_names(fm.formula.variable_names())?;
    println!("variables = {}", map);

    let mut values = ValueAssignment::new();
    for name in &args.core {
        values.set(name.as_str(), true);
    }
    for name in &args.dead {
        values.set(name.as_str(), false);
    }
    let fixed = values.to_boolean(&map);
    for problem in &fixed.problems {
        info!("{}", problem);
    }
    println!("fixed literals = {}", fixed.value);

    let mut arena = FormulaArena::new();
    let body = arena.insert(&fm.formula);
    let root = arena.mk_reference(body);
    CoreDeadSimplifier::new(values).apply(&mut arena, root)?;
    AndOrSimplifier::new().apply(&mut arena, root)?;
    println!("reduced = {}", arena.to_boxed(root));

    if args.dot {
        println!("{}", arena.to_dot(&[root])?);
    }

    Ok(())
}
