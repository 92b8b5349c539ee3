//! Optimizations on the stock parameter set, checked against a brute-force scan.

use approx::assert_relative_eq;
use leafopt::{
    CarbonCosts, Error, LeafRecord, Options, Trait, TraitSelection, carbon_balance, optimize_leaf,
    params::{BakeParams, Constants, EnviroParams, Inputs, LeafParams, ParameterSet},
    physics::C3Leaf,
    units::{Quantity, Unit},
};

fn run(
    traits: &[Trait],
    costs: CarbonCosts,
    leaf: &LeafParams,
    options: &Options,
) -> Result<LeafRecord, Error> {
    let traits = TraitSelection::new(traits.iter().copied()).expect("valid selection");
    optimize_leaf(
        &traits,
        &costs,
        &BakeParams::default(),
        &Constants::default(),
        &EnviroParams::default(),
        leaf,
        options,
    )
}

fn quiet() -> Options {
    Options {
        quiet: true,
        ..Options::default()
    }
}

fn value(record: &LeafRecord, name: &str) -> f64 {
    record
        .value(name)
        .unwrap_or_else(|| panic!("`{name}` missing"))
}

/// Lowest objective on an evenly spaced grid that includes the bounds.
///
/// Points where the leaf cannot be solved are skipped.
fn scan(traits: &[Trait], costs: CarbonCosts, steps: usize) -> f64 {
    let selection = TraitSelection::new(traits.iter().copied()).expect("valid selection");
    let groups = [
        Constants::default().canonical(true),
        BakeParams::default().canonical(true),
        EnviroParams::default().canonical(true),
        LeafParams::default().canonical(true),
    ]
    .map(|group| group.expect("defaults convert"));
    let merged = ParameterSet::merge(&groups).expect("groups are disjoint");
    let inputs = Inputs::from_values(&merged.magnitudes(), &C3Leaf).expect("complete inputs");

    let mut points = vec![Vec::new()];
    for t in traits {
        let (lo, hi) = t.bounds();
        points = points
            .into_iter()
            .flat_map(|point: Vec<f64>| {
                (0..=steps).map(move |k| {
                    let mut next = point.clone();
                    next.push(lo + (hi - lo) * k as f64 / steps as f64);
                    next
                })
            })
            .collect();
    }

    points
        .iter()
        .filter_map(|x| carbon_balance(&C3Leaf, x, &selection, &costs, &inputs).ok())
        .fold(f64::INFINITY, f64::min)
}

fn assert_beats_scan(traits: &[Trait], costs: CarbonCosts, steps: usize) {
    let record =
        run(traits, costs, &LeafParams::default(), &quiet()).expect("optimization converges");
    assert_relative_eq!(value(&record, "convergence"), 0.0);

    for t in traits {
        let (lo, hi) = t.bounds();
        let x = value(&record, t.name());
        assert!((lo..=hi).contains(&x), "{} = {x}", t.name());
    }

    let best = value(&record, "value");
    let floor = scan(traits, costs, steps);
    assert!(floor.is_finite(), "scan found no solvable leaf");
    assert!(best <= floor + 1e-3, "optimum {best} is worse than scan {floor}");
}

#[test]
fn conductance_beats_scan() {
    assert_beats_scan(&[Trait::Conductance], CarbonCosts::new(0.002, 0.0), 400);
}

#[test]
fn conductance_and_leaf_size_beat_scan() {
    assert_beats_scan(
        &[Trait::Conductance, Trait::LeafSize],
        CarbonCosts::new(0.002, 0.1),
        40,
    );
}

#[test]
fn conductance_and_stomatal_ratio_beat_scan() {
    assert_beats_scan(
        &[Trait::Conductance, Trait::LogitStomatalRatio],
        CarbonCosts::new(0.002, 0.1),
        40,
    );
}

#[test]
fn all_three_traits_converge() {
    let traits = [Trait::Conductance, Trait::LeafSize, Trait::LogitStomatalRatio];
    let costs = CarbonCosts::new(0.002, 0.1);
    let record =
        run(&traits, costs, &LeafParams::default(), &quiet()).expect("optimization converges");
    let pair = run(
        &traits[..2],
        costs,
        &LeafParams::default(),
        &quiet(),
    )
    .expect("optimization converges");

    assert_relative_eq!(value(&record, "convergence"), 0.0);
    assert!(value(&record, "value") <= value(&pair, "value") + 1e-3);
}

#[test]
fn unconverted_magnitudes_are_taken_as_canonical() {
    let leaf = LeafParams::default()
        .with("leafsize", Quantity::new(10.0, Unit::Centimetre))
        .expect("length unit");

    let converted = run(&[], CarbonCosts::new(0.0, 0.0), &leaf, &quiet())
        .expect("10 cm is in range");
    assert_relative_eq!(value(&converted, "leafsize"), 0.1);

    let raw = Options {
        set_units: false,
        ..quiet()
    };
    let err = run(&[], CarbonCosts::new(0.0, 0.0), &leaf, &raw).unwrap_err();
    assert!(matches!(err, Error::Input(_)), "{err}");

    let stock = run(&[], CarbonCosts::new(0.0, 0.0), &LeafParams::default(), &raw)
        .expect("stock magnitudes are canonical");
    let default = run(&[], CarbonCosts::new(0.0, 0.0), &LeafParams::default(), &quiet())
        .expect("evaluation succeeds");
    assert_relative_eq!(value(&stock, "value"), value(&default, "value"));
}

#[test]
fn unchecked_runs_accept_out_of_range_values() {
    let leaf = LeafParams::default()
        .with("abs_s", Quantity::new(1.05, Unit::Dimensionless))
        .expect("name and unit are valid");
    let unchecked = Options {
        check: false,
        ..quiet()
    };

    let checked = run(&[], CarbonCosts::new(0.0, 0.0), &leaf, &quiet()).unwrap_err();
    assert!(matches!(checked, Error::Input(_)), "{checked}");

    let record = run(&[], CarbonCosts::new(0.0, 0.0), &leaf, &unchecked)
        .expect("range checks are skipped");
    assert_relative_eq!(value(&record, "abs_s"), 1.05);
    assert_relative_eq!(value(&record, "convergence"), 0.0);
}
