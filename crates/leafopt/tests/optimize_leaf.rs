use approx::assert_relative_eq;
use leafopt::{
    CarbonCosts, Convergence, Error, LeafRecord, Options, Trait, TraitSelection, optimize_leaf,
    params::{BakeParams, Constants, EnviroParams, LeafParams, Namespace},
    units::{Quantity, Unit},
};

/// Default leaf with enough electron transport to stay Rubisco limited.
fn leaf() -> LeafParams {
    LeafParams::default()
        .with(
            "J_max25",
            Quantity::new(250.0, Unit::MicromolePerSquareMetreSecond),
        )
        .expect("valid leaf parameter")
}

fn quiet() -> Options {
    Options {
        quiet: true,
        ..Options::default()
    }
}

fn run(traits: &[Trait], costs: CarbonCosts, leaf: &LeafParams) -> Result<LeafRecord, Error> {
    let traits = TraitSelection::new(traits.iter().copied()).expect("valid selection");
    optimize_leaf(
        &traits,
        &costs,
        &BakeParams::default(),
        &Constants::default(),
        &EnviroParams::default(),
        leaf,
        &quiet(),
    )
}

fn value(record: &LeafRecord, name: &str) -> f64 {
    record
        .value(name)
        .unwrap_or_else(|| panic!("`{name}` missing"))
}

#[test]
fn conductance_optimum_lies_within_bounds() {
    let record = run(&[Trait::Conductance], CarbonCosts::new(0.002, 0.0), &leaf())
        .expect("optimization converges");

    let g_sc = value(&record, "g_sc");
    assert!((0.0..=10.0).contains(&g_sc), "g_sc = {g_sc}");
    assert_relative_eq!(value(&record, "convergence"), 0.0);
    assert_eq!(
        record.get("g_sc").map(|q| q.unit),
        Some(Unit::MicromolePerSquareMetreSecondPascal)
    );
}

#[test]
fn optimum_is_no_worse_than_the_starting_leaf() {
    let costs = CarbonCosts::new(0.002, 0.0);
    let optimized = run(&[Trait::Conductance], costs, &leaf()).expect("optimization converges");
    let fixed = run(&[], costs, &leaf()).expect("evaluation succeeds");

    assert!(value(&optimized, "value") <= value(&fixed, "value") + 1e-9);
}

#[test]
fn energy_balance_closes_at_the_optimum() {
    let record = run(&[Trait::Conductance], CarbonCosts::new(0.002, 0.0), &leaf())
        .expect("optimization converges");

    let residual = value(&record, "R_abs")
        - value(&record, "S_r")
        - value(&record, "H")
        - value(&record, "L");
    assert!(residual.abs() < 0.05, "residual = {residual}");
}

#[test]
fn output_omits_constants_and_temperature_responses() {
    let record = run(&[], CarbonCosts::new(0.0, 0.0), &leaf()).expect("evaluation succeeds");

    for ns in [Namespace::Constants, Namespace::Bake] {
        for def in ns.defs() {
            assert!(!record.contains(def.name), "`{}` leaked", def.name);
        }
    }
    assert!(record.contains("value"));
    assert!(record.contains("convergence"));
}

#[test]
fn empty_selection_reports_negated_carbon_gain() {
    let record = run(&[], CarbonCosts::new(0.0, 0.0), &leaf()).expect("evaluation succeeds");

    assert_relative_eq!(value(&record, "value"), -value(&record, "A"), epsilon = 1e-9);
    assert_relative_eq!(value(&record, "g_sc"), 4.0);
}

#[test]
fn water_conductance_rises_with_co2_conductance() {
    let mut previous = 0.0;
    for g_sc in [0.5, 2.0, 6.0] {
        let leaf = leaf()
            .with(
                "g_sc",
                Quantity::new(g_sc, Unit::MicromolePerSquareMetreSecondPascal),
            )
            .expect("valid conductance");
        let record = run(&[], CarbonCosts::new(0.0, 0.0), &leaf).expect("evaluation succeeds");

        let g_sw = value(&record, "g_sw");
        assert!(g_sw > previous, "g_sw = {g_sw} at g_sc = {g_sc}");
        previous = g_sw;
    }
}

#[test]
fn objective_grows_with_water_cost() {
    let cheap = run(&[], CarbonCosts::new(0.0, 0.0), &leaf()).expect("evaluation succeeds");
    let dear = run(&[], CarbonCosts::new(0.002, 0.0), &leaf()).expect("evaluation succeeds");

    assert!(value(&cheap, "E") > 0.0);
    assert!(value(&dear, "value") >= value(&cheap, "value"));
}

#[test]
fn out_of_range_parameters_are_rejected_when_checked() {
    let leaf = leaf()
        .with("abs_s", Quantity::new(1.5, Unit::Dimensionless))
        .expect("name and unit are valid");

    let err = run(&[], CarbonCosts::new(0.0, 0.0), &leaf).unwrap_err();
    assert!(matches!(err, Error::Input(_)), "{err}");
}

#[test]
fn negative_costs_are_rejected() {
    let err = run(&[], CarbonCosts::new(-1.0, 0.0), &leaf()).unwrap_err();
    assert!(matches!(err, Error::Input(_)), "{err}");
}

#[test]
fn convergence_codes_are_reported_as_numbers() {
    assert_eq!(Convergence::Success.code(), 0);
    let record = run(&[], CarbonCosts::new(0.0, 0.0), &leaf()).expect("evaluation succeeds");
    assert_eq!(
        record.get("convergence"),
        Some(&Quantity::new(0.0, Unit::Dimensionless))
    );
}
