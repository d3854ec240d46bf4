//! Boundary scenarios on the built-in constant sets.

use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use taxguide_core::{
    EntityTier, ErrorKind, ReliefInputs, ScheduleRegistry, TaxEngine, TaxEngineError,
    annualize_monthly, compare_regimes, presets,
};

fn with_reform_engine(f: impl FnOnce(TaxEngine<'_>)) {
    let config = presets::reform_2025();
    let engine = TaxEngine::new(&config).expect("reform preset is valid");
    f(engine);
}

// =========================================================================
// personal income tax
// =========================================================================

#[test]
fn test_reform_bracket_boundaries() {
    with_reform_engine(|engine| {
        let cases = [
            (dec!(0), dec!(0)),
            (dec!(800000), dec!(0)),
            (dec!(800001), dec!(0.15)),
            (dec!(1200000), dec!(60000)),
            (dec!(1600000), dec!(120000)),
            (dec!(3200000), dec!(424000)),
            (dec!(7200000), dec!(1288000)),
            (dec!(50000000), dec!(11560000)),
        ];

        for (income, expected) in cases {
            let result = engine.compute_bracket_tax(income).expect("valid income");
            assert_eq!(result.total_tax, expected, "tax on {income}");
        }
    });
}

#[test]
fn test_monthly_income_flow() {
    with_reform_engine(|engine| {
        let annual = annualize_monthly(dec!(100000)).expect("valid monthly income");
        let result = engine.compute_bracket_tax(annual).expect("valid income");

        assert_eq!(annual, dec!(1200000));
        assert_eq!(result.monthly_tax(), dec!(5000));
        assert_eq!(result.monthly_net_income(), dec!(95000));
        assert_eq!(result.effective_rate, dec!(5.00));
    });
}

#[test]
fn test_relief_adjusted_breakdown_labels() {
    with_reform_engine(|engine| {
        let inputs = ReliefInputs {
            pension_rate: dec!(8),
            mortgage_interest: dec!(0),
            dependents_in_education: 0,
            housing_fund_contributor: false,
        };

        let result = engine
            .compute_relief_adjusted_tax(dec!(12000000), &inputs)
            .expect("valid inputs");

        // CRA: max(200,000, 120,000) + 2,400,000
        let reliefs = result.reliefs.clone().expect("reliefs present");
        assert_eq!(reliefs.pension, dec!(960000));
        assert_eq!(reliefs.consolidated, dec!(2600000));
        assert_eq!(result.taxable_income, dec!(8440000));

        let labels: Vec<&str> = result.breakdown.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "First 800,000 (tax-free)",
                "800,001 - 1,600,000 @ 15%",
                "1,600,001 - 3,200,000 @ 19%",
                "3,200,001 - 6,400,000 @ 21%",
                "6,400,001 - 50,000,000 @ 24%",
            ]
        );
    });
}

#[test]
fn test_invalid_personal_inputs_are_argument_errors() {
    with_reform_engine(|engine| {
        let too_generous = ReliefInputs {
            pension_rate: dec!(21),
            ..ReliefInputs::default()
        };

        let negative = engine.compute_bracket_tax(dec!(-5)).unwrap_err();
        let pension = engine
            .compute_relief_adjusted_tax(dec!(1000000), &too_generous)
            .unwrap_err();

        assert_eq!(negative.kind(), ErrorKind::InvalidArgument);
        assert_eq!(pension.kind(), ErrorKind::InvalidArgument);
    });
}

// =========================================================================
// company tax
// =========================================================================

#[test]
fn test_reform_company_threshold_edges() {
    with_reform_engine(|engine| {
        let at_threshold = engine
            .classify_and_tax_company_with_assets(dec!(50000000), dec!(250000000), dec!(8000000))
            .expect("valid company");
        let above_threshold = engine
            .classify_and_tax_company_with_assets(dec!(50000001), dec!(250000000), dec!(8000000))
            .expect("valid company");

        assert_eq!(at_threshold.tier, EntityTier::Small);
        assert_eq!(at_threshold.total_tax, dec!(0));
        assert_eq!(above_threshold.tier, EntityTier::Large);
        assert_eq!(above_threshold.cit, dec!(2400000));
        assert_eq!(above_threshold.development_levy, dec!(320000));
        assert_eq!(above_threshold.effective_rate, dec!(34));
    });
}

#[test]
fn test_reform_company_requires_assets() {
    with_reform_engine(|engine| {
        let result = engine.classify_and_tax_company(dec!(1000000), dec!(100000));

        assert_eq!(result, Err(TaxEngineError::MissingFixedAssets));
    });
}

#[test]
fn test_pre_reform_company_threshold_edges() {
    let config = presets::pre_reform();
    let engine = TaxEngine::new(&config).expect("pre-reform preset is valid");

    assert_eq!(
        engine.classify_company(dec!(25000000), None),
        Ok(EntityTier::Small)
    );
    assert_eq!(
        engine.classify_company(dec!(25000001), None),
        Ok(EntityTier::Large)
    );
}

// =========================================================================
// registry and comparison
// =========================================================================

#[test]
fn test_registry_drives_comparison() {
    let registry = ScheduleRegistry::with_presets();
    let old = registry.get(presets::PRE_REFORM).expect("pre-reform registered");
    let new = registry.get(presets::REFORM_2025).expect("reform registered");

    let comparison = compare_regimes(old, new, dec!(3000000), &ReliefInputs::default())
        .expect("valid comparison");

    assert!(comparison.new_regime_is_cheaper());
    assert_eq!(comparison.old.reliefs, comparison.new.reliefs);
}
