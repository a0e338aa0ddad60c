//! Unit tests for pd-fertility.

#[cfg(test)]
mod fixtures {
    use chrono::NaiveDate;
    use pd_agent::{Agent, AgentStore, Employment, FertilityState, Sex};
    use pd_core::{AgentId, FertilityType, JobId, Params, RelativeCohortSizes, SimRng};

    use crate::FertilityContext;

    pub const MOTHER: AgentId = AgentId(0);
    pub const FATHER: AgentId = AgentId(1);

    pub fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2000, 1, 1).unwrap()
    }

    /// Parameters with certain fecundity and yearly steps.
    pub fn params(kind: FertilityType) -> Params {
        Params { fertility_type: kind, fecundity_c: 0.0, ..Params::default() }
    }

    pub fn job() -> JobId {
        slotmap::SlotMap::<JobId, ()>::with_key().insert(())
    }

    pub fn person(id: AgentId, sex: Sex, age: i32, params: &Params) -> Agent {
        let fertility = (sex == Sex::Female)
            .then(|| FertilityState::new(params.fertility_type, params, &mut SimRng::new(7)));
        Agent {
            id,
            sex,
            dob: NaiveDate::from_ymd_opt(2000 - age, 1, 1).unwrap(),
            age_days: age as i64 * 365,
            age_years: age,
            experience_days: 0,
            skill: 0.5,
            aspiration: 10.0,
            imprinted: true,
            partner: None,
            mother: None,
            age_at_marriage: None,
            in_marriage_market: false,
            employment: Employment::default(),
            fertility,
            children: Vec::new(),
        }
    }

    /// A 28-year-old woman and, optionally, a 30-year-old partner earning
    /// `partner_wage` (`None` = unemployed).
    pub fn couple(params: &Params, partnered: bool, partner_wage: Option<f64>) -> AgentStore {
        let mut store = AgentStore::new();
        let mut mother = person(MOTHER, Sex::Female, 28, params);
        if partnered {
            let mut father = person(FATHER, Sex::Male, 30, params);
            if let Some(wage) = partner_wage {
                father.employment.job = Some(job());
                father.employment.wage = wage;
            }
            father.partner = Some(MOTHER);
            mother.partner = Some(FATHER);
            store.insert(father);
        }
        store.insert(mother);
        store
    }

    pub struct Sizes {
        pub female: RelativeCohortSizes,
        pub male:   RelativeCohortSizes,
    }

    impl Default for Sizes {
        fn default() -> Self {
            Self { female: RelativeCohortSizes::zeros(2000), male: RelativeCohortSizes::zeros(2000) }
        }
    }

    pub fn ctx<'a>(params: &'a Params, store: &'a AgentStore, sizes: &'a Sizes) -> FertilityContext<'a> {
        FertilityContext::new(params, today(), 1.0, store, 0.0, &sizes.female, &sizes.male)
    }

    /// Number of births in `n` independent decisions.
    pub fn births(policy: &impl crate::FertilityPolicy, ctx: &FertilityContext<'_>, n: usize) -> usize {
        let mut rng = SimRng::new(11);
        (0..n).filter(|_| policy.reproductive_behaviour(MOTHER, ctx, &mut rng)).count()
    }
}

#[cfg(test)]
mod cohort_variants {
    use pd_core::{FertilityType, RelativeCohortSizes};

    use super::fixtures::*;
    use crate::FertilityModel;

    #[test]
    fn simple_needs_no_partner() {
        let mut params = params(FertilityType::Simple);
        params.base_fertility_a = 1e6;
        let store = couple(&params, false, None);
        let sizes = Sizes::default();
        let model = FertilityModel::from_params(&params);
        assert_eq!(births(&model, &ctx(&params, &store, &sizes), 50), 50);

        params.base_fertility_a = 0.0;
        let model = FertilityModel::from_params(&params);
        assert_eq!(births(&model, &ctx(&params, &store, &sizes), 50), 0);
    }

    #[test]
    fn married_requires_partner() {
        let mut params = params(FertilityType::Married);
        params.base_fertility_a = 1e6;
        let sizes = Sizes::default();
        let model = FertilityModel::from_params(&params);

        let single = couple(&params, false, None);
        assert_eq!(births(&model, &ctx(&params, &single, &sizes), 50), 0);
        let married = couple(&params, true, None);
        assert_eq!(births(&model, &ctx(&params, &married, &sizes), 50), 50);
    }

    #[test]
    fn partner_variant_reads_partners_male_cohort() {
        let mut params = params(FertilityType::Partner);
        params.feedback_mult = 1000.0;
        let store = couple(&params, true, None);
        let model = FertilityModel::from_params(&params);

        // Partner born 1970.  A crowded 1970 male cohort suppresses births.
        let crowded = Sizes {
            male: RelativeCohortSizes::from_counts(2000, |y| if (1965..=1975).contains(&y) { 5.0 } else { 1.0 }),
            ..Sizes::default()
        };
        assert_eq!(births(&model, &ctx(&params, &store, &crowded), 100), 0);

        let sparse = Sizes {
            male: RelativeCohortSizes::from_counts(2000, |y| if (1965..=1975).contains(&y) { 0.1 } else { 1.0 }),
            ..Sizes::default()
        };
        assert_eq!(births(&model, &ctx(&params, &store, &sparse), 100), 100);
    }

    #[test]
    fn soft_easterlin_requires_employed_partner() {
        let mut params = params(FertilityType::SoftEasterlin);
        params.base_fertility_a = 1e6;
        let sizes = Sizes::default();
        let model = FertilityModel::from_params(&params);

        let unemployed = couple(&params, true, None);
        assert_eq!(births(&model, &ctx(&params, &unemployed, &sizes), 50), 0);
        let employed = couple(&params, true, Some(40.0));
        assert_eq!(births(&model, &ctx(&params, &employed, &sizes), 50), 50);
    }
}

#[cfg(test)]
mod easterlin_variants {
    use chrono::Duration;
    use pd_core::{FertilityType, SimRng};

    use super::fixtures::*;
    use crate::{FertilityModel, FertilityPolicy};

    #[test]
    fn first_birth_gate_compares_income_to_threshold() {
        let params = params(FertilityType::Easterlin);
        let sizes = Sizes::default();
        let model = FertilityModel::from_params(&params);

        // threshold 10, offset 0.1 → income must exceed 9.
        let rich = couple(&params, true, Some(9.5));
        assert_eq!(births(&model, &ctx(&params, &rich, &sizes), 20), 20);
        let poor = couple(&params, true, Some(8.5));
        assert_eq!(births(&model, &ctx(&params, &poor, &sizes), 20), 0);
        let single = couple(&params, false, None);
        assert_eq!(births(&model, &ctx(&params, &single, &sizes), 20), 0);
    }

    #[test]
    fn no_second_birth_within_a_year() {
        for kind in [FertilityType::Easterlin, FertilityType::ParityEasterlin, FertilityType::Hetero] {
            let mut params = params(kind);
            params.further_fertility_a = 1e6;
            let mut store = couple(&params, true, Some(1e6));
            let state = store.get_mut(MOTHER).unwrap().fertility.as_mut().unwrap();
            state.record_birth(today() - Duration::days(200));
            state.desired_family_size = Some(6);
            let sizes = Sizes::default();
            let model = FertilityModel::from_params(&params);
            assert_eq!(births(&model, &ctx(&params, &store, &sizes), 50), 0, "{kind}");
        }
    }

    #[test]
    fn parity_easterlin_later_births_skip_the_gate() {
        let mut params = params(FertilityType::ParityEasterlin);
        params.further_fertility_a = 1e6;
        // Unemployed partner with zero benefit would fail the first-birth gate.
        let mut store = couple(&params, true, None);
        store.get_mut(MOTHER).unwrap().fertility.as_mut().unwrap().record_birth(today() - Duration::days(800));
        let sizes = Sizes::default();
        let model = FertilityModel::from_params(&params);
        assert_eq!(births(&model, &ctx(&params, &store, &sizes), 30), 30);

        let mut easterlin = params.clone();
        easterlin.fertility_type = FertilityType::Easterlin;
        let mut store = couple(&easterlin, true, None);
        store.get_mut(MOTHER).unwrap().fertility.as_mut().unwrap().record_birth(today() - Duration::days(800));
        let model = FertilityModel::from_params(&easterlin);
        assert_eq!(births(&model, &ctx(&easterlin, &store, &sizes), 30), 0);
    }

    #[test]
    fn prob_easterlin_never_starts_a_family_without_income() {
        let params = params(FertilityType::ProbEasterlin);
        let store = couple(&params, true, None);
        let sizes = Sizes::default();
        let model = FertilityModel::from_params(&params);
        assert_eq!(births(&model, &ctx(&params, &store, &sizes), 200), 0);
    }

    #[test]
    fn prob_easterlin_is_capped_by_asymptote() {
        let params = params(FertilityType::ProbEasterlin);
        let store = couple(&params, true, Some(1e9));
        let sizes = Sizes::default();
        let model = FertilityModel::from_params(&params);
        let n = 2_000;
        let rate = births(&model, &ctx(&params, &store, &sizes), n) as f64 / n as f64;
        assert!((rate - params.prob_asymptote).abs() < 0.05, "{rate}");
    }

    #[test]
    fn hetero_stops_at_desired_size() {
        let mut params = params(FertilityType::Hetero);
        params.further_fertility_a = 1e6;
        let mut store = couple(&params, true, Some(1e6));
        let state = store.get_mut(MOTHER).unwrap().fertility.as_mut().unwrap();
        state.record_birth(today() - Duration::days(3 * 365));
        state.record_birth(today() - Duration::days(2 * 365));
        let sizes = Sizes::default();
        let model = FertilityModel::from_params(&params);

        store.get_mut(MOTHER).unwrap().fertility.as_mut().unwrap().desired_family_size = Some(2);
        assert_eq!(births(&model, &ctx(&params, &store, &sizes), 20), 0);
        store.get_mut(MOTHER).unwrap().fertility.as_mut().unwrap().desired_family_size = Some(3);
        assert_eq!(births(&model, &ctx(&params, &store, &sizes), 20), 20);
    }

    #[test]
    fn family_formation_by_variant() {
        let sizes = Sizes::default();
        let mut rng = SimRng::new(3);
        for kind in [FertilityType::Simple, FertilityType::SoftEasterlin] {
            let params = params(kind);
            let store = couple(&params, true, None);
            let model = FertilityModel::from_params(&params);
            assert!(model.family_formation_ok(MOTHER, &ctx(&params, &store, &sizes), &mut rng), "{kind}");
        }
        for kind in [FertilityType::Easterlin, FertilityType::ParityEasterlin, FertilityType::Hetero] {
            let params = params(kind);
            let model = FertilityModel::from_params(&params);
            let poor = couple(&params, true, None);
            assert!(!model.family_formation_ok(MOTHER, &ctx(&params, &poor, &sizes), &mut rng), "{kind}");
            let rich = couple(&params, true, Some(100.0));
            assert!(model.family_formation_ok(MOTHER, &ctx(&params, &rich, &sizes), &mut rng), "{kind}");
        }
    }

    #[test]
    fn fecundity_limits_births() {
        let mut params = params(FertilityType::Easterlin);
        params.fecundity_a = 0.0;
        let store = couple(&params, true, Some(100.0));
        let sizes = Sizes::default();
        let model = FertilityModel::from_params(&params);
        assert_eq!(births(&model, &ctx(&params, &store, &sizes), 50), 0);
    }
}

#[cfg(test)]
mod infertile {
    use pd_core::FertilityType;

    use super::fixtures::*;
    use crate::Infertile;

    #[test]
    fn never_gives_birth() {
        let params = params(FertilityType::Simple);
        let store = couple(&params, true, Some(100.0));
        let sizes = Sizes::default();
        assert_eq!(births(&Infertile, &ctx(&params, &store, &sizes), 20), 0);
    }
}

#[cfg(test)]
mod inheritance {
    use pd_core::SimRng;

    use crate::inherited_skill;

    #[test]
    fn stays_in_unit_interval() {
        let mut rng = SimRng::new(5);
        for (m, f) in [(0.0, 0.0), (1.0, 1.0), (0.2, 0.9), (0.5, 0.5)] {
            for _ in 0..100 {
                let s = inherited_skill(m, f, 0.5, &mut rng);
                assert!((0.0..=1.0).contains(&s), "{s}");
            }
        }
    }

    #[test]
    fn full_correlation_reproduces_parent_mean() {
        let mut rng = SimRng::new(5);
        let s = inherited_skill(0.3, 0.5, 1.0, &mut rng);
        assert!((s - 0.4).abs() < 1e-6, "{s}");
    }
}
