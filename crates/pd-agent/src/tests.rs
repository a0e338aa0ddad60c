//! Unit tests for pd-agent.

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::NaiveDate;
    use pd_core::{AgentId, JobId, Params, SimRng};

    use crate::{Agent, Employment, FertilityState, Sex};

    pub fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// `n` distinct job keys.
    pub fn job_keys(n: usize) -> Vec<JobId> {
        let mut map = slotmap::SlotMap::<JobId, ()>::with_key();
        (0..n).map(|_| map.insert(())).collect()
    }

    /// A hand-built agent aged `age` on 2000-01-01.
    pub fn agent(id: u32, sex: Sex, age: i32) -> Agent {
        let params = Params::default();
        let dob = ymd(2000 - age, 1, 1);
        let fertility = (sex == Sex::Female)
            .then(|| FertilityState::new(params.fertility_type, &params, &mut SimRng::new(0)));
        Agent {
            id: AgentId(id),
            sex,
            dob,
            age_days: age as i64 * 365,
            age_years: age,
            experience_days: 0,
            skill: 0.5,
            aspiration: 0.5,
            imprinted: age > 15,
            partner: None,
            mother: None,
            age_at_marriage: None,
            in_marriage_market: false,
            employment: Employment::default(),
            fertility,
            children: Vec::new(),
        }
    }
}

#[cfg(test)]
mod employment {
    use pd_core::Params;

    use super::fixtures::job_keys as keys;
    use crate::{Employment, Offer};

    #[test]
    fn best_offer_prefers_highest_then_first() {
        let jobs = keys(3);
        let emp = Employment {
            offers: vec![
                Offer { job: jobs[0], wage: 40.0 },
                Offer { job: jobs[1], wage: 55.0 },
                Offer { job: jobs[2], wage: 55.0 },
            ],
            ..Default::default()
        };
        assert_eq!(emp.best_offer(), Some(Offer { job: jobs[1], wage: 55.0 }));
        assert_eq!(Employment::default().best_offer(), None);
    }

    #[test]
    fn unemployed_income_is_benefit() {
        let jobs = keys(1);
        let mut emp = Employment::default();
        emp.wage = 9.0;
        assert_eq!(emp.current_wage(1.5), 1.5);
        emp.job = Some(jobs[0]);
        assert_eq!(emp.current_wage(1.5), 9.0);
    }

    #[test]
    fn application_mean_depends_on_status() {
        let params = Params::default();
        let jobs = keys(1);
        let mut emp = Employment::default();
        assert_eq!(emp.application_mean(&params, 0.5), 5.0);
        emp.job = Some(jobs[0]);
        assert_eq!(emp.application_mean(&params, 0.5), 1.0);
    }
}

#[cfg(test)]
mod fertility_state {
    use pd_core::{FertilityType, Params, SimRng};

    use super::fixtures::ymd;
    use crate::FertilityState;
    use crate::fertility::desired_family_size;

    #[test]
    fn parity_grows_only_through_births() {
        let params = Params::default();
        let mut state = FertilityState::new(FertilityType::Easterlin, &params, &mut SimRng::new(1));
        assert_eq!(state.parity(), 0);
        assert_eq!(state.desired_family_size, None);
        state.record_birth(ymd(2000, 5, 1));
        state.record_birth(ymd(1998, 5, 1));
        assert_eq!(state.parity(), 2);
        // An older child assigned later never moves the last birth back.
        assert_eq!(state.date_of_last_birth, Some(ymd(2000, 5, 1)));
    }

    #[test]
    fn hetero_draws_goals_once() {
        let params = Params::default();
        let state = FertilityState::new(FertilityType::Hetero, &params, &mut SimRng::new(1));
        assert!(state.desired_family_size.is_some_and(|n| n <= 6));
        let offset = state.aspiration_offset.unwrap();
        assert!((0.0..params.aspiration_offset_max).contains(&offset));
    }

    #[test]
    fn desired_family_size_thresholds() {
        assert_eq!(desired_family_size(0.6, 0.01), 0);
        assert_eq!(desired_family_size(0.6, 0.05), 1);
        assert_eq!(desired_family_size(0.6, 0.5), 2);
        // desire3 = 0.6 + 0.35 / 2 = 0.775
        assert_eq!(desired_family_size(0.6, 0.7), 3);
        assert_eq!(desired_family_size(0.6, 0.8), 4);
        assert_eq!(desired_family_size(0.6, 0.96), 5);
        assert_eq!(desired_family_size(0.6, 0.99), 6);
    }
}

#[cfg(test)]
mod agent {
    use pd_core::hazard::Gompertz;
    use pd_core::{JobId, Params, SimRng};

    use super::fixtures::{agent, job_keys, ymd};
    use crate::{Sex, StepEnv};

    fn job() -> JobId {
        job_keys(1)[0]
    }

    #[test]
    fn sex_table() {
        assert!(Sex::Male.behaviour().labour_market);
        assert!(!Sex::Female.behaviour().labour_market);
        assert_eq!(Sex::Female.behaviour().fertile_ages, Some((15, 49)));
        assert_eq!(Sex::Male.behaviour().fertile_ages, None);
    }

    #[test]
    fn eligibility_and_demand() {
        let young = agent(0, Sex::Male, 16);
        let worker = agent(1, Sex::Male, 30);
        let woman = agent(2, Sex::Female, 30);
        let old = agent(3, Sex::Male, 70);
        assert!(!young.eligible_for_market(65));
        assert!(worker.eligible_for_market(65));
        assert!(!woman.eligible_for_market(65));
        assert!(!old.eligible_for_market(65));

        assert_eq!(agent(4, Sex::Male, 10).demand_contribution(), 0.5);
        assert_eq!(agent(5, Sex::Male, 20).demand_contribution(), 0.8);
        assert_eq!(worker.demand_contribution(), 1.0);
        assert_eq!(old.demand_contribution(), 0.8);
    }

    #[test]
    fn fertile_ages_are_exclusive() {
        assert!(!agent(0, Sex::Female, 15).in_fertile_ages());
        assert!(agent(1, Sex::Female, 16).in_fertile_ages());
        assert!(agent(2, Sex::Female, 48).in_fertile_ages());
        assert!(!agent(3, Sex::Female, 49).in_fertile_ages());
        assert!(!agent(4, Sex::Male, 30).in_fertile_ages());
    }

    #[test]
    fn step_ages_and_accrues_experience() {
        let params = Params::default();
        let env = StepEnv::new(&params, ymd(2001, 1, 1), 366);
        let mut a = agent(0, Sex::Male, 30);
        a.employment.job = Some(job());
        let before = a.age_days;
        a.step_activity(&env, None, &mut SimRng::new(0));
        assert_eq!(a.age_days, before + 366);
        assert_eq!(a.age_years, 31);
        assert_eq!(a.experience_days, 366);
    }

    #[test]
    fn imprinting_happens_once() {
        let params = Params::default();
        let mut rng = SimRng::new(0);
        let mut a = agent(0, Sex::Female, 14);
        a.imprinted = false;

        let env = StepEnv::new(&params, ymd(2001, 1, 1), 366);
        assert!(a.imprint_due(env.date, params.imprinting_time));
        a.step_activity(&env, Some(3.2), &mut rng);
        assert!(a.imprinted);
        assert_eq!(a.aspiration, 3.2);

        let env = StepEnv::new(&params, ymd(2002, 1, 1), 365);
        assert!(!a.imprint_due(env.date, params.imprinting_time));
        a.step_activity(&env, Some(9.0), &mut rng);
        assert_eq!(a.aspiration, 3.2);
    }

    #[test]
    fn imprinting_falls_back_to_social_security() {
        let params = Params::default();
        let mut a = agent(0, Sex::Male, 14);
        a.imprinted = false;
        let env = StepEnv::new(&params, ymd(2001, 1, 1), 366);
        a.step_activity(&env, None, &mut SimRng::new(0));
        assert_eq!(a.aspiration, params.social_security_level);
    }

    #[test]
    fn retirement_reports_job() {
        let params = Params::default();
        let env = StepEnv::new(&params, ymd(2001, 1, 1), 366);
        let mut a = agent(0, Sex::Male, 64);
        let j = job();
        a.employment.job = Some(j);
        let outcome = a.step_activity(&env, None, &mut SimRng::new(0));
        assert_eq!(outcome.retired_from, Some(j));
    }

    #[test]
    fn certain_partnering_hazard_joins_market_once() {
        let mut params = Params::default();
        params.partnering_a = 1e6;
        let env = StepEnv::new(&params, ymd(2001, 1, 1), 366);
        let mut rng = SimRng::new(0);
        let mut a = agent(0, Sex::Female, 25);
        assert!(a.step_activity(&env, None, &mut rng).joined_marriage_market);
        assert!(a.in_marriage_market);
        assert!(!a.step_activity(&env, None, &mut rng).joined_marriage_market);

        let mut child = agent(1, Sex::Female, 10);
        assert!(!child.step_activity(&env, None, &mut rng).joined_marriage_market);
    }

    #[test]
    fn no_death_below_onset() {
        let g = Gompertz { a: 1.0, b: 1.0, floor: 0.9, onset: 30.0 };
        let mut rng = SimRng::new(0);
        let young = agent(0, Sex::Male, 29);
        assert!((0..100).all(|_| !young.draws_death(&g, 1.0, &mut rng)));
        let old = agent(1, Sex::Male, 90);
        assert!((0..100).any(|_| old.draws_death(&g, 1.0, &mut rng)));
    }
}

#[cfg(test)]
mod store {
    use pd_core::AgentId;

    use super::fixtures::agent;
    use crate::{AgentStore, Sex};

    #[test]
    fn insert_remove_and_lookup() {
        let mut store = AgentStore::new();
        store.insert(agent(0, Sex::Male, 30));
        store.insert(agent(1, Sex::Female, 28));
        store.insert(agent(2, Sex::Female, 3));
        assert_eq!(store.len(), 3);

        assert!(store.remove(AgentId(1)).is_some());
        assert!(store.remove(AgentId(1)).is_none());
        assert_eq!(store.len(), 2);
        assert!(store.get(AgentId(1)).is_none());
        assert!(store.get(AgentId(99)).is_none());
        assert_eq!(store.ids(), vec![AgentId(0), AgentId(2)]);
    }

    #[test]
    #[should_panic]
    fn duplicate_id_panics() {
        let mut store = AgentStore::new();
        store.insert(agent(0, Sex::Male, 30));
        store.insert(agent(0, Sex::Male, 30));
    }

    #[test]
    fn pair_access_in_either_order() {
        let mut store = AgentStore::new();
        store.insert(agent(0, Sex::Male, 30));
        store.insert(agent(1, Sex::Female, 28));
        let (f, m) = store.get_pair_mut(AgentId(1), AgentId(0)).unwrap();
        assert_eq!(f.sex, Sex::Female);
        assert_eq!(m.sex, Sex::Male);
        f.partner = Some(m.id);
        m.partner = Some(f.id);
        assert_eq!(store.partner_wage(AgentId(1), 0.7), Some(0.7));
        assert!(store.get_pair_mut(AgentId(0), AgentId(5)).is_none());
    }
}

#[cfg(test)]
mod factory {
    use pd_core::{Params, SimRng};

    use super::fixtures::ymd;
    use crate::factory::{STARTUP_AGES, startup_age_weight};
    use crate::{AgentFactory, Sex};

    #[test]
    fn initial_agents_fall_in_documented_ranges() {
        let params = Params::default();
        let mut factory = AgentFactory::new(&params);
        let mut rng = SimRng::new(7);
        let start = ymd(1950, 1, 1);
        let mut males = 0;
        for i in 0..500 {
            let a = factory.make_initial_agent(&params, start, &mut rng);
            assert_eq!(a.id.0, i);
            assert!(a.age_days >= 1 && a.age_days <= STARTUP_AGES as i64 * 365 + 365);
            assert!((0.01..=1.0).contains(&a.skill));
            assert!(a.aspiration >= params.default_aspiration);
            assert!(a.aspiration <= params.initial_aspiration_max);
            assert!(a.experience_days <= (a.age_days - 16 * 365).max(0));
            assert_eq!(a.fertility.is_some(), a.is_female());
            assert!(a.partner.is_none() && a.mother.is_none());
            if a.sex == Sex::Male {
                males += 1;
            }
        }
        assert!((200..320).contains(&males), "{males}");
    }

    #[test]
    fn newborn_is_born_inside_the_step() {
        let params = Params::default();
        let mut factory = AgentFactory::new(&params);
        let mut rng = SimRng::new(3);
        let today = ymd(2000, 1, 1);
        for _ in 0..50 {
            let child = factory.make_newborn(&params, today, 31, &mut rng);
            assert!(child.age_days >= 1 && child.age_days <= 31);
            assert!(child.dob > today && child.dob <= ymd(2000, 2, 1));
            assert_eq!(child.experience_days, 0);
            assert_eq!(child.aspiration, params.default_aspiration);
            assert!(!child.imprinted);
        }
        assert_eq!(factory.peek_id().0, 50);
    }

    #[test]
    fn startup_weights_have_a_hump() {
        assert!(startup_age_weight(25.0, 25.0, 0.2) > startup_age_weight(10.0, 25.0, 0.2));
        assert!(startup_age_weight(79.0, 25.0, 0.2) < 0.0);
    }
}
