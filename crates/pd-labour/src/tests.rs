//! Unit tests for pd-labour.

#[cfg(test)]
mod fixtures {
    use chrono::NaiveDate;
    use pd_agent::{Agent, AgentStore, Employment, Sex};
    use pd_core::{AgentId, Params, ProdType, ProductivityFn, SimRng};

    use crate::{LabourMarket, MarketConfig};

    /// Productivity equals skill and wages carry no cohort feedback, so a
    /// worker's wage is exactly their skill.
    pub fn params() -> Params {
        Params {
            prod_type: ProdType::ExperSkill,
            wage_gamma: 0.0,
            wage_delta: 0.0,
            wage_feedback_mult: 0.0,
            churn: 0.0,
            growth_rate: 0.0,
            support_ratio: 2.0,
            ..Params::default()
        }
    }

    pub fn market(params: &Params, jobs: usize) -> LabourMarket {
        LabourMarket::new(
            MarketConfig::from_params(params),
            ProductivityFn::from_params(params),
            jobs,
            &mut SimRng::new(1),
        )
    }

    pub fn worker(id: u32, age: i32, skill: f64) -> Agent {
        Agent {
            id: AgentId(id),
            sex: Sex::Male,
            dob: NaiveDate::from_ymd_opt(2000 - age, 1, 1).unwrap(),
            age_days: age as i64 * 365,
            age_years: age,
            experience_days: 0,
            skill,
            aspiration: 1.0,
            imprinted: true,
            partner: None,
            mother: None,
            age_at_marriage: None,
            in_marriage_market: false,
            employment: Employment::default(),
            fertility: None,
            children: Vec::new(),
        }
    }

    pub fn store(workers: impl IntoIterator<Item = Agent>) -> AgentStore {
        let mut store = AgentStore::new();
        workers.into_iter().for_each(|w| store.insert(w));
        store
    }

    /// Make every agent in `ids` apply to the market's first vacancy.
    pub fn apply_all_to_first(market: &mut LabourMarket, ids: &[u32]) -> pd_core::JobId {
        let job = market.vacancies()[0];
        for &id in ids {
            market.jobs[job].applicants.push(AgentId(id));
        }
        job
    }
}

#[cfg(test)]
mod offers {
    use pd_core::{AgentId, AppCriteria};

    use super::fixtures::*;

    #[test]
    fn highest_wage_applicant_gets_the_offer() {
        let params = params();
        let mut market = market(&params, 1);
        let mut agents = store([worker(0, 30, 30.0), worker(1, 30, 45.0), worker(2, 30, 38.0)]);
        let job = apply_all_to_first(&mut market, &[0, 1, 2]);

        assert_eq!(market.send_offers(&mut agents), 1);
        let offers = &agents.get(AgentId(1)).unwrap().employment.offers;
        assert_eq!(offers.len(), 1);
        assert_eq!(offers[0].job, job);
        assert!((offers[0].wage - 45.0).abs() < 1e-9);
        assert!(agents.get(AgentId(0)).unwrap().employment.offers.is_empty());
        assert!(market.job(job).unwrap().applicants().is_empty());
    }

    #[test]
    fn negative_values_mean_no_offer() {
        let mut params = params();
        params.linear_growth = -100.0;
        let mut market = market(&params, 1);
        market.update_growth_coefs();
        let mut agents = store([worker(0, 30, 30.0), worker(1, 30, 45.0)]);
        let job = apply_all_to_first(&mut market, &[0, 1]);

        assert_eq!(market.send_offers(&mut agents), 0);
        assert!(agents.iter().all(|a| a.employment.offers.is_empty()));
        assert!(market.job(job).unwrap().applicants().is_empty());
    }

    #[test]
    fn profit_ties_go_to_first_applicant() {
        let mut params = params();
        params.app_criteria = AppCriteria::Profit;
        let mut market = market(&params, 1);
        // Without feedback the wage equals productivity, so every profit is 0.
        let mut agents = store([worker(0, 30, 0.2), worker(1, 30, 0.9)]);
        apply_all_to_first(&mut market, &[0, 1]);

        market.send_offers(&mut agents);
        assert_eq!(agents.get(AgentId(0)).unwrap().employment.offers.len(), 1);
        assert!(agents.get(AgentId(1)).unwrap().employment.offers.is_empty());
    }

    #[test]
    fn prod_criterion_prefers_productive_applicant() {
        let mut params = params();
        params.app_criteria = AppCriteria::Prod;
        let mut market = market(&params, 1);
        let mut agents = store([worker(0, 30, 0.2), worker(1, 30, 0.9)]);
        apply_all_to_first(&mut market, &[0, 1]);

        market.send_offers(&mut agents);
        assert_eq!(agents.get(AgentId(1)).unwrap().employment.offers.len(), 1);
    }

    #[test]
    fn experience_floor_excludes_novices() {
        let mut params = params();
        params.experience_floor = true;
        let mut market = market(&params, 1);
        let job = market.vacancies()[0];
        market.jobs[job].experience_floor = Some(365.0);

        let mut veteran = worker(1, 40, 0.3);
        veteran.experience_days = 400;
        let mut agents = store([worker(0, 30, 0.9), veteran]);
        apply_all_to_first(&mut market, &[0, 1]);

        market.send_offers(&mut agents);
        assert!(agents.get(AgentId(0)).unwrap().employment.offers.is_empty());
        assert_eq!(agents.get(AgentId(1)).unwrap().employment.offers.len(), 1);
    }
}

#[cfg(test)]
mod resolution {
    use pd_agent::Offer;
    use pd_core::AgentId;

    use super::fixtures::*;

    #[test]
    fn employed_agent_switches_for_strictly_higher_wage() {
        let params = params();
        let mut market = market(&params, 3);
        let mut agents = store([worker(0, 30, 0.5)]);
        let vac = market.vacancies().to_vec();

        let agent = agents.get_mut(AgentId(0)).unwrap();
        market.fill(vac[0], agent, 50.0);
        agent.employment.offers = vec![Offer { job: vac[1], wage: 40.0 }, Offer { job: vac[2], wage: 55.0 }];

        assert!(market.resolve_offers(agent));
        assert_eq!(agent.employment.job, Some(vac[2]));
        assert_eq!(agent.employment.wage, 55.0);
        assert!(agent.employment.offers.is_empty());
        assert!(market.vacancies().contains(&vac[0]));
        assert!(market.vacancies().contains(&vac[1]));
        market.assert_consistent(&agents);
    }

    #[test]
    fn employed_agent_keeps_job_on_equal_offer() {
        let params = params();
        let mut market = market(&params, 2);
        let mut agents = store([worker(0, 30, 0.5)]);
        let vac = market.vacancies().to_vec();

        let agent = agents.get_mut(AgentId(0)).unwrap();
        market.fill(vac[0], agent, 50.0);
        agent.employment.offers = vec![Offer { job: vac[1], wage: 50.0 }];

        assert!(!market.resolve_offers(agent));
        assert_eq!(agent.employment.job, Some(vac[0]));
        assert!(agent.employment.offers.is_empty());
        market.assert_consistent(&agents);
    }

    #[test]
    fn unemployed_agent_takes_best_offer() {
        let params = params();
        let mut market = market(&params, 2);
        let mut agents = store([worker(0, 30, 0.5)]);
        let vac = market.vacancies().to_vec();

        let agent = agents.get_mut(AgentId(0)).unwrap();
        agent.employment.offers = vec![Offer { job: vac[0], wage: 1.0 }, Offer { job: vac[1], wage: 3.0 }];
        assert!(market.resolve_offers(agent));
        assert_eq!(agent.employment.job, Some(vac[1]));
        assert_eq!(market.vacancies(), &[vac[0]]);
        market.assert_consistent(&agents);
    }

    #[test]
    fn full_round_keeps_occupancy_consistent() {
        let params = params();
        let mut market = market(&params, 20);
        let mut agents = store((0..30).map(|i| worker(i, 20 + (i as i32 % 40), 0.1 + i as f64 / 40.0)));
        let mut rng = pd_core::SimRng::new(4);

        for _ in 0..5 {
            for id in agents.ids() {
                let agent = agents.get(id).unwrap().clone();
                market.submit_applications(&agent, 4, &mut rng);
            }
            market.assert_consistent(&agents);
            market.send_offers(&mut agents);
            market.assert_consistent(&agents);
            for id in agents.ids() {
                market.resolve_offers(agents.get_mut(id).unwrap());
            }
            market.assert_consistent(&agents);
        }
        assert!(market.vacancies().len() < 20);
    }

    #[test]
    #[should_panic(expected = "already occupied")]
    fn filling_an_occupied_job_panics() {
        let params = params();
        let mut market = market(&params, 1);
        let job = market.vacancies()[0];
        let mut a = worker(0, 30, 0.5);
        let mut b = worker(1, 30, 0.5);
        market.fill(job, &mut a, 1.0);
        market.fill(job, &mut b, 1.0);
    }

    #[test]
    #[should_panic(expected = "too young")]
    fn filling_with_a_child_panics() {
        let params = params();
        let mut market = market(&params, 1);
        let job = market.vacancies()[0];
        market.fill(job, &mut worker(0, 14, 0.5), 1.0);
    }

    #[test]
    #[should_panic(expected = "is not held by")]
    fn vacating_someone_elses_job_panics() {
        let params = params();
        let mut market = market(&params, 1);
        let job = market.vacancies()[0];
        let mut a = worker(0, 30, 0.5);
        market.fill(job, &mut a, 1.0);
        market.vacate(job, &mut worker(1, 30, 0.5));
    }
}

#[cfg(test)]
mod pool {
    use pd_core::{AgentId, RelativeCohortSizes, SimRng};

    use super::fixtures::*;

    #[test]
    fn resizes_toward_demand() {
        let params = params();
        let mut market = market(&params, 10);
        let mut agents = store([]);
        let sizes = RelativeCohortSizes::zeros(2000);
        let mut rng = SimRng::new(2);

        // 40 / 2 = 20 jobs.
        market.update_jobs(40.0, &sizes, 1.0, &mut agents, &mut rng);
        assert_eq!(market.len(), 20);
        assert_eq!(market.vacancies().len(), 20);

        market.update_jobs(10.0, &sizes, 1.0, &mut agents, &mut rng);
        assert_eq!(market.len(), 5);
        market.assert_consistent(&agents);
    }

    #[test]
    fn shedding_unemploys_occupants() {
        let params = params();
        let mut market = market(&params, 4);
        let mut agents = store((0..4).map(|i| worker(i, 30, 0.5)));
        let vac = market.vacancies().to_vec();
        for (i, job) in vac.iter().enumerate() {
            market.fill(*job, agents.get_mut(AgentId(i as u32)).unwrap(), 1.0);
        }

        market.shed_jobs(3, &mut agents, &mut SimRng::new(3));
        assert_eq!(market.len(), 1);
        assert_eq!(agents.iter().filter(|a| a.employment.has_job()).count(), 1);
        market.assert_consistent(&agents);
    }

    #[test]
    fn growth_is_capped_by_upper_limit() {
        let mut params = params();
        params.job_upper_limit = 10;
        let mut market = market(&params, 10);
        let mut agents = store([]);
        market.update_jobs(1_000.0, &RelativeCohortSizes::zeros(2000), 1.0, &mut agents, &mut SimRng::new(2));
        assert_eq!(market.len(), 10);
    }

    #[test]
    fn growth_below_the_limit_stops_at_it() {
        let mut params = params();
        params.job_upper_limit = 10;
        let mut market = market(&params, 9);
        let mut agents = store([]);
        market.update_jobs(1_000.0, &RelativeCohortSizes::zeros(2000), 1.0, &mut agents, &mut SimRng::new(2));
        assert_eq!(market.len(), 10);
        assert_eq!(market.vacancies().len(), 10);
        market.assert_consistent(&agents);
    }

    #[test]
    fn churn_conserves_pool_size() {
        let mut params = params();
        params.churn = 0.5;
        let mut market = market(&params, 10);
        let mut agents = store((0..5).map(|i| worker(i, 30, 0.5)));
        let vac = market.vacancies().to_vec();
        for i in 0..5 {
            market.fill(vac[i], agents.get_mut(AgentId(i as u32)).unwrap(), 1.0);
        }
        let before: Vec<_> = market.jobs().map(|(id, _)| id).collect();

        // Demand 20 / 2 = 10 jobs: no resize, only churn of 5.
        market.update_jobs(20.0, &RelativeCohortSizes::zeros(2000), 1.0, &mut agents, &mut SimRng::new(9));
        assert_eq!(market.len(), 10);
        let survivors = market.jobs().filter(|(id, _)| before.contains(id)).count();
        assert_eq!(survivors, 5);
        market.assert_consistent(&agents);
    }

    #[test]
    fn crowded_cohorts_earn_less() {
        let mut params = params();
        params.wage_feedback_mult = 1.0;
        let mut market = market(&params, 2);
        let mut agents = store([worker(0, 30, 1.0), worker(1, 50, 1.0)]);
        let vac = market.vacancies().to_vec();
        market.fill(vac[0], agents.get_mut(AgentId(0)).unwrap(), 0.0);
        market.fill(vac[1], agents.get_mut(AgentId(1)).unwrap(), 0.0);

        // Men born around 1970 (aged 30 in 2000) are a crowded cohort.
        let sizes = RelativeCohortSizes::from_counts(2000, |y| if (1966..=1974).contains(&y) { 3.0 } else { 1.0 });
        market.update_feedbacks(&sizes);
        market.update_wages(&mut agents);

        assert!(market.feedback(30) < 0.0);
        assert_eq!(market.feedback(80), 0.0);
        let young = agents.get(AgentId(0)).unwrap().employment.wage;
        let old = agents.get(AgentId(1)).unwrap().employment.wage;
        assert!(young < 1.0 && old > 1.0, "{young} {old}");
    }

    #[test]
    fn growth_coefficients_compound() {
        let mut params = params();
        params.growth_rate = 0.1;
        params.linear_growth = 0.5;
        let mut market = market(&params, 0);
        market.update_growth_coefs();
        market.update_growth_coefs();
        assert!((market.growth_mult() - (0.2f64).exp()).abs() < 1e-12);
        assert!((market.additive_growth() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn summary_handles_empty_pool() {
        let params = params();
        let market = market(&params, 0);
        let summary = market.summary(&store([]));
        assert_eq!(summary.vacancy_rate, None);
        assert_eq!(summary.mean_wage, None);
    }

    #[test]
    fn summary_reports_wages() {
        let params = params();
        let mut market = market(&params, 4);
        let mut agents = store([worker(0, 30, 0.5), worker(1, 30, 0.5)]);
        let vac = market.vacancies().to_vec();
        market.fill(vac[0], agents.get_mut(AgentId(0)).unwrap(), 2.0);
        market.fill(vac[1], agents.get_mut(AgentId(1)).unwrap(), 4.0);

        let summary = market.summary(&agents);
        assert_eq!(summary.vacancy_rate, Some(0.5));
        assert_eq!(summary.mean_wage, Some(3.0));
        assert_eq!(market.age_wage_distribution(&agents).len(), 2);
    }
}

#[cfg(test)]
mod applications {
    use pd_core::SimRng;

    use super::fixtures::*;

    #[test]
    fn applications_target_distinct_vacancies() {
        let params = params();
        let mut market = market(&params, 5);
        let agent = worker(0, 30, 0.5);
        let sent = market.submit_applications(&agent, 20, &mut SimRng::new(6));
        assert_eq!(sent, 5);
        assert!(market.jobs().all(|(_, job)| job.applicants() == [agent.id]));
    }

    #[test]
    fn floors_steer_applications() {
        let mut params = params();
        params.experience_floor = true;
        let mut market = market(&params, 3);
        let vac = market.vacancies().to_vec();
        market.jobs[vac[0]].experience_floor = Some(0.0);
        market.jobs[vac[1]].experience_floor = Some(10.0 * 365.0);
        market.jobs[vac[2]].experience_floor = Some(0.0);

        let agent = worker(0, 20, 0.5);
        let sent = market.submit_applications(&agent, 3, &mut SimRng::new(6));
        assert_eq!(sent, 2);
        assert!(market.job(vac[1]).unwrap().applicants().is_empty());
    }
}
