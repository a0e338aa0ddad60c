use pd_core::{AppCriteria, Params};

/// Parameters the labour market reads every step.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MarketConfig {
    pub app_criteria:       AppCriteria,
    pub wage_feedback_mult: f64,
    pub support_ratio:      f64,
    /// Annual share of jobs destroyed and recreated.
    pub churn:              f64,
    pub job_upper_limit:    usize,
    pub growth_rate:        f64,
    pub linear_growth:      f64,
    pub cohort_width:       f64,
    /// New jobs draw a minimum experience requirement.
    pub experience_floor:   bool,
    /// Upper end, in years, of the experience floor draw.
    pub exp_max:            f64,
    pub year_length:        f64,
}

impl MarketConfig {
    pub fn from_params(params: &Params) -> Self {
        Self {
            app_criteria:       params.app_criteria,
            wage_feedback_mult: params.wage_feedback_mult,
            support_ratio:      params.support_ratio,
            churn:              params.churn,
            job_upper_limit:    params.job_upper_limit,
            growth_rate:        params.growth_rate,
            linear_growth:      params.linear_growth,
            cohort_width:       params.cohort_width,
            experience_floor:   params.experience_floor,
            exp_max:            params.exp_max,
            year_length:        params.year_length,
        }
    }
}
