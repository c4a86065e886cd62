use crate::error::ConfigError;
use crate::model::levels::{BandScale, Level};
use crate::model::table::ConversionTable;

#[derive(Debug, Clone, PartialEq)]
pub struct CriterionSpec {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskSpec {
    pub id: String,
    pub name: String,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputSpec {
    /// Right/wrong items, supplied as flags or as a tallied count.
    Objective { item_count: usize, max_raw: u32 },
    /// One rating per task; raw score is their mean.
    Rated { task_count: usize, max_rating: f64 },
    /// Criterion ratings per task; raw score is the weighted mean of task means.
    Criteria {
        tasks: Vec<TaskSpec>,
        criteria: Vec<CriterionSpec>,
        max_rating: f64,
    },
}

impl InputSpec {
    pub fn raw_range(&self) -> (f64, f64) {
        match self {
            InputSpec::Objective { max_raw, .. } => (0.0, f64::from(*max_raw)),
            InputSpec::Rated { max_rating, .. } | InputSpec::Criteria { max_rating, .. } => {
                (0.0, *max_rating)
            }
        }
    }
}

/// Target reporting scale of a linear standardization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetScale {
    pub mean: f64,
    pub sd: f64,
    pub min: f64,
    pub max: f64,
}

impl TargetScale {
    pub fn check(&self, owner: &str) -> Result<(), ConfigError> {
        let finite = [self.mean, self.sd, self.min, self.max]
            .iter()
            .all(|v| v.is_finite());
        let reason = if !finite {
            Some("values must be finite")
        } else if self.sd <= 0.0 {
            Some("target standard deviation must be positive")
        } else if self.min > self.max {
            Some("target minimum exceeds maximum")
        } else {
            None
        };
        match reason {
            Some(reason) => Err(ConfigError::InvalidScale {
                section: owner.to_string(),
                reason: reason.to_string(),
            }),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Scoring {
    Table(ConversionTable),
    Standardize {
        population_mean: f64,
        population_sd: f64,
        target: TargetScale,
    },
    /// Raw mean rounded to the nearest half band, clamped to `[min, max]`.
    HalfBand { min: f64, max: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionSpec {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub input: InputSpec,
    pub scoring: Scoring,
    pub weight: f64,
    pub levels: BandScale<Level>,
}

impl SectionSpec {
    pub fn check(&self) -> Result<(), ConfigError> {
        if !self.weight.is_finite() || self.weight <= 0.0 {
            return Err(ConfigError::InvalidWeight {
                section: self.id.clone(),
                weight: self.weight,
            });
        }
        self.check_input()?;
        match &self.scoring {
            Scoring::Table(_) => Ok(()),
            Scoring::Standardize {
                population_mean,
                population_sd,
                target,
            } => {
                if !population_mean.is_finite() || !population_sd.is_finite() {
                    return Err(self.scale_error("population statistics must be finite"));
                }
                if *population_sd <= 0.0 {
                    return Err(self.scale_error(
                        "population standard deviation must be positive",
                    ));
                }
                target.check(&self.id)
            }
            Scoring::HalfBand { min, max } => {
                if !min.is_finite() || !max.is_finite() || min > max {
                    return Err(self.scale_error("half-band range is empty"));
                }
                Ok(())
            }
        }
    }

    fn check_input(&self) -> Result<(), ConfigError> {
        let reason = match &self.input {
            InputSpec::Objective { item_count, .. } if *item_count == 0 => {
                Some("objective section needs at least one item")
            }
            InputSpec::Rated { task_count, .. } if *task_count == 0 => {
                Some("rated section needs at least one task")
            }
            InputSpec::Criteria {
                tasks, criteria, ..
            } if tasks.is_empty() || criteria.is_empty() => {
                Some("criteria section needs tasks and criteria")
            }
            InputSpec::Criteria { tasks, .. }
                if tasks.iter().any(|t| !t.weight.is_finite() || t.weight <= 0.0) =>
            {
                Some("task weights must be finite and positive")
            }
            InputSpec::Rated { max_rating, .. } | InputSpec::Criteria { max_rating, .. }
                if !max_rating.is_finite() || *max_rating <= 0.0 =>
            {
                Some("maximum rating must be finite and positive")
            }
            _ => None,
        };
        match reason {
            Some(reason) => Err(ConfigError::InvalidInputSpec {
                section: self.id.clone(),
                reason: reason.to_string(),
            }),
            None => Ok(()),
        }
    }

    fn scale_error(&self, reason: &str) -> ConfigError {
        ConfigError::InvalidScale {
            section: self.id.clone(),
            reason: reason.to_string(),
        }
    }
}
