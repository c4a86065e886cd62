use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::error::ConfigError;
use crate::model::levels::{BandScale, DescriptorTable, Level};
use crate::model::section::{SectionSpec, TargetScale};
use crate::model::thresholds::{AnalysisThresholds, ScoreBasis};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgramKind {
    Ielts,
    ToeflIbt,
    Snbt,
}

impl fmt::Display for ProgramKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ProgramKind::Ielts => "IELTS",
            ProgramKind::ToeflIbt => "TOEFL iBT",
            ProgramKind::Snbt => "SNBT",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combiner {
    Mean,
    WeightedMean,
    Sum,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    None,
    HalfBand,
    Decimals(u32),
}

/// Everything a program needs, before validation.
#[derive(Debug, Clone)]
pub struct ProgramSpec {
    pub kind: ProgramKind,
    pub variant: Option<String>,
    pub sections: Vec<SectionSpec>,
    pub combiner: Combiner,
    pub rounding: Rounding,
    pub percentile: Option<TargetScale>,
    pub level_basis: ScoreBasis,
    pub overall_levels: BandScale<Level>,
    pub descriptors: Option<DescriptorTable>,
    pub analysis: AnalysisThresholds,
}

/// Validated, immutable program configuration. Build once, share by
/// reference.
#[derive(Debug, Clone)]
pub struct ProgramConfig {
    spec: ProgramSpec,
}

impl ProgramConfig {
    pub fn new(spec: ProgramSpec) -> Result<Self, ConfigError> {
        if spec.sections.is_empty() {
            return Err(ConfigError::NoSections {
                program: spec.kind.to_string(),
            });
        }
        let mut seen = BTreeSet::new();
        for section in &spec.sections {
            if !seen.insert(section.id.as_str()) {
                return Err(ConfigError::DuplicateSection {
                    section: section.id.clone(),
                });
            }
            section.check()?;
        }

        let needs_percentile = spec.level_basis == ScoreBasis::Percentile
            || spec.analysis.basis == ScoreBasis::Percentile;
        match &spec.percentile {
            Some(scale) => scale.check("overall")?,
            None if needs_percentile => {
                return Err(ConfigError::InvalidScale {
                    section: "overall".to_string(),
                    reason: "percentile basis requires a percentile scale".to_string(),
                });
            }
            None => {}
        }

        Ok(Self { spec })
    }

    pub fn kind(&self) -> ProgramKind {
        self.spec.kind
    }

    pub fn variant(&self) -> Option<&str> {
        self.spec.variant.as_deref()
    }

    pub fn sections(&self) -> &[SectionSpec] {
        &self.spec.sections
    }

    pub fn section(&self, id: &str) -> Option<&SectionSpec> {
        self.spec.sections.iter().find(|s| s.id == id)
    }

    pub fn combiner(&self) -> Combiner {
        self.spec.combiner
    }

    pub fn rounding(&self) -> Rounding {
        self.spec.rounding
    }

    pub fn percentile_scale(&self) -> Option<&TargetScale> {
        self.spec.percentile.as_ref()
    }

    pub fn level_basis(&self) -> ScoreBasis {
        self.spec.level_basis
    }

    pub fn overall_levels(&self) -> &BandScale<Level> {
        &self.spec.overall_levels
    }

    pub fn descriptors(&self) -> Option<&DescriptorTable> {
        self.spec.descriptors.as_ref()
    }

    pub fn analysis(&self) -> &AnalysisThresholds {
        &self.spec.analysis
    }
}
