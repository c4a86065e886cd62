use std::fmt;

use thiserror::Error;

/// Malformed program configuration. Raised while building a `ProgramConfig`,
/// never at calculation time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("conversion table '{table}' has no entries")]
    EmptyTable { table: String },

    #[error("conversion table '{table}' contains a non-finite key or value")]
    NonFiniteEntry { table: String },

    #[error("conversion table '{table}' repeats key {key}")]
    DuplicateKey { table: String, key: f64 },

    #[error(
        "conversion table '{table}' is not monotonic: key {key} maps to {value}, below {previous}"
    )]
    NonMonotonic {
        table: String,
        key: f64,
        value: f64,
        previous: f64,
    },

    #[error("band scale '{scale}' has no thresholds")]
    EmptyBandScale { scale: String },

    #[error("band scale '{scale}' thresholds must be finite and strictly increasing")]
    UnorderedBandScale { scale: String },

    #[error("section '{section}' is declared more than once")]
    DuplicateSection { section: String },

    #[error("program '{program}' declares no sections")]
    NoSections { program: String },

    #[error("section '{section}' weight {weight} must be finite and positive")]
    InvalidWeight { section: String, weight: f64 },

    #[error("section '{section}' has an invalid standardization scale: {reason}")]
    InvalidScale { section: String, reason: String },

    #[error("section '{section}' has an invalid input shape: {reason}")]
    InvalidInputSpec { section: String, reason: String },
}

/// One offending field in a calculation request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationIssue {
    #[error("section '{section}' is required but missing")]
    MissingSection { section: String },

    #[error("section '{section}' is not part of this program")]
    UnknownSection { section: String },

    #[error("section '{section}' expects {expected} responses, got {actual} responses")]
    WrongResponseKind {
        section: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("section '{section}' expects {expected} responses, got {actual}")]
    CountMismatch {
        section: String,
        expected: usize,
        actual: usize,
    },

    #[error("section '{section}' {location} rating {value} is outside 0..={max}")]
    RatingOutOfRange {
        section: String,
        location: RatingLocation,
        value: f64,
        max: f64,
    },

    #[error("section '{section}' {location} rating is not a finite number")]
    NonFiniteRating {
        section: String,
        location: RatingLocation,
    },

    #[error("section '{section}' raw score {raw} is outside the valid range {min}..={max}")]
    RawOutOfRange {
        section: String,
        raw: f64,
        min: f64,
        max: f64,
    },

    #[error("section '{section}' task {task} has unknown criterion '{criterion}'")]
    UnknownCriterion {
        section: String,
        task: String,
        criterion: String,
    },

    #[error("section '{section}' task {task} is missing criterion '{criterion}'")]
    MissingCriterion {
        section: String,
        task: String,
        criterion: String,
    },
}

/// Where inside a section a rejected rating sits.
#[derive(Debug, Clone, PartialEq)]
pub enum RatingLocation {
    Task(usize),
    Criterion { task: String, criterion: String },
}

impl fmt::Display for RatingLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RatingLocation::Task(index) => write!(f, "task {index}"),
            RatingLocation::Criterion { task, criterion } => {
                write!(f, "task {task} criterion '{criterion}'")
            }
        }
    }
}

/// Every issue found in a request, collected before any scoring runs.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationError {
    pub fn single(issue: ValidationIssue) -> Self {
        Self {
            issues: vec![issue],
        }
    }

    pub fn sections(&self) -> Vec<&str> {
        let mut out = Vec::new();
        for issue in &self.issues {
            let section = issue.section();
            if !out.contains(&section) {
                out.push(section);
            }
        }
        out
    }
}

impl ValidationIssue {
    pub fn section(&self) -> &str {
        match self {
            ValidationIssue::MissingSection { section }
            | ValidationIssue::UnknownSection { section }
            | ValidationIssue::WrongResponseKind { section, .. }
            | ValidationIssue::CountMismatch { section, .. }
            | ValidationIssue::RatingOutOfRange { section, .. }
            | ValidationIssue::NonFiniteRating { section, .. }
            | ValidationIssue::RawOutOfRange { section, .. }
            | ValidationIssue::UnknownCriterion { section, .. }
            | ValidationIssue::MissingCriterion { section, .. } => section,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid responses ({} issue", self.issues.len())?;
        if self.issues.len() != 1 {
            f.write_str("s")?;
        }
        f.write_str(")")?;
        for issue in &self.issues {
            write!(f, "; {issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
