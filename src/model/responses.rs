use std::collections::BTreeMap;

/// Ratings for one task, keyed by criterion id.
pub type CriterionRatings = BTreeMap<String, f64>;

/// Item-level responses for one section.
#[derive(Debug, Clone, PartialEq)]
pub enum RawResponseSet {
    /// Per-item correctness flags.
    Items(Vec<bool>),
    /// A correct-answer count tallied upstream.
    Tally(u32),
    /// One rating per task.
    Ratings(Vec<f64>),
    /// Criterion ratings per task, in task declaration order.
    Tasks(Vec<CriterionRatings>),
}

impl RawResponseSet {
    pub fn kind_name(&self) -> &'static str {
        match self {
            RawResponseSet::Items(_) => "item",
            RawResponseSet::Tally(_) => "tallied",
            RawResponseSet::Ratings(_) => "task rating",
            RawResponseSet::Tasks(_) => "criterion rating",
        }
    }
}

pub type ResponseMap = BTreeMap<String, RawResponseSet>;
