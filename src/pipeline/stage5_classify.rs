use crate::model::levels::{BandScale, DescriptorTable, Level};
use crate::model::program::ProgramConfig;

/// Label of the highest threshold at or below `score`.
pub fn classify<L: Copy>(scale: &BandScale<L>, score: f64) -> L {
    let steps = scale.steps();
    let idx = steps.partition_point(|&(threshold, _)| threshold <= score);
    steps[idx.saturating_sub(1)].1
}

/// Exact-match descriptor, or the table's fallback text when `score` is not
/// one of the canonical values.
pub fn describe(table: &DescriptorTable, score: f64) -> &str {
    match table.entries().iter().find(|(key, _)| *key == score) {
        Some((_, text)) => text,
        None => {
            tracing::warn!(score, "no descriptor for score; using fallback");
            table.fallback()
        }
    }
}

/// Descriptor text when the program has a descriptor table, otherwise the
/// level's own description.
pub fn feedback(config: &ProgramConfig, score: f64, level: Level) -> String {
    match config.descriptors() {
        Some(table) => describe(table, score).to_string(),
        None => level.description().to_string(),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_classify.rs"]
mod tests;
