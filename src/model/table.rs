use serde::Serialize;

use crate::error::ConfigError;

/// How a raw score that is not an exact key resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupMode {
    /// Largest key at or below the raw score; the lowest value below every key.
    Floor,
    /// Closest key by absolute distance; ties go to the lower key.
    Nearest,
}

/// Immutable raw-to-scaled lookup. Entries are kept sorted by key with
/// non-decreasing values.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionTable {
    name: String,
    mode: LookupMode,
    entries: Vec<(f64, f64)>,
}

impl ConversionTable {
    /// Builds a table from `(key, value)` pairs in any order.
    pub fn new(
        name: impl Into<String>,
        mode: LookupMode,
        entries: &[(f64, f64)],
    ) -> Result<Self, ConfigError> {
        let name = name.into();
        if entries.is_empty() {
            return Err(ConfigError::EmptyTable { table: name });
        }
        if entries.iter().any(|(k, v)| !k.is_finite() || !v.is_finite()) {
            return Err(ConfigError::NonFiniteEntry { table: name });
        }

        let mut sorted = entries.to_vec();
        sorted.sort_by(|a, b| a.0.total_cmp(&b.0));
        for pair in sorted.windows(2) {
            let (prev_key, prev_value) = pair[0];
            let (key, value) = pair[1];
            if key == prev_key {
                return Err(ConfigError::DuplicateKey { table: name, key });
            }
            if value < prev_value {
                return Err(ConfigError::NonMonotonic {
                    table: name,
                    key,
                    value,
                    previous: prev_value,
                });
            }
        }

        Ok(Self {
            name,
            mode,
            entries: sorted,
        })
    }

    pub fn from_counts(
        name: impl Into<String>,
        mode: LookupMode,
        entries: &[(u32, f64)],
    ) -> Result<Self, ConfigError> {
        let converted = entries
            .iter()
            .map(|&(k, v)| (f64::from(k), v))
            .collect::<Vec<_>>();
        Self::new(name, mode, &converted)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mode(&self) -> LookupMode {
        self.mode
    }

    pub fn entries(&self) -> &[(f64, f64)] {
        &self.entries
    }

    pub fn get(&self, raw: f64) -> Option<f64> {
        let idx = self.entries.partition_point(|&(k, _)| k < raw);
        match self.entries.get(idx) {
            Some(&(key, value)) if key == raw => Some(value),
            _ => None,
        }
    }

    pub fn convert(&self, raw: f64) -> f64 {
        if let Some(value) = self.get(raw) {
            return value;
        }
        match self.mode {
            LookupMode::Floor => self.floor_lookup(raw),
            LookupMode::Nearest => self.nearest_lookup(raw),
        }
    }

    fn floor_lookup(&self, raw: f64) -> f64 {
        let idx = self.entries.partition_point(|&(k, _)| k <= raw);
        self.entries[idx.saturating_sub(1)].1
    }

    fn nearest_lookup(&self, raw: f64) -> f64 {
        let (first_key, first_value) = self.entries[0];
        let (mut best_value, mut best_dist) = (first_value, (raw - first_key).abs());
        for &(key, value) in &self.entries[1..] {
            let dist = (raw - key).abs();
            // strict: equidistant keys keep the lower one
            if dist < best_dist {
                best_value = value;
                best_dist = dist;
            }
        }
        best_value
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/table.rs"]
mod tests;
