pub mod json;

/// Fixed-precision rendering used in finding messages.
pub fn format_score(v: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, v)
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
