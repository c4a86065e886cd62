pub mod levels;
pub mod program;
pub mod responses;
pub mod results;
pub mod section;
pub mod table;
pub mod thresholds;
