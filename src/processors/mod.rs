pub mod pipeline;
pub mod quality;

pub use pipeline::{MonthDay, StatPipeline};
pub use quality::is_admissible;
