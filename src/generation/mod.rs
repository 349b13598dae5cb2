//! Answer generation: prompt assembly and the query pipeline

mod answer;
mod prompt;

pub use answer::{QueryPipeline, NO_MATCH_ANSWER};
pub use prompt::PromptBuilder;
