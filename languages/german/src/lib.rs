pub mod enricher;
pub mod grammar;
pub mod preprocess;
pub mod prompts;
pub mod schema;

pub use enricher::GeminiEnricher;
pub use grammar::{VERB_FORM_LABELS, form_label, headword};
pub use preprocess::{clean_candidates, split_manual_input};
