pub mod dictation;
pub mod machine;
pub mod queue;
pub mod quiz;
pub mod speech;
pub mod store;

#[cfg(test)]
mod fixtures;
