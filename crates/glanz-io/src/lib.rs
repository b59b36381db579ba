pub mod slot;
pub mod source;
pub mod speaker;

pub use slot::FileSlot;
pub use source::{SourceError, read_document, read_photo};
pub use speaker::{EspeakSpeaker, SilentSpeaker};
