pub mod document;
pub mod source;

pub use document::*;
pub use source::*;
