mod label;
mod reader;

pub use reader::{Dataset, LabeledFile};
