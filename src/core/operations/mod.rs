mod file_ops;
mod materializer;

pub use file_ops::create_output_tree;
pub use materializer::{materialize_group, GroupLayout};
