pub mod dataset;
pub mod operations;
pub mod partition;
