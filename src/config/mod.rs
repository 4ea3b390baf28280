mod split_config;
mod split_spec;

pub use split_config::SplitConfig;
pub use split_spec::SplitSpec;
