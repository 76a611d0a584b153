pub mod collector;
pub mod content_node;
pub mod data_core;
pub mod field_path;
pub mod locale;
pub mod localized;
pub mod performance;
pub mod progress;
pub mod skip_set;
pub mod writer;
