pub mod catalog;
pub mod dataset;

pub use catalog::Catalog;
pub use dataset::{load_dataset, write_dataset};
