pub mod dataset_store;

pub use dataset_store::*;
