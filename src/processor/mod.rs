pub mod csv_loader;
pub mod logo_patcher;

pub use csv_loader::*;
pub use logo_patcher::*;
