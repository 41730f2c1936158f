pub mod config;
pub mod config_loader;
pub mod error;
pub mod manifest;
pub mod task;
pub mod traits;

pub use config::*;
pub use config_loader::*;
pub use error::*;
pub use manifest::{PackageInfo, WALLY_MANIFEST, read_package_info};
pub use task::*;
pub use traits::*;
