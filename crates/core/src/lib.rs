pub mod classify;
pub mod config;
pub mod error;
pub mod links;
pub mod origin;
pub mod setcookie;
pub mod types;

pub use classify::{classify, Classification};
pub use config::ScanConfig;
pub use error::ScanError;
pub use origin::OriginMap;
pub use types::*;
