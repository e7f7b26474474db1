pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::http::{ReqwestExecutor, ReqwestProvider};
pub use config::ClientConfig;
pub use crate::core::interpolation::{InterpolationClient, INTERPOLATE_URL_PATH};
pub use crate::core::{HttpProvider, InterpolationOperations, RestExecutor, ServiceBinding, ServicesData};
pub use utils::error::{CredHubError, Result};
