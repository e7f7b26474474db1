pub mod interpolation;

pub use crate::domain::model::{ServiceBinding, ServicesData};
pub use crate::domain::ports::{
    ExchangeRequest, ExchangeResponse, HttpProvider, InterpolationOperations, RestExecutor,
};
pub use crate::utils::error::Result;
