pub mod postgres;
pub mod rest;

pub use rest::{RestClient, RestError};
