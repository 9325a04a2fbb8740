pub mod rest;

pub use rest::{ApiState, RestApi};
