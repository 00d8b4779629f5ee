//! Mathematical utilities: least squares and logistic primitives.

pub mod logit;
pub mod ols;

pub use logit::*;
pub use ols::*;
