//! Library components of the Cardio Risk client.

pub mod config;
pub mod flow;
pub mod form;
pub mod summary;
pub mod surface;
