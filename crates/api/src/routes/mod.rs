//! Request Handlers

pub mod predictions;
pub mod schema;
