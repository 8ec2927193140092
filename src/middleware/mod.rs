//! Middleware

pub mod panic;
