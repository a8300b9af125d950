//! Domain model module declarations.

pub mod catalog;
pub mod order;
pub mod session;
