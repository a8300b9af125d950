#![forbid(unsafe_code)]

//! Point-of-sale management client.
//!
//! Session handling and route guarding ([`session`]), order composition
//! ([`orders`]), and the category/item/stock pass-throughs
//! ([`management`]) over a REST backend reached through [`api::PosApi`].

pub mod api;
pub mod auth;
pub mod config;
pub mod errors;
pub mod management;
pub mod mode;
pub mod models;
pub mod orders;
pub mod session;

pub use config::ClientConfig;
pub use errors::{AppError, Result};
