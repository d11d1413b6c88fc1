//! invention-service: estimates when an item was invented by asking a
//! generative-language model for the year.

pub mod config;
pub mod dtos;
pub mod handlers;
pub mod services;
pub mod startup;
