//! makers-list - conversational maker-project planner
//!
//! Guides a user through clarifying questions about a build project with a
//! generative language model, then turns the model's final structured reply
//! into a categorised, priced shopping list that can be exported as CSV.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
