//! AI News Agent - RSS to blog post automation
//!
//! This crate polls a list of RSS/Atom feeds, asks a language model to turn
//! each article into a short blog post, and writes the posts as Markdown files.

pub mod agent;
pub mod config;
pub mod fetcher;
pub mod llm;
pub mod post;
pub mod writer;
