//! # Interviewer terminal client
//!
//! Talks to the `server` crate over HTTP and renders the flashcard flows in a terminal.
//!
//! - [`loader`]: landing page categories, cached for five minutes, bounded by a 15s load
//! - [`app`]: practice deck, chatbot and the local CSV check
//! - [`chat`]: transcript and navigation handling for the assistant
//! - [`explain`]: per-card explanations in English or French
//!
//! The category cache lives under the user cache directory as
//! `interviewer/interviewer_categories_cache.json`.
pub mod api;
pub mod app;
pub mod cache;
pub mod chat;
pub mod error;
pub mod explain;
pub mod loader;
