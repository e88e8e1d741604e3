//! # Perfect Fit Telegram Bot
//!
//! A Telegram bot that works out a bra size from underbust and bust
//! measurements and suggests where to shop for it, with a small HTTP
//! endpoint for liveness checks.

pub mod bot;
pub mod catalog;
pub mod config;
pub mod dialogue;
pub mod errors;
pub mod health;
pub mod localization;
pub mod session;
pub mod sizing;
