//! # Core Application Logic
//!
//! This module contains InLaw's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (RequestState) │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                   ┌────────────┴────────────┐
//!                   ▼                         ▼
//!            ┌────────────┐            ┌────────────┐
//!            │    TUI     │            │  One-shot  │
//!            │  Adapter   │            │    CLI     │
//!            │ (ratatui)  │            │ (main.rs)  │
//!            └────────────┘            └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct and `RequestState`
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`question`]: Validated question text
//! - [`format`]: Paragraph splitting and score formatting
//! - [`config`]: Backend settings resolution

pub mod action;
pub mod config;
pub mod format;
pub mod question;
pub mod state;
