//! # TUI Components
//!
//! ## Component Architecture
//!
//! Components follow two patterns:
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `Header`: title, subtitle and backend status
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `QuestionForm`: bounded text input, counter and submit control
//! - `ExampleList`: welcome copy and example questions (state in `ExampleListState`)
//! - `AnswerPanel`: loading / error / answer / empty views (scroll state in `AnswerPanelState`)
//!
//! Components receive external data as props rather than reading `App`
//! directly, so each one can be rendered and tested in isolation.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── header.rs        (page chrome)
//! ├── question_form/   (text input with counter and submit)
//! ├── examples.rs      (welcome + example questions)
//! └── answer_panel.rs  (answer presentation)
//! ```

pub mod answer_panel;
pub mod examples;
pub mod header;
pub mod question_form;

pub use answer_panel::{AnswerPanel, AnswerPanelState, AnswerView};
pub use examples::{ExampleList, ExampleListState};
pub use header::Header;
pub use question_form::{FormEvent, QuestionForm};
