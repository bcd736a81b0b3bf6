//! # Core Form Logic
//!
//! Entries, the navigation state machine and the session loop.
//! It knows nothing about any specific terminal library.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Entry (rows)         │
//!                    │  • MenuForm (hover,     │
//!                    │    trigger, export)     │
//!                    │  • Session (loop)       │
//!                    │                         │
//!                    │  I/O only via surface   │
//!                    └───────────┬─────────────┘
//!                                │ Renderer + InputSource
//!                    ┌───────────┴───────────┐
//!                    ▼                       ▼
//!             ┌────────────┐          ┌────────────┐
//!             │ Full-screen│          │ Line mode  │
//!             │ (ratatui)  │          │ (stdin)    │
//!             └────────────┘          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`entry`]: The `Entry` row model and its edit capabilities
//! - [`form`]: The `MenuForm` state machine
//! - [`session`]: The read/dispatch/render loop
//! - [`surface`]: Traits the adapters implement

pub mod command;
pub mod config;
pub mod entry;
pub mod error;
pub mod form;
pub mod session;
pub mod surface;
pub mod target;
pub mod value;
