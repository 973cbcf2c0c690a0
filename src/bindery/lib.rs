//! # Bindery Architecture
//!
//! Bindery keeps long-form writing as a tree of **books**, **sub-folders** and
//! **chapters** stored as plain directories, and turns chapter rich text into
//! plain text, word statistics and `.docx` documents.
//!
//! Like any front end, the CLI in `main.rs` is a thin client of the library.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (main.rs + args.rs)                                    │
//! │  - Parses arguments, prints results, owns exit codes        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API (api.rs)                                               │
//! │  - Raw path strings → sanitized NodePaths                   │
//! │  - Applies settings, dispatches to commands                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Commands (commands/*.rs)                                   │
//! │  - Business logic, returns CmdResult + advisory messages    │
//! │  - Uses order (ledger) and richtext (formatting engine)     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage (store/)                                           │
//! │  - TreeStore trait                                          │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Node kinds
//!
//! Kind is never stored. A node is a chapter exactly when its content
//! artifact exists; otherwise a depth-1 node is a book and any deeper node
//! a sub-folder. See [`model::NodeKind`].
//!
//! ## Ordering
//!
//! Each folder may hold an `order.json` side-car listing its sub-folders and
//! chapters. It is advisory: [`order::reconcile`] merges it with what is on
//! disk at read time, so a stale or corrupt record degrades to creation order.
//!
//! ## No I/O assumptions in the core
//!
//! From `api.rs` inward nothing prints or exits. Diagnostics go through the
//! `log` facade; the binary decides where they end up.
//!
//! ## Module overview
//!
//! - [`api`]: facade used by every front end
//! - [`commands`]: one module per operation
//! - [`order`]: order ledger and reconciliation
//! - [`richtext`]: markup parsing, plain text and document export
//! - [`store`]: storage trait and backends
//! - [`config`], [`error`], [`model`], [`sanitize`]: shared plumbing

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod order;
pub mod richtext;
pub mod sanitize;
pub mod store;
