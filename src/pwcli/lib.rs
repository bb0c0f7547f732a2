//! # pwcli Architecture
//!
//! pwcli is a **library with a CLI front end** for the Patchwork patch
//! tracking service. The binary parses arguments and renders output; all
//! behavior lives in the library so it can be exercised without a
//! terminal or a server.
//!
//! ## Layers
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │  CLI layer (args.rs, render.rs, wired by main.rs)          │
//! │  - Parses flags, draws tables                              │
//! │  - The ONLY place that owns stdout/stderr and exit codes   │
//! └────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌────────────────────────────────────────────────────────────┐
//! │  Command layer (commands/*.rs)                             │
//! │  - Resolves identity filters, builds ordered queries       │
//! │  - Operates on Rust types, returns Rust types              │
//! └────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌────────────────────────────────────────────────────────────┐
//! │  Client layer (client/)                                    │
//! │  - Abstract ApiClient trait                                │
//! │  - HttpClient (production), ReplayClient (testing)         │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: Ordered Parameters
//!
//! Listing queries are built as ordered key/value lists, never maps.
//! Filters that were not given stay in the list as `None` placeholders
//! and are dropped at the wire, so every layer sees the same stable
//! shape and tests can assert on the exact request sequence a command
//! produced.
//!
//! ## No I/O Assumptions in Core
//!
//! From `commands/` inward, code takes regular arguments, returns
//! `Result` values, **never** writes to stdout/stderr, **never** calls
//! `std::process::exit` and **never** assumes a terminal. The one
//! exception is `git.rs`, which exists precisely to run `git am` against
//! the working tree.

pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod filters;
pub mod git;
pub mod model;
pub mod query;
