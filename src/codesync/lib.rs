//! # Codesync Architecture
//!
//! Codesync keeps an editor's user configuration (settings, keybindings,
//! locale, installed extensions) in sync across machines through a single
//! remote blob, while letting each file carry machine-specific blocks.
//!
//! ## Sync Regions
//!
//! ```text
//! // @beginSync hostname:work-laptop os:linux
//! "terminal.integrated.fontSize": 15,
//! // @endSync
//! ```
//!
//! On upload the body of every region is commented out ([`annotate`]), so the
//! uploaded copy never applies machine-specific lines by accident. On download
//! a region is uncommented only when its `hostname:` / `os:` conditions match
//! the current machine ([`resolve`]). Both transforms are pure, line-for-line,
//! and report malformed regions without stopping.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prints messages, owns exit codes       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Holds the collaborators for one command run              │
//! │  - Dispatches to commands                                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - upload, download, status, preview, config, paths         │
//! │  - Returns `CmdResult`, never prints                        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core + Collaborators                                       │
//! │  - annotate / resolve / snapshot / extension diff           │
//! │  - RemoteStore (DirStore, MemStore), ExtensionHost,         │
//! │    LocalFiles, MachineInfo                                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: One module per operation
//! - [`annotate`], [`resolve`], [`markers`]: The region protocol
//! - [`snapshot`]: The persisted four-slot record
//! - [`extensions`]: Extension diff and the `ExtensionHost` capability
//! - [`store`]: Remote blob store abstraction and implementations
//! - [`session`]: Per-command remote lookup context
//! - [`machine`]: Hostname and OS detection
//! - [`paths`]: Editor user directory and local file I/O
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod annotate;
pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod extensions;
pub mod machine;
pub mod markers;
pub mod paths;
pub mod resolve;
pub mod session;
pub mod snapshot;
pub mod store;

#[cfg(test)]
pub(crate) mod test_utils;
