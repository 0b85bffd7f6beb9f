//! host
//!
//! Adapters that patch behavior of an extension host's menu actions.
//!
//! # Architecture
//!
//! Every patch depends only on the capability traits in `traits`, which
//! the embedding host implements. Nothing here owns a window, a clipboard,
//! or a network stack.
//!
//! # Modules
//!
//! - `traits`: `DialogService`, `Clipboard`, `HttpFetch`, and their types
//! - [`login_dialog`]: resize the login dialog and natural-sort its users
//! - [`metadata`]: copy page metadata to the clipboard
//! - [`script_patch`]: relaxed "is this really JavaScript" check
//! - [`http`]: reqwest-backed `HttpFetch`
//! - [`mock`]: in-memory host for deterministic testing

pub mod http;
pub mod login_dialog;
pub mod metadata;
pub mod mock;
pub mod script_patch;
mod traits;

pub use traits::*;
