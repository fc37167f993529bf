//! Single-page portfolio: page view-state, static content and the Yew view.
//!
//! The browser wiring lives in the binary's `frontend` module (wasm32) and the
//! pre-rendering server in `backend` (native). Everything here is target
//! independent and testable without a browser.

pub mod ambient;
pub mod config;
pub mod content;
pub mod controller;
pub mod events;
pub mod observable;
pub mod pointer;
pub mod scroll;
pub mod section;
pub mod theme;
pub mod view;
pub mod visibility;

/// Id of the element the page mounts into.
pub const MOUNT_POINT_ID: &str = "app";
