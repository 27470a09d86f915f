//! Domain types for both sides of the synchronization boundary.
//!
//! - [`widget`] — the flat task-list-with-links projection the widget renders.
//! - [`backend`] — tolerant inbound payload shapes and outbound DTOs.
//! - [`role`] — normalization of heterogeneous role encodings.

pub mod backend;
pub mod role;
pub mod widget;
