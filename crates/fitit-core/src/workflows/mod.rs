//! # Workflows Module
//!
//! Entry points that turn an [`EditingSession`](crate::engine::session::EditingSession) into a
//! finished project script.
//!
//! - [`render`] validates the parameter set and fills a template, without touching the disk.
//! - [`save`] runs generation and rendering, then writes the result under an output policy.

pub mod render;
pub mod save;
