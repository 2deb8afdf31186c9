//! # Engine Module
//!
//! The stateful layer between the stateless [`core`](crate::core) building blocks and the
//! [`workflows`](crate::workflows).
//!
//! - [`session`] holds the deformation registry and parameter set of one editing run.
//! - [`config`] describes where and how a rendered project is written.
//! - [`error`] collects the failures a render or save can end in.

pub mod config;
pub mod error;
pub mod session;
