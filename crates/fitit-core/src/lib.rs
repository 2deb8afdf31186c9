//! # fitit Core Library
//!
//! Builds PyFitIt project scripts from a list of user-declared molecular deformations
//! and a flat set of FDMNES / fitting parameters.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer layout:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Deformation`, `DeformationRegistry`,
//!   `ProjectParameters`), the deformation code generator, the `${key}` template engine and
//!   file I/O helpers.
//!
//! - **[`engine`]: The Stateful Layer.** The explicit `EditingSession` that owns the registry and
//!   parameter set of one editing run, output configuration, and the top-level error type.
//!
//! - **[`workflows`]: The Public API.** Rendering and saving a complete project: generate the
//!   deformation fragment, validate every parameter, substitute the template and write the result.

pub mod core;
pub mod engine;
pub mod workflows;
