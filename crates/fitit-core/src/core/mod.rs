//! # Core Module
//!
//! Fundamental building blocks of project generation.
//!
//! - **Data Model** ([`models`]) - Deformation records, the ordered registry and the project parameters
//! - **Validation** ([`validation`]) - Collected field-level issues reported together
//! - **Code Generation** ([`codegen`]) - Deformation records to PyFitIt script lines
//! - **Templates** ([`template`]) - `${key}` placeholder parsing and substitution
//! - **File I/O** ([`io`]) - Project description files and rendered output

pub mod codegen;
pub mod io;
pub mod models;
pub mod template;
pub mod validation;
