//! Reading and writing the files a project touches: the TOML project description holding the
//! form state, and the rendered project script.

pub mod description;
pub mod output;
