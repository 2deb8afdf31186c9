pub mod deformation;
pub mod parameters;
pub mod registry;
