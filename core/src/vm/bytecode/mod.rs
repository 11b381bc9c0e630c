mod code_unit;
mod domain;
mod module;

pub use code_unit::{CodeUnit, CodeUnitRef};
pub use domain::{Domain, DomainRef};
pub use module::{FunctionSpec, LoadedModule, ModuleBuilder};
