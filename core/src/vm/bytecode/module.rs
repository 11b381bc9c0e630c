use super::code_unit::{CodeUnit, CodeUnitRef};
use super::domain::{Domain, DomainRef};
use crate::context::Context;
use crate::diagnostics::{DebugInfo, DebugSourceLocation};
use crate::errors::RuntimeError;
use crate::runtime::gc::GcCell;

#[derive(Debug, Clone)]
pub struct FunctionSpec {
    pub name: Option<String>,
    pub bytecode_len: u32,
    pub locations: Option<Vec<DebugSourceLocation>>,
}

/// Description of one compiled module, handed over by the compiler.
#[derive(Debug, Clone, Default)]
pub struct ModuleBuilder {
    source_url: Option<String>,
    filenames: Vec<String>,
    functions: Vec<FunctionSpec>,
}

impl ModuleBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = Some(url.into());
        self
    }

    /// Registers a debug-info filename and returns its id.
    pub fn add_filename(&mut self, name: impl Into<String>) -> u32 {
        self.filenames.push(name.into());
        (self.filenames.len() - 1) as u32
    }

    /// Adds a function without debug locations. Returns its function id.
    pub fn function(&mut self, name: Option<&str>, bytecode_len: u32) -> usize {
        self.functions.push(FunctionSpec {
            name: name.map(str::to_string),
            bytecode_len,
            locations: None,
        });
        self.functions.len() - 1
    }

    pub fn function_with_locations(
        &mut self,
        name: Option<&str>,
        bytecode_len: u32,
        locations: Vec<DebugSourceLocation>,
    ) -> usize {
        self.functions.push(FunctionSpec {
            name: name.map(str::to_string),
            bytecode_len,
            locations: Some(locations),
        });
        self.functions.len() - 1
    }
}

#[derive(Debug, Clone)]
pub struct LoadedModule {
    pub domain: DomainRef,
    pub code_units: Vec<CodeUnitRef>,
}

impl LoadedModule {
    pub fn code_unit(&self, function_id: usize) -> Option<CodeUnitRef> {
        self.code_units.get(function_id).copied()
    }
}

impl Context {
    /// Allocates a domain and its code units. All of them are registered in
    /// the current handle scope.
    pub fn load_module(&mut self, module: ModuleBuilder) -> Result<LoadedModule, RuntimeError> {
        let ModuleBuilder {
            source_url,
            filenames,
            functions,
        } = module;

        let mut debug_info: Option<DebugInfo> =
            (!filenames.is_empty()).then(|| DebugInfo::new(filenames.clone()));
        let mut specs = Vec::with_capacity(functions.len());
        for function in functions {
            let table = function.locations.map(|locations| {
                debug_info
                    .get_or_insert_with(|| DebugInfo::new(filenames.clone()))
                    .add_table(locations)
            });
            specs.push((function.name, function.bytecode_len, table));
        }

        let domain = self.alloc(GcCell::new(Domain::new(source_url, debug_info)))?;
        let mut code_units = Vec::with_capacity(specs.len());
        for (function_id, (name, bytecode_len, debug_table)) in specs.into_iter().enumerate() {
            let code_unit = self.alloc(CodeUnit {
                name,
                function_id: function_id as u32,
                bytecode_len,
                debug_table,
                domain,
            })?;
            code_units.push(code_unit);
        }

        self.heap
            .get(domain)
            .ok_or_else(|| RuntimeError::type_error("domain collected during load"))?
            .borrow_mut()
            .set_code_units(code_units.clone());
        tracing::debug!(functions = code_units.len(), "module loaded");

        Ok(LoadedModule { domain, code_units })
    }

    pub fn code_unit(&self, code_unit: CodeUnitRef) -> Result<&CodeUnit, RuntimeError> {
        self.heap
            .get(code_unit)
            .ok_or_else(|| RuntimeError::type_error("use of a collected code unit"))
    }
}
