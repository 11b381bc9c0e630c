use super::code_unit::CodeUnitRef;
use crate::diagnostics::DebugInfo;
use crate::runtime::gc::{Gc, GcCell, Trace, Tracer};

pub type DomainRef = Gc<GcCell<Domain>>;

/// The unit of code ownership: every function compiled from one module.
/// Holding the domain keeps all of its code units alive.
#[derive(Debug, Default)]
pub struct Domain {
    source_url: Option<String>,
    debug_info: Option<DebugInfo>,
    code_units: Vec<CodeUnitRef>,
}

impl Domain {
    pub fn new(source_url: Option<String>, debug_info: Option<DebugInfo>) -> Self {
        Self {
            source_url,
            debug_info,
            code_units: Vec::new(),
        }
    }

    pub fn source_url(&self) -> Option<&str> {
        self.source_url.as_deref().filter(|url| !url.is_empty())
    }

    pub fn debug_info(&self) -> Option<&DebugInfo> {
        self.debug_info.as_ref()
    }

    pub fn code_units(&self) -> &[CodeUnitRef] {
        &self.code_units
    }

    pub(crate) fn set_code_units(&mut self, code_units: Vec<CodeUnitRef>) {
        self.code_units = code_units;
    }
}

impl Trace for Domain {
    fn trace(&self, tracer: &mut Tracer) {
        self.code_units.trace(tracer);
    }
}
