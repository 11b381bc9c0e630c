use super::domain::DomainRef;
use crate::diagnostics::DebugSourceLocation;
use crate::runtime::gc::{Gc, Heap, Trace, Tracer};

pub type CodeUnitRef = Gc<CodeUnit>;

/// A compiled function: its bytecode extent plus a pointer into the owning
/// domain's debug metadata.
#[derive(Debug, Clone)]
pub struct CodeUnit {
    pub(crate) name: Option<String>,
    pub(crate) function_id: u32,
    pub(crate) bytecode_len: u32,
    pub(crate) debug_table: Option<usize>,
    pub(crate) domain: DomainRef,
}

/// A debug location with its filename already resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLocation {
    pub filename: String,
    pub line: u32,
    pub column: u32,
}

impl CodeUnit {
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn function_id(&self) -> u32 {
        self.function_id
    }

    pub fn bytecode_len(&self) -> u32 {
        self.bytecode_len
    }

    pub fn domain(&self) -> DomainRef {
        self.domain
    }

    pub fn has_debug_info(&self) -> bool {
        self.debug_table.is_some()
    }

    /// Position of this function's bytecode within its module, found by
    /// summing the lengths of every function before it. Linear in the
    /// function index. Computed in `u64` since a module's total length may
    /// exceed `u32::MAX`.
    pub fn virtual_offset(&self, heap: &Heap) -> u64 {
        let Some(domain) = heap.get(self.domain) else {
            return 0;
        };
        let domain = domain.borrow();
        domain
            .code_units()
            .iter()
            .take(self.function_id as usize)
            .filter_map(|code_unit| heap.get(*code_unit))
            .map(|code_unit| u64::from(code_unit.bytecode_len))
            .sum()
    }

    pub fn raw_debug_location(&self, heap: &Heap, offset: u32) -> Option<DebugSourceLocation> {
        let table = self.debug_table?;
        let domain = heap.get(self.domain)?.borrow();
        domain.debug_info()?.location_for_address(table, offset)
    }

    pub fn debug_location(&self, heap: &Heap, offset: u32) -> Option<ResolvedLocation> {
        let location = self.raw_debug_location(heap, offset)?;
        let domain = heap.get(self.domain)?.borrow();
        let filename = domain
            .debug_info()
            .and_then(|info| info.filename_by_id(location.filename_id))
            .unwrap_or("unknown")
            .to_string();
        Some(ResolvedLocation {
            filename,
            line: location.line,
            column: location.column,
        })
    }

    pub fn source_url(&self, heap: &Heap) -> Option<String> {
        let domain = heap.get(self.domain)?.borrow();
        domain.source_url().map(str::to_string)
    }
}

impl Trace for CodeUnit {
    fn trace(&self, tracer: &mut Tracer) {
        tracer.mark(self.domain);
    }
}

#[cfg(test)]
mod tests {
    use crate::context::Context;
    use crate::vm::bytecode::ModuleBuilder;

    #[test]
    fn virtual_offset_sums_preceding_functions() {
        let mut ctx = Context::new().expect("context should initialize");
        let mut module = ModuleBuilder::new();
        module.function(Some("a"), 10);
        module.function(Some("b"), 20);
        module.function(Some("c"), 5);
        let loaded = ctx.load_module(module).expect("module should load");

        let offsets: Vec<u64> = loaded
            .code_units
            .iter()
            .map(|code| {
                ctx.code_unit(*code)
                    .expect("code unit should be live")
                    .virtual_offset(ctx.heap())
            })
            .collect();
        assert_eq!(offsets, vec![0, 10, 30]);
    }

    #[test]
    fn virtual_offset_past_u32_range() {
        let mut ctx = Context::new().expect("context should initialize");
        let mut module = ModuleBuilder::new();
        module.function(Some("huge"), u32::MAX);
        module.function(Some("small"), 1);
        module.function(Some("last"), 1);
        let loaded = ctx.load_module(module).expect("module should load");

        let last = ctx
            .code_unit(loaded.code_units[2])
            .expect("code unit should be live");
        assert_eq!(last.virtual_offset(ctx.heap()), u64::from(u32::MAX) + 1);
    }
}
