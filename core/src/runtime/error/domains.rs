use super::DomainList;
use crate::context::Context;
use crate::errors::RuntimeError;
use crate::vm::bytecode::CodeUnitRef;

/// Builds the domain list for one capture. Only the most recent entry is
/// compared, so runs of frames from the same module collapse to one entry
/// in constant time while interleaved modules may repeat.
pub struct DomainTracker {
    list: DomainList,
}

impl DomainTracker {
    pub fn new(ctx: &mut Context) -> Result<Self, RuntimeError> {
        Ok(Self {
            list: ctx.alloc_storage(1)?,
        })
    }

    pub fn add_domain(
        &mut self,
        ctx: &mut Context,
        code_unit: CodeUnitRef,
    ) -> Result<(), RuntimeError> {
        let domain = ctx.code_unit(code_unit)?.domain();
        if ctx.storage(self.list)?.last() == Some(&domain) {
            return Ok(());
        }
        let list = self.list;
        ctx.scope(|ctx| {
            ctx.handles.create(domain);
            ctx.storage_push(list, domain)
        })
    }

    pub fn list(&self) -> DomainList {
        self.list
    }
}
