use super::DomainTracker;
use crate::context::Context;
use crate::diagnostics::{FrameEntry, StackTrace};
use crate::errors::RuntimeError;
use crate::runtime::value::ObjectRef;
use crate::vm::bytecode::CodeUnitRef;

impl Context {
    /// Captures the live call stack into `error`.
    ///
    /// The first entry describes the current point (`code_unit` at `offset`,
    /// or a native entry) unless `skip_top_frame` is set; each live frame
    /// then contributes the point its caller was executing. Capture is
    /// best-effort: allocation failures leave the error without a trace, or
    /// without names, and still return `Ok`. An error is captured at most
    /// once, even after its trace has been released.
    pub fn record_stack_trace(
        &mut self,
        error: ObjectRef,
        skip_top_frame: bool,
        code_unit: Option<CodeUnitRef>,
        offset: u32,
    ) -> Result<(), RuntimeError> {
        if self.error_data(error)?.is_captured() {
            return Ok(());
        }

        // Script code on top but no offset for it: any entry recorded now
        // would be wrong. Leave the trace unset for a later capture.
        if !skip_top_frame
            && code_unit.is_none()
            && self
                .stack_frames()
                .next()
                .is_some_and(|frame| frame.callee_code_unit(&self.heap).is_some())
        {
            tracing::debug!("script frame on top without an offset; trace not recorded");
            return Ok(());
        }

        self.scope(|ctx| {
            ctx.handles.create(error);

            let (trace, domains) = match ctx.walk_stack_trace(skip_top_frame, code_unit, offset) {
                Ok(captured) => captured,
                Err(err) => {
                    tracing::debug!(%err, "stack trace capture aborted");
                    return Ok(());
                }
            };

            let names = ctx.call_stack_function_names(skip_top_frame, trace.len());
            debug_assert!(
                names.is_none_or(|list| ctx
                    .storage(list)
                    .is_ok_and(|list| list.len() == trace.len())),
                "function names and stack trace must have the same length"
            );
            tracing::trace!(
                frames = trace.len(),
                named = names.is_some(),
                "stack trace recorded"
            );

            let mut obj = ctx.object_mut(error)?;
            if let Some(data) = obj.error_data_mut() {
                data.stacktrace = Some(trace);
                data.func_names = names;
                data.domains = Some(domains.list());
                data.captured = true;
            }
            Ok(())
        })
    }

    fn walk_stack_trace(
        &mut self,
        skip_top_frame: bool,
        code_unit: Option<CodeUnitRef>,
        offset: u32,
    ) -> Result<(StackTrace, DomainTracker), RuntimeError> {
        let mut trace = StackTrace::new();
        if !skip_top_frame {
            trace.push(match code_unit {
                Some(code_unit) => FrameEntry::new(Some(code_unit), offset),
                None => FrameEntry::native(),
            });
        }
        for frame in self.stack_frames() {
            trace.push(FrameEntry::new(
                frame.saved_code_unit(),
                frame.saved_offset(),
            ));
        }
        // The outermost frame was entered from the host; the entry for its
        // caller is the boundary, not a real activation.
        trace.pop();

        let mut domains = DomainTracker::new(self)?;
        for entry in trace.iter() {
            if let Some(code_unit) = entry.code_unit {
                domains.add_domain(self, code_unit)?;
            }
        }
        Ok((trace, domains))
    }
}
