use crate::context::Context;
use crate::diagnostics::StackTrace;
use crate::runtime::gc::Heap;
use crate::runtime::value::{ArrayStorage, JsValue};
use crate::vm::machine::FrameCallee;

use super::NameList;

/// Display name for entry `index`: the recorded function name when it is a
/// non-empty string, otherwise the code unit's declared name.
pub fn name_at<'a>(
    heap: &'a Heap,
    trace: &StackTrace,
    names: Option<&'a ArrayStorage<JsValue>>,
    index: usize,
) -> Option<&'a str> {
    let recorded = names
        .and_then(|names| names.get(index))
        .and_then(JsValue::as_str)
        .filter(|name| !name.is_empty());
    if recorded.is_some() {
        return recorded;
    }
    let code_unit = trace.get(index)?.code_unit?;
    heap.get(code_unit)?.name().filter(|name| !name.is_empty())
}

impl Context {
    /// The `name` of the function running `depth` frames below the top.
    /// Accessor-backed names are skipped so no user code runs here.
    pub(crate) fn frame_function_name(&self, depth: usize) -> JsValue {
        let Some(frame) = self.frames.from_top(depth) else {
            return JsValue::Undefined;
        };
        match frame.callee() {
            FrameCallee::Function(obj) => match self.get_named_descriptor(obj, "name") {
                Ok(Some(prop)) if !prop.is_accessor() => prop.value,
                _ => JsValue::Undefined,
            },
            FrameCallee::Code(code_unit) => self
                .heap
                .get(code_unit)
                .and_then(|code_unit| code_unit.name())
                .map(JsValue::string)
                .unwrap_or(JsValue::Undefined),
        }
    }

    /// Names for every live frame, newest first, aligned with the trace a
    /// capture with the same `skip_top_frame` produces. `None` when the list
    /// cannot be allocated.
    pub(crate) fn call_stack_function_names(
        &mut self,
        skip_top_frame: bool,
        size_hint: usize,
    ) -> Option<NameList> {
        let names = match self.alloc_storage::<JsValue>(size_hint) {
            Ok(names) => names,
            Err(err) => {
                tracing::debug!(%err, "function name list not allocated");
                return None;
            }
        };

        let marker = self.handles.marker();
        for depth in 0..self.frame_depth() {
            if depth == 0 && skip_top_frame {
                continue;
            }
            let name = self.frame_function_name(depth);
            if let Err(err) = self.storage_push(names, name) {
                tracing::debug!(%err, depth, "function name list truncated; dropping names");
                return None;
            }
            self.handles.flush_to_marker(marker);
        }
        Some(names)
    }
}
