use std::collections::HashMap;
use std::ops::Range;

use super::name_at;
use crate::context::Context;
use crate::diagnostics::StackTrace;
use crate::runtime::gc::Heap;
use crate::runtime::value::{ArrayStorage, JsValue, ObjectRef};
use crate::vm::bytecode::CodeUnitRef;

/// Header used when the error's own `toString` fails.
pub const ERROR_PLACEHOLDER: &str = "<error>";

const PRINT_HEAD: usize = 50;
const PRINT_TAIL: usize = 50;

/// Which entries of a trace of `len` frames get printed. Traces longer than
/// head + tail keep both ends and replace the middle with one skip line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TruncationPlan {
    len: usize,
}

impl TruncationPlan {
    pub fn for_len(len: usize) -> Self {
        Self { len }
    }

    fn truncated(&self) -> bool {
        self.len > PRINT_HEAD + PRINT_TAIL
    }

    pub fn head(&self) -> Range<usize> {
        if self.truncated() {
            0..PRINT_HEAD
        } else {
            0..self.len
        }
    }

    pub fn skipped(&self) -> Option<usize> {
        self.truncated()
            .then(|| self.len - PRINT_HEAD - PRINT_TAIL)
    }

    pub fn tail(&self) -> Range<usize> {
        if self.truncated() {
            self.len - PRINT_TAIL..self.len
        } else {
            self.len..self.len
        }
    }
}

/// Renders captured traces. Holds a per-call cache of virtual offsets since
/// deep recursion revisits the same code unit many times and each lookup
/// walks the module's function list.
pub struct TraceFormatter<'h> {
    heap: &'h Heap,
    virtual_offsets: HashMap<CodeUnitRef, u64>,
}

impl<'h> TraceFormatter<'h> {
    pub fn new(heap: &'h Heap) -> Self {
        Self {
            heap,
            virtual_offsets: HashMap::new(),
        }
    }

    pub fn format(
        &mut self,
        header: &str,
        trace: &StackTrace,
        names: Option<&ArrayStorage<JsValue>>,
    ) -> String {
        let mut out = String::from(header);
        let plan = TruncationPlan::for_len(trace.len());
        for index in plan.head() {
            self.append_frame(&mut out, trace, names, index);
        }
        if let Some(skipped) = plan.skipped() {
            out.push_str(&format!("\n    ... skipping {skipped} frames"));
        }
        for index in plan.tail() {
            self.append_frame(&mut out, trace, names, index);
        }
        out
    }

    fn append_frame(
        &mut self,
        out: &mut String,
        trace: &StackTrace,
        names: Option<&ArrayStorage<JsValue>>,
        index: usize,
    ) {
        let heap = self.heap;
        let Some(entry) = trace.get(index) else {
            return;
        };
        out.push_str("\n    at ");
        out.push_str(name_at(heap, trace, names, index).unwrap_or("anonymous"));

        let Some((code_ref, code_unit)) = entry
            .code_unit
            .and_then(|code_ref| heap.get(code_ref).map(|code_unit| (code_ref, code_unit)))
        else {
            out.push_str(" (native)");
            return;
        };

        match code_unit.debug_location(heap, entry.offset) {
            Some(location) => out.push_str(&format!(
                " ({}:{}:{})",
                location.filename, location.line, location.column
            )),
            None => {
                let base = *self
                    .virtual_offsets
                    .entry(code_ref)
                    .or_insert_with(|| code_unit.virtual_offset(heap));
                let source = code_unit
                    .source_url(heap)
                    .unwrap_or_else(|| "unknown".to_string());
                let column = u64::from(entry.offset) + base;
                out.push_str(&format!(" (address at {source}:1:{column})"));
            }
        }
    }
}

impl Context {
    /// Builds the `stack` string for `error`: its `toString` output followed
    /// by one line per retained frame. Never fails; a throwing `toString`
    /// yields the `<error>` header. The trace itself is left untouched.
    pub fn format_stack_trace(&mut self, error: ObjectRef) -> String {
        let header = self.scope(|ctx| {
            ctx.handles.create(error);
            ctx.to_string(&JsValue::Object(error))
        });
        let header = match header {
            Ok(header) => header,
            Err(err) => {
                tracing::debug!(%err, "error toString failed; using placeholder header");
                ERROR_PLACEHOLDER.to_string()
            }
        };

        let Ok(data) = self.error_data(error) else {
            return header;
        };
        let Some(trace) = data.stack_trace() else {
            return header;
        };
        let names = data
            .function_names()
            .and_then(|list| self.heap.get(list))
            .map(|cell| cell.borrow());
        TraceFormatter::new(&self.heap).format(&header, trace, names.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::TruncationPlan;

    #[test]
    fn short_traces_print_everything() {
        let plan = TruncationPlan::for_len(100);
        assert_eq!(plan.head(), 0..100);
        assert_eq!(plan.skipped(), None);
        assert!(plan.tail().is_empty());
    }

    #[test]
    fn long_traces_keep_both_ends() {
        let plan = TruncationPlan::for_len(130);
        assert_eq!(plan.head(), 0..50);
        assert_eq!(plan.skipped(), Some(30));
        assert_eq!(plan.tail(), 80..130);
    }

    #[test]
    fn one_over_the_limit_skips_one() {
        let plan = TruncationPlan::for_len(101);
        assert_eq!(plan.skipped(), Some(1));
        assert_eq!(plan.tail(), 51..101);
    }
}
