//! Error instances and their lazily-formatted `stack` property.
//!
//! A trace is captured when an error is raised (`record_stack_trace`), not
//! when it is constructed. The `stack` string is only built on first read,
//! through an accessor pair shared by every error in the context.

mod accessor;
mod capture;
mod domains;
mod format;
mod names;

pub use accessor::{STACK_TRACE_TOO_LONG, StackAccessor};
pub use domains::DomainTracker;
pub use format::{ERROR_PLACEHOLDER, TraceFormatter, TruncationPlan};
pub use names::name_at;

use std::cell::Ref;

use crate::context::Context;
use crate::diagnostics::StackTrace;
use crate::errors::RuntimeError;
use crate::runtime::gc::{Gc, GcCell, Trace, Tracer};
use crate::runtime::value::object::PropertyDescriptor;
use crate::runtime::value::{ArrayStorage, FunctionArgs, JsObject, JsValue, ObjectKind, ObjectRef};
use crate::vm::bytecode::DomainRef;

/// Function names aligned index-for-index with a captured trace.
pub type NameList = Gc<GcCell<ArrayStorage<JsValue>>>;

/// Domains referenced by a captured trace, kept alive alongside it.
pub type DomainList = Gc<GcCell<ArrayStorage<DomainRef>>>;

/// Internal state of an Error instance. The three fields are set together
/// by a successful capture, which happens at most once per error: a trace
/// released after `stack` was read or assigned is never recaptured.
#[derive(Debug, Clone, Default)]
pub struct ErrorData {
    pub(crate) stacktrace: Option<StackTrace>,
    pub(crate) func_names: Option<NameList>,
    pub(crate) domains: Option<DomainList>,
    pub(crate) captured: bool,
}

impl ErrorData {
    pub fn stack_trace(&self) -> Option<&StackTrace> {
        self.stacktrace.as_ref()
    }

    pub fn function_names(&self) -> Option<NameList> {
        self.func_names
    }

    pub fn domains(&self) -> Option<DomainList> {
        self.domains
    }

    pub fn is_captured(&self) -> bool {
        self.captured
    }

    pub(crate) fn release_trace(&mut self) {
        self.stacktrace = None;
        self.func_names = None;
    }
}

impl Trace for ErrorData {
    // Frame entries are not traced: their code stays alive through the
    // domain list.
    fn trace(&self, tracer: &mut Tracer) {
        self.func_names.trace(tracer);
        self.domains.trace(tracer);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Error,
    TypeError,
    RangeError,
}

impl Context {
    pub(crate) fn init_error_builtins(&mut self) -> Result<(), RuntimeError> {
        let proto = self.intrinsics.error_prototype;
        self.scope(|ctx| {
            let to_string = ctx.create_native_function("toString", 0, error_to_string)?;
            ctx.define_own_property(
                proto,
                "toString",
                PropertyDescriptor::data(JsValue::Object(to_string)).enumerable(false),
            )?;
            Ok(())
        })
    }

    /// Creates an error instance with the accessor-backed `stack` property.
    /// No trace is captured until the error is raised.
    pub fn create_error(
        &mut self,
        kind: ErrorKind,
        message: JsValue,
    ) -> Result<ObjectRef, RuntimeError> {
        let proto = match kind {
            ErrorKind::Error => self.intrinsics.error_prototype,
            ErrorKind::TypeError => self.intrinsics.type_error_prototype,
            ErrorKind::RangeError => self.intrinsics.range_error_prototype,
        };
        let error = self.alloc_object(JsObject::with_kind(
            ObjectKind::Error(ErrorData::default()),
            Some(proto),
        ))?;
        if !message.is_undefined() {
            self.set_message(error, &message)?;
        }
        self.setup_stack(error)?;
        Ok(error)
    }

    pub fn set_message(&mut self, error: ObjectRef, message: &JsValue) -> Result<(), RuntimeError> {
        let text = match message {
            JsValue::String(s) => s.clone(),
            other => self.to_string(other)?,
        };
        self.define_own_property(
            error,
            "message",
            PropertyDescriptor::data(JsValue::String(text)).enumerable(false),
        )?;
        Ok(())
    }

    pub fn as_error(&self, value: &JsValue) -> Option<ObjectRef> {
        let obj = value.as_object()?;
        self.object(obj).ok()?.is_error().then_some(obj)
    }

    pub fn error_data(&self, error: ObjectRef) -> Result<Ref<'_, ErrorData>, RuntimeError> {
        let obj = self.object(error)?;
        Ref::filter_map(obj, JsObject::error_data)
            .map_err(|_| RuntimeError::type_error("object is not an Error instance"))
    }

    pub fn has_stack_trace(&self, error: ObjectRef) -> Result<bool, RuntimeError> {
        Ok(self.error_data(error)?.stacktrace.is_some())
    }

    /// The retained frames, for debuggers and other tooling.
    pub fn captured_trace(&self, error: ObjectRef) -> Result<Option<StackTrace>, RuntimeError> {
        Ok(self.error_data(error)?.stacktrace.clone())
    }

    /// Resolved display names for each retained frame.
    pub fn function_names(
        &self,
        error: ObjectRef,
    ) -> Result<Option<Vec<Option<String>>>, RuntimeError> {
        let data = self.error_data(error)?;
        let Some(trace) = data.stack_trace() else {
            return Ok(None);
        };
        let names = match data.func_names {
            Some(list) => Some(self.storage(list)?),
            None => None,
        };
        Ok(Some(
            (0..trace.len())
                .map(|index| name_at(&self.heap, trace, names.as_deref(), index).map(str::to_string))
                .collect(),
        ))
    }

    pub(crate) fn release_stack_trace(&mut self, error: ObjectRef) -> Result<(), RuntimeError> {
        let mut obj = self.object_mut(error)?;
        if let Some(data) = obj.error_data_mut() {
            data.release_trace();
        }
        Ok(())
    }

    /// Interpreter-side throw: records the trace from the current execution
    /// point when `value` is an error, then hands back the exception.
    pub fn throw_value(&mut self, value: JsValue) -> RuntimeError {
        if let Some(error) = self.as_error(&value) {
            let point = self.current;
            let recorded = self.record_stack_trace(
                error,
                false,
                point.map(|p| p.code_unit),
                point.map_or(0, |p| p.offset),
            );
            if let Err(err) = recorded {
                tracing::debug!(%err, "stack trace not recorded for thrown error");
            }
        }
        RuntimeError::Thrown { value }
    }

    pub fn raise(&mut self, error: ObjectRef) -> RuntimeError {
        self.throw_value(JsValue::Object(error))
    }

    /// Native-side throw. The native frame on top of the stack becomes the
    /// first entry of the trace.
    pub fn throw_type_error(&mut self, message: &str) -> RuntimeError {
        self.throw_native_error(ErrorKind::TypeError, message)
    }

    pub fn throw_range_error(&mut self, message: &str) -> RuntimeError {
        self.throw_native_error(ErrorKind::RangeError, message)
    }

    fn throw_native_error(&mut self, kind: ErrorKind, message: &str) -> RuntimeError {
        let error = match self.create_error(kind, JsValue::string(message)) {
            Ok(error) => error,
            Err(err) => return err,
        };
        if let Err(err) = self.record_stack_trace(error, false, None, 0) {
            tracing::debug!(%err, "stack trace not recorded for native error");
        }
        RuntimeError::Thrown {
            value: JsValue::Object(error),
        }
    }
}

/// `Error.prototype.toString`.
fn error_to_string(ctx: &mut Context, args: FunctionArgs) -> Result<JsValue, RuntimeError> {
    let this = args.this().clone();
    if this.as_object().is_none() {
        return Err(RuntimeError::type_error(
            "Error.prototype.toString called on non-object",
        ));
    }
    let name = match ctx.get_property(&this, "name")? {
        JsValue::Undefined => "Error".to_string(),
        other => ctx.to_string(&other)?,
    };
    let message = match ctx.get_property(&this, "message")? {
        JsValue::Undefined => String::new(),
        other => ctx.to_string(&other)?,
    };
    let text = if name.is_empty() {
        message
    } else if message.is_empty() {
        name
    } else {
        format!("{name}: {message}")
    };
    Ok(JsValue::String(text))
}
