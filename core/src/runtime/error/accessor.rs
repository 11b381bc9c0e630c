use crate::context::Context;
use crate::errors::RuntimeError;
use crate::runtime::gc::{Trace, Tracer};
use crate::runtime::value::object::PropertyDescriptor;
use crate::runtime::value::{FunctionArgs, JsValue, ObjectRef};

/// Value stored in `stack` when the formatted trace cannot be turned into a
/// string.
pub const STACK_TRACE_TOO_LONG: &str = "stack trace too long";

/// The getter/setter pair behind every unread `stack` property. Created once
/// per context, on first need.
#[derive(Debug, Clone, Copy)]
pub struct StackAccessor {
    pub getter: ObjectRef,
    pub setter: ObjectRef,
}

impl Trace for StackAccessor {
    fn trace(&self, tracer: &mut Tracer) {
        tracer.mark(self.getter);
        tracer.mark(self.setter);
    }
}

impl Context {
    pub fn error_stack_accessor(&mut self) -> Result<StackAccessor, RuntimeError> {
        if let Some(accessor) = self.error_stack_accessor {
            return Ok(accessor);
        }
        let accessor = self.scope(|ctx| {
            let getter = ctx.create_native_function("", 0, error_stack_getter)?;
            let setter = ctx.create_native_function("", 1, error_stack_setter)?;
            Ok::<_, RuntimeError>(StackAccessor { getter, setter })
        })?;
        self.error_stack_accessor = Some(accessor);
        Ok(accessor)
    }

    /// Installs the shared accessor as `error.stack` (non-enumerable,
    /// configurable).
    pub fn setup_stack(&mut self, error: ObjectRef) -> Result<(), RuntimeError> {
        let accessor = self.error_stack_accessor()?;
        let descriptor = PropertyDescriptor::accessor(
            Some(JsValue::Object(accessor.getter)),
            Some(JsValue::Object(accessor.setter)),
        )
        .enumerable(false)
        .configurable(true);
        if !self.define_own_property(error, "stack", descriptor)? {
            return Err(RuntimeError::type_error("Cannot redefine property: stack"));
        }
        Ok(())
    }
}

fn error_stack_getter(ctx: &mut Context, args: FunctionArgs) -> Result<JsValue, RuntimeError> {
    let Some(error) = ctx.as_error(args.this()) else {
        return Err(RuntimeError::type_error(
            "Error.stack accessor 'this' must be an instance of 'Error'",
        ));
    };

    // Traces are captured when an error is raised, so an error that was
    // only constructed has nothing to show yet.
    if !ctx.has_stack_trace(error)? {
        return Ok(JsValue::string(""));
    }

    let stack = ctx.format_stack_trace(error);
    if !ctx.config.retain_stack_traces {
        ctx.release_stack_trace(error)?;
    }

    let value = match ctx.create_string(stack) {
        Ok(value) => value,
        Err(err) => {
            tracing::debug!(%err, "stack string replaced with placeholder");
            JsValue::string(STACK_TRACE_TOO_LONG)
        }
    };

    ctx.define_own_property(
        error,
        "stack",
        PropertyDescriptor::data(value.clone()).enumerable(false),
    )?;
    Ok(value)
}

fn error_stack_setter(ctx: &mut Context, args: FunctionArgs) -> Result<JsValue, RuntimeError> {
    if let Some(error) = ctx.as_error(args.this()) {
        ctx.release_stack_trace(error)?;
    }
    let target = ctx.to_object(args.this())?;
    ctx.define_own_property(
        target,
        "stack",
        PropertyDescriptor::data(args.arg(0)).enumerable(false),
    )?;
    Ok(JsValue::Undefined)
}
