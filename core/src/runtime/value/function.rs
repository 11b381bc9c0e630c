use std::sync::Arc;

use super::JsValue;
use crate::context::Context;
use crate::errors::RuntimeError;
use crate::runtime::gc::{Trace, Tracer};
use crate::vm::bytecode::CodeUnitRef;

pub trait NativeFunction: Send + Sync {
    fn call(&self, ctx: &mut Context, args: FunctionArgs) -> Result<JsValue, RuntimeError>;
}

#[derive(Clone)]
pub struct NativeFunctionBoxed {
    callback: Arc<dyn NativeFunction>,
}

impl std::fmt::Debug for NativeFunctionBoxed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("NativeFunctionBoxed(..)")
    }
}

impl NativeFunctionBoxed {
    pub fn new<T: NativeFunction + 'static>(callback: T) -> Self {
        Self {
            callback: Arc::new(callback),
        }
    }

    pub fn from_closure<F>(callback: F) -> Self
    where
        F: Fn(&mut Context, FunctionArgs) -> Result<JsValue, RuntimeError> + Send + Sync + 'static,
    {
        Self::new(ClosureFunction { callback })
    }

    pub fn call(&self, ctx: &mut Context, args: FunctionArgs) -> Result<JsValue, RuntimeError> {
        self.callback.call(ctx, args)
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.callback, &other.callback)
    }
}

struct ClosureFunction<F> {
    callback: F,
}

impl<F> NativeFunction for ClosureFunction<F>
where
    F: Fn(&mut Context, FunctionArgs) -> Result<JsValue, RuntimeError> + Send + Sync,
{
    fn call(&self, ctx: &mut Context, args: FunctionArgs) -> Result<JsValue, RuntimeError> {
        (self.callback)(ctx, args)
    }
}

#[derive(Debug, Clone)]
pub struct FunctionArgs {
    this_value: JsValue,
    values: Vec<JsValue>,
}

impl FunctionArgs {
    pub fn new(this_value: JsValue, values: Vec<JsValue>) -> Self {
        Self { this_value, values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&JsValue> {
        self.values.get(index)
    }

    /// Argument at `index`, or `undefined` when absent.
    pub fn arg(&self, index: usize) -> JsValue {
        self.values.get(index).cloned().unwrap_or(JsValue::Undefined)
    }

    pub fn this(&self) -> &JsValue {
        &self.this_value
    }
}

/// The behavior behind a function object.
#[derive(Debug, Clone)]
pub enum Callable {
    Native(NativeFunctionBoxed),
    /// Compiled script code; executed by the interpreter through frames.
    Script(CodeUnitRef),
}

impl Callable {
    pub fn code_unit(&self) -> Option<CodeUnitRef> {
        match self {
            Callable::Native(_) => None,
            Callable::Script(code_unit) => Some(*code_unit),
        }
    }
}

impl Trace for Callable {
    fn trace(&self, tracer: &mut Tracer) {
        if let Callable::Script(code_unit) = self {
            tracer.mark(*code_unit);
        }
    }
}
