mod display;
pub mod function;
pub mod object;
pub mod storage;

pub use function::{Callable, FunctionArgs, NativeFunction, NativeFunctionBoxed};
pub use object::{JsObject, ObjectKind, ObjectRef, Property};
pub use storage::ArrayStorage;

use crate::runtime::gc::{Trace, Tracer};

#[derive(Debug, Clone)]
pub enum JsValue {
    Undefined,
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
    Object(ObjectRef),
}

impl PartialEq for JsValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (JsValue::Undefined, JsValue::Undefined) => true,
            (JsValue::Null, JsValue::Null) => true,
            (JsValue::Boolean(a), JsValue::Boolean(b)) => a == b,
            (JsValue::Number(a), JsValue::Number(b)) => a == b,
            (JsValue::String(a), JsValue::String(b)) => a == b,
            (JsValue::Object(a), JsValue::Object(b)) => a == b,
            _ => false,
        }
    }
}

impl JsValue {
    pub fn string(value: impl Into<String>) -> Self {
        JsValue::String(value.into())
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, JsValue::Undefined)
    }

    pub fn as_object(&self) -> Option<ObjectRef> {
        match self {
            JsValue::Object(obj) => Some(*obj),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// String conversion for primitives. Objects need the context to run
    /// their `toString`; see `Context::to_string`.
    pub fn to_js_string(&self) -> String {
        self.to_string()
    }
}

impl Trace for JsValue {
    fn trace(&self, tracer: &mut Tracer) {
        if let JsValue::Object(obj) = self {
            tracer.mark(*obj);
        }
    }
}
