use crate::runtime::gc::{Trace, Tracer};
use crate::runtime::value::JsValue;

#[derive(Debug, Clone)]
pub struct Property {
    pub value: JsValue,
    pub getter: Option<JsValue>,
    pub setter: Option<JsValue>,
    pub writable: bool,
    pub enumerable: bool,
    pub configurable: bool,
}

impl Property {
    pub fn new(value: JsValue) -> Self {
        Self {
            value,
            getter: None,
            setter: None,
            writable: true,
            enumerable: true,
            configurable: true,
        }
    }

    /// Writable, configurable, but hidden from enumeration.
    pub fn hidden(value: JsValue) -> Self {
        Self {
            enumerable: false,
            ..Self::new(value)
        }
    }

    pub fn accessor(getter: Option<JsValue>, setter: Option<JsValue>) -> Self {
        Self {
            value: JsValue::Undefined,
            getter,
            setter,
            writable: false,
            enumerable: true,
            configurable: true,
        }
    }

    pub fn is_accessor(&self) -> bool {
        self.getter.is_some() || self.setter.is_some()
    }
}

impl Trace for Property {
    fn trace(&self, tracer: &mut Tracer) {
        self.value.trace(tracer);
        self.getter.trace(tracer);
        self.setter.trace(tracer);
    }
}
