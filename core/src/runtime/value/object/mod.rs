mod property;
pub mod property_descriptor;

pub use property::Property;
pub use property_descriptor::PropertyDescriptor;

use std::collections::HashMap;

use super::JsValue;
use super::function::Callable;
use crate::runtime::error::ErrorData;
use crate::runtime::gc::{Gc, GcCell, Trace, Tracer};

pub type ObjectRef = Gc<GcCell<JsObject>>;

/// The closed set of object kinds the runtime distinguishes.
#[derive(Debug, Clone, Default)]
pub enum ObjectKind {
    #[default]
    Plain,
    Error(ErrorData),
    Callable(Callable),
}

#[derive(Debug, Clone, Default)]
pub struct JsObject {
    pub properties: HashMap<String, Property>,
    pub prototype: Option<ObjectRef>,
    pub kind: ObjectKind,
}

impl JsObject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_kind(kind: ObjectKind, prototype: Option<ObjectRef>) -> Self {
        Self {
            properties: HashMap::new(),
            prototype,
            kind,
        }
    }

    pub fn get(&self, key: &str) -> Option<JsValue> {
        self.properties.get(key).map(|p| p.value.clone())
    }

    pub fn get_own(&self, key: &str) -> Option<&Property> {
        self.properties.get(key)
    }

    pub fn set(&mut self, key: String, value: JsValue) {
        if let Some(existing) = self.properties.get_mut(&key) {
            existing.value = value;
            return;
        }
        self.properties.insert(key, Property::new(value));
    }

    /// Replaces the own property `key` wholesale.
    pub fn define(&mut self, key: String, property: Property) {
        self.properties.insert(key, property);
    }

    pub fn is_error(&self) -> bool {
        matches!(self.kind, ObjectKind::Error(_))
    }

    pub fn error_data(&self) -> Option<&ErrorData> {
        match &self.kind {
            ObjectKind::Error(data) => Some(data),
            _ => None,
        }
    }

    pub fn error_data_mut(&mut self) -> Option<&mut ErrorData> {
        match &mut self.kind {
            ObjectKind::Error(data) => Some(data),
            _ => None,
        }
    }

    pub fn callable(&self) -> Option<&Callable> {
        match &self.kind {
            ObjectKind::Callable(callable) => Some(callable),
            _ => None,
        }
    }
}

impl Trace for JsObject {
    fn trace(&self, tracer: &mut Tracer) {
        for property in self.properties.values() {
            property.trace(tracer);
        }

        if let Some(proto) = &self.prototype {
            tracer.mark(*proto);
        }

        match &self.kind {
            ObjectKind::Plain => {}
            ObjectKind::Error(data) => data.trace(tracer),
            ObjectKind::Callable(callable) => callable.trace(tracer),
        }
    }
}
