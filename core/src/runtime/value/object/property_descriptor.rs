use super::Property;
use crate::runtime::value::JsValue;

/// Input to `Context::define_own_property`: either a data slot or an
/// accessor pair, plus attribute flags.
#[derive(Debug, Clone)]
pub struct PropertyDescriptor {
    pub value: Option<JsValue>,
    pub writable: bool,
    pub enumerable: bool,
    pub configurable: bool,
    pub get: Option<JsValue>,
    pub set: Option<JsValue>,
}

impl PropertyDescriptor {
    pub fn data(value: JsValue) -> Self {
        Self {
            value: Some(value),
            writable: true,
            enumerable: true,
            configurable: true,
            get: None,
            set: None,
        }
    }

    pub fn accessor(get: Option<JsValue>, set: Option<JsValue>) -> Self {
        Self {
            value: None,
            writable: false,
            enumerable: true,
            configurable: true,
            get,
            set,
        }
    }

    pub fn enumerable(mut self, enumerable: bool) -> Self {
        self.enumerable = enumerable;
        self
    }

    pub fn writable(mut self, writable: bool) -> Self {
        self.writable = writable;
        self
    }

    pub fn configurable(mut self, configurable: bool) -> Self {
        self.configurable = configurable;
        self
    }

    pub fn is_accessor(&self) -> bool {
        self.get.is_some() || self.set.is_some()
    }

    pub fn from_property(property: &Property) -> Self {
        if property.is_accessor() {
            Self::accessor(property.getter.clone(), property.setter.clone())
                .enumerable(property.enumerable)
                .configurable(property.configurable)
        } else {
            Self::data(property.value.clone())
                .writable(property.writable)
                .enumerable(property.enumerable)
                .configurable(property.configurable)
        }
    }

    pub fn into_property(self) -> Property {
        if self.is_accessor() {
            Property {
                enumerable: self.enumerable,
                configurable: self.configurable,
                ..Property::accessor(self.get, self.set)
            }
        } else {
            Property {
                value: self.value.unwrap_or(JsValue::Undefined),
                getter: None,
                setter: None,
                writable: self.writable,
                enumerable: self.enumerable,
                configurable: self.configurable,
            }
        }
    }
}
