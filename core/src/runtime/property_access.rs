use crate::context::Context;
use crate::errors::RuntimeError;
use crate::runtime::value::object::PropertyDescriptor;
use crate::runtime::value::{JsObject, JsValue, ObjectKind, ObjectRef, Property};

impl Context {
    pub fn get_own_property_descriptor(
        &self,
        obj: ObjectRef,
        key: &str,
    ) -> Result<Option<PropertyDescriptor>, RuntimeError> {
        Ok(self
            .object(obj)?
            .get_own(key)
            .map(PropertyDescriptor::from_property))
    }

    /// Finds `key` on `obj` or its prototype chain without running any
    /// script code.
    pub fn get_named_descriptor(
        &self,
        obj: ObjectRef,
        key: &str,
    ) -> Result<Option<Property>, RuntimeError> {
        let mut current = Some(obj);
        while let Some(candidate) = current {
            let borrowed = self.object(candidate)?;
            if let Some(prop) = borrowed.get_own(key) {
                return Ok(Some(prop.clone()));
            }
            current = borrowed.prototype;
        }
        Ok(None)
    }

    /// Replaces the own property `key`. Returns `false` when an existing
    /// property is not configurable.
    pub fn define_own_property(
        &mut self,
        obj: ObjectRef,
        key: &str,
        descriptor: PropertyDescriptor,
    ) -> Result<bool, RuntimeError> {
        let mut target = self.object_mut(obj)?;
        if let Some(existing) = target.get_own(key)
            && !existing.configurable
        {
            return Ok(false);
        }
        target.define(key.to_string(), descriptor.into_property());
        Ok(true)
    }

    /// `[[Get]]`: runs getters with the original value as receiver.
    pub fn get_property(&mut self, value: &JsValue, key: &str) -> Result<JsValue, RuntimeError> {
        let Some(obj) = value.as_object() else {
            return Ok(JsValue::Undefined);
        };
        match self.get_named_descriptor(obj, key)? {
            None => Ok(JsValue::Undefined),
            Some(prop) if prop.is_accessor() => match prop.getter {
                Some(getter) => self.call_function(&getter, value.clone(), &[]),
                None => Ok(JsValue::Undefined),
            },
            Some(prop) => Ok(prop.value),
        }
    }

    /// `[[Set]]`: runs setters, skips read-only slots, otherwise writes an
    /// own data property.
    pub fn set_property(
        &mut self,
        target: &JsValue,
        key: &str,
        value: JsValue,
    ) -> Result<(), RuntimeError> {
        let obj = match target {
            JsValue::Object(obj) => *obj,
            JsValue::Undefined | JsValue::Null => {
                return Err(RuntimeError::type_error(format!(
                    "Cannot set property '{key}' of {target}"
                )));
            }
            _ => return Ok(()),
        };
        match self.get_named_descriptor(obj, key)? {
            Some(prop) if prop.is_accessor() => {
                if let Some(setter) = prop.setter {
                    self.call_function(&setter, target.clone(), &[value])?;
                }
                Ok(())
            }
            Some(prop) if !prop.writable => Ok(()),
            _ => {
                self.object_mut(obj)?.set(key.to_string(), value);
                Ok(())
            }
        }
    }

    pub fn to_object(&mut self, value: &JsValue) -> Result<ObjectRef, RuntimeError> {
        match value {
            JsValue::Object(obj) => Ok(*obj),
            JsValue::Undefined | JsValue::Null => Err(RuntimeError::type_error(format!(
                "Cannot convert {value} to object"
            ))),
            _ => {
                let proto = self.intrinsics.object_prototype;
                self.alloc_object(JsObject::with_kind(ObjectKind::Plain, Some(proto)))
            }
        }
    }

    /// `ToString`. Objects go through their `toString` method, which may run
    /// arbitrary native code and fail.
    pub fn to_string(&mut self, value: &JsValue) -> Result<String, RuntimeError> {
        if value.as_object().is_none() {
            return Ok(value.to_js_string());
        }
        let method = self.get_property(value, "toString")?;
        if !self.is_callable(&method) {
            return Ok("[object Object]".to_string());
        }
        let result = self.call_function(&method, value.clone(), &[])?;
        if result.as_object().is_some() {
            return Err(RuntimeError::type_error(
                "Cannot convert object to primitive value",
            ));
        }
        Ok(result.to_js_string())
    }

    /// Materializes a script string, failing past the configured maximum
    /// length.
    pub fn create_string(&self, value: String) -> Result<JsValue, RuntimeError> {
        let length = value.encode_utf16().count();
        let max = self.config.max_string_length;
        if length > max {
            return Err(RuntimeError::StringTooLong { length, max });
        }
        Ok(JsValue::String(value))
    }
}
