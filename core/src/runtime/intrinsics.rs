use crate::errors::RuntimeError;
use crate::runtime::gc::{GcCell, Heap, Trace, Tracer};
use crate::runtime::value::{JsObject, JsValue, ObjectRef, Property};

/// Built-in prototypes shared by every object a context creates.
#[derive(Debug, Clone, Copy)]
pub struct Intrinsics {
    pub object_prototype: ObjectRef,
    pub function_prototype: ObjectRef,
    pub error_prototype: ObjectRef,
    pub type_error_prototype: ObjectRef,
    pub range_error_prototype: ObjectRef,
}

impl Intrinsics {
    pub(crate) fn create(heap: &mut Heap) -> Result<Self, RuntimeError> {
        let object_prototype = heap.alloc(GcCell::new(JsObject::new()))?;
        let function_prototype = heap.alloc(GcCell::new(JsObject::with_kind(
            Default::default(),
            Some(object_prototype),
        )))?;
        let error_prototype = heap.alloc(GcCell::new(error_prototype_object(
            "Error",
            object_prototype,
        )))?;
        let type_error_prototype = heap.alloc(GcCell::new(error_prototype_object(
            "TypeError",
            error_prototype,
        )))?;
        let range_error_prototype = heap.alloc(GcCell::new(error_prototype_object(
            "RangeError",
            error_prototype,
        )))?;
        Ok(Self {
            object_prototype,
            function_prototype,
            error_prototype,
            type_error_prototype,
            range_error_prototype,
        })
    }
}

fn error_prototype_object(name: &str, parent: ObjectRef) -> JsObject {
    let mut proto = JsObject::with_kind(Default::default(), Some(parent));
    proto.define("name".to_string(), Property::hidden(JsValue::string(name)));
    proto.define("message".to_string(), Property::hidden(JsValue::string("")));
    proto
}

impl Trace for Intrinsics {
    fn trace(&self, tracer: &mut Tracer) {
        tracer.mark(self.object_prototype);
        tracer.mark(self.function_prototype);
        tracer.mark(self.error_prototype);
        tracer.mark(self.type_error_prototype);
        tracer.mark(self.range_error_prototype);
    }
}
