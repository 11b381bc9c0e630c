use crate::context::Context;
use crate::errors::RuntimeError;
use crate::runtime::value::{
    Callable, FunctionArgs, JsObject, JsValue, NativeFunctionBoxed, ObjectKind, ObjectRef,
    Property,
};
use crate::vm::bytecode::CodeUnitRef;
use crate::vm::machine::FrameCallee;

impl Context {
    pub fn create_native_function<F>(
        &mut self,
        name: &str,
        arity: u32,
        callback: F,
    ) -> Result<ObjectRef, RuntimeError>
    where
        F: Fn(&mut Context, FunctionArgs) -> Result<JsValue, RuntimeError> + Send + Sync + 'static,
    {
        let callable = Callable::Native(NativeFunctionBoxed::from_closure(callback));
        self.create_function(callable, Some(name), arity)
    }

    /// Wraps a code unit in a function object named after the code unit.
    pub fn create_script_function(
        &mut self,
        code_unit: CodeUnitRef,
    ) -> Result<ObjectRef, RuntimeError> {
        let name = self.code_unit(code_unit)?.name().map(str::to_string);
        self.create_function(Callable::Script(code_unit), name.as_deref(), 0)
    }

    fn create_function(
        &mut self,
        callable: Callable,
        name: Option<&str>,
        arity: u32,
    ) -> Result<ObjectRef, RuntimeError> {
        let proto = self.intrinsics.function_prototype;
        let mut function = JsObject::with_kind(ObjectKind::Callable(callable), Some(proto));
        if let Some(name) = name {
            function.define("name".to_string(), read_only(JsValue::string(name)));
        }
        function.define(
            "length".to_string(),
            read_only(JsValue::Number(arity as f64)),
        );
        self.alloc_object(function)
    }

    pub fn is_callable(&self, value: &JsValue) -> bool {
        value
            .as_object()
            .and_then(|obj| self.object(obj).ok().map(|o| o.callable().is_some()))
            .unwrap_or(false)
    }

    /// Calls a native function inside its own frame. Script functions are
    /// run by the interpreter through `push_frame`/`pop_frame`.
    pub fn call_function(
        &mut self,
        callee: &JsValue,
        this_value: JsValue,
        args: &[JsValue],
    ) -> Result<JsValue, RuntimeError> {
        let obj = callee
            .as_object()
            .ok_or_else(|| RuntimeError::type_error(format!("{callee} is not a function")))?;
        let callable = self
            .object(obj)?
            .callable()
            .cloned()
            .ok_or_else(|| RuntimeError::type_error("object is not a function"))?;
        let native = match callable {
            Callable::Native(native) => native,
            Callable::Script(_) => {
                return Err(RuntimeError::type_error(
                    "script functions can only be entered by the interpreter",
                ));
            }
        };

        let result = self.scope(|ctx| {
            ctx.handles.create(obj);
            for value in std::iter::once(&this_value).chain(args) {
                if let JsValue::Object(rooted) = value {
                    ctx.handles.create(*rooted);
                }
            }
            ctx.push_frame(FrameCallee::Function(obj))?;
            let result = native.call(ctx, FunctionArgs::new(this_value.clone(), args.to_vec()));
            ctx.pop_frame();
            result
        })?;

        if let JsValue::Object(out) = &result {
            self.handles.create(*out);
        }
        Ok(result)
    }
}

fn read_only(value: JsValue) -> Property {
    Property {
        writable: false,
        ..Property::hidden(value)
    }
}
