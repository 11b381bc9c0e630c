use tracejs::runtime::error::STACK_TRACE_TOO_LONG;
use tracejs::runtime::value::{JsObject, ObjectRef};
use tracejs::{Context, Engine, ErrorKind, FrameCallee, ModuleBuilder, RuntimeError, Value};

fn context_with_main(engine: Engine) -> Context {
    let mut ctx = engine.new_context().expect("context should initialize");
    let mut module = ModuleBuilder::new().source_url("main.js");
    module.function(Some("main"), 12);
    let loaded = ctx.load_module(module).expect("module should load");
    ctx.push_frame(FrameCallee::Code(loaded.code_units[0]))
        .expect("frame should push");
    ctx.set_offset(6);
    ctx
}

fn raised(ctx: &mut Context) -> ObjectRef {
    let error = ctx
        .create_error(ErrorKind::Error, Value::string("boom"))
        .expect("error should be created");
    ctx.raise(error);
    error
}

fn read_stack(ctx: &mut Context, error: ObjectRef) -> Value {
    ctx.get_property(&Value::Object(error), "stack")
        .expect("stack read should succeed")
}

#[test]
fn stack_is_an_accessor_until_read() {
    let mut ctx = context_with_main(Engine::new());
    let error = raised(&mut ctx);

    let before = ctx
        .get_own_property_descriptor(error, "stack")
        .expect("object should exist")
        .expect("stack should be defined");
    assert!(before.is_accessor());
    assert!(!before.enumerable);
    assert!(before.configurable);

    let stack = read_stack(&mut ctx, error);
    assert_eq!(
        stack.as_str(),
        Some("Error: boom\n    at main (address at main.js:1:6)")
    );

    let after = ctx
        .get_own_property_descriptor(error, "stack")
        .expect("object should exist")
        .expect("stack should be defined");
    assert!(!after.is_accessor());
    assert!(!after.enumerable);
    assert_eq!(after.value, Some(stack.clone()));

    assert_eq!(read_stack(&mut ctx, error), stack);
}

#[test]
fn stack_lists_nested_calls_innermost_first() {
    let mut ctx = Context::new().expect("context should initialize");
    let mut module = ModuleBuilder::new().source_url("nested.js");
    module.function(Some("outer"), 10);
    module.function(Some("inner"), 10);
    let loaded = ctx.load_module(module).expect("module should load");

    let error = ctx
        .create_error(ErrorKind::TypeError, Value::string("nested"))
        .expect("error should be created");
    assert_eq!(read_stack(&mut ctx, error), Value::string(""));

    ctx.push_frame(FrameCallee::Code(loaded.code_units[0]))
        .expect("outer frame should push");
    ctx.set_offset(2);
    ctx.push_frame(FrameCallee::Code(loaded.code_units[1]))
        .expect("inner frame should push");
    ctx.set_offset(3);
    ctx.raise(error);

    let header = ctx
        .to_string(&Value::Object(error))
        .expect("toString should succeed");
    assert_eq!(header, "TypeError: nested");

    let stack = read_stack(&mut ctx, error);
    assert_eq!(
        stack.as_str(),
        Some(
            "TypeError: nested\n    at inner (address at nested.js:1:13)\n    at outer (address at nested.js:1:2)"
        )
    );
}

#[test]
fn unraised_error_reads_empty_stack() {
    let mut ctx = context_with_main(Engine::new());
    let error = ctx
        .create_error(ErrorKind::TypeError, Value::string("never thrown"))
        .expect("error should be created");

    assert_eq!(read_stack(&mut ctx, error), Value::string(""));
    assert!(
        ctx.get_own_property_descriptor(error, "stack")
            .expect("object should exist")
            .expect("stack should be defined")
            .is_accessor()
    );
}

#[test]
fn reading_stack_releases_the_trace_by_default() {
    let mut ctx = context_with_main(Engine::new());
    let error = raised(&mut ctx);
    assert!(ctx.has_stack_trace(error).expect("error data"));

    read_stack(&mut ctx, error);

    assert!(!ctx.has_stack_trace(error).expect("error data"));
    assert!(ctx.function_names(error).expect("error data").is_none());
    assert!(
        ctx.error_data(error)
            .expect("error data")
            .domains()
            .is_some()
    );
}

#[test]
fn retained_traces_survive_reading_stack() {
    let mut ctx = context_with_main(Engine::new().with_retain_stack_traces(true));
    let error = raised(&mut ctx);

    read_stack(&mut ctx, error);

    assert!(ctx.has_stack_trace(error).expect("error data"));
    assert_eq!(
        ctx.function_names(error).expect("error data"),
        Some(vec![Some("main".to_string())])
    );
}

#[test]
fn assigning_stack_replaces_it() {
    let mut ctx = context_with_main(Engine::new());
    let error = raised(&mut ctx);

    ctx.set_property(&Value::Object(error), "stack", Value::string("custom"))
        .expect("stack assignment should succeed");

    assert_eq!(read_stack(&mut ctx, error), Value::string("custom"));
    assert!(!ctx.has_stack_trace(error).expect("error data"));
    let descriptor = ctx
        .get_own_property_descriptor(error, "stack")
        .expect("object should exist")
        .expect("stack should be defined");
    assert!(!descriptor.is_accessor());
    assert!(!descriptor.enumerable);
}

#[test]
fn getter_rejects_non_error_receivers() {
    let mut ctx = Context::new().expect("context should initialize");
    let accessor = ctx
        .error_stack_accessor()
        .expect("accessor should be created");
    let plain = ctx
        .alloc_object(JsObject::new())
        .expect("object should allocate");

    let err = ctx
        .call_function(&Value::Object(accessor.getter), Value::Object(plain), &[])
        .expect_err("getter should reject plain objects");
    match err {
        RuntimeError::TypeError { message } => assert_eq!(
            message,
            "Error.stack accessor 'this' must be an instance of 'Error'"
        ),
        other => panic!("expected TypeError, got {other:?}"),
    }
}

#[test]
fn setter_accepts_any_object_receiver() {
    let mut ctx = Context::new().expect("context should initialize");
    let accessor = ctx
        .error_stack_accessor()
        .expect("accessor should be created");
    let plain = ctx
        .alloc_object(JsObject::new())
        .expect("object should allocate");

    let result = ctx
        .call_function(
            &Value::Object(accessor.setter),
            Value::Object(plain),
            &[Value::string("assigned")],
        )
        .expect("setter should succeed");
    assert!(result.is_undefined());

    let descriptor = ctx
        .get_own_property_descriptor(plain, "stack")
        .expect("object should exist")
        .expect("stack should be defined");
    assert_eq!(descriptor.value, Some(Value::string("assigned")));
    assert!(!descriptor.enumerable);
}

#[test]
fn errors_share_one_accessor_pair() {
    let mut ctx = Context::new().expect("context should initialize");
    let first = ctx
        .create_error(ErrorKind::Error, Value::string("one"))
        .expect("error should be created");
    let second = ctx
        .create_error(ErrorKind::RangeError, Value::string("two"))
        .expect("error should be created");

    let getter_of = |ctx: &Context, error: ObjectRef| {
        ctx.get_own_property_descriptor(error, "stack")
            .expect("object should exist")
            .expect("stack should be defined")
            .get
    };
    let accessor = ctx
        .error_stack_accessor()
        .expect("accessor should exist");
    assert_eq!(getter_of(&ctx, first), Some(Value::Object(accessor.getter)));
    assert_eq!(getter_of(&ctx, second), Some(Value::Object(accessor.getter)));
}

#[test]
fn oversized_stack_becomes_placeholder() {
    let mut ctx = context_with_main(Engine::new().with_max_string_length(16));
    let error = raised(&mut ctx);

    let stack = read_stack(&mut ctx, error);

    assert_eq!(stack, Value::string(STACK_TRACE_TOO_LONG));
    assert_eq!(
        ctx.get_own_property_descriptor(error, "stack")
            .expect("object should exist")
            .expect("stack should be defined")
            .value,
        Some(Value::string(STACK_TRACE_TOO_LONG))
    );
}
