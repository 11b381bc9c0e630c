use tracejs::diagnostics::DebugSourceLocation;
use tracejs::runtime::error::{ERROR_PLACEHOLDER, TraceFormatter};
use tracejs::runtime::value::object::PropertyDescriptor;
use tracejs::runtime::value::ObjectRef;
use tracejs::{Context, ErrorKind, FrameCallee, FrameEntry, ModuleBuilder, StackTrace, Value};

fn raise_error(ctx: &mut Context, kind: ErrorKind, message: &str) -> ObjectRef {
    let error = ctx
        .create_error(kind, Value::string(message))
        .expect("error should be created");
    ctx.raise(error);
    error
}

fn enter(ctx: &mut Context, code: tracejs::CodeUnitRef, offset: u32) {
    ctx.push_frame(FrameCallee::Code(code))
        .expect("frame should push");
    ctx.set_offset(offset);
}

#[test]
fn frames_with_debug_info_print_source_locations() {
    let mut ctx = Context::new().expect("context should initialize");
    let mut module = ModuleBuilder::new().source_url("app.js");
    let file = module.add_filename("src/app.js");
    module.function_with_locations(
        Some("outer"),
        16,
        vec![
            DebugSourceLocation::new(0, file, 1, 1),
            DebugSourceLocation::new(6, file, 2, 9),
        ],
    );
    module.function_with_locations(
        Some("inner"),
        16,
        vec![DebugSourceLocation::new(0, file, 5, 3)],
    );
    let loaded = ctx.load_module(module).expect("module should load");

    enter(&mut ctx, loaded.code_units[0], 7);
    enter(&mut ctx, loaded.code_units[1], 3);
    let error = raise_error(&mut ctx, ErrorKind::Error, "boom");

    assert_eq!(
        ctx.format_stack_trace(error),
        "Error: boom\n    at inner (src/app.js:5:3)\n    at outer (src/app.js:2:9)"
    );
}

#[test]
fn frames_without_debug_info_print_virtual_addresses() {
    let mut ctx = Context::new().expect("context should initialize");
    let mut module = ModuleBuilder::new().source_url("lib.js");
    module.function(Some("a"), 10);
    module.function(Some("b"), 20);
    module.function(Some("c"), 5);
    let loaded = ctx.load_module(module).expect("module should load");

    enter(&mut ctx, loaded.code_units[0], 2);
    enter(&mut ctx, loaded.code_units[2], 4);
    let error = raise_error(&mut ctx, ErrorKind::Error, "boom");

    assert_eq!(
        ctx.format_stack_trace(error),
        "Error: boom\n    at c (address at lib.js:1:34)\n    at a (address at lib.js:1:2)"
    );
}

#[test]
fn virtual_addresses_past_u32_range_are_exact() {
    let mut ctx = Context::new().expect("context should initialize");
    let mut module = ModuleBuilder::new().source_url("big.js");
    module.function(Some("huge"), u32::MAX);
    module.function(Some("b"), 1);
    module.function(Some("c"), 1);
    let loaded = ctx.load_module(module).expect("module should load");

    enter(&mut ctx, loaded.code_units[2], u32::MAX);
    let error = raise_error(&mut ctx, ErrorKind::Error, "boom");

    let column = u64::from(u32::MAX) + 1 + u64::from(u32::MAX);
    assert_eq!(
        ctx.format_stack_trace(error),
        format!("Error: boom\n    at c (address at big.js:1:{column})")
    );
}

#[test]
fn missing_source_url_and_name_use_fallbacks() {
    let mut ctx = Context::new().expect("context should initialize");
    let mut module = ModuleBuilder::new();
    module.function(None, 8);
    let loaded = ctx.load_module(module).expect("module should load");

    enter(&mut ctx, loaded.code_units[0], 5);
    let error = raise_error(&mut ctx, ErrorKind::RangeError, "too far");

    assert_eq!(
        ctx.format_stack_trace(error),
        "RangeError: too far\n    at anonymous (address at unknown:1:5)"
    );
}

#[test]
fn native_frames_print_native() {
    let mut ctx = Context::new().expect("context should initialize");
    let mut module = ModuleBuilder::new().source_url("app.js");
    let file = module.add_filename("app.js");
    module.function_with_locations(
        Some("outer"),
        16,
        vec![DebugSourceLocation::new(0, file, 1, 1)],
    );
    let loaded = ctx.load_module(module).expect("module should load");
    enter(&mut ctx, loaded.code_units[0], 9);

    let thrower = ctx
        .create_native_function("thrower", 0, |ctx, _args| {
            Err(ctx.throw_type_error("bad input"))
        })
        .expect("native function should be created");
    let err = ctx
        .call_function(&Value::Object(thrower), Value::Undefined, &[])
        .expect_err("native call should throw");
    let error = err
        .thrown_value()
        .and_then(Value::as_object)
        .expect("thrown value should be an object");
    ctx.handles().create(error);

    assert_eq!(
        ctx.format_stack_trace(error),
        "TypeError: bad input\n    at thrower (native)\n    at outer (app.js:1:1)"
    );
}

#[test]
fn long_traces_keep_head_and_tail() {
    let mut ctx = Context::new().expect("context should initialize");
    let mut module = ModuleBuilder::new().source_url("deep.js");
    module.function(Some("recurse"), 8);
    let loaded = ctx.load_module(module).expect("module should load");
    let code = loaded.code_units[0];

    for depth in 0..130 {
        enter(&mut ctx, code, depth);
    }
    let error = raise_error(&mut ctx, ErrorKind::RangeError, "deep");
    assert_eq!(
        ctx.captured_trace(error)
            .expect("error data")
            .expect("trace should be captured")
            .len(),
        130
    );

    let stack = ctx.format_stack_trace(error);
    let lines: Vec<&str> = stack.lines().collect();
    assert_eq!(lines.len(), 1 + 50 + 1 + 50);
    assert_eq!(lines[0], "RangeError: deep");
    assert_eq!(lines[51], "    ... skipping 30 frames");
    assert_eq!(
        lines.iter().filter(|line| line.starts_with("    at ")).count(),
        100
    );

    // Newest first: the head starts at the innermost frame's offset and the
    // tail ends at the outermost frame's.
    assert_eq!(lines[1], "    at recurse (address at deep.js:1:129)");
    assert_eq!(lines[50], "    at recurse (address at deep.js:1:80)");
    assert_eq!(lines[52], "    at recurse (address at deep.js:1:49)");
    assert_eq!(lines[101], "    at recurse (address at deep.js:1:0)");
}

#[test]
fn exactly_one_hundred_frames_are_not_truncated() {
    let mut ctx = Context::new().expect("context should initialize");
    let mut module = ModuleBuilder::new();
    module.function(Some("recurse"), 8);
    let loaded = ctx.load_module(module).expect("module should load");

    for depth in 0..100 {
        enter(&mut ctx, loaded.code_units[0], depth);
    }
    let error = raise_error(&mut ctx, ErrorKind::Error, "deep");

    let stack = ctx.format_stack_trace(error);
    assert!(!stack.contains("skipping"));
    assert_eq!(stack.lines().count(), 101);
}

#[test]
fn failing_to_string_uses_placeholder_header() {
    let mut ctx = Context::new().expect("context should initialize");
    let mut module = ModuleBuilder::new().source_url("app.js");
    module.function(Some("main"), 4);
    let loaded = ctx.load_module(module).expect("module should load");
    enter(&mut ctx, loaded.code_units[0], 1);

    let error = raise_error(&mut ctx, ErrorKind::Error, "boom");
    let getter = ctx
        .create_native_function("", 0, |_ctx, _args| {
            Err(tracejs::RuntimeError::type_error("name is unavailable"))
        })
        .expect("getter should be created");
    let defined = ctx
        .define_own_property(
            error,
            "name",
            PropertyDescriptor::accessor(Some(Value::Object(getter)), None),
        )
        .expect("name accessor should be defined");
    assert!(defined);

    assert_eq!(
        ctx.format_stack_trace(error),
        format!("{ERROR_PLACEHOLDER}\n    at main (address at app.js:1:1)")
    );
}

#[test]
fn formatting_leaves_the_trace_in_place() {
    let mut ctx = Context::new().expect("context should initialize");
    let mut module = ModuleBuilder::new();
    module.function(Some("main"), 4);
    let loaded = ctx.load_module(module).expect("module should load");
    enter(&mut ctx, loaded.code_units[0], 0);
    let error = raise_error(&mut ctx, ErrorKind::Error, "boom");

    let first = ctx.format_stack_trace(error);
    let second = ctx.format_stack_trace(error);
    assert_eq!(first, second);
    assert!(ctx.has_stack_trace(error).expect("error data"));
}

#[test]
fn formatter_renders_unrelated_traces() {
    let ctx = Context::new().expect("context should initialize");
    let trace = StackTrace::from_entries(vec![FrameEntry::native(), FrameEntry::native()]);

    let out = TraceFormatter::new(ctx.heap()).format("Oops", &trace, None);
    assert_eq!(out, "Oops\n    at anonymous (native)\n    at anonymous (native)");
}
