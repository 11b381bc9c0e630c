use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tracejs::diagnostics::DebugSourceLocation;
use tracejs::runtime::value::ObjectRef;
use tracejs::{
    Context, Engine, EngineConfig, ErrorKind, FrameCallee, ModuleBuilder, TraceJsError, Value,
};

#[derive(Parser)]
#[command(
    name = "tracejs",
    about = "Raise an error inside a synthetic call stack and print its stack"
)]
struct Cli {
    /// Number of nested calls below `main`
    #[arg(long, default_value_t = 2)]
    depth: usize,

    /// Recurse through a single function instead of alternating helpers
    #[arg(long)]
    recursive: bool,

    /// Load the module without source locations
    #[arg(long)]
    no_debug_info: bool,

    /// Engine configuration (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Keep the captured frames after `stack` is read
    #[arg(long)]
    retain: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(stack) => println!("{stack}"),
        Err(err) => {
            eprintln!("{:?}", miette::Report::new(err));
            process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> Result<String, TraceJsError> {
    let config = match &cli.config {
        Some(path) => EngineConfig::from_path(path)?,
        None => EngineConfig::default(),
    };
    let mut engine = Engine::from_config(config);
    if cli.retain {
        engine = engine.with_retain_stack_traces(true);
    }
    let mut ctx = engine.new_context()?;

    let loaded = ctx.load_module(demo_module(!cli.no_debug_info))?;
    let entry = loaded.code_units[0];
    let helpers = &loaded.code_units[1..];

    ctx.push_frame(FrameCallee::Code(entry))?;
    ctx.set_offset(8);
    for level in 0..cli.depth {
        let callee = if cli.recursive {
            helpers[0]
        } else {
            helpers[level % helpers.len()]
        };
        ctx.push_frame(FrameCallee::Code(callee))?;
        ctx.set_offset(4);
    }

    let error = ctx.create_error(ErrorKind::Error, Value::string("demo failure"))?;
    let thrown = ctx.raise(error);
    tracing::debug!(%thrown, "error raised");

    let stack = read_stack(&mut ctx, error)?;
    while ctx.pop_frame().is_some() {}
    Ok(stack)
}

fn read_stack(ctx: &mut Context, error: ObjectRef) -> Result<String, TraceJsError> {
    let value = ctx.get_property(&Value::Object(error), "stack")?;
    Ok(value.to_js_string())
}

fn demo_module(with_locations: bool) -> ModuleBuilder {
    let mut module = ModuleBuilder::new().source_url("demo.js");
    if !with_locations {
        module.function(Some("main"), 16);
        module.function(Some("parse"), 12);
        module.function(Some("evaluate"), 20);
        return module;
    }
    let file = module.add_filename("demo.js");
    module.function_with_locations(
        Some("main"),
        16,
        vec![
            DebugSourceLocation::new(0, file, 1, 1),
            DebugSourceLocation::new(8, file, 3, 5),
        ],
    );
    module.function_with_locations(
        Some("parse"),
        12,
        vec![
            DebugSourceLocation::new(0, file, 10, 3),
            DebugSourceLocation::new(4, file, 11, 12),
        ],
    );
    module.function_with_locations(
        Some("evaluate"),
        20,
        vec![
            DebugSourceLocation::new(0, file, 20, 3),
            DebugSourceLocation::new(4, file, 22, 9),
        ],
    );
    module
}
