pub mod bytecode;
pub mod machine;
