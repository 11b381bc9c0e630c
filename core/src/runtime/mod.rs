pub mod error;
pub mod gc;
pub mod intrinsics;
pub mod value;

mod function_call;
mod property_access;
