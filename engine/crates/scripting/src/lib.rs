pub mod context;
pub mod error;
pub mod lua;
pub mod native_error;
pub mod pending;
pub mod scope;
pub mod thrower;

#[cfg(test)]
mod testing;

pub use context::ExecutionContext;
pub use error::ScriptError;
pub use lua::LuaContext;
pub use native_error::{
    throw_native_error, DomainErrorConverter, NativeErrorConverter, NativeErrorValue,
};
pub use scope::ContextScope;
pub use thrower::{
    throw, throw_custom, throw_literal, throw_type_error, ExceptionThrower, ERROR_CLASS,
    TYPE_ERROR_CLASS,
};

// Re-export mlua for hosts that build on LuaContext
pub use mlua;
