//! Raising script exceptions from native code.
//!
//! `throw*` never overwrite an exception that is already pending: the first
//! exception raised on a context is the root cause and wins. To replace a
//! pending exception, clear it first with [`pending::clear`].
//!
//! None of these report failure to the caller. When the exception object
//! cannot be built, the message is handed to the engine's low-level error
//! reporter instead, so it is never silently dropped.

use std::fmt;

use tracing::debug;

use crate::context::ExecutionContext;
use crate::error::ScriptError;
use crate::pending;
use crate::scope::ContextScope;

pub const ERROR_CLASS: &str = "Error";
pub const TYPE_ERROR_CLASS: &str = "TypeError";

/// Throw `new Error(message)`.
pub fn throw<C: ExecutionContext + ?Sized>(context: &mut C, args: fmt::Arguments<'_>) {
    throw_custom(context, ERROR_CLASS, args);
}

/// Like [`throw`], with a caller-chosen constructor name.
pub fn throw_custom<C: ExecutionContext + ?Sized>(
    context: &mut C,
    error_class: &str,
    args: fmt::Arguments<'_>,
) {
    throw_message(context, error_class, fmt::format(args));
}

/// Throw `new Error(text)`. `text` is used verbatim.
pub fn throw_literal<C: ExecutionContext + ?Sized>(context: &mut C, text: &str) {
    throw(context, format_args!("{}", text));
}

pub fn throw_type_error<C: ExecutionContext + ?Sized>(context: &mut C, args: fmt::Arguments<'_>) {
    throw_custom(context, TYPE_ERROR_CLASS, args);
}

fn throw_message<C: ExecutionContext + ?Sized>(context: &mut C, error_class: &str, message: String) {
    let mut scope = ContextScope::enter(context);

    if pending::is_pending(&*scope) {
        // Not an error: callers often throw "just in case" after an engine
        // call that may already have thrown.
        debug!(target: "script_context", "Ignoring second exception: '{}'", message);
        return;
    }

    match new_exception(&mut *scope, error_class, &message) {
        Ok(exception) => {
            if !pending::set_if_absent(&mut *scope, exception) {
                debug!(target: "script_context", "Ignoring second exception: '{}'", message);
            }
        }
        Err(err) if pending::is_pending(&*scope) => {
            debug!(
                target: "script_context",
                error = %err,
                "exception raised while building '{}', keeping it",
                message
            );
        }
        Err(err) => {
            scope.report_error(&err.to_string());
            scope.report_error(&format!("Failed to throw exception '{}'", message));
        }
    }
}

fn new_exception<C: ExecutionContext + ?Sized>(
    context: &mut C,
    error_class: &str,
    message: &str,
) -> Result<C::Value, ScriptError> {
    let text = context
        .new_string(message)
        .map_err(|_| ScriptError::StringCopy)?;

    let ctor = context
        .global_property(error_class)
        .map_err(|_| ScriptError::MissingConstructor(error_class.to_string()))?;
    if !context.is_object(&ctor) {
        return Err(ScriptError::MissingConstructor(error_class.to_string()));
    }

    context.construct(&ctor, &[text])
}

/// Throws with configured constructor names.
#[derive(Debug, Clone)]
pub struct ExceptionThrower {
    pub error_class: String,
    pub type_error_class: String,
}

impl Default for ExceptionThrower {
    fn default() -> Self {
        Self {
            error_class: ERROR_CLASS.to_string(),
            type_error_class: TYPE_ERROR_CLASS.to_string(),
        }
    }
}

impl ExceptionThrower {
    pub fn throw<C: ExecutionContext + ?Sized>(&self, context: &mut C, args: fmt::Arguments<'_>) {
        throw_custom(context, &self.error_class, args);
    }

    pub fn throw_custom<C: ExecutionContext + ?Sized>(
        &self,
        context: &mut C,
        error_class: &str,
        args: fmt::Arguments<'_>,
    ) {
        throw_custom(context, error_class, args);
    }

    pub fn throw_literal<C: ExecutionContext + ?Sized>(&self, context: &mut C, text: &str) {
        self.throw(context, format_args!("{}", text));
    }

    pub fn throw_type_error<C: ExecutionContext + ?Sized>(
        &self,
        context: &mut C,
        args: fmt::Arguments<'_>,
    ) {
        throw_custom(context, &self.type_error_class, args);
    }
}

/// `throw!(ctx, "format {}", args...)`
#[macro_export]
macro_rules! throw {
    ($ctx:expr, $($arg:tt)+) => {
        $crate::thrower::throw($ctx, format_args!($($arg)+))
    };
}

/// `throw_custom!(ctx, "RangeError", "format {}", args...)`
#[macro_export]
macro_rules! throw_custom {
    ($ctx:expr, $class:expr, $($arg:tt)+) => {
        $crate::thrower::throw_custom($ctx, $class, format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! throw_type_error {
    ($ctx:expr, $($arg:tt)+) => {
        $crate::thrower::throw_type_error($ctx, format_args!($($arg)+))
    };
}
