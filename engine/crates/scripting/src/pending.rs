//! Access to the pending-exception slot of an execution context.
//!
//! Two install disciplines exist. [`set_if_absent`] keeps the first
//! exception raised (the root cause) and is used by the throw path.
//! [`set_overwrite`] replaces whatever is pending and is used only when
//! surfacing a definite native failure.

use crate::context::ExecutionContext;

pub fn is_pending<C: ExecutionContext + ?Sized>(context: &C) -> bool {
    context.is_exception_pending()
}

/// The pending exception, for logging and debugging.
pub fn peek<C: ExecutionContext + ?Sized>(context: &C) -> Option<&C::Value> {
    context.pending_exception()
}

/// Install `value` only if nothing is pending. Returns false, leaving the
/// existing exception untouched, otherwise.
pub fn set_if_absent<C: ExecutionContext + ?Sized>(context: &mut C, value: C::Value) -> bool {
    if context.is_exception_pending() {
        return false;
    }
    context.set_pending_exception(value);
    true
}

pub fn set_overwrite<C: ExecutionContext + ?Sized>(context: &mut C, value: C::Value) {
    context.set_pending_exception(value);
}

/// Remove the pending exception so that a following throw can install a
/// new one.
pub fn clear<C: ExecutionContext + ?Sized>(context: &mut C) -> Option<C::Value> {
    context.clear_pending_exception()
}
