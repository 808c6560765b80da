use std::ops::{Deref, DerefMut};

use tracing::trace;

use crate::context::ExecutionContext;

/// Bracket around engine bookkeeping: enters the import realm and begins a
/// request on creation, ends the request and leaves the realm on drop.
///
/// Exit runs on every path out of the enclosing block, including early
/// returns. Scopes nest: code holding a `ContextScope` may open another one
/// through the `DerefMut` access, and the inner one is released first.
pub struct ContextScope<'c, C: ExecutionContext + ?Sized> {
    context: &'c mut C,
}

impl<'c, C: ExecutionContext + ?Sized> ContextScope<'c, C> {
    pub fn enter(context: &'c mut C) -> Self {
        context.enter_import_realm();
        context.begin_request();
        trace!(target: "script_context", "scope entered");
        Self { context }
    }
}

impl<C: ExecutionContext + ?Sized> Deref for ContextScope<'_, C> {
    type Target = C;

    fn deref(&self) -> &C {
        self.context
    }
}

impl<C: ExecutionContext + ?Sized> DerefMut for ContextScope<'_, C> {
    fn deref_mut(&mut self) -> &mut C {
        self.context
    }
}

impl<C: ExecutionContext + ?Sized> Drop for ContextScope<'_, C> {
    fn drop(&mut self) {
        // LIFO with respect to `enter`.
        self.context.end_request();
        self.context.leave_realm();
        trace!(target: "script_context", "scope exited");
    }
}
