use std::fmt;

use crate::error::ScriptError;

/// Handle to one script engine execution context.
///
/// The host embedding the engine owns the context. This crate only reads
/// and writes its pending-exception slot, and only between a matching
/// realm/request enter and exit (see [`ContextScope`](crate::scope::ContextScope)).
///
/// All methods run synchronously on the thread that owns the context.
pub trait ExecutionContext {
    /// Script-level value type (strings, objects, exceptions).
    type Value: Clone + fmt::Debug;

    /// Enter the import/root realm used for this crate's own script operations.
    fn enter_import_realm(&mut self);

    /// Leave the realm entered by the matching `enter_import_realm`.
    fn leave_realm(&mut self);

    /// Mark the context as actively processing engine requests. Nests.
    fn begin_request(&mut self);

    /// Undo one `begin_request`.
    fn end_request(&mut self);

    /// Whether an exception is currently pending.
    fn is_exception_pending(&self) -> bool;

    /// The pending exception, if any.
    fn pending_exception(&self) -> Option<&Self::Value>;

    /// Install `value` as the pending exception, replacing anything pending.
    fn set_pending_exception(&mut self, value: Self::Value);

    /// Remove and return the pending exception.
    fn clear_pending_exception(&mut self) -> Option<Self::Value>;

    /// Copy UTF-8 text into a script string.
    fn new_string(&mut self, text: &str) -> Result<Self::Value, ScriptError>;

    /// Create a script number.
    fn new_number(&mut self, number: f64) -> Self::Value;

    /// Read a property of the global object. Absent properties are returned
    /// as the engine's undefined/nil value, not as an error.
    fn global_property(&mut self, name: &str) -> Result<Self::Value, ScriptError>;

    /// Whether `value` is an object that may be used as a constructor.
    fn is_object(&self, value: &Self::Value) -> bool;

    /// Evaluate `new ctor(...args)`.
    fn construct(
        &mut self,
        ctor: &Self::Value,
        args: &[Self::Value],
    ) -> Result<Self::Value, ScriptError>;

    /// Report an error through the engine's low-level reporter. Usable even
    /// when no exception object can be built.
    fn report_error(&mut self, message: &str);
}
