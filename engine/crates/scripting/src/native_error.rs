//! Surfacing host-side errors (domain, code, message) as script exceptions.

use std::collections::HashMap;
use std::fmt;

use tracing::warn;

use crate::context::ExecutionContext;
use crate::error::ScriptError;
use crate::pending;
use crate::scope::ContextScope;
use crate::thrower::ERROR_CLASS;

/// Host error value. Owned uniquely; the release hook, if any, runs exactly
/// once when the value is dropped.
pub struct NativeErrorValue {
    domain: String,
    code: i32,
    message: String,
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl NativeErrorValue {
    pub fn new(domain: impl Into<String>, code: i32, message: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            code,
            message: message.into(),
            release: None,
        }
    }

    /// Attach the routine that frees the underlying host resource.
    pub fn with_release(mut self, release: impl FnOnce() + Send + 'static) -> Self {
        self.release = Some(Box::new(release));
        self
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn code(&self) -> i32 {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Drop for NativeErrorValue {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl fmt::Debug for NativeErrorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeErrorValue")
            .field("domain", &self.domain)
            .field("code", &self.code)
            .field("message", &self.message)
            .finish()
    }
}

impl fmt::Display for NativeErrorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} error {}: {}", self.domain, self.code, self.message)
    }
}

impl std::error::Error for NativeErrorValue {}

/// Builds a script exception object from a native error.
///
/// `copy` tells the converter that the native error is released right after
/// the call, so the exception must not borrow from it.
pub trait NativeErrorConverter<C: ExecutionContext + ?Sized> {
    fn to_exception(&self, context: &mut C, error: &NativeErrorValue, copy: bool)
        -> Option<C::Value>;
}

impl<C, F> NativeErrorConverter<C> for F
where
    C: ExecutionContext + ?Sized,
    F: Fn(&mut C, &NativeErrorValue, bool) -> Option<C::Value>,
{
    fn to_exception(&self, context: &mut C, error: &NativeErrorValue, copy: bool) -> Option<C::Value> {
        self(context, error, copy)
    }
}

/// Convert `error` into a script exception and make it pending, replacing
/// any exception already pending. `None` is a no-op.
///
/// The native error is released once conversion returns, whether or not it
/// produced an exception. A failed conversion installs nothing.
pub fn throw_native_error<C, V>(context: &mut C, error: Option<NativeErrorValue>, converter: &V)
where
    C: ExecutionContext + ?Sized,
    V: NativeErrorConverter<C> + ?Sized,
{
    let Some(error) = error else {
        return;
    };

    let mut scope = ContextScope::enter(context);

    let exception = converter.to_exception(&mut *scope, &error, true);
    if exception.is_none() {
        warn!(
            target: "script_context",
            domain = error.domain(),
            code = error.code(),
            "failed to convert native error: {}",
            error.message()
        );
    }
    drop(error);

    if let Some(exception) = exception {
        pending::set_overwrite(&mut *scope, exception);
    }
}

/// Converter that picks a constructor by error domain and calls it as
/// `new Class(message, code)`.
#[derive(Debug, Clone)]
pub struct DomainErrorConverter {
    default_class: String,
    domains: HashMap<String, String>,
}

impl Default for DomainErrorConverter {
    fn default() -> Self {
        Self::new(ERROR_CLASS)
    }
}

impl DomainErrorConverter {
    pub fn new(default_class: impl Into<String>) -> Self {
        Self {
            default_class: default_class.into(),
            domains: HashMap::new(),
        }
    }

    pub fn register_domain(&mut self, domain: impl Into<String>, class: impl Into<String>) {
        self.domains.insert(domain.into(), class.into());
    }

    pub fn class_for(&self, domain: &str) -> &str {
        self.domains
            .get(domain)
            .map(String::as_str)
            .unwrap_or(&self.default_class)
    }

    fn build<C: ExecutionContext + ?Sized>(
        &self,
        context: &mut C,
        error: &NativeErrorValue,
    ) -> Result<C::Value, ScriptError> {
        let class = self.class_for(error.domain());
        let message = context
            .new_string(error.message())
            .map_err(|_| ScriptError::StringCopy)?;
        let code = context.new_number(f64::from(error.code()));

        let ctor = context
            .global_property(class)
            .map_err(|_| ScriptError::MissingConstructor(class.to_string()))?;
        if !context.is_object(&ctor) {
            return Err(ScriptError::MissingConstructor(class.to_string()));
        }
        context.construct(&ctor, &[message, code])
    }
}

impl<C: ExecutionContext + ?Sized> NativeErrorConverter<C> for DomainErrorConverter {
    fn to_exception(&self, context: &mut C, error: &NativeErrorValue, _copy: bool) -> Option<C::Value> {
        match self.build(context, error) {
            Ok(exception) => Some(exception),
            Err(e) => {
                warn!(target: "script_context", domain = error.domain(), "{}", e);
                None
            }
        }
    }
}
