//! In-memory execution context used by the unit tests.

use std::collections::HashMap;

use crate::context::ExecutionContext;
use crate::error::ScriptError;

#[derive(Debug, Clone, PartialEq)]
pub enum FakeValue {
    Undefined,
    Str(String),
    Number(f64),
    Ctor(String),
    Exception {
        class: String,
        message: String,
        code: Option<f64>,
    },
}

impl FakeValue {
    pub fn exception(class: &str, message: &str) -> Self {
        FakeValue::Exception {
            class: class.to_string(),
            message: message.to_string(),
            code: None,
        }
    }
}

pub struct FakeContext {
    pub realm_depth: usize,
    pub request_depth: usize,
    pub max_request_depth: usize,
    pub scope_log: Vec<&'static str>,
    pub pending: Option<FakeValue>,
    pub reports: Vec<String>,
    pub globals: HashMap<String, FakeValue>,
    pub fail_string_copy: bool,
    /// Construction raises this exception inside the engine and fails.
    pub throw_on_construct: Option<FakeValue>,
    /// Construction raises this exception inside the engine but still
    /// returns the new object.
    pub pend_on_construct: Option<FakeValue>,
}

impl FakeContext {
    pub fn new() -> Self {
        let mut globals = HashMap::new();
        for class in ["Error", "TypeError", "IOError"] {
            globals.insert(class.to_string(), FakeValue::Ctor(class.to_string()));
        }
        globals.insert("answer".to_string(), FakeValue::Number(42.0));
        Self {
            realm_depth: 0,
            request_depth: 0,
            max_request_depth: 0,
            scope_log: Vec::new(),
            pending: None,
            reports: Vec::new(),
            globals,
            fail_string_copy: false,
            throw_on_construct: None,
            pend_on_construct: None,
        }
    }

    pub fn pending_message(&self) -> Option<&str> {
        match &self.pending {
            Some(FakeValue::Exception { message, .. }) => Some(message),
            _ => None,
        }
    }

    pub fn is_balanced(&self) -> bool {
        let enters = self.scope_log.iter().filter(|e| **e == "begin").count();
        let exits = self.scope_log.iter().filter(|e| **e == "end").count();
        enters == exits && self.realm_depth == 0 && self.request_depth == 0
    }
}

impl ExecutionContext for FakeContext {
    type Value = FakeValue;

    fn enter_import_realm(&mut self) {
        self.realm_depth += 1;
        self.scope_log.push("enter_realm");
    }

    fn leave_realm(&mut self) {
        self.realm_depth -= 1;
        self.scope_log.push("leave_realm");
    }

    fn begin_request(&mut self) {
        self.request_depth += 1;
        self.max_request_depth = self.max_request_depth.max(self.request_depth);
        self.scope_log.push("begin");
    }

    fn end_request(&mut self) {
        self.request_depth -= 1;
        self.scope_log.push("end");
    }

    fn is_exception_pending(&self) -> bool {
        self.pending.is_some()
    }

    fn pending_exception(&self) -> Option<&FakeValue> {
        self.pending.as_ref()
    }

    fn set_pending_exception(&mut self, value: FakeValue) {
        self.pending = Some(value);
    }

    fn clear_pending_exception(&mut self) -> Option<FakeValue> {
        self.pending.take()
    }

    fn new_string(&mut self, text: &str) -> Result<FakeValue, ScriptError> {
        if self.fail_string_copy {
            return Err(ScriptError::StringCopy);
        }
        Ok(FakeValue::Str(text.to_string()))
    }

    fn new_number(&mut self, number: f64) -> FakeValue {
        FakeValue::Number(number)
    }

    fn global_property(&mut self, name: &str) -> Result<FakeValue, ScriptError> {
        Ok(self.globals.get(name).cloned().unwrap_or(FakeValue::Undefined))
    }

    fn is_object(&self, value: &FakeValue) -> bool {
        matches!(value, FakeValue::Ctor(_) | FakeValue::Exception { .. })
    }

    fn construct(&mut self, ctor: &FakeValue, args: &[FakeValue]) -> Result<FakeValue, ScriptError> {
        assert!(self.request_depth > 0, "construct outside of a request");
        let FakeValue::Ctor(class) = ctor else {
            return Err(ScriptError::Construct {
                ctor: format!("{:?}", ctor),
                reason: "not a constructor".to_string(),
            });
        };
        if let Some(exc) = self.throw_on_construct.clone() {
            self.pending = Some(exc);
            return Err(ScriptError::Construct {
                ctor: class.clone(),
                reason: "constructor threw".to_string(),
            });
        }
        if let Some(exc) = self.pend_on_construct.clone() {
            self.pending = Some(exc);
        }
        let message = match args.first() {
            Some(FakeValue::Str(s)) => s.clone(),
            _ => String::new(),
        };
        let code = match args.get(1) {
            Some(FakeValue::Number(n)) => Some(*n),
            _ => None,
        };
        Ok(FakeValue::Exception {
            class: class.clone(),
            message,
            code,
        })
    }

    fn report_error(&mut self, message: &str) {
        self.reports.push(message.to_string());
    }
}
