use mlua::{Function, Lua, MultiValue, Value};
use tracing::{info, warn};

use crate::context::ExecutionContext;
use crate::error::ScriptError;

/// Defines `Error` and `TypeError` tables with a `new(message, code)`
/// constructor. `TypeError` inherits from `Error`.
const ERROR_PRELUDE: &str = r#"
local function define(name, parent)
    local class = { name = name }
    class.__index = class
    class.__tostring = function(self)
        return self.name .. ": " .. tostring(self.message)
    end
    if parent then
        setmetatable(class, { __index = parent })
    end
    function class.new(message, code)
        return setmetatable({ name = name, message = message, code = code }, class)
    end
    return class
end

Error = define("Error")
TypeError = define("TypeError", Error)
"#;

/// Execution context backed by a Luau VM.
///
/// Lua has no engine-side pending exception, so the slot lives here and is
/// handed to running script through [`LuaContext::raise_pending`].
pub struct LuaContext {
    lua: Lua,
    pending: Option<Value>,
    realm_depth: usize,
    request_depth: usize,
    reports: Vec<String>,
}

impl LuaContext {
    pub fn new() -> Result<Self, ScriptError> {
        Self::with_lua(Lua::new())
    }

    /// Wrap an existing VM. Installs the error prelude into its globals.
    pub fn with_lua(lua: Lua) -> Result<Self, ScriptError> {
        lua.load(ERROR_PRELUDE).set_name("error_prelude").exec()?;
        info!(target: "script_context", "Lua execution context initialized");
        Ok(Self {
            lua,
            pending: None,
            realm_depth: 0,
            request_depth: 0,
            reports: Vec::new(),
        })
    }

    pub fn lua(&self) -> &Lua {
        &self.lua
    }

    pub fn realm_depth(&self) -> usize {
        self.realm_depth
    }

    pub fn request_depth(&self) -> usize {
        self.request_depth
    }

    /// Messages passed to the low-level error reporter, oldest first.
    pub fn reports(&self) -> &[String] {
        &self.reports
    }

    /// Move the pending exception into an `mlua::Error` so a native
    /// callback can propagate it into the calling script.
    pub fn raise_pending(&mut self) -> mlua::Result<()> {
        match self.pending.take() {
            Some(exception) => Err(mlua::Error::runtime(describe(&exception))),
            None => Ok(()),
        }
    }
}

/// `"<name>: <message>"` for prelude exceptions, the string form otherwise.
pub fn describe(value: &Value) -> String {
    if let Value::Table(t) = value {
        let name = t.get::<Option<String>>("name").ok().flatten();
        let message = t.get::<Option<String>>("message").ok().flatten();
        if let (Some(name), Some(message)) = (name, message) {
            return format!("{}: {}", name, message);
        }
    }
    match value.to_string() {
        Ok(s) => s,
        Err(_) => format!("{:?}", value),
    }
}

impl ExecutionContext for LuaContext {
    type Value = Value;

    fn enter_import_realm(&mut self) {
        self.realm_depth += 1;
    }

    fn leave_realm(&mut self) {
        self.realm_depth = self.realm_depth.saturating_sub(1);
    }

    fn begin_request(&mut self) {
        self.request_depth += 1;
    }

    fn end_request(&mut self) {
        self.request_depth = self.request_depth.saturating_sub(1);
    }

    fn is_exception_pending(&self) -> bool {
        self.pending.is_some()
    }

    fn pending_exception(&self) -> Option<&Value> {
        self.pending.as_ref()
    }

    fn set_pending_exception(&mut self, value: Value) {
        self.pending = Some(value);
    }

    fn clear_pending_exception(&mut self) -> Option<Value> {
        self.pending.take()
    }

    fn new_string(&mut self, text: &str) -> Result<Value, ScriptError> {
        let s = self.lua.create_string(text)?;
        Ok(Value::String(s))
    }

    fn new_number(&mut self, number: f64) -> Value {
        Value::Number(number)
    }

    fn global_property(&mut self, name: &str) -> Result<Value, ScriptError> {
        Ok(self.lua.globals().get::<Value>(name)?)
    }

    fn is_object(&self, value: &Value) -> bool {
        matches!(value, Value::Table(_) | Value::Function(_))
    }

    fn construct(&mut self, ctor: &Value, args: &[Value]) -> Result<Value, ScriptError> {
        let args: MultiValue = args.iter().cloned().collect();
        let result = match ctor {
            Value::Function(f) => f.call::<Value>(args),
            Value::Table(t) => {
                let new: Function = t.get("new")?;
                new.call::<Value>(args)
            }
            other => {
                return Err(ScriptError::Construct {
                    ctor: other.type_name().to_string(),
                    reason: "value is not constructible".to_string(),
                })
            }
        };
        Ok(result?)
    }

    fn report_error(&mut self, message: &str) {
        warn!(target: "script_context", "{}", message);
        self.reports.push(message.to_string());
    }
}
