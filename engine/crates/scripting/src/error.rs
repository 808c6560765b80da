use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Lua error: {0}")]
    Lua(#[from] mlua::Error),

    #[error("failed to copy exception string")]
    StringCopy,

    #[error("missing {0} constructor in global object")]
    MissingConstructor(String),

    /// `ctor` describes the constructor value, not a class name.
    #[error("failed to construct {ctor}: {reason}")]
    Construct { ctor: String, reason: String },
}
