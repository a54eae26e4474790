use thiserror::Error;

pub type EvalResult<T> = Result<T, EvalError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    /// User-facing diagnostic: malformed mixin call, bad arguments,
    /// undefined variable, type mismatch in a function call.
    #[error("{message}")]
    Syntax { message: String },

    /// A core invariant was broken, e.g. rendering an expression that was
    /// never evaluated.
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Rendering is not supported for {node}")]
    NotSupported { node: &'static str },

    #[error("Recursion limit of {limit} exceeded while evaluating '{context}'")]
    RecursionLimit { limit: usize, context: String },

    #[error("Import '{path}' could not be resolved")]
    ImportNotFound { path: String },
}

impl EvalError {
    pub fn syntax(message: impl Into<String>) -> Self {
        EvalError::Syntax {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        EvalError::Internal(message.into())
    }

    /// True for errors caused by the input rather than by the evaluator.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            EvalError::Syntax { .. }
                | EvalError::RecursionLimit { .. }
                | EvalError::ImportNotFound { .. }
        )
    }
}
