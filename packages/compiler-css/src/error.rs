use nestcss_evaluator::EvalError;
use thiserror::Error;

pub type CompileResult<T> = Result<T, CompileError>;

#[derive(Error, Debug)]
pub enum CompileError {
    #[error(transparent)]
    Eval(#[from] EvalError),

    #[error("Invalid configuration: {0}")]
    Config(String),
}
