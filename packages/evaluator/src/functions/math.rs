use super::{Function, FunctionArgs};
use crate::error::EvalResult;
use crate::node::Node;
use crate::number::Number;

fn map_number(args: &FunctionArgs, op: fn(f64) -> f64) -> EvalResult<Node> {
    args.expect_count(1)?;
    let number = args.number(0)?;
    Ok(Node::Number(number.with_value(op(number.value))))
}

#[derive(Debug, Default)]
pub struct FloorFunction;

impl Function for FloorFunction {
    fn evaluate(&self, args: &FunctionArgs) -> EvalResult<Node> {
        map_number(args, f64::floor)
    }
}

#[derive(Debug, Default)]
pub struct CeilFunction;

impl Function for CeilFunction {
    fn evaluate(&self, args: &FunctionArgs) -> EvalResult<Node> {
        map_number(args, f64::ceil)
    }
}

#[derive(Debug, Default)]
pub struct RoundFunction;

impl Function for RoundFunction {
    fn evaluate(&self, args: &FunctionArgs) -> EvalResult<Node> {
        map_number(args, f64::round)
    }
}

#[derive(Debug, Default)]
pub struct AbsFunction;

impl Function for AbsFunction {
    fn evaluate(&self, args: &FunctionArgs) -> EvalResult<Node> {
        map_number(args, f64::abs)
    }
}

/// `percentage(0.5)` -> `50%`
#[derive(Debug, Default)]
pub struct PercentageFunction;

impl Function for PercentageFunction {
    fn evaluate(&self, args: &FunctionArgs) -> EvalResult<Node> {
        args.expect_count(1)?;
        let number = args.number(0)?;
        Ok(Node::Number(Number::new(number.value * 100.0, "%")))
    }
}
