use super::{Function, FunctionArgs};
use crate::error::{EvalError, EvalResult};
use crate::node::Node;
use crate::number::Number;

fn items(node: &Node) -> &[Node] {
    match node {
        Node::List(items) | Node::Expression(items) => items,
        single => std::slice::from_ref(single),
    }
}

/// Number of items in a comma or space separated list; any other value
/// counts as a list of one.
#[derive(Debug, Default)]
pub struct LengthFunction;

impl Function for LengthFunction {
    fn evaluate(&self, args: &FunctionArgs) -> EvalResult<Node> {
        args.expect_count(1)?;
        let list = args.get(0).map(items).unwrap_or_default();
        Ok(Node::Number(Number::unitless(list.len() as f64)))
    }
}

/// `extract(list, index)`, 1-based.
#[derive(Debug, Default)]
pub struct ExtractFunction;

impl Function for ExtractFunction {
    fn evaluate(&self, args: &FunctionArgs) -> EvalResult<Node> {
        args.expect_count(2)?;
        let list = args.get(0).map(items).unwrap_or_default();
        let index = args.number(1)?.value;

        if index.fract() != 0.0 || index < 1.0 || index as usize > list.len() {
            return Err(EvalError::syntax(format!(
                "Index {} out of range in function '{}'",
                index,
                args.name()
            )));
        }
        Ok(list[index as usize - 1].clone())
    }
}
