//! Built-in functions and their registry.
//!
//! Every built-in is a unit struct implementing [`Function`]. Its callable
//! name is derived from the type name: the `Function` suffix is stripped and
//! the rest lower-cased (`RgbaFunction` answers to `rgba`). New built-ins
//! must follow that naming and be added to the registration table below.

mod color;
mod list;
mod math;
mod string;

pub use color::{
    AlphaFunction, BlueFunction, DarkenFunction, GreenFunction, HslFunction, HslaFunction,
    HueFunction, LightenFunction, LightnessFunction, RedFunction, RgbFunction, RgbaFunction,
    SaturationFunction,
};
pub use list::{ExtractFunction, LengthFunction};
pub use math::{AbsFunction, CeilFunction, FloorFunction, PercentageFunction, RoundFunction};
pub use string::EFunction;

use crate::color::Color;
use crate::error::{EvalError, EvalResult};
use crate::node::Node;
use crate::number::Number;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Evaluates a fixed, already evaluated argument list into a result node.
pub trait Function {
    fn evaluate(&self, args: &FunctionArgs) -> EvalResult<Node>;

    /// Wraps `args` for the type-specific `evaluate`.
    fn call(&self, name: &str, args: Vec<Node>) -> EvalResult<Node> {
        self.evaluate(&FunctionArgs::new(name, args))
    }
}

/// Arguments of one call, with the checks every built-in needs.
#[derive(Debug, Clone)]
pub struct FunctionArgs {
    name: String,
    args: Vec<Node>,
}

impl FunctionArgs {
    pub fn new(name: impl Into<String>, args: Vec<Node>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Node> {
        self.args.get(index)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.args
    }

    /// Same call with one more trailing argument.
    pub fn appended(&self, node: Node) -> FunctionArgs {
        let mut args = self.args.clone();
        args.push(node);
        FunctionArgs::new(self.name.clone(), args)
    }

    pub fn expect_count(&self, expected: usize) -> EvalResult<()> {
        if self.args.len() != expected {
            return Err(EvalError::syntax(format!(
                "Expected {} arguments in function '{}', found {}",
                expected,
                self.name,
                self.args.len()
            )));
        }
        Ok(())
    }

    pub fn number(&self, index: usize) -> EvalResult<&Number> {
        match self.args.get(index) {
            Some(Node::Number(number)) => Ok(number),
            other => Err(self.expected("number", other)),
        }
    }

    pub fn numbers(&self) -> EvalResult<Vec<&Number>> {
        (0..self.args.len()).map(|index| self.number(index)).collect()
    }

    pub fn color(&self, index: usize) -> EvalResult<&Color> {
        match self.args.get(index) {
            Some(Node::Color(color)) => Ok(color),
            other => Err(self.expected("color", other)),
        }
    }

    pub(crate) fn expected(&self, kind: &str, found: Option<&Node>) -> EvalError {
        let found = found
            .map(|node| node.to_string())
            .unwrap_or_else(|| "nothing".to_string());
        EvalError::syntax(format!(
            "Expected {} in function '{}', found {}",
            kind, self.name, found
        ))
    }
}

type Factory = fn() -> Box<dyn Function>;

fn create<F: Function + Default + 'static>() -> Box<dyn Function> {
    Box::new(F::default())
}

macro_rules! register_functions {
    ($($function:ident),* $(,)?) => {
        &[$((stringify!($function), create::<$function> as Factory)),*]
    };
}

static FUNCTION_TABLE: &[(&str, Factory)] = register_functions![
    RgbFunction,
    RgbaFunction,
    HslFunction,
    HslaFunction,
    RedFunction,
    GreenFunction,
    BlueFunction,
    AlphaFunction,
    HueFunction,
    SaturationFunction,
    LightnessFunction,
    LightenFunction,
    DarkenFunction,
    FloorFunction,
    CeilFunction,
    RoundFunction,
    AbsFunction,
    PercentageFunction,
    EFunction,
    LengthFunction,
    ExtractFunction,
];

/// Process-wide registry, built once on first use and read-only afterwards.
pub static REGISTRY: Lazy<FunctionRegistry> = Lazy::new(|| FunctionRegistry::from_table(FUNCTION_TABLE));

/// Name to constructor map for built-in functions.
pub struct FunctionRegistry {
    factories: HashMap<String, Factory>,
}

impl FunctionRegistry {
    fn from_table(table: &[(&str, Factory)]) -> Self {
        let factories = table
            .iter()
            .map(|(type_name, factory)| (function_name(type_name), *factory))
            .collect();
        Self { factories }
    }

    /// Returns a fresh instance, or `None` when no built-in has this name.
    pub fn get(&self, name: &str) -> Option<Box<dyn Function>> {
        self.factories
            .get(&name.to_ascii_lowercase())
            .map(|factory| factory())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(&name.to_ascii_lowercase())
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

/// `RgbaFunction` -> `rgba`
fn function_name(type_name: &str) -> String {
    let lower = type_name.to_ascii_lowercase();
    lower
        .strip_suffix("function")
        .map(str::to_string)
        .unwrap_or(lower)
}
