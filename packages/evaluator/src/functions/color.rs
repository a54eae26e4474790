use super::{Function, FunctionArgs};
use crate::color::Color;
use crate::error::{EvalError, EvalResult};
use crate::node::Node;
use crate::number::Number;

/// Shared shape of the channel functions: with one argument they read a
/// channel, with two they return a copy of the color with that channel
/// replaced.
trait ColorChannel {
    fn read(&self, color: &Color) -> Node;
    fn edit(&self, color: &Color, value: &Number) -> Color;
}

fn evaluate_channel(channel: &impl ColorChannel, args: &FunctionArgs) -> EvalResult<Node> {
    match args.len() {
        1 => Ok(channel.read(args.color(0)?)),
        2 => Ok(Node::Color(channel.edit(args.color(0)?, args.number(1)?))),
        found => Err(EvalError::syntax(format!(
            "Expected 1 or 2 arguments in function '{}', found {}",
            args.name(),
            found
        ))),
    }
}

/// `50%` -> 127.5, `128` -> 128
fn rgb_scale(number: &Number) -> f64 {
    if number.is_percentage() {
        number.value * 255.0 / 100.0
    } else {
        number.value
    }
}

/// `50%` -> 0.5, `0.5` -> 0.5
fn unit_scale(number: &Number) -> f64 {
    if number.is_percentage() {
        number.value / 100.0
    } else {
        number.value
    }
}

#[derive(Debug, Default)]
pub struct RgbaFunction;

impl Function for RgbaFunction {
    fn evaluate(&self, args: &FunctionArgs) -> EvalResult<Node> {
        args.expect_count(4)?;
        let numbers = args.numbers()?;
        Ok(Node::Color(Color::new(
            [
                rgb_scale(numbers[0]),
                rgb_scale(numbers[1]),
                rgb_scale(numbers[2]),
            ],
            unit_scale(numbers[3]),
        )))
    }
}

#[derive(Debug, Default)]
pub struct RgbFunction;

impl Function for RgbFunction {
    fn evaluate(&self, args: &FunctionArgs) -> EvalResult<Node> {
        args.expect_count(3)?;
        RgbaFunction.evaluate(&args.appended(Node::Number(Number::unitless(1.0))))
    }
}

#[derive(Debug, Default)]
pub struct HslaFunction;

impl Function for HslaFunction {
    fn evaluate(&self, args: &FunctionArgs) -> EvalResult<Node> {
        args.expect_count(4)?;
        let numbers = args.numbers()?;
        Ok(Node::Color(Color::from_hsla(
            numbers[0].value,
            unit_scale(numbers[1]),
            unit_scale(numbers[2]),
            unit_scale(numbers[3]),
        )))
    }
}

#[derive(Debug, Default)]
pub struct HslFunction;

impl Function for HslFunction {
    fn evaluate(&self, args: &FunctionArgs) -> EvalResult<Node> {
        args.expect_count(3)?;
        HslaFunction.evaluate(&args.appended(Node::Number(Number::unitless(1.0))))
    }
}

macro_rules! rgb_channel_function {
    ($name:ident, $index:expr) => {
        #[derive(Debug, Default)]
        pub struct $name;

        impl ColorChannel for $name {
            fn read(&self, color: &Color) -> Node {
                Node::Number(Number::unitless(color.rgb[$index].round()))
            }

            fn edit(&self, color: &Color, value: &Number) -> Color {
                color.with_channel($index, rgb_scale(value))
            }
        }

        impl Function for $name {
            fn evaluate(&self, args: &FunctionArgs) -> EvalResult<Node> {
                evaluate_channel(self, args)
            }
        }
    };
}

rgb_channel_function!(RedFunction, 0);
rgb_channel_function!(GreenFunction, 1);
rgb_channel_function!(BlueFunction, 2);

#[derive(Debug, Default)]
pub struct AlphaFunction;

impl ColorChannel for AlphaFunction {
    fn read(&self, color: &Color) -> Node {
        Node::Number(Number::unitless(color.alpha))
    }

    fn edit(&self, color: &Color, value: &Number) -> Color {
        color.with_alpha(unit_scale(value))
    }
}

impl Function for AlphaFunction {
    fn evaluate(&self, args: &FunctionArgs) -> EvalResult<Node> {
        evaluate_channel(self, args)
    }
}

#[derive(Debug, Default)]
pub struct HueFunction;

impl ColorChannel for HueFunction {
    fn read(&self, color: &Color) -> Node {
        let (hue, _, _) = color.to_hsl();
        Node::Number(Number::unitless(hue.round()))
    }

    fn edit(&self, color: &Color, value: &Number) -> Color {
        let (_, saturation, lightness) = color.to_hsl();
        Color::from_hsla(value.value, saturation, lightness, color.alpha)
    }
}

impl Function for HueFunction {
    fn evaluate(&self, args: &FunctionArgs) -> EvalResult<Node> {
        evaluate_channel(self, args)
    }
}

#[derive(Debug, Default)]
pub struct SaturationFunction;

impl ColorChannel for SaturationFunction {
    fn read(&self, color: &Color) -> Node {
        let (_, saturation, _) = color.to_hsl();
        Node::Number(Number::new((saturation * 100.0).round(), "%"))
    }

    fn edit(&self, color: &Color, value: &Number) -> Color {
        let (hue, _, lightness) = color.to_hsl();
        Color::from_hsla(hue, unit_scale(value), lightness, color.alpha)
    }
}

impl Function for SaturationFunction {
    fn evaluate(&self, args: &FunctionArgs) -> EvalResult<Node> {
        evaluate_channel(self, args)
    }
}

#[derive(Debug, Default)]
pub struct LightnessFunction;

impl ColorChannel for LightnessFunction {
    fn read(&self, color: &Color) -> Node {
        let (_, _, lightness) = color.to_hsl();
        Node::Number(Number::new((lightness * 100.0).round(), "%"))
    }

    fn edit(&self, color: &Color, value: &Number) -> Color {
        let (hue, saturation, _) = color.to_hsl();
        Color::from_hsla(hue, saturation, unit_scale(value), color.alpha)
    }
}

impl Function for LightnessFunction {
    fn evaluate(&self, args: &FunctionArgs) -> EvalResult<Node> {
        evaluate_channel(self, args)
    }
}

fn shift_lightness(args: &FunctionArgs, direction: f64) -> EvalResult<Node> {
    args.expect_count(2)?;
    let color = args.color(0)?;
    let amount = unit_scale(args.number(1)?);
    let (hue, saturation, lightness) = color.to_hsl();
    Ok(Node::Color(Color::from_hsla(
        hue,
        saturation,
        lightness + direction * amount,
        color.alpha,
    )))
}

#[derive(Debug, Default)]
pub struct LightenFunction;

impl Function for LightenFunction {
    fn evaluate(&self, args: &FunctionArgs) -> EvalResult<Node> {
        shift_lightness(args, 1.0)
    }
}

#[derive(Debug, Default)]
pub struct DarkenFunction;

impl Function for DarkenFunction {
    fn evaluate(&self, args: &FunctionArgs) -> EvalResult<Node> {
        shift_lightness(args, -1.0)
    }
}
