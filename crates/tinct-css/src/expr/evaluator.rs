//! Numeric evaluation of expressions.
//!
//! [§ 10.10 Simplification](https://www.w3.org/TR/css-values-4/#calc-simplification)
//!
//! Operands are reduced to [`Quantity`]s in canonical units (`px`, `deg`,
//! `s`, `Hz`, `dppx`), combined with ordinary IEEE arithmetic, and converted
//! to the caller's unit at the end. What cannot be resolved without outside
//! information (percentages, font- and viewport-relative lengths,
//! substitutions) goes through the [`Evaluator`] hooks.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, ValueError};
use crate::units::{CssUnit, UnitCategory, convert};
use crate::values::{NumberValue, PrimitiveValue, ProxyValue};

use super::function::{MathFunction, RoundingStrategy, constant};
use super::tree::{ExprTree, NodeId, NodeKind};
use super::value::{MathArgument, MathFunctionValue};

/// Default font size in pixels.
const DEFAULT_FONT_SIZE_PX: f64 = 16.0;

/// A number in a unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Quantity {
    /// The numeric value.
    pub value: f64,
    /// The unit.
    pub unit: CssUnit,
}

impl Quantity {
    /// Create a quantity.
    pub const fn new(value: f64, unit: CssUnit) -> Self {
        Self { value, unit }
    }

    /// A plain number.
    pub const fn number(value: f64) -> Self {
        Self::new(value, CssUnit::Number)
    }

    const fn is_number(self) -> bool {
        matches!(self.unit, CssUnit::Number)
    }

    const fn with_value(self, value: f64) -> Self {
        Self::new(value, self.unit)
    }
}

/// Reduces math values to numbers.
///
/// The hooks decide how operands needing outside information are resolved;
/// the defaults resolve nothing beyond absolute units and keep percentages
/// as percentages.
pub trait Evaluator {
    /// Resolve a percentage operand.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::Evaluation`] when percentages cannot be resolved.
    fn resolve_percentage(&self, value: f64) -> Result<Quantity> {
        Ok(Quantity::new(value, CssUnit::Percentage))
    }

    /// Resolve a font- or viewport-relative length.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::Evaluation`] when no context is available.
    fn resolve_relative(&self, value: f64, unit: CssUnit) -> Result<Quantity> {
        let _ = value;
        Err(ValueError::evaluation(format!(
            "'{}' needs a font or viewport context",
            unit.as_str()
        )))
    }

    /// Resolve a substitution operand.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::Evaluation`] unless overridden.
    fn resolve_proxy(&self, proxy: &ProxyValue) -> Result<Quantity> {
        Err(ValueError::evaluation(format!(
            "cannot evaluate unresolved {}",
            proxy.primitive_type()
        )))
    }

    /// Validate the final result.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::Evaluation`] when the result is not acceptable.
    fn check_result(&self, result: Quantity) -> Result<Quantity> {
        Ok(result)
    }

    /// Evaluate a number, `calc()` or math function.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::Evaluation`] for unresolvable operands and
    /// incompatible units.
    fn evaluate(&self, value: &PrimitiveValue) -> Result<Quantity> {
        let result = evaluate_value(self, value)?;
        self.check_result(result)
    }

    /// Evaluate and convert the result to `unit`.
    ///
    /// # Errors
    ///
    /// As [`Evaluator::evaluate`], and when the result cannot be converted
    /// to `unit`.
    fn evaluate_as(&self, value: &PrimitiveValue, unit: CssUnit) -> Result<f64> {
        let result = self.evaluate(value)?;
        convert(result.value, result.unit, unit).ok_or_else(|| {
            ValueError::evaluation(format!(
                "cannot convert '{}' to '{}'",
                result.unit.as_str(),
                unit.as_str()
            ))
        })
    }
}

/// Resolves absolute units only.
#[derive(Debug, Clone, Copy, Default)]
pub struct AbsoluteEvaluator;

impl Evaluator for AbsoluteEvaluator {}

/// Leaves percentages and plain numbers as they are and rejects any other
/// result.
#[derive(Debug, Clone, Copy, Default)]
pub struct PercentageEvaluator;

impl Evaluator for PercentageEvaluator {
    fn check_result(&self, result: Quantity) -> Result<Quantity> {
        match result.unit {
            CssUnit::Percentage | CssUnit::Number => Ok(result),
            unit => Err(ValueError::evaluation(format!(
                "expected a percentage or number, found '{}'",
                unit.as_str()
            ))),
        }
    }
}

/// Context needed to resolve relative lengths and percentages.
///
/// [§ 6.1.1 Font-relative Lengths](https://www.w3.org/TR/css-values-4/#font-relative-lengths),
/// [§ 6.1.2 Viewport-percentage Lengths](https://www.w3.org/TR/css-values-4/#viewport-relative-lengths)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolutionContext {
    /// The element's computed font size in pixels (for `em`).
    pub font_size_px: f64,
    /// The root element's font size in pixels (for `rem`).
    pub root_font_size_px: f64,
    /// "The viewport-percentage lengths are relative to the size of the
    /// initial containing block."
    pub viewport_width: f64,
    /// Viewport height in pixels.
    pub viewport_height: f64,
    /// The length, in pixels, that `100%` resolves to. Percentages are kept
    /// as percentages when absent.
    pub percentage_basis: Option<f64>,
}

impl ResolutionContext {
    /// Create a context with default font sizes (16px) and specified viewport.
    pub const fn with_viewport(viewport_width: f64, viewport_height: f64) -> Self {
        Self {
            font_size_px: DEFAULT_FONT_SIZE_PX,
            root_font_size_px: DEFAULT_FONT_SIZE_PX,
            viewport_width,
            viewport_height,
            percentage_basis: None,
        }
    }

    /// Create a context with explicit font sizes and viewport.
    pub const fn new(
        font_size_px: f64,
        root_font_size_px: f64,
        viewport_width: f64,
        viewport_height: f64,
    ) -> Self {
        Self {
            font_size_px,
            root_font_size_px,
            viewport_width,
            viewport_height,
            percentage_basis: None,
        }
    }

    /// Set the length percentages resolve against.
    #[must_use]
    pub const fn with_percentage_basis(mut self, basis: f64) -> Self {
        self.percentage_basis = Some(basis);
        self
    }

    /// Convert a relative length to pixels.
    pub fn relative_to_px(&self, value: f64, unit: CssUnit) -> Option<f64> {
        let em = self.font_size_px;
        let rem = self.root_font_size_px;
        let vw = self.viewport_width / 100.0;
        let vh = self.viewport_height / 100.0;
        let px = match unit {
            CssUnit::Em | CssUnit::Ic => value * em,
            // Without font metrics, ex and ch are approximated as 0.5em.
            CssUnit::Ex | CssUnit::Ch => value * em * 0.5,
            CssUnit::Cap => value * em * 0.7,
            CssUnit::Lh => value * em * 1.2,
            CssUnit::Rem => value * rem,
            CssUnit::Rlh => value * rem * 1.2,
            CssUnit::Vw | CssUnit::Vi => value * vw,
            CssUnit::Vh | CssUnit::Vb => value * vh,
            CssUnit::Vmin => value * vw.min(vh),
            CssUnit::Vmax => value * vw.max(vh),
            _ => return None,
        };
        Some(px)
    }
}

impl Default for ResolutionContext {
    fn default() -> Self {
        Self::with_viewport(0.0, 0.0)
    }
}

/// Resolves relative lengths and percentages from a [`ResolutionContext`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextEvaluator {
    /// The context.
    pub ctx: ResolutionContext,
}

impl ContextEvaluator {
    /// Evaluate within `ctx`.
    pub const fn new(ctx: ResolutionContext) -> Self {
        Self { ctx }
    }
}

impl Evaluator for ContextEvaluator {
    fn resolve_percentage(&self, value: f64) -> Result<Quantity> {
        Ok(match self.ctx.percentage_basis {
            Some(basis) => Quantity::new(value / 100.0 * basis, CssUnit::Px),
            None => Quantity::new(value, CssUnit::Percentage),
        })
    }

    fn resolve_relative(&self, value: f64, unit: CssUnit) -> Result<Quantity> {
        self.ctx
            .relative_to_px(value, unit)
            .map(|px| Quantity::new(px, CssUnit::Px))
            .ok_or_else(|| ValueError::evaluation(format!("'{}' is not relative", unit.as_str())))
    }
}

/// Evaluate a primitive with `evaluator`'s hooks, without the final check.
///
/// # Errors
///
/// Returns [`ValueError::Evaluation`] for unresolvable operands and
/// incompatible units.
pub fn evaluate_value<E: Evaluator + ?Sized>(
    evaluator: &E,
    value: &PrimitiveValue,
) -> Result<Quantity> {
    match value {
        PrimitiveValue::Number(n) => evaluate_number(evaluator, n),
        PrimitiveValue::Ident(name) => constant(name).map(Quantity::number).ok_or_else(|| {
            ValueError::evaluation(format!("'{name}' is not a numeric constant"))
        }),
        PrimitiveValue::Expression(e) => {
            let result = evaluate_tree(evaluator, e.tree())?;
            Ok(round_if(result, e.expect_integer()))
        }
        PrimitiveValue::MathFunction(f) => evaluate_function(evaluator, f),
        PrimitiveValue::Proxy(proxy) => evaluator.resolve_proxy(proxy),
        other => Err(ValueError::evaluation(format!(
            "cannot evaluate {}",
            other.primitive_type()
        ))),
    }
}

fn evaluate_number<E: Evaluator + ?Sized>(evaluator: &E, n: &NumberValue) -> Result<Quantity> {
    match n.unit {
        CssUnit::Number => Ok(Quantity::number(n.value)),
        CssUnit::Percentage => evaluator.resolve_percentage(n.value),
        CssUnit::Invalid => Err(ValueError::evaluation("invalid unit")),
        unit if unit.is_relative_length() => evaluator.resolve_relative(n.value, unit),
        unit => {
            let canonical = unit.category().canonical_unit();
            let value = convert(n.value, unit, canonical)
                .ok_or_else(|| ValueError::evaluation(format!("cannot convert '{}'", unit.as_str())))?;
            Ok(Quantity::new(value, canonical))
        }
    }
}

/// "If the math function is used where an `<integer>` is expected, round to
/// the nearest integer", ties toward +∞.
fn round_if(result: Quantity, expect_integer: bool) -> Quantity {
    if expect_integer {
        result.with_value((result.value + 0.5).floor())
    } else {
        result
    }
}

/// Evaluate an expression tree.
///
/// # Errors
///
/// Returns [`ValueError::Evaluation`] for unresolvable operands and
/// incompatible units.
pub fn evaluate_tree<E: Evaluator + ?Sized>(evaluator: &E, tree: &ExprTree) -> Result<Quantity> {
    evaluate_node(evaluator, tree, tree.root())
}

fn evaluate_node<E: Evaluator + ?Sized>(evaluator: &E, tree: &ExprTree, id: NodeId) -> Result<Quantity> {
    match tree.node(id).kind() {
        NodeKind::Operand(value) => evaluate_value(evaluator, value),
        NodeKind::Sum(children) => {
            let mut total: Option<Quantity> = None;
            for child in children {
                let q = evaluate_node(evaluator, tree, *child)?;
                let q = if tree.node(*child).is_inverse() {
                    q.with_value(-q.value)
                } else {
                    q
                };
                total = Some(match total {
                    None => q,
                    Some(acc) => {
                        same_unit(acc, q)?;
                        acc.with_value(acc.value + q.value)
                    }
                });
            }
            Ok(total.unwrap_or(Quantity::number(0.0)))
        }
        NodeKind::Product(children) => {
            let mut value = 1.0;
            let mut unit = CssUnit::Number;
            for child in children {
                let q = evaluate_node(evaluator, tree, *child)?;
                let inverse = tree.node(*child).is_inverse();
                if !q.is_number() {
                    if inverse {
                        return Err(ValueError::evaluation(format!(
                            "cannot divide by '{}'",
                            q.unit.as_str()
                        )));
                    }
                    if unit != CssUnit::Number {
                        return Err(ValueError::evaluation(format!(
                            "cannot multiply '{}' by '{}'",
                            unit.as_str(),
                            q.unit.as_str()
                        )));
                    }
                    unit = q.unit;
                }
                if inverse {
                    value /= q.value;
                } else {
                    value *= q.value;
                }
            }
            Ok(Quantity::new(value, unit))
        }
    }
}

fn same_unit(a: Quantity, b: Quantity) -> Result<()> {
    if a.unit == b.unit {
        Ok(())
    } else {
        Err(ValueError::evaluation(format!(
            "incompatible units '{}' and '{}'",
            a.unit.as_str(),
            b.unit.as_str()
        )))
    }
}

fn all_same_unit(args: &[Quantity]) -> Result<CssUnit> {
    let first = args.first().map_or(CssUnit::Number, |q| q.unit);
    for q in args {
        same_unit(Quantity::new(0.0, first), *q)?;
    }
    Ok(first)
}

fn angle_to_radians(q: Quantity) -> Result<f64> {
    match q.unit.category() {
        UnitCategory::Number => Ok(q.value),
        UnitCategory::Angle => Ok(q.value.to_radians()),
        _ => Err(ValueError::evaluation(format!(
            "expected an angle, found '{}'",
            q.unit.as_str()
        ))),
    }
}

fn require_number(q: Quantity) -> Result<f64> {
    if q.is_number() {
        Ok(q.value)
    } else {
        Err(ValueError::evaluation(format!(
            "expected a number, found '{}'",
            q.unit.as_str()
        )))
    }
}

/// Evaluate a math function.
///
/// # Errors
///
/// Returns [`ValueError::Evaluation`] for unresolvable operands,
/// incompatible units and wrong argument counts.
pub fn evaluate_function<E: Evaluator + ?Sized>(
    evaluator: &E,
    f: &MathFunctionValue,
) -> Result<Quantity> {
    let function = f.function();
    // `none` bounds of clamp() stay `None`.
    let mut args: Vec<Option<Quantity>> = Vec::with_capacity(f.args().len());
    for arg in f.args() {
        args.push(match arg {
            MathArgument::Expr(tree) => Some(evaluate_tree(evaluator, tree)?),
            MathArgument::None => None,
        });
    }
    let present: Vec<Quantity> = args.iter().flatten().copied().collect();
    if !function.accepts(args.len()) {
        return Err(ValueError::evaluation(format!(
            "wrong number of arguments to {}()",
            function.name()
        )));
    }
    let unit = all_same_unit(&present)?;
    let first = present.first().copied().unwrap_or(Quantity::number(0.0));
    let value = |i: usize| present.get(i).map_or(0.0, |q| q.value);

    let result = match function {
        MathFunction::Min => Quantity::new(present.iter().map(|q| q.value).fold(f64::INFINITY, f64::min), unit),
        MathFunction::Max => Quantity::new(
            present.iter().map(|q| q.value).fold(f64::NEG_INFINITY, f64::max),
            unit,
        ),
        MathFunction::Clamp => {
            // "clamp(MIN, VAL, MAX) is resolved as max(MIN, min(VAL, MAX))."
            let bound = |i: usize, default: f64| args[i].map_or(default, |q| q.value);
            let min = bound(0, f64::NEG_INFINITY);
            let max = bound(2, f64::INFINITY);
            let val = args[1]
                .ok_or_else(|| ValueError::evaluation("clamp() value cannot be none"))?
                .value;
            Quantity::new(min.max(val.min(max)), unit)
        }
        MathFunction::Round => {
            let strategy = f.strategy().unwrap_or(RoundingStrategy::Nearest);
            let step = if present.len() > 1 { value(1) } else { 1.0 };
            Quantity::new(strategy.apply(value(0), step), unit)
        }
        MathFunction::Mod => {
            let (a, b) = (value(0), value(1));
            Quantity::new(a - b * (a / b).floor(), unit)
        }
        MathFunction::Rem => {
            let (a, b) = (value(0), value(1));
            Quantity::new(a - b * (a / b).trunc(), unit)
        }
        MathFunction::Abs => first.with_value(first.value.abs()),
        MathFunction::Sign => {
            let v = first.value;
            Quantity::number(if v == 0.0 || v.is_nan() { v } else { v.signum() })
        }
        MathFunction::Sin => Quantity::number(angle_to_radians(first)?.sin()),
        MathFunction::Cos => Quantity::number(angle_to_radians(first)?.cos()),
        MathFunction::Tan => Quantity::number(angle_to_radians(first)?.tan()),
        MathFunction::Asin => Quantity::new(require_number(first)?.asin().to_degrees(), CssUnit::Deg),
        MathFunction::Acos => Quantity::new(require_number(first)?.acos().to_degrees(), CssUnit::Deg),
        MathFunction::Atan => Quantity::new(require_number(first)?.atan().to_degrees(), CssUnit::Deg),
        MathFunction::Atan2 => Quantity::new(value(0).atan2(value(1)).to_degrees(), CssUnit::Deg),
        MathFunction::Pow => {
            let base = require_number(first)?;
            Quantity::number(base.powf(value(1)))
        }
        MathFunction::Sqrt => Quantity::number(require_number(first)?.sqrt()),
        MathFunction::Hypot => Quantity::new(
            present.iter().map(|q| q.value * q.value).sum::<f64>().sqrt(),
            unit,
        ),
        MathFunction::Log => {
            let a = require_number(first)?;
            if present.len() > 1 {
                Quantity::number(a.ln() / value(1).ln())
            } else {
                Quantity::number(a.ln())
            }
        }
        MathFunction::Exp => Quantity::number(require_number(first)?.exp()),
    };
    debug!(function = function.name(), result = result.value, "evaluated math function");
    Ok(round_if(result, f.expect_integer()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_units() {
        let ctx = ResolutionContext::with_viewport(800.0, 600.0);
        assert_eq!(ctx.relative_to_px(2.0, CssUnit::Em), Some(32.0));
        assert_eq!(ctx.relative_to_px(10.0, CssUnit::Vmin), Some(60.0));
        assert_eq!(ctx.relative_to_px(10.0, CssUnit::Vmax), Some(80.0));
        assert_eq!(ctx.relative_to_px(1.0, CssUnit::Px), None);
    }

    #[test]
    fn test_context_deserializes_with_defaults() {
        let ctx: ResolutionContext =
            serde_json::from_str(r#"{ "viewport_width": 1024, "percentage_basis": 200 }"#).unwrap();
        assert_eq!(ctx.font_size_px, 16.0);
        assert_eq!(ctx.viewport_width, 1024.0);
        assert_eq!(ctx.percentage_basis, Some(200.0));
    }
}
