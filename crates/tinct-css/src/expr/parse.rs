//! Translation of math function parameters into expression trees.
//!
//! [§ 10.8 Syntax](https://www.w3.org/TR/css-values-4/#calc-syntax)
//!
//! ```text
//! <calc-sum>     = <calc-product> [ [ '+' | '-' ] <calc-product> ]*
//! <calc-product> = <calc-value> [ [ '*' | '/' ] <calc-value> ]*
//! <calc-value>   = <number> | <dimension> | <percentage> |
//!                  <calc-keyword> | ( <calc-sum> )
//! ```

use tracing::trace;

use crate::error::{Result, ValueError};
use crate::lexer::{LexicalUnit, Operator};
use crate::values::{PrimitiveValue, ProxyValue, Translated, ready, translate_unit};

use super::function::{MathFunction, RoundingStrategy, constant};
use super::tree::{ExprTree, ExpressionBuilder};
use super::value::{MathArgument, MathFunctionValue};

/// Parse the parameters of `calc()`.
///
/// # Errors
///
/// Returns [`ValueError::Syntax`] for misplaced operators, commas and
/// identifiers that are not constants.
pub(crate) fn parse_calc(params: &[LexicalUnit]) -> Result<Translated<ExprTree>> {
    parse_expression(params)
}

fn is_calc(name: &str) -> bool {
    name == "calc" || name == "-webkit-calc"
}

fn parse_expression(units: &[LexicalUnit]) -> Result<Translated<ExprTree>> {
    let mut builder = ExpressionBuilder::new();
    for unit in units {
        match unit {
            LexicalUnit::Operator(Operator::Plus) => builder.add()?,
            LexicalUnit::Operator(Operator::Minus) => {
                builder.add()?;
                builder.set_next_operand_inverse(true);
            }
            LexicalUnit::Operator(Operator::Multiply) => builder.multiply()?,
            LexicalUnit::Operator(Operator::Slash) => {
                builder.multiply()?;
                builder.set_next_operand_inverse(true);
            }
            LexicalUnit::Operator(op) => {
                return Err(ValueError::syntax(format!(
                    "unexpected '{}' in math expression",
                    op.as_str()
                )));
            }
            LexicalUnit::SubExpression(inner) => {
                builder.push_tree(ready!(parse_expression(inner)?))?;
            }
            LexicalUnit::Function { name, params } if is_calc(name) => {
                builder.push_tree(ready!(parse_expression(params)?))?;
            }
            LexicalUnit::Function { name, params } => match MathFunction::from_name(name) {
                Some(function) => {
                    let value = ready!(parse_math_function(function, params)?);
                    builder.push_operand(PrimitiveValue::MathFunction(Box::new(value)))?;
                }
                None => builder.push_operand(ready!(translate_unit(unit)?))?,
            },
            // [§ 10.7.1](https://www.w3.org/TR/css-values-4/#calc-constants)
            LexicalUnit::Ident(name) => {
                if constant(name).is_none() {
                    return Err(ValueError::syntax(format!(
                        "unknown identifier '{name}' in math expression"
                    )));
                }
                builder.push_operand(PrimitiveValue::Ident(name.clone()))?;
            }
            LexicalUnit::Var { .. } | LexicalUnit::Attr { .. } => {
                if let Some(proxy) = ProxyValue::from_unit(unit) {
                    builder.push_operand(PrimitiveValue::Proxy(proxy))?;
                }
            }
            other => builder.push_operand(ready!(translate_unit(other)?))?,
        }
    }
    let tree = builder.build()?;
    trace!(operands = tree.operands().len(), "built expression tree");
    Ok(Translated::Value(tree))
}

/// Parse the parameters of a math function.
///
/// # Errors
///
/// Returns [`ValueError::Syntax`] for a wrong number of arguments, empty
/// arguments and malformed calculations.
pub(crate) fn parse_math_function(
    function: MathFunction,
    params: &[LexicalUnit],
) -> Result<Translated<MathFunctionValue>> {
    if params.is_empty() {
        return Err(ValueError::syntax(format!(
            "{}() needs arguments",
            function.name()
        )));
    }
    let groups: Vec<&[LexicalUnit]> = params
        .split(|u| u.is_operator(Operator::Comma))
        .collect();
    let mut groups = groups.as_slice();

    // "round( <rounding-strategy>?, <calc-sum>, <calc-sum>? )"
    let mut strategy = None;
    if function == MathFunction::Round {
        if let Some([LexicalUnit::Ident(name)]) = groups.first().copied() {
            if let Ok(parsed) = name.parse::<RoundingStrategy>() {
                strategy = Some(parsed);
                groups = &groups[1..];
            }
        }
    }

    let mut args = Vec::with_capacity(groups.len());
    for &group in groups {
        let arg = match group {
            [] => {
                return Err(ValueError::syntax(format!(
                    "empty argument to {}()",
                    function.name()
                )));
            }
            [unit] if function == MathFunction::Clamp && unit.is_ident("none") => MathArgument::None,
            _ => MathArgument::Expr(ready!(parse_expression(group)?)),
        };
        args.push(arg);
    }

    if !function.accepts(args.len()) {
        return Err(ValueError::syntax(format!(
            "wrong number of arguments to {}()",
            function.name()
        )));
    }
    if function == MathFunction::Clamp && matches!(args.get(1), Some(MathArgument::None)) {
        return Err(ValueError::syntax("the value of clamp() cannot be none"));
    }
    Ok(Translated::Value(MathFunctionValue::new(
        function, strategy, args,
    )))
}
