//! Dimensional analysis.
//!
//! [§ 10.9 Type Checking](https://www.w3.org/TR/css-values-4/#calc-type-checking)
//!
//! Infers the category an expression resolves to without evaluating it.
//! Operands that cannot be typed statically (unknown functions, identifiers
//! that are not constants) make the result [`ResultCategory::Unknown`]
//! instead of failing.

use serde::Serialize;
use strum_macros::Display;
use tinct_common::warning::warn_once;
use tracing::debug;

use crate::error::{Result, ValueError};
use crate::sink::SerializeMode;
use crate::units::UnitCategory;
use crate::values::PrimitiveValue;

use super::function::{MathFunction, constant};
use super::tree::{ExprTree, NodeId, NodeKind};
use super::value::MathFunctionValue;

/// The category an expression resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[strum(serialize_all = "kebab-case")]
pub enum ResultCategory {
    /// `<number>`
    Number,
    /// A number that will be rounded to an integer.
    Integer,
    /// `<length>`
    Length,
    /// `<percentage>`
    Percentage,
    /// Lengths and percentages combined.
    LengthPercentage,
    /// `<angle>`
    Angle,
    /// `<time>`
    Time,
    /// `<frequency>`
    Frequency,
    /// `<resolution>`
    Resolution,
    /// `<flex>`
    Flex,
    /// Could not be determined statically.
    Unknown,
}

impl ResultCategory {
    /// The category of a unit.
    pub const fn from_unit(category: UnitCategory) -> Self {
        match category {
            UnitCategory::Number => Self::Number,
            UnitCategory::Percentage => Self::Percentage,
            UnitCategory::Length => Self::Length,
            UnitCategory::Angle => Self::Angle,
            UnitCategory::Time => Self::Time,
            UnitCategory::Frequency => Self::Frequency,
            UnitCategory::Resolution => Self::Resolution,
            UnitCategory::Flex => Self::Flex,
            UnitCategory::Invalid => Self::Unknown,
        }
    }

    /// Whether this is `Number` or `Integer`.
    pub const fn is_number(self) -> bool {
        matches!(self, Self::Number | Self::Integer)
    }

    const fn is_length_like(self) -> bool {
        matches!(
            self,
            Self::Length | Self::Percentage | Self::LengthPercentage
        )
    }

    /// "`+`/`-` require operand categories to be compatible."
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::TypeMismatch`] for incompatible categories.
    pub fn unify(self, other: Self) -> Result<Self> {
        let unified = match (self, other) {
            (Self::Unknown, _) | (_, Self::Unknown) => Self::Unknown,
            (a, b) if a == b => a,
            (a, b) if a.is_number() && b.is_number() => Self::Number,
            (a, b) if a.is_length_like() && b.is_length_like() => Self::LengthPercentage,
            (a, b) => {
                return Err(ValueError::type_mismatch(format!(
                    "cannot combine <{a}> with <{b}>"
                )));
            }
        };
        Ok(unified)
    }

    fn integer_if(self, expect_integer: bool) -> Self {
        if expect_integer && self == Self::Number {
            Self::Integer
        } else {
            self
        }
    }
}

/// Analyze an expression tree.
///
/// # Errors
///
/// Returns [`ValueError::TypeMismatch`] when operand categories cannot be
/// combined.
pub fn analyze_tree(tree: &ExprTree, expect_integer: bool) -> Result<ResultCategory> {
    Ok(analyze_node(tree, tree.root())?.integer_if(expect_integer))
}

fn analyze_node(tree: &ExprTree, id: NodeId) -> Result<ResultCategory> {
    match tree.node(id).kind() {
        NodeKind::Operand(value) => analyze_operand(value),
        NodeKind::Sum(children) => {
            let mut result: Option<ResultCategory> = None;
            for child in children {
                let category = analyze_node(tree, *child)?;
                result = Some(match result {
                    Some(acc) => acc.unify(category)?,
                    None => category,
                });
            }
            Ok(result.unwrap_or(ResultCategory::Number))
        }
        NodeKind::Product(children) => {
            // "*" and "/" require at least one side to be a number.
            let mut dimension: Option<ResultCategory> = None;
            let mut unknown = false;
            for child in children {
                let category = analyze_node(tree, *child)?;
                if category.is_number() {
                    continue;
                }
                if category == ResultCategory::Unknown {
                    unknown = true;
                    continue;
                }
                if tree.node(*child).is_inverse() {
                    return Err(ValueError::type_mismatch(format!(
                        "cannot divide by <{category}>"
                    )));
                }
                if let Some(existing) = dimension {
                    return Err(ValueError::type_mismatch(format!(
                        "cannot multiply <{existing}> by <{category}>"
                    )));
                }
                dimension = Some(category);
            }
            if unknown {
                return Ok(ResultCategory::Unknown);
            }
            Ok(dimension.unwrap_or(ResultCategory::Number))
        }
    }
}

fn analyze_operand(value: &PrimitiveValue) -> Result<ResultCategory> {
    match value {
        PrimitiveValue::Number(n) => Ok(ResultCategory::from_unit(n.category())),
        PrimitiveValue::Ident(name) if constant(name).is_some() => Ok(ResultCategory::Number),
        PrimitiveValue::Expression(e) => e.analyze(),
        PrimitiveValue::MathFunction(f) => f.analyze(),
        PrimitiveValue::Proxy(_) => Ok(ResultCategory::Unknown),
        other => {
            // One warning per operand type; the text itself only goes to the trace.
            let primitive_type = other.primitive_type();
            warn_once(
                "calc",
                &format!("cannot type {primitive_type} operands inside a math function"),
            );
            debug!(
                operand = %other.css_text(SerializeMode::Canonical),
                "untyped math operand"
            );
            Ok(ResultCategory::Unknown)
        }
    }
}

fn unify_all(categories: &[ResultCategory]) -> Result<ResultCategory> {
    let mut iter = categories.iter().copied();
    let Some(first) = iter.next() else {
        return Ok(ResultCategory::Number);
    };
    iter.try_fold(first, ResultCategory::unify)
}

/// Analyze a math function call.
///
/// # Errors
///
/// Returns [`ValueError::TypeMismatch`] when argument categories are not
/// accepted by the function.
pub fn analyze_function(value: &MathFunctionValue, expect_integer: bool) -> Result<ResultCategory> {
    let mut args = Vec::with_capacity(value.args().len());
    for tree in value.args().iter().filter_map(|arg| arg.tree()) {
        args.push(analyze_tree(tree, false)?);
    }
    let function = value.function();
    let unified = || unify_all(&args);
    let require_numbers = || -> Result<ResultCategory> {
        if args.contains(&ResultCategory::Unknown) {
            return Ok(ResultCategory::Unknown);
        }
        match args.iter().find(|c| !c.is_number()) {
            Some(c) => Err(ValueError::type_mismatch(format!(
                "{}() expects <number>, found <{c}>",
                function.name()
            ))),
            None => Ok(ResultCategory::Number),
        }
    };

    // [§ 10.4-10.8](https://www.w3.org/TR/css-values-4/#math)
    let result = match function {
        MathFunction::Min
        | MathFunction::Max
        | MathFunction::Clamp
        | MathFunction::Hypot
        | MathFunction::Round
        | MathFunction::Mod
        | MathFunction::Rem
        | MathFunction::Abs => unified()?,
        MathFunction::Sign => {
            let _ = unified()?;
            ResultCategory::Number
        }
        MathFunction::Sin | MathFunction::Cos | MathFunction::Tan => match unified()? {
            ResultCategory::Unknown => ResultCategory::Unknown,
            c if c.is_number() || c == ResultCategory::Angle => ResultCategory::Number,
            c => {
                return Err(ValueError::type_mismatch(format!(
                    "{}() expects <angle> or <number>, found <{c}>",
                    function.name()
                )));
            }
        },
        MathFunction::Asin | MathFunction::Acos | MathFunction::Atan => {
            match require_numbers()? {
                ResultCategory::Unknown => ResultCategory::Unknown,
                _ => ResultCategory::Angle,
            }
        }
        MathFunction::Atan2 => match unified()? {
            ResultCategory::Unknown => ResultCategory::Unknown,
            _ => ResultCategory::Angle,
        },
        MathFunction::Pow | MathFunction::Sqrt | MathFunction::Exp | MathFunction::Log => {
            require_numbers()?
        }
    };
    Ok(result.integer_if(expect_integer))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unify() {
        use ResultCategory::*;
        assert_eq!(Length.unify(Percentage).unwrap(), LengthPercentage);
        assert_eq!(Integer.unify(Number).unwrap(), Number);
        assert_eq!(Angle.unify(Unknown).unwrap(), Unknown);
        assert!(Length.unify(Angle).is_err());
        assert!(Number.unify(Length).is_err());
    }
}
