//! The expression engine.
//!
//! [CSS Values and Units Module Level 4 § 10](https://www.w3.org/TR/css-values-4/#math)
//!
//! `calc()` and the math functions are parsed into arena-allocated trees
//! ([`tree`]), typed without evaluation ([`analysis`]) and reduced to numbers
//! ([`evaluator`]).

pub mod analysis;
pub mod evaluator;
mod function;
mod parse;
pub mod tree;
mod value;

pub use analysis::ResultCategory;
pub use evaluator::{
    AbsoluteEvaluator, ContextEvaluator, Evaluator, PercentageEvaluator, Quantity,
    ResolutionContext,
};
pub use function::{MathFunction, RoundingStrategy, constant};
pub(crate) use parse::{parse_calc, parse_math_function};
pub use tree::{ExprNode, ExprTree, ExpressionBuilder, NodeId, NodeKind};
pub use value::{ExpressionValue, MathArgument, MathFunctionValue};
