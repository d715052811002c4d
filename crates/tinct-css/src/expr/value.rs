use std::io;

use crate::error::Result;
use crate::sink::{SerializeMode, SimpleWriter};

use super::analysis::{ResultCategory, analyze_function, analyze_tree};
use super::function::{MathFunction, RoundingStrategy};
use super::tree::ExprTree;

/// A `calc()` value.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionValue {
    tree: ExprTree,
    expect_integer: bool,
}

impl ExpressionValue {
    /// Wrap a parsed tree.
    pub const fn new(tree: ExprTree) -> Self {
        Self {
            tree,
            expect_integer: false,
        }
    }

    /// The expression tree.
    pub const fn tree(&self) -> &ExprTree {
        &self.tree
    }

    /// Whether the result is rounded to an integer when evaluated.
    pub const fn expect_integer(&self) -> bool {
        self.expect_integer
    }

    /// [§ 10.9 Type Checking](https://www.w3.org/TR/css-values-4/#calc-type-checking)
    ///
    /// "If the math function is used where an `<integer>` is expected, the
    /// result is rounded to the nearest integer." The flag stays on the value.
    pub fn set_expect_integer(&mut self, expect_integer: bool) {
        self.expect_integer = expect_integer;
    }

    /// Infer the result category without evaluating.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ValueError::TypeMismatch`] when operand categories
    /// cannot be combined.
    pub fn analyze(&self) -> Result<ResultCategory> {
        analyze_tree(&self.tree, self.expect_integer)
    }

    /// Write as `calc(...)`.
    ///
    /// # Errors
    ///
    /// Returns the sink's I/O error.
    pub fn write_css(&self, w: &mut dyn SimpleWriter, mode: SerializeMode) -> io::Result<()> {
        w.write_str("calc(")?;
        self.tree.write_css(w, mode)?;
        w.write_char(')')
    }
}

/// One argument of a math function.
#[derive(Debug, Clone, PartialEq)]
pub enum MathArgument {
    /// A calculation.
    Expr(ExprTree),
    /// `none`, accepted for the bounds of `clamp()`.
    None,
}

impl MathArgument {
    /// The tree, unless this is `none`.
    pub const fn tree(&self) -> Option<&ExprTree> {
        match self {
            Self::Expr(tree) => Some(tree),
            Self::None => None,
        }
    }
}

/// A math function such as `min()`, `clamp()` or `sin()`.
#[derive(Debug, Clone, PartialEq)]
pub struct MathFunctionValue {
    function: MathFunction,
    strategy: Option<RoundingStrategy>,
    args: Vec<MathArgument>,
    expect_integer: bool,
}

impl MathFunctionValue {
    /// Create a function value.
    pub const fn new(
        function: MathFunction,
        strategy: Option<RoundingStrategy>,
        args: Vec<MathArgument>,
    ) -> Self {
        Self {
            function,
            strategy,
            args,
            expect_integer: false,
        }
    }

    /// Which function.
    pub const fn function(&self) -> MathFunction {
        self.function
    }

    /// The rounding strategy written for `round()`.
    pub const fn strategy(&self) -> Option<RoundingStrategy> {
        self.strategy
    }

    /// The arguments.
    pub fn args(&self) -> &[MathArgument] {
        &self.args
    }

    /// Whether the result is rounded to an integer when evaluated.
    pub const fn expect_integer(&self) -> bool {
        self.expect_integer
    }

    /// Require an integer result; persists on the value.
    pub fn set_expect_integer(&mut self, expect_integer: bool) {
        self.expect_integer = expect_integer;
    }

    /// Whether any argument contains a deferred substitution.
    pub fn contains_proxy(&self) -> bool {
        self.args
            .iter()
            .filter_map(MathArgument::tree)
            .any(ExprTree::contains_proxy)
    }

    /// Infer the result category without evaluating.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ValueError::TypeMismatch`] when argument categories
    /// are not accepted by the function.
    pub fn analyze(&self) -> Result<ResultCategory> {
        analyze_function(self, self.expect_integer)
    }

    /// Write as CSS text.
    ///
    /// # Errors
    ///
    /// Returns the sink's I/O error.
    pub fn write_css(&self, w: &mut dyn SimpleWriter, mode: SerializeMode) -> io::Result<()> {
        w.write_str(self.function.name())?;
        w.write_char('(')?;
        if let Some(strategy) = self.strategy {
            let name: &'static str = strategy.into();
            w.write_str(name)?;
            w.write_str(mode.comma())?;
        }
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                w.write_str(mode.comma())?;
            }
            match arg {
                MathArgument::Expr(tree) => tree.write_css(w, mode)?,
                MathArgument::None => w.write_str("none")?,
            }
        }
        w.write_char(')')
    }
}
