//! Expression trees.
//!
//! [§ 10.1 Basic Arithmetic](https://www.w3.org/TR/css-values-4/#calc-func)
//!
//! Nodes live in an arena owned by [`ExprTree`]. A node is an n-ary `Sum` or
//! `Product` or a leaf operand; the `inverse` flag turns addition into
//! subtraction inside a sum and multiplication into division inside a product.
//! The parent link is an index used only to decide grouping when serializing.

use std::io;

use crate::error::{Result, ValueError};
use crate::sink::{SerializeMode, SimpleWriter, to_text};
use crate::values::PrimitiveValue;

/// Index of a node in its tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// What a node is.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Children added (or subtracted, when inverse).
    Sum(Vec<NodeId>),
    /// Children multiplied (or divided, when inverse).
    Product(Vec<NodeId>),
    /// A leaf value.
    Operand(Box<PrimitiveValue>),
}

/// One node of an [`ExprTree`].
#[derive(Debug, Clone)]
pub struct ExprNode {
    kind: NodeKind,
    inverse: bool,
    parent: Option<NodeId>,
}

impl ExprNode {
    /// What this node is.
    pub const fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Whether this node is subtracted from its sum or divides its product.
    pub const fn is_inverse(&self) -> bool {
        self.inverse
    }

    /// The enclosing sum or product.
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

/// An arena-allocated expression.
#[derive(Debug, Clone)]
pub struct ExprTree {
    nodes: Vec<ExprNode>,
    root: NodeId,
}

impl ExprTree {
    /// A tree holding a single operand.
    pub fn operand(value: PrimitiveValue) -> Self {
        Self {
            nodes: vec![ExprNode {
                kind: NodeKind::Operand(Box::new(value)),
                inverse: false,
                parent: None,
            }],
            root: NodeId(0),
        }
    }

    /// The root node.
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// Look up a node.
    pub fn node(&self, id: NodeId) -> &ExprNode {
        &self.nodes[id.0]
    }

    /// The children of a sum or product; empty for operands.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match &self.node(id).kind {
            NodeKind::Sum(children) | NodeKind::Product(children) => children,
            NodeKind::Operand(_) => &[],
        }
    }

    /// The leaf operands, left to right.
    pub fn operands(&self) -> Vec<&PrimitiveValue> {
        let mut out = Vec::new();
        self.collect_operands(self.root, &mut out);
        out
    }

    fn collect_operands<'a>(&'a self, id: NodeId, out: &mut Vec<&'a PrimitiveValue>) {
        match &self.node(id).kind {
            NodeKind::Operand(value) => out.push(value),
            NodeKind::Sum(children) | NodeKind::Product(children) => {
                for child in children {
                    self.collect_operands(*child, out);
                }
            }
        }
    }

    /// Whether any operand is, or contains, a deferred substitution.
    pub fn contains_proxy(&self) -> bool {
        self.operands().into_iter().any(PrimitiveValue::contains_proxy)
    }

    /// Write the expression without a `calc()` wrapper.
    ///
    /// # Errors
    ///
    /// Returns the sink's I/O error.
    pub fn write_css(&self, w: &mut dyn SimpleWriter, mode: SerializeMode) -> io::Result<()> {
        self.write_node(self.root, w, mode)
    }

    fn write_node(&self, id: NodeId, w: &mut dyn SimpleWriter, mode: SerializeMode) -> io::Result<()> {
        let node = self.node(id);
        match &node.kind {
            NodeKind::Operand(value) => value.write_css(w, mode),
            NodeKind::Sum(children) => {
                // A sum anywhere below the root was written in parentheses.
                let grouped = node.parent.is_some();
                if grouped {
                    w.write_char('(')?;
                }
                let mut previous = String::new();
                for (i, child) in children.iter().enumerate() {
                    let text = to_text(|buf| self.write_node(*child, buf, mode));
                    if i > 0 {
                        let op = if self.node(*child).inverse { '-' } else { '+' };
                        // `1px-2px` would scan as one dimension with unit `px-2px`.
                        let spaced = !mode.is_minified()
                            || (op == '-' && previous.chars().last().is_some_and(ends_ident));
                        if spaced {
                            w.write_char(' ')?;
                            w.write_char(op)?;
                            w.write_char(' ')?;
                        } else {
                            w.write_char(op)?;
                        }
                    }
                    w.write_str(&text)?;
                    previous = text;
                }
                if grouped {
                    w.write_char(')')?;
                }
                Ok(())
            }
            NodeKind::Product(children) => {
                let grouped = node
                    .parent
                    .is_some_and(|p| matches!(self.node(p).kind, NodeKind::Product(_)));
                if grouped {
                    w.write_char('(')?;
                }
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        let op = if self.node(*child).inverse { "/" } else { "*" };
                        if mode.is_minified() {
                            w.write_str(op)?;
                        } else {
                            w.write_char(' ')?;
                            w.write_str(op)?;
                            w.write_char(' ')?;
                        }
                    }
                    self.write_node(*child, w, mode)?;
                }
                if grouped {
                    w.write_char(')')?;
                }
                Ok(())
            }
        }
    }

    fn node_eq(&self, a: NodeId, other: &Self, b: NodeId) -> bool {
        let (x, y) = (self.node(a), other.node(b));
        if x.inverse != y.inverse {
            return false;
        }
        match (&x.kind, &y.kind) {
            (NodeKind::Operand(l), NodeKind::Operand(r)) => l == r,
            (NodeKind::Sum(l), NodeKind::Sum(r)) | (NodeKind::Product(l), NodeKind::Product(r)) => {
                l.len() == r.len()
                    && l.iter()
                        .zip(r)
                        .all(|(l, r)| self.node_eq(*l, other, *r))
            }
            _ => false,
        }
    }
}

/// Trees are equal when their shapes, flags and operands are equal; arena
/// layout is ignored.
impl PartialEq for ExprTree {
    fn eq(&self, other: &Self) -> bool {
        self.node_eq(self.root, other, other.root)
    }
}

/// A code point that continues an identifier, other than a digit.
fn ends_ident(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '-' || !c.is_ascii()
}

/// Builds an [`ExprTree`] from operands and operators in source order.
///
/// Operands join the top-level sum. After [`ExpressionBuilder::multiply`] the
/// next operand joins a product with the previous one; if the previous operand
/// is not already that product, a new product replaces it as the last operand
/// of the sum. Precedence is realized without a separate grouping pass.
#[derive(Debug)]
pub struct ExpressionBuilder {
    nodes: Vec<ExprNode>,
    sum: NodeId,
    current_product: Option<NodeId>,
    next_inverse: bool,
    pending_multiply: bool,
    expecting_operand: bool,
}

impl Default for ExpressionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpressionBuilder {
    /// An empty builder.
    pub fn new() -> Self {
        Self {
            nodes: vec![ExprNode {
                kind: NodeKind::Sum(Vec::new()),
                inverse: false,
                parent: None,
            }],
            sum: NodeId(0),
            current_product: None,
            next_inverse: false,
            pending_multiply: false,
            expecting_operand: true,
        }
    }

    /// Mark the next operand as subtracted (in a sum) or dividing (in a
    /// product). Cleared once that operand has been appended.
    pub fn set_next_operand_inverse(&mut self, inverse: bool) {
        self.next_inverse = inverse;
    }

    /// `+` or `-`: the next operand starts a new term of the sum.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::Syntax`] when no operand precedes the operator.
    pub fn add(&mut self) -> Result<()> {
        self.operator()?;
        self.pending_multiply = false;
        Ok(())
    }

    /// `*` or `/`: the next operand joins a product with the previous one.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::Syntax`] when no operand precedes the operator.
    pub fn multiply(&mut self) -> Result<()> {
        self.operator()?;
        self.pending_multiply = true;
        Ok(())
    }

    fn operator(&mut self) -> Result<()> {
        if self.expecting_operand {
            return Err(ValueError::syntax("operator without a left operand"));
        }
        self.expecting_operand = true;
        Ok(())
    }

    /// Append a leaf operand.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::Syntax`] when two operands are not separated by
    /// an operator.
    pub fn push_operand(&mut self, value: PrimitiveValue) -> Result<()> {
        let id = self.alloc(NodeKind::Operand(Box::new(value)));
        self.attach(id)
    }

    /// Append a parenthesized subexpression as a single operand.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::Syntax`] when two operands are not separated by
    /// an operator.
    pub fn push_tree(&mut self, tree: ExprTree) -> Result<()> {
        let offset = self.nodes.len();
        let shift = |id: NodeId| NodeId(id.0 + offset);
        for node in tree.nodes {
            let kind = match node.kind {
                NodeKind::Sum(children) => NodeKind::Sum(children.into_iter().map(shift).collect()),
                NodeKind::Product(children) => {
                    NodeKind::Product(children.into_iter().map(shift).collect())
                }
                operand => operand,
            };
            self.nodes.push(ExprNode {
                kind,
                inverse: node.inverse,
                parent: node.parent.map(shift),
            });
        }
        self.attach(shift(tree.root))
    }

    fn alloc(&mut self, kind: NodeKind) -> NodeId {
        self.nodes.push(ExprNode {
            kind,
            inverse: false,
            parent: None,
        });
        NodeId(self.nodes.len() - 1)
    }

    fn children_mut(&mut self, id: NodeId) -> &mut Vec<NodeId> {
        match &mut self.nodes[id.0].kind {
            NodeKind::Sum(children) | NodeKind::Product(children) => children,
            NodeKind::Operand(_) => unreachable!("operands have no children"),
        }
    }

    fn attach(&mut self, id: NodeId) -> Result<()> {
        if !self.expecting_operand {
            return Err(ValueError::syntax("missing operator between operands"));
        }
        // A leading term has no operator to carry its sign.
        if self.next_inverse && self.children_mut(self.sum).is_empty() {
            return Err(ValueError::syntax("the first term cannot be subtracted"));
        }
        self.nodes[id.0].inverse = std::mem::take(&mut self.next_inverse);

        let last = self.children_mut(self.sum).last().copied();
        match (self.pending_multiply, last) {
            (true, Some(last)) if Some(last) == self.current_product => {
                self.nodes[id.0].parent = Some(last);
                self.children_mut(last).push(id);
            }
            (true, Some(last)) => {
                // The previous operand moves into a new product that takes its
                // place (and its sign) in the sum.
                let product = self.alloc(NodeKind::Product(vec![last, id]));
                self.nodes[product.0].inverse = std::mem::take(&mut self.nodes[last.0].inverse);
                self.nodes[product.0].parent = Some(self.sum);
                self.nodes[last.0].parent = Some(product);
                self.nodes[id.0].parent = Some(product);
                if let Some(slot) = self.children_mut(self.sum).last_mut() {
                    *slot = product;
                }
                self.current_product = Some(product);
            }
            _ => {
                self.nodes[id.0].parent = Some(self.sum);
                self.children_mut(self.sum).push(id);
                self.current_product = None;
            }
        }

        self.expecting_operand = false;
        self.pending_multiply = false;
        Ok(())
    }

    /// Finish the tree. A sum of one non-inverse operand collapses to that
    /// operand.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::Syntax`] for an empty expression or a trailing
    /// operator.
    pub fn build(mut self) -> Result<ExprTree> {
        if self.expecting_operand {
            let message = if self.children_mut(self.sum).is_empty() {
                "empty expression"
            } else {
                "operator without a right operand"
            };
            return Err(ValueError::syntax(message));
        }

        let mut root = self.sum;
        if let [only] = self.children_mut(self.sum).as_slice() {
            let only = *only;
            if !self.nodes[only.0].inverse {
                root = only;
            }
        }

        // Copy the reachable nodes into a fresh arena.
        let mut nodes = Vec::with_capacity(self.nodes.len());
        let root = compact(&self.nodes, root, None, &mut nodes);
        Ok(ExprTree { nodes, root })
    }
}

fn compact(
    source: &[ExprNode],
    id: NodeId,
    parent: Option<NodeId>,
    out: &mut Vec<ExprNode>,
) -> NodeId {
    let node = &source[id.0];
    let new_id = NodeId(out.len());
    out.push(ExprNode {
        kind: NodeKind::Sum(Vec::new()),
        inverse: node.inverse,
        parent,
    });
    let kind = match &node.kind {
        NodeKind::Sum(children) => NodeKind::Sum(
            children
                .iter()
                .map(|c| compact(source, *c, Some(new_id), out))
                .collect(),
        ),
        NodeKind::Product(children) => NodeKind::Product(
            children
                .iter()
                .map(|c| compact(source, *c, Some(new_id), out))
                .collect(),
        ),
        NodeKind::Operand(value) => NodeKind::Operand(value.clone()),
    };
    out[new_id.0].kind = kind;
    new_id
}
