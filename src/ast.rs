use crate::{
    objects::{Kind, Object, ObjectKind},
    token::{Token, TokenKey},
};

pub type TreeNode<K> = Box<Node<K>>;

/// A name: a variable, a member or a quoted identifier.
#[derive(Clone, Debug, PartialEq)]
pub struct Ident<K> {
    pub token: Token<K>,
}

/// A literal, still in its textual form.
#[derive(Clone, Debug, PartialEq)]
pub struct Value<K> {
    pub token: Token<K>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BinaryOp<K> {
    pub token: Token<K>,
    pub left: TreeNode<K>,
    pub right: TreeNode<K>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PrefixOp<K> {
    pub token: Token<K>,
    pub operand: TreeNode<K>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PostfixOp<K> {
    pub token: Token<K>,
    pub operand: TreeNode<K>,
}

/// An ordered list of expressions, the token being the one that opened it.
#[derive(Clone, Debug, PartialEq)]
pub struct Sequence<K> {
    pub token: Token<K>,
    pub items: Vec<Node<K>>,
}

impl<K: TokenKey> ObjectKind for Ident<K> {
    const NAME: &'static str = "ident";
}

impl<K: TokenKey> ObjectKind for Value<K> {
    const NAME: &'static str = "value";
}

impl<K: TokenKey> ObjectKind for BinaryOp<K> {
    const NAME: &'static str = "binary_op";
}

impl<K: TokenKey> ObjectKind for PrefixOp<K> {
    const NAME: &'static str = "prefix_op";
}

impl<K: TokenKey> ObjectKind for PostfixOp<K> {
    const NAME: &'static str = "postfix_op";
}

impl<K: TokenKey> ObjectKind for Sequence<K> {
    const NAME: &'static str = "sequence";
}

/// A syntax tree node.
///
/// Each node exclusively owns its children, so cloning a node copies its whole subtree. The
/// shapes are plain structs with public fields; they are also [`Object`]s, which lets the
/// [`Transforms`](crate::Transforms) table dispatch on them (see [`crate::rendering`]).
#[derive(Clone, Debug, PartialEq)]
pub enum Node<K> {
    Ident(Ident<K>),
    Value(Value<K>),
    BinaryOp(BinaryOp<K>),
    PrefixOp(PrefixOp<K>),
    PostfixOp(PostfixOp<K>),
    Sequence(Sequence<K>),
}

impl<K: TokenKey> Node<K> {
    pub fn ident(token: Token<K>) -> Self {
        Self::Ident(Ident { token })
    }

    pub fn value(token: Token<K>) -> Self {
        Self::Value(Value { token })
    }

    pub fn binary(token: Token<K>, left: Node<K>, right: Node<K>) -> Self {
        Self::BinaryOp(BinaryOp {
            token,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn prefix(token: Token<K>, operand: Node<K>) -> Self {
        Self::PrefixOp(PrefixOp {
            token,
            operand: Box::new(operand),
        })
    }

    pub fn postfix(token: Token<K>, operand: Node<K>) -> Self {
        Self::PostfixOp(PostfixOp {
            token,
            operand: Box::new(operand),
        })
    }

    pub fn sequence(token: Token<K>, items: Vec<Node<K>>) -> Self {
        Self::Sequence(Sequence { token, items })
    }

    #[inline]
    pub fn token(&self) -> &Token<K> {
        match self {
            Self::Ident(node) => &node.token,
            Self::Value(node) => &node.token,
            Self::BinaryOp(node) => &node.token,
            Self::PrefixOp(node) => &node.token,
            Self::PostfixOp(node) => &node.token,
            Self::Sequence(node) => &node.token,
        }
    }

    /// The kind of the concrete shape, as seen by the dispatch tables.
    #[inline]
    pub fn kind(&self) -> Kind {
        self.as_object().kind()
    }

    /// The concrete shape as an [`Object`].
    pub fn as_object(&self) -> &dyn Object {
        match self {
            Self::Ident(node) => node,
            Self::Value(node) => node,
            Self::BinaryOp(node) => node,
            Self::PrefixOp(node) => node,
            Self::PostfixOp(node) => node,
            Self::Sequence(node) => node,
        }
    }

    pub fn children(&self) -> Vec<&Node<K>> {
        match self {
            Self::Ident(_) | Self::Value(_) => vec![],
            Self::BinaryOp(node) => vec![node.left.as_ref(), node.right.as_ref()],
            Self::PrefixOp(node) => vec![node.operand.as_ref()],
            Self::PostfixOp(node) => vec![node.operand.as_ref()],
            Self::Sequence(node) => node.items.iter().collect(),
        }
    }

    /// The number of nodes in this subtree.
    pub fn size(&self) -> usize {
        1 + self
            .children()
            .into_iter()
            .map(Node::size)
            .sum::<usize>()
    }
}
