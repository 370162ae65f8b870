//! Conversions of trees and composite values to text, through [`Transforms`].
//!
//! Trees render fully parenthesized: `(left op right)`, `(op operand)`, `(operand op)` and
//! `(a, b)` for sequences. Identifiers and literals render as they were written.

use crate::{
    ast::{BinaryOp, Ident, Node, PostfixOp, PrefixOp, Sequence, Value},
    objects::{Array, Interval, Object, Pair, Str},
    operations::Transforms,
    token::TokenKey,
};
use itertools::Itertools;

fn render_object(transforms: &Transforms, value: &dyn Object) -> Option<String> {
    transforms.call::<Str>(value).map(|text| text.0)
}

/// Register the renderings of every node shape keyed by `K`.
pub fn register_nodes<K: TokenKey>(transforms: &mut Transforms) {
    transforms.set::<Ident<K>, Str, _>(|_, node| Some(Str::from(node.token.raw_value())));
    transforms.set::<Value<K>, Str, _>(|_, node| Some(Str::from(node.token.raw_value())));
    transforms.set::<BinaryOp<K>, Str, _>(|transforms, node| {
        Some(Str(format!(
            "({} {} {})",
            render(transforms, &node.left)?,
            node.token.raw_value(),
            render(transforms, &node.right)?
        )))
    });
    transforms.set::<PrefixOp<K>, Str, _>(|transforms, node| {
        Some(Str(format!(
            "({} {})",
            node.token.raw_value(),
            render(transforms, &node.operand)?
        )))
    });
    transforms.set::<PostfixOp<K>, Str, _>(|transforms, node| {
        Some(Str(format!(
            "({} {})",
            render(transforms, &node.operand)?,
            node.token.raw_value()
        )))
    });
    transforms.set::<Sequence<K>, Str, _>(|transforms, node| {
        let items = node
            .items
            .iter()
            .map(|item| render(transforms, item))
            .collect::<Option<Vec<_>>>()?;
        Some(Str(format!("({})", items.iter().join(", "))))
    });
}

// Strings nested in composite values are quoted.
fn render_item(transforms: &Transforms, value: &dyn Object) -> Option<String> {
    match value.downcast_ref::<Str>() {
        Some(text) => Some(format!("{:?}", text.0)),
        None => render_object(transforms, value),
    }
}

/// Register the renderings of the composite values. The scalar ones come with the casts.
pub fn register_values(transforms: &mut Transforms) {
    transforms.set::<Array, Str, _>(|transforms, array| {
        let items = array
            .0
            .iter()
            .map(|item| render_item(transforms, item.as_ref()))
            .collect::<Option<Vec<_>>>()?;
        Some(Str(format!("[{}]", items.iter().join(", "))))
    });
    transforms.set::<Pair, Str, _>(|transforms, pair| {
        Some(Str(format!(
            "({}: {})",
            render_item(transforms, pair.left.as_ref())?,
            render_item(transforms, pair.right.as_ref())?
        )))
    });
    transforms.set::<Interval, Str, _>(|transforms, interval| {
        Some(Str(format!(
            "{}..{}",
            render_object(transforms, interval.low.as_ref())?,
            render_object(transforms, interval.high.as_ref())?
        )))
    });
}

/// A table rendering the trees keyed by `K`.
pub fn transforms<K: TokenKey>() -> Transforms {
    let mut transforms = Transforms::new();
    register_nodes::<K>(&mut transforms);
    transforms
}

/// Render a tree; `None` when some node has no rendering.
pub fn render<K: TokenKey>(transforms: &Transforms, node: &Node<K>) -> Option<String> {
    render_object(transforms, node.as_object())
}
