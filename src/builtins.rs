//! The default operations of the rule language.
//!
//! Operations without a result for their operands (integer overflow, division by zero, invalid
//! casts...) return `None`, like unregistered ones.

use crate::{
    objects::{object, Array, Boolean, Float, Integer, Interval, Object, ObjectKind, Str},
    operations::{BinaryOperations, Operations, Transforms, UnaryOperations},
    rendering,
    rules::TokenKind,
    scanner,
};

/// All the built-in operations and casts, plus the value renderings.
pub fn operations() -> Operations<TokenKind> {
    let mut operations = Operations::new();
    register_arithmetic(&mut operations.binary);
    register_comparisons(&mut operations.binary);
    register_logic(&mut operations.binary);
    register_ranges(&mut operations.binary);
    register_membership(&mut operations.binary);
    register_unary(&mut operations.unary);
    register_casts(&mut operations.transforms);
    rendering::register_values(&mut operations.transforms);
    operations
}

pub fn register_arithmetic(binary: &mut BinaryOperations<TokenKind>) {
    binary.set(TokenKind::Plus, |left: &Integer, right: &Integer| {
        left.0.checked_add(right.0).map(Integer)
    });
    binary.set_with_reverse(TokenKind::Plus, |left: &Float, right: &Integer| {
        Some(Float(left.0 + right.0 as f64))
    });
    binary.set(TokenKind::Plus, |left: &Float, right: &Float| {
        Some(Float(left.0 + right.0))
    });
    binary.set(TokenKind::Plus, |left: &Str, right: &Str| {
        Some(Str(format!("{}{}", left.0, right.0)))
    });

    binary.set(TokenKind::Minus, |left: &Integer, right: &Integer| {
        left.0.checked_sub(right.0).map(Integer)
    });
    binary.set(TokenKind::Minus, |left: &Float, right: &Integer| {
        Some(Float(left.0 - right.0 as f64))
    });
    binary.set(TokenKind::Minus, |left: &Integer, right: &Float| {
        Some(Float(left.0 as f64 - right.0))
    });
    binary.set(TokenKind::Minus, |left: &Float, right: &Float| {
        Some(Float(left.0 - right.0))
    });

    binary.set(TokenKind::Mul, |left: &Integer, right: &Integer| {
        left.0.checked_mul(right.0).map(Integer)
    });
    binary.set_with_reverse(TokenKind::Mul, |left: &Float, right: &Integer| {
        Some(Float(left.0 * right.0 as f64))
    });
    binary.set(TokenKind::Mul, |left: &Float, right: &Float| {
        Some(Float(left.0 * right.0))
    });
    binary.set_with_reverse(TokenKind::Mul, |left: &Str, right: &Integer| {
        let count = usize::try_from(right.0).unwrap_or_default();
        Some(Str(left.0.repeat(count)))
    });

    binary.set(TokenKind::Div, |left: &Integer, right: &Integer| {
        left.0.checked_div(right.0).map(Integer)
    });
    binary.set(TokenKind::Div, |left: &Float, right: &Integer| {
        Some(Float(left.0 / right.0 as f64))
    });
    binary.set(TokenKind::Div, |left: &Integer, right: &Float| {
        Some(Float(left.0 as f64 / right.0))
    });
    binary.set(TokenKind::Div, |left: &Float, right: &Float| {
        Some(Float(left.0 / right.0))
    });

    binary.set(TokenKind::Mod, |left: &Integer, right: &Integer| {
        left.0.checked_rem(right.0).map(Integer)
    });
}

fn register_ordering<T: ObjectKind + PartialOrd>(binary: &mut BinaryOperations<TokenKind>) {
    binary.set(TokenKind::Eq, |left: &T, right: &T| Some(Boolean(left == right)));
    binary.set(TokenKind::NotEq, |left: &T, right: &T| Some(Boolean(left != right)));
    binary.set(TokenKind::Lt, |left: &T, right: &T| Some(Boolean(left < right)));
    binary.set(TokenKind::LtEq, |left: &T, right: &T| Some(Boolean(left <= right)));
    binary.set(TokenKind::Gt, |left: &T, right: &T| Some(Boolean(left > right)));
    binary.set(TokenKind::GtEq, |left: &T, right: &T| Some(Boolean(left >= right)));
}

pub fn register_comparisons(binary: &mut BinaryOperations<TokenKind>) {
    register_ordering::<Integer>(binary);
    register_ordering::<Float>(binary);
    register_ordering::<Str>(binary);
    register_ordering::<Boolean>(binary);

    binary.set_with_reverse(TokenKind::Eq, |left: &Float, right: &Integer| {
        Some(Boolean(left.0 == right.0 as f64))
    });
    binary.set_with_reverse(TokenKind::NotEq, |left: &Float, right: &Integer| {
        Some(Boolean(left.0 != right.0 as f64))
    });
}

pub fn register_logic(binary: &mut BinaryOperations<TokenKind>) {
    binary.set(TokenKind::And, |left: &Boolean, right: &Boolean| {
        Some(Boolean(left.0 && right.0))
    });
    binary.set(TokenKind::Or, |left: &Boolean, right: &Boolean| {
        Some(Boolean(left.0 || right.0))
    });
}

pub fn register_ranges(binary: &mut BinaryOperations<TokenKind>) {
    binary.set(TokenKind::DotDot, |low: &Integer, high: &Integer| {
        Some(interval(*low, *high))
    });
    binary.set(TokenKind::DotDot, |low: &Float, high: &Float| {
        Some(interval(*low, *high))
    });
    binary.set(TokenKind::DotDot, |low: &Integer, high: &Float| {
        Some(interval(Float(low.0 as f64), *high))
    });
    binary.set(TokenKind::DotDot, |low: &Float, high: &Integer| {
        Some(interval(*low, Float(high.0 as f64)))
    });
    binary.set(TokenKind::DotDotDot, |low: &Integer, high: &Integer| {
        Some(interval(*low, Integer(high.0.checked_sub(1)?)))
    });
}

fn interval<T: ObjectKind>(low: T, high: T) -> Interval {
    Interval {
        low: object(low),
        high: object(high),
    }
}

fn integer_bounds(interval: &Interval) -> Option<(i64, i64)> {
    Some((
        interval.low.downcast_ref::<Integer>()?.0,
        interval.high.downcast_ref::<Integer>()?.0,
    ))
}

fn as_float(value: &dyn Object) -> Option<f64> {
    match value.downcast_ref::<Float>() {
        Some(value) => Some(value.0),
        None => value.downcast_ref::<Integer>().map(|value| value.0 as f64),
    }
}

fn float_bounds(interval: &Interval) -> Option<(f64, f64)> {
    Some((as_float(interval.low.as_ref())?, as_float(interval.high.as_ref())?))
}

fn contains<T: ObjectKind>(value: &T, array: &Array) -> Boolean {
    Boolean(
        array
            .0
            .iter()
            .any(|item| item.downcast_ref::<T>() == Some(value)),
    )
}

pub fn register_membership(binary: &mut BinaryOperations<TokenKind>) {
    binary.set(TokenKind::In, |value: &Integer, interval: &Interval| {
        match integer_bounds(interval) {
            Some((low, high)) => Some(Boolean((low..=high).contains(&value.0))),
            None => {
                let (low, high) = float_bounds(interval)?;
                Some(Boolean((low..=high).contains(&(value.0 as f64))))
            }
        }
    });
    binary.set(TokenKind::In, |value: &Float, interval: &Interval| {
        let (low, high) = float_bounds(interval)?;
        Some(Boolean((low..=high).contains(&value.0)))
    });

    binary.set(TokenKind::In, |value: &Integer, array: &Array| {
        Some(contains(value, array))
    });
    binary.set(TokenKind::In, |value: &Float, array: &Array| {
        Some(contains(value, array))
    });
    binary.set(TokenKind::In, |value: &Str, array: &Array| {
        Some(contains(value, array))
    });
    binary.set(TokenKind::In, |value: &Boolean, array: &Array| {
        Some(contains(value, array))
    });

    binary.set(TokenKind::In, |needle: &Str, haystack: &Str| {
        Some(Boolean(haystack.0.contains(needle.0.as_str())))
    });
}

pub fn register_unary(unary: &mut UnaryOperations<TokenKind>) {
    unary.set(TokenKind::Not, |operand: &Boolean| Some(Boolean(!operand.0)));
    unary.set(TokenKind::Minus, |operand: &Integer| {
        operand.0.checked_neg().map(Integer)
    });
    unary.set(TokenKind::Minus, |operand: &Float| Some(Float(-operand.0)));
    unary.set(TokenKind::Plus, |operand: &Integer| Some(*operand));
    unary.set(TokenKind::Plus, |operand: &Float| Some(*operand));
}

pub fn register_casts(transforms: &mut Transforms) {
    transforms.set::<Str, Integer, _>(|_, value| scanner::parse_integer(&value.0).map(Integer));
    transforms.set::<Str, Float, _>(|_, value| scanner::parse_float(&value.0).map(Float));
    transforms.set::<Str, Boolean, _>(|_, value| match value.0.as_str() {
        "true" => Some(Boolean(true)),
        "false" => Some(Boolean(false)),
        _ => None,
    });
    transforms.set::<Integer, Float, _>(|_, value| Some(Float(value.0 as f64)));

    transforms.set::<Str, Str, _>(|_, value| Some(value.clone()));
    transforms.set::<Integer, Str, _>(|_, value| Some(Str(value.0.to_string())));
    transforms.set::<Float, Str, _>(|_, value| Some(Str(format!("{:?}", value.0))));
    transforms.set::<Boolean, Str, _>(|_, value| Some(Str(value.0.to_string())));
}
