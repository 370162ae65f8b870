pub mod tokens {
    macro_rules! token {
        ($key:expr, $raw:expr) => {
            $crate::token::Token::new($key, $raw, $crate::token::Position::default())
        };
        ($key:expr, $raw:expr, $value:expr) => {
            $crate::token::Token::new($key, $raw, $crate::token::Position::default())
                .with_value(String::from($value))
        };
    }

    pub(crate) use token;
}

pub mod ast {
    macro_rules! ident {
        ($name:expr) => {
            $crate::ast::Node::ident($crate::test_utils::tokens::token!(
                $crate::rules::TokenKind::Ident,
                $name
            ))
        };
    }

    macro_rules! value {
        ($key:expr, $raw:expr) => {
            $crate::ast::Node::value($crate::test_utils::tokens::token!($key, $raw))
        };
    }

    macro_rules! integer {
        ($raw:expr) => {
            $crate::test_utils::ast::value!($crate::rules::TokenKind::Number, $raw)
        };
    }

    macro_rules! string {
        ($value:expr) => {
            $crate::ast::Node::value($crate::test_utils::tokens::token!(
                $crate::rules::TokenKind::String,
                &format!("{:?}", $value),
                $value
            ))
        };
    }

    macro_rules! binary {
        ($key:expr, $raw:expr, $left:expr, $right:expr) => {
            $crate::ast::Node::binary(
                $crate::test_utils::tokens::token!($key, $raw),
                $left,
                $right,
            )
        };
    }

    macro_rules! prefix {
        ($key:expr, $raw:expr, $operand:expr) => {
            $crate::ast::Node::prefix($crate::test_utils::tokens::token!($key, $raw), $operand)
        };
    }

    macro_rules! postfix {
        ($key:expr, $raw:expr, $operand:expr) => {
            $crate::ast::Node::postfix($crate::test_utils::tokens::token!($key, $raw), $operand)
        };
    }

    macro_rules! sequence {
        ($($item:expr),* $(,)?) => {
            $crate::ast::Node::sequence(
                $crate::test_utils::tokens::token!($crate::rules::TokenKind::LParen, "("),
                vec![$($item),*],
            )
        };
    }

    pub(crate) use binary;
    pub(crate) use ident;
    pub(crate) use integer;
    pub(crate) use postfix;
    pub(crate) use prefix;
    pub(crate) use sequence;
    pub(crate) use string;
    pub(crate) use value;
}
