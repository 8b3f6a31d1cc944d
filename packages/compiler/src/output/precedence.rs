//! Precedence Table
//!
//! Binding strength of the expression forms the generator emits. Lower
//! levels bind tighter. A sub-expression produced at one level and placed
//! where the caller requires another is parenthesized according to
//! [`needs_parens`].

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Order {
    /// Literals, identifiers, self-delimited forms.
    Atomic = 0,
    /// `expr()` `expr[]` `expr.field` `expr?`
    UnaryPostfix = 1,
    /// `-expr` `!expr`
    UnaryPrefix = 2,
    /// `*` `/` `%`
    Multiplicative = 3,
    /// `+` `-`
    Additive = 4,
    /// `<<` `>>`
    Shift = 5,
    BitwiseAnd = 6,
    BitwiseXor = 7,
    BitwiseOr = 8,
    /// `<` `<=` `>` `>=`
    Relational = 9,
    /// `==` `!=`
    Equality = 10,
    LogicalAnd = 11,
    LogicalOr = 12,
    IfNull = 13,
    /// `if c { a } else { b }` used as a value
    Conditional = 14,
    Cascade = 15,
    /// `=` and compound assignment
    Assignment = 16,
    /// No surrounding operator; the caller delimits the text itself.
    None = 99,
}

impl Order {
    pub const ALL: [Order; 18] = [
        Order::Atomic,
        Order::UnaryPostfix,
        Order::UnaryPrefix,
        Order::Multiplicative,
        Order::Additive,
        Order::Shift,
        Order::BitwiseAnd,
        Order::BitwiseXor,
        Order::BitwiseOr,
        Order::Relational,
        Order::Equality,
        Order::LogicalAnd,
        Order::LogicalOr,
        Order::IfNull,
        Order::Conditional,
        Order::Cascade,
        Order::Assignment,
        Order::None,
    ];

    pub fn level(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self, self.level())
    }
}

/// Whether text produced at `produced` must be wrapped in parentheses where
/// the caller requires `required`: wrap unless `produced` binds strictly
/// tighter, except that atomic text in an atomic slot and unordered text in
/// an unordered slot are never wrapped.
pub fn needs_parens(produced: Order, required: Order) -> bool {
    match (produced, required) {
        (Order::Atomic, Order::Atomic) | (Order::None, Order::None) => false,
        _ => required <= produced,
    }
}
