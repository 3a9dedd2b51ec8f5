// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use super::{ExpressionBuilder, SQLBuilder, document_field::DocumentField};

/// Case sensitivity for string predicates.
#[derive(Debug, Clone, PartialEq, Eq, Copy)]
pub enum CaseSensitivity {
    Sensitive,
    Insensitive,
}

/// A predicate is a boolean expression that can be used in a WHERE clause.
#[derive(Debug, PartialEq, Clone)]
pub enum Predicate {
    True,
    False,
    Eq(DocumentField, DocumentField),
    Neq(DocumentField, DocumentField),
    Lt(DocumentField, DocumentField),
    Lte(DocumentField, DocumentField),
    Gt(DocumentField, DocumentField),
    Gte(DocumentField, DocumentField),

    StringLike(DocumentField, DocumentField, CaseSensitivity),

    /// Document containment (`@>`); the right-hand side is JSON text cast to `jsonb`
    JsonContains(DocumentField, DocumentField),

    // Prefer Predicate::and(), which simplifies the clause
    And(Box<Predicate>, Box<Predicate>),
    // Prefer Predicate::or(), which simplifies the clause
    Or(Box<Predicate>, Box<Predicate>),
    // Prefer Predicate::not(), which simplifies the clause
    Not(Box<Predicate>),
}

impl Predicate {
    /// Compare two fields and reduce to a simpler predicate if possible.
    pub fn eq(lhs: DocumentField, rhs: DocumentField) -> Predicate {
        if lhs == rhs {
            Predicate::True
        } else {
            // For parameters, we can check for Predicate::False directly
            match lhs.param_eq(&rhs) {
                Some(false) => Predicate::False,
                _ => Predicate::Eq(lhs, rhs),
            }
        }
    }

    /// Compare two fields and reduce to a simpler predicate if possible
    pub fn neq(lhs: DocumentField, rhs: DocumentField) -> Predicate {
        !Self::eq(lhs, rhs)
    }

    /// Logical and of two predicates, reducing to a simpler predicate if possible.
    pub fn and(lhs: Predicate, rhs: Predicate) -> Predicate {
        match (lhs, rhs) {
            (Predicate::False, _) | (_, Predicate::False) => Predicate::False,
            (Predicate::True, rhs) => rhs,
            (lhs, Predicate::True) => lhs,
            (lhs, rhs) if lhs == rhs => lhs,
            (lhs, rhs) => Predicate::And(Box::new(lhs), Box::new(rhs)),
        }
    }

    /// Logical or of two predicates, reducing to a simpler predicate if possible.
    pub fn or(lhs: Predicate, rhs: Predicate) -> Predicate {
        match (lhs, rhs) {
            (Predicate::True, _) | (_, Predicate::True) => Predicate::True,
            (Predicate::False, rhs) => rhs,
            (lhs, Predicate::False) => lhs,
            (lhs, rhs) if lhs == rhs => lhs,
            (lhs, rhs) => Predicate::Or(Box::new(lhs), Box::new(rhs)),
        }
    }
}

impl From<bool> for Predicate {
    fn from(b: bool) -> Predicate {
        if b { Predicate::True } else { Predicate::False }
    }
}

impl std::ops::Not for Predicate {
    type Output = Predicate;

    fn not(self) -> Self::Output {
        match self {
            // Reduced to a simpler form when possible, else fall back to Predicate::Not
            Predicate::True => Predicate::False,
            Predicate::False => Predicate::True,
            Predicate::Eq(lhs, rhs) => Predicate::Neq(lhs, rhs),
            Predicate::Neq(lhs, rhs) => Predicate::Eq(lhs, rhs),
            Predicate::Lt(lhs, rhs) => Predicate::Gte(lhs, rhs),
            Predicate::Lte(lhs, rhs) => Predicate::Gt(lhs, rhs),
            Predicate::Gt(lhs, rhs) => Predicate::Lte(lhs, rhs),
            Predicate::Gte(lhs, rhs) => Predicate::Lt(lhs, rhs),
            predicate => Predicate::Not(Box::new(predicate)),
        }
    }
}

/// Compare two parameters so that we can reduce a predicate to a boolean before passing it to
/// the database. For example, `Predicate::Eq(param("a"), param("b"))` can be reduced to false.
pub trait ParamEquality {
    /// Returns `None` if one of the operands is not a parameter, otherwise returns `Some(true)` if
    /// the parameters are equal, and `Some(false)` if they are not.
    fn param_eq(&self, other: &Self) -> Option<bool>;
}

impl ParamEquality for DocumentField {
    fn param_eq(&self, other: &Self) -> Option<bool> {
        match (self, other) {
            (DocumentField::Param(v1), DocumentField::Param(v2)) => Some(v1 == v2),
            _ => None,
        }
    }
}

impl ExpressionBuilder for Predicate {
    /// Build a predicate into a SQL string.
    fn build(&self, builder: &mut SQLBuilder) {
        match &self {
            Predicate::True => builder.push_str("true"),
            Predicate::False => builder.push_str("false"),
            Predicate::Eq(field1, field2) => {
                if field2 == &DocumentField::Null {
                    field1.build(builder);
                    builder.push_str(" IS NULL");
                } else {
                    relational_combine(field1, field2, "=", builder)
                }
            }
            Predicate::Neq(field1, field2) => {
                if field2 == &DocumentField::Null {
                    field1.build(builder);
                    builder.push_str(" IS NOT NULL");
                } else {
                    relational_combine(field1, field2, "<>", builder)
                }
            }
            Predicate::Lt(field1, field2) => relational_combine(field1, field2, "<", builder),
            Predicate::Lte(field1, field2) => relational_combine(field1, field2, "<=", builder),
            Predicate::Gt(field1, field2) => relational_combine(field1, field2, ">", builder),
            Predicate::Gte(field1, field2) => relational_combine(field1, field2, ">=", builder),
            Predicate::StringLike(field1, field2, case_sensitivity) => relational_combine(
                field1,
                field2,
                if *case_sensitivity == CaseSensitivity::Insensitive {
                    "ILIKE"
                } else {
                    "LIKE"
                },
                builder,
            ),
            Predicate::JsonContains(field1, field2) => {
                relational_combine(field1, field2, "@>", builder);
                builder.push_str("::jsonb");
            }
            Predicate::And(predicate1, predicate2) => {
                logical_combine(predicate1, predicate2, "AND", builder)
            }
            Predicate::Or(predicate1, predicate2) => {
                logical_combine(predicate1, predicate2, "OR", builder)
            }
            Predicate::Not(predicate) => {
                builder.push_str("NOT(");
                predicate.build(builder);
                builder.push(')');
            }
        }
    }
}

/// Combine two expressions with a relational operator.
fn relational_combine<E1: ExpressionBuilder, E2: ExpressionBuilder>(
    left: &E1,
    right: &E2,
    op: &'static str,
    builder: &mut SQLBuilder,
) {
    left.build(builder);
    builder.push_space();
    builder.push_str(op);
    builder.push_space();
    right.build(builder);
}

/// Combine two expressions with a logical binary operator.
fn logical_combine<E1: ExpressionBuilder, E2: ExpressionBuilder>(
    left: &E1,
    right: &E2,
    op: &'static str,
    builder: &mut SQLBuilder,
) {
    builder.push('(');
    left.build(builder);
    builder.push_space();
    builder.push_str(op);
    builder.push_space();
    right.build(builder);
    builder.push(')');
}
