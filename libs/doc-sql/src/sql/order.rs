// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use super::{ExpressionBuilder, SQLBuilder, document_field::DocumentField};

#[derive(Debug, Clone, PartialEq, Eq, Copy)]
pub enum Ordering {
    Asc,
    Desc,
}

#[derive(Debug, PartialEq, Clone)]
pub struct OrderByElement(pub DocumentField, pub Ordering);

#[derive(Debug, PartialEq, Clone)]
pub struct OrderBy(pub Vec<OrderByElement>);

impl OrderByElement {
    pub fn new(field: DocumentField, ordering: Ordering) -> Self {
        Self(field, ordering)
    }
}

impl ExpressionBuilder for OrderByElement {
    fn build(&self, builder: &mut SQLBuilder) {
        self.0.build(builder);
        builder.push_space();

        if self.1 == Ordering::Asc {
            builder.push_str("ASC");
        } else {
            builder.push_str("DESC");
        }
    }
}

impl ExpressionBuilder for OrderBy {
    fn build(&self, builder: &mut SQLBuilder) {
        builder.push_str("order by ");
        builder.push_elems(&self.0, ", ");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single() {
        let order_by = OrderBy(vec![OrderByElement::new(
            DocumentField::path(["age"]),
            Ordering::Desc,
        )]);

        assert_binding!(order_by.to_sql(), "order by d.data ->> 'age' DESC");
    }

    #[test]
    fn multiple() {
        let order_by = OrderBy(vec![
            OrderByElement::new(DocumentField::path(["name"]), Ordering::Asc),
            OrderByElement::new(DocumentField::Id, Ordering::Desc),
        ]);

        assert_binding!(
            order_by.to_sql(),
            "order by d.data ->> 'name' ASC, d.id DESC"
        );
    }
}
