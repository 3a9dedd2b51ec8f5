// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use super::{SQLBuilder, SQLParam};

/// Anything that renders itself as a fragment of a document query: fields, predicates,
/// ordering, paging.
///
/// Fragments nest, so a predicate builds its operands into the same [SQLBuilder], and all bound
/// values end up numbered in one parameter list.
pub trait ExpressionBuilder {
    fn build(&self, builder: &mut SQLBuilder);

    /// Render just this fragment. Mostly for asserting on generated SQL in tests.
    fn to_sql(&self) -> (String, Vec<Arc<dyn SQLParam>>)
    where
        Self: Sized,
    {
        let mut builder = SQLBuilder::new();
        self.build(&mut builder);
        builder.into_sql()
    }
}

impl<T: ExpressionBuilder> ExpressionBuilder for Box<T> {
    fn build(&self, builder: &mut SQLBuilder) {
        (**self).build(builder)
    }
}
