// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use super::{SQLParam, expression_builder::ExpressionBuilder};

/// The SQL command under construction. Text is only ever appended; nothing in this crate reads it
/// back before [`SQLBuilder::into_sql`].
pub struct SQLBuilder {
    sql: String,
    /// Bound values; `$n` refers to `params[n - 1]`
    params: Vec<Arc<dyn SQLParam>>,
}

impl Default for SQLBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SQLBuilder {
    pub fn new() -> Self {
        Self {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    pub fn push_str<T: AsRef<str>>(&mut self, s: T) {
        self.sql.push_str(s.as_ref());
    }

    pub fn push(&mut self, c: char) {
        self.sql.push(c);
    }

    /// Push a string literal surrounded by single quotes, doubling any embedded quote.
    pub fn push_literal<T: AsRef<str>>(&mut self, s: T) {
        self.sql.push('\'');
        self.sql.push_str(&s.as_ref().replace('\'', "''"));
        self.sql.push('\'');
    }

    pub fn push_space(&mut self) {
        self.sql.push(' ');
    }

    /// Bind a value. The text gets the next `$n` placeholder.
    pub fn push_param(&mut self, param: Arc<dyn SQLParam>) {
        self.params.push(param);
        let placeholder = self.params.len().to_string();
        self.push('$');
        self.push_str(placeholder);
    }

    /// Write each element with `push_elem`, with `sep` between consecutive elements.
    pub fn push_iter<T>(
        &mut self,
        iter: impl ExactSizeIterator<Item = T>,
        sep: &str,
        push_elem: impl Fn(&mut Self, T),
    ) {
        let len = iter.len();
        for (i, item) in iter.enumerate() {
            push_elem(self, item);

            if i < len - 1 {
                self.sql.push_str(sep);
            }
        }
    }

    /// [`SQLBuilder::push_iter`] for fragments that build themselves.
    pub fn push_elems<T: ExpressionBuilder>(&mut self, elems: &[T], sep: &str) {
        self.push_iter(elems.iter(), sep, |builder, elem| {
            elem.build(builder);
        });
    }

    /// The finished command text and its parameters, in placeholder order.
    pub fn into_sql(self) -> (String, Vec<Arc<dyn SQLParam>>) {
        (self.sql, self.params)
    }
}
