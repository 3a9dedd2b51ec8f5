// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use super::{ExpressionBuilder, SQLBuilder, SQLParam, SQLParamContainer};

/// An operand in a document query. All column references go through the `d` alias of the
/// document table.
#[derive(Debug, PartialEq, Clone)]
pub enum DocumentField {
    /// `d.id`
    Id,
    /// `d.data`, the whole document
    Data,
    /// A path into the document, read as text: `d.data -> 'address' ->> 'city'`
    Path(Vec<String>),
    /// `d.tenant_id`
    TenantId,
    Param(SQLParamContainer),
    Null,
}

impl DocumentField {
    pub fn path<S: Into<String>>(segments: impl IntoIterator<Item = S>) -> Self {
        DocumentField::Path(segments.into_iter().map(Into::into).collect())
    }

    pub fn param<T: SQLParam + 'static>(value: T) -> Self {
        DocumentField::Param(SQLParamContainer::new(value))
    }

    /// The name a result column for this field would be known by.
    pub fn name(&self) -> &str {
        match self {
            DocumentField::Id => "id",
            DocumentField::Data => "data",
            DocumentField::Path(segments) => segments.last().map(String::as_str).unwrap_or("data"),
            DocumentField::TenantId => "tenant_id",
            DocumentField::Param(_) | DocumentField::Null => "?column?",
        }
    }
}

impl ExpressionBuilder for DocumentField {
    fn build(&self, builder: &mut SQLBuilder) {
        match self {
            DocumentField::Id => builder.push_str("d.id"),
            DocumentField::Data => builder.push_str("d.data"),
            DocumentField::Path(segments) => {
                builder.push_str("d.data");
                let last = segments.len().saturating_sub(1);
                for (i, segment) in segments.iter().enumerate() {
                    // Intermediate steps stay JSON, the final step is extracted as text
                    builder.push_str(if i == last { " ->> " } else { " -> " });
                    builder.push_literal(segment);
                }
            }
            DocumentField::TenantId => builder.push_str("d.tenant_id"),
            DocumentField::Param(param) => builder.push_param(param.param()),
            DocumentField::Null => builder.push_str("NULL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_path() {
        assert_binding!(
            DocumentField::path(["address", "city"]).to_sql(),
            "d.data -> 'address' ->> 'city'"
        );
        assert_binding!(DocumentField::path(["name"]).to_sql(), "d.data ->> 'name'");
    }

    #[test]
    fn param_field() {
        assert_binding!(
            DocumentField::param("Al".to_string()).to_sql(),
            "$1",
            "Al".to_string()
        );
    }

    #[test]
    fn field_names() {
        assert_eq!(DocumentField::path(["address", "city"]).name(), "city");
        assert_eq!(DocumentField::Data.name(), "data");
    }
}
