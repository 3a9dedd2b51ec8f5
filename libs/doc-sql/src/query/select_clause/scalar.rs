// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use crate::{
    database_error::DatabaseError,
    query::{
        element_type::ElementType,
        handler::{QueryHandler, list::ListQueryHandler, one_result::OneResultHandler},
        selector::{AnySelector, STRING_VALUE_SELECTOR},
        session::QuerySession,
        statement::Statement,
        statistics::QueryStatistics,
    },
    sql::{
        ExpressionBuilder, SQLBuilder, document_field::DocumentField,
        document_table::DocumentTable,
    },
};

use super::{AnySelectClause, SelectClause};

/// Selects a single field of each document, read back as text.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarSelectClause {
    field: DocumentField,
    element_type: ElementType,
    from_object: String,
}

impl ScalarSelectClause {
    pub fn new(table: &DocumentTable, field: DocumentField, element_type: ElementType) -> Self {
        Self {
            field,
            element_type,
            from_object: table.qualified_name(),
        }
    }
}

impl SelectClause for ScalarSelectClause {
    fn selected_type(&self) -> ElementType {
        self.element_type.clone()
    }

    fn from_object(&self) -> &str {
        &self.from_object
    }

    fn write_select_clause(&self, builder: &mut SQLBuilder) {
        builder.push_str("select ");
        self.field.build(builder);
        builder.push_str(" from ");
        builder.push_str(&self.from_object);
        builder.push_str(" as d");
    }

    fn select_fields(&self) -> Vec<&str> {
        vec![self.field.name()]
    }

    fn build_selector(&self, _session: &QuerySession) -> AnySelector {
        AnySelector::StringValue(&STRING_VALUE_SELECTOR)
    }

    fn build_handler(
        &self,
        _session: &QuerySession,
        top_statement: Arc<Statement>,
        current_statement: &Statement,
    ) -> QueryHandler {
        if current_statement.limit() == Some(1) {
            QueryHandler::OneText(OneResultHandler::new(
                top_statement,
                &STRING_VALUE_SELECTOR,
                true,
                false,
            ))
        } else {
            QueryHandler::ListText(ListQueryHandler::new(top_statement, &STRING_VALUE_SELECTOR))
        }
    }

    fn use_statistics(
        &self,
        _statistics: QueryStatistics,
    ) -> Result<AnySelectClause, DatabaseError> {
        Err(DatabaseError::Unsupported(
            "Query statistics are not available for single-field selections".into(),
        ))
    }

    fn value_field(&self) -> Option<&DocumentField> {
        Some(&self.field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_clause_text() {
        let clause = ScalarSelectClause::new(
            &DocumentTable::new("people"),
            DocumentField::path(["address", "city"]),
            ElementType::String,
        );

        let mut builder = SQLBuilder::new();
        clause.write_select_clause(&mut builder);

        assert_binding!(
            builder.into_sql(),
            "select d.data -> 'address' ->> 'city' from people as d"
        );
        assert_eq!(clause.select_fields(), vec!["city"]);
        assert_eq!(clause.selected_type(), ElementType::String);
        assert_eq!(
            clause.value_field(),
            Some(&DocumentField::path(["address", "city"]))
        );
    }

    #[test]
    fn statistics_are_unsupported() {
        let clause = ScalarSelectClause::new(
            &DocumentTable::new("people"),
            DocumentField::Id,
            ElementType::String,
        );

        assert!(matches!(
            clause.use_statistics(QueryStatistics::new()),
            Err(DatabaseError::Unsupported(_))
        ));
    }
}
