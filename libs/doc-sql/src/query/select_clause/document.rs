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
        selector::{AnySelector, DocumentSelector},
        session::QuerySession,
        statement::Statement,
        statistics::QueryStatistics,
    },
    sql::{SQLBuilder, document_table::DocumentTable},
};

use super::{AnySelectClause, SelectClause};

/// Selects whole documents (`id` and `data`), to be hydrated into [crate::Document]s.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentSelectClause {
    document_type: String,
    from_object: String,
    statistics: Option<QueryStatistics>,
}

impl DocumentSelectClause {
    pub fn new(table: &DocumentTable, document_type: impl Into<String>) -> Self {
        Self {
            document_type: document_type.into(),
            from_object: table.qualified_name(),
            statistics: None,
        }
    }

    fn selector(&self) -> DocumentSelector {
        DocumentSelector::new(self.statistics.clone())
    }
}

impl SelectClause for DocumentSelectClause {
    fn selected_type(&self) -> ElementType {
        ElementType::Document(self.document_type.clone())
    }

    fn from_object(&self) -> &str {
        &self.from_object
    }

    fn write_select_clause(&self, builder: &mut SQLBuilder) {
        builder.push_str("select d.id, d.data");
        if self.statistics.is_some() {
            // Counted before LIMIT/OFFSET apply
            builder.push_str(", count(*) OVER() as total_rows");
        }
        builder.push_str(" from ");
        builder.push_str(&self.from_object);
        builder.push_str(" as d");
    }

    fn select_fields(&self) -> Vec<&str> {
        vec!["id", "data"]
    }

    fn build_selector(&self, _session: &QuerySession) -> AnySelector {
        AnySelector::Document(self.selector())
    }

    fn build_handler(
        &self,
        _session: &QuerySession,
        top_statement: Arc<Statement>,
        current_statement: &Statement,
    ) -> QueryHandler {
        if current_statement.limit() == Some(1) {
            QueryHandler::OneDocument(OneResultHandler::new(
                top_statement,
                self.selector(),
                true,
                false,
            ))
        } else {
            QueryHandler::ListDocument(ListQueryHandler::new(top_statement, self.selector()))
        }
    }

    fn use_statistics(
        &self,
        statistics: QueryStatistics,
    ) -> Result<AnySelectClause, DatabaseError> {
        Ok(AnySelectClause::Document(Self {
            statistics: Some(statistics),
            ..self.clone()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_clause_text() {
        let table = DocumentTable::new("mt_doc_people").in_schema("public");
        let clause = DocumentSelectClause::new(&table, "Person");

        let mut builder = SQLBuilder::new();
        clause.write_select_clause(&mut builder);

        assert_binding!(
            builder.into_sql(),
            "select d.id, d.data from public.mt_doc_people as d"
        );
        assert_eq!(clause.select_fields(), vec!["id", "data"]);
    }

    #[test]
    fn with_statistics() {
        let clause = DocumentSelectClause::new(&DocumentTable::new("people"), "Person");
        let statistics = QueryStatistics::new();

        let with_statistics = clause.use_statistics(statistics.clone()).unwrap();

        let mut builder = SQLBuilder::new();
        with_statistics.write_select_clause(&mut builder);
        assert_binding!(
            builder.into_sql(),
            "select d.id, d.data, count(*) OVER() as total_rows from people as d"
        );

        assert_eq!(
            with_statistics.build_selector(&QuerySession::new()),
            AnySelector::Document(DocumentSelector::new(Some(statistics)))
        );
    }
}
