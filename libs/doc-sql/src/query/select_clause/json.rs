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
        handler::{QueryHandler, json_array::JsonArrayHandler, one_result::OneResultHandler},
        selector::{AnySelector, STRING_VALUE_SELECTOR},
        session::QuerySession,
        statement::Statement,
        statistics::QueryStatistics,
    },
    sql::{ExpressionBuilder, SQLBuilder, document_field::DocumentField},
};

use super::{AnySelectClause, SelectClause};

pub const DEFAULT_SELECTION_TEXT: &str = "select d.data from ";

/// Selects the raw `data` column of another clause's table, so that documents come back as the
/// JSON text the database stored instead of hydrated values.
///
/// When the other clause selects a single field, each row is that field written as one JSON object
/// member instead: `"value":"Al"`. The array framing of primitive sources relies on this shape.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonSelectClause {
    source_type: ElementType,
    from_object: String,
    value_field: Option<DocumentField>,
    /// Everything written before the table expression. Replace it to customize the projection.
    pub selection_text: String,
}

impl JsonSelectClause {
    pub fn new<P: SelectClause + ?Sized>(parent: &P) -> Self {
        Self {
            source_type: parent.selected_type(),
            from_object: parent.from_object().to_string(),
            value_field: parent.value_field().cloned(),
            selection_text: DEFAULT_SELECTION_TEXT.to_string(),
        }
    }

    /// Replace the projection. A custom projection also replaces the `"value"` member written for
    /// single-field sources.
    pub fn with_selection_text(self, selection_text: impl Into<String>) -> Self {
        Self {
            selection_text: selection_text.into(),
            value_field: None,
            ..self
        }
    }

    /// The element type of the wrapped clause. Decides how rows are framed into an array.
    pub fn source_type(&self) -> &ElementType {
        &self.source_type
    }
}

impl SelectClause for JsonSelectClause {
    fn selected_type(&self) -> ElementType {
        ElementType::JsonText
    }

    fn from_object(&self) -> &str {
        &self.from_object
    }

    fn write_select_clause(&self, builder: &mut SQLBuilder) {
        match &self.value_field {
            Some(field) => {
                // A missing field still yields a member, so the row is never NULL
                builder.push_str(r#"select '"value":' || coalesce(to_jsonb("#);
                push_typed_field(field, &self.source_type, builder);
                builder.push_str(")::text, 'null') from ");
            }
            None => builder.push_str(&self.selection_text),
        }
        builder.push_str(&self.from_object);
        builder.push_str(" as d");
    }

    fn select_fields(&self) -> Vec<&str> {
        vec!["data"]
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
            QueryHandler::JsonArray(JsonArrayHandler::new(
                top_statement,
                self.source_type.clone(),
            ))
        }
    }

    fn use_statistics(
        &self,
        _statistics: QueryStatistics,
    ) -> Result<AnySelectClause, DatabaseError> {
        Err(DatabaseError::Unsupported(
            "Query statistics are not available when selecting raw JSON".into(),
        ))
    }
}

/// Path fields are extracted as text; cast them back so numbers and booleans keep their JSON type.
fn push_typed_field(field: &DocumentField, element_type: &ElementType, builder: &mut SQLBuilder) {
    let cast = match element_type {
        ElementType::Int => Some("bigint"),
        ElementType::Float => Some("double precision"),
        ElementType::Boolean => Some("boolean"),
        _ => None,
    };

    match cast {
        Some(cast) => {
            builder.push('(');
            field.build(builder);
            builder.push_str(")::");
            builder.push_str(cast);
        }
        None => field.build(builder),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        query::select_clause::{document::DocumentSelectClause, scalar::ScalarSelectClause},
        sql::{document_field::DocumentField, document_table::DocumentTable, limit::Limit},
    };

    fn people() -> DocumentSelectClause {
        DocumentSelectClause::new(&DocumentTable::new("people"), "Person")
    }

    #[test]
    fn captures_parent() {
        let clause = JsonSelectClause::new(&people());

        assert_eq!(clause.selected_type(), ElementType::JsonText);
        assert_eq!(
            clause.source_type(),
            &ElementType::Document("Person".into())
        );
        assert_eq!(clause.from_object(), "people");
    }

    #[test]
    fn select_clause_text() {
        let clause = JsonSelectClause::new(&people());
        let mut builder = SQLBuilder::new();
        clause.write_select_clause(&mut builder);

        assert_binding!(builder.into_sql(), "select d.data from people as d");
    }

    #[test]
    fn custom_selection_text() {
        let clause =
            JsonSelectClause::new(&people()).with_selection_text("select d.data::text from ");
        let mut builder = SQLBuilder::new();
        clause.write_select_clause(&mut builder);

        assert_binding!(builder.into_sql(), "select d.data::text from people as d");
    }

    #[test]
    fn single_field_is_a_value_member() {
        let scalar = ScalarSelectClause::new(
            &DocumentTable::new("people"),
            DocumentField::path(["name"]),
            ElementType::String,
        );
        let clause = JsonSelectClause::new(&scalar);
        let mut builder = SQLBuilder::new();
        clause.write_select_clause(&mut builder);

        assert_binding!(
            builder.into_sql(),
            r#"select '"value":' || coalesce(to_jsonb(d.data ->> 'name')::text, 'null') from people as d"#
        );
    }

    #[test]
    fn value_member_keeps_json_type() {
        let mut sql = vec![];
        for (name, element_type) in [
            ("age", ElementType::Int),
            ("height", ElementType::Float),
            ("active", ElementType::Boolean),
        ] {
            let scalar = ScalarSelectClause::new(
                &DocumentTable::new("people"),
                DocumentField::path([name]),
                element_type,
            );
            let mut builder = SQLBuilder::new();
            JsonSelectClause::new(&scalar).write_select_clause(&mut builder);
            sql.push(builder.into_sql().0);
        }

        assert_eq!(
            sql,
            vec![
                r#"select '"value":' || coalesce(to_jsonb((d.data ->> 'age')::bigint)::text, 'null') from people as d"#,
                r#"select '"value":' || coalesce(to_jsonb((d.data ->> 'height')::double precision)::text, 'null') from people as d"#,
                r#"select '"value":' || coalesce(to_jsonb((d.data ->> 'active')::boolean)::text, 'null') from people as d"#,
            ]
        );
    }

    #[test]
    fn custom_selection_text_replaces_value_member() {
        let scalar = ScalarSelectClause::new(
            &DocumentTable::new("people"),
            DocumentField::path(["name"]),
            ElementType::String,
        );
        let clause = JsonSelectClause::new(&scalar).with_selection_text("select d.data::text from ");
        let mut builder = SQLBuilder::new();
        clause.write_select_clause(&mut builder);

        assert_binding!(builder.into_sql(), "select d.data::text from people as d");
    }

    #[test]
    fn select_fields_are_fixed() {
        let scalar = ScalarSelectClause::new(
            &DocumentTable::new("people"),
            DocumentField::path(["name"]),
            ElementType::String,
        );

        for clause in [
            JsonSelectClause::new(&people()),
            JsonSelectClause::new(&scalar),
        ] {
            assert_eq!(clause.select_fields(), vec!["data"]);
        }
    }

    #[test]
    fn selector_is_shared() {
        let clause = JsonSelectClause::new(&people());

        match clause.build_selector(&QuerySession::new()) {
            AnySelector::StringValue(selector) => {
                assert!(std::ptr::eq(selector, &STRING_VALUE_SELECTOR))
            }
            selector => panic!("Unexpected selector {selector:?}"),
        }
    }

    #[test]
    fn handler_for_single_row() {
        let session = QuerySession::new();
        let statement = Arc::new(
            Statement::new(DocumentTable::new("people"), "Person")
                .into_json()
                .with_limit(Limit(1)),
        );
        let clause = JsonSelectClause::new(&people());

        match clause.build_handler(&session, statement.clone(), &statement) {
            QueryHandler::OneText(handler) => {
                assert!(handler.can_be_null());
                assert!(!handler.can_be_multiples());
            }
            _ => panic!("Expected a single result handler"),
        }
    }

    #[test]
    fn handler_for_many_rows() {
        let session = QuerySession::new();
        let clause = JsonSelectClause::new(&people());

        for limit in [None, Some(0), Some(2), Some(50)] {
            let mut statement = Statement::new(DocumentTable::new("people"), "Person").into_json();
            if let Some(limit) = limit {
                statement = statement.with_limit(Limit(limit));
            }
            let statement = Arc::new(statement);

            match clause.build_handler(&session, statement.clone(), &statement) {
                QueryHandler::JsonArray(handler) => {
                    assert_eq!(
                        handler.element_type(),
                        &ElementType::Document("Person".into())
                    );
                    assert!(Arc::ptr_eq(handler.statement(), &statement));
                }
                _ => panic!("Expected a JSON array handler for limit {limit:?}"),
            }
        }
    }

    #[test]
    fn statistics_are_unsupported() {
        let clause = JsonSelectClause::new(&people());
        let before = clause.clone();

        let result = clause.use_statistics(QueryStatistics::new());

        assert!(matches!(result, Err(DatabaseError::Unsupported(_))));
        assert_eq!(clause, before);
    }
}
