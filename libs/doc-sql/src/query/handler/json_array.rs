// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

use crate::{
    database_error::DatabaseError,
    query::{
        cursor::RowCursor, element_type::ElementType, session::QuerySession, statement::Statement,
    },
    sql::SQLBuilder,
};

use super::{ResultHandler, cancellable, drain_text};

/// Assembles the raw JSON text of every row into one JSON array.
///
/// Composite documents are complete JSON values and are joined as-is: `[r1,r2]`. Primitive
/// documents are stored as a single member (`"value":...`), so each row is wrapped in its own
/// object: `[{r1},{r2}]`.
///
/// Rows are copied straight from the cursor's text stream; nothing is parsed or validated.
#[derive(Debug)]
pub struct JsonArrayHandler {
    statement: Arc<Statement>,
    element_type: ElementType,
    prefix: &'static str,
    separator: &'static str,
    suffix: &'static str,
}

impl JsonArrayHandler {
    pub fn new(statement: Arc<Statement>, element_type: ElementType) -> Self {
        let (prefix, separator, suffix) = if element_type.is_simple() {
            ("[{", "},{", "}]")
        } else {
            ("[", ",", "]")
        };

        Self {
            statement,
            element_type,
            prefix,
            separator,
            suffix,
        }
    }

    /// The element type of the documents being assembled (not the JSON text type of each row).
    pub fn element_type(&self) -> &ElementType {
        &self.element_type
    }

    pub fn statement(&self) -> &Arc<Statement> {
        &self.statement
    }
}

#[async_trait]
impl ResultHandler for JsonArrayHandler {
    type Output = String;

    fn configure_command(&self, builder: &mut SQLBuilder, session: &QuerySession) {
        self.statement.configure(builder, session);
    }

    #[instrument(
        name = "JsonArrayHandler::handle_async",
        skip_all,
        fields(element_type = ?self.element_type)
    )]
    async fn handle_async(
        &self,
        cursor: &mut dyn RowCursor,
        _session: &QuerySession,
        cancellation: &CancellationToken,
    ) -> Result<String, DatabaseError> {
        let mut json = String::from(self.prefix);
        let mut rows = 0usize;

        while cancellable(cancellation, cursor.advance()).await? {
            if rows > 0 {
                json.push_str(self.separator);
            }
            drain_text(cursor, 0, &mut json, cancellation).await?;
            rows += 1;
        }

        json.push_str(self.suffix);

        debug!(rows, bytes = json.len(), "Assembled JSON array");

        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use test_log::test;

    use super::*;
    use crate::{
        query::cursor::{TextStream, in_memory::InMemoryCursor},
        sql::document_table::DocumentTable,
    };

    fn people_handler(element_type: ElementType) -> JsonArrayHandler {
        let statement = Statement::new(DocumentTable::new("people"), "Person").into_json();
        JsonArrayHandler::new(Arc::new(statement), element_type)
    }

    fn person() -> ElementType {
        ElementType::Document("Person".into())
    }

    #[test]
    fn composite_documents() {
        let handler = people_handler(person());
        let mut cursor = InMemoryCursor::from_texts([r#"{"name":"Al"}"#, r#"{"name":"Bo"}"#]);

        let json = handler.handle(&mut cursor, &QuerySession::new()).unwrap();

        assert_eq!(json, r#"[{"name":"Al"},{"name":"Bo"}]"#);
    }

    #[test]
    fn single_composite_document() {
        let handler = people_handler(person());
        let mut cursor = InMemoryCursor::from_texts([r#"{"name":"Al"}"#]);

        let json = handler.handle(&mut cursor, &QuerySession::new()).unwrap();

        assert_eq!(json, r#"[{"name":"Al"}]"#);
    }

    #[test]
    fn simple_documents_are_wrapped_per_row() {
        let handler = people_handler(ElementType::String);
        let mut cursor =
            InMemoryCursor::from_texts([r#""value":"hello""#, r#""value":"bye""#]);

        let json = handler.handle(&mut cursor, &QuerySession::new()).unwrap();

        assert_eq!(json, r#"[{"value":"hello"},{"value":"bye"}]"#);
    }

    #[test]
    fn empty_results() {
        let session = QuerySession::new();

        let mut cursor = InMemoryCursor::from_texts(Vec::<String>::new());
        assert_eq!(
            people_handler(person()).handle(&mut cursor, &session).unwrap(),
            "[]"
        );

        let mut cursor = InMemoryCursor::from_texts(Vec::<String>::new());
        assert_eq!(
            people_handler(ElementType::Int)
                .handle(&mut cursor, &session)
                .unwrap(),
            "[{}]"
        );
    }

    #[test]
    fn malformed_text_passes_through() {
        let handler = people_handler(person());
        let mut cursor = InMemoryCursor::from_texts([r#"{"name":"#, "]"]);

        let json = handler.handle(&mut cursor, &QuerySession::new()).unwrap();

        assert_eq!(json, r#"[{"name":,]]"#);
    }

    #[test]
    fn blocking_and_suspending_agree() {
        let rows = [r#"{"name":"Al","tags":["a","b"]}"#, "{}", r#"{"name":"Cy"}"#];

        for element_type in [person(), ElementType::String] {
            let handler = people_handler(element_type);
            let session = QuerySession::new();

            let blocking = handler
                .handle(&mut InMemoryCursor::from_texts(rows), &session)
                .unwrap();
            let suspending = futures::executor::block_on(handler.handle_async(
                &mut InMemoryCursor::from_texts(rows),
                &session,
                &CancellationToken::new(),
            ))
            .unwrap();

            assert_eq!(blocking, suspending);
        }
    }

    #[test(tokio::test)]
    async fn blocking_inside_runtime_is_refused() {
        let handler = people_handler(person());
        let mut cursor = InMemoryCursor::from_texts([r#"{"name":"Al"}"#]);

        let err = handler
            .handle(&mut cursor, &QuerySession::new())
            .unwrap_err();
        assert!(matches!(err, DatabaseError::Unsupported(_)));

        let json = handler
            .handle_async(&mut cursor, &QuerySession::new(), &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(json, r#"[{"name":"Al"}]"#);
    }

    #[test(tokio::test)]
    async fn cancelled_before_first_row() {
        let handler = people_handler(person());
        let mut cursor = InMemoryCursor::from_texts([r#"{"name":"Al"}"#]);

        let cancellation = CancellationToken::new();
        cancellation.cancel();

        let err = handler
            .handle_async(&mut cursor, &QuerySession::new(), &cancellation)
            .await
            .unwrap_err();

        assert!(matches!(err, DatabaseError::Cancelled));
    }

    /// Cancels the token when asked for the given row.
    struct CancellingCursor {
        inner: InMemoryCursor,
        cancellation: CancellationToken,
        cancel_at: usize,
        advanced: usize,
    }

    #[async_trait]
    impl RowCursor for CancellingCursor {
        async fn advance(&mut self) -> Result<bool, DatabaseError> {
            self.advanced += 1;
            if self.advanced == self.cancel_at {
                self.cancellation.cancel();
            }
            self.inner.advance().await
        }

        fn text_stream(&mut self, column: usize) -> Result<TextStream<'_>, DatabaseError> {
            self.inner.text_stream(column)
        }

        fn get_text(&self, column: usize) -> Result<Option<String>, DatabaseError> {
            self.inner.get_text(column)
        }

        fn get_i64(&self, column: usize) -> Result<Option<i64>, DatabaseError> {
            self.inner.get_i64(column)
        }
    }

    #[test(tokio::test)]
    async fn cancelled_mid_stream() {
        let handler = people_handler(person());
        let cancellation = CancellationToken::new();
        let mut cursor = CancellingCursor {
            inner: InMemoryCursor::from_texts([
                r#"{"name":"Al"}"#,
                r#"{"name":"Bo"}"#,
                r#"{"name":"Cy"}"#,
            ]),
            cancellation: cancellation.clone(),
            cancel_at: 2,
            advanced: 0,
        };

        let err = handler
            .handle_async(&mut cursor, &QuerySession::new(), &cancellation)
            .await
            .unwrap_err();

        assert!(matches!(err, DatabaseError::Cancelled));
        assert_eq!(cursor.advanced, 2);
    }

    #[test(tokio::test)]
    async fn null_document_is_an_error() {
        let handler = people_handler(person());
        let mut cursor = InMemoryCursor::new(vec![vec![Some("{}".into())], vec![None]]);

        let err = handler
            .handle_async(&mut cursor, &QuerySession::new(), &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, DatabaseError::Validation(_)));
    }

    #[test]
    fn configures_through_the_statement() {
        let handler = people_handler(person());
        let mut builder = SQLBuilder::new();

        handler.configure_command(&mut builder, &QuerySession::new());

        assert_binding!(builder.into_sql(), "select d.data from people as d");
    }
}
