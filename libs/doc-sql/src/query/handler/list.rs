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

use crate::{
    database_error::DatabaseError,
    query::{cursor::RowCursor, selector::Selector, session::QuerySession, statement::Statement},
    sql::SQLBuilder,
};

use super::{ResultHandler, cancellable};

/// Resolves every row with its selector, in cursor order.
pub struct ListQueryHandler<S> {
    statement: Arc<Statement>,
    selector: S,
}

impl<S: Selector> ListQueryHandler<S> {
    pub fn new(statement: Arc<Statement>, selector: S) -> Self {
        Self {
            statement,
            selector,
        }
    }

    pub fn selector(&self) -> &S {
        &self.selector
    }
}

#[async_trait]
impl<S: Selector> ResultHandler for ListQueryHandler<S> {
    type Output = Vec<S::Output>;

    fn configure_command(&self, builder: &mut SQLBuilder, session: &QuerySession) {
        self.statement.configure(builder, session);
    }

    async fn handle_async(
        &self,
        cursor: &mut dyn RowCursor,
        _session: &QuerySession,
        cancellation: &CancellationToken,
    ) -> Result<Self::Output, DatabaseError> {
        let mut values = vec![];

        while cancellable(cancellation, cursor.advance()).await? {
            values.push(self.selector.resolve(&*cursor)?);
        }

        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{
        query::{
            cursor::in_memory::InMemoryCursor,
            selector::{Document, DocumentSelector},
        },
        sql::document_table::DocumentTable,
    };

    #[tokio::test]
    async fn documents_in_order() {
        let statement = Statement::new(DocumentTable::new("people"), "Person");
        let handler = ListQueryHandler::new(Arc::new(statement), DocumentSelector::default());

        let mut cursor = InMemoryCursor::new(vec![
            vec![Some("p2".into()), Some(r#"{"name":"Bo"}"#.into())],
            vec![Some("p1".into()), Some(r#"{"name":"Al"}"#.into())],
        ]);

        let documents = handler
            .handle_async(&mut cursor, &QuerySession::new(), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(
            documents,
            vec![
                Document {
                    id: "p2".into(),
                    data: json!({"name": "Bo"}),
                },
                Document {
                    id: "p1".into(),
                    data: json!({"name": "Al"}),
                },
            ]
        );
    }

    #[tokio::test]
    async fn cancelled() {
        let statement = Statement::new(DocumentTable::new("people"), "Person");
        let handler = ListQueryHandler::new(Arc::new(statement), DocumentSelector::default());

        let cancellation = CancellationToken::new();
        cancellation.cancel();

        let err = handler
            .handle_async(
                &mut InMemoryCursor::new(vec![vec![Some("p1".into()), Some("{}".into())]]),
                &QuerySession::new(),
                &cancellation,
            )
            .await
            .unwrap_err();

        assert!(err.is_cancelled());
    }
}
