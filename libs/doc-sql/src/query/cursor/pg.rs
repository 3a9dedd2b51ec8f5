// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::pin::Pin;

use async_trait::async_trait;
use futures::StreamExt;
use tokio_postgres::{Row, RowStream};

use crate::{database_error::DatabaseError, sql::raw_json_text::RawJsonText};

use super::{RowCursor, TextStream};

/// A cursor over rows streamed from Postgres. Only the current row is held in memory.
pub struct PgRowCursor {
    rows: Pin<Box<RowStream>>,
    current: Option<Row>,
}

impl PgRowCursor {
    pub fn new(rows: RowStream) -> Self {
        Self {
            rows: Box::pin(rows),
            current: None,
        }
    }

    fn current(&self) -> Result<&Row, DatabaseError> {
        self.current
            .as_ref()
            .ok_or_else(|| DatabaseError::Validation("Cursor is not positioned on a row".into()))
    }
}

#[async_trait]
impl RowCursor for PgRowCursor {
    async fn advance(&mut self) -> Result<bool, DatabaseError> {
        self.current = self.rows.next().await.transpose()?;
        Ok(self.current.is_some())
    }

    fn text_stream(&mut self, column: usize) -> Result<TextStream<'_>, DatabaseError> {
        let text: RawJsonText<'_> = self.current()?.try_get(column)?;
        Ok(Box::new(text.as_str().as_bytes()))
    }

    fn get_text(&self, column: usize) -> Result<Option<String>, DatabaseError> {
        let text: Option<RawJsonText<'_>> = self.current()?.try_get(column)?;
        Ok(text.map(|text| text.as_str().to_string()))
    }

    fn get_i64(&self, column: usize) -> Result<Option<i64>, DatabaseError> {
        Ok(self.current()?.try_get(column)?)
    }
}
