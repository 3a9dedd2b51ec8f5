// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::vec::IntoIter;

use async_trait::async_trait;

use crate::database_error::DatabaseError;

use super::{RowCursor, TextStream};

/// A cursor over rows that have already been materialized. Useful to feed handlers with results
/// that didn't come from a live connection (and in tests).
pub struct InMemoryCursor {
    rows: IntoIter<Vec<Option<String>>>,
    current: Option<Vec<Option<String>>>,
}

impl InMemoryCursor {
    pub fn new(rows: Vec<Vec<Option<String>>>) -> Self {
        Self {
            rows: rows.into_iter(),
            current: None,
        }
    }

    /// Single-column rows, one per text.
    pub fn from_texts<T: Into<String>>(texts: impl IntoIterator<Item = T>) -> Self {
        Self::new(
            texts
                .into_iter()
                .map(|text| vec![Some(text.into())])
                .collect(),
        )
    }

    fn value(&self, column: usize) -> Result<Option<&str>, DatabaseError> {
        let row = self
            .current
            .as_ref()
            .ok_or_else(|| DatabaseError::Validation("Cursor is not positioned on a row".into()))?;

        row.get(column)
            .map(|value| value.as_deref())
            .ok_or_else(|| {
                DatabaseError::Validation(format!(
                    "Column {column} out of range (row has {} columns)",
                    row.len()
                ))
            })
    }
}

#[async_trait]
impl RowCursor for InMemoryCursor {
    async fn advance(&mut self) -> Result<bool, DatabaseError> {
        self.current = self.rows.next();
        Ok(self.current.is_some())
    }

    fn text_stream(&mut self, column: usize) -> Result<TextStream<'_>, DatabaseError> {
        match self.value(column)? {
            Some(text) => Ok(Box::new(text.as_bytes())),
            None => Err(DatabaseError::Validation(format!(
                "Unexpected NULL in column {column}"
            ))),
        }
    }

    fn get_text(&self, column: usize) -> Result<Option<String>, DatabaseError> {
        Ok(self.value(column)?.map(str::to_string))
    }

    fn get_i64(&self, column: usize) -> Result<Option<i64>, DatabaseError> {
        self.value(column)?
            .map(|text| {
                text.parse().map_err(|_| {
                    DatabaseError::Validation(format!("Column {column} is not an integer: {text}"))
                })
            })
            .transpose()
    }
}
