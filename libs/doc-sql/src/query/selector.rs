// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::{Deserialize, Serialize};

use crate::database_error::DatabaseError;

use super::{cursor::RowCursor, statistics::QueryStatistics};

/// Turns the current row of a cursor into a value.
pub trait Selector: Send + Sync {
    type Output: Send;

    fn resolve(&self, cursor: &dyn RowCursor) -> Result<Self::Output, DatabaseError>;
}

impl<S: Selector + ?Sized> Selector for &S {
    type Output = S::Output;

    fn resolve(&self, cursor: &dyn RowCursor) -> Result<Self::Output, DatabaseError> {
        (**self).resolve(cursor)
    }
}

/// Reads the first column as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringValueSelector;

/// The shared selector for any single-column text projection. Stateless, so every clause hands out
/// this one instance.
pub static STRING_VALUE_SELECTOR: StringValueSelector = StringValueSelector;

impl Selector for StringValueSelector {
    type Output = Option<String>;

    fn resolve(&self, cursor: &dyn RowCursor) -> Result<Self::Output, DatabaseError> {
        cursor.get_text(0)
    }
}

/// A hydrated document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub data: serde_json::Value,
}

/// Reads `id` and `data` columns into a [Document]. When statistics were requested, the third
/// column carries the total row count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentSelector {
    statistics: Option<QueryStatistics>,
}

impl DocumentSelector {
    pub fn new(statistics: Option<QueryStatistics>) -> Self {
        Self { statistics }
    }
}

impl Selector for DocumentSelector {
    type Output = Document;

    fn resolve(&self, cursor: &dyn RowCursor) -> Result<Self::Output, DatabaseError> {
        let id = cursor
            .get_text(0)?
            .ok_or_else(|| DatabaseError::Validation("Document id is NULL".into()))?;
        let data = cursor
            .get_text(1)?
            .ok_or_else(|| DatabaseError::Validation(format!("Document {id} has no data")))?;

        if let Some(statistics) = &self.statistics {
            if let Some(total) = cursor.get_i64(2)? {
                statistics.record_total_results(total);
            }
        }

        Ok(Document {
            id,
            data: serde_json::from_str(&data)?,
        })
    }
}

/// A value produced by an [AnySelector].
#[derive(Debug, Clone, PartialEq)]
pub enum SelectedValue {
    Text(Option<String>),
    Document(Document),
}

/// The selector a select clause builds for its projection.
#[derive(Debug, Clone, PartialEq)]
pub enum AnySelector {
    StringValue(&'static StringValueSelector),
    Document(DocumentSelector),
}

impl Selector for AnySelector {
    type Output = SelectedValue;

    fn resolve(&self, cursor: &dyn RowCursor) -> Result<Self::Output, DatabaseError> {
        match self {
            AnySelector::StringValue(selector) => selector.resolve(cursor).map(SelectedValue::Text),
            AnySelector::Document(selector) => selector.resolve(cursor).map(SelectedValue::Document),
        }
    }
}
