// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

/// The logical type of a single result row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ElementType {
    String,
    Int,
    Float,
    Boolean,
    Uuid,
    Timestamp,
    /// A row that is already serialized JSON text and must be passed on as a string
    JsonText,
    /// A composite document type, named for diagnostics
    Document(String),
}

impl ElementType {
    /// Whether a value of this type is a primitive rather than a JSON object/array document.
    pub fn is_simple(&self) -> bool {
        !matches!(self, ElementType::Document(_))
    }
}
