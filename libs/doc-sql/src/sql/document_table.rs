// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::{Deserialize, Serialize};

/// A table storing one kind of document, such as "people" or "orders".
///
/// Every document table has the shape `(id text, data jsonb)`, plus `tenant_id text` when the
/// table is shared by multiple tenants. Queries always alias the table as `d`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentTable {
    /// The name of the table.
    pub name: String,
    /// The schema holding the table. `None` means whatever the connection's search path resolves.
    pub schema: Option<String>,
    /// Whether rows carry a `tenant_id` to scope queries by.
    pub multi_tenanted: bool,
}

impl DocumentTable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema: None,
            multi_tenanted: false,
        }
    }

    pub fn in_schema(self, schema: impl Into<String>) -> Self {
        Self {
            schema: Some(schema.into()),
            ..self
        }
    }

    pub fn with_tenancy(self) -> Self {
        Self {
            multi_tenanted: true,
            ..self
        }
    }

    /// The table reference used after `FROM`, e.g. `public.mt_doc_people`.
    pub fn qualified_name(&self) -> String {
        match &self.schema {
            Some(schema) => format!("{schema}.{}", self.name),
            None => self.name.clone(),
        }
    }
}
