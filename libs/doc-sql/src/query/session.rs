// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

/// Per-request context threaded through SQL generation and result handling.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuerySession {
    tenant_id: Option<String>,
}

impl QuerySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// A session whose queries against multi-tenanted tables only see this tenant's documents.
    pub fn for_tenant(tenant_id: impl Into<String>) -> Self {
        Self {
            tenant_id: Some(tenant_id.into()),
        }
    }

    pub fn tenant_id(&self) -> Option<&str> {
        self.tenant_id.as_deref()
    }
}
