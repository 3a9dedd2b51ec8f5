// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::{
    Arc,
    atomic::{AtomicI64, Ordering},
};

/// Total number of rows matching a query, ignoring its LIMIT/OFFSET. Used to compute paging
/// metadata.
///
/// Cloning shares the underlying counter: the caller keeps one clone and hands another to the
/// query, which fills it in while reading rows.
#[derive(Debug, Clone, Default)]
pub struct QueryStatistics {
    total_results: Arc<AtomicI64>,
}

impl QueryStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_results(&self) -> i64 {
        self.total_results.load(Ordering::SeqCst)
    }

    pub(crate) fn record_total_results(&self, total: i64) {
        self.total_results.store(total, Ordering::SeqCst);
    }
}

impl PartialEq for QueryStatistics {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.total_results, &other.total_results)
    }
}
