// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! # Tracing configuration setup.
//!
//! The library is instrumented with Rust's `tracing` framework. Embedding applications that
//! don't install their own subscriber can call [`init`], which configures console logging based
//! on the `DOC_LOG` environment variable (same conventions as `RUST_LOG`).

use tracing_subscriber::{EnvFilter, filter::LevelFilter};

use crate::env_const::DOC_LOG;

/// Initialize a global `tracing_subscriber::fmt` subscriber filtered by `DOC_LOG`.
///
/// Panics if a global subscriber has already been installed.
pub fn init() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .with_env_var(DOC_LOG)
        .from_env_lossy();

    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(filter)
        .init();
}
