// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

pub const DOC_POSTGRES_URL: &str = "DOC_POSTGRES_URL";
pub const DOC_POSTGRES_USER: &str = "DOC_POSTGRES_USER";
pub const DOC_POSTGRES_PASSWORD: &str = "DOC_POSTGRES_PASSWORD";
pub const DOC_CONNECTION_POOL_SIZE: &str = "DOC_CONNECTION_POOL_SIZE";
pub const DOC_CHECK_CONNECTION_ON_STARTUP: &str = "DOC_CHECK_CONNECTION_ON_STARTUP";

pub const DOC_LOG: &str = "DOC_LOG";
