// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI subsystem for the metamold binary

pub mod batch;
pub mod reporter;

pub use batch::BatchOutcome;
pub use reporter::Reporter;
