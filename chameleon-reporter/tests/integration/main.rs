// Copyright (c) The chameleon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Replays recorded event streams through the reporter.

mod fixtures;
mod replay;
