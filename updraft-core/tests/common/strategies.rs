// SPDX-FileCopyrightText: 2026 Updraft Contributors
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Proptest Strategies
//!
//! Reusable proptest strategies for property-based testing.

use proptest::prelude::*;

/// Strategy for the prior content of a local resource (non-empty).
pub fn resource_content_strategy() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(any::<u8>(), 1..512)
}

/// Strategy for a replacement body large enough to fault mid-stream.
pub fn replacement_body_strategy() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(any::<u8>(), 64..1024)
}

/// Strategy for transfer buffer sizes.
pub fn buffer_size_strategy() -> impl Strategy<Value = usize> {
    1usize..128
}

/// Strategy for a fault offset that lands inside any replacement body.
pub fn fault_offset_strategy() -> impl Strategy<Value = u64> {
    0u64..64
}
