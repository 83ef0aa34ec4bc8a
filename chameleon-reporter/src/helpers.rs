// Copyright (c) The chameleon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Utilities for pluralizing various words based on count or plurality.
pub(crate) mod plural {
    /// Returns "sec" if `plural` is false, otherwise "secs".
    pub(crate) fn secs_plural_if(plural: bool) -> &'static str {
        if plural { "secs" } else { "sec" }
    }

    /// Returns "min" if `count` is 1, otherwise "mins".
    pub(crate) fn mins_str(count: u64) -> &'static str {
        if count == 1 { "min" } else { "mins" }
    }
}
