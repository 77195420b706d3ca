// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use edtcal_ade::FeedConfig;

/// Engine configuration.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct Config {
    /// Timetable name substituted when a query names no one, or uses a
    /// self alias such as `me`.
    #[serde(default)]
    pub default_timetable: Option<String>,

    /// Remote feed endpoint settings.
    #[serde(default)]
    pub feed: FeedConfig,
}
