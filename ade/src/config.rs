// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

/// ADE feed endpoint configuration.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct FeedConfig {
    /// URL of the update endpoint serving timetable payloads.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// User agent string.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "https://edt.infuseting.fr/update/index.php".to_string()
}

const fn default_timeout() -> u64 {
    15
}

fn default_user_agent() -> String {
    concat!("edtcal-ade/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}
