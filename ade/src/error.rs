// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

/// Feed access errors.
#[non_exhaustive]
#[derive(Debug)]
pub enum FeedError {
    /// Transport failure reported by the fetch collaborator.
    Http(String),

    /// Neither payload format could be decoded.
    Unparseable(String),

    /// Decoding succeeded but no usable event remained.
    Empty,

    /// The requested time window ends before it starts.
    InvalidRange,
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(e) => write!(f, "fetch failed: {e}"),
            Self::Unparseable(e) => write!(f, "unparseable payload: {e}"),
            Self::Empty => write!(f, "calendar contains no usable events"),
            Self::InvalidRange => write!(f, "time window ends before it starts"),
        }
    }
}

impl std::error::Error for FeedError {}

impl From<reqwest::Error> for FeedError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e.to_string())
    }
}
