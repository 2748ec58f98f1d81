// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for growbuf-string.
use growbuf_alloc::AllocError;
use thiserror::Error;

/// Errors from formatted construction.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum StringError {
    /// Storage for the rendered output could not be obtained.
    #[error("AllocError: {0}")]
    Alloc(#[from] AllocError),

    /// A formatting trait implementation returned an error.
    #[error("formatting failed")]
    Format,
}
