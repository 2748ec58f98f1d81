// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Logging shims. Forward to `tracing` when the `tracing` feature is enabled,
//! expand to nothing otherwise.

#[cfg(feature = "tracing")]
macro_rules! log_trace {
    ($($arg:tt)+) => { tracing::trace!($($arg)+) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! log_trace {
    ($($arg:tt)+) => {};
}

#[cfg(feature = "tracing")]
macro_rules! log_debug {
    ($($arg:tt)+) => { tracing::debug!($($arg)+) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! log_debug {
    ($($arg:tt)+) => {};
}

#[cfg(feature = "tracing")]
macro_rules! log_warn {
    ($($arg:tt)+) => { tracing::warn!($($arg)+) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! log_warn {
    ($($arg:tt)+) => {};
}
