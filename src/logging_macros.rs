#![warn(clippy::all, rust_2018_idioms)]

/// Unified logging macros carrying file, module and line context.
/// Catalog loading runs once, so every message goes to both `log` and `tracing`
/// consumers without flooding either.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        let message = format!($($arg)*);
        log::debug!("[{}:{}:{}] {}", file!(), module_path!(), line!(), message);
        tracing::debug!("[{}:{}:{}] {}", file!(), module_path!(), line!(), message);
    }};
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {{
        let message = format!($($arg)*);
        log::info!("[{}:{}:{}] {}", file!(), module_path!(), line!(), message);
        tracing::info!("[{}:{}:{}] {}", file!(), module_path!(), line!(), message);
    }};
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        let message = format!($($arg)*);
        log::warn!("[{}:{}:{}] {}", file!(), module_path!(), line!(), message);
        tracing::warn!("[{}:{}:{}] {}", file!(), module_path!(), line!(), message);
    }};
}

/// Tracing-only variant, for per-entry detail that log consumers never need.
#[macro_export]
macro_rules! trace_trace {
    ($($arg:tt)*) => {
        tracing::trace!("[{}:{}:{}] {}", file!(), module_path!(), line!(), format!($($arg)*));
    };
}

/*
Log level guidelines for the catalog:

TRACE: per-entry work
- icon resolution for a single descriptor
- key lookups while resolving a service or link

DEBUG: table-level progress
- a descriptor table finished loading
- a diagram view was assembled

INFO: completed catalog loads with entry counts

WARN: fallbacks
- configuration file missing or unreadable, defaults used
*/
