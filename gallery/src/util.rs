/// Logs a failure the server cannot recover from on its own.
#[macro_export]
macro_rules! critical {
    ($($arg:tt)+) => {
        error!(target: "gallery::critical", "CRITICAL: {}", format_args!($($arg)+))
    };
}

/// Logs a broken invariant of the session state.
#[macro_export]
macro_rules! bug {
    ($($arg:tt)+) => {
        error!(target: "gallery::bug", "BUG: {}", format_args!($($arg)+))
    };
}
