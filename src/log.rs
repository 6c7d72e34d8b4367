//! Colored output macros shared by the binary and the library.
//!
//! Every line is `<tag>: <message>`. Colors are only emitted when the
//! target stream supports them.

/// Environment variable that turns on [`trace!`] output.
pub const TRACE_VAR: &str = "CREATE_FRONTEND_TRACE";

#[macro_export]
macro_rules! error {
    ($fmt:literal $($arg:tt)*) => {
        {
            use owo_colors::OwoColorize;

            eprintln!(
                "{}: {}",
                "error".if_supports_color(owo_colors::Stream::Stderr, |s| s
                        .style(owo_colors::Style::new().bold().red())),
                format_args!($fmt $($arg)*)
            );
        }
    };
    ($single:expr) => {
        {
            use owo_colors::OwoColorize;

            eprintln!(
                "{}: {}",
                "error".if_supports_color(owo_colors::Stream::Stderr, |s| s
                        .style(owo_colors::Style::new().bold().red())),
                $single
            );
        }
    }
}

#[macro_export]
macro_rules! info {
    ($fmt:literal $($arg:tt)*) => {
        {
            use owo_colors::OwoColorize;

            println!(
                "{}: {}",
                "info".if_supports_color(owo_colors::Stream::Stdout, |s| s
                        .style(owo_colors::Style::new().bold().green())),
                format_args!($fmt $($arg)*)
            );
        }
    };
    ($single:expr) => {
        {
            use owo_colors::OwoColorize;

            println!(
                "{}: {}",
                "info".if_supports_color(owo_colors::Stream::Stdout, |s| s
                        .style(owo_colors::Style::new().bold().green())),
                $single
            );
        }
    };
}

#[macro_export]
macro_rules! warn {
    ($fmt:literal $($arg:tt)*) => {
        {
            use owo_colors::OwoColorize;

            eprintln!(
                "{}: {}",
                "warning".if_supports_color(owo_colors::Stream::Stderr, |s| s
                        .style(owo_colors::Style::new().bold().yellow())),
                format_args!($fmt $($arg)*)
            );
        }
    };
    ($single:expr) => {
        {
            use owo_colors::OwoColorize;

            eprintln!(
                "{}: {}",
                "warning".if_supports_color(owo_colors::Stream::Stderr, |s| s
                        .style(owo_colors::Style::new().bold().yellow())),
                $single
            );
        }
    };
}

#[macro_export]
macro_rules! trace {
    ($($arg:tt)+) => {
        {
            use owo_colors::OwoColorize;

            if std::env::var($crate::log::TRACE_VAR).is_ok() {
                println!(
                    "{}: {}",
                    "trace".if_supports_color(owo_colors::Stream::Stdout, |s| s
                            .style(owo_colors::Style::new().bold().dimmed())),
                    format_args!($($arg)*)
                );
            }
        }
    }
}
