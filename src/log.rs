use chrono::Utc;
use std::fs::OpenOptions;
use std::io::Write;
use std::sync::{Mutex, OnceLock};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    #[allow(dead_code)]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn label(self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }
}

// Opened lazily on first use; a run with no swallowed failures never writes it.
fn log_file() -> &'static Mutex<Option<std::fs::File>> {
    static FILE: OnceLock<Mutex<Option<std::fs::File>>> = OnceLock::new();
    FILE.get_or_init(|| {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/pickr.log")
            .ok();
        Mutex::new(file)
    })
}

pub fn push(level: LogLevel, msg: String) {
    if let Ok(mut guard) = log_file().lock() {
        if let Some(ref mut file) = *guard {
            let _ = writeln!(
                file,
                "[{}] {} {}",
                Utc::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                level.label(),
                msg
            );
        }
    }
}

#[macro_export]
macro_rules! tlog {
    (info, $($arg:tt)*) => {
        $crate::log::push($crate::log::LogLevel::Info, format!($($arg)*))
    };
    (warn, $($arg:tt)*) => {
        $crate::log::push($crate::log::LogLevel::Warn, format!($($arg)*))
    };
    (error, $($arg:tt)*) => {
        $crate::log::push($crate::log::LogLevel::Error, format!($($arg)*))
    };
}
