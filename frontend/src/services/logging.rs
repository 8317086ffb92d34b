use log::{Level, LevelFilter, Log, Metadata, Record};

/// Browser console logger.
///
/// Components call the `*_with_component` helpers directly; records from the
/// `log` facade (the `shared` crate logs that way) are routed through the same
/// path once `install` has run, with the record target as component.
pub struct Logger;

static LOGGER: Logger = Logger;

impl Logger {
    /// Register as the global `log` backend. Calling it twice is harmless.
    pub fn install(level: LevelFilter) {
        match log::set_logger(&LOGGER) {
            Ok(()) => log::set_max_level(level),
            Err(_) => Self::warn_with_component("logging", "logger already installed"),
        }
    }

    pub fn debug_with_component(component: &str, message: &str) {
        Self::write(Level::Debug, component, message);
    }

    pub fn info_with_component(component: &str, message: &str) {
        Self::write(Level::Info, component, message);
    }

    pub fn warn_with_component(component: &str, message: &str) {
        Self::write(Level::Warn, component, message);
    }

    pub fn error_with_component(component: &str, message: &str) {
        Self::write(Level::Error, component, message);
    }

    fn write(level: Level, component: &str, message: &str) {
        let line = format_line(component, message);
        match level {
            Level::Error => gloo::console::error!(line),
            Level::Warn => gloo::console::warn!(line),
            Level::Info => gloo::console::info!(line),
            Level::Debug | Level::Trace => gloo::console::debug!(line),
        }
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            Self::write(record.level(), component_of(record.target()), &record.args().to_string());
        }
    }

    fn flush(&self) {}
}

fn format_line(component: &str, message: &str) -> String {
    format!("[{}] {}", component, message)
}

/// Last path segment of a module target, e.g. `shared::lead` -> `lead`
fn component_of(target: &str) -> &str {
    target.rsplit("::").next().unwrap_or(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_from_target() {
        assert_eq!(component_of("shared::slot_selection"), "slot_selection");
        assert_eq!(component_of("telegram"), "telegram");
    }

    #[test]
    fn test_line_format() {
        assert_eq!(format_line("hero", "slot selected"), "[hero] slot selected");
    }
}
