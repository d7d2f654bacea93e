use colored::{ColoredString, Colorize};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Error,
    Warn,
    Info,
    Debug,
}

impl Level {
    fn tag(self) -> ColoredString {
        match self {
            Level::Error => "ERR".bold().red(),
            Level::Warn => "WRN".bold().yellow(),
            Level::Info => "INF".bold().blue(),
            Level::Debug => "DBG".bold().magenta(),
        }
    }
}

/// Status lines go to stderr so rendered pages on stdout stay clean.
#[derive(Clone, Copy, Debug, Default)]
pub struct Console {
    verbose: u8,
}

impl Console {
    pub fn new(verbose: u8) -> Self {
        Self { verbose }
    }

    pub fn enabled(&self, level: Level) -> bool {
        match level {
            Level::Debug => self.verbose > 0,
            _ => true,
        }
    }

    pub fn line(&self, level: Level, message: &str) -> Option<String> {
        if !self.enabled(level) {
            return None;
        }
        Some(format!(
            "{}{}{} {}",
            "[".bold().white(),
            level.tag(),
            "]".bold().white(),
            message
        ))
    }

    pub fn log(&self, level: Level, message: &str) {
        if let Some(line) = self.line(level, message) {
            eprintln!("{line}");
        }
    }

    pub fn error(&self, message: &str) {
        self.log(Level::Error, message);
    }

    pub fn warn(&self, message: &str) {
        self.log(Level::Warn, message);
    }

    pub fn info(&self, message: &str) {
        self.log(Level::Info, message);
    }

    pub fn debug(&self, message: &str) {
        self.log(Level::Debug, message);
    }
}
