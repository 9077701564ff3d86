use crossterm::{ExecutableCommand, cursor, terminal};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, OnceLock};

mod block;

pub use block::{BlockColor, render_block, visible_width};

pub struct Logger {
    quiet: bool,
    debug: bool,
    current_line: Arc<Mutex<String>>,
}

pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
    Debug,
}

impl Logger {
    #[must_use]
    pub fn new(quiet: bool, debug: bool) -> Self {
        Self {
            quiet,
            debug,
            current_line: Arc::new(Mutex::new(String::new())),
        }
    }

    fn clear_current_line(&self) {
        if self.quiet {
            return;
        }

        let has_pending = self
            .current_line
            .lock()
            .map(|line| !line.is_empty())
            .unwrap_or(false);
        if !has_pending {
            return;
        }

        let mut stdout = io::stdout();
        let _ = stdout.execute(cursor::MoveToColumn(0));
        let _ = stdout.execute(terminal::Clear(terminal::ClearType::CurrentLine));
        let _ = stdout.flush();
    }

    fn update_line(&self, message: &str) {
        if self.quiet {
            return;
        }

        self.clear_current_line();
        print!("{message}");
        let _ = io::stdout().flush();

        if let Ok(mut line) = self.current_line.lock() {
            *line = message.to_string();
        }
    }

    pub fn finish_line(&self, message: &str) {
        if self.quiet {
            return;
        }

        self.clear_current_line();
        println!("{message}");

        if let Ok(mut line) = self.current_line.lock() {
            line.clear();
        }
    }

    pub fn log(&self, level: LogLevel, message: &str) {
        if self.quiet && !matches!(level, LogLevel::Error | LogLevel::Warning) {
            return;
        }
        if matches!(level, LogLevel::Debug) && !self.debug {
            return;
        }

        self.clear_current_line();

        let (prefix, colored_message) = match level {
            LogLevel::Info => (
                "nxui".bright_cyan().bold().to_string(),
                message.white().to_string(),
            ),
            LogLevel::Success => (
                "✓".bright_green().bold().to_string(),
                message.bright_green().to_string(),
            ),
            LogLevel::Warning => (
                "⚠".bright_yellow().bold().to_string(),
                message.bright_yellow().to_string(),
            ),
            LogLevel::Error => (
                "✗".bright_red().bold().to_string(),
                message.bright_red().to_string(),
            ),
            LogLevel::Debug => (
                "•".bright_black().bold().to_string(),
                message.bright_black().to_string(),
            ),
        };

        // Warnings and errors go to stderr so `--json` output stays parseable.
        if matches!(level, LogLevel::Warning | LogLevel::Error) {
            eprintln!("{prefix} {colored_message}");
        } else {
            println!("{prefix} {colored_message}");
        }

        if let Ok(mut line) = self.current_line.lock() {
            line.clear();
        }
    }

    pub fn status(&self, message: &str) {
        if self.quiet {
            return;
        }

        let status_msg = format!("{} {}", "◦".bright_cyan(), message.bright_white());
        self.update_line(&status_msg);
    }

    /// Whether `block` draws `body`. Blocks are results, so quiet mode keeps them.
    pub const fn draws_block(&self, body: &str) -> bool {
        !body.is_empty()
    }

    /// Prints a bordered block. Empty bodies draw nothing.
    pub fn block(&self, label: &str, color: Option<BlockColor>, body: &str) {
        if !self.draws_block(body) {
            return;
        }

        self.clear_current_line();
        println!("{}", render_block(label, color, body));

        if let Ok(mut line) = self.current_line.lock() {
            line.clear();
        }
    }

    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    pub fn success(&self, message: &str) {
        self.log(LogLevel::Success, message);
    }

    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warning, message);
    }

    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }

    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }
}

static LOGGER: OnceLock<Logger> = OnceLock::new();

pub fn init_logger(quiet: bool, debug: bool) {
    let _ = LOGGER.set(Logger::new(quiet, debug));
}

fn get_logger() -> &'static Logger {
    LOGGER.get_or_init(|| Logger::new(false, false))
}

pub fn status(message: &str) {
    get_logger().status(message);
}

pub fn info(message: &str) {
    get_logger().info(message);
}

pub fn success(message: &str) {
    get_logger().success(message);
}

pub fn warn(message: &str) {
    get_logger().warn(message);
}

pub fn error(message: &str) {
    get_logger().error(message);
}

pub fn debug(message: &str) {
    get_logger().debug(message);
}

pub fn block(label: &str, color: Option<BlockColor>, body: &str) {
    get_logger().block(label, color, body);
}

pub fn finish_line(message: &str) {
    get_logger().finish_line(message);
}
