use std::io::{stdout, Stdout, Write};

/// Destination for the debug dumps of a request builder.
pub trait Logger {
    fn log(&mut self, message: &str) -> anyhow::Result<()>;
}

/// Writes each message on its own line to the wrapped writer.
pub struct WriterLogger<W: Write> {
    writer: W,
}

impl<W: Write> WriterLogger<W> {
    pub fn new(writer: W) -> WriterLogger<W> {
        WriterLogger { writer }
    }
}

impl WriterLogger<Stdout> {
    pub fn stdout() -> WriterLogger<Stdout> {
        WriterLogger::new(stdout())
    }
}

impl<W: Write> Logger for WriterLogger<W> {
    fn log(&mut self, message: &str) -> anyhow::Result<()> {
        self.writer.write_all(message.as_bytes())?;
        if !message.ends_with('\n') {
            self.writer.write_all(b"\n")?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

/// Forwards messages to the `log` facade at the configured level.
pub struct LogLogger {
    level: log::Level,
}

impl Default for LogLogger {
    fn default() -> Self {
        LogLogger {
            level: log::Level::Debug,
        }
    }
}

impl LogLogger {
    pub fn new(level: log::Level) -> LogLogger {
        LogLogger { level }
    }
}

impl Logger for LogLogger {
    fn log(&mut self, message: &str) -> anyhow::Result<()> {
        log::log!(target: "fluent_http::dump", self.level, "{}", message);
        Ok(())
    }
}

impl<L: Logger + ?Sized> Logger for &mut L {
    fn log(&mut self, message: &str) -> anyhow::Result<()> {
        (**self).log(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writer_logger_terminates_lines() {
        let mut buffer = Vec::new();
        let mut logger = WriterLogger::new(&mut buffer);
        logger.log("first").expect("log works correctly");
        logger.log("second\n").expect("log works correctly");
        assert_eq!(
            String::from_utf8(buffer).expect("is a string"),
            "first\nsecond\n"
        );
    }

    #[test]
    fn borrowed_logger_delegates() {
        let mut buffer = Vec::new();
        {
            let mut inner = WriterLogger::new(&mut buffer);
            let mut borrowed = &mut inner;
            Logger::log(&mut borrowed, "through a reference").expect("log works correctly");
        }
        assert_eq!(
            String::from_utf8(buffer).expect("is a string"),
            "through a reference\n"
        );
    }

    #[test]
    fn log_logger_never_fails() {
        let mut logger = LogLogger::new(log::Level::Info);
        assert!(logger.log("anything").is_ok());
    }
}
