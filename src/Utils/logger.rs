//! Logging setup for the binary and for anyone embedding the crate. The library itself only
//! talks to the `log` facade.
use log::info;
use simplelog::*;
use std::fs::File;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("loglevel must be debug, info, warn, error or off, got '{0}'")]
    UnknownLevel(String),
    #[error("cannot create log file: {0}")]
    Io(#[from] std::io::Error),
    #[error("logger already initialized: {0}")]
    AlreadyInitialized(#[from] log::SetLoggerError),
}

pub fn parse_level(level: &str) -> Result<LevelFilter, LoggerError> {
    match level.to_lowercase().as_str() {
        "debug" => Ok(LevelFilter::Debug),
        "info" => Ok(LevelFilter::Info),
        "warn" => Ok(LevelFilter::Warn),
        "error" => Ok(LevelFilter::Error),
        "off" => Ok(LevelFilter::Off),
        other => Err(LoggerError::UnknownLevel(other.to_string())),
    }
}

/// Terminal logger, plus a file logger if `log_file` is given.
pub fn init_logger(level: &str, log_file: Option<&str>) -> Result<(), LoggerError> {
    let log_option = parse_level(level)?;
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        log_option,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    if let Some(name) = log_file {
        loggers.push(WriteLogger::new(log_option, Config::default(), File::create(name)?));
    }
    CombinedLogger::init(loggers)?;
    info!("logging started with loglevel {}", log_option);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("info").unwrap(), LevelFilter::Info);
        assert_eq!(parse_level("DEBUG").unwrap(), LevelFilter::Debug);
        assert!(matches!(
            parse_level("verbose"),
            Err(LoggerError::UnknownLevel(level)) if level == "verbose"
        ));
    }
}
