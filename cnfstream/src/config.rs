//! Parser configuration.
use crate::log::{HasLogger, Logger};

/// Number of bytes requested from a source per chunk unless configured otherwise.
pub const DEFAULT_CHUNK_SIZE: usize = 1 << 16;

/// Configuration shared by the DIMACS CNF and DRAT parsers.
#[derive(Clone, Debug)]
pub struct Config {
    chunk_size: usize,
    logger: Logger,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            chunk_size: DEFAULT_CHUNK_SIZE,
            logger: Logger::default(),
        }
    }
}

impl Config {
    /// Sets the number of bytes requested from the source per chunk.
    ///
    /// Chunks are extended past this size when they would otherwise end within a token. A size of
    /// zero is treated as one.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Number of bytes requested from the source per chunk.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Mutable access to the logger, e.g. to change the log level.
    pub fn logger_mut(&mut self) -> &mut Logger {
        &mut self.logger
    }
}

impl HasLogger for Config {
    #[inline(always)]
    fn logger(&self) -> &Logger {
        &self.logger
    }
}
