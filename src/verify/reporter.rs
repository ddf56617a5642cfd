//! Line-oriented user-facing output

/// Receives the human-readable report, one line at a time
pub trait Reporter: Send + Sync {
    fn info(&self, line: &str);
}

/// Writes report lines to standard output
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn info(&self, line: &str) {
        println!("{line}");
    }
}
