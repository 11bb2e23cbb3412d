/// Lines of log kept for display
pub const SCROLLBACK_LINES: usize = 1000;

/// Longer lines are truncated before being logged
pub const MAX_LINE_LENGTH: usize = 256;

/// Samples kept on the chart (at one per second, 10 minutes)
pub const HISTORY: usize = 600;
