//! Console response formatting

/// Greeting sent when a console session opens
pub const READY: u16 = 220;
/// Reply to QUIT
pub const CLOSING: u16 = 221;

/// Format a console response line
pub fn format_response(code: u16, message: &str) -> String {
    format!("{} {}\n", code, message)
}
