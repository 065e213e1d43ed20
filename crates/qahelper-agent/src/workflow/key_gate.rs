//! Duplicate suppression for issue-key detection errors

/// Remembers the last `(message, href)` shown so a page that keeps failing detection the
/// same way does not notify again.
#[derive(Debug, Default)]
pub struct KeyErrorGate {
    last: Option<(String, String)>,
}

impl KeyErrorGate {
    /// Returns true when this pair was not the last one shown, and records it
    pub fn admit(&mut self, message: &str, href: &str) -> bool {
        let repeated = self
            .last
            .as_ref()
            .is_some_and(|(m, h)| m == message && h == href);
        if repeated {
            return false;
        }
        self.last = Some((message.to_string(), href.to_string()));
        true
    }

    /// Forget the last error after a successful detection
    pub fn reset(&mut self) {
        self.last = None;
    }
}
