/// Receives the warning raised when a calculation is refused.
pub trait Notifier {
    fn warn(&mut self, message: &str);
}

/// Collects messages in order; handy when the caller wants to inspect them.
impl Notifier for Vec<String> {
    fn warn(&mut self, message: &str) {
        self.push(message.to_string());
    }
}
