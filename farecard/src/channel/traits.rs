// farecard/src/channel/traits.rs

use crate::Result;

/// Line-oriented link to the host controller.
pub trait LineChannel {
    /// Send one line; the implementation appends the terminator.
    fn send_line(&mut self, line: &str) -> Result<()>;

    /// Return the next complete inbound line without blocking, or `None`
    /// when nothing has arrived yet. The terminator is stripped.
    fn poll_line(&mut self) -> Result<Option<String>>;
}
