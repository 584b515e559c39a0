// farecard/src/channel/mock.rs

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::channel::traits::LineChannel;
use crate::{Error, Result};

#[derive(Debug, Default)]
struct ChannelState {
    inbound: VecDeque<String>,
    sent: Vec<String>,
    /// (trigger prefix, reply): when a sent line starts with the trigger the
    /// reply is queued inbound, once.
    scripted: Vec<(String, String)>,
    fail_sends: bool,
}

/// Mock host link for unit tests. It records sent lines and returns queued
/// inbound lines; scripted replies let a test play the host side of a
/// conversation. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MockChannel {
    state: Rc<RefCell<ChannelState>>,
}

impl MockChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a line that is available immediately.
    pub fn push_line(&self, line: &str) {
        self.state.borrow_mut().inbound.push_back(line.to_string());
    }

    /// Queue `reply` as soon as the terminal sends a line starting with
    /// `trigger`.
    pub fn reply_to(&self, trigger: &str, reply: &str) {
        self.state
            .borrow_mut()
            .scripted
            .push((trigger.to_string(), reply.to_string()));
    }

    /// Make every subsequent `send_line` fail (for tests).
    pub fn set_fail_sends(&self, fail: bool) {
        self.state.borrow_mut().fail_sends = fail;
    }

    pub fn sent(&self) -> Vec<String> {
        self.state.borrow().sent.clone()
    }

    pub fn last_sent(&self) -> Option<String> {
        self.state.borrow().sent.last().cloned()
    }

    pub fn clear_sent(&self) {
        self.state.borrow_mut().sent.clear();
    }

    pub fn pending(&self) -> usize {
        self.state.borrow().inbound.len()
    }
}

impl LineChannel for MockChannel {
    fn send_line(&mut self, line: &str) -> Result<()> {
        let mut s = self.state.borrow_mut();
        if s.fail_sends {
            return Err(Error::Channel("send failed".into()));
        }
        s.sent.push(line.to_string());
        if let Some(pos) = s
            .scripted
            .iter()
            .position(|(trigger, _)| line.starts_with(trigger.as_str()))
        {
            let (_, reply) = s.scripted.remove(pos);
            s.inbound.push_back(reply);
        }
        Ok(())
    }

    fn poll_line(&mut self) -> Result<Option<String>> {
        Ok(self.state.borrow_mut().inbound.pop_front())
    }
}
