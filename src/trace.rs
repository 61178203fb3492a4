use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A `fmt::Write` sink whose clones share one buffer: hand one clone to
/// `Tree::with_debug_writer` and read the trace through another.
#[derive(Clone, Default)]
pub struct TraceBuffer(Rc<RefCell<String>>);

impl fmt::Write for TraceBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.borrow_mut().write_str(s)
    }
}

impl TraceBuffer {
    pub fn new() -> Self {
        TraceBuffer::default()
    }

    pub fn contents(&self) -> String {
        self.0.borrow().clone()
    }

    /// Returns what has been written so far and empties the buffer.
    pub fn take(&self) -> String {
        std::mem::take(&mut *self.0.borrow_mut())
    }
}
