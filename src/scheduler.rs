use std::cell::RefCell;
use std::rc::Rc;

/// Token for one requested frame. Unique for the lifetime of its scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

/// Host-side "run this on the next display refresh" primitive.
pub trait FrameScheduler {
    fn request_frame(&self) -> FrameHandle;
    /// Revokes a pending request. Unknown, fired or already cancelled
    /// handles are ignored.
    fn cancel(&self, handle: FrameHandle);
}

#[derive(Debug, Default)]
struct RefreshState {
    next_id: u64,
    pending: Vec<FrameHandle>,
    refreshes: u64,
}

/// Single-threaded refresh queue shared between a host loop and the engines
/// it drives. Clones refer to the same queue.
#[derive(Debug, Clone, Default)]
pub struct RefreshLoop {
    state: Rc<RefCell<RefreshState>>,
}

impl RefreshLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// One display refresh: hands back every handle pending right now.
    /// Requests made while dispatching these land on the next refresh.
    pub fn advance(&self) -> Vec<FrameHandle> {
        let mut state = self.state.borrow_mut();
        state.refreshes += 1;
        std::mem::take(&mut state.pending)
    }

    pub fn pending_len(&self) -> usize {
        self.state.borrow().pending.len()
    }

    pub fn refreshes(&self) -> u64 {
        self.state.borrow().refreshes
    }
}

impl FrameScheduler for RefreshLoop {
    fn request_frame(&self) -> FrameHandle {
        let mut state = self.state.borrow_mut();
        let handle = FrameHandle(state.next_id);
        state.next_id += 1;
        state.pending.push(handle);
        handle
    }

    fn cancel(&self, handle: FrameHandle) {
        self.state.borrow_mut().pending.retain(|h| *h != handle);
    }
}
