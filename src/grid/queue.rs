/// Single-flight flag for deferred work.
///
/// The first request arms the queue and returns `true` so the caller can ask
/// its scheduler for a callback; further requests coalesce until the work is
/// taken.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UpdateQueue {
    pending: bool,
}

impl UpdateQueue {
    pub fn request(&mut self) -> bool {
        !std::mem::replace(&mut self.pending, true)
    }

    /// Disarm the queue, returning whether work was pending.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requests_coalesce() {
        let mut queue = UpdateQueue::default();
        assert!(queue.request());
        assert!(!queue.request());
        assert!(queue.is_pending());
        assert!(queue.take());
        assert!(!queue.take());
        assert!(queue.request());
    }
}
