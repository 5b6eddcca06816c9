use std::time::{Duration, Instant};

/// Handle for a pending frame request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameId(u64);

/// Handle for a resize subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(u64);

/// The host environment as the background layer sees it: viewport size on
/// demand, resize subscriptions, and a one-slot "run before next repaint"
/// frame scheduler.
///
/// Everything runs on the event-loop thread. At most one frame is pending at
/// a time; requesting another replaces it.
#[derive(Debug)]
pub struct Host {
    viewport: (f32, f32),
    frame_interval: Duration,
    pending_frame: Option<(FrameId, Instant)>,
    last_frame_at: Option<Instant>,
    listeners: Vec<ListenerId>,
    next_id: u64,
}

impl Host {
    pub fn new(width: f32, height: f32, frame_interval: Duration) -> Self {
        Self {
            viewport: (width, height),
            frame_interval,
            pending_frame: None,
            last_frame_at: None,
            listeners: Vec::new(),
            next_id: 1,
        }
    }

    fn fresh_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Current viewport size in logical pixels
    pub fn viewport(&self) -> (f32, f32) {
        self.viewport
    }

    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    // === Frame scheduling ===

    /// Ask for a frame callback at the next repaint opportunity
    pub fn request_frame(&mut self) -> FrameId {
        let id = FrameId(self.fresh_id());
        let due = match self.last_frame_at {
            Some(last) => last + self.frame_interval,
            None => Instant::now(),
        };
        self.pending_frame = Some((id, due));
        id
    }

    /// Drop a pending request. Unknown or stale ids are ignored.
    pub fn cancel_frame(&mut self, id: FrameId) {
        if matches!(self.pending_frame, Some((pending, _)) if pending == id) {
            self.pending_frame = None;
        }
    }

    pub fn pending_frames(&self) -> usize {
        usize::from(self.pending_frame.is_some())
    }

    /// Hand out the pending frame if its time has come. The slot is emptied;
    /// the callback is expected to request the next frame itself.
    pub fn take_due_frame(&mut self, now: Instant) -> Option<FrameId> {
        match self.pending_frame {
            Some((id, due)) if due <= now => {
                self.pending_frame = None;
                self.last_frame_at = Some(now);
                Some(id)
            }
            _ => None,
        }
    }

    /// How long the event loop may block before the pending frame is due
    pub fn time_until_frame(&self, now: Instant) -> Option<Duration> {
        self.pending_frame
            .map(|(_, due)| due.saturating_duration_since(now))
    }

    // === Resize subscriptions ===

    pub fn subscribe_resize(&mut self) -> ListenerId {
        let id = ListenerId(self.fresh_id());
        self.listeners.push(id);
        id
    }

    pub fn unsubscribe_resize(&mut self, id: ListenerId) {
        self.listeners.retain(|l| *l != id);
    }

    #[cfg(test)]
    pub fn is_subscribed(&self, id: ListenerId) -> bool {
        self.listeners.contains(&id)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Record a new viewport size. Returns the listeners to notify.
    pub fn dispatch_resize(&mut self, width: f32, height: f32) -> Vec<ListenerId> {
        self.viewport = (width, height);
        self.listeners.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(16);

    #[test]
    fn test_first_frame_is_due_immediately() {
        let mut host = Host::new(800.0, 600.0, INTERVAL);
        let id = host.request_frame();
        assert_eq!(host.pending_frames(), 1);
        let now = Instant::now();
        assert_eq!(host.take_due_frame(now), Some(id));
        assert_eq!(host.pending_frames(), 0);
    }

    #[test]
    fn test_next_frame_waits_for_interval() {
        let mut host = Host::new(800.0, 600.0, INTERVAL);
        host.request_frame();
        let t0 = Instant::now();
        assert!(host.take_due_frame(t0).is_some());

        let id = host.request_frame();
        assert_eq!(host.take_due_frame(t0), None);
        assert_eq!(host.time_until_frame(t0), Some(INTERVAL));
        assert_eq!(host.take_due_frame(t0 + INTERVAL), Some(id));
    }

    #[test]
    fn test_cancel_ignores_stale_ids() {
        let mut host = Host::new(800.0, 600.0, INTERVAL);
        let first = host.request_frame();
        let second = host.request_frame();
        assert_eq!(host.pending_frames(), 1);

        host.cancel_frame(first);
        assert_eq!(host.pending_frames(), 1);

        host.cancel_frame(second);
        host.cancel_frame(second);
        assert_eq!(host.pending_frames(), 0);
        assert_eq!(host.time_until_frame(Instant::now()), None);
    }

    #[test]
    fn test_resize_subscriptions() {
        let mut host = Host::new(800.0, 600.0, INTERVAL);
        let a = host.subscribe_resize();
        let b = host.subscribe_resize();
        assert_ne!(a, b);

        assert_eq!(host.dispatch_resize(1024.0, 768.0), vec![a, b]);
        assert_eq!(host.viewport(), (1024.0, 768.0));

        host.unsubscribe_resize(a);
        host.unsubscribe_resize(a);
        assert!(!host.is_subscribed(a));
        assert_eq!(host.dispatch_resize(640.0, 480.0), vec![b]);
    }
}
