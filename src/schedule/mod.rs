//! Display-refresh frame scheduling.
//!
//! A [`FrameScheduler`] is the "invoke once before the next repaint" primitive: callers
//! request a frame and get a cancellable [`FrameHandle`]; the host side calls
//! [`FrameScheduler::advance`] once per refresh and dispatches the handles that came due.

use crate::foundation::core::Fps;
use std::time::{Duration, Instant};

/// Opaque handle of one requested frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameHandle(u64);

impl FrameHandle {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// One-shot, cancellable per-refresh callback scheduling.
pub trait FrameScheduler {
    /// Ask to be called back on the next refresh.
    fn request_frame(&mut self) -> FrameHandle;

    /// Withdraw a request. Unknown or already-fired handles are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);

    /// Scheduler clock in seconds.
    fn now_secs(&self) -> f64;

    /// Host side: wait for the next refresh and return every request that came due.
    ///
    /// Returned handles are consumed; a callback that wants another frame must request again.
    fn advance(&mut self) -> Vec<FrameHandle>;

    /// Number of requests currently waiting for a refresh.
    fn outstanding(&self) -> usize;
}

#[derive(Debug, Default)]
struct RequestQueue {
    next_id: u64,
    pending: Vec<FrameHandle>,
}

impl RequestQueue {
    fn request(&mut self) -> FrameHandle {
        self.next_id = self.next_id.wrapping_add(1);
        let handle = FrameHandle(self.next_id);
        self.pending.push(handle);
        handle
    }

    fn cancel(&mut self, handle: FrameHandle) {
        self.pending.retain(|h| *h != handle);
    }

    fn drain(&mut self) -> Vec<FrameHandle> {
        std::mem::take(&mut self.pending)
    }
}

/// Deterministic scheduler whose clock advances exactly one frame per refresh.
///
/// Used for offline rendering and tests: `now_secs` is `ticks / fps`, no sleeping.
#[derive(Debug)]
pub struct FixedRateScheduler {
    fps: Fps,
    ticks: u64,
    queue: RequestQueue,
}

impl FixedRateScheduler {
    pub fn new(fps: Fps) -> Self {
        Self {
            fps,
            ticks: 0,
            queue: RequestQueue::default(),
        }
    }

    /// Refreshes elapsed so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn fps(&self) -> Fps {
        self.fps
    }
}

impl FrameScheduler for FixedRateScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.queue.request()
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.queue.cancel(handle);
    }

    fn now_secs(&self) -> f64 {
        self.fps.frames_to_secs(self.ticks)
    }

    fn advance(&mut self) -> Vec<FrameHandle> {
        self.ticks = self.ticks.saturating_add(1);
        self.queue.drain()
    }

    fn outstanding(&self) -> usize {
        self.queue.pending.len()
    }
}

/// Wall-clock scheduler that paces refreshes at a fixed rate.
///
/// When a refresh is missed the next deadline is re-based on the current time, so a slow
/// frame never triggers a burst of catch-up frames.
#[derive(Debug)]
pub struct RealtimeScheduler {
    interval: Duration,
    origin: Instant,
    next_deadline: Instant,
    queue: RequestQueue,
}

impl RealtimeScheduler {
    pub fn new(fps: Fps) -> Self {
        let interval = Duration::from_secs_f64(fps.frame_duration_secs());
        let origin = Instant::now();
        Self {
            interval,
            origin,
            next_deadline: origin + interval,
            queue: RequestQueue::default(),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl FrameScheduler for RealtimeScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.queue.request()
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.queue.cancel(handle);
    }

    fn now_secs(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }

    fn advance(&mut self) -> Vec<FrameHandle> {
        let now = Instant::now();
        if self.next_deadline > now {
            std::thread::sleep(self.next_deadline - now);
            self.next_deadline += self.interval;
        } else {
            self.next_deadline = now + self.interval;
        }
        self.queue.drain()
    }

    fn outstanding(&self) -> usize {
        self.queue.pending.len()
    }
}
