//! Surface lifecycle and the per-frame render loop.
//!
//! An [`Engine`] drives one surface through the state machine
//!
//! ```text
//! Uninitialized --start--> Running(variant) --start/update--> Running(other)
//!                               |
//!                             stop
//!                               v
//!                            Stopped --start--> Running(..)
//! ```
//!
//! Every transition out of `Running` cancels the pending frame request first, so at most one
//! frame loop exists per engine and no frame fires after `stop`.

use crate::foundation::core::{SurfaceSize, Theme, Variant, Viewport};
use crate::foundation::error::BackdropResult;
use crate::foundation::rng::{RandomSource, Rng64};
use crate::schedule::{FrameHandle, FrameScheduler};
use crate::surface::Surface;
use crate::variants::{FrameCtx, Renderer, VariantState};

pub mod config;

/// Owned token for one `start`. Only the current token can stop the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EngineHandle(u64);

impl EngineHandle {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Observable lifecycle state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnginePhase {
    /// Never started.
    Uninitialized,
    /// A variant is animating.
    Running(Variant),
    /// Stopped or shut down; waits for the next `start`.
    Stopped,
}

struct Run {
    handle: EngineHandle,
    theme: Theme,
    state: VariantState,
    // Size the variant state was built for.
    built_for: SurfaceSize,
    started_at: f64,
    pending: Option<FrameHandle>,
    frames: u64,
}

enum State {
    Uninitialized,
    Running(Run),
    Stopped,
}

/// Animation engine bound to a frame scheduler.
///
/// The engine does not own its surface: hosts pass it to every call that draws, which keeps a
/// single engine usable with any [`Surface`] and leaves no stale surface references behind.
pub struct Engine<S: FrameScheduler> {
    scheduler: S,
    rng: Box<dyn RandomSource>,
    state: State,
    next_handle: u64,
}

impl<S: FrameScheduler> Engine<S> {
    /// Engine whose variants draw randomness from a SplitMix64 generator seeded with `seed`.
    pub fn new(scheduler: S, seed: u64) -> Self {
        Self::with_random_source(scheduler, Box::new(Rng64::new(seed)))
    }

    pub fn with_random_source(scheduler: S, rng: Box<dyn RandomSource>) -> Self {
        Self {
            scheduler,
            rng,
            state: State::Uninitialized,
            next_handle: 0,
        }
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn phase(&self) -> EnginePhase {
        match &self.state {
            State::Uninitialized => EnginePhase::Uninitialized,
            State::Running(run) => EnginePhase::Running(run.state.variant()),
            State::Stopped => EnginePhase::Stopped,
        }
    }

    /// Handle of the running animation, if any.
    pub fn handle(&self) -> Option<EngineHandle> {
        match &self.state {
            State::Running(run) => Some(run.handle),
            _ => None,
        }
    }

    /// Frame request the engine is currently waiting on.
    pub fn pending_frame(&self) -> Option<FrameHandle> {
        match &self.state {
            State::Running(run) => run.pending,
            _ => None,
        }
    }

    /// State of the active variant. `None` unless running.
    pub fn variant_state(&self) -> Option<&VariantState> {
        match &self.state {
            State::Running(run) => Some(&run.state),
            _ => None,
        }
    }

    /// Frames actually drawn since the last `start` (skipped frames excluded).
    pub fn frames_rendered(&self) -> u64 {
        match &self.state {
            State::Running(run) => run.frames,
            _ => 0,
        }
    }

    /// Tear down whatever runs, build `variant` for the surface's current size, draw the
    /// first frame and request the next one.
    ///
    /// Returns `None` without entering any variant when the surface has no drawing context.
    #[tracing::instrument(skip(self, surface))]
    pub fn start(
        &mut self,
        surface: &mut dyn Surface,
        variant: Variant,
        theme: Theme,
    ) -> Option<EngineHandle> {
        self.teardown();
        if !surface.has_context() {
            tracing::debug!("no drawing context, start abandoned");
            return None;
        }

        let size = surface.size();
        let state = VariantState::build(variant, theme, size, self.rng.as_mut());
        self.next_handle = self.next_handle.wrapping_add(1);
        let handle = EngineHandle(self.next_handle);
        self.state = State::Running(Run {
            handle,
            theme,
            state,
            built_for: size,
            started_at: self.scheduler.now_secs(),
            pending: None,
            frames: 0,
        });
        tracing::debug!(
            handle = handle.0,
            width = size.width,
            height = size.height,
            "engine started"
        );

        self.render_frame(surface);
        Some(handle)
    }

    /// Restart only when `variant` or `theme` differ from what is running.
    pub fn update(
        &mut self,
        surface: &mut dyn Surface,
        variant: Variant,
        theme: Theme,
    ) -> Option<EngineHandle> {
        if let State::Running(run) = &self.state
            && run.state.variant() == variant
            && run.theme == theme
        {
            return Some(run.handle);
        }
        self.start(surface, variant, theme)
    }

    /// Cancel the animation started with `handle`. Stale handles and repeated calls are
    /// ignored.
    pub fn stop(&mut self, handle: EngineHandle) {
        let current = matches!(&self.state, State::Running(run) if run.handle == handle);
        if current {
            self.teardown();
            tracing::debug!(handle = handle.0, "engine stopped");
        } else {
            tracing::trace!(handle = handle.0, "stop ignored");
        }
    }

    /// Unmount: cancel whatever is pending regardless of handle.
    pub fn shutdown(&mut self) {
        self.teardown();
    }

    /// Resize the surface and rebuild size-derived variant state.
    #[tracing::instrument(skip(self, surface))]
    pub fn resize(&mut self, surface: &mut dyn Surface, viewport: Viewport) -> BackdropResult<()> {
        surface.resize(viewport)?;
        if let State::Running(run) = &mut self.state {
            let size = surface.size();
            run.state = VariantState::build(run.state.variant(), run.theme, size, self.rng.as_mut());
            run.built_for = size;
        }
        Ok(())
    }

    /// Frame callback. Returns whether `frame` belonged to this engine's loop.
    ///
    /// Handles the engine is not waiting on (cancelled, stale, or foreign) are ignored.
    pub fn on_frame(&mut self, frame: FrameHandle, surface: &mut dyn Surface) -> bool {
        let State::Running(run) = &self.state else {
            return false;
        };
        if run.pending != Some(frame) {
            tracing::trace!(frame = frame.id(), "frame not pending, ignored");
            return false;
        }
        self.render_frame(surface);
        true
    }

    /// Host helper: wait for the next refresh and dispatch every due frame.
    ///
    /// Returns how many dispatched frames belonged to this engine.
    pub fn pump(&mut self, surface: &mut dyn Surface) -> usize {
        let mut handled = 0;
        for frame in self.scheduler.advance() {
            if self.on_frame(frame, surface) {
                handled += 1;
            }
        }
        handled
    }

    fn render_frame(&mut self, surface: &mut dyn Surface) {
        let now = self.scheduler.now_secs();
        let State::Running(run) = &mut self.state else {
            return;
        };
        run.pending = None;

        let size = surface.size();
        if size.is_empty() {
            tracing::trace!("surface is empty, frame skipped");
        } else {
            if size != run.built_for {
                run.state =
                    VariantState::build(run.state.variant(), run.theme, size, self.rng.as_mut());
                run.built_for = size;
            }
            let frame = FrameCtx {
                elapsed_secs: now - run.started_at,
                size,
            };
            run.state.render(&frame, surface);
            surface.present();
            run.frames += 1;
        }

        run.pending = Some(self.scheduler.request_frame());
    }

    fn teardown(&mut self) {
        if let State::Running(run) = &self.state {
            if let Some(frame) = run.pending {
                self.scheduler.cancel_frame(frame);
            }
            self.state = State::Stopped;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/lifecycle.rs"]
mod tests;
