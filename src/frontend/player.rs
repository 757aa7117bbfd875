use std::sync::{Arc, atomic::{AtomicBool, Ordering}};
use std::thread;
use std::time::Duration;

use log::{info, trace};

use super::renderer::RenderError;


pub const LIVE_PERIOD: Duration = Duration::from_secs(1);


fn set_ctrlc_handler() -> Result<Arc<AtomicBool>, RenderError> {
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();

    ctrlc_async::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    }).map_err(|error| RenderError::Interrupt(error.to_string()))?;

    Ok(running)
}


/// Source of redraw ticks for live rendering.
pub trait FrameClock {
    /// Blocks until the next frame is due. Returns `false` once no more
    /// frames should be drawn.
    fn next_frame(&mut self) -> bool;

    fn period(&self) -> Duration;
}


/// Ticks every `period`, optionally for a limited number of frames or
/// until Ctrl-C is pressed.
pub struct IntervalClock {
    period: Duration,
    frame_limit: Option<usize>,
    frames: usize,
    running: Option<Arc<AtomicBool>>,
}

impl IntervalClock {
    #[must_use]
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            frame_limit: None,
            frames: 0,
            running: None,
        }
    }

    /// Stops on Ctrl-C.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the interrupt handler could not be installed,
    /// e.g. when one is already set.
    pub fn interruptible(period: Duration) -> Result<Self, RenderError> {
        let mut clock = Self::new(period);
        clock.running = Some(set_ctrlc_handler()?);

        Ok(clock)
    }

    #[must_use]
    pub fn with_frame_limit(mut self, frame_limit: usize) -> Self {
        self.frame_limit = Some(frame_limit);
        self
    }

    #[must_use]
    pub fn frames(&self) -> usize {
        self.frames
    }

    fn is_running(&self) -> bool {
        self.running
            .as_ref()
            .is_none_or(|running| running.load(Ordering::SeqCst))
    }
}

impl Default for IntervalClock {
    fn default() -> Self {
        Self::new(LIVE_PERIOD)
    }
}

impl FrameClock for IntervalClock {
    fn next_frame(&mut self) -> bool {
        if self.frame_limit.is_some_and(|limit| self.frames >= limit) {
            return false;
        }

        // First frame is drawn right away.
        if self.frames > 0 {
            thread::sleep(self.period);
        }

        if !self.is_running() {
            info!("TERM, live rendering after {} frames", self.frames);
            return false;
        }

        self.frames += 1;

        true
    }

    fn period(&self) -> Duration {
        self.period
    }
}


pub struct LivePlayer<C: FrameClock> {
    clock: C,
}

impl<C: FrameClock> LivePlayer<C> {
    #[must_use]
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    /// Calls `draw_frame` with the frame number on every tick of the clock
    /// and returns the number of drawn frames.
    ///
    /// # Errors
    ///
    /// Will return the first error `draw_frame` returns.
    pub fn play<F>(&mut self, mut draw_frame: F) -> Result<usize, RenderError>
    where
        F: FnMut(usize) -> Result<(), RenderError>
    {
        info!(
            "Live rendering started, period: {} ms",
            self.clock.period().as_millis()
        );

        let mut frame = 0;

        while self.clock.next_frame() {
            draw_frame(frame)?;

            trace!("Frame: {frame}");

            frame += 1;
        }

        info!("Live rendering finished after {frame} frames");

        Ok(frame)
    }
}


#[cfg(test)]
mod tests {
    use super::*;


    struct CountingClock {
        remaining: usize,
    }

    impl FrameClock for CountingClock {
        fn next_frame(&mut self) -> bool {
            if self.remaining == 0 {
                return false;
            }

            self.remaining -= 1;

            true
        }

        fn period(&self) -> Duration {
            Duration::from_millis(10)
        }
    }


    #[test]
    fn plays_every_frame() {
        let mut player = LivePlayer::new(CountingClock { remaining: 3 });
        let mut frames = Vec::new();

        let played = player
            .play(|frame| {
                frames.push(frame);
                Ok(())
            })
            .unwrap();

        assert_eq!(3, played);
        assert_eq!(vec![0, 1, 2], frames);
    }

    #[test]
    fn stops_at_first_error() {
        let mut player = LivePlayer::new(CountingClock { remaining: 5 });
        let mut calls = 0;

        let result = player.play(|frame| {
            calls += 1;

            if frame == 1 {
                Err(RenderError::Drawing("broken frame".to_string()))
            } else {
                Ok(())
            }
        });

        assert!(matches!(result, Err(RenderError::Drawing(_))));
        assert_eq!(2, calls);
    }

    #[test]
    fn interval_clock_respects_frame_limit() {
        let mut clock = IntervalClock::new(Duration::ZERO).with_frame_limit(2);

        assert!(clock.next_frame());
        assert!(clock.next_frame());
        assert!(!clock.next_frame());
        assert_eq!(2, clock.frames());
    }

    #[test]
    fn default_interval_is_one_second() {
        assert_eq!(LIVE_PERIOD, IntervalClock::default().period());
    }
}
