use crate::bucket::{clock_value, Clock, LocalClock, TimeBucket};
use crate::picker::pick_image;
use crate::setter::BackgroundSetter;
use crate::validate::BaseDirectory;
use crate::{Result, ShufflerError};
use log::{debug, info, warn};
use rand::rngs::ThreadRng;
use rand::Rng;
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::time::Duration;

pub const DEFAULT_SLIDESHOW_SECS: u64 = 60;

/// Cancellation flag shared between the loop and whoever wants it to stop.
#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        let (lock, cvar) = &*self.inner;
        *lock.lock().unwrap_or_else(PoisonError::into_inner) = true;
        cvar.notify_all();
    }

    pub fn is_cancelled(&self) -> bool {
        *self.inner.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Blocks for `timeout` or until cancelled. Returns whether the signal is cancelled.
    pub fn wait(&self, timeout: Duration) -> bool {
        let (lock, cvar) = &*self.inner;
        let guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
        let (guard, _) = cvar
            .wait_timeout_while(guard, timeout, |cancelled| !*cancelled)
            .unwrap_or_else(PoisonError::into_inner);
        *guard
    }
}

/// What one pass of the loop did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tick {
    pub clock_value: u32,
    pub bucket: TimeBucket,
    pub image: Option<PathBuf>,
}

/// Bucketize, pick, apply, sleep, repeat.
pub struct Scheduler<S, C = LocalClock, R = ThreadRng> {
    base: BaseDirectory,
    setter: S,
    clock: C,
    rng: R,
    interval: Duration,
    max_iterations: Option<usize>,
}

impl<S: BackgroundSetter> Scheduler<S> {
    pub fn new(base: BaseDirectory, setter: S) -> Self {
        Self {
            base,
            setter,
            clock: LocalClock,
            rng: rand::rng(),
            interval: Duration::from_secs(DEFAULT_SLIDESHOW_SECS),
            max_iterations: None,
        }
    }
}

impl<S, C, R> Scheduler<S, C, R>
where
    S: BackgroundSetter,
    C: Clock,
    R: Rng,
{
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Stop after `iterations` passes instead of running until cancelled.
    pub fn with_max_iterations(mut self, iterations: Option<usize>) -> Self {
        self.max_iterations = iterations;
        self
    }

    pub fn with_clock<C2: Clock>(self, clock: C2) -> Scheduler<S, C2, R> {
        Scheduler {
            base: self.base,
            setter: self.setter,
            clock,
            rng: self.rng,
            interval: self.interval,
            max_iterations: self.max_iterations,
        }
    }

    pub fn with_rng<R2: Rng>(self, rng: R2) -> Scheduler<S, C, R2> {
        Scheduler {
            base: self.base,
            setter: self.setter,
            clock: self.clock,
            rng,
            interval: self.interval,
            max_iterations: self.max_iterations,
        }
    }

    pub fn setter(&self) -> &S {
        &self.setter
    }

    pub fn into_setter(self) -> S {
        self.setter
    }

    /// One pass: read the clock, pick an image from the matching bucket and apply it.
    ///
    /// A starved folder or a failing setter is logged and does not end the loop; only
    /// failing to write to `out` is an error.
    pub fn tick<W: Write + ?Sized>(&mut self, out: &mut W) -> Result<Tick> {
        let (hour, minute) = self.clock.hour_minute();
        let clock_value = clock_value(hour, minute);
        writeln!(out, "Time: {clock_value}")?;

        let bucket = TimeBucket::from_clock_value(clock_value);
        let folder = self.base.bucket_path(bucket);
        debug!("Clock {clock_value} falls in {bucket}, sampling {:?}", folder);

        let image = match pick_image(&folder, &mut self.rng, out) {
            Ok(image) => image,
            Err(e @ ShufflerError::Output(_)) => return Err(e),
            Err(e) => {
                warn!("Skipping this round: {e}");
                return Ok(Tick { clock_value, bucket, image: None });
            }
        };

        if let Err(e) = self.setter.set_background(&image) {
            warn!("Failed to set background to {:?}: {e}", image);
        }

        Ok(Tick {
            clock_value,
            bucket,
            image: Some(image),
        })
    }

    /// Runs until `stop` is cancelled or the iteration bound is reached.
    pub fn run<W: Write + ?Sized>(&mut self, out: &mut W, stop: &StopSignal) -> Result<usize> {
        info!(
            "Shuffling backgrounds from {:?} every {}s",
            self.base.root(),
            self.interval.as_secs()
        );

        let max_iterations = self.max_iterations;
        let limit_reached = |done: usize| max_iterations.is_some_and(|max| done >= max);
        let mut iterations = 0;
        while !stop.is_cancelled() && !limit_reached(iterations) {
            self.tick(out)?;
            out.flush()?;
            iterations += 1;

            // No sleep after the last bounded pass.
            if limit_reached(iterations) || stop.wait(self.interval) {
                break;
            }
        }

        debug!("Scheduler stopped after {iterations} iterations");
        Ok(iterations)
    }
}
