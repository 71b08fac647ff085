//! Batch execution of a measured operation
//!
//! A [`Bencher`] runs an operation a fixed number of times back to back on the
//! calling thread and records only the total elapsed ticks of the batch.

use crate::clock::Clock;
use crate::sink::black_box;

/// Runs batches of a measured operation against a clock.
#[derive(Debug)]
pub struct Bencher<'c, C: Clock + ?Sized> {
    clock: &'c C,
    iterations: u64,
    elapsed_ticks: u64,
}

impl<'c, C: Clock + ?Sized> Bencher<'c, C> {
    pub fn new(clock: &'c C) -> Self {
        Self {
            clock,
            iterations: 0,
            elapsed_ticks: 0,
        }
    }

    /// Run `inner` exactly [`iterations`](Self::iterations) times and record the
    /// elapsed ticks. Every result passes through [`black_box`].
    pub fn iter<T, F>(&mut self, inner: &mut F)
    where
        F: FnMut() -> T,
    {
        let start = self.clock.now();
        for _ in 0..self.iterations {
            black_box(inner());
        }
        self.elapsed_ticks = self.clock.now().saturating_sub(start);
    }

    /// Set the batch size to `n` and run one batch.
    ///
    /// # Examples
    ///
    /// ```
    /// use microbench::bencher::Bencher;
    /// use microbench::clock::ManualClock;
    ///
    /// let clock = ManualClock::new();
    /// let mut bencher = Bencher::new(&clock);
    /// let mut calls = 0;
    /// bencher.bench_n(4, &mut || {
    ///     calls += 1;
    ///     clock.advance(25);
    /// });
    /// assert_eq!(calls, 4);
    /// assert_eq!(bencher.ns_per_iter(), 25);
    /// ```
    pub fn bench_n<T, F>(&mut self, n: u64, inner: &mut F)
    where
        F: FnMut() -> T,
    {
        self.iterations = n;
        self.iter(inner);
    }

    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    pub fn elapsed_ticks(&self) -> u64 {
        self.elapsed_ticks
    }

    /// Elapsed time of the last batch in nanoseconds.
    pub fn ns_elapsed(&self) -> u64 {
        self.clock.ticks_to_ns(self.elapsed_ticks)
    }

    /// Integer nanoseconds per iteration of the last batch, 0 for an empty batch.
    pub fn ns_per_iter(&self) -> u64 {
        if self.iterations == 0 {
            0
        } else {
            self.clock
                .ticks_to_ns(self.elapsed_ticks / self.iterations.max(1))
        }
    }
}
