//! Sources of physical frame indices for the page table builder.

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

/// Proposes candidate frames. The builder rejects candidates already in use,
/// so a source only has to eventually propose every index.
pub trait FrameSource {
    /// A candidate frame index in `[0, pool_size)`. `pool_size` is never 0.
    fn next_frame(&mut self, pool_size: usize) -> usize;
}

/// Uniform draws from any `rand` generator.
#[derive(Debug, Clone)]
pub struct RandomFrames<R> {
    rng: R,
}

impl<R: Rng> RandomFrames<R> {
    pub fn new(rng: R) -> Self {
        RandomFrames { rng }
    }
}

impl RandomFrames<ThreadRng> {
    /// Different assignment every run.
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng())
    }
}

impl RandomFrames<StdRng> {
    /// Reproducible assignment for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> FrameSource for RandomFrames<R> {
    fn next_frame(&mut self, pool_size: usize) -> usize {
        self.rng.gen_range(0..pool_size)
    }
}

/// Replays a fixed script of indices, then counts upward from 0.
///
/// Script values are reduced modulo the pool size. The trailing count visits
/// every index, so rejection sampling against it always terminates.
#[derive(Debug, Clone, Default)]
pub struct ScriptedFrames {
    script: Vec<usize>,
    pos: usize,
    counter: usize,
}

impl ScriptedFrames {
    pub fn new(script: Vec<usize>) -> Self {
        ScriptedFrames {
            script,
            pos: 0,
            counter: 0,
        }
    }

    /// No script: frames are handed out in ascending order.
    pub fn sequential() -> Self {
        Self::default()
    }
}

impl FrameSource for ScriptedFrames {
    fn next_frame(&mut self, pool_size: usize) -> usize {
        if let Some(&frame) = self.script.get(self.pos) {
            self.pos += 1;
            return frame % pool_size;
        }
        let frame = self.counter % pool_size;
        self.counter = self.counter.wrapping_add(1);
        frame
    }
}

impl<S: FrameSource + ?Sized> FrameSource for &mut S {
    fn next_frame(&mut self, pool_size: usize) -> usize {
        (**self).next_frame(pool_size)
    }
}
