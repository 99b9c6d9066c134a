//! Piece sources - where the next piece kind comes from
//!
//! The game loop draws kinds through the [`PieceSource`] trait so tests can
//! inject a fixed sequence instead of random draws.
//!
//! - [`PieceQueue`]: 7-bag. Each bag holds one of each kind, shuffled.
//! - [`UniformSource`]: independent uniform draws.
//! - [`ScriptedSource`]: replays a fixed list, cycling at the end.
//!
//! Both random sources run on [`SimpleRng`], a small LCG, so a seed fully
//! determines the sequence.

use crate::types::PieceKind;

/// Supplies piece kinds to the game loop.
pub trait PieceSource {
    /// Consume and return the next kind.
    fn next_kind(&mut self) -> PieceKind;

    /// The kind the next call to [`next_kind`](Self::next_kind) returns, if known.
    fn peek_kind(&self) -> Option<PieceKind> {
        None
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Zero seed is remapped; the sequence would otherwise start at c.
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// 7-bag piece generator
#[derive(Debug, Clone)]
pub struct PieceQueue {
    bag: [PieceKind; 7],
    bag_index: usize,
    rng: SimpleRng,
}

impl PieceQueue {
    pub fn new(seed: u32) -> Self {
        let mut queue = Self {
            bag: PieceKind::ALL,
            bag_index: 0,
            rng: SimpleRng::new(seed),
        };
        queue.refill_bag();
        queue
    }

    fn refill_bag(&mut self) {
        self.bag = PieceKind::ALL;
        self.rng.shuffle(&mut self.bag);
        self.bag_index = 0;
    }

    /// Peek at the next piece without removing it.
    ///
    /// When the bag is empty the next bag is previewed on a copy of the RNG,
    /// so the preview always matches the following [`draw`](Self::draw).
    pub fn peek(&self) -> PieceKind {
        if let Some(&kind) = self.bag.get(self.bag_index) {
            return kind;
        }
        let mut preview_rng = self.rng.clone();
        let mut next_bag = PieceKind::ALL;
        preview_rng.shuffle(&mut next_bag);
        next_bag[0]
    }

    /// Draw the next piece from the queue
    pub fn draw(&mut self) -> PieceKind {
        if self.bag_index >= self.bag.len() {
            self.refill_bag();
        }
        let piece = self.bag[self.bag_index];
        self.bag_index += 1;
        piece
    }

    /// Pieces left in the current bag.
    pub fn remaining(&self) -> &[PieceKind] {
        &self.bag[self.bag_index..]
    }
}

impl Default for PieceQueue {
    fn default() -> Self {
        Self::new(1)
    }
}

impl PieceSource for PieceQueue {
    fn next_kind(&mut self) -> PieceKind {
        self.draw()
    }

    fn peek_kind(&self) -> Option<PieceKind> {
        Some(self.peek())
    }
}

/// Each kind drawn independently with equal probability.
#[derive(Debug, Clone)]
pub struct UniformSource {
    rng: SimpleRng,
    next: PieceKind,
}

impl UniformSource {
    pub fn new(seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let next = Self::pick(&mut rng);
        Self { rng, next }
    }

    fn pick(rng: &mut SimpleRng) -> PieceKind {
        PieceKind::ALL[rng.next_range(PieceKind::ALL.len() as u32) as usize]
    }
}

impl PieceSource for UniformSource {
    fn next_kind(&mut self) -> PieceKind {
        let upcoming = Self::pick(&mut self.rng);
        std::mem::replace(&mut self.next, upcoming)
    }

    fn peek_kind(&self) -> Option<PieceKind> {
        Some(self.next)
    }
}

/// Replays a fixed sequence of kinds, wrapping around at the end.
///
/// An empty script yields `O` forever.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    kinds: Vec<PieceKind>,
    cursor: usize,
}

impl ScriptedSource {
    pub fn new(kinds: impl Into<Vec<PieceKind>>) -> Self {
        Self {
            kinds: kinds.into(),
            cursor: 0,
        }
    }

    /// Number of kinds handed out so far.
    pub fn drawn(&self) -> usize {
        self.cursor
    }
}

impl PieceSource for ScriptedSource {
    fn next_kind(&mut self) -> PieceKind {
        let kind = self.peek_kind().unwrap_or(PieceKind::O);
        self.cursor += 1;
        kind
    }

    fn peek_kind(&self) -> Option<PieceKind> {
        if self.kinds.is_empty() {
            return None;
        }
        Some(self.kinds[self.cursor % self.kinds.len()])
    }
}

/// Which random source an engine built from configuration uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Randomizer {
    #[default]
    Bag,
    Uniform,
}

/// Boxed source for `randomizer`, seeded with `seed`.
pub fn source_for(randomizer: Randomizer, seed: u32) -> Box<dyn PieceSource> {
    match randomizer {
        Randomizer::Bag => Box::new(PieceQueue::new(seed)),
        Randomizer::Uniform => Box::new(UniformSource::new(seed)),
    }
}

impl<S: PieceSource + ?Sized> PieceSource for Box<S> {
    fn next_kind(&mut self) -> PieceKind {
        (**self).next_kind()
    }

    fn peek_kind(&self) -> Option<PieceKind> {
        (**self).peek_kind()
    }
}
