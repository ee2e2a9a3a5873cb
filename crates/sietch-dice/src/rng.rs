//! Random sources for die rolls.
//!
//! Every roll function takes its generator as an argument. Any [`rand::Rng`]
//! works directly; [`ScriptedDice`] replays fixed faces for tests and replays.

use rand::Rng;

/// A source of uniformly distributed die faces.
pub trait DieSource {
    /// Draw one face in `1..=sides`.
    fn roll_die(&mut self, sides: u32) -> u32;

    /// Draw `count` faces in `1..=sides`, in order.
    fn roll_dice(&mut self, count: u32, sides: u32) -> Vec<u32> {
        (0..count).map(|_| self.roll_die(sides)).collect()
    }
}

impl<R: Rng + ?Sized> DieSource for R {
    fn roll_die(&mut self, sides: u32) -> u32 {
        self.random_range(1..=sides)
    }
}

/// A deterministic source that replays a fixed sequence of faces.
///
/// The sequence wraps around when exhausted. Each value is clamped into
/// `1..=sides` of the die being rolled, so a script written for d20s stays
/// valid when fed to a d6. An empty script always rolls 1.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    faces: Vec<u32>,
    next: usize,
}

impl ScriptedDice {
    /// Create a source replaying `faces` in order.
    pub fn new(faces: impl Into<Vec<u32>>) -> Self {
        Self {
            faces: faces.into(),
            next: 0,
        }
    }

    /// How many faces have been drawn so far.
    pub fn drawn(&self) -> usize {
        self.next
    }
}

impl DieSource for ScriptedDice {
    fn roll_die(&mut self, sides: u32) -> u32 {
        if self.faces.is_empty() {
            return 1;
        }
        let face = self.faces[self.next % self.faces.len()];
        self.next += 1;
        face.clamp(1, sides.max(1))
    }
}
