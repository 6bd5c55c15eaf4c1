use std::fmt;

use serde::{Deserialize, Serialize};

/// Label of one outcome ("via"). Order is significant: the active set is
/// always a prefix of [`Letter::ALL`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Letter {
    A,
    B,
    C,
    D,
    E,
}

impl Letter {
    pub const ALL: [Letter; 5] = [Letter::A, Letter::B, Letter::C, Letter::D, Letter::E];

    /// The outcome whose stake is the legacy base stake.
    pub const BASE: Letter = Letter::A;

    pub fn as_char(self) -> char {
        match self {
            Letter::A => 'A',
            Letter::B => 'B',
            Letter::C => 'C',
            Letter::D => 'D',
            Letter::E => 'E',
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Number of active outcomes, always within `MIN..=MAX`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutcomeCount(u8);

impl OutcomeCount {
    pub const MIN: u8 = 2;
    pub const MAX: u8 = 5;

    pub fn new(n: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&n).then_some(Self(n))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn can_increase(self) -> bool {
        self.0 < Self::MAX
    }

    pub fn can_decrease(self) -> bool {
        self.0 > Self::MIN
    }

    pub fn increased(self) -> Option<Self> {
        Self::new(self.0 + 1)
    }

    pub fn decreased(self) -> Option<Self> {
        Self::new(self.0 - 1)
    }

    pub fn letters(self) -> &'static [Letter] {
        &Letter::ALL[..self.0 as usize]
    }

    pub fn contains(self, letter: Letter) -> bool {
        letter.index() < self.0 as usize
    }
}

impl Default for OutcomeCount {
    fn default() -> Self {
        Self(Self::MIN)
    }
}
