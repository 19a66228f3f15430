//! Game rules shared by the server and the terminal client: the persisted
//! game record, guess parsing and bulls/cows scoring.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of digits in a solution and in every guess.
pub const DIGIT_COUNT: usize = 3;
/// Highest digit a solution may contain. Solutions draw from `0..=MAX_DIGIT`.
pub const MAX_DIGIT: u8 = 4;

/// Why a guess string was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GuessError {
    #[error("guess repeats a digit")]
    Duplicate,
    #[error("guess must be exactly {} decimal digits", DIGIT_COUNT)]
    Malformed,
}

/// A validated guess: `DIGIT_COUNT` decimal digits, none repeated.
///
/// Digits above `MAX_DIGIT` are accepted. They can never match a solution
/// and simply score nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Guess([u8; DIGIT_COUNT]);

impl Guess {
    /// Parses a string such as `"204"`.
    ///
    /// Characters are checked first, then repeats, then the digit count, so
    /// `"001"` and `"0011"` are both reported as duplicates while `"12"` and
    /// `"abc"` are malformed.
    pub fn parse(input: &str) -> Result<Self, GuessError> {
        let digits = input
            .chars()
            .map(|c| c.to_digit(10).map(|d| d as u8))
            .collect::<Option<Vec<u8>>>()
            .ok_or(GuessError::Malformed)?;

        let mut seen = [false; 10];
        for &digit in &digits {
            if seen[digit as usize] {
                return Err(GuessError::Duplicate);
            }
            seen[digit as usize] = true;
        }

        let digits: [u8; DIGIT_COUNT] = digits.try_into().map_err(|_| GuessError::Malformed)?;
        Ok(Guess(digits))
    }

    pub fn digits(&self) -> &[u8; DIGIT_COUNT] {
        &self.0
    }
}

impl FromStr for Guess {
    type Err = GuessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Guess::parse(s)
    }
}

impl fmt::Display for Guess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for digit in &self.0 {
            write!(f, "{}", digit)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub bulls: u8,
    pub cows: u8,
}

impl Score {
    pub fn is_solved(&self) -> bool {
        self.bulls as usize == DIGIT_COUNT
    }
}

/// Scores a guess against a solution in one pass.
///
/// A position that is a bull is never also counted as a cow. Cows are
/// found by containment in the whole solution, which is only correct
/// because neither the guess nor the solution may repeat a digit.
pub fn score(guess: &Guess, solution: &[u8; DIGIT_COUNT]) -> Score {
    let mut score = Score::default();
    for (position, digit) in guess.digits().iter().enumerate() {
        if solution[position] == *digit {
            score.bulls += 1;
        } else if solution.contains(digit) {
            score.cows += 1;
        }
    }
    score
}

/// Draws a uniformly random ordered selection of `DIGIT_COUNT` distinct
/// digits from `0..=MAX_DIGIT`.
pub fn generate_solution<R: Rng + ?Sized>(rng: &mut R) -> [u8; DIGIT_COUNT] {
    let mut pool: Vec<u8> = (0..=MAX_DIGIT).collect();
    pool.shuffle(rng);

    let mut solution = [0; DIGIT_COUNT];
    solution.copy_from_slice(&pool[..DIGIT_COUNT]);
    solution
}

/// One game as persisted in the key-value store, keyed by `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub id: String,
    pub solution: [u8; DIGIT_COUNT],
    /// Number of validated guesses evaluated so far.
    pub guesses: u32,
    pub solved: bool,
}

impl GameState {
    /// Starts a fresh game with a random solution.
    pub fn new<R: Rng + ?Sized>(id: impl Into<String>, rng: &mut R) -> Self {
        Self::with_solution(id, generate_solution(rng))
    }

    pub fn with_solution(id: impl Into<String>, solution: [u8; DIGIT_COUNT]) -> Self {
        Self {
            id: id.into(),
            solution,
            guesses: 0,
            solved: false,
        }
    }

    /// True when the solution holds distinct digits within `0..=MAX_DIGIT`.
    /// Records loaded from a store are checked with this before use.
    pub fn has_valid_solution(&self) -> bool {
        let mut seen = [false; MAX_DIGIT as usize + 1];
        for &digit in &self.solution {
            if digit > MAX_DIGIT || seen[digit as usize] {
                return false;
            }
            seen[digit as usize] = true;
        }
        true
    }

    /// Counts the guess, scores it and marks the game solved on a full match.
    /// Once solved a game stays solved; further guesses are still counted.
    pub fn record_guess(&mut self, guess: &Guess) -> Score {
        self.guesses = self.guesses.saturating_add(1);

        let score = score(guess, &self.solution);
        if score.is_solved() {
            self.solved = true;
        }
        score
    }
}

/// Body of a successful guess response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuessResponse {
    pub cows: u8,
    pub bulls: u8,
    pub game_id: String,
    pub guesses: u32,
    pub solved: bool,
}

impl GuessResponse {
    pub fn new(game: &GameState, score: Score) -> Self {
        Self {
            cows: score.cows,
            bulls: score.bulls,
            game_id: game.id.clone(),
            guesses: game.guesses,
            solved: game.solved,
        }
    }
}
