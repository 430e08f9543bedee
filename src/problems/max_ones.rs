//! MaxOnes: maximize the number of set bits in a fixed-width bit vector.
//!
//! The representation is a `u32` whose low `dimension` bits are the
//! decisions; the code is its binary string (no prefix, no padding) and
//! the distance between codes is their Hamming distance.

use rand::Rng;

use crate::error::{Result, VnsError};
use crate::solution::{Problem, QualityOfSolution, Solution};

/// Largest dimension a `u32` representation can encode.
pub const MAX_DIMENSION: usize = u32::BITS as usize;

/// Count-of-set-bits maximization problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaxOnesProblem {
    dimension: usize,
}

impl MaxOnesProblem {
    /// Creates a problem with `dimension` bits.
    ///
    /// # Errors
    /// [`VnsError::InvalidDimension`] if `dimension` is 0 or above [`MAX_DIMENSION`].
    pub fn new(dimension: usize) -> Result<Self> {
        if dimension == 0 || dimension > MAX_DIMENSION {
            return Err(VnsError::InvalidDimension {
                dimension,
                max: MAX_DIMENSION,
            });
        }
        Ok(Self { dimension })
    }

    /// Mask with the low `dimension` bits set.
    pub fn mask(&self) -> u32 {
        u32::MAX >> (MAX_DIMENSION - self.dimension)
    }
}

impl Problem for MaxOnesProblem {
    type Representation = u32;

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn is_minimization(&self) -> bool {
        false
    }

    fn quality(&self, representation: &u32) -> QualityOfSolution {
        let ones = representation.count_ones() as f64;
        QualityOfSolution::new(ones, ones, true)
    }
}

/// Bit-vector solution of [`MaxOnesProblem`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaxOnesSolution {
    representation: u32,
    quality: Option<QualityOfSolution>,
}

impl MaxOnesSolution {
    /// Creates an unevaluated all-zero solution.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an unevaluated solution from explicit bits.
    ///
    /// # Errors
    /// [`VnsError::InvalidRepresentation`] if bits outside the problem's
    /// dimension are set.
    pub fn from_representation(problem: &MaxOnesProblem, representation: u32) -> Result<Self> {
        if representation & !problem.mask() != 0 {
            return Err(VnsError::InvalidRepresentation(format!(
                "{representation:#b} has bits beyond dimension {}",
                problem.dimension
            )));
        }
        Ok(Self {
            representation,
            quality: None,
        })
    }
}

impl Solution for MaxOnesSolution {
    type Representation = u32;
    type Code = String;
    type Problem = MaxOnesProblem;

    fn representation(&self) -> &u32 {
        &self.representation
    }

    fn set_representation(&mut self, representation: u32) {
        self.representation = representation;
        self.quality = None;
    }

    fn quality(&self) -> Option<QualityOfSolution> {
        self.quality
    }

    fn set_quality(&mut self, quality: QualityOfSolution) {
        self.quality = Some(quality);
    }

    /// Uniform over the non-zero values of the problem's width.
    fn random_init<R: Rng>(&mut self, problem: &MaxOnesProblem, rng: &mut R) {
        self.set_representation(rng.random_range(1..=problem.mask()));
    }

    fn encode(representation: &u32) -> String {
        format!("{representation:b}")
    }

    fn decode(code: &String) -> Result<u32> {
        if code.is_empty() || !code.bytes().all(|b| b == b'0' || b == b'1') {
            return Err(VnsError::InvalidCode(format!("{code:?} is not a binary string")));
        }
        u32::from_str_radix(code, 2).map_err(|e| VnsError::InvalidCode(format!("{code:?}: {e}")))
    }

    /// Hamming distance; codes that fail to decode are infinitely far apart.
    fn code_distance(a: &String, b: &String) -> f64 {
        match (Self::decode(a), Self::decode(b)) {
            (Ok(a), Ok(b)) => (a ^ b).count_ones() as f64,
            _ => f64::INFINITY,
        }
    }

    fn move_count(&self, problem: &MaxOnesProblem) -> usize {
        problem.dimension
    }

    fn apply_move(&mut self, _problem: &MaxOnesProblem, index: usize) {
        self.representation ^= 1 << index;
    }
}
