//! Quality triple produced by one evaluation.

/// Objective value, fitness and feasibility of one evaluated representation.
///
/// Fitness is what the search compares; it may differ from the objective,
/// e.g. when infeasible solutions are penalized.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QualityOfSolution {
    pub objective: f64,
    pub fitness: f64,
    pub is_feasible: bool,
}

impl QualityOfSolution {
    pub fn new(objective: f64, fitness: f64, is_feasible: bool) -> Self {
        Self {
            objective,
            fitness,
            is_feasible,
        }
    }

    /// Whether this quality is strictly better than `other`.
    pub fn is_better_than(&self, other: &Self, is_minimization: bool) -> bool {
        is_better_fitness(self.fitness, other.fitness, is_minimization)
    }
}

/// Strict fitness comparison in the problem's optimization sense.
pub fn is_better_fitness(candidate: f64, incumbent: f64, is_minimization: bool) -> bool {
    if is_minimization {
        candidate < incumbent
    } else {
        candidate > incumbent
    }
}
