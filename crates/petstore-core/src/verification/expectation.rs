use std::fmt;

use crate::domain::observation::Observation;

/// State the remote store is expected to reach
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expectation {
    /// The pet is gone: the store answers "not found"
    Absent,
    /// The pet exists with exactly this name and status
    Present {
        /// Expected name
        name: String,
        /// Expected status
        status: String,
    },
}

impl Expectation {
    /// Expect the pet to be missing.
    pub fn absent() -> Self {
        Expectation::Absent
    }

    /// Expect the pet to exist with the given name and status.
    pub fn present(name: impl Into<String>, status: impl Into<String>) -> Self {
        Expectation::Present {
            name: name.into(),
            status: status.into(),
        }
    }

    /// Evaluates the expectation against one fetch.
    ///
    /// A "not found" answer only satisfies [`Expectation::Absent`]; for
    /// [`Expectation::Present`] it means "not created yet".
    pub fn is_met(&self, observation: &Observation) -> bool {
        match self {
            Expectation::Absent => observation.is_not_found(),
            Expectation::Present { name, status } => observation
                .pet()
                .is_some_and(|pet| pet.matches(name, status)),
        }
    }
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expectation::Absent => write!(f, "pet to be absent"),
            Expectation::Present { name, status } => {
                write!(f, "pet with name='{}' and status='{}'", name, status)
            }
        }
    }
}
