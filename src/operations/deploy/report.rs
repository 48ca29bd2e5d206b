//! Deployment steps and the per-run outcome report

use std::fmt;

use crate::error::DeployError;
#[cfg(test)]
use crate::error::Result;

/// One step of a deployment, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// Delete the previously installed bundle
    Remove,
    /// Copy the freshly built bundle into place
    Copy,
    /// Start the host application
    Launch,
}

impl Step {
    /// All steps in the order they run
    pub const ALL: [Step; 3] = [Step::Remove, Step::Copy, Step::Launch];

    /// Line printed on stdout right before the step runs
    pub fn progress_message(self) -> &'static str {
        match self {
            Step::Remove => "Deleting old plugin",
            Step::Copy => "Copying new plugin",
            Step::Launch => "Opening Reaper",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Step::Remove => "remove",
            Step::Copy => "copy",
            Step::Launch => "launch",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What happened to a step
#[derive(Debug)]
pub enum StepOutcome {
    Done,
    Failed(DeployError),
    /// Not attempted: launch disabled, or an earlier step failed under fail-fast
    Skipped,
}

impl StepOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, StepOutcome::Failed(_))
    }
}

/// Ordered record of every step of a run
#[derive(Debug, Default)]
pub struct DeployReport {
    steps: Vec<(Step, StepOutcome)>,
}

impl DeployReport {
    pub fn record(&mut self, step: Step, outcome: StepOutcome) {
        self.steps.push((step, outcome));
    }

    pub fn outcome(&self, step: Step) -> Option<&StepOutcome> {
        self.steps
            .iter()
            .find(|(recorded, _)| *recorded == step)
            .map(|(_, outcome)| outcome)
    }

    /// Failed steps with their errors, in execution order
    pub fn failures(&self) -> impl Iterator<Item = (Step, &DeployError)> {
        self.steps.iter().filter_map(|(step, outcome)| match outcome {
            StepOutcome::Failed(err) => Some((*step, err)),
            _ => None,
        })
    }

    #[cfg(test)]
    pub fn first_error(&self) -> Option<&DeployError> {
        self.failures().next().map(|(_, err)| err)
    }

    /// True when no step failed (skipped steps do not count as failures)
    pub fn is_success(&self) -> bool {
        !self.steps.iter().any(|(_, outcome)| outcome.is_failed())
    }

    /// Convert into a `Result`, keeping the first error
    #[cfg(test)]
    pub fn into_result(self) -> Result<()> {
        for (_, outcome) in self.steps {
            if let StepOutcome::Failed(err) = outcome {
                return Err(err);
            }
        }
        Ok(())
    }
}
