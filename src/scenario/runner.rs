use std::fmt;

use tracing::{debug, info};

use crate::error::{Result, TapprError};
use crate::scenario::document::{Operation, TestScenario};
use crate::scenario::executor::CommandExecutor;
use crate::template::RenderContext;
use crate::ui;

/// Lifecycle of one scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioState {
    Pending,
    Running,
    Passed,
    Failed,
}

impl fmt::Display for ScenarioState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ScenarioState::Pending => "pending",
            ScenarioState::Running => "running",
            ScenarioState::Passed => "passed",
            ScenarioState::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Final state of a scenario after a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioOutcome {
    pub name: String,
    pub state: ScenarioState,
    pub commands_run: usize,
}

/// Summary of a completed run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub outcomes: Vec<ScenarioOutcome>,
}

impl RunReport {
    pub fn passed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.state == ScenarioState::Passed)
            .count()
    }

    pub fn total_commands(&self) -> usize {
        self.outcomes.iter().map(|o| o.commands_run).sum()
    }
}

/// Executes scenarios in order against one shared context.
///
/// `SET` bindings made by a scenario remain visible to every later scenario
/// of the same run. The first failing check aborts the whole run.
pub struct ScenarioRunner<E: CommandExecutor> {
    executor: E,
    context: RenderContext,
    verbose: bool,
    outcomes: Vec<ScenarioOutcome>,
}

impl<E: CommandExecutor> ScenarioRunner<E> {
    pub fn new(executor: E, context: RenderContext) -> Self {
        ScenarioRunner {
            executor,
            context,
            verbose: false,
            outcomes: Vec::new(),
        }
    }

    /// Print resolved commands and their raw output while running
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn context(&self) -> &RenderContext {
        &self.context
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// States recorded so far, including the failed scenario of an aborted run
    pub fn outcomes(&self) -> &[ScenarioOutcome] {
        &self.outcomes
    }

    /// Run every scenario top to bottom.
    ///
    /// All `run` lines are parsed before the first command executes.
    pub fn run(&mut self, scenarios: &[TestScenario]) -> Result<RunReport> {
        let plans = scenarios
            .iter()
            .map(|s| s.operations().map(|ops| (s, ops)))
            .collect::<Result<Vec<_>>>()?;

        self.outcomes = scenarios
            .iter()
            .map(|s| ScenarioOutcome {
                name: s.name.clone(),
                state: ScenarioState::Pending,
                commands_run: 0,
            })
            .collect();

        for (index, (scenario, operations)) in plans.into_iter().enumerate() {
            self.outcomes[index].state = ScenarioState::Running;
            ui::display_scenario_start(&scenario.name);

            match self.run_scenario(index, scenario, &operations) {
                Ok(()) => {
                    self.outcomes[index].state = ScenarioState::Passed;
                    ui::display_scenario_passed(&scenario.name);
                }
                Err(e) => {
                    self.outcomes[index].state = ScenarioState::Failed;
                    return Err(e);
                }
            }
        }

        info!(scenarios = self.outcomes.len(), "all scenarios passed");
        Ok(RunReport {
            outcomes: self.outcomes.clone(),
        })
    }

    fn run_scenario(
        &mut self,
        index: usize,
        scenario: &TestScenario,
        operations: &[Operation],
    ) -> Result<()> {
        let allowed = scenario.accepted_exit_codes();
        let mut aggregate = String::new();

        for operation in operations {
            match operation {
                Operation::Set { name, value } => {
                    let resolved = self.context.resolve(value);
                    debug!(key = %name, "context value set");
                    self.context.insert(name.clone(), resolved);
                }
                Operation::Command(template) => {
                    let command = self.context.resolve(template);
                    if self.verbose {
                        ui::display_command(&command);
                    }

                    let output = self.executor.execute(&command)?;
                    self.outcomes[index].commands_run += 1;
                    if self.verbose {
                        ui::display_command_output(&output.stdout, &output.stderr);
                    }

                    aggregate.push_str(&output.stdout);
                    aggregate.push('\n');

                    if !allowed.contains(&output.code) {
                        return Err(TapprError::UnexpectedExitCode {
                            command,
                            code: output.code,
                            allowed,
                        });
                    }
                    if scenario.fail_on_stderr && !output.stderr.is_empty() {
                        return Err(TapprError::UnwantedStderr {
                            command,
                            stderr: output.stderr.trim_end().to_string(),
                        });
                    }
                }
            }
        }

        for expected in &scenario.assert_in_output {
            if !aggregate.contains(expected.as_str()) {
                return Err(TapprError::MissingOutput {
                    scenario: scenario.name.clone(),
                    expected: expected.clone(),
                });
            }
        }
        Ok(())
    }
}
