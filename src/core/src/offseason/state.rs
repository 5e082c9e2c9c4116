use crate::offseason::{GateContext, OffSeasonPhase, OffSeasonTask, TaskAction};
use log::{debug, info};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffSeasonEvent {
    pub phase: OffSeasonPhase,
    pub day: u32,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaseAdvance {
    Advanced {
        from: OffSeasonPhase,
        to: OffSeasonPhase,
    },
    /// The last phase was finished; the offseason is over.
    Completed,
    /// Nothing changed.
    Refused(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffSeasonProgress {
    pub phase: OffSeasonPhase,
    pub phase_number: usize,
    pub total_phases: usize,
    pub required_completed: usize,
    pub required_total: usize,
    pub day: u32,
    pub is_complete: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffSeasonState {
    pub year: u16,
    pub current_phase: OffSeasonPhase,
    pub tasks: Vec<OffSeasonTask>,
    pub day: u32,
    pub completed_phases: Vec<OffSeasonPhase>,
    pub event_log: Vec<OffSeasonEvent>,
    pub is_complete: bool,
}

impl OffSeasonState {
    pub fn begin(year: u16) -> Self {
        let mut state = OffSeasonState {
            year,
            current_phase: OffSeasonPhase::first(),
            tasks: Vec::new(),
            day: 0,
            completed_phases: Vec::new(),
            event_log: Vec::new(),
            is_complete: false,
        };

        state.enter_phase(OffSeasonPhase::first());
        state
    }

    fn enter_phase(&mut self, phase: OffSeasonPhase) {
        self.current_phase = phase;
        self.day = 0;
        self.tasks = phase.definition().tasks.iter().map(|task| task.instantiate()).collect();

        self.log(format!("Entered {}", phase.label()));

        for index in 0..self.tasks.len() {
            if self.tasks[index].action == TaskAction::Auto {
                self.tasks[index].completed = true;
                let message = format!("{} completed automatically", self.tasks[index].label);
                self.log(message);
            }
        }
    }

    fn log(&mut self, message: String) {
        debug!("offseason {} day {}: {}", self.current_phase.label(), self.day, message);

        self.event_log.push(OffSeasonEvent {
            phase: self.current_phase,
            day: self.day,
            message,
        });
    }

    pub fn task(&self, task_id: &str) -> Option<&OffSeasonTask> {
        self.tasks.iter().find(|task| task.id == task_id)
    }

    fn mark_done(&mut self, task_id: &str, accepts: impl Fn(&TaskAction) -> bool) -> bool {
        let Some(task) = self
            .tasks
            .iter_mut()
            .find(|task| task.id == task_id && accepts(&task.action))
        else {
            return false;
        };

        if task.completed {
            return true;
        }

        task.completed = true;
        let message = format!("{} completed", task.label);
        self.log(message);

        true
    }

    /// Visiting the phase screen completes its view tasks. Returns how many
    /// were newly completed.
    pub fn visit_phase(&mut self) -> usize {
        let pending: Vec<String> = self
            .tasks
            .iter()
            .filter(|task| task.action == TaskAction::View && !task.completed)
            .map(|task| task.id.clone())
            .collect();

        for id in &pending {
            self.mark_done(id, |action| *action == TaskAction::View);
        }

        pending.len()
    }

    /// Completes a navigate or view task in the current phase. Validate and
    /// auto tasks cannot be completed by hand.
    pub fn complete_task(&mut self, task_id: &str) -> bool {
        self.mark_done(task_id, |action| matches!(action, TaskAction::Navigate | TaskAction::View))
    }

    /// Re-checks a validate task against the current facts. The task is
    /// complete exactly while its rule holds.
    pub fn validate_task(&mut self, task_id: &str, context: &GateContext) -> Result<(), String> {
        let Some(index) = self.tasks.iter().position(|task| task.id == task_id) else {
            return Err(format!("No task '{}' in {}", task_id, self.current_phase.label()));
        };

        let TaskAction::Validate(rule) = self.tasks[index].action else {
            return Err(format!("Task '{}' is not validated", self.tasks[index].label));
        };

        match rule.check(context) {
            Ok(()) => {
                self.mark_done(task_id, |action| matches!(action, TaskAction::Validate(_)));
                Ok(())
            }
            Err(reason) => {
                self.tasks[index].completed = false;
                Err(reason)
            }
        }
    }

    pub fn advance_day(&mut self) {
        self.day += 1;
    }

    /// Why the current phase cannot be left yet, if anything.
    pub fn blocker(&self, context: &GateContext) -> Option<String> {
        if self.is_complete {
            return Some("The offseason is already complete".to_string());
        }

        if let Some(task) = self.tasks.iter().find(|task| task.is_blocking()) {
            return Some(format!(
                "Cannot leave {}: required task '{}' is not complete",
                self.current_phase.label(),
                task.label
            ));
        }

        self.current_phase
            .definition()
            .gate
            .and_then(|gate| gate.check(context).err())
    }

    pub fn advance_phase(&mut self, context: &GateContext) -> PhaseAdvance {
        if let Some(reason) = self.blocker(context) {
            return PhaseAdvance::Refused(reason);
        }

        let from = self.current_phase;
        self.log(format!("Finished {}", from.label()));
        self.completed_phases.push(from);

        match from.next() {
            Some(to) => {
                info!("offseason {}: {} -> {}", self.year, from.label(), to.label());
                self.enter_phase(to);

                PhaseAdvance::Advanced { from, to }
            }
            None => {
                info!("offseason {} complete", self.year);
                self.is_complete = true;

                PhaseAdvance::Completed
            }
        }
    }

    pub fn progress(&self) -> OffSeasonProgress {
        let required = self.tasks.iter().filter(|task| task.required);

        OffSeasonProgress {
            phase: self.current_phase,
            phase_number: self.current_phase.number(),
            total_phases: crate::offseason::PHASES.len(),
            required_completed: required.clone().filter(|task| task.completed).count(),
            required_total: required.count(),
            day: self.day,
            is_complete: self.is_complete,
        }
    }
}
