//! Selection controller: the single writer of the dashboard `Selection`.
//!
//! One tokio task owns the `Selection` value. User commands arrive on an
//! mpsc channel and are answered through a oneshot; backend fetches run as
//! separate tasks and report back on a completion channel together with the
//! ticket they were issued under. Every change is published as a snapshot on
//! a `watch` channel, so any number of readers see a consistent value.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info, warn};

use crate::backend_client::{BackendError, MatchBackend};
use crate::evaluation::profile::ViewProfile;
use crate::evaluation::record::MatchEvaluation;
use crate::presentation::applicant_display_name;
use crate::selection::machine::{
    Applied, JobTicket, JobTransition, MatchTicket, MatchedApplicant, Selection, Tab,
};

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("Selection controller has stopped")]
    Closed,
}

/// Outcome of one user command.
#[derive(Debug, Clone)]
pub struct Transition {
    /// False when the command was rejected in the current phase.
    pub accepted: bool,
    pub snapshot: Selection,
}

enum Command {
    SelectJob(String, oneshot::Sender<Transition>),
    SelectApplicant(String, oneshot::Sender<Transition>),
    SetTab(Tab, oneshot::Sender<Transition>),
    OpenDebate(oneshot::Sender<Transition>),
    CloseDebate(oneshot::Sender<Transition>),
}

enum Completion {
    Applicants {
        ticket: JobTicket,
        outcome: Option<Vec<MatchedApplicant>>,
    },
    Evaluation {
        ticket: MatchTicket,
        outcome: Option<MatchEvaluation>,
    },
}

/// Cheap-clone handle to the controller task.
#[derive(Clone)]
pub struct SelectionController {
    commands: mpsc::UnboundedSender<Command>,
    state: watch::Receiver<Selection>,
}

impl SelectionController {
    /// Starts the controller task. It runs until every handle is dropped.
    pub fn spawn(backend: Arc<dyn MatchBackend>, view: ViewProfile) -> Self {
        let (commands_tx, commands_rx) = mpsc::unbounded_channel();
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(Selection::new(view));

        let actor = SelectionActor {
            backend,
            selection: Selection::new(view),
            commands: commands_rx,
            completions: completions_rx,
            completions_tx,
            state: state_tx,
        };
        tokio::spawn(actor.run());

        Self {
            commands: commands_tx,
            state: state_rx,
        }
    }

    pub fn snapshot(&self) -> Selection {
        self.state.borrow().clone()
    }

    pub async fn select_job(&self, job_id: &str) -> Result<Transition, ControllerError> {
        let job_id = job_id.to_string();
        self.request(|reply| Command::SelectJob(job_id, reply)).await
    }

    pub async fn select_applicant(
        &self,
        applicant_id: &str,
    ) -> Result<Transition, ControllerError> {
        let applicant_id = applicant_id.to_string();
        self.request(|reply| Command::SelectApplicant(applicant_id, reply))
            .await
    }

    pub async fn set_active_tab(&self, tab: Tab) -> Result<Transition, ControllerError> {
        self.request(|reply| Command::SetTab(tab, reply)).await
    }

    pub async fn open_debate(&self) -> Result<Transition, ControllerError> {
        self.request(Command::OpenDebate).await
    }

    pub async fn close_debate(&self) -> Result<Transition, ControllerError> {
        self.request(Command::CloseDebate).await
    }

    async fn request(
        &self,
        command: impl FnOnce(oneshot::Sender<Transition>) -> Command,
    ) -> Result<Transition, ControllerError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.commands
            .send(command(reply_tx))
            .map_err(|_| ControllerError::Closed)?;
        reply_rx.await.map_err(|_| ControllerError::Closed)
    }
}

struct SelectionActor {
    backend: Arc<dyn MatchBackend>,
    selection: Selection,
    commands: mpsc::UnboundedReceiver<Command>,
    completions: mpsc::UnboundedReceiver<Completion>,
    completions_tx: mpsc::UnboundedSender<Completion>,
    state: watch::Sender<Selection>,
}

impl SelectionActor {
    async fn run(mut self) {
        loop {
            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(command) => self.handle_command(command),
                    None => break,
                },
                Some(completion) = self.completions.recv() => self.handle_completion(completion),
            }
        }
        debug!("Selection controller stopped");
    }

    fn handle_command(&mut self, command: Command) {
        let (accepted, reply) = match command {
            Command::SelectJob(job_id, reply) => {
                match self.selection.select_job(&job_id) {
                    JobTransition::Collapsed => info!("Collapsed job {job_id}"),
                    JobTransition::Fetch(ticket) => {
                        info!("Selected job {job_id}");
                        self.spawn_applicants(ticket);
                    }
                }
                (true, reply)
            }
            Command::SelectApplicant(applicant_id, reply) => {
                match self.selection.select_applicant(&applicant_id) {
                    Some(ticket) => {
                        info!(
                            "Selected applicant {applicant_id} for job {}",
                            ticket.job_id
                        );
                        self.spawn_evaluation(ticket);
                        (true, reply)
                    }
                    None => (false, reply),
                }
            }
            Command::SetTab(tab, reply) => (self.selection.set_active_tab(tab), reply),
            Command::OpenDebate(reply) => (self.selection.open_debate(), reply),
            Command::CloseDebate(reply) => (self.selection.close_debate(), reply),
        };

        self.publish();
        // The caller may have gone away; the transition stands regardless.
        let _ = reply.send(Transition {
            accepted,
            snapshot: self.selection.clone(),
        });
    }

    fn handle_completion(&mut self, completion: Completion) {
        let applied = match completion {
            Completion::Applicants { ticket, outcome } => {
                let applied = self.selection.apply_applicants(&ticket, outcome);
                if applied == Applied::Stale {
                    debug!("Discarded applicants for abandoned job {}", ticket.job_id);
                }
                applied
            }
            Completion::Evaluation { ticket, outcome } => {
                let applied = self.selection.apply_evaluation(&ticket, outcome);
                if applied == Applied::Stale {
                    debug!(
                        "Discarded evaluation for abandoned match {}/{}",
                        ticket.applicant_id, ticket.job_id
                    );
                }
                applied
            }
        };

        if applied == Applied::Applied {
            self.publish();
        }
    }

    fn publish(&self) {
        self.state.send_replace(self.selection.clone());
    }

    fn spawn_applicants(&self, ticket: JobTicket) {
        let backend = Arc::clone(&self.backend);
        let done = self.completions_tx.clone();
        tokio::spawn(async move {
            let outcome = load_applicants(backend.as_ref(), &ticket.job_id).await;
            let _ = done.send(Completion::Applicants { ticket, outcome });
        });
    }

    fn spawn_evaluation(&self, ticket: MatchTicket) {
        let backend = Arc::clone(&self.backend);
        let done = self.completions_tx.clone();
        tokio::spawn(async move {
            let outcome =
                load_evaluation(backend.as_ref(), &ticket.applicant_id, &ticket.job_id).await;
            let _ = done.send(Completion::Evaluation { ticket, outcome });
        });
    }
}

/// Matched applicant ids plus one detail lookup per id for the display name.
/// A job with no recorded matches yields an empty list.
async fn load_applicants(
    backend: &dyn MatchBackend,
    job_id: &str,
) -> Option<Vec<MatchedApplicant>> {
    let ids = match backend.matched_applicants(job_id).await {
        Ok(ids) => ids,
        Err(BackendError::NotFound(msg)) => {
            debug!("No matches recorded for job {job_id}: {msg}");
            Vec::new()
        }
        Err(e) => {
            warn!("Failed to load matches for job {job_id}: {e}");
            return None;
        }
    };

    let mut applicants = Vec::with_capacity(ids.len());
    for id in ids {
        let detail = match backend.entity_detail(&id).await {
            Ok(detail) => Some(detail),
            Err(e) => {
                debug!("No detail for applicant {id}: {e}");
                None
            }
        };
        applicants.push(MatchedApplicant {
            display_name: applicant_display_name(detail.as_ref()),
            id,
        });
    }
    Some(applicants)
}

async fn load_evaluation(
    backend: &dyn MatchBackend,
    applicant_id: &str,
    job_id: &str,
) -> Option<MatchEvaluation> {
    match backend.match_detail(applicant_id, job_id).await {
        Ok(detail) => {
            let evaluation = MatchEvaluation::from_detail(detail);
            debug!(
                "Loaded evaluation for {applicant_id}/{job_id} ({} agent records)",
                evaluation.agents().count()
            );
            Some(evaluation)
        }
        Err(BackendError::NotFound(msg)) => {
            debug!("No evaluation for {applicant_id}/{job_id}: {msg}");
            None
        }
        Err(e) => {
            warn!("Failed to load evaluation for {applicant_id}/{job_id}: {e}");
            None
        }
    }
}
