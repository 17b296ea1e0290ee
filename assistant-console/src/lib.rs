//! Interactive console for the policy assistant.
//!
//! One event loop owns the [`SessionController`]. It multiplexes prompt lines
//! from stdin, completions of in-flight asks and results of service lookups,
//! handling one event at a time, and prints the rendered view after every
//! state change.
//!
//! Nothing in the loop awaits the network: asks and lookups (`:docs`, `:doc`,
//! `:health`, `:feedback`) run as spawned tasks and report back over
//! channels, so `:clear` and `:quit` are always read promptly.

use std::io::Write;
use std::sync::Arc;

use answer_client::{
    AnswerBackend, Feedback, health_service::HealthService,
    services::answer_service::AnswerService,
};
use ask_session::{
    AskStatus, Clipboard, Completion, EscalationConfig, SessionController, SystemClipboard,
    copy_answer, present,
};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::mpsc,
};
use tracing::{debug, info};

pub mod commands;
pub mod core {
    pub mod app_state;
}
pub mod error_handler;
pub mod progress;
pub mod render;

use crate::{
    commands::{Command, HELP},
    core::app_state::AppState,
    error_handler::{ConsoleError, ConsoleResult},
    progress::Spinner,
};

/// Runs the console until `:quit` or end of input.
pub async fn start() -> ConsoleResult<()> {
    let state = AppState::from_env()?;
    info!(
        base_url = %state.answer.base_url,
        top_k = state.answer.top_k,
        "policy assistant console starting"
    );

    let (mut console, mut inbox) = Console::new(state, Box::new(SystemClipboard::default()))?;

    console.print("Policy Assistant. Type a question, or :help for commands.")?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.map_err(ConsoleError::Input)? else {
                    debug!("stdin closed");
                    break;
                };
                if console.handle_line(&line)? == Flow::Quit {
                    break;
                }
            }
            Some(completion) = inbox.completions.recv() => {
                console.handle_completion(completion)?;
            }
            Some(text) = inbox.lookups.recv() => {
                console.print(&text)?;
            }
        }
    }

    console.stop_spinner();
    info!("policy assistant console stopped");
    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Receivers drained by the event loop next to stdin.
struct Inbox {
    completions: mpsc::UnboundedReceiver<Completion>,
    /// Rendered results of spawned lookups.
    lookups: mpsc::UnboundedReceiver<String>,
}

struct Console {
    controller: SessionController,
    service: Arc<AnswerService>,
    health: Arc<HealthService>,
    escalation: EscalationConfig,
    clipboard: Box<dyn Clipboard>,
    spinner: Option<Spinner>,
    lookups: mpsc::UnboundedSender<String>,
}

impl Console {
    fn new(state: AppState, clipboard: Box<dyn Clipboard>) -> ConsoleResult<(Self, Inbox)> {
        let service = Arc::new(AnswerService::new(state.answer.clone())?);
        let health = Arc::new(HealthService::new(&state.answer)?);
        let backend: Arc<dyn AnswerBackend> = service.clone();
        let (controller, completions) = SessionController::new(backend, state.answer.top_k);
        let (lookups_tx, lookups) = mpsc::unbounded_channel();

        let console = Self {
            controller,
            service,
            health,
            escalation: state.escalation,
            clipboard,
            spinner: None,
            lookups: lookups_tx,
        };
        Ok((
            console,
            Inbox {
                completions,
                lookups,
            },
        ))
    }

    /// Handles one prompt line. Never waits on the network.
    fn handle_line(&mut self, line: &str) -> ConsoleResult<Flow> {
        let cmd = match Command::parse(line) {
            Ok(cmd) => cmd,
            Err(e) => {
                self.print(&render::error(&e.to_string()))?;
                return Ok(Flow::Continue);
            }
        };

        match cmd {
            Command::Question(text) => {
                self.controller.edit(text);
                self.ask();
            }
            Command::Ask => self.ask(),
            Command::Clear => {
                self.controller.clear();
                self.stop_spinner();
                self.print(&render::notice("Cleared."))?;
            }
            Command::Copy => {
                let msg = match copy_answer(self.controller.session(), self.clipboard.as_ref()) {
                    Ok(n) => render::notice(&format!("Copied {n} characters.")),
                    Err(e) => render::error(&e.to_string()),
                };
                self.print(&msg)?;
            }
            Command::Docs => {
                let service = Arc::clone(&self.service);
                self.spawn_lookup("docs", async move {
                    match service.list_docs().await {
                        Ok(list) => render::docs(&list),
                        Err(e) => render::error(&e.user_message()),
                    }
                });
            }
            Command::Doc(id) => {
                let service = Arc::clone(&self.service);
                self.spawn_lookup("doc", async move {
                    match service.document(&id).await {
                        Ok(doc) => render::document(&doc),
                        Err(e) => render::error(&e.user_message()),
                    }
                });
            }
            Command::Health => {
                let health = Arc::clone(&self.health);
                self.spawn_lookup("health", async move {
                    render::health(&health.check().await)
                });
            }
            Command::Feedback { helpful, comment } => self.feedback(helpful, comment)?,
            Command::Help => self.print(HELP)?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// No-op while loading or when the question is blank.
    fn ask(&mut self) {
        if self.controller.session().is_loading() {
            if let Some(spinner) = &self.spinner {
                spinner.message("Still waiting for the previous answer...");
            }
            return;
        }
        if self.controller.ask().is_some() {
            self.spinner = Some(Spinner::start("Asking..."));
        }
    }

    fn handle_completion(&mut self, completion: Completion) -> ConsoleResult<()> {
        if !self.controller.apply(completion) {
            return Ok(());
        }
        self.stop_spinner();
        let view = present(self.controller.session(), &self.escalation);
        self.print(&render::view(&view))
    }

    fn feedback(&mut self, helpful: bool, comment: Option<String>) -> ConsoleResult<()> {
        let answer_id = match self.controller.session().status() {
            AskStatus::Resolved(answer) => answer.answer_id().map(str::to_string),
            _ => {
                return self.print(&render::error("no answer to rate"));
            }
        };
        let Some(answer_id) = answer_id else {
            return self.print(&render::error("this answer cannot be rated"));
        };

        let feedback = Feedback {
            answer_id,
            helpful,
            comment,
        };
        let service = Arc::clone(&self.service);
        self.spawn_lookup("feedback", async move {
            match service.send_feedback(&feedback).await {
                Ok(()) => render::notice("Thanks for the feedback."),
                Err(e) => render::error(&e.user_message()),
            }
        });
        Ok(())
    }

    /// Runs `task` off the event loop; its rendered output arrives on [`Inbox::lookups`].
    fn spawn_lookup<F>(&self, what: &'static str, task: F)
    where
        F: Future<Output = String> + Send + 'static,
    {
        let tx = self.lookups.clone();
        debug!(lookup = what, "lookup started");
        tokio::spawn(async move {
            if tx.send(task.await).is_err() {
                debug!(lookup = what, "lookup result dropped: console closed");
            }
        });
    }

    fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish();
        }
    }

    fn print(&self, text: &str) -> ConsoleResult<()> {
        if text.is_empty() {
            return Ok(());
        }
        let mut out = std::io::stdout().lock();
        writeln!(out, "{}", text.trim_end())
            .and_then(|_| out.flush())
            .map_err(ConsoleError::Output)
    }
}
