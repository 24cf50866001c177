//! Cloneable façade for driving one session from async code.
//!
//! [`SessionHandle`] serializes every mutation behind an async mutex so that
//! intents are applied strictly one at a time, and broadcasts each
//! [`TurnReport`] to subscribers in turn order. Calls into the [`Narrator`]
//! always happen after the lock has been released.
use std::sync::Arc;

use game_core::{GameState, Intent, LocationView, SessionStatus};
use tokio::sync::{Mutex, broadcast};

use super::errors::{Result, RuntimeError};
use super::narrative::{NarrativeError, Narrator};
use crate::manager::{GameStateManager, TurnReport};
use crate::repository::{SaveArtifact, SaveRepository};

/// Default capacity of the report channel.
const REPORT_CAPACITY: usize = 64;

/// Client-facing handle to a running session.
#[derive(Clone)]
pub struct SessionHandle {
    manager: Arc<Mutex<GameStateManager>>,
    narrator: Option<Arc<dyn Narrator>>,
    reports: broadcast::Sender<TurnReport>,
}

impl SessionHandle {
    pub fn new(manager: GameStateManager) -> Self {
        let (reports, _) = broadcast::channel(REPORT_CAPACITY);
        Self {
            manager: Arc::new(Mutex::new(manager)),
            narrator: None,
            reports,
        }
    }

    pub fn with_narrator(mut self, narrator: Arc<dyn Narrator>) -> Self {
        self.narrator = Some(narrator);
        self
    }

    pub fn narrator(&self) -> Option<&Arc<dyn Narrator>> {
        self.narrator.as_ref()
    }

    /// Applies `intent` and publishes the resulting report.
    ///
    /// The report is sent before the lock is released, so subscribers see
    /// reports in the order the turns were committed.
    pub async fn submit(&self, intent: Intent) -> Result<TurnReport> {
        let mut manager = self.manager.lock().await;
        let report = manager.apply(&intent)?;

        if self.reports.send(report.clone()).is_err() {
            // No subscribers is normal.
            tracing::trace!(turn = report.turn, "no report subscribers");
        }
        drop(manager);
        Ok(report)
    }

    /// Interprets free text through the narrator and submits the intent.
    pub async fn submit_text(&self, text: &str) -> Result<TurnReport> {
        let narrator = self.require_narrator()?;
        let view = self.view().await?;
        let intent = narrator.interpret(text, &view).await?;
        tracing::debug!(text, intent = %intent, "interpreted player text");
        self.submit(intent).await
    }

    /// Renders `report` to prose, or `None` without a narrator.
    pub async fn narrate(&self, report: &TurnReport) -> Result<Option<String>> {
        match &self.narrator {
            Some(narrator) => Ok(Some(narrator.render(report).await?)),
            None => Ok(None),
        }
    }

    /// Subscribe to every report produced after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<TurnReport> {
        self.reports.subscribe()
    }

    pub async fn view(&self) -> Result<LocationView> {
        self.manager.lock().await.view()
    }

    /// Consistent copy of the state and the matching view.
    pub async fn snapshot(&self) -> Result<(GameState, LocationView)> {
        let manager = self.manager.lock().await;
        Ok((manager.state().clone(), manager.view()?))
    }

    pub async fn status(&self) -> SessionStatus {
        self.manager.lock().await.status()
    }

    pub async fn reset_trap(&self, location: &str) -> Result<bool> {
        self.manager.lock().await.reset_trap(location)
    }

    pub async fn save(&self, repository: &dyn SaveRepository, slot: &str) -> Result<SaveArtifact> {
        self.manager.lock().await.save_to(repository, slot)
    }

    pub async fn load(&self, repository: &dyn SaveRepository, slot: &str) -> Result<SessionStatus> {
        self.manager.lock().await.load_from(repository, slot)
    }

    fn require_narrator(&self) -> Result<&Arc<dyn Narrator>> {
        self.narrator.as_ref().ok_or_else(|| {
            RuntimeError::Narrative(NarrativeError::Service("no narrator configured".into()))
        })
    }
}
