//! Non-interactive session driver.
//!
//! Pulls intents from an [`IntentProvider`] and submits them through a
//! [`SessionHandle`] until the provider runs dry, the session ends, or the
//! intent budget is spent. Rejections are logged and skipped.
use game_core::SessionStatus;

use crate::api::{IntentProvider, Result, RuntimeError, SessionHandle};

/// Limits for one self-play run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelfPlayConfig {
    /// Maximum number of intents requested from the provider.
    pub max_intents: usize,
}

impl SelfPlayConfig {
    pub const DEFAULT_MAX_INTENTS: usize = 500;
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        Self {
            max_intents: Self::DEFAULT_MAX_INTENTS,
        }
    }
}

/// Why a self-play run stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    ProviderExhausted,
    SessionOver,
    IntentLimit,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelfPlaySummary {
    pub applied: usize,
    pub rejected: usize,
    pub final_turn: u64,
    pub status: SessionStatus,
    pub stop: StopReason,
}

pub async fn run_self_play(
    handle: &SessionHandle,
    provider: &dyn IntentProvider,
    config: SelfPlayConfig,
) -> Result<SelfPlaySummary> {
    let mut applied = 0;
    let mut rejected = 0;

    let stop = loop {
        if applied + rejected >= config.max_intents {
            break StopReason::IntentLimit;
        }

        let (state, view) = handle.snapshot().await?;
        if state.is_over() {
            break StopReason::SessionOver;
        }
        let Some(intent) = provider.next_intent(&state, &view).await? else {
            break StopReason::ProviderExhausted;
        };

        match handle.submit(intent.clone()).await {
            Ok(report) => {
                applied += 1;
                tracing::debug!(intent = %intent, turn = report.turn, "self-play step");
            }
            Err(RuntimeError::Rejected(rejection)) => {
                rejected += 1;
                tracing::warn!(intent = %intent, reason = rejection.code(), "self-play intent rejected: {rejection}");
            }
            Err(RuntimeError::SessionOver) => break StopReason::SessionOver,
            Err(error) => return Err(error),
        }
    };

    let (state, _) = handle.snapshot().await?;
    let summary = SelfPlaySummary {
        applied,
        rejected,
        final_turn: state.turn,
        status: state.status,
        stop,
    };
    tracing::info!(
        applied,
        rejected,
        turn = summary.final_turn,
        stop = ?summary.stop,
        "self-play finished"
    );
    Ok(summary)
}
