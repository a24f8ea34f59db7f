use blood_core::{RollEvent, RollOutcome};
use chrono::{DateTime, Utc};
use tracing::{debug, error};

use crate::services::{BloodLedger, SharedConfig};

/// What happened to an inbound chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Not from the roll bot in the blood channel.
    Dropped,
    NoSuccesses,
    Consumed(RollOutcome),
    /// The ledger failed; the message was dropped and the error logged.
    Failed(String),
}

/// Filters chat messages down to roll results and feeds them to the ledger.
#[derive(Clone)]
pub struct MessageGate {
    config: SharedConfig,
    ledger: BloodLedger,
}

impl MessageGate {
    pub(super) fn new(config: SharedConfig, ledger: BloodLedger) -> Self {
        Self { config, ledger }
    }

    pub fn accepts(&self, event: &RollEvent) -> bool {
        self.config.roll_source.matches(event)
    }

    pub fn handle(&self, event: &RollEvent) -> GateDecision {
        self.handle_at(event, Utc::now())
    }

    pub fn handle_at(&self, event: &RollEvent, now: DateTime<Utc>) -> GateDecision {
        if !self.accepts(event) {
            debug!(
                author_id = %event.author_id,
                channel_id = %event.channel_id,
                "dropping message outside the roll channel"
            );
            return GateDecision::Dropped;
        }
        match self.ledger.process_roll_event_at(event, now) {
            Ok(Some(outcome)) => GateDecision::Consumed(outcome),
            Ok(None) => GateDecision::NoSuccesses,
            Err(err) => {
                error!(error = %err, "failed to process roll message");
                GateDecision::Failed(err.to_string())
            }
        }
    }
}
