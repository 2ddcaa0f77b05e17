// Availability probe: one collection read that tells the session whether
// the store can be used this cycle, and hands back the snapshot.

use reqwest::{Method, StatusCode};

use crate::api::{Request, Transport};
use crate::client::VehicleApi;
use crate::error::ProbeFailure;
use crate::model::Vehicle;

/// Result of a probe. With an id filter, "reachable" also requires the
/// id to be present, so the two filtered cases get their own variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Unreachable(ProbeFailure),
    /// No filter was given; the snapshot may be empty.
    Reachable(Vec<Vehicle>),
    ReachableWithId(Vec<Vehicle>),
    ReachableWithoutId { wanted: String },
}

impl ProbeOutcome {
    pub fn is_reachable(&self) -> bool {
        matches!(
            self,
            ProbeOutcome::Reachable(_) | ProbeOutcome::ReachableWithId(_)
        )
    }

    pub fn into_snapshot(self) -> Option<Vec<Vehicle>> {
        match self {
            ProbeOutcome::Reachable(snapshot) | ProbeOutcome::ReachableWithId(snapshot) => {
                Some(snapshot)
            }
            _ => None,
        }
    }
}

impl<T: Transport> VehicleApi<T> {
    /// Read the whole collection. Pass `wanted_id` only when membership
    /// matters; connectivity checks must leave it `None`.
    pub fn probe(&self, wanted_id: Option<&str>) -> ProbeOutcome {
        let outcome = self.read_snapshot().map(|snapshot| match wanted_id {
            None => ProbeOutcome::Reachable(snapshot),
            Some(wanted) if snapshot.iter().any(|v| v.has_id(wanted)) => {
                ProbeOutcome::ReachableWithId(snapshot)
            }
            Some(wanted) => ProbeOutcome::ReachableWithoutId {
                wanted: wanted.to_string(),
            },
        });
        let outcome = outcome.unwrap_or_else(ProbeOutcome::Unreachable);
        tracing::info!(reachable = outcome.is_reachable(), ?wanted_id, "probe finished");
        outcome
    }

    fn read_snapshot(&self) -> Result<Vec<Vehicle>, ProbeFailure> {
        let reply = self.send(Request::new(Method::GET, self.endpoint().collection()))?;
        if reply.status != StatusCode::OK {
            return Err(ProbeFailure::UnexpectedStatus(reply.status));
        }
        serde_json::from_str(&reply.body).map_err(|e| ProbeFailure::MalformedSnapshot(e.to_string()))
    }
}
