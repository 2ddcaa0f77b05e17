// CRUD request issuer.
//
// `VehicleApi` turns payloads into HTTP requests against the endpoint and
// maps every reply onto an `Outcome`. Nothing here retries or prompts;
// the session decides what to ask and what to show.

use std::fmt;

use reqwest::{Method, StatusCode};

use crate::api::{Endpoint, Reply, Request, Transport};
use crate::error::TransportError;
use crate::model::{NewVehicle, Vehicle, VehicleUpdate};
use crate::ui::{render_table, Tone};

/// What a single operation amounted to, from the user's point of view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Listed(Vec<Vehicle>),
    Empty,
    Created(NewVehicle),
    Deleted(String),
    Updated { id: String, payload: VehicleUpdate },
    NotFound(String),
    ServerError(StatusCode),
    CommunicationError(TransportError),
    /// No request was issued because the operation needs an id.
    MissingId,
}

impl Outcome {
    pub fn tone(&self) -> Tone {
        match self {
            Outcome::Listed(_) => Tone::Plain,
            Outcome::Created(_) | Outcome::Deleted(_) | Outcome::Updated { .. } => Tone::Success,
            Outcome::Empty | Outcome::NotFound(_) | Outcome::MissingId => Tone::Warning,
            Outcome::ServerError(_) | Outcome::CommunicationError(_) => Tone::Error,
        }
    }

    pub fn is_success(&self) -> bool {
        self.tone() == Tone::Success || matches!(self, Outcome::Listed(_) | Outcome::Empty)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Listed(vehicles) => f.write_str(&render_table(vehicles)),
            Outcome::Empty => f.write_str("*** Database is empty ***"),
            Outcome::Created(payload) => {
                let json = serde_json::to_string(payload).map_err(|_| fmt::Error)?;
                write!(f, "The entry {} has been posted to the vehicle database.", json)
            }
            Outcome::Deleted(id) => write!(
                f,
                "The entry of {} has been deleted successfully from the database.",
                id
            ),
            Outcome::Updated { id, payload } => {
                let json = serde_json::to_string(payload).map_err(|_| fmt::Error)?;
                write!(
                    f,
                    "The new data {} has been updated in the entry with id {}.",
                    json, id
                )
            }
            Outcome::NotFound(id) => write!(f, "No entry found with the id of {}.", id),
            Outcome::ServerError(status) => write!(f, "Server error! ({})", status),
            Outcome::CommunicationError(err) => write!(f, "Communication error! {}", err),
            Outcome::MissingId => {
                f.write_str("A car ID is required for this operation; nothing was sent.")
            }
        }
    }
}

/// List the snapshot fetched for this cycle. No request is made.
pub fn list(snapshot: &[Vehicle]) -> Outcome {
    if snapshot.is_empty() {
        Outcome::Empty
    } else {
        Outcome::Listed(snapshot.to_vec())
    }
}

pub struct VehicleApi<T> {
    transport: T,
    endpoint: Endpoint,
}

impl<T: Transport> VehicleApi<T> {
    pub fn new(transport: T, endpoint: Endpoint) -> Self {
        VehicleApi {
            transport,
            endpoint,
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub(crate) fn send(&self, request: Request) -> Result<Reply, TransportError> {
        tracing::debug!(method = %request.method, url = %request.url, "sending request");
        match self.transport.execute(request) {
            Ok(reply) => {
                tracing::debug!(status = %reply.status, "reply received");
                Ok(reply)
            }
            Err(err) => {
                tracing::debug!(error = %err, "request failed");
                Err(err)
            }
        }
    }

    /// POST a full record. Only 201 counts as created.
    pub fn create(&self, payload: &NewVehicle) -> Outcome {
        let request = match Request::with_json(Method::POST, self.endpoint.collection(), payload) {
            Ok(request) => request,
            Err(err) => return Outcome::CommunicationError(err),
        };
        match self.send(request) {
            Ok(reply) if reply.status == StatusCode::CREATED => Outcome::Created(payload.clone()),
            Ok(reply) => Outcome::ServerError(reply.status),
            Err(err) => Outcome::CommunicationError(err),
        }
    }

    /// DELETE by id. The store answers 204 when there was nothing to delete.
    pub fn delete(&self, id: &str) -> Outcome {
        if id.is_empty() {
            return Outcome::MissingId;
        }
        match self.send(Request::new(Method::DELETE, self.endpoint.item(id))) {
            Ok(reply) => match reply.status {
                StatusCode::OK => Outcome::Deleted(id.to_string()),
                StatusCode::NO_CONTENT => Outcome::NotFound(id.to_string()),
                status => Outcome::ServerError(status),
            },
            Err(err) => Outcome::CommunicationError(err),
        }
    }

    /// PUT the update payload to the record's path.
    pub fn update(&self, id: &str, payload: &VehicleUpdate) -> Outcome {
        if id.is_empty() {
            return Outcome::MissingId;
        }
        let request = match Request::with_json(Method::PUT, self.endpoint.item(id), payload) {
            Ok(request) => request,
            Err(err) => return Outcome::CommunicationError(err),
        };
        match self.send(request) {
            Ok(reply) => match reply.status {
                StatusCode::OK => Outcome::Updated {
                    id: id.to_string(),
                    payload: payload.clone(),
                },
                StatusCode::NOT_FOUND => Outcome::NotFound(id.to_string()),
                status => Outcome::ServerError(status),
            },
            Err(err) => Outcome::CommunicationError(err),
        }
    }
}
