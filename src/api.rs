// HTTP plumbing: a small blocking transport that talks to the record
// store, and the endpoint that knows how its URLs are shaped.
//
// The `Transport` trait is the seam between request/response handling
// and the network. `HttpTransport` is the reqwest-backed implementation
// used by the binary; tests plug in a scripted fake.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use reqwest::blocking::Client;
use reqwest::{Method, StatusCode};
use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::TransportError;

/// One outgoing request. The body, when present, is sent as JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub body: Option<serde_json::Value>,
}

impl Request {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Request {
            method,
            url: url.into(),
            body: None,
        }
    }

    pub fn with_json<B: Serialize>(
        method: Method,
        url: impl Into<String>,
        body: &B,
    ) -> Result<Self, TransportError> {
        let body = serde_json::to_value(body).map_err(|e| TransportError::Encode(e.to_string()))?;
        Ok(Request {
            method,
            url: url.into(),
            body: Some(body),
        })
    }
}

/// Status and raw body of a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: StatusCode,
    pub body: String,
}

impl Reply {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Reply {
            status,
            body: body.into(),
        }
    }
}

/// Sends a request and waits for the whole reply.
pub trait Transport {
    fn execute(&self, request: Request) -> Result<Reply, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: Request) -> Result<Reply, TransportError> {
        (**self).execute(request)
    }
}

/// Blocking reqwest client with a per-request timeout.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    show_progress: bool,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(HttpTransport {
            client,
            show_progress: true,
        })
    }

    /// Turn the spinner off, e.g. when output is being captured.
    pub fn without_progress(mut self) -> Self {
        self.show_progress = false;
        self
    }

    fn spinner(&self) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message("Contacting server...");
        spinner.enable_steady_tick(Duration::from_millis(100));
        Some(spinner)
    }
}

impl Transport for HttpTransport {
    fn execute(&self, request: Request) -> Result<Reply, TransportError> {
        let spinner = self.spinner();

        let mut builder = self.client.request(request.method, &request.url);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        let result = builder
            .send()
            .map_err(TransportError::from)
            .and_then(|res| {
                let status = res.status();
                let body = res.text().map_err(TransportError::from)?;
                Ok(Reply { status, body })
            });

        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }
        result
    }
}

/// Base URL of the collection: `<server>:<port>/<database>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    base: String,
}

impl Endpoint {
    pub fn new(server_address: &str, port: u32, database: &str) -> Self {
        let server = server_address.trim_end_matches('/');
        let server = if server.contains("://") {
            server.to_string()
        } else {
            format!("http://{}", server)
        };
        Endpoint {
            base: format!("{}:{}/{}", server, port, database),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Endpoint::new(&config.server_address, config.port, &config.database)
    }

    pub fn collection(&self) -> &str {
        &self.base
    }

    pub fn item(&self, id: &str) -> String {
        format!("{}/{}", self.base, id)
    }
}
