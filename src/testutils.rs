use crate::protocol::PostId;
use crate::wordpress::{ApiError, ContentApi};
use async_trait::async_trait;
use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Incoming};
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

/// One request captured by [`RecordingServer`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: HashMap<String, String>,
    pub body: JsonValue,
}

/// Localhost HTTP server that records every request it receives and answers
/// with a fixed status and body. Stands in for the WordPress REST API.
pub struct RecordingServer {
    port: u16,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl RecordingServer {
    pub async fn spawn(status: StatusCode) -> Self {
        Self::spawn_with_body(status, "").await
    }

    pub async fn spawn_with_body(status: StatusCode, reply: &'static str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test server");
        let port = listener.local_addr().unwrap().port();

        let requests: Arc<Mutex<Vec<RecordedRequest>>> = Arc::new(Mutex::new(Vec::new()));
        let recorded = requests.clone();

        tokio::spawn(async move {
            loop {
                let (stream, _) = match listener.accept().await {
                    Ok(conn) => conn,
                    Err(_) => return,
                };
                let io = TokioIo::new(stream);
                let recorded = recorded.clone();

                tokio::spawn(async move {
                    let service = service_fn(move |req: Request<Incoming>| {
                        let recorded = recorded.clone();
                        async move {
                            let (parts, body) = req.into_parts();
                            let bytes = body
                                .collect()
                                .await
                                .map(|collected| collected.to_bytes())
                                .unwrap_or_else(|_| Bytes::new());

                            let headers = parts
                                .headers
                                .iter()
                                .filter_map(|(name, value)| {
                                    value
                                        .to_str()
                                        .ok()
                                        .map(|v| (name.as_str().to_string(), v.to_string()))
                                })
                                .collect();

                            recorded.lock().unwrap().push(RecordedRequest {
                                method: parts.method.to_string(),
                                path: parts.uri.path().to_string(),
                                headers,
                                body: serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null),
                            });

                            let response = Response::builder()
                                .status(status)
                                .body(Full::new(Bytes::from(reply)))
                                .unwrap();
                            Ok::<_, Infallible>(response)
                        }
                    });

                    let _ = Builder::new(TokioExecutor::new())
                        .serve_connection(io, service)
                        .await;
                });
            }
        });

        RecordingServer { port, requests }
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

/// One call observed by [`MockContentApi`].
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    Metadata {
        post_id: String,
        key: String,
        value: JsonValue,
    },
    Title {
        post_id: String,
        title: String,
    },
}

/// In-process `ContentApi` that records calls, optionally failing the n-th
/// one to exercise the abort-on-first-failure path.
pub struct MockContentApi {
    calls: Mutex<Vec<ApiCall>>,
    fail_on_call: Option<usize>,
}

impl MockContentApi {
    pub fn new() -> Self {
        MockContentApi {
            calls: Mutex::new(Vec::new()),
            fail_on_call: None,
        }
    }

    /// Fails the call with the given zero-based index.
    pub fn failing_on(call: usize) -> Self {
        MockContentApi {
            calls: Mutex::new(Vec::new()),
            fail_on_call: Some(call),
        }
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: ApiCall) -> Result<(), ApiError> {
        let mut calls = self.calls.lock().unwrap();
        let index = calls.len();
        calls.push(call);

        if self.fail_on_call == Some(index) {
            return Err(ApiError::Status {
                status: 502,
                body: "upstream exploded".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ContentApi for MockContentApi {
    async fn write_metadata(
        &self,
        post_id: &PostId,
        key: &str,
        value: JsonValue,
    ) -> Result<(), ApiError> {
        self.record(ApiCall::Metadata {
            post_id: post_id.to_string(),
            key: key.to_string(),
            value,
        })
    }

    async fn update_title(&self, post_id: &PostId, title: &str) -> Result<(), ApiError> {
        self.record(ApiCall::Title {
            post_id: post_id.to_string(),
            title: title.to_string(),
        })
    }
}
