//! Hyper service exposing the single `/update-telegram` endpoint.

use crate::errors::UpdaterError;
use crate::handler::UpdateHandler;
use crate::metrics_defs;
use crate::protocol::{ErrorBody, UpdateRequest};
use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http_body_util::{BodyExt, Full, combinators::BoxBody};
use hyper::body::Incoming;
use hyper::service::Service;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder;
use serde::Serialize;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;

pub type ServiceBody = BoxBody<Bytes, UpdaterError>;

#[derive(Clone)]
pub struct UpdaterService {
    handler: Arc<UpdateHandler>,
}

impl UpdaterService {
    pub fn new(handler: UpdateHandler) -> Self {
        Self {
            handler: Arc::new(handler),
        }
    }
}

impl Service<Request<Incoming>> for UpdaterService {
    type Response = Response<ServiceBody>;
    type Error = UpdaterError;
    type Future =
        Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send + 'static>>;

    fn call(&self, req: Request<Incoming>) -> Self::Future {
        let handler = self.handler.clone();

        Box::pin(async move {
            let started = Instant::now();
            let response = dispatch(handler, req).await?;

            metrics::counter!(
                metrics_defs::REQUESTS.name,
                "status" => response.status().as_u16().to_string()
            )
            .increment(1);
            metrics::histogram!(metrics_defs::REQUEST_DURATION.name)
                .record(started.elapsed().as_secs_f64());

            Ok(response)
        })
    }
}

/// Routes one request. Every error becomes a JSON `{"error": ...}` response;
/// only response-construction failures escape as `Err`.
async fn dispatch<B>(
    handler: Arc<UpdateHandler>,
    req: Request<B>,
) -> Result<Response<ServiceBody>, UpdaterError>
where
    B: hyper::body::Body + Send + 'static,
    B::Error: std::error::Error,
{
    let method = req.method().clone();
    let path = req.uri().path().to_owned();

    match (method, path.as_str()) {
        (Method::POST, "/update-telegram") => {
            let request = match deserialize_body::<UpdateRequest, B>(req.into_body()).await {
                Ok(request) => request,
                Err(e) => {
                    tracing::warn!(error = %e, "rejecting unreadable request body");
                    return error_response(StatusCode::BAD_REQUEST, &e.to_string());
                }
            };

            match handler.handle(request).await {
                Ok(ack) => json_response(StatusCode::OK, &ack),
                Err(e @ UpdaterError::InvalidRequest(_)) => {
                    tracing::debug!(error = %e, "invalid update request");
                    error_response(StatusCode::BAD_REQUEST, &e.to_string())
                }
                Err(e) => {
                    tracing::error!(error = %e, "update failed");
                    error_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string())
                }
            }
        }
        (Method::GET, "/health") => Ok(Response::new(
            Full::new("ok\n".into()).map_err(|e| match e {}).boxed(),
        )),
        (_, "/update-telegram") => {
            error_response(StatusCode::METHOD_NOT_ALLOWED, "method not allowed")
        }
        _ => error_response(StatusCode::NOT_FOUND, "not found"),
    }
}

/// Deserializes a JSON request body into the specified type.
async fn deserialize_body<T, B>(body: B) -> Result<T, UpdaterError>
where
    T: serde::de::DeserializeOwned,
    B: hyper::body::Body,
    B::Error: std::error::Error,
{
    let bytes = body
        .collect()
        .await
        .map_err(|e| UpdaterError::RequestBodyError(e.to_string()))?
        .to_bytes();

    serde_json::from_slice(&bytes).map_err(|e| UpdaterError::RequestBodyError(e.to_string()))
}

fn json_response<T: Serialize>(
    status: StatusCode,
    value: &T,
) -> Result<Response<ServiceBody>, UpdaterError> {
    let bytes = serde_json::to_vec(value).map(Bytes::from)?;

    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "application/json")
        .body(Full::new(bytes).map_err(|e| match e {}).boxed())
        .map_err(|e| UpdaterError::InternalError(format!("Failed to build response: {e}")))
}

fn error_response(status: StatusCode, message: &str) -> Result<Response<ServiceBody>, UpdaterError> {
    json_response(
        status,
        &ErrorBody {
            error: message.to_string(),
        },
    )
}

/// Binds the listener and serves connections until the process exits.
pub async fn run_http_service(
    host: &str,
    port: u16,
    service: UpdaterService,
) -> Result<(), UpdaterError> {
    let listener = TcpListener::bind(format!("{host}:{port}")).await?;
    tracing::info!(host, port, "listening for update requests");

    serve(listener, service).await
}

async fn serve(listener: TcpListener, service: UpdaterService) -> Result<(), UpdaterError> {
    loop {
        let (stream, _peer_addr) = listener.accept().await?;
        let _ = stream.set_nodelay(true);
        let io = TokioIo::new(stream);
        let svc = service.clone();

        // Hand the connection to hyper; auto-detect h1/h2 on this socket
        tokio::spawn(async move {
            let _ = Builder::new(TokioExecutor::new())
                .serve_connection(io, svc)
                .await;
        });
    }
}
