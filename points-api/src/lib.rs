//! HTTP surface for the points ledger. hyper v1.+
//!
//! Three routes, matching the original service contract:
//! - `POST /add` records a grant,
//! - `POST /spend` allocates a spend and returns per-payer deductions,
//! - `GET /points` returns the current balance map.

use std::{convert::Infallible, error::Error, sync::Arc};

use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use ledger::LedgerController;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

pub struct PointsApi {
    controller: Arc<LedgerController>,
}

#[derive(Debug, Deserialize)]
struct TransactionRequest {
    payer: String,
    points: i64,
    timestamp: String,
}

#[derive(Debug, Deserialize)]
struct SpendRequest {
    points: i64,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl PointsApi {
    pub fn new(controller: Arc<LedgerController>) -> Self {
        Self { controller }
    }

    pub async fn serve(
        self: &Arc<Self>,
        listener: TcpListener,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        loop {
            let (socket, peer) = listener.accept().await?;
            let io = TokioIo::new(socket);
            let api = Arc::clone(self);
            let service = service_fn(move |req| {
                let api = Arc::clone(&api);
                async move { Ok::<_, Infallible>(api.handle(req).await) }
            });
            tokio::spawn(async move {
                if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                    warn!("error serving connection from {peer}: {err:?}");
                }
            });
        }
    }

    async fn handle<B>(&self, req: Request<B>) -> Response<Full<Bytes>>
    where
        B: hyper::body::Body,
    {
        let method = req.method().clone();
        let path = req.uri().path().to_string();
        let body = match req.into_body().collect().await {
            Ok(collected) => collected.to_bytes(),
            Err(_) => {
                return error_response(StatusCode::BAD_REQUEST, "failed to read request body")
            }
        };
        debug!("{method} {path} ({} byte body)", body.len());

        match (method, path.as_str()) {
            (Method::GET, "/points") => self.get_points(),
            (Method::POST, "/add") => self.add_transaction(&body),
            (Method::POST, "/spend") => self.spend_points(&body),
            _ => error_response(StatusCode::NOT_FOUND, "no such route"),
        }
    }

    fn get_points(&self) -> Response<Full<Bytes>> {
        json_response(StatusCode::OK, &self.controller.balances())
    }

    fn add_transaction(&self, body: &[u8]) -> Response<Full<Bytes>> {
        let request: TransactionRequest = match serde_json::from_slice(body) {
            Ok(request) => request,
            Err(err) => return error_response(StatusCode::BAD_REQUEST, &err.to_string()),
        };
        match self
            .controller
            .grant(&request.payer, request.points, &request.timestamp)
        {
            Ok(()) => {
                debug!("recorded {} points from {}", request.points, request.payer);
                json_response(StatusCode::OK, &"Transaction added successfully")
            }
            Err(err) => rejected(err),
        }
    }

    fn spend_points(&self, body: &[u8]) -> Response<Full<Bytes>> {
        let request: SpendRequest = match serde_json::from_slice(body) {
            Ok(request) => request,
            Err(err) => return error_response(StatusCode::BAD_REQUEST, &err.to_string()),
        };
        match self.controller.spend(request.points) {
            Ok(deductions) => {
                info!(
                    "spend of {} points satisfied by {} payers",
                    request.points,
                    deductions.len()
                );
                json_response(StatusCode::OK, &deductions)
            }
            Err(err) => rejected(err),
        }
    }
}

fn rejected(err: ledger::LedgerError) -> Response<Full<Bytes>> {
    warn!("request rejected: {err}");
    error_response(StatusCode::BAD_REQUEST, &err.to_string())
}

fn json_response<T: Serialize>(status: StatusCode, value: &T) -> Response<Full<Bytes>> {
    match serde_json::to_vec(value) {
        Ok(encoded) => Response::builder()
            .status(status)
            .header("content-type", "application/json")
            .body(Full::new(Bytes::from(encoded)))
            .expect("static response parts"),
        Err(err) => error_response(StatusCode::INTERNAL_SERVER_ERROR, &err.to_string()),
    }
}

fn error_response(status: StatusCode, message: &str) -> Response<Full<Bytes>> {
    let body = serde_json::to_vec(&ErrorBody {
        error: message.to_string(),
    })
    .unwrap_or_else(|_| br#"{"error":"internal"}"#.to_vec());
    Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Full::new(Bytes::from(body)))
        .expect("static response parts")
}
