use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use folio_common::ContactError;
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::form::ContactForm;
use crate::storage::ContactStorage;

pub const CONTACT_PATH: &str = "/api/contact";

/// JSON body of every contact response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
}

impl ContactResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            id: None,
        }
    }
}

type SharedStorage = Arc<dyn ContactStorage>;

pub fn router(storage: SharedStorage) -> Router {
    Router::new()
        .route(CONTACT_PATH, post(submit_contact))
        .with_state(storage)
}

/// Bind `addr` and serve the contact router until `shutdown` resolves.
pub async fn serve(
    addr: SocketAddr,
    storage: SharedStorage,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "contact endpoint listening");
    axum::serve(listener, router(storage))
        .with_graceful_shutdown(shutdown)
        .await
}

async fn submit_contact(
    State(storage): State<SharedStorage>,
    payload: Result<Json<ContactForm>, JsonRejection>,
) -> (StatusCode, Json<ContactResponse>) {
    let form = match payload {
        Ok(Json(form)) => form,
        Err(rejection) => {
            warn!("malformed contact submission: {}", rejection.body_text());
            return (
                StatusCode::BAD_REQUEST,
                Json(ContactResponse::failure(format!(
                    "Invalid form submission: {}",
                    rejection.body_text()
                ))),
            );
        }
    };

    if let Err(e) = form.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ContactResponse::failure(format!("Validation error: {e}"))),
        );
    }

    match storage.create_contact_message(form) {
        Ok(stored) => {
            info!(id = stored.id, "contact message received");
            (
                StatusCode::CREATED,
                Json(ContactResponse {
                    success: true,
                    message: "Message received".into(),
                    id: Some(stored.id),
                }),
            )
        }
        Err(ContactError::Validation(message)) => (
            StatusCode::BAD_REQUEST,
            Json(ContactResponse::failure(format!("Validation error: {message}"))),
        ),
        Err(e) => {
            error!("failed to store contact message: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ContactResponse::failure("Server error")),
            )
        }
    }
}
