//! Webhook relay: receives WhatsApp Business notifications, validates
//! introductions, and acts on the verdict.
//!
//! Routes:
//! - `GET  /webhook`: verification handshake
//! - `POST /webhook`: inbound notifications
//! - `GET  /health`, `GET /status`
//! - `POST /api/validate`: validate arbitrary text, JSON in/out

pub mod payload;
pub mod policy;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use tower_http::cors::CorsLayer;
use tracing::{debug, error, info, warn};

use crate::channels::Outbound;
use crate::config::RelayConfig;
use crate::error::RelayError;
use crate::validation::IntroductionValidator;

use payload::{
    ChangeValue, ValidateRequest, ValidateResponse, VerifyQuery, WebhookMessage, WebhookPayload,
};
use policy::{InboundContext, RelayAction};

const SERVICE_NAME: &str = "WhatsApp Introduction Validator";
const BUSINESS_ACCOUNT_OBJECT: &str = "whatsapp_business_account";

/// Source of the evaluation instant.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// In-memory verdict counters, reset on restart.
#[derive(Debug, Default)]
pub struct RelayCounters {
    pub validated: AtomicU64,
    pub accepted: AtomicU64,
    pub rejected: AtomicU64,
}

/// Why an inbound message was not validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NotText,
    UnmonitoredGroup,
    NotIntroduction,
}

/// What happened to one inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageOutcome {
    Skipped(SkipReason),
    Validated { is_valid: bool },
}

/// Shared handler state.
#[derive(Clone)]
pub struct RelayState {
    pub validator: Arc<IntroductionValidator>,
    pub outbound: Arc<dyn Outbound>,
    pub config: Arc<RelayConfig>,
    pub counters: Arc<RelayCounters>,
    clock: Clock,
    started_at: Instant,
}

impl RelayState {
    pub fn new(
        validator: Arc<IntroductionValidator>,
        outbound: Arc<dyn Outbound>,
        config: RelayConfig,
    ) -> Self {
        Self {
            validator,
            outbound,
            config: Arc::new(config),
            counters: Arc::new(RelayCounters::default()),
            clock: Arc::new(Utc::now),
            started_at: Instant::now(),
        }
    }

    /// Replace the wall clock, e.g. with a fixed instant.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    /// Validate one inbound message and carry out the resulting actions.
    pub async fn process_message(
        &self,
        message: &WebhookMessage,
        value: &ChangeValue,
    ) -> MessageOutcome {
        let Some(text) = message.text.as_ref().filter(|_| message.kind == "text") else {
            return MessageOutcome::Skipped(SkipReason::NotText);
        };

        let sender_name = value.sender_name(&message.from);
        let is_group = policy::is_group_message(&message.from);
        info!(
            sender = %message.from,
            sender_name,
            context = if is_group { "group" } else { "individual" },
            "Processing message"
        );

        if is_group && !policy::should_monitor_group(&self.config, &message.from) {
            debug!(group = %message.from, "Group is not monitored, skipping");
            return MessageOutcome::Skipped(SkipReason::UnmonitoredGroup);
        }

        if !policy::is_introduction_message(&text.body) {
            debug!("Message does not look like an introduction, skipping");
            return MessageOutcome::Skipped(SkipReason::NotIntroduction);
        }

        let result = self.validator.validate(&text.body, &self.now());
        self.counters.validated.fetch_add(1, Ordering::Relaxed);
        if result.is_valid {
            self.counters.accepted.fetch_add(1, Ordering::Relaxed);
            info!(sender_name, "Valid introduction");
        } else {
            self.counters.rejected.fetch_add(1, Ordering::Relaxed);
            info!(
                sender_name,
                errors = %result.messages().join(", "),
                "Invalid introduction"
            );
        }

        let inbound = InboundContext {
            chat_id: &message.from,
            message_id: &message.id,
            sender_name,
            is_group,
        };
        for action in policy::plan_actions(&self.config, &inbound, &result) {
            self.execute(action).await;
        }

        MessageOutcome::Validated {
            is_valid: result.is_valid,
        }
    }

    async fn execute(&self, action: RelayAction) {
        let outcome = match &action {
            RelayAction::React {
                to,
                message_id,
                emoji,
            } => self.outbound.react(to, message_id, emoji).await,
            RelayAction::Reply { to, body, reply_to } => {
                self.outbound.send_text(to, body, Some(reply_to)).await
            }
            RelayAction::Welcome { group_id, body } => {
                self.outbound.send_text(group_id, body, None).await
            }
        };
        if let Err(e) = outcome {
            error!(channel = self.outbound.name(), ?action, "Outbound action failed: {}", e);
        }
    }
}

/// GET /webhook
async fn verify_webhook(
    State(state): State<RelayState>,
    Query(query): Query<VerifyQuery>,
) -> impl IntoResponse {
    let token_ok = match (&state.config.verify_token, &query.verify_token) {
        (Some(expected), Some(given)) => expected == given,
        _ => false,
    };
    if query.mode.as_deref() == Some("subscribe") && token_ok {
        info!("Webhook verified");
        (StatusCode::OK, query.challenge.unwrap_or_default()).into_response()
    } else {
        warn!(mode = ?query.mode, "Webhook verification failed");
        (StatusCode::FORBIDDEN, "Forbidden").into_response()
    }
}

/// POST /webhook
async fn receive_webhook(
    State(state): State<RelayState>,
    Json(payload): Json<WebhookPayload>,
) -> impl IntoResponse {
    if payload.object != BUSINESS_ACCOUNT_OBJECT {
        debug!(object = %payload.object, "Ignoring non-WhatsApp webhook object");
        return (StatusCode::OK, "OK");
    }

    for entry in &payload.entry {
        for change in entry.changes.iter().filter(|c| c.field == "messages") {
            for message in &change.value.messages {
                state.process_message(message, &change.value).await;
            }
        }
    }
    (StatusCode::OK, "OK")
}

/// GET /health
async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339(),
        "service": SERVICE_NAME,
    }))
}

/// GET /status
async fn status(State(state): State<RelayState>) -> impl IntoResponse {
    let counters = &state.counters;
    Json(serde_json::json!({
        "status": "running",
        "uptime_secs": state.started_at.elapsed().as_secs(),
        "timestamp": Utc::now().to_rfc3339(),
        "validated": counters.validated.load(Ordering::Relaxed),
        "accepted": counters.accepted.load(Ordering::Relaxed),
        "rejected": counters.rejected.load(Ordering::Relaxed),
    }))
}

/// POST /api/validate
async fn validate_text(
    State(state): State<RelayState>,
    Json(request): Json<ValidateRequest>,
) -> impl IntoResponse {
    let now = match request.timestamp.as_deref() {
        Some(raw) => match DateTime::parse_from_rfc3339(raw) {
            Ok(ts) => ts.with_timezone(&Utc),
            Err(e) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(serde_json::json!({"error": format!("invalid timestamp: {e}")})),
                )
                    .into_response();
            }
        },
        None => state.now(),
    };

    let result = state.validator.validate(&request.text, &now);
    let response = ValidateResponse {
        is_valid: result.is_valid,
        errors: result.errors.iter().map(|e| e.message.clone()).collect(),
        expected_greeting: state.validator.time_of_day(&now).expected_greeting(),
    };
    Json(response).into_response()
}

/// Build the relay router.
pub fn relay_routes(state: RelayState) -> Router {
    let api = Router::new()
        .route("/api/validate", post(validate_text))
        .layer(CorsLayer::permissive());

    Router::new()
        .route("/webhook", get(verify_webhook).post(receive_webhook))
        .route("/health", get(health))
        .route("/status", get(status))
        .merge(api)
        .with_state(state)
}

/// Bind and serve until Ctrl-C.
pub async fn serve(state: RelayState) -> Result<(), RelayError> {
    let addr = format!("0.0.0.0:{}", state.config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| RelayError::Bind {
            addr: addr.clone(),
            reason: e.to_string(),
        })?;
    info!(%addr, outbound = state.outbound.name(), "Webhook relay started");

    axum::serve(listener, relay_routes(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await
        .map_err(|e| RelayError::Serve(e.to_string()))
}
