// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use classbook_api::{
    AvailabilityDay, BookingLedger, CancelBookingRequest, CancelBookingResponse,
    CreateBookingRequest, CreateBookingResponse, DayAvailability, GetAvailabilityResponse,
    LedgerError, ListTemplatesResponse, RegisterTemplateRequest, RegisterTemplateResponse,
    RequestValidationError, booking_info, list_templates, parse_date_param, parse_time_param,
    parse_weekday_param, register_template, template_info,
};
use classbook_domain::{Booking, BookingId, ClassTemplate, MemberId, TemplateId};
use classbook_persistence::Persistence;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// ClassBook Server - HTTP server for the class booking ledger
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Bounded wait for a contended class instance, in milliseconds
    #[arg(long, default_value_t = 2000)]
    lock_wait_ms: u64,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The booking ledger; the only writer of booking state.
    ledger: Arc<BookingLedger>,
    /// The persistence layer, for catalog operations.
    persistence: Arc<Persistence>,
}

/// Query parameters for the availability endpoint.
#[derive(Debug, Deserialize)]
struct AvailabilityQuery {
    /// The class template.
    template_id: i64,
    /// Start of the date range (inclusive), `YYYY-MM-DD`.
    from: String,
    /// End of the date range (inclusive), `YYYY-MM-DD`.
    to: String,
    /// Optional member whose booking status to include per day.
    member_id: Option<String>,
}

/// Error response type.
#[derive(Debug, Clone, serde::Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<LedgerError> for HttpError {
    fn from(err: LedgerError) -> Self {
        let status: StatusCode = match err {
            LedgerError::NotFound { .. } => StatusCode::NOT_FOUND,
            LedgerError::DuplicateBooking { .. } => StatusCode::CONFLICT,
            LedgerError::InactiveClass { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            LedgerError::Busy { .. } => StatusCode::SERVICE_UNAVAILABLE,
            LedgerError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            LedgerError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<RequestValidationError> for HttpError {
    fn from(err: RequestValidationError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: err.to_string(),
        }
    }
}

/// Handler for POST `/bookings` endpoint.
///
/// Creates a booking for a member in one class instance.
async fn handle_create_booking(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateBookingRequest>,
) -> Result<Json<CreateBookingResponse>, HttpError> {
    info!(
        member_id = %req.member_id,
        template_id = req.template_id,
        date = %req.date,
        waitlist_only = req.waitlist_only,
        "Handling create_booking request"
    );

    let date = parse_date_param(&req.date)?;
    let member: MemberId = MemberId::new(req.member_id);

    let booking: Booking = app_state.ledger.create_booking(
        &member,
        TemplateId::new(req.template_id),
        date,
        req.waitlist_only,
    )?;

    Ok(Json(CreateBookingResponse {
        booking: booking_info(&booking),
    }))
}

/// Handler for POST `/bookings/cancel` endpoint.
///
/// Cancels a member's booking; a vacated confirmed seat is refilled from
/// the waitlist before the response is produced.
async fn handle_cancel_booking(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CancelBookingRequest>,
) -> Result<Json<CancelBookingResponse>, HttpError> {
    info!(
        booking_id = req.booking_id,
        member_id = %req.member_id,
        "Handling cancel_booking request"
    );

    let member: MemberId = MemberId::new(req.member_id);
    let summary = app_state
        .ledger
        .cancel_booking(BookingId::new(req.booking_id), &member)?;

    Ok(Json(CancelBookingResponse::from(&summary)))
}

/// Handler for GET `/availability` endpoint.
///
/// Returns per-day seat counts for every occurrence of a template in a
/// date range.
async fn handle_get_availability(
    AxumState(app_state): AxumState<AppState>,
    Query(params): Query<AvailabilityQuery>,
) -> Result<Json<GetAvailabilityResponse>, HttpError> {
    info!(
        template_id = params.template_id,
        from = %params.from,
        to = %params.to,
        "Handling get_availability request"
    );

    let from = parse_date_param(&params.from)?;
    let to = parse_date_param(&params.to)?;
    let caller: Option<MemberId> = params.member_id.map(MemberId::new);

    let days: Vec<DayAvailability> = app_state.ledger.get_availability(
        TemplateId::new(params.template_id),
        from,
        to,
        caller.as_ref(),
    )?;

    Ok(Json(GetAvailabilityResponse {
        template_id: params.template_id,
        days: days.iter().map(AvailabilityDay::from).collect(),
    }))
}

/// Handler for POST `/templates` endpoint.
///
/// Registers a new class template.
async fn handle_register_template(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<RegisterTemplateRequest>,
) -> Result<Json<RegisterTemplateResponse>, HttpError> {
    info!(
        weekday = %req.weekday,
        start_time = %req.start_time,
        capacity = req.capacity,
        "Handling register_template request"
    );

    let weekday = parse_weekday_param(&req.weekday)?;
    let start_time = parse_time_param(&req.start_time)?;
    let end_time = parse_time_param(&req.end_time)?;

    let template: ClassTemplate = register_template(
        &app_state.persistence,
        weekday,
        start_time,
        end_time,
        req.capacity,
    )?;

    Ok(Json(RegisterTemplateResponse {
        template: template_info(&template),
    }))
}

/// Handler for GET `/templates` endpoint.
///
/// Lists the class template catalog.
async fn handle_list_templates(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ListTemplatesResponse>, HttpError> {
    info!("Handling list_templates request");

    let templates: Vec<ClassTemplate> = list_templates(&app_state.persistence)?;

    Ok(Json(ListTemplatesResponse {
        templates: templates.iter().map(template_info).collect(),
    }))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/bookings", post(handle_create_booking))
        .route("/bookings/cancel", post(handle_cancel_booking))
        .route("/availability", get(handle_get_availability))
        .route("/templates", post(handle_register_template))
        .route("/templates", get(handle_list_templates))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing ClassBook Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Arc<Persistence> = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Arc::new(Persistence::new_with_file(db_path)?)
    } else {
        info!("Using in-memory database");
        Arc::new(Persistence::new_in_memory()?)
    };

    let ledger: BookingLedger = BookingLedger::with_lock_wait(
        Arc::clone(&persistence),
        Duration::from_millis(args.lock_wait_ms),
    );

    let app_state: AppState = AppState {
        ledger: Arc::new(ledger),
        persistence,
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
