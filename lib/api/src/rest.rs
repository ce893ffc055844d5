use crate::auth::{resolve_caller, Authenticator};
use actix_cors::Cors;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer, Result as ActixResult};
use pawmatch_core::{Error, Report, ReportId};
use pawmatch_similarity::MatchEngine;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Shared state behind every handler
pub struct AppState {
    pub engine: MatchEngine,
    pub auth: Arc<dyn Authenticator>,
}

impl AppState {
    pub fn new(engine: MatchEngine, auth: Arc<dyn Authenticator>) -> Self {
        Self { engine, auth }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    extractor_ready: bool,
}

pub struct RestApi;

impl RestApi {
    pub async fn start(state: Arc<AppState>, port: u16) -> std::io::Result<()> {
        let data = web::Data::from(state);
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(data.clone())
                .configure(RestApi::configure)
        })
        .bind(("0.0.0.0", port))?
        .run()
        .await
    }

    pub fn configure(cfg: &mut web::ServiceConfig) {
        cfg.route("/health", web::get().to(health))
            .route("/matches", web::get().to(get_matches))
            .route("/reports", web::get().to(list_reports))
            .route("/reports/{id}/reunite", web::post().to(reunite_report))
            .route("/reports/{id}", web::delete().to(delete_report));
    }
}

/// Map a request failure to its HTTP response; no partial results are ever attached
pub fn error_response(e: &Error) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        Error::Unauthorized(_) => HttpResponse::Unauthorized().json(body),
        Error::Forbidden(_) => HttpResponse::Forbidden().json(body),
        Error::ServiceUnavailable(_) => HttpResponse::ServiceUnavailable().json(body),
        Error::ReportNotFound(_) => HttpResponse::NotFound().json(body),
        _ => {
            warn!("request failed: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Internal server error"
            }))
        }
    }
}

async fn health(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        extractor_ready: state.engine.extractor().is_ready(),
    }))
}

async fn get_matches(state: web::Data<AppState>, req: HttpRequest) -> ActixResult<HttpResponse> {
    let caller = match resolve_caller(state.auth.as_ref(), &req) {
        Ok(user) => user,
        Err(e) => return Ok(error_response(&e)),
    };

    let engine = state.engine.clone();
    let outcome = web::block(move || engine.run(&caller))
        .await
        .unwrap_or_else(|e| Err(Error::Internal(e.to_string())));

    match outcome {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(e) => Ok(error_response(&e)),
    }
}

async fn list_reports(state: web::Data<AppState>, req: HttpRequest) -> ActixResult<HttpResponse> {
    if let Err(e) = resolve_caller(state.auth.as_ref(), &req) {
        return Ok(error_response(&e));
    }

    match state.engine.reports().active_reports() {
        Ok(mut reports) => {
            reports.sort_by_key(Report::ordering_key);
            Ok(HttpResponse::Ok().json(serde_json::json!({ "result": reports })))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

async fn reunite_report(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let outcome = owned_report(&state, &req, &path.into_inner()).and_then(|report| {
        state.engine.reports().mark_reunited(&report.id)?;
        info!(report_id = %report.id, pet_id = report.pet_id, "report reunited");
        Ok(())
    });

    match outcome {
        Ok(()) => Ok(HttpResponse::Ok().json(serde_json::json!({ "result": true }))),
        Err(e) => Ok(error_response(&e)),
    }
}

async fn delete_report(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let outcome = owned_report(&state, &req, &path.into_inner()).and_then(|report| {
        state.engine.reports().delete(&report.id)?;
        info!(report_id = %report.id, pet_id = report.pet_id, "report deleted");
        Ok(())
    });

    match outcome {
        Ok(()) => Ok(HttpResponse::Ok().json(serde_json::json!({ "result": true }))),
        Err(e) => Ok(error_response(&e)),
    }
}

/// Authenticate, look up the report and check the caller owns it
fn owned_report(state: &AppState, req: &HttpRequest, raw_id: &str) -> pawmatch_core::Result<Report> {
    let caller = resolve_caller(state.auth.as_ref(), req)?;
    let id: ReportId = raw_id
        .parse()
        .map_err(|_| Error::ReportNotFound(raw_id.to_string()))?;
    let report = state
        .engine
        .reports()
        .get(&id)?
        .ok_or_else(|| Error::ReportNotFound(raw_id.to_string()))?;
    if report.owner_id() != caller {
        return Err(Error::Forbidden(format!("report {} belongs to another user", id)));
    }
    Ok(report)
}
