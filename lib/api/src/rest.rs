use actix_web::{web, App, HttpResponse, HttpServer, Result as ActixResult};
use actix_cors::Cors;
use parking_lot::RwLock;
use seatx_core::{Error, Participant, PartitionConfig, PartitionResult, Registration, Workflow};
use seatx_storage::StorageManager;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// Shared state behind every handler
pub struct ApiState {
    storage: Arc<StorageManager>,
    workflow: RwLock<Workflow>,
    /// Seed and iteration limits used when a request does not set them
    defaults: PartitionConfig,
}

impl ApiState {
    pub fn new(storage: Arc<StorageManager>, defaults: PartitionConfig) -> Self {
        let registered = registered_count(&storage);
        Self {
            storage,
            workflow: RwLock::new(Workflow::configuring(registered)),
            defaults,
        }
    }

    #[inline]
    pub fn storage(&self) -> &StorageManager {
        &self.storage
    }
}

#[derive(Deserialize)]
struct RegisterRequest {
    name: String,
    email: String,
    interests: Vec<String>,
}

#[derive(Deserialize)]
struct AssignRequest {
    tables: usize,
    capacity: usize,
    seed: Option<u64>,
}

#[derive(Serialize)]
struct ParticipantView {
    name: String,
    email: String,
    interests: Vec<String>,
}

#[derive(Serialize)]
struct MemberView {
    name: String,
    email: String,
    interests: String,
}

#[derive(Serialize)]
struct TableView {
    /// 1-based number shown to guests
    number: usize,
    members: Vec<MemberView>,
}

#[derive(Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
enum TablesResponse {
    Configuring {
        participants: usize,
        suggested: SuggestedParams,
    },
    Result {
        tables: Vec<TableView>,
        deficient: Vec<String>,
        capacity: usize,
        unresolved_excess: usize,
    },
}

#[derive(Serialize)]
struct SuggestedParams {
    tables: usize,
    capacity: usize,
}

pub struct RestApi;

impl RestApi {
    /// Register every route on `cfg`
    pub fn configure(cfg: &mut web::ServiceConfig) {
        cfg.route("/vocabulary", web::get().to(get_vocabulary))
            .route("/participants", web::get().to(list_participants))
            .route("/participants", web::post().to(register_participant))
            .route("/tables", web::get().to(get_tables))
            .route("/tables/assign", web::post().to(assign_tables))
            .route("/tables/reset", web::post().to(reset_tables));
    }

    pub async fn start(state: Arc<ApiState>, port: u16) -> std::io::Result<()> {
        let state = web::Data::from(state);
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(state.clone())
                .configure(RestApi::configure)
        })
        .bind(("0.0.0.0", port))?
        .run()
        .await
    }
}

/// Registrations on file, for parameter suggestions only; a store that
/// cannot be read counts as empty and is logged
fn registered_count(storage: &StorageManager) -> usize {
    match storage.participants() {
        Ok(p) => p.len(),
        Err(e) => {
            warn!("Cannot read registrations: {}", e);
            0
        }
    }
}

fn error_response(e: &Error) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        Error::DuplicateEmail(_) => HttpResponse::Conflict().json(body),
        e if e.is_validation() || e.is_precondition() => HttpResponse::BadRequest().json(body),
        _ => HttpResponse::InternalServerError().json(body),
    }
}

fn participant_view(state: &ApiState, p: &Participant) -> ParticipantView {
    ParticipantView {
        name: p.name.clone(),
        email: p.email.clone(),
        interests: state
            .storage
            .vocabulary()
            .selected_labels(&p.interests)
            .map(str::to_string)
            .collect(),
    }
}

fn tables_view(result: &PartitionResult) -> TablesResponse {
    TablesResponse::Result {
        tables: result
            .iter_tables()
            .map(|table| TableView {
                number: table.label + 1,
                members: table
                    .members
                    .iter()
                    .map(|a| MemberView {
                        name: a.participant.name.clone(),
                        email: a.participant.email.clone(),
                        interests: a.summary.clone(),
                    })
                    .collect(),
            })
            .collect(),
        deficient: result.deficient.clone(),
        capacity: result.config.capacity,
        unresolved_excess: result.balance.unresolved_excess,
    }
}

async fn get_vocabulary(state: web::Data<ApiState>) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.storage.vocabulary().labels()))
}

async fn list_participants(state: web::Data<ApiState>) -> ActixResult<HttpResponse> {
    match state.storage.participants() {
        Ok(participants) => {
            let views: Vec<ParticipantView> = participants
                .iter()
                .map(|p| participant_view(&state, p))
                .collect();
            Ok(HttpResponse::Ok().json(serde_json::json!({ "result": views })))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

async fn register_participant(
    state: web::Data<ApiState>,
    req: web::Json<RegisterRequest>,
) -> ActixResult<HttpResponse> {
    let req = req.into_inner();
    let registration = Registration::new(req.name, req.email, req.interests);

    match state.storage.register(&registration) {
        Ok(participant) => Ok(HttpResponse::Created().json(serde_json::json!({
            "result": participant_view(&state, &participant)
        }))),
        Err(e) => {
            info!("Registration rejected: {}", e);
            Ok(error_response(&e))
        }
    }
}

async fn get_tables(state: web::Data<ApiState>) -> ActixResult<HttpResponse> {
    let workflow = state.workflow.read();
    let response = match &*workflow {
        Workflow::Result { result } => tables_view(result),
        Workflow::Configuring { .. } => {
            // Registrations may have arrived since the phase began.
            let participants = match state.storage.participants() {
                Ok(p) => p.len(),
                Err(e) => return Ok(error_response(&e)),
            };
            let suggested = PartitionConfig::suggested(participants);
            TablesResponse::Configuring {
                participants,
                suggested: SuggestedParams {
                    tables: suggested.tables,
                    capacity: suggested.capacity,
                },
            }
        }
    };
    Ok(HttpResponse::Ok().json(response))
}

async fn assign_tables(
    state: web::Data<ApiState>,
    req: web::Json<AssignRequest>,
) -> ActixResult<HttpResponse> {
    let participants = match state.storage.participants() {
        Ok(p) => p,
        Err(e) => {
            warn!("Cannot read registrations: {}", e);
            return Ok(error_response(&e));
        }
    };

    let config = PartitionConfig {
        tables: req.tables,
        capacity: req.capacity,
        seed: req.seed.unwrap_or(state.defaults.seed),
        ..state.defaults
    };

    let mut workflow = state.workflow.write();
    let assigned = workflow.assign_with(state.storage.vocabulary(), config, &participants, |result| {
        state.storage.save_assignment(result)
    });
    if let Err(e) = assigned {
        warn!("Table assignment failed: {}", e);
        return Ok(error_response(&e));
    }

    match workflow.result() {
        Some(result) => Ok(HttpResponse::Ok().json(tables_view(result))),
        None => Ok(error_response(&Error::Storage("assignment missing".to_string()))),
    }
}

async fn reset_tables(state: web::Data<ApiState>) -> ActixResult<HttpResponse> {
    let participants = registered_count(&state.storage);
    state.workflow.write().reset(participants);
    Ok(HttpResponse::Ok().json(serde_json::json!({ "result": true })))
}
