use crate::errors::AppError;
use crate::messages::{
    ENROLL_FAILED, EVENT_CREATE_FAILED, EVENT_DELETE_FAILED, EVENT_DELETED, EVENT_FULL,
    EVENT_NOT_FOUND, EVENT_UPDATE_FAILED, LOGIN_FAILED, LOGIN_SUCCEEDED, TRAINING_CREATE_FAILED,
    TRAINING_DELETE_FAILED, TRAINING_DELETED, TRAINING_FULL, TRAINING_NOT_FOUND,
    TRAINING_UPDATE_FAILED,
};
use crate::models::{
    Entity, Event, EventPatch, LoginRequest, MessageResponse, NewEvent, NewTraining, Training,
    TrainingPatch, parse_record_id,
};
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::Html,
};
use tracing::info;
use uuid::Uuid;

type JsonBody<T> = Result<Json<T>, JsonRejection>;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let data = state.data.lock().await;
    Html(render_index(&data))
}

pub async fn list_events(State(state): State<AppState>) -> Json<Vec<Event>> {
    let data = state.data.lock().await;
    Json(data.events.clone())
}

pub async fn create_event(
    State(state): State<AppState>,
    payload: JsonBody<NewEvent>,
) -> Result<(StatusCode, Json<Event>), AppError> {
    let saved = insert_event(&state, payload)
        .await
        .map_err(|err| err.during(EVENT_CREATE_FAILED))?;
    Ok((StatusCode::CREATED, Json(saved)))
}

async fn insert_event(state: &AppState, payload: JsonBody<NewEvent>) -> Result<Event, AppError> {
    let Json(draft) = payload?;
    let event = draft.into_event(Uuid::new_v4())?;
    let saved = state
        .commit(|data| {
            data.events.push(event.clone());
            Ok(event)
        })
        .await?;

    info!(id = %saved.id, title = %saved.title, "event created");
    Ok(saved)
}

/// Replaces the supplied fields. An unknown id answers `null` rather than 404.
pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: JsonBody<EventPatch>,
) -> Result<Json<Option<Event>>, AppError> {
    let updated = patch_event(&state, &id, payload)
        .await
        .map_err(|err| err.during(EVENT_UPDATE_FAILED))?;
    Ok(Json(updated))
}

async fn patch_event(
    state: &AppState,
    id: &str,
    payload: JsonBody<EventPatch>,
) -> Result<Option<Event>, AppError> {
    let Json(patch) = payload?;
    let Some(id) = parse_id(id) else {
        return Ok(None);
    };
    if !contains(&state.data.lock().await.events, id) {
        return Ok(None);
    }

    let updated = state
        .commit(|data| {
            let Some(event) = find_mut(&mut data.events, id) else {
                return Ok(None);
            };
            *event = patch.apply(event)?;
            Ok(Some(event.clone()))
        })
        .await?;

    if updated.is_some() {
        info!(%id, "event updated");
    }
    Ok(updated)
}

/// Deletes by id. Unknown ids still get the confirmation message.
pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let Some(id) = parse_id(&id) else {
        return Ok(Json(MessageResponse::new(EVENT_DELETED)));
    };
    if !contains(&state.data.lock().await.events, id) {
        return Ok(Json(MessageResponse::new(EVENT_DELETED)));
    }

    let removed = state
        .commit(|data| Ok(remove(&mut data.events, id)))
        .await
        .map_err(|err| err.during(EVENT_DELETE_FAILED))?;
    if removed {
        info!(%id, "event deleted");
    }
    Ok(Json(MessageResponse::new(EVENT_DELETED)))
}

pub async fn enroll_volunteer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Event>, AppError> {
    let id = parse_id(&id).ok_or_else(|| AppError::not_found(EVENT_NOT_FOUND))?;
    let event = state
        .commit(|data| {
            let event = find_mut(&mut data.events, id)
                .ok_or_else(|| AppError::not_found(EVENT_NOT_FOUND))?;
            enroll(event, EVENT_FULL)?;
            Ok(event.clone())
        })
        .await
        .map_err(enroll_failure)?;

    info!(%id, volunteers = event.volunteers, "volunteer enrolled");
    Ok(Json(event))
}

pub async fn list_trainings(State(state): State<AppState>) -> Json<Vec<Training>> {
    let data = state.data.lock().await;
    Json(data.trainings.clone())
}

pub async fn create_training(
    State(state): State<AppState>,
    payload: JsonBody<NewTraining>,
) -> Result<(StatusCode, Json<Training>), AppError> {
    let saved = insert_training(&state, payload)
        .await
        .map_err(|err| err.during(TRAINING_CREATE_FAILED))?;
    Ok((StatusCode::CREATED, Json(saved)))
}

async fn insert_training(
    state: &AppState,
    payload: JsonBody<NewTraining>,
) -> Result<Training, AppError> {
    let Json(draft) = payload?;
    let training = draft.into_training(Uuid::new_v4())?;
    let saved = state
        .commit(|data| {
            data.trainings.push(training.clone());
            Ok(training)
        })
        .await?;

    info!(id = %saved.id, title = %saved.title, "training created");
    Ok(saved)
}

pub async fn update_training(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: JsonBody<TrainingPatch>,
) -> Result<Json<Option<Training>>, AppError> {
    let updated = patch_training(&state, &id, payload)
        .await
        .map_err(|err| err.during(TRAINING_UPDATE_FAILED))?;
    Ok(Json(updated))
}

async fn patch_training(
    state: &AppState,
    id: &str,
    payload: JsonBody<TrainingPatch>,
) -> Result<Option<Training>, AppError> {
    let Json(patch) = payload?;
    let Some(id) = parse_id(id) else {
        return Ok(None);
    };
    if !contains(&state.data.lock().await.trainings, id) {
        return Ok(None);
    }

    let updated = state
        .commit(|data| {
            let Some(training) = find_mut(&mut data.trainings, id) else {
                return Ok(None);
            };
            *training = patch.apply(training)?;
            Ok(Some(training.clone()))
        })
        .await?;

    if updated.is_some() {
        info!(%id, "training updated");
    }
    Ok(updated)
}

pub async fn delete_training(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let Some(id) = parse_id(&id) else {
        return Ok(Json(MessageResponse::new(TRAINING_DELETED)));
    };
    if !contains(&state.data.lock().await.trainings, id) {
        return Ok(Json(MessageResponse::new(TRAINING_DELETED)));
    }

    let removed = state
        .commit(|data| Ok(remove(&mut data.trainings, id)))
        .await
        .map_err(|err| err.during(TRAINING_DELETE_FAILED))?;
    if removed {
        info!(%id, "training deleted");
    }
    Ok(Json(MessageResponse::new(TRAINING_DELETED)))
}

pub async fn enroll_participant(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Training>, AppError> {
    let id = parse_id(&id).ok_or_else(|| AppError::not_found(TRAINING_NOT_FOUND))?;
    let training = state
        .commit(|data| {
            let training = find_mut(&mut data.trainings, id)
                .ok_or_else(|| AppError::not_found(TRAINING_NOT_FOUND))?;
            enroll(training, TRAINING_FULL)?;
            Ok(training.clone())
        })
        .await
        .map_err(enroll_failure)?;

    info!(%id, participants = training.participants, "participant enrolled");
    Ok(Json(training))
}

pub async fn login(
    State(state): State<AppState>,
    payload: JsonBody<LoginRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let Json(request) = payload?;
    if !state.credentials.verify(&request.email, &request.password) {
        return Err(AppError::unauthorized(LOGIN_FAILED));
    }

    info!(email = %request.email, "admin signed in");
    Ok(Json(MessageResponse::new(LOGIN_SUCCEEDED)))
}

fn parse_id(raw: &str) -> Option<Uuid> {
    parse_record_id(raw)
}

fn contains<T: Entity>(items: &[T], id: Uuid) -> bool {
    items.iter().any(|item| item.id() == id)
}

fn find_mut<T: Entity>(items: &mut [T], id: Uuid) -> Option<&mut T> {
    items.iter_mut().find(|item| item.id() == id)
}

fn remove<T: Entity>(items: &mut Vec<T>, id: Uuid) -> bool {
    let before = items.len();
    items.retain(|item| item.id() != id);
    items.len() != before
}

fn enroll<T: Entity>(item: &mut T, full: &str) -> Result<(), AppError> {
    if item.is_full() {
        return Err(AppError::conflict(full));
    }
    let headcount = item.headcount_mut();
    *headcount = headcount.saturating_add(1);
    Ok(())
}

/// Capacity and lookup failures keep their own label; store failures get the generic one.
fn enroll_failure(err: AppError) -> AppError {
    if err.status.is_server_error() {
        err.during(ENROLL_FAILED)
    } else {
        err
    }
}
