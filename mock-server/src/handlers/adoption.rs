use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post, put},
    Json, Router,
};
use tracing::info;

use crate::{
    next_id, now, AdoptionApplication, AdoptionForm, ApiResult, AppError, Db, FormStatus, ReviewDecision,
};

pub(crate) fn router() -> Router<Db> {
    Router::new()
        .route("/formularios", get(list_forms))
        .route("/formularios/{id}", get(get_form).delete(delete_form))
        .route("/formularios/usuario/{user_id}", get(by_user))
        .route("/formularios/animal/{animal_id}", get(by_animal))
        .route("/formularios/estado/{status}", get(by_status))
        .route("/formularios/adoptar/{user_id}/{animal_id}", post(submit))
        .route("/formularios/{id}/aprobar", put(approve))
        .route("/formularios/{id}/rechazar", put(reject))
}

fn not_found() -> AppError {
    AppError::NotFound("Formulario no encontrado".to_string())
}

async fn list_forms(State(db): State<Db>, headers: HeaderMap) -> ApiResult<Json<Vec<AdoptionForm>>> {
    let store = db.read().await;
    store.require_admin(&headers)?;
    Ok(Json(store.forms.values().cloned().collect()))
}

async fn get_form(State(db): State<Db>, Path(id): Path<i64>) -> ApiResult<Json<AdoptionForm>> {
    let store = db.read().await;
    store.forms.get(&id).cloned().map(Json).ok_or_else(not_found)
}

async fn by_user(State(db): State<Db>, Path(user_id): Path<i64>) -> Json<Vec<AdoptionForm>> {
    let store = db.read().await;
    Json(store.forms.values().filter(|form| form.user_id == user_id).cloned().collect())
}

async fn by_animal(State(db): State<Db>, Path(animal_id): Path<i64>) -> Json<Vec<AdoptionForm>> {
    let store = db.read().await;
    Json(store.forms.values().filter(|form| form.animal_id == animal_id).cloned().collect())
}

async fn by_status(
    State(db): State<Db>,
    Path(status): Path<String>,
    headers: HeaderMap,
) -> ApiResult<Json<Vec<AdoptionForm>>> {
    let store = db.read().await;
    store.require_admin(&headers)?;
    let status = FormStatus::from_path(&status)
        .ok_or_else(|| AppError::BadRequest(format!("Estado desconocido: {status}")))?;
    Ok(Json(store.forms.values().filter(|form| form.status == status).cloned().collect()))
}

/// Applicant contact fields are copied from the user's account.
async fn submit(
    State(db): State<Db>,
    Path((user_id, animal_id)): Path<(i64, i64)>,
    Json(input): Json<AdoptionApplication>,
) -> ApiResult<(StatusCode, Json<AdoptionForm>)> {
    if input.address.trim().is_empty() {
        return Err(AppError::BadRequest("La dirección es requerida".to_string()));
    }
    let mut store = db.write().await;
    let user = store.user(user_id)?.clone();
    let animal = store
        .animals
        .get(&animal_id)
        .ok_or_else(|| AppError::NotFound("Animal no encontrado".to_string()))?;
    if animal.adopted {
        return Err(AppError::Conflict("El animal ya fue adoptado".to_string()));
    }
    let duplicate = store.forms.values().any(|form| {
        form.user_id == user_id && form.animal_id == animal_id && form.status == FormStatus::Pending
    });
    if duplicate {
        return Err(AppError::Conflict(
            "Ya existe una solicitud pendiente para este animal".to_string(),
        ));
    }

    let form = AdoptionForm {
        id: next_id(&store.forms),
        user_id,
        animal_id,
        applicant_name: user.name,
        applicant_email: user.email,
        applicant_phone: user.phone,
        address: input.address.trim().to_string(),
        housing_type: input.housing_type,
        has_window_screens: input.has_window_screens,
        lives_in_apartment: input.lives_in_apartment,
        has_other_pets: input.has_other_pets,
        motivation: input.motivation,
        status: FormStatus::Pending,
        admin_comments: None,
        created_at: now(),
        reviewed_at: None,
    };
    store.forms.insert(form.id, form.clone());
    info!(form_id = form.id, user_id, animal_id, "adoption form submitted");
    Ok((StatusCode::CREATED, Json(form)))
}

async fn approve(
    State(db): State<Db>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(decision): Json<ReviewDecision>,
) -> ApiResult<Json<AdoptionForm>> {
    review(db, id, headers, decision, FormStatus::Approved).await
}

async fn reject(
    State(db): State<Db>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(decision): Json<ReviewDecision>,
) -> ApiResult<Json<AdoptionForm>> {
    review(db, id, headers, decision, FormStatus::Rejected).await
}

/// Only pending forms can be reviewed; approval also marks the animal
/// adopted.
async fn review(
    db: Db,
    id: i64,
    headers: HeaderMap,
    decision: ReviewDecision,
    outcome: FormStatus,
) -> ApiResult<Json<AdoptionForm>> {
    let mut store = db.write().await;
    store.require_admin(&headers)?;
    let form = store.forms.get_mut(&id).ok_or_else(not_found)?;
    if form.status != FormStatus::Pending {
        return Err(AppError::Conflict("El formulario ya fue revisado".to_string()));
    }
    form.status = outcome;
    form.admin_comments = Some(decision.comments).filter(|text| !text.trim().is_empty());
    form.reviewed_at = Some(now());
    let form = form.clone();

    if outcome == FormStatus::Approved {
        if let Some(animal) = store.animals.get_mut(&form.animal_id) {
            animal.adopted = true;
        }
    }
    info!(form_id = id, status = ?outcome, "adoption form reviewed");
    Ok(Json(form))
}

async fn delete_form(State(db): State<Db>, Path(id): Path<i64>, headers: HeaderMap) -> ApiResult<StatusCode> {
    let mut store = db.write().await;
    store.require_admin(&headers)?;
    store.forms.remove(&id).ok_or_else(not_found)?;
    Ok(StatusCode::NO_CONTENT)
}
