use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, put},
    Json, Router,
};
use tracing::info;

use super::contains_ignore_case;
use crate::{next_id, Animal, AnimalInput, ApiResult, AppError, Db, NameQuery};

pub(crate) fn router() -> Router<Db> {
    Router::new()
        .route("/animales", get(list_animals).post(create_animal))
        .route("/animales/disponibles", get(available))
        .route("/animales/adoptados", get(adopted))
        .route("/animales/buscar", get(search_animals))
        .route("/animales/especie/{species}", get(by_species))
        .route(
            "/animales/{id}",
            get(get_animal).put(update_animal).delete(delete_animal),
        )
        .route("/animales/{id}/adoptar", put(mark_adopted))
}

fn not_found() -> AppError {
    AppError::NotFound("Animal no encontrado".to_string())
}

fn validate(input: &AnimalInput) -> ApiResult<()> {
    if input.name.trim().is_empty() || input.species.trim().is_empty() {
        return Err(AppError::BadRequest("Nombre y especie son requeridos".to_string()));
    }
    Ok(())
}

async fn filtered(db: &Db, keep: impl Fn(&Animal) -> bool) -> Json<Vec<Animal>> {
    let store = db.read().await;
    Json(store.animals.values().filter(|animal| keep(animal)).cloned().collect())
}

async fn list_animals(State(db): State<Db>) -> Json<Vec<Animal>> {
    filtered(&db, |_| true).await
}

async fn available(State(db): State<Db>) -> Json<Vec<Animal>> {
    filtered(&db, |animal| !animal.adopted).await
}

async fn adopted(State(db): State<Db>) -> Json<Vec<Animal>> {
    filtered(&db, |animal| animal.adopted).await
}

async fn by_species(State(db): State<Db>, Path(species): Path<String>) -> Json<Vec<Animal>> {
    filtered(&db, |animal| animal.species.eq_ignore_ascii_case(&species)).await
}

async fn search_animals(State(db): State<Db>, Query(query): Query<NameQuery>) -> Json<Vec<Animal>> {
    filtered(&db, |animal| contains_ignore_case(&animal.name, &query.name)).await
}

async fn get_animal(State(db): State<Db>, Path(id): Path<i64>) -> ApiResult<Json<Animal>> {
    let store = db.read().await;
    store.animals.get(&id).cloned().map(Json).ok_or_else(not_found)
}

async fn create_animal(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<AnimalInput>,
) -> ApiResult<(StatusCode, Json<Animal>)> {
    let mut store = db.write().await;
    store.require_admin(&headers)?;
    validate(&input)?;
    let animal = Animal {
        id: next_id(&store.animals),
        name: input.name,
        species: input.species,
        breed: input.breed,
        age: input.age,
        description: input.description,
        adopted: false,
        image: input.image,
    };
    store.animals.insert(animal.id, animal.clone());
    info!(animal_id = animal.id, "animal created");
    Ok((StatusCode::CREATED, Json(animal)))
}

async fn update_animal(
    State(db): State<Db>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(input): Json<AnimalInput>,
) -> ApiResult<Json<Animal>> {
    let mut store = db.write().await;
    store.require_admin(&headers)?;
    validate(&input)?;
    let animal = store.animals.get_mut(&id).ok_or_else(not_found)?;
    animal.name = input.name;
    animal.species = input.species;
    animal.breed = input.breed;
    animal.age = input.age;
    animal.description = input.description;
    animal.image = input.image;
    Ok(Json(animal.clone()))
}

async fn mark_adopted(State(db): State<Db>, Path(id): Path<i64>, headers: HeaderMap) -> ApiResult<Json<Animal>> {
    let mut store = db.write().await;
    store.require_admin(&headers)?;
    let animal = store.animals.get_mut(&id).ok_or_else(not_found)?;
    animal.adopted = true;
    info!(animal_id = id, "animal marked adopted");
    Ok(Json(animal.clone()))
}

async fn delete_animal(State(db): State<Db>, Path(id): Path<i64>, headers: HeaderMap) -> ApiResult<StatusCode> {
    let mut store = db.write().await;
    store.require_admin(&headers)?;
    store.animals.remove(&id).ok_or_else(not_found)?;
    info!(animal_id = id, "animal deleted");
    Ok(StatusCode::NO_CONTENT)
}
