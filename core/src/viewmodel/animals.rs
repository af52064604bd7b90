use crate::error::ApiError;
use crate::repository::AnimalRepository;
use crate::state::{ListState, Observable};
use crate::types::Animal;

pub struct AnimalViewModel {
    repo: AnimalRepository,
    pub state: Observable<ListState<Animal>>,
    /// The animal an adoption form is being filled for.
    pub selected: Observable<Option<Animal>>,
}

impl AnimalViewModel {
    pub fn new(repo: AnimalRepository) -> Self {
        Self {
            repo,
            state: Observable::default(),
            selected: Observable::new(None),
        }
    }

    pub fn load_available(&self) {
        self.state.update(ListState::start);
        let result = self.repo.available();
        self.publish(result);
    }

    pub fn load_by_id(&self, id: i64) {
        match self.repo.get(id) {
            Ok(animal) => self.selected.set(Some(animal)),
            Err(err) => self.state.update(|s| s.error = Some(err.message())),
        }
    }

    pub fn search(&self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            return self.load_available();
        }
        self.state.update(ListState::start);
        let result = self.repo.search(query);
        self.publish(result);
    }

    pub fn filter_by_species(&self, species: &str) {
        let species = species.trim();
        if species.is_empty() {
            return self.load_available();
        }
        self.state.update(ListState::start);
        let result = self.repo.by_species(species);
        self.publish(result);
    }

    pub fn clear_error(&self) {
        self.state.update(|s| s.error = None);
    }

    pub fn close(&self) {
        self.state.close();
        self.selected.close();
    }

    fn publish(&self, result: Result<Vec<Animal>, ApiError>) {
        match result {
            Ok(animals) => self.state.update(|s| s.loaded(animals)),
            Err(err) => self.state.update(|s| s.failed(err.message())),
        }
    }
}
