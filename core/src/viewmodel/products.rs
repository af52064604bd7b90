use crate::repository::ProductRepository;
use crate::state::{ListState, Observable};
use crate::types::Product;

pub struct ProductViewModel {
    repo: ProductRepository,
    pub state: Observable<ListState<Product>>,
}

impl ProductViewModel {
    pub fn new(repo: ProductRepository) -> Self {
        Self {
            repo,
            state: Observable::default(),
        }
    }

    pub fn load(&self) {
        self.state.update(ListState::start);
        let result = self.repo.list();
        self.publish(result);
    }

    /// Server-side name search; a blank query reloads the full catalog.
    pub fn search(&self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            return self.load();
        }
        self.state.update(ListState::start);
        let result = self.repo.search(query);
        self.publish(result);
    }

    pub fn filter_by_category(&self, category: &str) {
        let category = category.trim();
        if category.is_empty() {
            return self.load();
        }
        self.state.update(ListState::start);
        let result = self.repo.by_category(category);
        self.publish(result);
    }

    pub fn clear_error(&self) {
        self.state.update(|s| s.error = None);
    }

    pub fn close(&self) {
        self.state.close();
    }

    fn publish(&self, result: Result<Vec<Product>, crate::error::ApiError>) {
        match result {
            Ok(products) => self.state.update(|s| s.loaded(products)),
            Err(err) => self.state.update(|s| s.failed(err.message())),
        }
    }
}
