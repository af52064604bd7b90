use std::sync::Arc;

use chrono::{DateTime, NaiveDateTime};

use crate::repository::OrderRepository;
use crate::session::SessionStore;
use crate::state::{ListState, Observable};
use crate::types::{Order, OrderItem};

use super::session_user;

const DISPLAY_FORMAT: &str = "%d/%m/%Y %H:%M";

/// One row of the order history, with its lines already fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSummary {
    pub id: i64,
    /// `dd/mm/yyyy HH:MM`, or the raw timestamp when it cannot be parsed.
    pub date: String,
    pub total: f64,
    pub status: String,
    pub items: Vec<OrderItem>,
}

/// Render an ISO-8601 timestamp for display. Unparseable input comes back
/// unchanged.
pub fn format_order_date(raw: &str) -> String {
    let trimmed = raw.trim();
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(trimmed) {
        return with_offset.format(DISPLAY_FORMAT).to_string();
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .map(|local| local.format(DISPLAY_FORMAT).to_string())
        .unwrap_or_else(|| raw.to_string())
}

pub struct OrderHistoryViewModel {
    repo: OrderRepository,
    session: Arc<SessionStore>,
    pub state: Observable<ListState<OrderSummary>>,
}

impl OrderHistoryViewModel {
    pub fn new(repo: OrderRepository, session: Arc<SessionStore>) -> Self {
        Self {
            repo,
            session,
            state: Observable::default(),
        }
    }

    /// Orders of the session user, each with its lines. A failed line lookup
    /// shows the order without lines.
    pub fn load(&self) {
        self.state.update(ListState::start);
        let user_id = match session_user(&self.session) {
            Ok(id) => id,
            Err(message) => {
                return self.state.update(|s| {
                    s.items.clear();
                    s.failed(message);
                });
            }
        };
        match self.repo.by_user(user_id) {
            Ok(orders) => {
                let summaries = orders.into_iter().map(|order| self.summarize(order)).collect();
                self.state.update(|s| s.loaded(summaries));
            }
            Err(err) => self.state.update(|s| s.failed(err.message())),
        }
    }

    fn summarize(&self, order: Order) -> OrderSummary {
        let items = self.repo.items(order.id).unwrap_or_default();
        OrderSummary {
            id: order.id,
            date: format_order_date(&order.created_at),
            total: order.total,
            status: order.status,
            items,
        }
    }

    pub fn cancel(&self, order_id: i64) {
        match self.repo.cancel(order_id) {
            Ok(_) => {
                self.state
                    .update(|s| s.success_message = Some("Orden cancelada".to_string()));
                self.load();
            }
            Err(err) => self.state.update(|s| s.error = Some(err.message())),
        }
    }

    pub fn clear_error(&self) {
        self.state.update(|s| s.error = None);
    }

    pub fn clear_messages(&self) {
        self.state.update(|s| {
            s.error = None;
            s.success_message = None;
        });
    }

    pub fn close(&self) {
        self.state.close();
    }
}
