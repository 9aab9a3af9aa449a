//! Graph store collaborator interface
//!
//! The graph engine itself is external; skyrag only depends on the seam
//! defined here. A store consumes a [`BoundQuery`] — the rendered statement
//! plus its flat parameter map, with unconstrained filters bound as null —
//! and returns rows in the fixed flattened shape shared by every template.

mod memory;

pub use memory::MemoryGraphStore;

use crate::entities::SortAttribute;
use crate::query::BoundQuery;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GraphStoreError {
    /// The store cannot be reached; recovered upstream as an empty
    /// symbolic result
    #[error("graph store unavailable: {0}")]
    Unavailable(String),

    /// The store rejected or failed the query
    #[error("graph query failed: {0}")]
    Query(String),
}

/// One journey in the uniform flattened property shape.
///
/// `feedback_id` is the stable record identifier: two rows sharing it are
/// the same record regardless of which retriever produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JourneyRow {
    pub feedback_id: String,
    pub passenger_class: String,
    pub food_satisfaction_score: i64,
    pub arrival_delay_minutes: i64,
    pub actual_flown_miles: i64,
    pub number_of_legs: i64,
    pub flight_number: String,
    pub fleet_type: String,
    pub departure_airport: String,
    pub arrival_airport: String,
    pub generation: String,
    pub loyalty_level: String,
    pub record_locator: String,
}

impl JourneyRow {
    /// Value used when ordering rows by a sortable attribute
    pub fn sort_value(&self, attribute: SortAttribute) -> i64 {
        match attribute {
            SortAttribute::Delay => self.arrival_delay_minutes,
            SortAttribute::Miles => self.actual_flown_miles,
            SortAttribute::FoodScore => self.food_satisfaction_score,
            SortAttribute::Legs => self.number_of_legs,
        }
    }
}

/// Executes bound queries against a pre-populated graph.
///
/// Implementations must be deterministic: the same data and bound query
/// always produce the same rows in the same order.
pub trait GraphStore: Send + Sync {
    fn execute(&self, query: &BoundQuery) -> Result<Vec<JourneyRow>, GraphStoreError>;
}
