//! Keyword classifier that maps an utterance to a canned reply.
//!
//! Routing is a deterministic first-match scan over the category table,
//! falling back to the greeting pool and then the unknown pool. Only the
//! pick inside a fallback pool is random, and the random source is
//! injectable so replies can be reproduced from a seed.

use crate::responses::{ResponseTable, TableError, GREETING_TRIGGERS};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use tracing::debug;

/// Where an utterance was routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Matched the category at this index.
    Category(usize),
    /// Contained a greeting trigger.
    Greeting,
    /// Nothing matched.
    Unknown,
}

impl Route {
    /// Short lowercase name, used in logs and JSON output.
    pub fn name(self) -> &'static str {
        match self {
            Route::Category(_) => "category",
            Route::Greeting => "greeting",
            Route::Unknown => "unknown",
        }
    }
}

/// A classified reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// How the utterance was routed.
    pub route: Route,
    /// Reply text.
    pub text: String,
}

/// Route an utterance without picking a reply.
pub fn route(table: &ResponseTable, utterance: &str) -> Route {
    let lower = utterance.to_lowercase();

    if let Some(index) = table
        .categories
        .iter()
        .position(|c| lower.contains(c.phrase.as_str()))
    {
        return Route::Category(index);
    }

    if GREETING_TRIGGERS.iter().any(|t| lower.contains(t)) {
        return Route::Greeting;
    }

    Route::Unknown
}

/// Classifier over a validated response table.
#[derive(Debug, Clone)]
pub struct Classifier<R = StdRng> {
    table: ResponseTable,
    rng: R,
}

impl Classifier<StdRng> {
    /// Create a classifier seeded from OS entropy.
    pub fn new(table: ResponseTable) -> Result<Self, TableError> {
        Self::with_rng(table, StdRng::from_entropy())
    }

    /// Create a classifier with a fixed seed.
    pub fn seeded(table: ResponseTable, seed: u64) -> Result<Self, TableError> {
        Self::with_rng(table, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Classifier<R> {
    /// Create a classifier with a caller-supplied random source.
    pub fn with_rng(table: ResponseTable, rng: R) -> Result<Self, TableError> {
        table.validate()?;
        Ok(Self { table, rng })
    }

    /// The table this classifier answers from.
    pub fn table(&self) -> &ResponseTable {
        &self.table
    }

    /// Route an utterance and pick the reply text.
    pub fn respond(&mut self, utterance: &str) -> Reply {
        let route = route(&self.table, utterance);
        let text = match route {
            Route::Category(index) => self.table.categories[index].response.clone(),
            Route::Greeting => pick(&self.table.greetings, &mut self.rng),
            Route::Unknown => pick(&self.table.unknown, &mut self.rng),
        };
        debug!(route = route.name(), "classified utterance");
        Reply { route, text }
    }

    /// Reply text for an utterance.
    pub fn classify(&mut self, utterance: &str) -> String {
        self.respond(utterance).text
    }
}

/// Uniform pick from a pool. Pools are non-empty after validation.
fn pick<R: Rng>(pool: &[String], rng: &mut R) -> String {
    pool.choose(rng).cloned().unwrap_or_default()
}
