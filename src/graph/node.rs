/// A vertex of a [`WeightedGraph`](super::WeightedGraph).
///
/// `dist` and `prev` are working state owned by the most recent shortest-path run;
/// they are reset by the engine at the start of every run.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: String,
    pub(crate) dist: f64,
    pub(crate) prev: Option<String>,
}

impl Node {
    /// Creates a node with no distance and no predecessor
    pub fn new(id: impl Into<String>) -> Self {
        Node {
            id: id.into(),
            dist: f64::INFINITY,
            prev: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Best known distance from the last run's source, `f64::INFINITY` if unreached
    pub fn dist(&self) -> f64 {
        self.dist
    }

    /// Id of the predecessor on the shortest path from the last run's source
    pub fn prev(&self) -> Option<&str> {
        self.prev.as_deref()
    }

    pub fn is_reached(&self) -> bool {
        self.dist.is_finite()
    }

    pub(crate) fn reset(&mut self) {
        self.dist = f64::INFINITY;
        self.prev = None;
    }
}
