// Expression filters: predicates that can veto an expression path

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use elcheck_ast::ExpressionPath;

/// A named predicate over an expression path snapshot.
///
/// Filters must not influence validation through side effects; the chain
/// may call them in any number of steps of any number of expressions.
pub trait ExpressionFilter: fmt::Debug + Send + Sync {
    /// Identifies the filter in rejection reports.
    fn name(&self) -> &str;

    fn accept(&self, path: &ExpressionPath) -> bool;
}

/// First rejection produced by a [`FilterChain`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expression '{path}' rejected by filter '{filter}'")]
pub struct FilterRejection {
    pub filter: String,
    pub path: ExpressionPath,
}

/// Ordered filters; an empty chain accepts everything.
#[derive(Debug, Clone, Default)]
pub struct FilterChain {
    filters: Vec<Arc<dyn ExpressionFilter>>,
}

impl FilterChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_filter(&mut self, filter: impl ExpressionFilter + 'static) {
        self.filters.push(Arc::new(filter));
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// Run every filter in registration order, stopping at the first rejection.
    pub fn apply(&self, path: &ExpressionPath) -> Result<(), FilterRejection> {
        for filter in &self.filters {
            if !filter.accept(path) {
                log::warn!("expression '{path}' rejected by filter '{}'", filter.name());
                return Err(FilterRejection {
                    filter: filter.name().to_string(),
                    path: path.clone(),
                });
            }
        }
        Ok(())
    }
}

type Predicate = dyn Fn(&ExpressionPath) -> bool + Send + Sync;

/// Filter backed by a closure.
pub struct PredicateFilter {
    name: String,
    predicate: Box<Predicate>,
}

impl PredicateFilter {
    pub fn new(
        name: impl Into<String>,
        predicate: impl Fn(&ExpressionPath) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            predicate: Box::new(predicate),
        }
    }
}

impl fmt::Debug for PredicateFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PredicateFilter")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl ExpressionFilter for PredicateFilter {
    fn name(&self) -> &str {
        &self.name
    }

    fn accept(&self, path: &ExpressionPath) -> bool {
        (self.predicate)(path)
    }
}

/// Rejects any path containing one of the listed segments.
#[derive(Debug, Clone)]
pub struct SegmentBlacklist {
    name: String,
    segments: HashSet<String>,
}

impl SegmentBlacklist {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: "segment-blacklist".to_string(),
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl ExpressionFilter for SegmentBlacklist {
    fn name(&self) -> &str {
        &self.name
    }

    fn accept(&self, path: &ExpressionPath) -> bool {
        !path.segments().any(|s| self.segments.contains(s))
    }
}

/// Accepts only expressions rooted at one of the listed variables.
#[derive(Debug, Clone)]
pub struct VariableWhitelist {
    variables: HashSet<String>,
}

impl VariableWhitelist {
    pub fn new<I, S>(variables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            variables: variables.into_iter().map(Into::into).collect(),
        }
    }
}

impl ExpressionFilter for VariableWhitelist {
    fn name(&self) -> &str {
        "variable-whitelist"
    }

    fn accept(&self, path: &ExpressionPath) -> bool {
        path.variable()
            .is_some_and(|v| self.variables.contains(v))
    }
}
