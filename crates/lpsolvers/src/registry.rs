use std::sync::Arc;

use lazy_static::lazy_static;
use lpsolvers_backends::SolverBackend;

lazy_static! {
    /// Backends compiled into this build, in preference order. Built once
    /// on first use and never modified afterwards.
    static ref REGISTRY: Registry = Registry::discover();
}

/// Maps solver names to their adapters
pub struct Registry {
    backends: Vec<Arc<dyn SolverBackend>>,
}

impl Registry {
    fn discover() -> Self {
        #[allow(unused_mut)]
        let mut backends: Vec<Arc<dyn SolverBackend>> = Vec::new();

        #[cfg(feature = "clarabel")]
        backends.push(Arc::new(lpsolvers_backends::ClarabelSolver::new()));
        #[cfg(feature = "highs")]
        {
            backends.push(Arc::new(lpsolvers_backends::HighsSolver::new()));
            backends.push(Arc::new(lpsolvers_backends::HighsSolver::pdlp()));
        }
        #[cfg(feature = "osqp")]
        backends.push(Arc::new(lpsolvers_backends::OsqpSolver::new()));
        #[cfg(feature = "microlp")]
        backends.push(Arc::new(lpsolvers_backends::MicrolpSolver::new()));
        #[cfg(feature = "good_lp")]
        backends.push(Arc::new(lpsolvers_backends::GoodLpSolver::new()));

        let registry = Registry { backends };
        if registry.backends.is_empty() {
            tracing::warn!("no solver backend compiled in; enable at least one backend feature");
        } else {
            tracing::debug!(solvers = ?registry.names(), "solver backends available");
        }
        registry
    }

    /// The process-wide registry
    pub fn global() -> &'static Registry {
        &REGISTRY
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.backends.iter().map(|b| b.name()).collect()
    }

    pub fn qp_names(&self) -> Vec<&'static str> {
        self.backends
            .iter()
            .filter(|b| b.supports_qp())
            .map(|b| b.name())
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn SolverBackend>> {
        self.backends.iter().find(|b| b.name() == name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.backends.iter().any(|b| b.name() == name)
    }

    /// First backend in preference order, optionally QP-capable
    pub fn first(&self, need_qp: bool) -> Option<Arc<dyn SolverBackend>> {
        self.backends
            .iter()
            .find(|b| !need_qp || b.supports_qp())
            .cloned()
    }
}

/// Names of the solvers usable in this build, in preference order
pub fn available_solvers() -> Vec<&'static str> {
    Registry::global().names()
}

/// Subset of [`available_solvers`] that also solves QPs
pub fn qp_solvers() -> Vec<&'static str> {
    Registry::global().qp_names()
}

pub fn is_available(name: &str) -> bool {
    Registry::global().contains(name)
}
