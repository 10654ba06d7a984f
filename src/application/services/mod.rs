//! Application services - Discovery, registration and reconciliation

pub mod deployment;
pub mod discovery;
pub mod handlers;
pub mod reconciler;
pub mod registrar;
pub mod report;
pub mod runtime;
pub mod validator;

pub use discovery::{Discovered, Discovery, EventSubscription};
pub use handlers::HandlerCatalog;
pub use reconciler::{plan, reconcile, ReconcileReport, ScopeGroup, ScopeOutcome};
pub use registrar::Registrar;
pub use runtime::{prepare, Prepared, RunSummary, Runtime, RuntimeOptions};
pub use validator::ModuleValidator;
