use std::sync::Arc;

use dragnet_core::QueryExecutor;
use dragnet_query::{QueryCatalog, QueryCompiler};

/// Shared state handed to every handler: the compiler, the canned query
/// catalog, and whichever executor the binary wired up.
#[derive(Clone)]
pub struct AppState {
    pub compiler: Arc<QueryCompiler>,
    pub executor: Arc<dyn QueryExecutor>,
    pub catalog: Arc<QueryCatalog>,
}

impl AppState {
    pub fn new(
        compiler: QueryCompiler,
        executor: Arc<dyn QueryExecutor>,
        catalog: QueryCatalog,
    ) -> Self {
        Self {
            compiler: Arc::new(compiler),
            executor,
            catalog: Arc::new(catalog),
        }
    }
}
