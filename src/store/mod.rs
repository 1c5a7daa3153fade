use neo4rs::{query, ConfigBuilder, Graph};
use std::sync::OnceLock;
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::config;

pub mod orders;
pub mod patch;
pub mod products;
pub mod users;

/// Errors from the graph store layer
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("graph connection error: {0}")]
    Connection(String),

    #[error(transparent)]
    Graph(#[from] neo4rs::Error),

    #[error("query error: {0}")]
    Query(String),

    #[error("row decode error: {0}")]
    Decode(String),

    #[error("not found: {0}")]
    NotFound(String),
}

pub(crate) fn decode_err<E: std::fmt::Display>(e: E) -> StoreError {
    StoreError::Decode(e.to_string())
}

/// Process-wide handle to the Bolt connection, established lazily on first
/// use so the server can start (and report degraded health) while the store
/// is unreachable.
pub struct GraphManager {
    graph: OnceCell<Graph>,
}

impl GraphManager {
    fn instance() -> &'static GraphManager {
        static INSTANCE: OnceLock<GraphManager> = OnceLock::new();
        INSTANCE.get_or_init(|| GraphManager {
            graph: OnceCell::new(),
        })
    }

    /// Get the shared graph connection, connecting on first use
    pub async fn graph() -> Result<&'static Graph, StoreError> {
        Self::instance()
            .graph
            .get_or_try_init(Self::connect)
            .await
    }

    async fn connect() -> Result<Graph, StoreError> {
        let cfg = &config::config().graph;

        let config = ConfigBuilder::default()
            .uri(cfg.uri.as_str())
            .user(cfg.username.as_str())
            .password(cfg.password.as_str())
            .db(cfg.database.as_str())
            .max_connections(cfg.max_connections)
            .fetch_size(cfg.fetch_size)
            .build()
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let graph = Graph::connect(config)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        info!("Connected to graph store at {}", cfg.uri);
        Ok(graph)
    }

    /// Pings the store to verify connectivity
    pub async fn health_check() -> Result<(), StoreError> {
        let graph = Self::graph().await?;
        graph.run(query("RETURN 1")).await?;
        Ok(())
    }

    /// Best-effort schema setup: uniqueness constraints. The server keeps
    /// serving when this fails; data paths will surface store errors.
    pub async fn init_schema() {
        let statements = [
            "CREATE CONSTRAINT user_email_unique IF NOT EXISTS FOR (u:User) REQUIRE u.email IS UNIQUE",
        ];

        let graph = match Self::graph().await {
            Ok(g) => g,
            Err(e) => {
                warn!("Schema init skipped, store unreachable: {}", e);
                return;
            }
        };

        for statement in statements {
            if let Err(e) = graph.run(query(statement)).await {
                warn!("Could not create constraint: {}", e);
            }
        }
    }
}
