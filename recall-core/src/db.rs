use neo4rs::{query, ConfigBuilder, Graph};

use crate::config::StoreConfig;

/// Build the pooled graph-store handle. Created once per process and shared;
/// each query checks out its own connection from the pool. Seed fetch and
/// expansion match on the stored `id` property, so the store should carry a
/// property index on `id` for every label that has one.
pub async fn create_graph(config: &StoreConfig) -> Result<Graph, neo4rs::Error> {
    let store_config = ConfigBuilder::default()
        .uri(&config.uri)
        .user(&config.user)
        .password(&config.password)
        .db(config.database.as_str())
        .max_connections(config.max_connections)
        .build()?;
    Graph::connect(store_config).await
}

pub async fn health_check(graph: &Graph) -> Result<(), neo4rs::Error> {
    let mut rows = graph.execute(query("RETURN 1 AS ok")).await?;
    rows.next().await?;
    Ok(())
}
