//! Traversal commands: `co-actors` and `related`

use clap::Args;
use serde::Serialize;

use crate::output::{node_table, to_json, OutputFormat};
use crate::AppContext;
use travers_core::{
    Direction, Finder, GraphAccess, NodeWrapper, RelatedNodes, RelatedQuery, StartSelection,
    TraversalOrder, TraversalStats, Uniqueness, FIND_CO_ACTORS,
};
use travers_storage::CallCounts;

#[derive(Args)]
pub struct CoActorsArgs {
    /// Actor name
    pub name: String,

    /// Stop after this many results
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Print traversal statistics and graph call counts
    #[arg(long)]
    pub stats: bool,
}

#[derive(Args)]
pub struct RelatedArgs {
    /// Property value identifying the start node
    pub value: String,

    /// Parse VALUE as a JSON literal (e.g. 42, true)
    #[arg(long)]
    pub json_value: bool,

    /// Label result nodes must carry
    #[arg(short = 'L', long)]
    pub label: Option<String>,

    /// Label of the start node (defaults to --label)
    #[arg(long)]
    pub start_label: Option<String>,

    /// Property key matched against VALUE
    #[arg(short, long)]
    pub key: Option<String>,

    /// Minimum path length of a result
    #[arg(long)]
    pub min_depth: Option<u32>,

    /// Maximum path length of a result
    #[arg(long)]
    pub max_depth: Option<u32>,

    /// Traversal order: depth, breadth
    #[arg(long, default_value = "depth")]
    pub order: TraversalOrder,

    /// Uniqueness: none, relationship_path, node_path, node_global
    #[arg(long, default_value = "relationship_path")]
    pub uniqueness: Uniqueness,

    /// Direction: outgoing, incoming, both
    #[arg(long, default_value = "both")]
    pub direction: Direction,

    /// Only follow relationships of this type (can be used multiple times)
    #[arg(short = 't', long = "type")]
    pub types: Vec<String>,

    /// Pick the lowest-id start node when several match
    #[arg(long)]
    pub lowest_id: bool,

    /// Stop after this many results
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Print traversal statistics and graph call counts
    #[arg(long)]
    pub stats: bool,
}

impl RelatedArgs {
    /// Build the query; flags win over config values
    pub fn to_query(&self, ctx: &AppContext) -> anyhow::Result<RelatedQuery> {
        let start = if self.json_value {
            serde_json::from_str(&self.value)?
        } else {
            serde_json::Value::String(self.value.clone())
        };

        let mut query = RelatedQuery::new(start);
        if let Some(label) = self.label.clone().or_else(|| ctx.config.label.clone()) {
            query = query.with_label(label);
        }
        if let Some(label) = &self.start_label {
            query = query.with_start_label(label);
        }
        if let Some(key) = self.key.clone().or_else(|| ctx.config.key.clone()) {
            query = query.with_key(key);
        }
        let min = self.min_depth.or(ctx.config.min_depth).unwrap_or(query.min_depth);
        let max = self.max_depth.or(ctx.config.max_depth).unwrap_or(query.max_depth);

        query = query
            .with_depth(min, max)
            .with_order(self.order)
            .with_uniqueness(self.uniqueness)
            .with_direction(self.direction);
        for rel_type in &self.types {
            query = query.with_relationship_type(rel_type);
        }
        if self.lowest_id {
            query = query.with_start_selection(StartSelection::LowestId);
        }
        Ok(query)
    }
}

#[derive(Serialize)]
struct Report<'a> {
    rows: &'a [NodeWrapper],
    stats: &'a TraversalStats,
    calls: CallCounts,
}

pub async fn run_co_actors(args: &CoActorsArgs, ctx: &AppContext) -> anyhow::Result<()> {
    tracing::debug!("Calling {} for {:?}", FIND_CO_ACTORS, args.name);
    let related = Finder::new(&ctx.graph).find_co_actors(&args.name).await?;
    let heading = format!("Co-actors of {}", args.name);
    print_results(related, &heading, args.limit, args.stats, ctx).await
}

pub async fn run_related(args: &RelatedArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let query = args.to_query(ctx)?;
    let related = Finder::new(&ctx.graph).find_related(&query).await?;
    let heading = format!(
        ":{} nodes within {}..={} of {}",
        query.label, query.min_depth, query.max_depth, args.value
    );
    print_results(related, &heading, args.limit, args.stats, ctx).await
}

async fn print_results<'g, G>(
    mut related: RelatedNodes<'g, G>,
    heading: &str,
    limit: Option<usize>,
    stats: bool,
    ctx: &AppContext,
) -> anyhow::Result<()>
where
    G: GraphAccess + ?Sized + 'g,
{
    let limit = limit.unwrap_or(usize::MAX);
    let mut rows = Vec::new();
    while rows.len() < limit {
        match related.next_row().await? {
            Some(row) => rows.push(row),
            None => break,
        }
    }
    tracing::info!("{}: {} results", heading, rows.len());

    let calls = ctx.graph.counts();
    match ctx.format {
        OutputFormat::Json if stats => {
            let report = Report {
                rows: &rows,
                stats: related.stats(),
                calls,
            };
            println!("{}", to_json(&report)?);
        }
        OutputFormat::Json => println!("{}", to_json(&rows)?),
        OutputFormat::Table => {
            if rows.is_empty() {
                println!("{}: no results", heading);
            } else {
                println!("{} ({} found):", heading, rows.len());
                print!("{}", node_table(&rows));
            }
            if stats {
                let s = related.stats();
                println!();
                println!(
                    "Visited {} paths, yielded {}, pruned {}, expanded {} relationships, max depth {}",
                    s.paths_visited,
                    s.paths_yielded,
                    s.paths_pruned,
                    s.relationships_expanded,
                    s.max_depth_reached
                );
                println!(
                    "Graph calls: find_nodes={}, relationships_of={}, node={} (total {})",
                    calls.find_nodes,
                    calls.relationships_of,
                    calls.node,
                    calls.total()
                );
            }
        }
    }
    Ok(())
}
