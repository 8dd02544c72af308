//! A small, crate-local state graph engine.
//!
//! Grounded in the public surface of the reference orchestration
//! framework's `StateGraph`/`CompiledGraph`/`END`/`MergeableState` (see
//! its `sequential_workflow.rs` and `parallel_map_reduce.rs` demos) and
//! the node-function signature observed in its agent-loop consumer
//! (`fn(S) -> Pin<Box<dyn Future<Output = Result<S>> + Send>>`).

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::error::{Error, Result};

/// Sentinel target name marking the end of the graph.
pub const END: &str = "__end__";

type NodeFuture<S> = Pin<Box<dyn Future<Output = Result<S>> + Send>>;
type NodeFn<S> = Arc<dyn Fn(S) -> NodeFuture<S> + Send + Sync>;
type RouteFn<S> = Arc<dyn Fn(&S) -> String + Send + Sync>;

/// States that pass through a parallel fan-out/fan-in group must know how
/// to absorb a sibling branch's isolated writes into the joined state.
pub trait MergeableState {
    fn merge(&mut self, other: Self);
}

/// A conditional edge: a routing closure plus a map from its return value
/// to a destination node name.
struct ConditionalEdge<S> {
    route: RouteFn<S>,
    targets: HashMap<String, String>,
}

/// Mutable graph builder. Call [`StateGraph::compile`] to freeze it into a
/// runnable [`CompiledGraph`].
pub struct StateGraph<S> {
    nodes: HashMap<String, NodeFn<S>>,
    edges: HashMap<String, String>,
    parallel_edges: HashMap<String, Vec<String>>,
    conditional_edges: HashMap<String, ConditionalEdge<S>>,
    entry_point: Option<String>,
}

impl<S> Default for StateGraph<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> StateGraph<S>
where
    S: Clone + Send + MergeableState + 'static,
{
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            edges: HashMap::new(),
            parallel_edges: HashMap::new(),
            conditional_edges: HashMap::new(),
            entry_point: None,
        }
    }

    /// Registers a node from a boxed-future-returning function, matching
    /// the reference framework's node-function closure shape.
    pub fn add_node_from_fn<F>(&mut self, name: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn(S) -> NodeFuture<S> + Send + Sync + 'static,
    {
        self.nodes.insert(name.into(), Arc::new(f));
        self
    }

    pub fn set_entry_point(&mut self, name: impl Into<String>) -> &mut Self {
        self.entry_point = Some(name.into());
        self
    }

    /// A single sequential edge. Use `END` as `to` to terminate the graph.
    pub fn add_edge(&mut self, from: impl Into<String>, to: impl Into<String>) -> &mut Self {
        self.edges.insert(from.into(), to.into());
        self
    }

    /// Fans `from` out to every node in `to`, each executed on an
    /// independent clone of the state reaching `from`. Branches never
    /// observe each other's writes; their results are folded back with
    /// [`MergeableState::merge`] in registration order before the next
    /// edge out of `from` runs.
    pub fn add_parallel_edges(&mut self, from: impl Into<String>, to: Vec<String>) -> &mut Self {
        self.parallel_edges.insert(from.into(), to);
        self
    }

    /// Routes from `from` to one of `targets` based on `route`'s return
    /// value, keyed by string.
    pub fn add_conditional_edges<R>(
        &mut self,
        from: impl Into<String>,
        route: R,
        targets: HashMap<String, String>,
    ) -> &mut Self
    where
        R: Fn(&S) -> String + Send + Sync + 'static,
    {
        self.conditional_edges.insert(
            from.into(),
            ConditionalEdge {
                route: Arc::new(route),
                targets,
            },
        );
        self
    }

    /// Freezes the graph, checking that every referenced node exists and
    /// an entry point was set.
    pub fn compile(self) -> Result<CompiledGraph<S>> {
        let entry_point = self
            .entry_point
            .clone()
            .ok_or_else(|| Error::GraphCompilation("no entry point set".to_string()))?;
        if !self.nodes.contains_key(&entry_point) {
            return Err(Error::GraphCompilation(format!(
                "entry point '{entry_point}' is not a registered node"
            )));
        }
        for (from, to) in &self.edges {
            if to != END && !self.nodes.contains_key(to) {
                return Err(Error::GraphCompilation(format!(
                    "edge '{from}' -> '{to}' targets an unknown node"
                )));
            }
        }
        for (from, targets) in &self.parallel_edges {
            if !self.nodes.contains_key(from) {
                return Err(Error::GraphCompilation(format!(
                    "parallel edge source '{from}' is not a registered node"
                )));
            }
            for target in targets {
                if !self.nodes.contains_key(target) {
                    return Err(Error::GraphCompilation(format!(
                        "parallel edge target '{target}' is not a registered node"
                    )));
                }
            }
        }
        Ok(CompiledGraph {
            nodes: self.nodes,
            edges: self.edges,
            parallel_edges: self.parallel_edges,
            conditional_edges: self.conditional_edges,
            entry_point,
        })
    }
}

/// Outcome of a full graph invocation.
pub struct ExecutionResult<S> {
    pub final_state: S,
    pub nodes_executed: Vec<String>,
}

pub struct CompiledGraph<S> {
    nodes: HashMap<String, NodeFn<S>>,
    edges: HashMap<String, String>,
    parallel_edges: HashMap<String, Vec<String>>,
    conditional_edges: HashMap<String, ConditionalEdge<S>>,
    entry_point: String,
}

impl<S> CompiledGraph<S>
where
    S: Clone + Send + MergeableState + 'static,
{
    pub async fn invoke(&self, initial_state: S) -> Result<ExecutionResult<S>> {
        let mut state = initial_state;
        let mut current = self.entry_point.clone();
        let mut nodes_executed = Vec::new();

        loop {
            if current == END {
                break;
            }

            if let Some(branch_names) = self.parallel_edges.get(&current) {
                let node = self.nodes.get(&current).ok_or_else(|| {
                    Error::GraphCompilation(format!("node '{current}' not found"))
                })?;
                state = node(state).await?;
                nodes_executed.push(current.clone());

                // Each branch gets its own snapshot and runs concurrently
                // (a `gather`, not a sequential fan-out); results are
                // folded back in registration order once every branch has
                // settled, so the merge order stays deterministic even
                // though completion order does not.
                let futures = branch_names.iter().map(|branch| {
                    let branch_node = self
                        .nodes
                        .get(branch)
                        .cloned()
                        .ok_or_else(|| Error::GraphCompilation(format!("node '{branch}' not found")));
                    let snapshot = state.clone();
                    async move { branch_node?(snapshot).await }
                });
                let branch_results = futures::future::join_all(futures).await;

                let mut merged: Option<S> = None;
                for (branch, result) in branch_names.iter().zip(branch_results) {
                    let branch_result = result?;
                    nodes_executed.push(branch.clone());
                    merged = Some(match merged {
                        None => branch_result,
                        Some(mut acc) => {
                            acc.merge(branch_result);
                            acc
                        }
                    });
                }
                if let Some(m) = merged {
                    state = m;
                }
            } else {
                let node = self.nodes.get(&current).ok_or_else(|| {
                    Error::GraphCompilation(format!("node '{current}' not found"))
                })?;
                state = node(state).await?;
                nodes_executed.push(current.clone());
            }

            current = if let Some(conditional) = self.conditional_edges.get(&current) {
                let key = (conditional.route)(&state);
                conditional
                    .targets
                    .get(&key)
                    .cloned()
                    .ok_or_else(|| {
                        Error::GraphCompilation(format!(
                            "conditional route returned unknown key '{key}' from node '{current}'"
                        ))
                    })?
            } else if let Some(next) = self.edges.get(&current) {
                next.clone()
            } else {
                END.to_string()
            };
        }

        Ok(ExecutionResult {
            final_state: state,
            nodes_executed,
        })
    }
}
