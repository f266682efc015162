use crate::engine::BoardState;
use crate::frontier::{ClosedSet, OpenSet};
use crate::heuristics::{EvaluatorKind, GoalLayout};
use std::ops::Index;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Handle to a node stored in a [`NodeArena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// A board reached during search, with the cost of the path that reached it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchNode {
    /// The board this node stands on.
    pub state: BoardState,
    /// Number of slides from the root. The root has cost 0 and every child costs one more than its parent.
    pub cost: u32,
    /// The node this one was generated from; `None` only for the root.
    pub parent: Option<NodeId>,
}

/// Owns every node created during one search run.
///
/// Nodes refer to their parent by [`NodeId`], so the tree of visited boards stays
/// alive as long as the arena does, independent of the open set.
#[derive(Debug, Default)]
pub struct NodeArena {
    nodes: Vec<SearchNode>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parentless node with cost 0.
    pub fn root(&mut self, state: BoardState) -> NodeId {
        self.push(SearchNode {
            state,
            cost: 0,
            parent: None,
        })
    }

    /// Adds a node one slide beyond `parent`.
    pub fn child(&mut self, parent: NodeId, state: BoardState) -> NodeId {
        let cost = self[parent].cost + 1;
        self.push(SearchNode {
            state,
            cost,
            parent: Some(parent),
        })
    }

    fn push(&mut self, node: SearchNode) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Index<NodeId> for NodeArena {
    type Output = SearchNode;

    fn index(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.0]
    }
}

/// Walks parent links from `goal` back to the root and returns the boards in
/// root-to-goal order. The result holds `arena[goal].cost + 1` boards.
pub fn reconstruct_path(arena: &NodeArena, goal: NodeId) -> Vec<BoardState> {
    let mut path = Vec::with_capacity(arena[goal].cost as usize + 1);
    let mut current = Some(goal);
    while let Some(id) = current {
        let node = &arena[id];
        path.push(node.state);
        current = node.parent;
    }
    path.reverse();
    path
}

/// Tuning knobs for a search run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Reject start/goal pairs of opposite parity before creating any node.
    pub check_parity: bool,
    /// Give up once this much wall-clock time has passed.
    pub deadline: Option<Duration>,
    /// Emit a progress event every this many expansions; 0 disables it.
    pub progress_interval: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            check_parity: true,
            deadline: None,
            progress_interval: 10_000,
        }
    }
}

/// Counters collected during a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes selected from the open set and expanded, the goal node included.
    pub visited_count: usize,
    /// Nodes created, the root included.
    pub generated: usize,
    /// Largest size the open set reached.
    pub max_frontier_size: usize,
    pub elapsed: Duration,
}

/// The result of a search run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The goal was reached. `path` runs from the initial board to the goal and
    /// `cost` is `path.len() - 1`.
    Solved {
        path: Vec<BoardState>,
        cost: u32,
        stats: SearchStats,
    },
    /// No path exists: either the parity check failed or the open set ran dry.
    Unsolvable { stats: SearchStats },
    /// The configured deadline passed before the search finished.
    TimedOut { stats: SearchStats },
}

impl SearchOutcome {
    pub fn is_solved(&self) -> bool {
        matches!(self, SearchOutcome::Solved { .. })
    }

    pub fn path(&self) -> Option<&[BoardState]> {
        match self {
            SearchOutcome::Solved { path, .. } => Some(path),
            _ => None,
        }
    }

    pub fn cost(&self) -> Option<u32> {
        match self {
            SearchOutcome::Solved { cost, .. } => Some(*cost),
            _ => None,
        }
    }

    pub fn stats(&self) -> &SearchStats {
        match self {
            SearchOutcome::Solved { stats, .. }
            | SearchOutcome::Unsolvable { stats }
            | SearchOutcome::TimedOut { stats } => stats,
        }
    }
}

/// Where a [`Search`] stands after a call to [`Search::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchState {
    Running,
    Succeeded(NodeId),
    Exhausted,
}

/// One best-first search run, advanced one expansion at a time.
///
/// The open set may hold several entries for the same board; there is no
/// decrease-key. An entry whose board was closed after it was queued is
/// dropped when popped.
pub struct Search {
    goal: BoardState,
    layout: GoalLayout,
    evaluator: EvaluatorKind,
    arena: NodeArena,
    open: OpenSet<NodeId>,
    closed: ClosedSet,
    visited_count: usize,
}

impl Search {
    /// Seeds the open set with a root node for `initial`.
    pub fn new(initial: BoardState, goal: BoardState, evaluator: EvaluatorKind) -> Self {
        let layout = GoalLayout::new(&goal);
        let mut arena = NodeArena::new();
        let mut open = OpenSet::new();

        let root = arena.root(initial);
        open.push(root, evaluator.score(0, &initial, &layout));

        Search {
            goal,
            layout,
            evaluator,
            arena,
            open,
            closed: ClosedSet::new(),
            visited_count: 0,
        }
    }

    /// Runs one iteration of the loop: pop the best entry, close its board,
    /// test it against the goal and queue its unclosed successors.
    pub fn step(&mut self) -> SearchState {
        let Some((current, _)) = self.open.pop() else {
            return SearchState::Exhausted;
        };
        let node = self.arena[current];

        if !self.closed.close(node.state) {
            return SearchState::Running;
        }
        self.visited_count += 1;

        if node.state == self.goal {
            return SearchState::Succeeded(current);
        }

        for next in node.state.successor_states() {
            if self.closed.contains(&next) {
                continue;
            }
            let child = self.arena.child(current, next);
            let score = self.evaluator.score(node.cost + 1, &next, &self.layout);
            self.open.push(child, score);
        }

        SearchState::Running
    }

    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    pub fn open_len(&self) -> usize {
        self.open.len()
    }

    pub fn closed_len(&self) -> usize {
        self.closed.len()
    }

    /// Snapshot of the counters so far; `elapsed` is left at zero.
    pub fn stats(&self) -> SearchStats {
        SearchStats {
            visited_count: self.visited_count,
            generated: self.arena.len(),
            max_frontier_size: self.open.peak_len(),
            elapsed: Duration::ZERO,
        }
    }
}

/// Solves `initial` toward `goal` with the default [`SearchConfig`].
///
/// # Examples
/// ```
/// use eight_puzzle_solver::engine::BoardState;
/// use eight_puzzle_solver::heuristics::EvaluatorKind;
/// use eight_puzzle_solver::solver::search;
///
/// let start = BoardState::new([[1, 2, 3], [4, 0, 6], [7, 5, 8]]).unwrap();
/// let outcome = search(start, BoardState::goal(), EvaluatorKind::ManhattanDistance);
/// assert_eq!(outcome.cost(), Some(2));
/// assert_eq!(outcome.path().unwrap().last(), Some(&BoardState::goal()));
/// ```
pub fn search(initial: BoardState, goal: BoardState, evaluator: EvaluatorKind) -> SearchOutcome {
    search_with_config(initial, goal, evaluator, &SearchConfig::default())
}

/// Solves `initial` toward `goal`, ordering the frontier by `evaluator`.
pub fn search_with_config(
    initial: BoardState,
    goal: BoardState,
    evaluator: EvaluatorKind,
    config: &SearchConfig,
) -> SearchOutcome {
    let started = Instant::now();
    debug!(%evaluator, check_parity = config.check_parity, "starting search");

    if config.check_parity && !initial.is_solvable_from(&goal) {
        info!(%evaluator, "start and goal have opposite parity, no solution");
        return SearchOutcome::Unsolvable {
            stats: SearchStats {
                elapsed: started.elapsed(),
                ..SearchStats::default()
            },
        };
    }

    let mut run = Search::new(initial, goal, evaluator);
    let mut last_reported = 0;

    loop {
        if let Some(limit) = config.deadline {
            if started.elapsed() >= limit {
                let stats = SearchStats {
                    elapsed: started.elapsed(),
                    ..run.stats()
                };
                warn!(
                    %evaluator,
                    visited = stats.visited_count,
                    open = run.open_len(),
                    "search deadline of {:?} exceeded",
                    limit
                );
                return SearchOutcome::TimedOut { stats };
            }
        }

        match run.step() {
            SearchState::Running => {
                let visited = run.stats().visited_count;
                if config.progress_interval > 0
                    && visited != last_reported
                    && visited % config.progress_interval == 0
                {
                    last_reported = visited;
                    debug!(visited, open = run.open_len(), "search progress");
                }
            }
            SearchState::Succeeded(goal_node) => {
                let path = reconstruct_path(run.arena(), goal_node);
                let cost = run.arena()[goal_node].cost;
                let stats = SearchStats {
                    elapsed: started.elapsed(),
                    ..run.stats()
                };
                info!(
                    %evaluator,
                    cost,
                    visited = stats.visited_count,
                    generated = stats.generated,
                    max_frontier = stats.max_frontier_size,
                    "goal reached"
                );
                return SearchOutcome::Solved { path, cost, stats };
            }
            SearchState::Exhausted => {
                let stats = SearchStats {
                    elapsed: started.elapsed(),
                    ..run.stats()
                };
                info!(
                    %evaluator,
                    visited = stats.visited_count,
                    "open set exhausted, no solution"
                );
                return SearchOutcome::Unsolvable { stats };
            }
        }
    }
}
