//! Generic Topological Sort (Kahn's Algorithm)
//!
//! Emits one item at a time. Edges come from a [`DependencyAnalyzer`], ties
//! between simultaneously eligible items go to a [`TieBreaker`]. Edge discovery
//! is pairwise, O(N²) analyzer calls per sorted set; each pair is analyzed in
//! both orientations.

use crate::domain::errors::SortError;
use crate::domain::value_objects::DependencyRelation;
use crate::ports::outbound::{DependencyAnalyzer, TieBreaker};
use std::fmt;

/// Sort `items` so every dependency precedes its dependents.
///
/// Candidates handed to the tie breaker keep the order of `items`. If at
/// some step nothing is eligible, the residual items (in input order) form
/// the reported cycle.
pub fn topological_sort<T, A, B>(
    items: &[T],
    analyzer: &A,
    tie_breaker: &B,
) -> Result<Vec<T>, SortError<T, B::Error>>
where
    T: Copy + Eq + fmt::Debug,
    A: DependencyAnalyzer<T> + ?Sized,
    B: TieBreaker<T> + ?Sized,
{
    if items.is_empty() {
        return Ok(vec![]);
    }

    let count = items.len();

    // 1. Build in-degree and adjacency (dependency -> dependents)
    let mut in_degree = vec![0usize; count];
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); count];

    for i in 0..count {
        // A self-dependency can never be satisfied.
        if analyzer.analyze_direct_dependency(&items[i], &items[i])
            != DependencyRelation::None
        {
            in_degree[i] += 1;
        }

        for j in (i + 1)..count {
            // Ask both orientations so mutual declarations become a cycle.
            let forward = analyzer.analyze_direct_dependency(&items[i], &items[j]);
            let backward = analyzer.analyze_direct_dependency(&items[j], &items[i]);

            if forward == DependencyRelation::FirstDependsOnSecond
                || backward == DependencyRelation::SecondDependsOnFirst
            {
                dependents[j].push(i);
                in_degree[i] += 1;
            }
            if forward == DependencyRelation::SecondDependsOnFirst
                || backward == DependencyRelation::FirstDependsOnSecond
            {
                dependents[i].push(j);
                in_degree[j] += 1;
            }
        }
    }

    // 2. Zero in-degree items are eligible
    let mut ready: Vec<usize> = (0..count).filter(|&i| in_degree[i] == 0).collect();
    let mut emitted = vec![false; count];
    let mut order = Vec::with_capacity(count);

    // 3. Emit one item per step
    while order.len() < count {
        let position = match ready.len() {
            0 => {
                let residual = (0..count)
                    .filter(|&i| !emitted[i])
                    .map(|i| items[i])
                    .collect();
                return Err(SortError::CircularDependencies(residual));
            }
            1 => 0,
            _ => {
                let candidates: Vec<T> = ready.iter().map(|&i| items[i]).collect();
                let chosen = tie_breaker
                    .resolve_tie(&candidates)
                    .map_err(SortError::TieBreak)?;
                candidates
                    .iter()
                    .position(|candidate| *candidate == chosen)
                    .unwrap_or(0)
            }
        };

        let next = ready.remove(position);
        emitted[next] = true;
        order.push(items[next]);

        // 4. Release dependents, keeping `ready` in input order
        for &dependent in &dependents[next] {
            in_degree[dependent] = in_degree[dependent].saturating_sub(1);
            if in_degree[dependent] == 0 {
                let slot = ready.partition_point(|&i| i < dependent);
                ready.insert(slot, dependent);
            }
        }
    }

    Ok(order)
}
