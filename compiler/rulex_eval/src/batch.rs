//! Evaluating one tree against many environments.

use std::sync::OnceLock;

use rayon::prelude::*;
use rayon::ThreadPool;
use rulex_ir::Node;

use crate::{evaluate, Environment, EvalResult};

/// Worker stack size. Evaluation recursion is bounded by tree depth and
/// `ensure_sufficient_stack` grows on demand; a roomy initial stack keeps
/// that growth rare on pool threads.
const WORKER_STACK: usize = 16 * 1024 * 1024;

/// Pool shared by every [`evaluate_batch`] call, built on first use.
/// `None` when it could not be built.
static POOL: OnceLock<Option<ThreadPool>> = OnceLock::new();

pub(crate) fn shared_pool() -> Option<&'static ThreadPool> {
    POOL.get_or_init(|| {
        rayon::ThreadPoolBuilder::new()
            .stack_size(WORKER_STACK)
            .thread_name(|i| format!("rulex-eval-{i}"))
            .build()
            .map_err(|e| {
                tracing::warn!("failed to create thread pool ({e}), batches run sequentially");
            })
            .ok()
    })
    .as_ref()
}

/// Evaluate `node` once per environment, in parallel.
///
/// Each evaluation is an ordinary single-threaded walk; only independent
/// calls run concurrently, sharing the immutable tree. Results keep the
/// order of `envs`. Runs on a process-wide pool built on the first call;
/// falls back to sequential evaluation if that pool cannot be created.
pub fn evaluate_batch(node: &Node, envs: &[Environment]) -> Vec<EvalResult> {
    match shared_pool() {
        Some(pool) => evaluate_batch_in(pool, node, envs),
        None => envs.iter().map(|env| evaluate(node, env)).collect(),
    }
}

/// Like [`evaluate_batch`], on a pool the caller owns.
pub fn evaluate_batch_in(pool: &ThreadPool, node: &Node, envs: &[Environment]) -> Vec<EvalResult> {
    pool.install(|| envs.par_iter().map(|env| evaluate(node, env)).collect())
}
