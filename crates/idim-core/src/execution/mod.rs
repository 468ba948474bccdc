//! Execution engines for controlling computation strategy
//!
//! Per-point work in this workspace is independent, so an engine only needs
//! to fan a row index out to a closure and collect the results in order.
//! Reductions over the collected results always happen on the caller's thread.

use crate::Result;
use tracing::debug;

/// Execution strategy for batch operations
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ExecutionStrategy {
    /// Process items sequentially
    Sequential,
    /// Process items in parallel
    Parallel,
}

/// Trait for execution engines that control how computations are performed
pub trait ExecutionEngine: Clone + Send + Sync {
    /// Run `f` for every index in `0..count`, returning results in index order
    fn execute_batch<F, R>(&self, count: usize, f: F) -> Vec<R>
    where
        F: Fn(usize) -> R + Sync + Send,
        R: Send;

    /// Get the execution strategy
    fn strategy(&self) -> ExecutionStrategy;

    /// Check if parallel execution is available
    fn is_parallel(&self) -> bool {
        self.strategy() == ExecutionStrategy::Parallel
    }

    /// Get the number of threads available
    fn num_threads(&self) -> usize;
}

/// Sequential execution engine
///
/// Executes all operations sequentially in the current thread.
#[derive(Clone, Copy, Debug, Default)]
pub struct SequentialEngine;

impl SequentialEngine {
    pub fn new() -> Self {
        Self
    }
}

impl ExecutionEngine for SequentialEngine {
    fn execute_batch<F, R>(&self, count: usize, f: F) -> Vec<R>
    where
        F: Fn(usize) -> R + Sync + Send,
        R: Send,
    {
        (0..count).map(f).collect()
    }

    fn strategy(&self) -> ExecutionStrategy {
        ExecutionStrategy::Sequential
    }

    fn num_threads(&self) -> usize {
        1
    }
}

/// Parallel execution engine using Rayon
///
/// Executes operations in parallel using Rayon's global pool, or a dedicated
/// pool when constructed with an explicit thread count.
#[cfg(feature = "parallel")]
#[derive(Clone, Debug, Default)]
pub struct ParallelEngine {
    thread_pool: Option<std::sync::Arc<rayon::ThreadPool>>,
}

#[cfg(feature = "parallel")]
impl ParallelEngine {
    /// Create a new parallel engine with the global thread pool
    pub fn new() -> Self {
        Self { thread_pool: None }
    }

    /// Create with a specific number of threads
    pub fn with_num_threads(num_threads: usize) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build()
            .map_err(|e| crate::Error::Execution(format!("Failed to create thread pool: {e}")))?;

        Ok(Self {
            thread_pool: Some(std::sync::Arc::new(pool)),
        })
    }
}

#[cfg(feature = "parallel")]
impl ExecutionEngine for ParallelEngine {
    fn execute_batch<F, R>(&self, count: usize, f: F) -> Vec<R>
    where
        F: Fn(usize) -> R + Sync + Send,
        R: Send,
    {
        use rayon::prelude::*;

        if let Some(pool) = &self.thread_pool {
            pool.install(|| (0..count).into_par_iter().map(f).collect())
        } else {
            (0..count).into_par_iter().map(f).collect()
        }
    }

    fn strategy(&self) -> ExecutionStrategy {
        ExecutionStrategy::Parallel
    }

    fn num_threads(&self) -> usize {
        if let Some(pool) = &self.thread_pool {
            pool.current_num_threads()
        } else {
            rayon::current_num_threads()
        }
    }
}

/// Engine selected at runtime from a job count
#[derive(Clone, Debug)]
pub enum JobsEngine {
    Sequential(SequentialEngine),
    #[cfg(feature = "parallel")]
    Parallel(ParallelEngine),
}

impl JobsEngine {
    /// Select an engine for `n_jobs` workers
    ///
    /// `1` runs sequentially, `0` uses the global Rayon pool and any other
    /// value builds a dedicated pool of that size. Without the `parallel`
    /// feature every job count falls back to sequential execution.
    pub fn from_n_jobs(n_jobs: usize) -> Result<Self> {
        #[cfg(feature = "parallel")]
        {
            let engine = match n_jobs {
                1 => Self::Sequential(SequentialEngine),
                0 => Self::Parallel(ParallelEngine::new()),
                n => Self::Parallel(ParallelEngine::with_num_threads(n)?),
            };
            debug!(n_jobs, threads = engine.num_threads(), "Selected execution engine");
            Ok(engine)
        }
        #[cfg(not(feature = "parallel"))]
        {
            if n_jobs != 1 {
                debug!(n_jobs, "parallel feature disabled, running sequentially");
            }
            Ok(Self::Sequential(SequentialEngine))
        }
    }
}

impl ExecutionEngine for JobsEngine {
    fn execute_batch<F, R>(&self, count: usize, f: F) -> Vec<R>
    where
        F: Fn(usize) -> R + Sync + Send,
        R: Send,
    {
        match self {
            Self::Sequential(engine) => engine.execute_batch(count, f),
            #[cfg(feature = "parallel")]
            Self::Parallel(engine) => engine.execute_batch(count, f),
        }
    }

    fn strategy(&self) -> ExecutionStrategy {
        match self {
            Self::Sequential(engine) => engine.strategy(),
            #[cfg(feature = "parallel")]
            Self::Parallel(engine) => engine.strategy(),
        }
    }

    fn num_threads(&self) -> usize {
        match self {
            Self::Sequential(engine) => engine.num_threads(),
            #[cfg(feature = "parallel")]
            Self::Parallel(engine) => engine.num_threads(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_engine() {
        let engine = SequentialEngine::new();

        let squares = engine.execute_batch(5, |i| i * i);
        assert_eq!(squares, vec![0, 1, 4, 9, 16]);

        assert_eq!(engine.strategy(), ExecutionStrategy::Sequential);
        assert_eq!(engine.num_threads(), 1);
        assert!(!engine.is_parallel());
    }

    #[test]
    fn test_single_job_is_sequential() {
        let engine = JobsEngine::from_n_jobs(1).unwrap();
        assert_eq!(engine.strategy(), ExecutionStrategy::Sequential);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_engine_preserves_order() {
        let engine = ParallelEngine::with_num_threads(2).unwrap();
        assert_eq!(engine.num_threads(), 2);

        let result = engine.execute_batch(1000, |i| i as f64 * 0.5);
        let expected: Vec<f64> = (0..1000).map(|i| i as f64 * 0.5).collect();
        assert_eq!(result, expected);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_jobs_engine_selection() {
        let engine = JobsEngine::from_n_jobs(3).unwrap();
        assert!(engine.is_parallel());
        assert_eq!(engine.num_threads(), 3);

        let engine = JobsEngine::from_n_jobs(0).unwrap();
        assert!(engine.is_parallel());
    }
}
