//! Fork-join worker pool
//!
//! Work is split statically: worker `c` of `W` owns indices
//! `c, c + W, c + 2W, ...`. Every parallel loop ends at a join, and results
//! come back per worker so they can be reassembled in index order.

use adaga_common::{AdagaError, ConfigError, Result};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::debug;

/// Index set owned by one worker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stride {
    /// Worker number, also the first index
    pub worker: usize,
    width: usize,
    len: usize,
}

impl Stride {
    /// Indices `worker, worker + width, ...` below the loop length
    pub fn indices(&self) -> impl Iterator<Item = usize> {
        (self.worker..self.len).step_by(self.width)
    }
}

/// Bounded pool of `width` workers
///
/// A width of one runs every loop inline on the calling thread.
pub struct WorkerPool {
    width: usize,
    pool: Option<ThreadPool>,
}

impl WorkerPool {
    pub fn new(width: usize) -> Result<Self> {
        if width == 0 {
            return Err(ConfigError::NoWorkers.into());
        }

        let pool = if width == 1 {
            None
        } else {
            let pool = ThreadPoolBuilder::new()
                .num_threads(width)
                .thread_name(|i| format!("adaga-worker-{}", i))
                .build()
                .map_err(|e| AdagaError::WorkerPool(e.to_string()))?;
            Some(pool)
        };

        debug!(width, "Worker pool ready");
        Ok(Self { width, pool })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Run `job` once per worker over a loop of `len` indices and join
    ///
    /// Results are returned in worker order.
    pub fn partition<T, F>(&self, len: usize, job: F) -> Vec<T>
    where
        T: Send,
        F: Fn(Stride) -> T + Sync,
    {
        let width = self.width;
        let stride = |worker| Stride { worker, width, len };

        match &self.pool {
            None => vec![job(stride(0))],
            Some(pool) => pool.install(|| (0..width).into_par_iter().map(|c| job(stride(c))).collect()),
        }
    }

    /// Map every index in `0..len` through `f`, results in index order
    pub fn map<T, F>(&self, len: usize, f: F) -> Vec<T>
    where
        T: Send,
        F: Fn(usize) -> T + Sync,
    {
        let parts = self.partition(len, |stride| stride.indices().map(&f).collect::<Vec<_>>());
        interleave(parts, len)
    }

    /// Like [`WorkerPool::map`], but refills `out` in place
    pub fn map_into<T, F>(&self, out: &mut Vec<T>, len: usize, f: F)
    where
        T: Send,
        F: Fn(usize) -> T + Sync,
    {
        let parts = self.partition(len, |stride| stride.indices().map(&f).collect::<Vec<_>>());
        out.clear();
        out.reserve(len);
        extend_interleaved(out, parts);
    }
}

impl std::fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool")
            .field("width", &self.width)
            .field("threaded", &self.pool.is_some())
            .finish()
    }
}

/// Reassemble strided per-worker results into index order
pub(crate) fn interleave<T>(parts: Vec<Vec<T>>, len: usize) -> Vec<T> {
    let mut out = Vec::with_capacity(len);
    extend_interleaved(&mut out, parts);
    out
}

fn extend_interleaved<T>(out: &mut Vec<T>, parts: Vec<Vec<T>>) {
    let mut columns: Vec<_> = parts.into_iter().map(Vec::into_iter).collect();
    // Round j visits index c + j * width for c = 0, 1, ...; once one worker
    // runs dry every later worker has too.
    'rounds: loop {
        for column in columns.iter_mut() {
            match column.next() {
                Some(value) => out.push(value),
                None => break 'rounds,
            }
        }
    }
}
