//! Background mesh rebuilding
//!
//! Mutations are batched in `DirtyChunks`. Each rebuild request snapshots the
//! chunk, its loaded neighbors and the block registry, so workers never see a
//! chunk that is being written. Every request takes a fresh generation from a
//! scheduler-wide counter; only results of a chunk's latest generation are
//! handed back.

use super::mesh_builder_operations;
use super::mesh_data::MeshData;
use crate::config::MesherConfig;
use crate::world::core::{BlockRegistry, BlockRegistryData, BlockSide, ChunkPos};
use crate::world::storage::{ChunkData, ChunkDimensions, ChunkNeighbors};
use crossbeam_channel::{unbounded, Receiver, Sender};
use dashmap::DashMap;
use rustc_hash::FxHashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Chunks waiting for a rebuild
#[derive(Debug, Default)]
pub struct DirtyChunks {
    chunks: FxHashSet<ChunkPos>,
}

impl DirtyChunks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the chunk was already dirty
    pub fn mark_dirty(&mut self, position: ChunkPos) -> bool {
        self.chunks.insert(position)
    }

    /// Mark the chunk owning a changed block, plus every neighbor whose
    /// boundary faces the block touches
    pub fn mark_block_changed(
        &mut self,
        position: ChunkPos,
        dimensions: ChunkDimensions,
        x: i32,
        y: i32,
        z: i32,
    ) {
        self.mark_dirty(position);
        let local = [x, y, z];
        for side in BlockSide::ALL {
            let axis = side.axis();
            let edge = if side.is_positive() {
                dimensions.extent(axis) as i32 - 1
            } else {
                0
            };
            if local[axis] == edge {
                self.mark_dirty(position.neighbor(side));
            }
        }
    }

    pub fn is_dirty(&self, position: ChunkPos) -> bool {
        self.chunks.contains(&position)
    }

    /// Drain every dirty chunk in one batch
    pub fn take_dirty(&mut self) -> Vec<ChunkPos> {
        let mut chunks: Vec<ChunkPos> = self.chunks.drain().collect();
        chunks.sort_by_key(|p| (p.x, p.y, p.z));
        chunks
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

/// Owned snapshot of everything one chunk build reads
#[derive(Debug, Clone)]
pub struct MeshJob {
    pub chunk: ChunkData,
    /// Indexed by `BlockSide::index()`
    pub neighbors: [Option<ChunkData>; 6],
    pub registry: Arc<BlockRegistryData>,
}

impl MeshJob {
    /// Copy the chunk and its loaded neighbors and pin the current registry
    pub fn snapshot(
        chunk: &ChunkData,
        neighbors: &ChunkNeighbors<'_>,
        registry: &BlockRegistry,
    ) -> Self {
        Self {
            chunk: chunk.clone(),
            neighbors: BlockSide::ALL.map(|side| neighbors.get(side).cloned()),
            registry: registry.snapshot(),
        }
    }

    pub fn position(&self) -> ChunkPos {
        self.chunk.position
    }

    pub fn build_mesh(&self, config: &MesherConfig) -> MeshData {
        let neighbors = ChunkNeighbors::new(std::array::from_fn(|i| self.neighbors[i].as_ref()));
        mesh_builder_operations::build_chunk_mesh(&self.chunk, &neighbors, &self.registry, config)
    }
}

/// A finished build that is still the latest for its chunk
#[derive(Debug)]
pub struct MeshResult {
    pub position: ChunkPos,
    pub generation: u64,
    pub mesh: MeshData,
}

/// Worker message; `mesh` is None when the job was superseded before it started
struct Completed {
    position: ChunkPos,
    generation: u64,
    mesh: Option<MeshData>,
}

/// Runs mesh builds on the rayon pool and filters out superseded results
pub struct MeshScheduler {
    config: Arc<MesherConfig>,
    /// Latest generation issued per tracked chunk
    generations: Arc<DashMap<ChunkPos, u64>>,
    /// Never reused, so a forgotten chunk cannot accept a stale result
    generation_counter: AtomicU64,
    result_tx: Sender<Completed>,
    result_rx: Receiver<Completed>,
    pending: usize,
}

impl MeshScheduler {
    pub fn new(config: MesherConfig) -> Self {
        let (result_tx, result_rx) = unbounded();
        Self {
            config: Arc::new(config),
            generations: Arc::new(DashMap::new()),
            generation_counter: AtomicU64::new(0),
            result_tx,
            result_rx,
            pending: 0,
        }
    }

    pub fn config(&self) -> &MesherConfig {
        &self.config
    }

    /// Start a new generation for a chunk, superseding all earlier ones
    fn next_generation(&self, position: ChunkPos) -> u64 {
        let generation = self.generation_counter.fetch_add(1, Ordering::Relaxed) + 1;
        self.generations.insert(position, generation);
        generation
    }

    /// Stop tracking an unloaded chunk; builds still in flight for it are discarded
    pub fn forget(&self, position: ChunkPos) -> bool {
        self.generations.remove(&position).is_some()
    }

    /// Chunks with a generation on record
    pub fn tracked_chunks(&self) -> usize {
        self.generations.len()
    }

    pub fn latest_generation(&self, position: ChunkPos) -> Option<u64> {
        self.generations.get(&position).map(|g| *g)
    }

    /// Builds issued but not yet collected
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Queue a background build; returns the generation it was issued as
    pub fn request(&mut self, job: MeshJob) -> u64 {
        let position = job.position();
        let generation = self.next_generation(position);
        let generations = Arc::clone(&self.generations);
        let config = Arc::clone(&self.config);
        let tx = self.result_tx.clone();
        self.pending += 1;

        rayon::spawn(move || {
            let current = generations.get(&position).map(|g| *g);
            let mesh = if current == Some(generation) {
                Some(job.build_mesh(&config))
            } else {
                None
            };
            if tx
                .send(Completed {
                    position,
                    generation,
                    mesh,
                })
                .is_err()
            {
                log::warn!(
                    "Mesh result for chunk ({}, {}, {}) dropped, scheduler is gone",
                    position.x,
                    position.y,
                    position.z
                );
            }
        });

        generation
    }

    /// Build on the calling thread; supersedes any build still in flight
    pub fn build_now(&self, job: MeshJob) -> MeshResult {
        let position = job.position();
        let generation = self.next_generation(position);
        MeshResult {
            position,
            generation,
            mesh: job.build_mesh(&self.config),
        }
    }

    fn accept(&self, completed: Completed) -> Option<MeshResult> {
        let latest = self.latest_generation(completed.position);
        match completed.mesh {
            Some(mesh) if latest == Some(completed.generation) => Some(MeshResult {
                position: completed.position,
                generation: completed.generation,
                mesh,
            }),
            _ => {
                log::debug!(
                    "Discarding mesh for chunk ({}, {}, {}) generation {} (latest {:?})",
                    completed.position.x,
                    completed.position.y,
                    completed.position.z,
                    completed.generation,
                    latest
                );
                None
            }
        }
    }

    /// Collect finished builds without blocking
    pub fn poll_completed(&mut self) -> Vec<MeshResult> {
        let mut results = Vec::new();
        while let Ok(completed) = self.result_rx.try_recv() {
            self.pending -= 1;
            results.extend(self.accept(completed));
        }
        results
    }

    /// Block until every issued build has reported back
    pub fn wait_idle(&mut self) -> Vec<MeshResult> {
        let mut results = Vec::new();
        while self.pending > 0 {
            // `result_tx` lives as long as the scheduler, so recv only ends on a message
            let Ok(completed) = self.result_rx.recv() else {
                break;
            };
            self.pending -= 1;
            results.extend(self.accept(completed));
        }
        results
    }
}

impl Default for MeshScheduler {
    fn default() -> Self {
        Self::new(MesherConfig::default())
    }
}
