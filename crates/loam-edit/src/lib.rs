//! Mutation ledger: player-caused overrides on top of generated terrain.
#![forbid(unsafe_code)]

use hashbrown::HashMap;
use loam_blocks::BlockKind;
use loam_geom::BlockPos;
use loam_world::ChunkCoord;

/// Override for a single world coordinate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Mutation {
    Added(BlockKind),
    Removed,
}

impl Mutation {
    /// Kind that ends up at the coordinate, `None` for a removal.
    #[inline]
    pub fn kind(self) -> Option<BlockKind> {
        match self {
            Mutation::Added(kind) => Some(kind),
            Mutation::Removed => None,
        }
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditStoreStats {
    pub chunk_entries: usize,
    pub block_edits: usize,
    pub added: usize,
    pub removed: usize,
    pub rev_entries: usize,
}

/// Process-wide ledger, bucketed per chunk so a chunk's overrides can be
/// fetched without scanning every entry. Never notifies loaded chunks;
/// callers patch those themselves.
pub struct EditStore {
    chunk_size: usize,
    inner: HashMap<ChunkCoord, HashMap<BlockPos, Mutation>>,
    // latest revision recorded against each chunk
    rev: HashMap<ChunkCoord, u64>,
    counter: u64,
}

impl EditStore {
    pub fn new(chunk_size: usize) -> Self {
        debug_assert!(chunk_size > 0);
        Self {
            chunk_size,
            inner: HashMap::new(),
            rev: HashMap::new(),
            counter: 0,
        }
    }

    #[inline]
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    #[inline]
    fn chunk_key(&self, pos: BlockPos) -> ChunkCoord {
        ChunkCoord::of_block(pos, self.chunk_size)
    }

    /// Upsert; the last write for a coordinate wins. Returns the revision
    /// stamped on the owning chunk.
    pub fn record(&mut self, pos: BlockPos, mutation: Mutation) -> u64 {
        let key = self.chunk_key(pos);
        self.inner.entry(key).or_default().insert(pos, mutation);
        self.counter = self.counter.wrapping_add(1).max(1);
        self.rev.insert(key, self.counter);
        self.counter
    }

    pub fn lookup(&self, pos: BlockPos) -> Option<Mutation> {
        self.inner
            .get(&self.chunk_key(pos))
            .and_then(|m| m.get(&pos).copied())
    }

    /// Entries for every chunk in the inclusive rectangle `[min, max]`.
    pub fn entries_within(&self, min: ChunkCoord, max: ChunkCoord) -> Vec<(BlockPos, Mutation)> {
        let mut out = Vec::new();
        for cz in min.cz..=max.cz {
            for cx in min.cx..=max.cx {
                if let Some(m) = self.inner.get(&ChunkCoord::new(cx, cz)) {
                    out.extend(m.iter().map(|(p, v)| (*p, *v)));
                }
            }
        }
        out
    }

    /// Owned copy of one chunk's overrides, safe to hand to a worker.
    pub fn snapshot_for_chunk(&self, coord: ChunkCoord) -> ChunkEdits {
        let entries = self.inner.get(&coord).cloned().unwrap_or_default();
        ChunkEdits {
            coord,
            rev: self.get_rev(coord),
            entries,
        }
    }

    pub fn get_rev(&self, coord: ChunkCoord) -> u64 {
        self.rev.get(&coord).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.inner.values().map(|m| m.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.values().all(|m| m.is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (BlockPos, Mutation)> + '_ {
        self.inner
            .values()
            .flat_map(|m| m.iter().map(|(p, v)| (*p, *v)))
    }

    pub fn stats(&self) -> EditStoreStats {
        let mut added = 0;
        let mut removed = 0;
        for (_, m) in self.iter() {
            match m {
                Mutation::Added(_) => added += 1,
                Mutation::Removed => removed += 1,
            }
        }
        EditStoreStats {
            chunk_entries: self.inner.len(),
            block_edits: added + removed,
            added,
            removed,
            rev_entries: self.rev.len(),
        }
    }
}

/// Read-only view of the overrides inside a single chunk, taken at
/// revision `rev`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChunkEdits {
    pub coord: ChunkCoord,
    pub rev: u64,
    entries: HashMap<BlockPos, Mutation>,
}

impl ChunkEdits {
    #[inline]
    pub fn get(&self, pos: BlockPos) -> Option<Mutation> {
        self.entries.get(&pos).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BlockPos, Mutation)> + '_ {
        self.entries.iter().map(|(p, m)| (*p, *m))
    }

    /// `Added` entries, sorted so appending them is deterministic.
    pub fn added(&self) -> Vec<(BlockPos, BlockKind)> {
        let mut out: Vec<_> = self
            .entries
            .iter()
            .filter_map(|(p, m)| m.kind().map(|k| (*p, k)))
            .collect();
        out.sort_unstable_by_key(|(p, _)| *p);
        out
    }
}
