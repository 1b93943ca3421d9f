//! Chunk materialization and the live block set of a loaded chunk.
#![forbid(unsafe_code)]

use hashbrown::HashMap;
use loam_blocks::{Block, BlockKind};
use loam_edit::{ChunkEdits, Mutation};
use loam_geom::BlockPos;
use loam_world::{ChunkCoord, World};

/// Materialized blocks of one chunk. A cache of
/// `(footprint, noise field, ledger entries inside the footprint)`; the
/// ledger stays the source of truth.
#[derive(Clone, Debug)]
pub struct ChunkBuf {
    pub coord: ChunkCoord,
    pub size: usize,
    /// Ledger revision of the edits this buffer was built from.
    pub rev: u64,
    blocks: Vec<Block>,
    index: HashMap<BlockPos, usize>,
}

impl ChunkBuf {
    pub fn empty(coord: ChunkCoord, size: usize) -> Self {
        Self {
            coord,
            size,
            rev: 0,
            blocks: Vec::new(),
            index: HashMap::new(),
        }
    }

    #[inline]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    #[inline]
    pub fn origin(&self) -> (i32, i32) {
        self.coord.origin(self.size)
    }

    /// Horizontal footprint test; chunks span the whole vertical range.
    #[inline]
    pub fn contains_world(&self, pos: BlockPos) -> bool {
        self.coord.contains(pos.x, pos.z, self.size)
    }

    #[inline]
    pub fn get_world(&self, pos: BlockPos) -> Option<BlockKind> {
        self.index.get(&pos).map(|&i| self.blocks[i].kind)
    }

    #[inline]
    pub fn is_solid_at(&self, pos: BlockPos) -> bool {
        self.get_world(pos).is_some_and(BlockKind::is_solid)
    }

    fn push(&mut self, block: Block) {
        self.index.insert(block.pos, self.blocks.len());
        self.blocks.push(block);
    }

    /// Inserts or replaces the record at `block.pos`. Returns the previous kind.
    pub fn upsert(&mut self, block: Block) -> Option<BlockKind> {
        debug_assert!(self.contains_world(block.pos));
        match self.index.get(&block.pos) {
            Some(&i) => {
                let prev = self.blocks[i].kind;
                self.blocks[i] = block;
                Some(prev)
            }
            None => {
                self.push(block);
                None
            }
        }
    }

    /// Drops the record at `pos`, if any. Order of the remaining blocks is
    /// not preserved.
    pub fn remove_world(&mut self, pos: BlockPos) -> Option<Block> {
        let i = self.index.remove(&pos)?;
        let removed = self.blocks.swap_remove(i);
        if let Some(moved) = self.blocks.get(i) {
            self.index.insert(moved.pos, i);
        }
        Some(removed)
    }

    /// Patches the live set with one ledger write. Returns whether anything
    /// visible changed.
    pub fn apply(&mut self, pos: BlockPos, mutation: Mutation) -> bool {
        match mutation {
            Mutation::Added(kind) => self.upsert(Block::new(pos, kind)) != Some(kind),
            Mutation::Removed => self.remove_world(pos).is_some(),
        }
    }

    /// Renderer-facing copy with chunk-local x/z.
    pub fn view(&self) -> ChunkView {
        let (x0, z0) = self.origin();
        ChunkView {
            coord: self.coord,
            origin_x: x0,
            origin_z: z0,
            blocks: self
                .blocks
                .iter()
                .map(|b| LocalBlock {
                    lx: b.pos.x - x0,
                    y: b.pos.y,
                    lz: b.pos.z - z0,
                    kind: b.kind,
                })
                .collect(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct LocalBlock {
    pub lx: i32,
    pub y: i32,
    pub lz: i32,
    pub kind: BlockKind,
}

/// Copy of a chunk's blocks handed to the rendering side.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChunkView {
    pub coord: ChunkCoord,
    pub origin_x: i32,
    pub origin_z: i32,
    pub blocks: Vec<LocalBlock>,
}

/// Builds the block set of `coord`: every generated column in the
/// footprint, minus `Removed` overrides, with `Added` overrides replacing
/// generated blocks or appended where the generator left air.
pub fn materialize(world: &World, coord: ChunkCoord, edits: &ChunkEdits) -> ChunkBuf {
    debug_assert_eq!(edits.coord, coord);
    let size = world.chunk_size;
    let (x0, z0) = coord.origin(size);
    let mut buf = ChunkBuf::empty(coord, size);
    buf.rev = edits.rev;
    let estimate = size * size * (world.max_height() as usize / 2 + 1);
    buf.blocks.reserve(estimate);
    buf.index.reserve(estimate);

    for lx in 0..size as i32 {
        for lz in 0..size as i32 {
            let (wx, wz) = (x0 + lx, z0 + lz);
            let column = world.column(wx, wz);
            for cell in &column.cells {
                let pos = BlockPos::new(wx, cell.y, wz);
                match edits.get(pos) {
                    Some(Mutation::Removed) => {}
                    Some(Mutation::Added(kind)) => buf.push(Block::new(pos, kind)),
                    None => buf.push(Block::new(pos, cell.kind)),
                }
            }
        }
    }

    for (pos, kind) in edits.added() {
        debug_assert!(buf.contains_world(pos));
        if !buf.index.contains_key(&pos) {
            buf.push(Block::new(pos, kind));
        }
    }
    buf
}
