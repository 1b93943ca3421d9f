//! Outputs for the rendering collaborator. Sinks only ever receive copies.
use loam_blocks::BlockKind;
use loam_chunk::ChunkView;
use loam_geom::BlockPos;
use loam_world::ChunkCoord;

pub trait RenderSink {
    fn chunk_loaded(&mut self, view: ChunkView);
    fn chunk_unloaded(&mut self, coord: ChunkCoord);
    /// Single-block patch of an already loaded chunk; `None` means removed.
    fn block_changed(&mut self, coord: ChunkCoord, pos: BlockPos, kind: Option<BlockKind>);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderNotice {
    Loaded(ChunkView),
    Unloaded(ChunkCoord),
    BlockChanged {
        coord: ChunkCoord,
        pos: BlockPos,
        kind: Option<BlockKind>,
    },
}

/// Keeps every notice in arrival order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub notices: Vec<RenderNotice>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&mut self) -> Vec<RenderNotice> {
        std::mem::take(&mut self.notices)
    }

    pub fn loaded(&self) -> Vec<ChunkCoord> {
        self.notices
            .iter()
            .filter_map(|n| match n {
                RenderNotice::Loaded(v) => Some(v.coord),
                _ => None,
            })
            .collect()
    }

    pub fn unloaded(&self) -> Vec<ChunkCoord> {
        self.notices
            .iter()
            .filter_map(|n| match n {
                RenderNotice::Unloaded(c) => Some(*c),
                _ => None,
            })
            .collect()
    }
}

impl RenderSink for RecordingSink {
    fn chunk_loaded(&mut self, view: ChunkView) {
        self.notices.push(RenderNotice::Loaded(view));
    }

    fn chunk_unloaded(&mut self, coord: ChunkCoord) {
        self.notices.push(RenderNotice::Unloaded(coord));
    }

    fn block_changed(&mut self, coord: ChunkCoord, pos: BlockPos, kind: Option<BlockKind>) {
        self.notices.push(RenderNotice::BlockChanged { coord, pos, kind });
    }
}

/// Counts notices and logs them at trace level; used by the headless binary.
#[derive(Debug, Default)]
pub struct LogSink {
    pub loaded: usize,
    pub unloaded: usize,
    pub changed: usize,
    pub blocks_emitted: usize,
}

impl RenderSink for LogSink {
    fn chunk_loaded(&mut self, view: ChunkView) {
        log::trace!(
            "chunk ({}, {}) loaded: {} blocks at offset ({}, {})",
            view.coord.cx,
            view.coord.cz,
            view.blocks.len(),
            view.origin_x,
            view.origin_z
        );
        self.loaded += 1;
        self.blocks_emitted += view.blocks.len();
    }

    fn chunk_unloaded(&mut self, coord: ChunkCoord) {
        log::trace!("chunk ({}, {}) unloaded", coord.cx, coord.cz);
        self.unloaded += 1;
    }

    fn block_changed(&mut self, coord: ChunkCoord, pos: BlockPos, kind: Option<BlockKind>) {
        log::trace!(
            "chunk ({}, {}) block ({}, {}, {}) -> {}",
            coord.cx,
            coord.cz,
            pos.x,
            pos.y,
            pos.z,
            kind.map_or("removed", BlockKind::name)
        );
        self.changed += 1;
    }
}
