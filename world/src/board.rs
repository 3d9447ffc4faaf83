//! Position model: the occupancy matrix plus the arena of tiles it references.

use std::collections::BTreeMap;

use slide_merge_core::{
    CellCoord, GameError, LanePosition, TileId, TilePhase, TileSnapshot, TileValue, TileView,
    MAX_BOARD_SIZE,
};

/// Square occupancy matrix and the tiles placed on it.
///
/// Cells hold tile identifiers rather than tiles; the tiles themselves live in
/// an arena keyed by [`TileId`]. A live tile's recorded cell always names the
/// cell that holds it. Tiles pending removal stay in the arena but occupy no
/// cell.
#[derive(Clone, Debug)]
pub struct Board {
    size: u32,
    cells: Vec<Option<TileId>>,
    tiles: BTreeMap<TileId, Tile>,
    next_tile_id: u32,
}

#[derive(Clone, Copy, Debug)]
struct Tile {
    value: TileValue,
    cell: CellCoord,
    phase: TilePhase,
}

impl Board {
    /// Creates an empty `size` x `size` board.
    ///
    /// Fails with [`GameError::InvalidBoardSize`] unless `size` lies in
    /// `1..=MAX_BOARD_SIZE`.
    pub fn new(size: u32) -> Result<Self, GameError> {
        if size == 0 || size > MAX_BOARD_SIZE {
            return Err(GameError::InvalidBoardSize(size));
        }
        let capacity = usize::try_from(u64::from(size) * u64::from(size))
            .map_err(|_| GameError::InvalidBoardSize(size))?;
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(capacity)
            .map_err(|_| GameError::InvalidBoardSize(size))?;
        cells.resize(capacity, None);
        Ok(Self {
            size,
            cells,
            tiles: BTreeMap::new(),
            next_tile_id: 0,
        })
    }

    /// Number of cells along each edge.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Returns the tile referenced by the lane-relative position, if any.
    pub fn get(&self, position: LanePosition) -> Result<Option<TileId>, GameError> {
        let index = self.index_or_err(position.to_cell())?;
        Ok(self.cells[index])
    }

    /// Stores `tile` in the lane-relative position and records the new cell on the tile.
    ///
    /// The tile's previous cell is left untouched; callers clear it explicitly.
    pub fn set(&mut self, position: LanePosition, tile: TileId) -> Result<(), GameError> {
        let cell = position.to_cell();
        let index = self.index_or_err(cell)?;
        let entry = self
            .tiles
            .get_mut(&tile)
            .ok_or(GameError::UnknownTile(tile))?;
        entry.cell = cell;
        self.cells[index] = Some(tile);
        Ok(())
    }

    /// Evicts whatever tile the lane-relative position references.
    pub fn clear(&mut self, position: LanePosition) -> Result<(), GameError> {
        let index = self.index_or_err(position.to_cell())?;
        self.cells[index] = None;
        Ok(())
    }

    /// Tile occupying the provided cell, if any.
    #[must_use]
    pub fn occupant(&self, cell: CellCoord) -> Option<TileId> {
        self.index(cell).and_then(|index| self.cells[index])
    }

    /// Value of the tile occupying the provided cell, if any.
    #[must_use]
    pub fn value_at(&self, cell: CellCoord) -> Option<TileValue> {
        self.occupant(cell)
            .and_then(|tile| self.tiles.get(&tile))
            .map(|tile| tile.value)
    }

    /// Captures the state of a single tile.
    #[must_use]
    pub fn tile(&self, id: TileId) -> Option<TileSnapshot> {
        self.tiles.get(&id).map(|tile| tile.snapshot(id))
    }

    /// Lists every empty cell, scanning columns outermost and rows innermost.
    #[must_use]
    pub fn empty_cells(&self) -> Vec<CellCoord> {
        let mut empty = Vec::new();
        for x in 0..self.size {
            for y in 0..self.size {
                let cell = CellCoord::new(x, y);
                if self.occupant(cell).is_none() {
                    empty.push(cell);
                }
            }
        }
        empty
    }

    /// Places a freshly allocated tile into an empty cell.
    pub fn insert_tile(&mut self, cell: CellCoord, value: TileValue) -> Result<TileId, GameError> {
        let index = self.index_or_err(cell)?;
        if self.cells[index].is_some() {
            return Err(GameError::CellOccupied(cell));
        }

        let id = TileId::new(self.next_tile_id);
        self.next_tile_id = self.next_tile_id.wrapping_add(1);
        let _ = self.tiles.insert(
            id,
            Tile {
                value,
                cell,
                phase: TilePhase::Live,
            },
        );
        self.cells[index] = Some(id);
        Ok(id)
    }

    /// Deletes a tile from the arena, vacating its cell if it still holds it.
    ///
    /// Removing an unknown tile is a no-op.
    pub fn remove_tile(&mut self, id: TileId) -> Option<TileSnapshot> {
        let tile = self.tiles.remove(&id)?;
        if let Some(index) = self.index(tile.cell) {
            if self.cells[index] == Some(id) {
                self.cells[index] = None;
            }
        }
        Some(tile.snapshot(id))
    }

    /// Number of tiles that occupy a cell.
    #[must_use]
    pub fn live_tile_count(&self) -> usize {
        self.tiles
            .values()
            .filter(|tile| tile.phase == TilePhase::Live)
            .count()
    }

    /// Number of cells that reference a tile.
    #[must_use]
    pub fn occupied_cell_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Reports whether the arena holds no tiles at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Captures every tile known to the board.
    #[must_use]
    pub fn tile_view(&self) -> TileView {
        TileView::from_snapshots(
            self.tiles
                .iter()
                .map(|(id, tile)| tile.snapshot(*id))
                .collect(),
        )
    }

    /// Returns the board's values as rows of optional values, indexed `[y][x]`.
    #[must_use]
    pub fn value_rows(&self) -> Vec<Vec<Option<TileValue>>> {
        (0..self.size)
            .map(|y| {
                (0..self.size)
                    .map(|x| self.value_at(CellCoord::new(x, y)))
                    .collect()
            })
            .collect()
    }

    pub(crate) fn mark_pending_removal(&mut self, id: TileId) -> Result<(), GameError> {
        let tile = self.tiles.get_mut(&id).ok_or(GameError::UnknownTile(id))?;
        tile.phase = TilePhase::PendingRemoval;
        Ok(())
    }

    pub(crate) fn set_value(&mut self, id: TileId, value: TileValue) -> Result<(), GameError> {
        let tile = self.tiles.get_mut(&id).ok_or(GameError::UnknownTile(id))?;
        tile.value = value;
        Ok(())
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.x() < self.size && cell.y() < self.size {
            let x = usize::try_from(cell.x()).ok()?;
            let y = usize::try_from(cell.y()).ok()?;
            let size = usize::try_from(self.size).ok()?;
            Some(x * size + y)
        } else {
            None
        }
    }

    fn index_or_err(&self, cell: CellCoord) -> Result<usize, GameError> {
        self.index(cell).ok_or(GameError::OutOfBounds {
            cell,
            size: self.size,
        })
    }
}

impl Tile {
    fn snapshot(&self, id: TileId) -> TileSnapshot {
        TileSnapshot {
            id,
            value: self.value,
            cell: self.cell,
            phase: self.phase,
        }
    }
}
