//! Plain key/value form of a [`Layer`] for persistence layers.
//!
//! Mostly-default layers are written sparsely; anything denser keeps the full
//! padded grid. Item references are written as `(x, y, id)` triples so the
//! owning world can reconnect them to its item table.

use serde::{Deserialize, Serialize};

use super::{ItemId, Layer, Position};
use crate::constants::CellValue;
use crate::state::StateError;

/// Share of non-default cells above which the dense encoding is used.
const DENSE_THRESHOLD: f64 = 0.1;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LayerData {
    pub width: i32,
    pub height: i32,
    pub default_value: CellValue,
    pub cells: CellsData,
    pub items: Vec<(i32, i32, ItemId)>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellsData {
    /// Full padded grid, row by row.
    Dense(Vec<CellValue>),
    /// Interior cells that differ from the default.
    Sparse(Vec<(i32, i32, CellValue)>),
}

impl From<Layer> for LayerData {
    fn from(layer: Layer) -> Self {
        let mut sparse = Vec::new();
        for y in 0..layer.height {
            for x in 0..layer.width {
                let value = layer.get(Position::new(x, y));
                if value != layer.default_value {
                    sparse.push((x, y, value));
                }
            }
        }
        let cells = if sparse.len() as f64 >= DENSE_THRESHOLD * layer.cells.len() as f64 {
            CellsData::Dense(layer.cells.clone())
        } else {
            CellsData::Sparse(sparse)
        };
        let items = layer
            .items
            .iter()
            .map(|(cell, id)| (cell.x, cell.y, *id))
            .collect();

        Self {
            width: layer.width,
            height: layer.height,
            default_value: layer.default_value,
            cells,
            items,
        }
    }
}

impl TryFrom<LayerData> for Layer {
    type Error = StateError;

    fn try_from(data: LayerData) -> Result<Self, Self::Error> {
        if data.width <= 0 || data.height <= 0 {
            return Err(StateError::InvalidLayerSize {
                width: data.width,
                height: data.height,
            });
        }
        let mut layer = Layer::new(data.width, data.height, data.default_value);
        match data.cells {
            CellsData::Dense(cells) => {
                if cells.len() != layer.cells.len() {
                    return Err(StateError::CellCountMismatch {
                        expected: layer.cells.len(),
                        found: cells.len(),
                    });
                }
                layer.cells = cells;
            }
            CellsData::Sparse(entries) => {
                for (x, y, value) in entries {
                    let cell = Position::new(x, y);
                    if !layer.contains(cell) {
                        return Err(StateError::CellOutOfBounds(cell));
                    }
                    layer.set(cell, value);
                }
            }
        }

        for (x, y, id) in data.items {
            let cell = Position::new(x, y);
            if !layer.contains(cell) {
                return Err(StateError::CellOutOfBounds(cell));
            }
            layer.set_item(cell, Some(id));
        }
        Ok(layer)
    }
}
