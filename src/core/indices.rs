use hashbrown::HashMap;

use crate::{product::Product, types::ProductId};

/// Position of each product id within an ordered product list.
pub type PosIndex = HashMap<ProductId, usize>;

/// Rebuilds `pos` so every id in `items` maps to its current slot.
pub fn rebuild_positions(pos: &mut PosIndex, items: &[Product]) {
    pos.clear();
    for (idx, product) in items.iter().enumerate() {
        pos.insert(product.id, idx);
    }
}
