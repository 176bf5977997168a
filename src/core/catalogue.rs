use hashbrown::HashSet;

use crate::{
    core::indices::{PosIndex, rebuild_positions},
    product::Product,
    types::{ProductId, SortOrder},
};

/// User-controlled search, brand, and sort parameters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Intent {
    /// Case-insensitive substring over name, brand, and description. Empty disables.
    pub search_term: String,
    /// Exact brand match. Empty disables.
    pub brand_filter: String,
    /// Price ordering.
    pub sort_order: SortOrder,
}

impl Intent {
    /// Returns true when no filter or sort is active.
    pub fn is_identity(&self) -> bool {
        self == &Self::default()
    }
}

/// Source collection plus intent, with the derived view kept current.
#[derive(Debug, Default)]
pub struct CatalogueStore {
    source: Vec<Product>,
    pos: PosIndex,
    intent: Intent,
    view: Vec<usize>,
}

impl CatalogueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(products: Vec<Product>) -> Self {
        let mut store = Self::new();
        store.load(products);
        store
    }

    /// Replaces the source collection and recomputes the view.
    ///
    /// Later products repeating an earlier id are dropped.
    pub fn load(&mut self, products: Vec<Product>) {
        let mut seen: HashSet<ProductId> = HashSet::with_capacity(products.len());
        let mut source = Vec::with_capacity(products.len());
        for product in products {
            if seen.insert(product.id) {
                source.push(product);
            } else {
                tracing::warn!(id = product.id, "dropping duplicate product id from catalogue");
            }
        }

        self.source = source;
        rebuild_positions(&mut self.pos, &self.source);
        tracing::info!(count = self.source.len(), "catalogue loaded");
        self.recompute();
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.intent.search_term = term.into();
        self.recompute();
    }

    pub fn set_brand_filter(&mut self, brand: impl Into<String>) {
        self.intent.brand_filter = brand.into();
        self.recompute();
    }

    pub fn set_sort_order(&mut self, order: SortOrder) {
        self.intent.sort_order = order;
        self.recompute();
    }

    /// Replaces all three intent fields at once.
    pub fn set_intent(&mut self, intent: Intent) {
        self.intent = intent;
        self.recompute();
    }

    pub fn intent(&self) -> &Intent {
        &self.intent
    }

    pub fn source(&self) -> &[Product] {
        &self.source
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.pos.get(&id).and_then(|idx| self.source.get(*idx))
    }

    pub fn len(&self) -> usize {
        self.source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    /// Current derived view, borrowed from the source collection.
    pub fn view(&self) -> Vec<&Product> {
        self.view
            .iter()
            .filter_map(|idx| self.source.get(*idx))
            .collect()
    }

    pub fn view_cloned(&self) -> Vec<Product> {
        self.view().into_iter().cloned().collect()
    }

    pub fn view_len(&self) -> usize {
        self.view.len()
    }

    /// Recomputes the view from scratch without touching the cached copy.
    pub fn derive_view(&self) -> Vec<Product> {
        derive_view(&self.source, &self.intent)
    }

    /// Distinct brands in first-appearance order.
    pub fn brands(&self) -> Vec<&str> {
        let mut seen: HashSet<&str> = HashSet::new();
        self.source
            .iter()
            .map(|p| p.brand.as_str())
            .filter(|brand| seen.insert(*brand))
            .collect()
    }

    fn recompute(&mut self) {
        self.view = derive_positions(&self.source, &self.intent);
        tracing::debug!(
            visible = self.view.len(),
            total = self.source.len(),
            search = %self.intent.search_term,
            brand = %self.intent.brand_filter,
            sort = %self.intent.sort_order,
            "catalogue view recomputed"
        );
    }
}

/// Applies search, then brand, then a stable price sort to `source`.
pub fn derive_view(source: &[Product], intent: &Intent) -> Vec<Product> {
    derive_positions(source, intent)
        .into_iter()
        .filter_map(|idx| source.get(idx).cloned())
        .collect()
}

fn derive_positions(source: &[Product], intent: &Intent) -> Vec<usize> {
    let term = intent.search_term.to_lowercase();

    let mut positions: Vec<usize> = source
        .iter()
        .enumerate()
        .filter(|(_, p)| term.is_empty() || p.matches_term(&term))
        .filter(|(_, p)| intent.brand_filter.is_empty() || p.brand == intent.brand_filter)
        .map(|(idx, _)| idx)
        .collect();

    let price = |idx: &usize| source.get(*idx).map_or(0, |p| p.price_minor);
    // sort_by is stable: equal prices keep source order in both directions.
    match intent.sort_order {
        SortOrder::None => {}
        SortOrder::Ascending => positions.sort_by_key(price),
        SortOrder::Descending => positions.sort_by(|a, b| price(b).cmp(&price(a))),
    }
    positions
}
