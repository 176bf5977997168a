use tokio::sync::{broadcast, mpsc, oneshot};

use crate::{
    core::{
        catalogue::CatalogueStore,
        wishlist::{Toggled, WishlistStore},
    },
    persist::SlotStore,
    product::Product,
    remote::{ContentApiClient, FetchError},
    types::{CatalogueStatus, ProductId, SortOrder},
    view::{ViewState, WishlistView},
};

use super::events::StorefrontEvent;

#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("catalogue already settled as {0:?}")]
    AlreadySettled(CatalogueStatus),
    #[error("unknown product {0}")]
    UnknownProduct(ProductId),
    #[error("storefront runtime is gone")]
    ChannelClosed,
}

/// Cloneable handle to the storefront loop; pass it to every view that needs the stores.
#[derive(Clone)]
pub struct StorefrontHandle {
    cmd_tx: mpsc::Sender<Command>,
    events_tx: broadcast::Sender<StorefrontEvent>,
}

enum Command {
    Load {
        products: Vec<Product>,
        resp: oneshot::Sender<Result<usize, RuntimeError>>,
    },
    MarkUnavailable {
        resp: oneshot::Sender<Result<(), RuntimeError>>,
    },
    Status {
        resp: oneshot::Sender<CatalogueStatus>,
    },
    SetSearch {
        term: String,
        resp: oneshot::Sender<usize>,
    },
    SetBrand {
        brand: String,
        resp: oneshot::Sender<usize>,
    },
    SetSort {
        order: SortOrder,
        resp: oneshot::Sender<usize>,
    },
    View {
        resp: oneshot::Sender<ViewState>,
    },
    Brands {
        resp: oneshot::Sender<Vec<String>>,
    },
    Toggle {
        product: Product,
        resp: oneshot::Sender<Toggled>,
    },
    ToggleById {
        id: ProductId,
        resp: oneshot::Sender<Result<Toggled, RuntimeError>>,
    },
    Contains {
        id: ProductId,
        resp: oneshot::Sender<bool>,
    },
    Wishlist {
        resp: oneshot::Sender<WishlistView>,
    },
    Shutdown {
        resp: oneshot::Sender<()>,
    },
}

struct Storefront<S: SlotStore> {
    status: CatalogueStatus,
    catalogue: CatalogueStore,
    wishlist: WishlistStore<S>,
}

/// Spawns the loop that owns both stores.
///
/// Commands run one at a time to completion, so no two toggles or intent changes
/// interleave. The catalogue starts in [`CatalogueStatus::Loading`].
pub fn spawn_storefront<S>(catalogue: CatalogueStore, wishlist: WishlistStore<S>) -> StorefrontHandle
where
    S: SlotStore + 'static,
{
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<Command>(256);
    let (events_tx, _) = broadcast::channel::<StorefrontEvent>(1024);
    let events_tx_loop = events_tx.clone();

    tokio::spawn(async move {
        let mut state = Storefront {
            status: CatalogueStatus::Loading,
            catalogue,
            wishlist,
        };

        while let Some(cmd) = cmd_rx.recv().await {
            if handle_command(cmd, &mut state, &events_tx_loop) {
                break;
            }
        }
        tracing::debug!("storefront loop stopped");
    });

    StorefrontHandle { cmd_tx, events_tx }
}

impl StorefrontHandle {
    pub fn subscribe(&self) -> broadcast::Receiver<StorefrontEvent> {
        self.events_tx.subscribe()
    }

    /// Performs the one initial catalogue fetch and settles the status.
    pub async fn load_from(&self, client: &ContentApiClient) -> Result<usize, RuntimeError> {
        let status = self.status().await?;
        if status != CatalogueStatus::Loading {
            return Err(RuntimeError::AlreadySettled(status));
        }

        match client.fetch_catalogue().await {
            Ok(products) => self.load(products).await,
            Err(err) => {
                tracing::warn!(error = %err, "initial catalogue fetch failed");
                self.mark_unavailable().await?;
                Err(RuntimeError::Fetch(err))
            }
        }
    }

    pub async fn load(&self, products: Vec<Product>) -> Result<usize, RuntimeError> {
        self.request(|resp| Command::Load { products, resp }).await?
    }

    pub async fn mark_unavailable(&self) -> Result<(), RuntimeError> {
        self.request(|resp| Command::MarkUnavailable { resp }).await?
    }

    pub async fn status(&self) -> Result<CatalogueStatus, RuntimeError> {
        self.request(|resp| Command::Status { resp }).await
    }

    /// Returns the visible product count after the change.
    pub async fn set_search_term(&self, term: impl Into<String>) -> Result<usize, RuntimeError> {
        let term = term.into();
        self.request(|resp| Command::SetSearch { term, resp }).await
    }

    pub async fn set_brand_filter(&self, brand: impl Into<String>) -> Result<usize, RuntimeError> {
        let brand = brand.into();
        self.request(|resp| Command::SetBrand { brand, resp }).await
    }

    pub async fn set_sort_order(&self, order: SortOrder) -> Result<usize, RuntimeError> {
        self.request(|resp| Command::SetSort { order, resp }).await
    }

    pub async fn view(&self) -> Result<ViewState, RuntimeError> {
        self.request(|resp| Command::View { resp }).await
    }

    pub async fn brands(&self) -> Result<Vec<String>, RuntimeError> {
        self.request(|resp| Command::Brands { resp }).await
    }

    pub async fn toggle(&self, product: Product) -> Result<Toggled, RuntimeError> {
        self.request(|resp| Command::Toggle { product, resp }).await
    }

    /// Toggles a product found in the wishlist or, failing that, the catalogue.
    pub async fn toggle_id(&self, id: ProductId) -> Result<Toggled, RuntimeError> {
        self.request(|resp| Command::ToggleById { id, resp }).await?
    }

    pub async fn contains(&self, id: ProductId) -> Result<bool, RuntimeError> {
        self.request(|resp| Command::Contains { id, resp }).await
    }

    pub async fn wishlist(&self) -> Result<WishlistView, RuntimeError> {
        self.request(|resp| Command::Wishlist { resp }).await
    }

    pub async fn shutdown(&self) -> Result<(), RuntimeError> {
        self.request(|resp| Command::Shutdown { resp }).await
    }

    async fn request<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> Result<T, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(make(tx))
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }
}

fn handle_command<S: SlotStore>(
    cmd: Command,
    state: &mut Storefront<S>,
    events_tx: &broadcast::Sender<StorefrontEvent>,
) -> bool {
    match cmd {
        Command::Load { products, resp } => {
            let res = if state.status == CatalogueStatus::Loading {
                state.catalogue.load(products);
                state.status = CatalogueStatus::Ready;
                let count = state.catalogue.len();
                let _ = events_tx.send(StorefrontEvent::CatalogueLoaded { count });
                let _ = events_tx.send(StorefrontEvent::ViewChanged {
                    len: state.catalogue.view_len(),
                });
                Ok(count)
            } else {
                Err(RuntimeError::AlreadySettled(state.status))
            };
            let _ = resp.send(res);
        }
        Command::MarkUnavailable { resp } => {
            let res = if state.status == CatalogueStatus::Loading {
                state.status = CatalogueStatus::Unavailable;
                let _ = events_tx.send(StorefrontEvent::CatalogueUnavailable);
                Ok(())
            } else {
                Err(RuntimeError::AlreadySettled(state.status))
            };
            let _ = resp.send(res);
        }
        Command::Status { resp } => {
            let _ = resp.send(state.status);
        }
        Command::SetSearch { term, resp } => {
            state.catalogue.set_search_term(term);
            let _ = resp.send(view_changed(state, events_tx));
        }
        Command::SetBrand { brand, resp } => {
            state.catalogue.set_brand_filter(brand);
            let _ = resp.send(view_changed(state, events_tx));
        }
        Command::SetSort { order, resp } => {
            state.catalogue.set_sort_order(order);
            let _ = resp.send(view_changed(state, events_tx));
        }
        Command::View { resp } => {
            let _ = resp.send(ViewState::from_parts(
                state.status,
                state.catalogue.view_cloned(),
            ));
        }
        Command::Brands { resp } => {
            let brands = state
                .catalogue
                .brands()
                .into_iter()
                .map(str::to_string)
                .collect();
            let _ = resp.send(brands);
        }
        Command::Toggle { product, resp } => {
            let _ = resp.send(apply_toggle(state, &product, events_tx));
        }
        Command::ToggleById { id, resp } => {
            let product = state
                .wishlist
                .get(id)
                .or_else(|| state.catalogue.get(id))
                .cloned();
            let res = match product {
                Some(product) => Ok(apply_toggle(state, &product, events_tx)),
                None => Err(RuntimeError::UnknownProduct(id)),
            };
            let _ = resp.send(res);
        }
        Command::Contains { id, resp } => {
            let _ = resp.send(state.wishlist.contains(id));
        }
        Command::Wishlist { resp } => {
            let _ = resp.send(WishlistView::from_items(state.wishlist.items().to_vec()));
        }
        Command::Shutdown { resp } => {
            let _ = resp.send(());
            return true;
        }
    }

    false
}

fn view_changed<S: SlotStore>(
    state: &Storefront<S>,
    events_tx: &broadcast::Sender<StorefrontEvent>,
) -> usize {
    let len = state.catalogue.view_len();
    let _ = events_tx.send(StorefrontEvent::ViewChanged { len });
    len
}

fn apply_toggle<S: SlotStore>(
    state: &mut Storefront<S>,
    product: &Product,
    events_tx: &broadcast::Sender<StorefrontEvent>,
) -> Toggled {
    let (change, persisted) = state.wishlist.toggle(product);
    let _ = events_tx.send(StorefrontEvent::WishlistToggled {
        id: product.id,
        added: change == Toggled::Added,
    });
    if persisted.is_err() {
        let _ = events_tx.send(StorefrontEvent::WishlistPersistFailed { id: product.id });
    }
    change
}
