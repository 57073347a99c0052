//! Application state management for the storefront
//!
//! This module contains the controller that owns the catalog, the current
//! filter and the cart snapshot. Key presses are mapped to `Command`s, and
//! every command runs to completion before the next key is read.

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent};
use tracing::{info, warn};

use crate::cart::{Cart, CartLineItem};
use crate::cli::StartupConfig;
use crate::data::{categories_of, Product};
use crate::filter::{CategoryFilter, ProductQuery, SortOrder};
use crate::loader::CatalogMessage;
use crate::store::{self, CartTransaction, LocalStore, StoreError};

/// Which pane receives list navigation and item keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Products,
    Cart,
}

impl Focus {
    fn other(self) -> Self {
        match self {
            Focus::Products => Focus::Cart,
            Focus::Cart => Focus::Products,
        }
    }
}

/// State of the most recent catalog fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogStatus {
    /// A fetch is in flight
    Loading,
    /// The catalog was loaded at this time
    Loaded(DateTime<Local>),
    /// The last fetch failed
    Failed(String),
}

/// Every user action the storefront understands
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Quit,
    ToggleHelp,
    SwitchFocus,
    MoveUp,
    MoveDown,
    SelectCategory(CategoryFilter),
    SetSort(SortOrder),
    /// Add one unit of this product snapshot
    AddToCart(Product),
    IncreaseQuantity(u64),
    DecreaseQuantity(u64),
    RemoveFromCart(u64),
    ClearCart,
    Reload,
}

/// Main application struct managing state and data
pub struct App {
    /// Catalog in the order the API returned it
    pub products: Vec<Product>,
    /// Distinct categories of the catalog, first-seen order
    pub categories: Vec<String>,
    /// Current category filter and sort direction
    pub query: ProductQuery,
    /// Pane receiving navigation keys
    pub focus: Focus,
    /// Index of the selected card among the visible products
    pub product_cursor: usize,
    /// Index of the selected cart row
    pub cart_cursor: usize,
    /// Cart as last read from the store, for rendering only
    pub cart: Cart,
    /// State of the catalog fetch
    pub catalog_status: CatalogStatus,
    /// One-line feedback shown in the status bar
    pub status_message: Option<String>,
    /// Flag to show help overlay
    pub show_help: bool,
    /// Whether the header shows the cart counter
    pub show_badge: bool,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Flag indicating a catalog reload has been requested
    pub reload_requested: bool,
    store: LocalStore,
}

impl App {
    /// Creates a new App reading its cart from `store`
    pub fn new(store: LocalStore) -> Self {
        let mut app = Self {
            products: Vec::new(),
            categories: Vec::new(),
            query: ProductQuery::default(),
            focus: Focus::Products,
            product_cursor: 0,
            cart_cursor: 0,
            cart: Cart::new(),
            catalog_status: CatalogStatus::Loading,
            status_message: None,
            show_help: false,
            show_badge: true,
            should_quit: false,
            reload_requested: false,
            store,
        };
        app.refresh_cart();
        app
    }

    /// Creates a new App with the filter and display options from the command line
    pub fn with_startup_config(config: &StartupConfig, store: LocalStore) -> Self {
        let mut app = Self::new(store);
        app.query = config.query.clone();
        app.show_badge = config.show_badge;
        app
    }

    /// The store backing the cart
    pub fn store(&self) -> &LocalStore {
        &self.store
    }

    /// Products passing the current filter, in display order
    pub fn visible_products(&self) -> Vec<&Product> {
        self.query.apply(&self.products)
    }

    /// The product under the grid cursor
    pub fn selected_product(&self) -> Option<&Product> {
        self.visible_products().get(self.product_cursor).copied()
    }

    /// The cart row under the cart cursor
    pub fn selected_line_item(&self) -> Option<&CartLineItem> {
        self.cart.items().get(self.cart_cursor)
    }

    /// Options of the category selector: "All" followed by each category
    pub fn category_options(&self) -> Vec<CategoryFilter> {
        std::iter::once(CategoryFilter::All)
            .chain(
                self.categories
                    .iter()
                    .map(|c| CategoryFilter::Category(c.clone())),
            )
            .collect()
    }

    /// Applies the outcome of a catalog fetch
    ///
    /// A loaded catalog replaces the product list and the category set; the
    /// selected category is kept when it still exists. A failure leaves the
    /// current catalog in place.
    pub fn apply_catalog_message(&mut self, message: CatalogMessage) {
        match message {
            CatalogMessage::Loaded(products) => {
                self.categories = categories_of(&products);
                self.products = products;

                if let CategoryFilter::Category(name) = &self.query.category {
                    if !self.categories.contains(name) {
                        info!(category = %name, "selected category not in catalog, showing all");
                        self.query.category = CategoryFilter::All;
                    }
                }

                self.product_cursor = 0;
                self.catalog_status = CatalogStatus::Loaded(Local::now());
                self.status_message = None;
            }
            CatalogMessage::Failed(reason) => {
                self.catalog_status = CatalogStatus::Failed(reason);
                self.status_message = Some("Could not load the catalog. Press r to retry".to_string());
            }
        }
    }

    /// Returns and clears the pending reload request
    pub fn take_reload_request(&mut self) -> bool {
        std::mem::take(&mut self.reload_requested)
    }

    /// Maps a key press to a command in the current focus
    ///
    /// # Key Bindings
    /// - `q` or `Esc`: Quit the application
    /// - `?`: Toggle help overlay
    /// - `Tab`: Switch between product grid and cart
    /// - `Up`/`k`, `Down`/`j`: Move selection in the focused pane
    /// - `Left`/`h`/`[`, `Right`/`l`/`]`: Previous/next category
    /// - `s`: Toggle price sort
    /// - `c`: Clear the cart
    /// - `r`: Reload the catalog
    /// - `a`/`Enter` (products): Add selected product to cart
    /// - `+`/`=`, `-`, `x`/`d`/`Delete` (cart): Increase, decrease, remove selected item
    pub fn command_for(&self, key_event: KeyEvent) -> Option<Command> {
        // Help overlay intercepts all keys when shown
        if self.show_help {
            return match key_event.code {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => Some(Command::ToggleHelp),
                _ => None,
            };
        }

        let global = match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
            KeyCode::Char('?') => Some(Command::ToggleHelp),
            KeyCode::Tab | KeyCode::BackTab => Some(Command::SwitchFocus),
            KeyCode::Up | KeyCode::Char('k') => Some(Command::MoveUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Command::MoveDown),
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('[') => {
                self.adjacent_category(false).map(Command::SelectCategory)
            }
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(']') => {
                self.adjacent_category(true).map(Command::SelectCategory)
            }
            KeyCode::Char('s') => Some(Command::SetSort(self.next_sort())),
            KeyCode::Char('c') => Some(Command::ClearCart),
            KeyCode::Char('r') => Some(Command::Reload),
            _ => None,
        };
        if global.is_some() {
            return global;
        }

        match self.focus {
            Focus::Products => match key_event.code {
                KeyCode::Char('a') | KeyCode::Enter => {
                    self.selected_product().cloned().map(Command::AddToCart)
                }
                _ => None,
            },
            Focus::Cart => {
                let id = self.selected_line_item()?.id;
                match key_event.code {
                    KeyCode::Char('+') | KeyCode::Char('=') => Some(Command::IncreaseQuantity(id)),
                    KeyCode::Char('-') => Some(Command::DecreaseQuantity(id)),
                    KeyCode::Char('x') | KeyCode::Char('d') | KeyCode::Delete => {
                        Some(Command::RemoveFromCart(id))
                    }
                    _ => None,
                }
            }
        }
    }

    /// Handles keyboard input and updates state accordingly
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        if let Some(command) = self.command_for(key_event) {
            self.dispatch(command);
        }
    }

    /// Executes one command
    pub fn dispatch(&mut self, command: Command) {
        match command {
            Command::Quit => self.should_quit = true,
            Command::ToggleHelp => self.show_help = !self.show_help,
            Command::SwitchFocus => self.focus = self.focus.other(),
            Command::MoveUp => self.move_selection_up(),
            Command::MoveDown => self.move_selection_down(),
            Command::SelectCategory(filter) => self.set_category(filter),
            Command::SetSort(order) => self.set_sort(order),
            Command::AddToCart(product) => {
                if self.mutate_cart("add", |cart| cart.add(&product)) {
                    self.status_message = Some(format!("Added {} to cart", product.title));
                }
            }
            Command::IncreaseQuantity(id) => {
                self.mutate_cart("increase", |cart| cart.increase(id));
            }
            Command::DecreaseQuantity(id) => {
                self.mutate_cart("decrease", |cart| cart.decrease(id));
            }
            Command::RemoveFromCart(id) => {
                self.mutate_cart("remove", |cart| cart.remove(id));
            }
            Command::ClearCart => self.clear_cart(),
            Command::Reload => {
                self.reload_requested = true;
                self.catalog_status = CatalogStatus::Loading;
            }
        }
    }

    /// Re-reads the cart snapshot from the store
    ///
    /// A corrupt stored cart renders as empty until it is cleared.
    pub fn refresh_cart(&mut self) {
        match store::load_cart(&self.store) {
            Ok(cart) => self.cart = cart,
            Err(err) => {
                warn!(error = %err, "failed to read stored cart");
                self.cart = Cart::new();
                self.report_store_error(&err);
            }
        }
        self.clamp_cart_cursor();
    }

    /// Runs one cart mutation through the store; returns whether it succeeded
    fn mutate_cart<F>(&mut self, action: &'static str, mutate: F) -> bool
    where
        F: FnOnce(&mut Cart) -> bool,
    {
        match CartTransaction::run(&self.store, mutate) {
            Ok(cart) => {
                self.cart = cart;
                self.status_message = None;
                self.clamp_cart_cursor();
                true
            }
            Err(err) => {
                warn!(action, error = %err, "cart update aborted");
                self.report_store_error(&err);
                false
            }
        }
    }

    fn clear_cart(&mut self) {
        match store::clear_cart(&self.store) {
            Ok(()) => {
                info!("cart cleared");
                self.status_message = None;
                self.refresh_cart();
            }
            Err(err) => {
                warn!(error = %err, "failed to clear cart");
                self.report_store_error(&err);
            }
        }
    }

    fn report_store_error(&mut self, err: &StoreError) {
        self.status_message = Some(match err {
            StoreError::Corrupt { .. } => "Stored cart is unreadable. Press c to clear it".to_string(),
            _ => format!("Cart storage unavailable: {}", err),
        });
    }

    fn clamp_cart_cursor(&mut self) {
        let count = self.cart.len();
        if self.cart_cursor >= count {
            self.cart_cursor = count.saturating_sub(1);
        }
    }

    fn set_category(&mut self, filter: CategoryFilter) {
        self.query.category = filter;
        self.product_cursor = 0;
    }

    fn set_sort(&mut self, order: SortOrder) {
        self.query.sort = Some(order);
        self.product_cursor = 0;
    }

    /// The category option one step forward or back from the current one, wrapping around
    fn adjacent_category(&self, forward: bool) -> Option<CategoryFilter> {
        let options = self.category_options();
        let count = options.len();
        let current = options
            .iter()
            .position(|option| *option == self.query.category)
            .unwrap_or(0);

        let next = if forward {
            (current + 1) % count
        } else if current == 0 {
            count - 1
        } else {
            current - 1
        };

        options.into_iter().nth(next)
    }

    /// Sort direction `s` switches to: ascending first, then alternating
    fn next_sort(&self) -> SortOrder {
        self.query
            .sort
            .map_or(SortOrder::Ascending, SortOrder::toggled)
    }

    fn focused_len(&self) -> usize {
        match self.focus {
            Focus::Products => self.visible_products().len(),
            Focus::Cart => self.cart.len(),
        }
    }

    fn focused_cursor(&mut self) -> &mut usize {
        match self.focus {
            Focus::Products => &mut self.product_cursor,
            Focus::Cart => &mut self.cart_cursor,
        }
    }

    /// Moves the selection up in the focused pane, wrapping to bottom if at top
    fn move_selection_up(&mut self) {
        let count = self.focused_len();
        if count == 0 {
            return;
        }
        let cursor = self.focused_cursor();
        if *cursor == 0 {
            *cursor = count - 1;
        } else {
            *cursor -= 1;
        }
    }

    /// Moves the selection down in the focused pane, wrapping to top if at bottom
    fn move_selection_down(&mut self) {
        let count = self.focused_len();
        if count == 0 {
            return;
        }
        let cursor = self.focused_cursor();
        *cursor = (*cursor + 1) % count;
    }
}
