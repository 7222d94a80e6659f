//! Load state of one list (projects, users, forms, submissions)
//!
//! Every load is stamped with a [`LoadToken`]. Only the response to the most
//! recently issued load is applied; anything older is dropped on arrival.

/// Where a list is in its load cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Populated,
    Error,
}

/// Stamp identifying one load request of one list
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadToken(u64);

/// Items of one list plus its load bookkeeping
#[derive(Debug, Clone)]
pub struct ListState<T> {
    pub items: Vec<T>,
    pub status: LoadStatus,
    pub selected: usize,
    issued: u64,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            status: LoadStatus::Idle,
            selected: 0,
            issued: 0,
        }
    }
}

impl<T> ListState<T> {
    /// Enter `Loading` and issue a fresh token. Any earlier token is now stale.
    pub fn begin_load(&mut self) -> LoadToken {
        self.issued += 1;
        self.status = LoadStatus::Loading;
        LoadToken(self.issued)
    }

    /// Empty the list for a new scope. The request counter keeps running, so
    /// loads issued for the previous scope stay stale.
    pub fn reset(&mut self) {
        self.items.clear();
        self.selected = 0;
        self.status = LoadStatus::Idle;
    }

    pub fn is_current(&self, token: LoadToken) -> bool {
        token.0 == self.issued
    }

    /// Apply a load result. Returns `false` and changes nothing when the token
    /// has been superseded. On error the previous items stay in place.
    pub fn finish<E>(&mut self, token: LoadToken, result: Result<Vec<T>, E>) -> bool {
        if !self.is_current(token) {
            return false;
        }
        match result {
            Ok(items) => {
                self.items = items;
                self.status = LoadStatus::Populated;
                self.clamp_selection();
            }
            Err(_) => self.status = LoadStatus::Error,
        }
        true
    }

    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }

    pub fn selected_item(&self) -> Option<&T> {
        self.items.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.items.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Move by `delta` items; grid views pass plus or minus one row of cards
    pub fn select_by(&mut self, delta: isize) {
        if self.items.is_empty() {
            return;
        }
        let target = self.selected as isize + delta;
        if target >= 0 && (target as usize) < self.items.len() {
            self.selected = target as usize;
        }
    }

    fn clamp_selection(&mut self) {
        if self.selected >= self.items.len() {
            self.selected = self.items.len().saturating_sub(1);
        }
    }
}
