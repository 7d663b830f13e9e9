use crate::{
    config::KanbanConfig,
    domain::{
        reconcile, Board, Card, CardId, CardPatch, ColumnId, IdGenerator, RandomIds,
        ReportedOrder,
    },
    error::Result,
    interaction::{Confirm, DestructiveAction},
    snapshot,
    storage::Storage,
};
use tracing::{debug, info, warn};

/// Owner of the canonical board.
///
/// Every mutation works on a copy of the current board and swaps the copy in
/// through [`BoardStore::set_board`], which persists before committing. A
/// mutation aimed at an identifier that is not on the board is a no-op that
/// returns `Ok(false)` and writes nothing.
pub struct BoardStore<S> {
    storage: S,
    config: KanbanConfig,
    ids: Box<dyn IdGenerator>,
    board: Board,
}

impl<S: Storage> BoardStore<S> {
    /// Loads the stored board, or a seeded one if there is none
    pub async fn open(storage: S, config: KanbanConfig) -> Self {
        Self::open_with_ids(storage, config, Box::new(RandomIds)).await
    }

    pub async fn open_with_ids(
        storage: S,
        config: KanbanConfig,
        mut ids: Box<dyn IdGenerator>,
    ) -> Self {
        let board = Self::load(&storage, &config.storage_key, ids.as_mut()).await;
        Self {
            storage,
            config,
            ids,
            board,
        }
    }

    async fn load(storage: &S, key: &str, ids: &mut dyn IdGenerator) -> Board {
        let stored = match storage.get(key).await {
            Ok(stored) => stored,
            Err(e) => {
                warn!(key, error = %e, "board snapshot unreadable; using default board");
                None
            }
        };

        let Some(text) = stored else {
            info!(key, "no stored board; using default board");
            return Board::seeded(ids);
        };

        match snapshot::decode(text.as_bytes()) {
            Ok(mut board) => {
                board.normalize(ids);
                info!(
                    key,
                    columns = board.columns.len(),
                    cards = board.card_count(),
                    "board loaded"
                );
                board
            }
            Err(e) => {
                warn!(key, error = %e, "stored board is corrupt; using default board");
                Board::seeded(ids)
            }
        }
    }

    /// The canonical board
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn config(&self) -> &KanbanConfig {
        &self.config
    }

    /// Replaces the canonical board, persisting it first
    pub async fn set_board(&mut self, board: Board) -> Result<()> {
        let json = serde_json::to_string(&board)?;
        self.storage.set(&self.config.storage_key, &json).await?;

        debug!(
            columns = board.columns.len(),
            cards = board.card_count(),
            "board committed"
        );
        self.board = board;
        Ok(())
    }

    fn derive(&self, mutate: impl FnOnce(&mut Board) -> bool) -> Option<Board> {
        let mut next = self.board.clone();
        mutate(&mut next).then_some(next)
    }

    async fn commit(&mut self, next: Option<Board>) -> Result<bool> {
        match next {
            Some(board) => {
                self.set_board(board).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn fresh_column_id(&mut self) -> ColumnId {
        loop {
            let id = self.ids.next_column_id();
            if self.board.find_column(&id).is_none() {
                return id;
            }
            debug!(%id, "generated column id already on board; drawing again");
        }
    }

    fn fresh_card_id(&mut self) -> CardId {
        loop {
            let id = self.ids.next_card_id();
            if self.board.find_card(&id).is_none() {
                return id;
            }
            debug!(%id, "generated card id already on board; drawing again");
        }
    }

    /// Appends a column; a blank title becomes "New Column"
    pub async fn add_column(&mut self, title: &str) -> Result<ColumnId> {
        let id = self.fresh_column_id();
        let next = self.derive(|board| {
            board.add_column(id.clone(), title);
            true
        });
        self.commit(next).await?;
        Ok(id)
    }

    pub async fn remove_column(&mut self, column_id: &ColumnId) -> Result<bool> {
        let next = self.derive(|board| board.remove_column(column_id));
        self.commit(next).await
    }

    /// Renames the column unless `title` is blank after trimming
    pub async fn rename_column(&mut self, column_id: &ColumnId, title: &str) -> Result<bool> {
        let next = self.derive(|board| board.rename_column(column_id, title));
        self.commit(next).await
    }

    /// Puts `card` at the front of the column
    pub async fn add_card(&mut self, column_id: &ColumnId, card: Card) -> Result<bool> {
        let next = self.derive(|board| board.add_card(column_id, card));
        self.commit(next).await
    }

    /// Creates a card from user input. Returns `None` if the title is blank
    /// or the column is gone.
    pub async fn create_card(
        &mut self,
        column_id: &ColumnId,
        title: &str,
    ) -> Result<Option<CardId>> {
        if title.trim().is_empty() || self.board.find_column(column_id).is_none() {
            return Ok(None);
        }

        let card = Card::new(self.fresh_card_id(), title);
        let id = card.id.clone();
        self.add_card(column_id, card).await?;
        Ok(Some(id))
    }

    pub async fn remove_card_by_id(&mut self, card_id: &CardId) -> Result<bool> {
        let next = self.derive(|board| board.remove_card(card_id));
        self.commit(next).await
    }

    /// Merges `patch` into the first card carrying `card_id`
    pub async fn update_card(&mut self, card_id: &CardId, patch: &CardPatch) -> Result<bool> {
        let next = self.derive(|board| board.update_card(card_id, patch));
        self.commit(next).await
    }

    pub fn find_card(&self, card_id: &CardId) -> Option<&Card> {
        self.board.find_card(card_id)
    }

    /// Rebuilds the board from a displayed order and commits it
    pub async fn apply_order(&mut self, order: &ReportedOrder) -> Result<()> {
        let next = reconcile(&self.board, order);
        self.set_board(next).await
    }

    /// Moves a card the same way a drag would
    pub async fn move_card(
        &mut self,
        card_id: &CardId,
        to: &ColumnId,
        index: usize,
    ) -> Result<bool> {
        let mut order = ReportedOrder::from_board(&self.board);
        if !order.move_card(card_id, to, index) {
            return Ok(false);
        }
        self.apply_order(&order).await?;
        Ok(true)
    }

    pub async fn move_column(&mut self, column_id: &ColumnId, index: usize) -> Result<bool> {
        let mut order = ReportedOrder::from_board(&self.board);
        if !order.move_column(column_id, index) {
            return Ok(false);
        }
        self.apply_order(&order).await?;
        Ok(true)
    }

    /// Replaces the board with a freshly seeded one
    pub async fn reset(&mut self) -> Result<()> {
        let board = Board::seeded(self.ids.as_mut());
        self.set_board(board).await?;
        info!("board reset to default");
        Ok(())
    }

    /// Runs a destructive action if `confirm` approves it
    pub async fn perform(
        &mut self,
        action: DestructiveAction,
        confirm: &impl Confirm,
    ) -> Result<bool> {
        if !confirm.confirm(&action) {
            debug!(%action, "declined");
            return Ok(false);
        }

        match &action {
            DestructiveAction::DeleteColumn(id) => self.remove_column(id).await,
            DestructiveAction::DeleteCard(id) => self.remove_card_by_id(id).await,
            DestructiveAction::ResetBoard => self.reset().await.map(|_| true),
        }
    }

    /// Pretty-printed snapshot of the canonical board
    pub fn export(&self) -> Result<Vec<u8>> {
        snapshot::export(&self.board)
    }

    pub fn export_file_name(&self) -> &str {
        &self.config.export_file_name
    }

    /// Replaces the board with an imported snapshot; on error nothing changes
    pub async fn import(&mut self, bytes: &[u8]) -> Result<()> {
        let mut board = snapshot::decode(bytes)?;
        let reissued = board.normalize(self.ids.as_mut());
        self.set_board(board).await?;

        info!(
            columns = self.board.columns.len(),
            cards = self.board.card_count(),
            reissued,
            "board imported"
        );
        Ok(())
    }
}
