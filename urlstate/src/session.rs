//! Wallet session.

use history::{EntrySchema, HistoryEntry};
use tracing::debug;

use crate::config::{InsertPosition, WalletConfig};
use crate::error::{LimitKind, StateError, StateResult};
use crate::location::Location;
use crate::manager::UrlStateManager;

/// Result of [`Wallet::append`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    /// The entry was stored at `index`.
    Added { index: usize },
    /// An entry with the same payload already exists at `index`.
    Duplicate { index: usize },
    /// The payload is empty or whitespace only.
    Empty,
}

/// One wallet bound to one page location.
///
/// The in-memory list is authoritative. Each mutation rewrites the whole
/// query string from it, and a mutation whose save fails is undone so the
/// list and the URL never disagree.
///
/// Lifecycle: [`new`](Self::new) or [`open`](Self::open), any number of
/// mutations, then drop or [`into_location`](Self::into_location).
#[derive(Debug)]
pub struct Wallet<L: Location> {
    manager: UrlStateManager,
    location: L,
    entries: Vec<HistoryEntry>,
    schema: EntrySchema,
    insert: InsertPosition,
}

impl<L: Location> Wallet<L> {
    /// Creates an empty wallet over `location` without reading it.
    ///
    /// # Errors
    ///
    /// Returns any error from [`WalletConfig::validate`].
    pub fn new(config: &WalletConfig, location: L) -> StateResult<Self> {
        Ok(Self {
            manager: UrlStateManager::new(config)?,
            location,
            entries: Vec::new(),
            schema: config.schema,
            insert: config.insert,
        })
    }

    /// Creates a wallet and hydrates it from `location`.
    ///
    /// # Errors
    ///
    /// Returns any error from [`WalletConfig::validate`]. An unreadable query
    /// string is not an error; it opens an empty wallet.
    pub fn open(config: &WalletConfig, location: L) -> StateResult<Self> {
        let mut wallet = Self::new(config, location)?;
        wallet.hydrate();
        Ok(wallet)
    }

    /// Replaces the in-memory list with what the location holds. Returns the entry count.
    pub fn hydrate(&mut self) -> usize {
        self.entries = self.manager.load(&self.location);
        self.entries.len()
    }

    #[must_use]
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    #[must_use]
    pub fn position(&self, data: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.data == data)
    }

    #[must_use]
    pub const fn manager(&self) -> &UrlStateManager {
        &self.manager
    }

    #[must_use]
    pub const fn location(&self) -> &L {
        &self.location
    }

    /// Ends the session, handing back the location.
    pub fn into_location(self) -> L {
        self.location
    }

    /// Adds a scanned or typed payload.
    ///
    /// Under [`EntrySchema::Timestamped`] the entry is stamped with the
    /// current local time.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::LimitsExceeded`] when the wallet is full, or the
    /// save error. In both cases the wallet is unchanged.
    pub fn append(&mut self, data: impl Into<String>) -> StateResult<AppendOutcome> {
        let data = data.into();
        if data.trim().is_empty() {
            return Ok(AppendOutcome::Empty);
        }
        if let Some(index) = self.position(&data) {
            return Ok(AppendOutcome::Duplicate { index });
        }
        let max = self.manager.codec().limits().max_entries;
        if self.entries.len() >= max {
            return Err(StateError::LimitsExceeded {
                kind: LimitKind::Entries,
                limit: max,
                actual: self.entries.len() + 1,
            });
        }

        let entry = if self.schema.is_timestamped() {
            HistoryEntry::stamped_now(data)
        } else {
            HistoryEntry::plain(data)
        };
        let index = match self.insert {
            InsertPosition::Back => self.entries.len(),
            InsertPosition::Front => 0,
        };
        self.entries.insert(index, entry);
        if let Err(err) = self.persist() {
            self.entries.remove(index);
            return Err(err);
        }
        Ok(AppendOutcome::Added { index })
    }

    /// Removes the entry at `index`. Out of range is `Ok(None)` and writes nothing.
    ///
    /// # Errors
    ///
    /// Returns the save error; the entry is put back.
    pub fn remove(&mut self, index: usize) -> StateResult<Option<HistoryEntry>> {
        if index >= self.entries.len() {
            return Ok(None);
        }
        let entry = self.entries.remove(index);
        if let Err(err) = self.persist() {
            self.entries.insert(index, entry);
            return Err(err);
        }
        Ok(Some(entry))
    }

    /// Removes every entry and restores the bare path.
    ///
    /// # Errors
    ///
    /// Returns the save error; the entries are kept.
    pub fn clear(&mut self) -> StateResult<()> {
        let previous = std::mem::take(&mut self.entries);
        if let Err(err) = self.persist() {
            self.entries = previous;
            return Err(err);
        }
        Ok(())
    }

    /// Rewrites the location from the current list and returns its href.
    ///
    /// # Errors
    ///
    /// Returns the save error.
    pub fn share(&mut self) -> StateResult<String> {
        self.persist()?;
        Ok(self.location.href())
    }

    fn persist(&mut self) -> StateResult<()> {
        self.manager.save(&mut self.location, &self.entries)?;
        debug!(entries = self.entries.len(), "wallet persisted");
        Ok(())
    }
}
