//! Tabs and the set of open tabs

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::history::{History, HistoryKind};
use super::NavigationError;
use crate::config::TabDefaults;
use crate::core::{IdGenerator, TabId};

/// A browsing context with its own history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tab {
    pub uuid: TabId,
    pub history: History,
}

impl Tab {
    pub fn new(uuid: TabId, kind: HistoryKind, title: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            uuid,
            history: History::new(kind, title, location),
        }
    }
}

/// Open tabs in opening order, plus the one being viewed
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tabs {
    tabs: IndexMap<TabId, Tab>,
    current_viewing: Option<TabId>,
}

impl Tabs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the default first tab and view it.
    pub fn init(&mut self, ids: &mut IdGenerator, defaults: &TabDefaults) -> TabId {
        let uuid = self.add(ids, defaults.kind, defaults.title.clone(), defaults.location.clone());
        self.current_viewing = Some(uuid);
        uuid
    }

    /// Open a tab without switching to it.
    pub fn add(
        &mut self,
        ids: &mut IdGenerator,
        kind: HistoryKind,
        title: impl Into<String>,
        location: impl Into<String>,
    ) -> TabId {
        let uuid: TabId = ids.mint();
        self.tabs.insert(uuid, Tab::new(uuid, kind, title, location));
        debug!(tab = %uuid, "tab opened");
        uuid
    }

    /// Close a tab. If it was being viewed, the last remaining tab takes over.
    pub fn remove(&mut self, uuid: TabId) -> Result<Tab, NavigationError> {
        let tab = self
            .tabs
            .shift_remove(&uuid)
            .ok_or(NavigationError::TabNotFound(uuid))?;
        if self.current_viewing == Some(uuid) {
            self.current_viewing = self.tabs.keys().last().copied();
        }
        debug!(tab = %uuid, "tab closed");
        Ok(tab)
    }

    pub fn set_current(&mut self, uuid: TabId) -> Result<(), NavigationError> {
        if !self.tabs.contains_key(&uuid) {
            return Err(NavigationError::TabNotFound(uuid));
        }
        self.current_viewing = Some(uuid);
        Ok(())
    }

    pub fn current_uuid(&self) -> Option<TabId> {
        self.current_viewing
    }

    pub fn current(&self) -> Option<&Tab> {
        self.current_viewing.and_then(|uuid| self.tabs.get(&uuid))
    }

    fn current_mut(&mut self) -> Result<&mut Tab, NavigationError> {
        let uuid = self.current_viewing.ok_or(NavigationError::NoCurrentTab)?;
        self.tabs
            .get_mut(&uuid)
            .ok_or(NavigationError::TabNotFound(uuid))
    }

    /// Visit a page in the current tab.
    pub fn add_page(
        &mut self,
        kind: HistoryKind,
        title: impl Into<String>,
        location: impl Into<String>,
    ) -> Result<(), NavigationError> {
        self.current_mut()?.history.add_page(kind, title, location);
        Ok(())
    }

    pub fn forward(&mut self) -> Result<(), NavigationError> {
        self.current_mut()?.history.forward();
        Ok(())
    }

    pub fn backward(&mut self) -> Result<(), NavigationError> {
        self.current_mut()?.history.backward();
        Ok(())
    }

    pub fn get(&self, uuid: TabId) -> Option<&Tab> {
        self.tabs.get(&uuid)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tab> {
        self.tabs.values()
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }
}
