//! Module filter table
//!
//! A fixed-capacity set of module names with allow-all-when-empty semantics:
//!
//! 1. **Inactive** (no names registered): every module passes
//! 2. **Active** (one or more names): only registered modules pass
//!
//! The table itself is not synchronised; the logger keeps it behind its
//! configuration lock. Lookups are a linear scan over at most
//! [`MAX_MODULES`] inline entries, so the filter never allocates.

use crate::config::{MAX_MODULES, MODULE_NAME_CAPACITY};
use crate::fixed_str::FixedStr;

type ModuleName = FixedStr<MODULE_NAME_CAPACITY>;

/// Set of enabled module names
#[derive(Clone, Copy, Debug)]
pub struct ModuleFilter {
    names: [ModuleName; MAX_MODULES],
    count: usize,
}

impl ModuleFilter {
    /// Longest accepted module name in bytes
    pub const MAX_NAME_LEN: usize = ModuleName::MAX_LEN;

    /// An empty, allow-all filter
    pub const fn new() -> Self {
        Self {
            names: [ModuleName::new(); MAX_MODULES],
            count: 0,
        }
    }

    /// Whether the filter restricts output (at least one name registered)
    pub fn is_active(&self) -> bool {
        self.count > 0
    }

    /// Number of registered names
    pub fn len(&self) -> usize {
        self.count
    }

    /// Whether no names are registered
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Registered names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names[..self.count].iter().map(ModuleName::as_str)
    }

    /// Registers `name`.
    ///
    /// Empty names, names longer than [`Self::MAX_NAME_LEN`] and additions
    /// to a full table are dropped. Re-adding a registered name is a no-op.
    /// Returns whether the table changed.
    pub fn enable(&mut self, name: &str) -> bool {
        if name.is_empty() || self.position(name).is_some() || self.count == MAX_MODULES {
            return false;
        }
        let Some(entry) = ModuleName::exact(name) else {
            return false;
        };
        self.names[self.count] = entry;
        self.count += 1;
        true
    }

    /// Removes `name`, keeping the remaining entries in order.
    ///
    /// Removing the last entry makes the filter inactive again.
    /// Returns whether the name was present.
    pub fn disable(&mut self, name: &str) -> bool {
        let Some(index) = self.position(name) else {
            return false;
        };
        self.names.copy_within(index + 1..self.count, index);
        self.count -= 1;
        self.names[self.count] = ModuleName::new();
        true
    }

    /// Drops every entry, returning to allow-all
    pub fn clear(&mut self) {
        self.names = [ModuleName::new(); MAX_MODULES];
        self.count = 0;
    }

    /// Whether a line tagged `name` passes the filter
    pub fn allows(&self, name: &str) -> bool {
        !self.is_active() || self.position(name).is_some()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.names[..self.count]
            .iter()
            .position(|entry| *entry == *name)
    }
}

impl Default for ModuleFilter {
    fn default() -> Self {
        Self::new()
    }
}
