//! Owned storage for binding value strings.

/// Index of a string in a [`StringArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArenaKey(usize);

impl ArenaKey {
    /// Slot index; equals the index of the binding that owns it.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Append-only string storage, dropped in bulk.
#[derive(Debug, Default)]
pub struct StringArena {
    slots: Vec<Box<str>>,
}

impl StringArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `text` and return its key.
    pub fn push(&mut self, text: String) -> ArenaKey {
        let key = ArenaKey(self.slots.len());
        self.slots.push(text.into_boxed_str());
        key
    }

    pub fn get(&self, key: ArenaKey) -> Option<&str> {
        self.slots.get(key.0).map(|s| &**s)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Total bytes held.
    pub fn bytes(&self) -> usize {
        self.slots.iter().map(|s| s.len()).sum()
    }
}

/// Copy `value` into a new owned string, reporting allocation failure
/// instead of aborting.
pub(crate) fn copy_value(value: &str) -> Result<String, std::collections::TryReserveError> {
    let mut text = String::new();
    text.try_reserve_exact(value.len())?;
    text.push_str(value);
    Ok(text)
}
