use log::{debug, info};

use super::{Command, CommandError, CommandResult};
use crate::document::Document;

const DEFAULT_LIMIT: usize = 100;

/// One undo step: a group of commands together with their inverses
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    name: String,
    label: String,
    steps: Vec<(Command, Command)>,
}

impl HistoryEntry {
    fn new(name: &str, label: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            steps: Vec::new(),
        }
    }

    /// Machine name, e.g. `new_brush_layer`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human readable label, e.g. `New Brush Layer`
    pub fn label(&self) -> &str {
        &self.label
    }

    fn revert(&self, document: &mut Document) -> CommandResult {
        for (_, inverse) in self.steps.iter().rev() {
            inverse.apply(document)?;
        }
        Ok(())
    }

    fn replay(&mut self, document: &mut Document) -> CommandResult {
        for (command, inverse) in &mut self.steps {
            *inverse = command.apply(document)?;
        }
        Ok(())
    }
}

/// Manages the history of executed commands for undo/redo functionality.
///
/// Commands executed while a transaction is open are grouped into a single
/// entry, so a whole gesture undoes in one step.
#[derive(Debug, Clone)]
pub struct CommandHistory {
    undo_stack: Vec<HistoryEntry>,
    redo_stack: Vec<HistoryEntry>,
    transaction: Option<HistoryEntry>,
    limit: usize,
}

impl Default for CommandHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandHistory {
    /// Creates a new empty command history
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_LIMIT)
    }

    /// Creates a history keeping at most `limit` undo entries
    pub fn with_limit(limit: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            transaction: None,
            limit: limit.max(1),
        }
    }

    /// Execute a command and record it.
    ///
    /// Inside a transaction the command joins the open entry, otherwise it
    /// becomes an entry of its own.
    pub fn execute(&mut self, command: Command, document: &mut Document) -> CommandResult {
        let inverse = command.apply(document)?;
        match &mut self.transaction {
            Some(entry) => entry.steps.push((command, inverse)),
            None => {
                let mut entry = HistoryEntry::new(command.name(), command.name());
                entry.steps.push((command, inverse));
                self.push_entry(entry);
            }
        }
        Ok(())
    }

    /// Opens a transaction; commands executed until [`Self::commit_transaction`]
    /// form one undo entry.
    pub fn begin_transaction(&mut self, name: &str, label: &str) -> CommandResult {
        if self.transaction.is_some() {
            return Err(CommandError::TransactionOpen);
        }
        debug!("history transaction '{}' opened", name);
        self.transaction = Some(HistoryEntry::new(name, label));
        Ok(())
    }

    /// Closes the open transaction. An empty transaction leaves no entry.
    pub fn commit_transaction(&mut self) -> CommandResult {
        let entry = self.transaction.take().ok_or(CommandError::NoTransaction)?;
        debug!("history transaction '{}' committed with {} commands", entry.name, entry.steps.len());
        if !entry.steps.is_empty() {
            self.push_entry(entry);
        }
        Ok(())
    }

    pub fn in_transaction(&self) -> bool {
        self.transaction.is_some()
    }

    /// Undo the last entry
    pub fn undo(&mut self, document: &mut Document) -> CommandResult {
        if self.in_transaction() {
            return Err(CommandError::TransactionOpen);
        }
        let entry = self.undo_stack.pop().ok_or(CommandError::NothingToUndo)?;
        entry.revert(document)?;
        info!("undo '{}'", entry.label);
        self.redo_stack.push(entry);
        Ok(())
    }

    /// Redo the last undone entry
    pub fn redo(&mut self, document: &mut Document) -> CommandResult {
        if self.in_transaction() {
            return Err(CommandError::TransactionOpen);
        }
        let mut entry = self.redo_stack.pop().ok_or(CommandError::NothingToRedo)?;
        entry.replay(document)?;
        info!("redo '{}'", entry.label);
        self.undo_stack.push(entry);
        Ok(())
    }

    /// Returns true if there are commands that can be undone
    pub fn can_undo(&self) -> bool {
        !self.in_transaction() && !self.undo_stack.is_empty()
    }

    /// Returns true if there are commands that can be redone
    pub fn can_redo(&self) -> bool {
        !self.in_transaction() && !self.redo_stack.is_empty()
    }

    pub fn undo_stack(&self) -> &[HistoryEntry] {
        &self.undo_stack
    }

    pub fn redo_stack(&self) -> &[HistoryEntry] {
        &self.redo_stack
    }

    /// Clear the command history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.transaction = None;
    }

    fn push_entry(&mut self, entry: HistoryEntry) {
        self.undo_stack.push(entry);
        self.redo_stack.clear();
        if self.undo_stack.len() > self.limit {
            self.undo_stack.remove(0);
        }
    }
}
