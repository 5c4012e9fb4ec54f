//! Interactive inspector session
//!
//! Drives an [`Inspector`] from text commands. Destructive commands ask for
//! a `y/N` confirmation on the same input before reaching the inspector.

use crate::command::{self, Command, HELP};
use anyhow::Result;
use persist_inspector::{display_key, EntryId, Inspector};
use persist_registry::Registry;
use persist_store::PreferenceStore;
use std::io::{BufRead, Write};

pub struct Session<S, R, W> {
    registry: Registry<S>,
    inspector: Inspector,
    input: R,
    output: W,
}

impl<S, R, W> Session<S, R, W>
where
    S: PreferenceStore,
    R: BufRead,
    W: Write,
{
    pub fn new(registry: Registry<S>, input: R, output: W) -> Self {
        let inspector = Inspector::open(&registry);
        Self {
            registry,
            inspector,
            input,
            output,
        }
    }

    pub fn into_registry(self) -> Registry<S> {
        self.registry
    }

    /// Read and run commands until `quit` or end of input.
    pub fn run(&mut self) -> Result<()> {
        self.list()?;
        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                break;
            };
            match command::parse(&line) {
                Ok(Command::Quit) => break,
                Ok(command) => self.execute(command)?,
                Err(err) => writeln!(self.output, "{err}")?,
            }
        }

        if self.inspector.has_modified_values() {
            writeln!(self.output, "unsaved edits discarded")?;
        }
        Ok(())
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn confirm(&mut self, question: &str) -> Result<bool> {
        write!(self.output, "{question} [y/N] ")?;
        self.output.flush()?;
        let answer = self.read_line()?.unwrap_or_default();
        Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
    }

    pub fn execute(&mut self, command: Command) -> Result<()> {
        match command {
            Command::List => self.list()?,
            Command::Search(text) => {
                self.inspector.filter_mut().set_search(text);
                self.list()?;
            }
            Command::Clear => {
                self.inspector.filter_mut().clear_search();
                self.list()?;
            }
            Command::ModifiedOnly(enabled) => {
                self.inspector.filter_mut().set_modified_only(enabled);
                self.list()?;
            }
            Command::Set { id, value } => self.stage(id, value)?,
            Command::Save(id) => {
                if !self.inspector.is_modified(&id) {
                    writeln!(self.output, "'{id}' has no unsaved edit")?;
                    return Ok(());
                }
                match self.inspector.commit_one(&mut self.registry, &id) {
                    Ok(_) => writeln!(self.output, "saved {id}")?,
                    Err(err) => writeln!(self.output, "error: {err}")?,
                }
            }
            Command::SaveAll => {
                if !self.inspector.has_modified_values() {
                    writeln!(self.output, "nothing to save")?;
                    return Ok(());
                }
                let report = self.inspector.commit_all(&mut self.registry)?;
                writeln!(self.output, "saved {} change(s)", report.written.len())?;
                for (id, err) in &report.failed {
                    writeln!(self.output, "  {id}: {err}")?;
                }
            }
            Command::Reset(id) => {
                self.inspector.reset_one(&id);
                self.list()?;
            }
            Command::ResetCategory(category) => {
                let question =
                    format!("Reset all preferences in the '{category}' category?");
                if self.confirm(&question)? {
                    match self.inspector.reset_category(&mut self.registry, &category) {
                        Ok(count) => writeln!(self.output, "reset {count} key(s)")?,
                        Err(err) => writeln!(self.output, "error: {err}")?,
                    }
                } else {
                    writeln!(self.output, "cancelled")?;
                }
            }
            Command::DeleteAll => {
                if self.confirm("Delete all stored preferences? This cannot be undone!")? {
                    self.inspector.delete_all_and_save(&mut self.registry)?;
                    writeln!(self.output, "all preferences deleted")?;
                } else {
                    writeln!(self.output, "cancelled")?;
                }
            }
            Command::Refresh => {
                self.inspector.refresh(&self.registry);
                self.list()?;
            }
            Command::Help => writeln!(self.output, "{HELP}")?,
            Command::Quit => {}
        }
        Ok(())
    }

    fn stage(&mut self, id: EntryId, value: String) -> Result<()> {
        if self.inspector.entry(&id).is_none() {
            writeln!(self.output, "no preference '{id}'")?;
            return Ok(());
        }
        self.inspector.stage_edit(id.clone(), value);
        if self.inspector.is_modified(&id) {
            writeln!(self.output, "staged {id} (unsaved)")?;
        }
        Ok(())
    }

    fn list(&mut self) -> Result<()> {
        let groups = self.inspector.grouped_view();
        if groups.is_empty() {
            writeln!(self.output, "{}", self.inspector.empty_message())?;
            return Ok(());
        }

        for group in groups {
            writeln!(self.output, "[{}]", group.name)?;
            writeln!(self.output, "  {:<20}  {:<6}  {}", "Key", "Type", "Value")?;
            for entry in group.entries {
                let id = entry.id();
                let shown = self.inspector.pending(&id).unwrap_or(entry.value.as_str());
                let marker = if self.inspector.is_modified(&id) { "*" } else { " " };
                writeln!(
                    self.output,
                    "{marker} {:<20}  {:<6}  {}",
                    display_key(&entry.key),
                    entry.data_type.name(),
                    shown
                )?;
            }
        }
        Ok(())
    }
}
