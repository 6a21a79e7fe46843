//! File-selection state for the upload page.
//!
//! The picker is the boundary that enforces the extension allow-list: only
//! files the backend knows how to analyze are listed, so the upload path
//! never re-validates kinds.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use veneer_types::{LocalFile, is_allowed_file};

/// One selectable file in the picker listing.
#[derive(Debug, Clone)]
pub struct PickerEntry {
    pub name: String,
    pub path: PathBuf,
    pub size: u64,
    pub selected: bool,
}

/// Cursor-driven multi-select over the analyzable files of one directory.
#[derive(Debug, Clone, Default)]
pub struct FilePicker {
    entries: Vec<PickerEntry>,
    cursor: usize,
}

impl FilePicker {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// List the allow-listed files directly inside `dir`, sorted by name.
    pub fn scan(dir: &Path) -> io::Result<Self> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let metadata = entry.metadata()?;
            if !metadata.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if !is_allowed_file(&name) {
                continue;
            }
            entries.push(PickerEntry {
                name,
                path: entry.path(),
                size: metadata.len(),
                selected: false,
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(Self { entries, cursor: 0 })
    }

    #[must_use]
    pub fn entries(&self) -> &[PickerEntry] {
        &self.entries
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.selected).count()
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if !self.entries.is_empty() {
            self.cursor = (self.cursor + 1).min(self.entries.len() - 1);
        }
    }

    /// Toggle selection of the entry under the cursor.
    pub fn toggle_current(&mut self) {
        if let Some(entry) = self.entries.get_mut(self.cursor) {
            entry.selected = !entry.selected;
        }
    }

    /// Read the selected files into memory for upload. Selection state is
    /// left untouched so a failed upload can be retried as-is.
    pub fn read_selected(&self) -> io::Result<Vec<LocalFile>> {
        let mut files = Vec::new();
        for entry in self.entries.iter().filter(|entry| entry.selected) {
            let bytes = fs::read(&entry.path)?;
            files.push(LocalFile::new(entry.name.clone(), bytes));
        }
        Ok(files)
    }
}
