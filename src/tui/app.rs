//! Application state for the picker.

use crate::select::{Choice, SelectKind};

/// Application mode/state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppMode {
    /// Normal navigation mode.
    #[default]
    Normal,
    /// Filter/search mode.
    Filter,
    /// Help overlay.
    Help,
}

/// Picker state.
pub struct App {
    // Data
    /// All choices, in the order they were given.
    choices: Vec<Choice>,
    /// Prompt text shown in the header.
    title: String,
    /// What is being picked.
    kind: SelectKind,

    // UI State
    /// Current application mode.
    mode: AppMode,
    /// Currently selected position within `visible_indices`.
    selected: usize,
    /// First visible row of the list.
    scroll_offset: usize,
    /// Current filter text.
    filter_text: String,

    // Computed (cached)
    /// Indices of visible choices (after filtering).
    visible_indices: Vec<usize>,
    /// Should the app quit.
    should_quit: bool,
    /// Index into `choices` picked by the user.
    chosen: Option<usize>,
}

impl App {
    /// Create a new picker over `choices`.
    pub fn new(choices: Vec<Choice>, title: impl Into<String>, kind: SelectKind) -> Self {
        let visible_indices = (0..choices.len()).collect();
        Self {
            choices,
            title: title.into(),
            kind,
            mode: AppMode::Normal,
            selected: 0,
            scroll_offset: 0,
            filter_text: String::new(),
            visible_indices,
            should_quit: false,
            chosen: None,
        }
    }

    // ==================== Getters ====================

    /// Get the current mode.
    pub fn mode(&self) -> &AppMode {
        &self.mode
    }

    /// Get the prompt text.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Get what is being picked.
    pub fn kind(&self) -> SelectKind {
        self.kind
    }

    /// Check if the app should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Index into the original choices picked by the user.
    pub fn chosen(&self) -> Option<usize> {
        self.chosen
    }

    /// Get the current filter text.
    pub fn filter_text(&self) -> &str {
        &self.filter_text
    }

    /// Get the selected position among visible choices.
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// Get the scroll offset.
    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Get the number of choices.
    pub fn total_count(&self) -> usize {
        self.choices.len()
    }

    /// Get the number of visible choices.
    pub fn visible_count(&self) -> usize {
        self.visible_indices.len()
    }

    /// Get visible choices after filtering.
    pub fn visible_choices(&self) -> Vec<&Choice> {
        self.visible_indices
            .iter()
            .filter_map(|&i| self.choices.get(i))
            .collect()
    }

    /// Get the currently selected choice.
    pub fn selected_choice(&self) -> Option<&Choice> {
        self.visible_indices
            .get(self.selected)
            .and_then(|&i| self.choices.get(i))
    }

    // ==================== Mode Management ====================

    /// Set the application mode.
    pub fn set_mode(&mut self, mode: AppMode) {
        self.mode = mode;
    }

    /// Toggle help overlay.
    pub fn toggle_help(&mut self) {
        self.mode = match self.mode {
            AppMode::Help => AppMode::Normal,
            _ => AppMode::Help,
        };
    }

    // ==================== Filter Management ====================

    /// Append a character to the filter text.
    pub fn push_filter_char(&mut self, c: char) {
        self.filter_text.push(c);
        self.update_visible();
    }

    /// Remove the last character from the filter text.
    pub fn pop_filter_char(&mut self) {
        self.filter_text.pop();
        self.update_visible();
    }

    /// Clear the filter text.
    pub fn clear_filter(&mut self) {
        self.filter_text.clear();
        self.update_visible();
    }

    /// Update the visible choices based on the current filter.
    fn update_visible(&mut self) {
        self.visible_indices = if self.filter_text.is_empty() {
            (0..self.choices.len()).collect()
        } else {
            crate::filter::filter_choices(&self.filter_text, &self.choices, true)
                .into_iter()
                .map(|(idx, _score)| idx)
                .collect()
        };

        // Best match first after every change
        self.selected = 0;
        self.scroll_offset = 0;
    }

    // ==================== Navigation ====================

    /// Move selection up by one row.
    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Move selection down by one row.
    pub fn move_down(&mut self) {
        if self.selected + 1 < self.visible_indices.len() {
            self.selected += 1;
        }
    }

    /// Move selection up by a page.
    pub fn page_up(&mut self, rows: usize) {
        self.selected = self.selected.saturating_sub(rows.max(1));
    }

    /// Move selection down by a page.
    pub fn page_down(&mut self, rows: usize) {
        self.selected = (self.selected + rows.max(1)).min(self.visible_indices.len().saturating_sub(1));
    }

    /// Move selection to the first item.
    pub fn move_to_first(&mut self) {
        self.selected = 0;
    }

    /// Move selection to the last item.
    pub fn move_to_last(&mut self) {
        self.selected = self.visible_indices.len().saturating_sub(1);
    }

    /// Keep the selection inside a window of `rows` rows.
    pub fn ensure_visible(&mut self, rows: usize) {
        if rows == 0 {
            return;
        }
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + rows {
            self.scroll_offset = self.selected + 1 - rows;
        }
    }

    // ==================== Actions ====================

    /// Quit without choosing anything.
    pub fn quit(&mut self) {
        self.chosen = None;
        self.should_quit = true;
    }

    /// Choose the currently selected entry.
    pub fn choose_selected(&mut self) {
        if let Some(&index) = self.visible_indices.get(self.selected) {
            self.chosen = Some(index);
            self.should_quit = true;
        }
    }

    /// Choose an entry by its number (1-9) in the visible list.
    pub fn choose_numbered(&mut self, num: usize) {
        let position = num.wrapping_sub(1);
        if position < self.visible_indices.len().min(9) {
            self.selected = position;
            self.choose_selected();
        }
    }
}
