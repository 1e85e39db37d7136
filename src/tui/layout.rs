//! Layout calculations for the picker.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Below these dimensions the footer is hidden.
pub const COMPACT_WIDTH: u16 = 30;
pub const COMPACT_HEIGHT: u16 = 8;

/// Picker layout areas.
#[derive(Debug, Clone, Copy)]
pub struct PickerLayout {
    /// Prompt line.
    pub header: Rect,
    /// Filter bar.
    pub filter: Rect,
    /// Choice list.
    pub list: Rect,
    /// Detail line for the selected choice.
    pub detail: Rect,
    /// Key hints.
    pub footer: Rect,
}

impl PickerLayout {
    /// Split `area` into picker regions.
    pub fn new(area: Rect) -> Self {
        // Small terminals drop the footer and the separator above the detail
        let (detail_height, footer_height) = if area.width < COMPACT_WIDTH || area.height < COMPACT_HEIGHT {
            (1, 0)
        } else {
            (2, 1)
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(detail_height),
                Constraint::Length(footer_height),
            ])
            .split(area);

        Self {
            header: chunks[0],
            filter: chunks[1],
            list: chunks[2],
            detail: chunks[3],
            footer: chunks[4],
        }
    }

    /// Number of choice rows that fit on screen.
    pub fn list_rows(&self) -> usize {
        self.list.height as usize
    }
}

/// Create a fixed-size centered rectangle for overlays.
pub fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let actual_width = width.min(area.width);
    let actual_height = height.min(area.height);

    let x = area.x + (area.width.saturating_sub(actual_width)) / 2;
    let y = area.y + (area.height.saturating_sub(actual_height)) / 2;

    Rect::new(x, y, actual_width, actual_height)
}
