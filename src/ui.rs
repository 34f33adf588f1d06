//! TUI rendering module.
//!
//! This module draws the terminal preview using ratatui:
//! - Motif list on top (position, literal, score)
//! - Paginated sequence rows, each cell colored by conservation
//! - Status bar with the visible row range
//!
//! Cells come from the same `render::layout_rows` used by the HTML report,
//! so both outputs break rows at the same positions.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::model::{Conservation, ViewerState};
use crate::render::{layout_rows, Cell, Row};
use crate::summary::MatchRecord;

/// Height of the motif list panel (including borders).
const MOTIF_PANEL_HEIGHT: u16 = 8;
/// Height of the status bar.
const STATUS_BAR_HEIGHT: u16 = 1;

/// Color scheme for conservation levels.
pub trait ColorScheme {
    fn get_color(&self, level: Conservation) -> Color;
}

/// Terminal equivalents of the report colors.
pub struct ConservationColorScheme;

impl ColorScheme for ConservationColorScheme {
    fn get_color(&self, level: Conservation) -> Color {
        match level {
            Conservation::Identical => Color::Rgb(255, 215, 0), // gold
            Conservation::Strong => Color::Rgb(255, 192, 203), // pink
            Conservation::Weak => Color::Rgb(144, 238, 144),   // lightgreen
            Conservation::NonConserved => Color::White,
        }
    }
}

/// Style of a single cell: conservation background, motifs bold and underlined.
pub fn cell_style(cell: &Cell, scheme: &impl ColorScheme) -> Style {
    let style = Style::default().fg(Color::Black).bg(scheme.get_color(cell.conservation));
    if cell.in_motif {
        style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    } else {
        style
    }
}

/// Turns layout rows into styled lines, each prefixed by its position label.
pub fn row_lines(rows: &[Row], scheme: &impl ColorScheme) -> Vec<Line<'static>> {
    let label_width = rows.last().map(|r| r.position.to_string().len()).unwrap_or(1);

    rows.iter()
        .map(|row| {
            let mut spans = Vec::with_capacity(row.cells.len() + 1);
            spans.push(Span::styled(
                format!("{:>width$} ", row.position, width = label_width),
                Style::default().fg(Color::DarkGray),
            ));
            spans.extend(
                row.cells
                    .iter()
                    .map(|cell| Span::styled(cell.symbol.to_string(), cell_style(cell, scheme))),
            );
            Line::from(spans)
        })
        .collect()
}

/// One line per match record.
pub fn summary_lines(records: &[MatchRecord]) -> Vec<Line<'static>> {
    records
        .iter()
        .map(|record| {
            Line::from(vec![
                Span::styled(format!("{:>6} ", record.position), Style::default().fg(Color::Cyan)),
                Span::styled(
                    record.literal.clone(),
                    Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                ),
                Span::raw(format!("  {}", record.score)),
            ])
        })
        .collect()
}

/// Renders the complete UI.
pub fn render(frame: &mut Frame, state: &ViewerState) {
    let area = frame.area();

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(MOTIF_PANEL_HEIGHT),
            Constraint::Min(3),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(area);

    render_motif_panel(frame, state, main_layout[0]);
    render_sequence_panel(frame, state, main_layout[1]);
    render_status_bar(frame, state, main_layout[2]);
}

fn render_motif_panel(frame: &mut Frame, state: &ViewerState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Motifs ({}) [position literal score]", state.records.len()));
    let paragraph = Paragraph::new(summary_lines(&state.records)).block(block);
    frame.render_widget(paragraph, area);
}

fn render_sequence_panel(frame: &mut Frame, state: &ViewerState, area: Rect) {
    let rows = layout_rows(&state.sequence, state.row_width);
    let end_row = (state.first_row + state.visible_rows).min(rows.len());
    let start_row = state.first_row.min(end_row);
    let lines = row_lines(&rows[start_row..end_row], &ConservationColorScheme);

    let title = format!(
        "Sequence [{} residues | Rows: {}-{}/{}]",
        state.sequence.ungapped_len(),
        start_row + 1,
        end_row,
        rows.len()
    );
    let block = Block::default().borders(Borders::ALL).title(title);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_status_bar(frame: &mut Frame, state: &ViewerState, area: Rect) {
    let message = state.status_message.as_deref().unwrap_or("");
    let left_content = format!(" VIEW | {} ", message);
    let keys = " j/k scroll  n/N motif  g/G ends  q quit ";

    let status_line = Line::from(vec![
        Span::styled(
            left_content.clone(),
            Style::default().fg(Color::Black).bg(Color::Cyan),
        ),
        Span::styled(
            " ".repeat((area.width as usize).saturating_sub(left_content.len() + keys.len())),
            Style::default().bg(Color::Cyan),
        ),
        Span::styled(
            keys,
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
    ]);

    frame.render_widget(Paragraph::new(status_line), area);
}

/// Number of sequence rows that fit in a terminal of the given height.
pub fn calculate_visible_rows(terminal_height: u16) -> usize {
    // Motif panel, status bar, and the sequence panel's two borders
    terminal_height.saturating_sub(MOTIF_PANEL_HEIGHT + STATUS_BAR_HEIGHT + 2) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Sequence;
    use crate::motif::Motif;

    #[test]
    fn test_conservation_colors() {
        let scheme = ConservationColorScheme;
        assert_eq!(scheme.get_color(Conservation::Identical), Color::Rgb(255, 215, 0));
        assert_eq!(scheme.get_color(Conservation::Strong), Color::Rgb(255, 192, 203));
        assert_eq!(scheme.get_color(Conservation::Weak), Color::Rgb(144, 238, 144));
        assert_eq!(scheme.get_color(Conservation::NonConserved), Color::White);
    }

    #[test]
    fn test_cell_style() {
        let scheme = ConservationColorScheme;
        let plain = Cell {
            symbol: 'A',
            conservation: Conservation::NonConserved,
            in_motif: false,
        };
        let marked = Cell {
            in_motif: true,
            ..plain
        };
        assert!(!cell_style(&plain, &scheme).add_modifier.contains(Modifier::BOLD));
        let style = cell_style(&marked, &scheme);
        assert!(style.add_modifier.contains(Modifier::BOLD | Modifier::UNDERLINED));
        assert_eq!(style.bg, Some(Color::White));
    }

    #[test]
    fn test_row_lines() {
        let raw = "KAST-ILV".repeat(20);
        let labels = vec!["pink"; raw.len()];
        let seq = Motif::aurora_b().mark(Sequence::build(&raw, &labels).unwrap()).unwrap();
        let rows = layout_rows(&seq, 60);
        let lines = row_lines(&rows, &ConservationColorScheme);

        assert_eq!(lines.len(), 3);
        // Position label plus one span per cell.
        assert_eq!(lines[0].spans.len(), 61);
        assert_eq!(lines[2].spans.len(), 21);
        assert_eq!(lines[1].spans[0].content, " 61 ");
    }

    #[test]
    fn test_visible_rows() {
        // 40 - 8 (motif panel) - 1 (status) - 2 (borders)
        assert_eq!(calculate_visible_rows(40), 29);
        assert_eq!(calculate_visible_rows(5), 0);
    }
}
