use crate::state::State;
use std::collections::VecDeque;
use std::io;
use tui::backend::Backend;
use tui::buffer::Buffer;
use tui::layout::{Constraint, Direction, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::symbols::Marker;
use tui::text::Span;
use tui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Widget};
use tui::Terminal;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Redraw {
    Yes,
    No,
}

fn title(state: &State) -> String {
    match state.latest() {
        Some(sample) => format!(
            "PA1: {} ({:.2} V), {} samples",
            sample.raw,
            sample.volts,
            state.received()
        ),
        None => "PA1: waiting for samples".to_string(),
    }
}

pub fn draw(state: &State, terminal: &mut Terminal<impl Backend>) -> Result<(), io::Error> {
    terminal.draw(|f| {
        let size = f.size();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Ratio(2, 3), Constraint::Ratio(1, 3)])
            .split(size);

        let chart_state = state.chart();
        let title = title(state);

        let dataset = Dataset::default()
            .name("voltage")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Cyan))
            .data(&chart_state.coords);
        let chart = Chart::new(vec![dataset])
            .block(
                Block::default()
                    .title(Span::styled(
                        title.as_str(),
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ))
                    .borders(Borders::ALL),
            )
            .x_axis(
                Axis::default()
                    .title(chart_state.x_axis.name.as_str())
                    .style(Style::default().fg(Color::Gray))
                    .labels(vec![
                        Span::styled(
                            chart_state.x_axis.range.min_name(),
                            Style::default().add_modifier(Modifier::BOLD),
                        ),
                        Span::styled(
                            chart_state.x_axis.range.max_name(),
                            Style::default().add_modifier(Modifier::BOLD),
                        ),
                    ])
                    .bounds([chart_state.x_axis.range.min(), chart_state.x_axis.range.max()]),
            )
            .y_axis(
                Axis::default()
                    .title(chart_state.y_axis.name.as_str())
                    .style(Style::default().fg(Color::Gray))
                    .labels(vec![
                        Span::styled(
                            chart_state.y_axis.range.min_name(),
                            Style::default().add_modifier(Modifier::BOLD),
                        ),
                        Span::styled(
                            chart_state.y_axis.range.max_name(),
                            Style::default().add_modifier(Modifier::BOLD),
                        ),
                    ])
                    .bounds([chart_state.y_axis.range.min(), chart_state.y_axis.range.max()]),
            );
        f.render_widget(chart, chunks[0]);

        f.render_widget(LogWidget { logs: state.logs() }, chunks[1]);
    })?;

    Ok(())
}

/// Most recent lines at the bottom.
struct LogWidget<'a> {
    logs: &'a VecDeque<String>,
}

impl<'a> Widget for LogWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled(
                "Other output",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL);

        let area = {
            let a = block.inner(area);
            block.render(area, buf);
            a
        };

        for (i, log) in self
            .logs
            .iter()
            .rev()
            .take(area.height.into())
            .enumerate()
        {
            // bounded by area.height above
            #[allow(clippy::cast_possible_truncation)]
            let i = i as u16;
            buf.set_stringn(
                area.left(),
                area.bottom() - 1 - i,
                log,
                area.width.into(),
                Style::default(),
            );
        }
    }
}
