use ratatui::{
    layout::Rect,
    style::Color,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

fn key_line(key: &'static str, pad: usize, action: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::raw("  "),
        Span::styled(key, Style::default().fg(Color::Magenta)),
        Span::raw(format!("{:pad$}{action}", "")),
    ])
}

pub fn draw_help(area: Rect, f: &mut Frame) {
    let p = Paragraph::new(vec![
        Line::from("Keybinds:"),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("q", Style::default().fg(Color::Magenta)),
            Span::raw(" / "),
            Span::styled("Ctrl-C", Style::default().fg(Color::Magenta)),
            Span::raw("  Quit"),
        ]),
        key_line("s", 11, "Start / stop the countdown"),
        key_line("r", 11, "Reset the current phase"),
        key_line("tab", 9, "Switch tabs"),
        key_line("?", 11, "Show this help"),
        key_line("esc", 9, "Back to the timer"),
        Line::from(""),
        Line::from("Phases:"),
        Line::from("  Work and break alternate on their own once started."),
        Line::from("  Reset restarts the current phase and keeps it running or stopped."),
    ])
    .block(Block::default().borders(Borders::ALL).title("Help"));
    f.render_widget(p, area);
}
