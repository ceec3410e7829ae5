use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Wrap},
    Frame,
};
use tui_textarea::TextArea;

use crate::app::{App, Screen};
use crate::controller::{Dialog, MainController};
use crate::encoder::BitMatrix;
use crate::platform::{DesktopPlatform, Platform};
use crate::raster::GeneratedImage;

const TITLE: &str = "QR Code Generator";
const PLACEHOLDER: &str = "Your QR code will appear here";

pub fn draw(frame: &mut Frame, app: &App<DesktopPlatform>, input: &TextArea) {
    match app.screen() {
        Screen::Splash(_) => draw_splash(frame, frame.area()),
        Screen::Main(main) => draw_main(frame, main, input),
    }
}

fn draw_splash(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(TITLE, Style::new().add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(Span::styled("text in, QR code out", Style::new().fg(Color::DarkGray))),
    ];
    let inner = centered(area, 40, lines.len() as u16);
    frame.render_widget(Paragraph::new(lines).centered(), inner);
}

fn draw_main(frame: &mut Frame, main: &MainController<DesktopPlatform>, input: &TextArea) {
    let [title_area, input_area, preview_area, status_area, hints_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let title = Line::from(Span::styled(TITLE, Style::new().add_modifier(Modifier::BOLD)));
    frame.render_widget(Paragraph::new(title).centered(), title_area);
    frame.render_widget(input, input_area);

    let view = main.view();
    let preview_block = Block::bordered().title(" QR Code ");
    let preview_inner = preview_block.inner(preview_area);
    frame.render_widget(preview_block, preview_area);
    match main.image() {
        Some(img) if view.image_visible => {
            let lines = preview(img);
            let height = lines.len() as u16;
            let width = lines.first().map(|l| l.width() as u16).unwrap_or(0);
            frame.render_widget(Paragraph::new(lines), centered(preview_inner, width, height));
        }
        _ if view.placeholder_visible => {
            let placeholder = Paragraph::new(PLACEHOLDER).style(Style::new().fg(Color::DarkGray));
            frame.render_widget(placeholder.centered(), centered(preview_inner, preview_inner.width, 1));
        }
        _ => {}
    }

    frame.render_widget(Paragraph::new(status_line(main.platform())), status_area);
    frame.render_widget(Paragraph::new(hints_line(main)), hints_area);

    if main.awaiting_permission() {
        draw_modal(
            frame,
            " Permission ",
            "Allow saving the QR code to your Downloads folder?",
            "[y] Allow   [n] Deny",
        );
    } else if let Some(Dialog { message }) = main.dialog() {
        draw_modal(frame, "", message, &format!("[Enter] {}", Dialog::DISMISS_LABEL));
    }
}

fn status_line(platform: &DesktopPlatform) -> Line<'static> {
    match platform.last_share() {
        Some(req) => Line::from(vec![
            Span::styled("Shared ", Style::new().fg(Color::Green)),
            Span::raw(format!("{} ({})", req.stream, req.mime_type)),
        ]),
        None => match platform.registered_media().last() {
            Some(path) => Line::from(vec![
                Span::styled("Saved ", Style::new().fg(Color::Green)),
                Span::raw(path.display().to_string()),
            ]),
            None => Line::from(""),
        },
    }
}

fn hints_line<P: Platform>(main: &MainController<P>) -> Line<'static> {
    let view = main.view();
    let hint = |key: &'static str, label: &'static str, enabled: bool| {
        let style = if enabled { Style::new() } else { Style::new().fg(Color::DarkGray) };
        vec![
            Span::styled(key, style.add_modifier(Modifier::BOLD)),
            Span::styled(format!(" {label}   "), style),
        ]
    };

    let mut spans = hint("Enter", "Generate", true);
    spans.extend(hint("Ctrl+D", "Download", view.export_enabled));
    spans.extend(hint("Ctrl+S", "Share", view.share_enabled));
    spans.extend(hint("Esc", "Quit", true));
    Line::from(spans)
}

fn draw_modal(frame: &mut Frame, title: &str, message: &str, footer: &str) {
    let width = (message.chars().count() as u16 + 4).clamp(24, 60);
    let area = centered(frame.area(), width, 6);

    let block = Block::bordered().title(title.to_string());
    let body = vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(Span::styled(footer.to_string(), Style::new().add_modifier(Modifier::BOLD))),
    ];

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(body).block(block).wrap(Wrap { trim: true }).centered(),
        area,
    );
}

fn preview(img: &GeneratedImage) -> Vec<Line<'static>> {
    preview_lines(img.modules(), img.quiet_zone() as usize)
}

/// Two module rows per terminal row using upper half blocks, quiet zone included.
pub fn preview_lines(matrix: &BitMatrix, quiet_zone: usize) -> Vec<Line<'static>> {
    let total = matrix.width() + 2 * quiet_zone;
    let dark_at = |x: usize, y: usize| {
        let inside = |v: usize| (quiet_zone..quiet_zone + matrix.width()).contains(&v);
        inside(x) && inside(y) && matrix.get(x - quiet_zone, y - quiet_zone)
    };
    let color = |dark: bool| if dark { Color::Black } else { Color::White };

    (0..total)
        .step_by(2)
        .map(|y| {
            let spans = (0..total)
                .map(|x| {
                    let top = dark_at(x, y);
                    let bottom = y + 1 < total && dark_at(x, y + 1);
                    Span::styled("▀", Style::new().fg(color(top)).bg(color(bottom)))
                })
                .collect::<Vec<_>>();
            Line::from(spans)
        })
        .collect()
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod ui_tests {
    use ratatui::layout::Rect;
    use ratatui::style::Color;

    use super::{centered, preview, preview_lines};
    use crate::encoder::{BitMatrix, QrEncoder};

    #[test]
    fn test_preview_lines() {
        let matrix = BitMatrix::from_rows(&["#.", ".#"]);
        let lines = preview_lines(&matrix, 1);
        // 4 module rows fold into 2 terminal rows of 4 cells
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| l.spans.len() == 4));

        // Row pair 0/1, column 1: quiet zone on top, dark module below
        let cell = &lines[0].spans[1];
        assert_eq!(cell.style.fg, Some(Color::White));
        assert_eq!(cell.style.bg, Some(Color::Black));

        // Row pair 2/3, column 2: dark module on top, quiet zone below
        let cell = &lines[1].spans[2];
        assert_eq!(cell.style.fg, Some(Color::Black));
        assert_eq!(cell.style.bg, Some(Color::White));
    }

    #[test]
    fn test_preview_odd_height() {
        let matrix = BitMatrix::from_rows(&["###", "###", "###"]);
        let lines = preview_lines(&matrix, 0);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].spans[0].style.bg, Some(Color::White));
    }

    #[test]
    fn test_preview_follows_quiet_zone() {
        let mut encoder = QrEncoder::new();
        let img = encoder.encode("https://example.com").unwrap();
        // 25 modules + 2 * 4 quiet zone
        assert_eq!(preview(&img)[0].spans.len(), 33);

        let img = encoder.quiet_zone(0).encode("https://example.com").unwrap();
        let lines = preview(&img);
        assert_eq!(lines[0].spans.len(), 25);
        // Finder pattern corner sits right at the edge
        assert_eq!(lines[0].spans[0].style.fg, Some(Color::Black));
    }

    #[test]
    fn test_centered() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(centered(area, 40, 4), Rect::new(20, 10, 40, 4));
        assert_eq!(centered(area, 100, 30), area);
    }
}
