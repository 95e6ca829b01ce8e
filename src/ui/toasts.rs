//! Toast overlay in the bottom-right corner

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::notifications::{Toast, ToastVariant};

const TOAST_WIDTH: u16 = 44;
const TOAST_HEIGHT: u16 = 5;

/// Stack areas upwards from the bottom-right corner, newest at the bottom
pub(crate) fn toast_areas(area: Rect, count: usize) -> Vec<Rect> {
    let width = TOAST_WIDTH.min(area.width);
    let x = area.x + area.width - width;
    (0..count)
        .map_while(|i| {
            let offset = TOAST_HEIGHT.checked_mul(i as u16 + 1)?;
            let y = (area.y + area.height).checked_sub(offset)?;
            (y >= area.y).then(|| Rect::new(x, y, width, TOAST_HEIGHT))
        })
        .collect()
}

pub fn render_toasts(frame: &mut Frame, toasts: &[Toast]) {
    let areas = toast_areas(frame.area(), toasts.len());
    for (toast, area) in toasts.iter().rev().zip(areas) {
        let color = match toast.variant {
            ToastVariant::Default => Color::Green,
            ToastVariant::Destructive => Color::Red,
        };
        let body = Paragraph::new(vec![
            Line::from(Span::styled(
                toast.title.clone(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(toast.description.clone()),
        ])
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );
        frame.render_widget(Clear, area);
        frame.render_widget(body, area);
    }
}
