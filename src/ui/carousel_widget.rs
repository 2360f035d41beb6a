//! Custom Ratatui widget that renders the clip strip at the current scroll
//! offset, fading each card by its opacity.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::Line,
    widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap},
};

use crate::core::{
    clip::Clip,
    geometry::{GeometryProvider, StripLayout},
    metrics::MIN_OPACITY,
};

use super::theme::Theme;

/// The carousel widget itself — created fresh each frame.
pub struct CarouselWidget<'a> {
    clips: &'a [Clip],
    layout: &'a StripLayout,
    opacities: &'a [f64],
    selected: usize,
}

impl<'a> CarouselWidget<'a> {
    pub fn new(clips: &'a [Clip], layout: &'a StripLayout, opacities: &'a [f64]) -> Self {
        Self {
            clips,
            layout,
            opacities,
            selected: 0,
        }
    }

    pub fn selected(mut self, selected: usize) -> Self {
        self.selected = selected;
        self
    }
}

impl Widget for CarouselWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(scroll) = self.layout.scroll_offset() else {
            return;
        };
        let card_w = self.layout.item_width_uniform().round() as u16;
        if card_w == 0 || area.height == 0 {
            return;
        }
        let view_w = i32::from(area.width);

        for (i, clip) in self.clips.iter().enumerate() {
            let Some(offset) = self.layout.item_offset(i) else {
                continue;
            };
            let left = (offset - scroll).round() as i32;
            if left + i32::from(card_w) <= 0 || left >= view_w {
                continue;
            }

            // Draw off-screen, then copy only the columns inside the viewport
            // so cards can be partially visible at either edge.
            let card_area = Rect::new(0, 0, card_w, area.height);
            let mut card_buf = Buffer::empty(card_area);
            let opacity = self.opacities.get(i).copied().unwrap_or(MIN_OPACITY);
            render_card(clip, opacity, i == self.selected, card_area, &mut card_buf);

            for cx in 0..card_w {
                let sx = left + i32::from(cx);
                if !(0..view_w).contains(&sx) {
                    continue;
                }
                for cy in 0..area.height {
                    let dst = (area.x + sx as u16, area.y + cy);
                    if let (Some(src), Some(dst)) = (card_buf.cell((cx, cy)), buf.cell_mut(dst)) {
                        *dst = src.clone();
                    }
                }
            }
        }
    }
}

fn render_card(clip: &Clip, opacity: f64, selected: bool, area: Rect, buf: &mut Buffer) {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::card_border_style(opacity, selected));
    let duration = clip.duration_label();
    if !duration.is_empty() {
        block = block.title_bottom(Line::styled(format!(" {duration} "), Theme::card_style(opacity)).right_aligned());
    }

    let inner = block.inner(area);
    block.render(area, buf);

    let mut lines = Vec::new();
    // Push the headline down a little so it reads like a video frame.
    for _ in 0..inner.height / 4 {
        lines.push(Line::raw(""));
    }
    lines.push(Line::styled(clip.title.clone(), Theme::card_title_style(opacity)).centered());
    lines.push(Line::raw(""));
    lines.push(Line::styled(clip.caption.clone(), Theme::card_style(opacity)));

    Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .render(inner, buf);
}
