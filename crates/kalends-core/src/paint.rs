use unicode_width::UnicodeWidthStr;

use crate::view::{ContainerKind, NodeId, Role, ViewTree};

const BAND_WIDTH: usize = 3;
const BLOCK_GUTTER: &str = "   ";

pub struct Painter {
    color: bool,
}

impl Painter {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn paint_page(&self, page: &ViewTree, root: NodeId) -> String {
        let mut out = String::new();
        for child in page.children(root) {
            match page.get(*child).map(|entry| entry.role) {
                Some(Role::Container(ContainerKind::Header)) => {
                    out.push_str(&self.year_strip(page, *child));
                    out.push('\n');
                    out.push('\n');
                }
                Some(Role::Container(ContainerKind::Months)) => {
                    out.push_str(&self.months_grid(page, *child));
                }
                _ => {}
            }
        }
        out
    }

    fn year_strip(&self, page: &ViewTree, header: NodeId) -> String {
        let mut cells = Vec::new();
        for node in page.children(header) {
            let Some(entry) = page.get(*node) else {
                continue;
            };
            if !matches!(entry.role, Role::YearMarker { .. }) {
                continue;
            }
            if entry.presentation.selected {
                cells.push(self.paint(&format!("[{}]", entry.text), "1"));
            } else {
                cells.push(format!(" {} ", entry.text));
            }
        }
        cells.join(" ")
    }

    fn months_grid(&self, page: &ViewTree, months: NodeId) -> String {
        let blocks: Vec<(usize, Vec<String>)> = page
            .children(months)
            .iter()
            .map(|month| self.month_block(page, *month))
            .collect();

        let mut out = String::new();
        for band in blocks.chunks(BAND_WIDTH) {
            let height =
                band.iter().map(|(_, lines)| lines.len()).max().unwrap_or(0);
            for row in 0..height {
                let mut line = String::new();
                for (idx, (width, lines)) in band.iter().enumerate() {
                    if idx > 0 {
                        line.push_str(BLOCK_GUTTER);
                    }
                    match lines.get(row) {
                        Some(text) => line.push_str(text),
                        None => line.push_str(&" ".repeat(*width)),
                    }
                }
                let trimmed = line.trim_end();
                if trimmed.is_empty() {
                    out.push_str(&line);
                } else {
                    out.push_str(trimmed);
                }
                out.push('\n');
            }
            out.push('\n');
        }
        out
    }

    fn month_block(
        &self,
        page: &ViewTree,
        month: NodeId,
    ) -> (usize, Vec<String>) {
        let mut title = String::new();
        let mut labels = Vec::new();
        let mut days = Vec::new();
        for node in page.descendants(month) {
            let Some(entry) = page.get(node) else {
                continue;
            };
            match entry.role {
                Role::MonthTitle => title = entry.text.clone(),
                Role::DayLabel { .. } => {
                    labels.push((
                        entry.text.clone(),
                        entry.presentation.color.clone(),
                    ));
                }
                Role::Padding => days.push((String::new(), None, false)),
                Role::DateCell { .. } => {
                    days.push((
                        entry.text.clone(),
                        entry.presentation.color.clone(),
                        !entry.presentation.marks.is_empty(),
                    ));
                }
                _ => {}
            }
        }

        let label_width = labels
            .iter()
            .map(|(text, _)| text.as_str().width())
            .max()
            .unwrap_or(2)
            .max(2);
        let cell_width = label_width + 1;
        let block_width = cell_width * 7;

        let mut lines = Vec::new();
        lines.push(pad_right(&title, block_width));

        let mut label_row = String::new();
        for (text, color) in &labels {
            let cell = format!("{} ", pad_left(text, label_width));
            label_row.push_str(&self.tint(&cell, color.as_deref()));
        }
        lines.push(label_row);

        for week in days.chunks(7) {
            let mut row = String::new();
            for (text, color, marked) in week {
                let tail = if *marked { '*' } else { ' ' };
                let cell =
                    format!("{}{}", pad_left(text, label_width), tail);
                row.push_str(&self.tint(&cell, color.as_deref()));
            }
            lines.push(row);
        }

        (block_width, lines)
    }

    fn tint(&self, text: &str, color: Option<&str>) -> String {
        match color.map(color_code) {
            Some(code) if !code.is_empty() => self.paint(text, code),
            _ => text.to_string(),
        }
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if self.color {
            format!("\x1b[{code}m{text}\x1b[0m")
        } else {
            text.to_string()
        }
    }
}

fn color_code(name: &str) -> &'static str {
    match name {
        "red" => "31",
        "green" => "32",
        "yellow" => "33",
        "blue" => "34",
        "magenta" => "35",
        "cyan" => "36",
        "gray" | "grey" => "90",
        _ => "",
    }
}

fn pad_left(text: &str, width: usize) -> String {
    let mut out = String::new();
    for _ in text.width()..width {
        out.push(' ');
    }
    out.push_str(text);
    out
}

fn pad_right(text: &str, width: usize) -> String {
    let mut out = String::from(text);
    for _ in text.width()..width {
        out.push(' ');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::CalendarHooks;
    use crate::locale::LocaleTable;
    use crate::render::Renderer;
    use chrono::Weekday;

    fn painted_year(color: bool) -> String {
        let mut page = ViewTree::new();
        let root =
            page.insert(None, Role::Container(ContainerKind::Widget));
        let renderer =
            Renderer::new(&LocaleTable::builtin(), "es", Weekday::Sun)
                .expect("renderer");
        let mut hooks = CalendarHooks::new();
        hooks.on_render_day = Some(Box::new(|presentation, stamp| {
            use chrono::Datelike;
            if stamp.date().day() == 1 {
                presentation.color = Some("red".to_string());
            }
            if stamp.date().day() == 15 {
                presentation.mark("midmonth");
            }
        }));
        renderer.render_year_header(&mut page, root, 2023, 2025, 2024);
        renderer
            .render_months(&mut page, root, 2024, &mut hooks)
            .expect("months");
        Painter::new(color).paint_page(&page, root)
    }

    #[test]
    fn colorless_output_has_no_escapes() {
        let out = painted_year(false);
        assert!(!out.contains('\x1b'));
        assert!(out.contains("[2024]"));
        assert!(out.contains(" 2023 "));
        assert!(out.contains("Enero"));
        assert!(out.contains("Dom"));
        assert!(out.contains("15*"));
    }

    #[test]
    fn color_wraps_tinted_cells() {
        let out = painted_year(true);
        assert!(out.contains("\x1b[1m[2024]\x1b[0m"));
        assert!(out.contains("\x1b[31m"));
    }

    #[test]
    fn twelve_months_paint_in_four_bands() {
        let out = painted_year(false);
        assert_eq!(out.matches("Enero").count(), 1);
        assert_eq!(out.matches("Diciembre").count(), 1);
        let bands: Vec<&str> = out
            .split("\n\n")
            .filter(|chunk| chunk.contains("Dom"))
            .collect();
        assert_eq!(bands.len(), 4);
        for band in bands {
            assert_eq!(band.lines().count(), 8);
        }
    }

    #[test]
    fn short_months_keep_six_week_rows() {
        let out = painted_year(false);
        let band = out
            .split("\n\n")
            .find(|chunk| chunk.contains("Julio"))
            .expect("band holding the short months");
        assert_eq!(band.lines().count(), 8);
        let last = band.lines().last().expect("last week row");
        assert!(!last.is_empty());
        assert!(last.trim().is_empty());
    }

    #[test]
    fn unknown_colors_paint_plain() {
        let mut page = ViewTree::new();
        let root =
            page.insert(None, Role::Container(ContainerKind::Widget));
        let renderer =
            Renderer::new(&LocaleTable::builtin(), "es", Weekday::Sun)
                .expect("renderer");
        let mut hooks = CalendarHooks::new();
        hooks.on_render_day = Some(Box::new(|presentation, _| {
            presentation.color = Some("mauve".to_string());
        }));
        renderer
            .render_months(&mut page, root, 2024, &mut hooks)
            .expect("months");
        let out = Painter::new(true).paint_page(&page, root);
        assert!(!out.contains("\x1b"));
    }
}
