//! Plain-text page preview.

use crate::error::Result;
use crate::layout::Measure;
use crate::model::{Color, Layout, PageGeometry};

use super::renderer::Renderer;
use super::sink::{DocumentSink, StyledTable};

/// Runs whose tops are closer than this share a text line.
const SAME_LINE: f32 = 0.5;

/// Render a layout to a plain-text preview, one section per page.
pub fn to_text<M: Measure + ?Sized>(layout: &Layout, measure: &M) -> Result<String> {
    let mut sink = TextSink::new();
    Renderer::new(measure).render(layout, &mut sink)?;
    Ok(sink.to_text())
}

#[derive(Debug, Clone)]
struct Placed {
    y: f32,
    x: f32,
    text: String,
}

/// Sink that collects the text of every page, ordered top to bottom.
///
/// Runs on the same line are joined with a space; table cells with ` | `.
/// Rectangles and lines are ignored.
#[derive(Debug, Default)]
pub struct TextSink {
    pages: Vec<String>,
    current: Option<Vec<Placed>>,
}

impl TextSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Text of every finished page.
    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    /// All pages with a header line before each.
    pub fn to_text(&self) -> String {
        self.pages
            .iter()
            .enumerate()
            .map(|(i, page)| format!("--- page {} ---\n{}", i + 1, page))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn place(&mut self, y: f32, x: f32, text: String) {
        self.current
            .get_or_insert_with(Vec::new)
            .push(Placed { y, x, text });
    }

    fn flush(&mut self) {
        let Some(mut runs) = self.current.take() else {
            return;
        };
        runs.sort_by(|a, b| a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x)));

        let mut lines: Vec<(f32, String)> = Vec::new();
        for run in runs {
            match lines.last_mut() {
                Some((y, line)) if (run.y - *y).abs() < SAME_LINE => {
                    line.push(' ');
                    line.push_str(&run.text);
                }
                _ => lines.push((run.y, run.text)),
            }
        }

        let page = lines
            .into_iter()
            .map(|(_, line)| line)
            .collect::<Vec<_>>()
            .join("\n");
        self.pages.push(page);
    }
}

impl DocumentSink for TextSink {
    fn begin_page(&mut self, _index: usize, _geometry: &PageGeometry) -> Result<()> {
        self.flush();
        self.current = Some(Vec::new());
        Ok(())
    }

    fn draw_text(&mut self, x: f32, y: f32, text: &str, _font_size: f32, _color: Color) -> Result<()> {
        self.place(y, x, text.to_string());
        Ok(())
    }

    fn draw_rect(&mut self, _x: f32, _y: f32, _w: f32, _h: f32, _fill: Color) -> Result<()> {
        Ok(())
    }

    fn draw_line(
        &mut self,
        _x1: f32,
        _y1: f32,
        _x2: f32,
        _y2: f32,
        _color: Color,
        _width: f32,
    ) -> Result<()> {
        Ok(())
    }

    fn draw_table(&mut self, table: &StyledTable) -> Result<()> {
        let columns = table.column_widths.len();
        for row in &table.rows {
            let mut lines: Vec<(f32, Vec<&str>)> = Vec::new();
            for cell in &row.cells {
                let index = match lines.iter().position(|(y, _)| (cell.y - *y).abs() < SAME_LINE) {
                    Some(index) => index,
                    None => {
                        lines.push((cell.y, vec![""; columns]));
                        lines.len() - 1
                    }
                };
                if let Some(slot) = lines[index].1.get_mut(cell.column) {
                    *slot = cell.text.as_str();
                }
            }
            for (y, cells) in lines {
                self.place(y, table.x, cells.join(" | ").trim_end().to_string());
            }
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.flush();
        Ok(())
    }
}
