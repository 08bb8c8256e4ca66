// Plain-text report of a route description

use std::fmt;

use crate::domain::{ResourceTemplate, ResourceTemplates, TableRow};

/// Renders table rows as aligned text.
///
/// The link, name and options columns are padded to their widest cell;
/// the template column is left ragged. Every line ends with a newline.
pub struct TextReport<'a> {
    rows: &'a [TableRow],
}

impl<'a> TextReport<'a> {
    pub fn new(rows: &'a [TableRow]) -> Self {
        Self { rows }
    }

    fn column_widths(&self) -> [usize; 3] {
        let mut widths = [0; 3];
        for row in self.rows {
            for (width, cell) in widths.iter_mut().zip(row.columns()) {
                *width = (*width).max(cell.chars().count());
            }
        }
        widths
    }
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.column_widths();
        for row in self.rows {
            let [link, name, options, template] = row.columns();
            writeln!(
                f,
                "{:<w0$} {:<w1$} {:<w2$} {}",
                link,
                name,
                options,
                template,
                w0 = widths[0],
                w1 = widths[1],
                w2 = widths[2],
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for ResourceTemplates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", TextReport::new(&self.to_table()))
    }
}

impl fmt::Display for ResourceTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let single: ResourceTemplates = std::iter::once(self.clone()).collect();
        write!(f, "{}", single)
    }
}
