//! Tab-separated rendering of the printable area.

use std::io::{self, Write};

use tabula_engine::engine::Position;

use super::Sheet;
use super::cell::Cell;

impl Sheet {
    /// Write computed values, one line per row, cells separated by tabs.
    pub fn print_values(&self, output: &mut impl Write) -> io::Result<()> {
        self.print_with(output, |pos, cell| self.evaluate(pos, cell).to_string())
    }

    /// Write editable texts, one line per row, cells separated by tabs.
    pub fn print_texts(&self, output: &mut impl Write) -> io::Result<()> {
        self.print_with(output, |_, cell| cell.text())
    }

    fn print_with(
        &self,
        output: &mut impl Write,
        render: impl Fn(Position, &Cell) -> String,
    ) -> io::Result<()> {
        for row in 0..self.size.rows {
            for col in 0..self.size.cols {
                if col > 0 {
                    output.write_all(b"\t")?;
                }
                let pos = Position::new(row, col);
                if let Some(cell) = self.cells.get(&pos)
                    && !cell.is_empty()
                {
                    output.write_all(render(pos, cell).as_bytes())?;
                }
            }
            output.write_all(b"\n")?;
        }
        Ok(())
    }
}
