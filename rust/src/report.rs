//! Plain-text report: header, one row per measurement, separators

use std::io::Write;

use crate::error::Result;
use crate::runner::Measurement;

pub const SEPARATOR: &str =
    "---------------------------------------------------------------------";

pub fn header_line() -> String {
    format!(
        "{:<18} {:<16} {:<12} {:<12}",
        "Method", "Total", "Per-iter", "NLong/NDouble"
    )
}

/// `label` (18), `total` (16, 2dp), per-iteration ns (12, 2dp), size (12)
pub fn row_line(m: &Measurement) -> String {
    format!(
        "{:<18} {:<16.2} {:<12.2} {:<12}",
        m.strategy.label(),
        m.total,
        m.per_iter_ns,
        m.size
    )
}

pub struct Report<W: Write> {
    out: W,
}

impl<W: Write> Report<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn header(&mut self) -> Result<()> {
        writeln!(self.out, "{}", header_line())?;
        writeln!(self.out, "{SEPARATOR}")?;
        Ok(())
    }

    /// Rows of one configuration followed by a separator
    pub fn configuration(&mut self, rows: &[Measurement]) -> Result<()> {
        for m in rows {
            writeln!(self.out, "{}", row_line(m))?;
        }
        writeln!(self.out, "{SEPARATOR}")?;
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::Strategy;

    fn sample(strategy: Strategy) -> Measurement {
        Measurement {
            strategy,
            total: 700000.0,
            per_iter_ns: 12.3456,
            size: "2/2".to_string(),
        }
    }

    #[test]
    fn test_header_columns() {
        let h = header_line();
        assert!(h.starts_with(&format!("{:<18} Total", "Method")));
        assert_eq!(&h[18..19], " ");
        assert_eq!(SEPARATOR.len(), 69);
    }

    #[test]
    fn test_row_layout() {
        let row = row_line(&sample(Strategy::Heap));
        assert_eq!(
            row,
            format!("{:<18} {:<16} {:<12} {:<12}", "Heap", "700000.00", "12.35", "2/2")
        );
        assert_eq!(row.len(), 18 + 1 + 16 + 1 + 12 + 1 + 12);
    }

    #[test]
    fn test_configuration_block() {
        let mut report = Report::new(Vec::new());
        report.header().unwrap();
        let rows: Vec<_> = Strategy::ALL.iter().map(|&s| sample(s)).collect();
        report.configuration(&rows).unwrap();

        let text = String::from_utf8(report.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2 + 4 + 1);
        assert_eq!(lines[1], SEPARATOR);
        assert!(lines[2].starts_with("Boxed"));
        assert!(lines[5].starts_with("Heap Offset View"));
        assert_eq!(lines[6], SEPARATOR);
    }
}
