//! Plot sinks that consume time/value curves.
//!
//! The drivers never render anything themselves. They hand each curve to a
//! [`PlotSink`], grouped into figures: `begin_figure`, one `plot` call per
//! curve, then `show`.
//!
//! Two sinks are provided:
//!
//! - [`CsvSink`] writes long-format rows `figure,series,style,time,value`
//!   to any writer, ready for an external plotting tool
//! - [`RecordingSink`] keeps the curves in memory

use rkstep_core::types::Scalar;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Consumer of the curves produced by a study.
pub trait PlotSink<T: Scalar> {
    /// Starts a new figure.
    fn begin_figure(&mut self, title: &str) -> io::Result<()>;

    /// Adds one curve to the current figure.
    ///
    /// `times` and `values` have the same length.
    fn plot(&mut self, label: &str, times: &[T], values: &[T], style: &str) -> io::Result<()>;

    /// Completes the current figure.
    fn show(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Header row written by [`CsvSink`].
pub const CSV_HEADER: &str = "figure,series,style,time,value";

/// Writes curves as CSV rows.
#[derive(Debug)]
pub struct CsvSink<W: Write> {
    writer: W,
    figure: String,
}

impl CsvSink<BufWriter<File>> {
    /// Creates `path` and writes the header row.
    pub fn create<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = File::create(path)?;
        Self::new(BufWriter::new(file))
    }
}

impl<W: Write> CsvSink<W> {
    /// Wraps a writer and writes the header row.
    pub fn new(mut writer: W) -> io::Result<Self> {
        writeln!(writer, "{}", CSV_HEADER)?;
        Ok(Self {
            writer,
            figure: String::new(),
        })
    }

    /// Flushes and returns the underlying writer.
    pub fn into_inner(mut self) -> io::Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<T: Scalar, W: Write> PlotSink<T> for CsvSink<W> {
    fn begin_figure(&mut self, title: &str) -> io::Result<()> {
        self.figure = csv_field(title);
        Ok(())
    }

    fn plot(&mut self, label: &str, times: &[T], values: &[T], style: &str) -> io::Result<()> {
        if times.len() != values.len() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "curve '{}' has {} times but {} values",
                    label,
                    times.len(),
                    values.len()
                ),
            ));
        }

        let label = csv_field(label);
        let style = csv_field(style);
        for (t, v) in times.iter().zip(values) {
            writeln!(self.writer, "{},{},{},{},{}", self.figure, label, style, t, v)?;
        }
        Ok(())
    }

    fn show(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

fn csv_field(text: &str) -> String {
    if text.contains([',', '"', '\n']) {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_string()
    }
}

/// A curve captured by [`RecordingSink`].
#[derive(Debug, Clone, PartialEq)]
pub struct Curve<T> {
    /// Series label, e.g. `N=20`
    pub label: String,
    /// Line style passed to `plot`
    pub style: String,
    /// Time points
    pub times: Vec<T>,
    /// State values, one per time point
    pub values: Vec<T>,
}

/// A figure captured by [`RecordingSink`].
#[derive(Debug, Clone, PartialEq)]
pub struct Figure<T> {
    /// Title passed to `begin_figure`
    pub title: String,
    /// Curves in plotting order
    pub curves: Vec<Curve<T>>,
    /// Whether `show` was called for this figure
    pub shown: bool,
}

/// Keeps every curve in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink<T> {
    /// Figures in the order they were begun
    pub figures: Vec<Figure<T>>,
}

impl<T> RecordingSink<T> {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self {
            figures: Vec::new(),
        }
    }
}

impl<T: Scalar> PlotSink<T> for RecordingSink<T> {
    fn begin_figure(&mut self, title: &str) -> io::Result<()> {
        self.figures.push(Figure {
            title: title.to_string(),
            curves: Vec::new(),
            shown: false,
        });
        Ok(())
    }

    fn plot(&mut self, label: &str, times: &[T], values: &[T], style: &str) -> io::Result<()> {
        let figure = self.figures.last_mut().ok_or_else(|| {
            io::Error::new(io::ErrorKind::Other, "plot called before begin_figure")
        })?;
        figure.curves.push(Curve {
            label: label.to_string(),
            style: style.to_string(),
            times: times.to_vec(),
            values: values.to_vec(),
        });
        Ok(())
    }

    fn show(&mut self) -> io::Result<()> {
        if let Some(figure) = self.figures.last_mut() {
            figure.shown = true;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_csv_rows() {
        let mut sink = CsvSink::new(Vec::new()).unwrap();
        PlotSink::<f64>::begin_figure(&mut sink, "Euler").unwrap();
        sink.plot("N=2", &[0.0, 1.0], &[0.5, 0.25], "r").unwrap();
        PlotSink::<f64>::show(&mut sink).unwrap();

        let text = String::from_utf8(sink.into_inner().unwrap()).unwrap();
        assert_eq!(
            text,
            "figure,series,style,time,value\nEuler,N=2,r,0,0.5\nEuler,N=2,r,1,0.25\n"
        );
    }

    #[test]
    fn test_csv_quotes_fields() {
        assert_eq!(csv_field("RK2 (midpoint)"), "RK2 (midpoint)");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_csv_rejects_mismatched_curve() {
        let mut sink = CsvSink::new(Vec::new()).unwrap();
        let err = sink.plot("bad", &[0.0, 1.0], &[0.0], "b").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_recording_sink() {
        let mut sink = RecordingSink::new();
        sink.begin_figure("RK4").unwrap();
        sink.plot("N=3", &[0.0, 0.5, 1.0], &[1.0, 2.0, 3.0], "b").unwrap();
        sink.show().unwrap();

        assert_eq!(sink.figures.len(), 1);
        assert!(sink.figures[0].shown);
        assert_eq!(sink.figures[0].curves[0].values, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_recording_sink_requires_figure() {
        let mut sink = RecordingSink::<f64>::new();
        assert!(sink.plot("orphan", &[0.0], &[0.0], "r").is_err());
    }
}
