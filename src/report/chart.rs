//! Gantt chart sinks.
//!
//! The report assembler hands one [`ChartRequest`] per policy to a
//! [`ChartSink`]. Which sink is used is a configuration choice
//! ([`ChartMode`]); the simulator never inspects its environment to
//! decide between writing files and drawing on a terminal.

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::models::{Schedule, Slice, Ticks};

/// Widest bar drawn by the terminal sink, in characters.
const TERMINAL_WIDTH: Ticks = 60;

/// A request to render one policy's timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartRequest {
    /// Chart title, e.g. "Gantt Chart - FCFS".
    pub title: String,
    /// Slices in dispatch order.
    pub slices: Vec<Slice>,
}

impl ChartRequest {
    /// Builds the request for a policy's schedule.
    pub fn for_policy(policy: &str, schedule: &Schedule) -> Self {
        Self {
            title: chart_title(policy),
            slices: schedule.slices.clone(),
        }
    }
}

/// Human-readable chart title for a policy.
pub fn chart_title(policy: &str) -> String {
    format!("Gantt Chart - {policy}")
}

/// File-system friendly stem: the title without spaces or dashes.
pub fn chart_file_stem(title: &str) -> String {
    title.replace([' ', '-'], "")
}

/// Errors produced by chart sinks.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("failed to write chart '{title}' to {path}: {source}")]
    Write {
        title: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode chart '{title}': {source}")]
    Encode {
        title: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to draw chart '{title}': {source}")]
    Draw {
        title: String,
        #[source]
        source: io::Error,
    },
}

/// Consumer of chart requests.
pub trait ChartSink {
    /// Renders or stores one chart.
    fn submit(&mut self, request: &ChartRequest) -> Result<(), ChartError>;
}

/// How charts are emitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartMode {
    /// Charts are discarded.
    #[default]
    None,
    /// One JSON file per chart.
    File,
    /// ASCII chart on standard output.
    Terminal,
}

impl ChartMode {
    /// Builds the sink for this mode, drawing terminal charts on stdout.
    /// `dir` is used by [`ChartMode::File`] only.
    pub fn sink(&self, dir: &Path) -> Box<dyn ChartSink> {
        self.sink_with_terminal(dir, io::stdout())
    }

    /// Like [`ChartMode::sink`], with terminal charts drawn to `terminal`.
    pub fn sink_with_terminal<W: Write + 'static>(
        &self,
        dir: &Path,
        terminal: W,
    ) -> Box<dyn ChartSink> {
        match self {
            ChartMode::None => Box::new(NullChartSink),
            ChartMode::File => Box::new(FileChartSink::new(dir)),
            ChartMode::Terminal => Box::new(TerminalChartSink::new(terminal)),
        }
    }
}

impl fmt::Display for ChartMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ChartMode::None => "none",
            ChartMode::File => "file",
            ChartMode::Terminal => "terminal",
        })
    }
}

/// Error returned when a chart mode name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown chart mode '{0}' (expected none, file or terminal)")]
pub struct UnknownChartMode(pub String);

impl FromStr for ChartMode {
    type Err = UnknownChartMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "off" => Ok(ChartMode::None),
            "file" => Ok(ChartMode::File),
            "terminal" | "tty" => Ok(ChartMode::Terminal),
            _ => Err(UnknownChartMode(s.to_string())),
        }
    }
}

/// Discards every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullChartSink;

impl ChartSink for NullChartSink {
    fn submit(&mut self, _request: &ChartRequest) -> Result<(), ChartError> {
        Ok(())
    }
}

/// Writes each request as `<dir>/<stem>.json`.
#[derive(Debug, Clone)]
pub struct FileChartSink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl FileChartSink {
    /// Creates a sink writing into `dir` (created on first write).
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: Vec::new(),
        }
    }

    /// Paths written so far.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl ChartSink for FileChartSink {
    fn submit(&mut self, request: &ChartRequest) -> Result<(), ChartError> {
        let path = self
            .dir
            .join(format!("{}.json", chart_file_stem(&request.title)));
        let write_err = |source| ChartError::Write {
            title: request.title.clone(),
            path: path.clone(),
            source,
        };

        let json = serde_json::to_string_pretty(request).map_err(|source| ChartError::Encode {
            title: request.title.clone(),
            source,
        })?;
        fs::create_dir_all(&self.dir).map_err(write_err)?;
        fs::write(&path, json).map_err(write_err)?;

        info!(path = %path.display(), "saved Gantt chart");
        self.written.push(path);
        Ok(())
    }
}

/// Draws ASCII Gantt charts to a writer.
///
/// One row per slice, one character per tick (scaled down for long
/// timelines).
#[derive(Debug)]
pub struct TerminalChartSink<W: Write> {
    out: W,
}

impl<W: Write> TerminalChartSink<W> {
    /// Creates a sink drawing to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn draw(&mut self, request: &ChartRequest) -> io::Result<()> {
        let makespan = request.slices.iter().map(|s| s.end).max().unwrap_or(0);
        let scale = ceil_div(makespan, TERMINAL_WIDTH).max(1);
        let label_width = request
            .slices
            .iter()
            .map(|s| s.pid.to_string().len() + 1)
            .max()
            .unwrap_or(2);

        writeln!(self.out, "{}", request.title)?;
        for slice in &request.slices {
            let offset = (slice.start / scale) as usize;
            let width = ceil_div(slice.end - slice.start, scale).max(1) as usize;
            writeln!(
                self.out,
                "{:>label_width$} |{}{} {}-{}",
                format!("P{}", slice.pid),
                " ".repeat(offset),
                "#".repeat(width),
                slice.start,
                slice.end,
            )?;
        }
        writeln!(self.out, "{:>label_width$} +{}> t", "", "-".repeat((makespan / scale) as usize))?;
        writeln!(self.out)
    }
}

fn ceil_div(a: Ticks, b: Ticks) -> Ticks {
    a / b + Ticks::from(a % b != 0)
}

impl<W: Write> ChartSink for TerminalChartSink<W> {
    fn submit(&mut self, request: &ChartRequest) -> Result<(), ChartError> {
        self.draw(request).map_err(|source| ChartError::Draw {
            title: request.title.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn sample_request() -> ChartRequest {
        let mut schedule = Schedule::new();
        schedule.push(1, 0, 3);
        schedule.push(2, 3, 5);
        ChartRequest::for_policy("Round Robin", &schedule)
    }

    #[test]
    fn test_title_and_stem() {
        let title = chart_title("Round Robin");
        assert_eq!(title, "Gantt Chart - Round Robin");
        assert_eq!(chart_file_stem(&title), "GanttChartRoundRobin");
    }

    #[test]
    fn test_file_sink_writes_json() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = FileChartSink::new(dir.path().join("charts"));
        let request = sample_request();

        sink.submit(&request).unwrap();

        let path = dir.path().join("charts").join("GanttChartRoundRobin.json");
        assert_eq!(sink.written(), &[path.clone()]);
        let decoded: ChartRequest =
            serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(decoded, request);
    }

    #[test]
    fn test_terminal_sink_draws_rows() {
        let mut sink = TerminalChartSink::new(Vec::new());
        sink.submit(&sample_request()).unwrap();
        let text = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Gantt Chart - Round Robin");
        assert_eq!(lines[1], "P1 |### 0-3");
        assert_eq!(lines[2], "P2 |   ## 3-5");
    }

    #[test]
    fn test_terminal_sink_scales_long_timelines() {
        let mut schedule = Schedule::new();
        schedule.push(1, 0, 120);
        let request = ChartRequest::for_policy("FCFS", &schedule);
        let mut sink = TerminalChartSink::new(Vec::new());
        sink.submit(&request).unwrap();
        let text = String::from_utf8(sink.into_inner()).unwrap();

        let bar = text.lines().nth(1).unwrap();
        assert_eq!(bar.matches('#').count(), 60);
    }

    #[derive(Clone, Default)]
    struct SharedBuf(Rc<RefCell<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_terminal_mode_uses_given_writer() {
        let buf = SharedBuf::default();
        let dir = tempfile::tempdir().unwrap();
        let mut sink = ChartMode::Terminal.sink_with_terminal(dir.path(), buf.clone());
        sink.submit(&sample_request()).unwrap();

        let text = String::from_utf8(buf.0.borrow().clone()).unwrap();
        assert!(text.starts_with("Gantt Chart - Round Robin\n"));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_chart_mode_parse() {
        assert_eq!("file".parse::<ChartMode>().unwrap(), ChartMode::File);
        assert_eq!("Terminal".parse::<ChartMode>().unwrap(), ChartMode::Terminal);
        assert_eq!("none".parse::<ChartMode>().unwrap(), ChartMode::None);
        assert!("png".parse::<ChartMode>().is_err());
    }
}
