//! Invocations of the Dazzler dump tools and the sources that run them.

use crate::libs::error::{DumpError, Result};
use std::fmt;
use std::io::{self, BufRead, BufReader, Read};
use std::process::{Child, ChildStdout, Command, ExitStatus, Stdio};
use std::sync::atomic::{AtomicUsize, Ordering};

/// The read database and the self-alignment file the dumps are taken from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handles {
    /// DAZZ_DB `.db` file
    pub db: String,
    /// `TAN.*.las` file produced by datander
    pub las: String,
    /// Mask track holding the tandem repeat intervals
    pub track: String,
}

impl Handles {
    pub fn new(db: &str, las: &str) -> Self {
        Self {
            db: db.to_string(),
            las: las.to_string(),
            track: "tan".to_string(),
        }
    }

    pub fn with_track(mut self, track: &str) -> Self {
        self.track = track.to_string();
        self
    }
}

/// An inclusive range of read IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadRange {
    pub start: u64,
    pub end: u64,
}

impl ReadRange {
    pub fn new(start: u64, end: u64) -> Result<Self> {
        if start > end {
            return Err(DumpError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn single(id: u64) -> Self {
        Self { start: id, end: id }
    }

    pub fn contains(&self, id: u64) -> bool {
        self.start <= id && id <= self.end
    }
}

impl fmt::Display for ReadRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    TandemRepeats,
    Alignments,
    Paths,
}

/// A fully formed external tool call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub kind: QueryKind,
    pub program: String,
    pub args: Vec<String>,
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// `DBdump -r -h -m<track> <db> <range>`
///
/// ```
/// use trdump::libs::command::{tr_dump, Handles, ReadRange};
/// let handles = Handles::new("reads.db", "TAN.reads.las");
/// let inv = tr_dump(&handles, ReadRange::new(1, 100).unwrap());
/// assert_eq!(inv.to_string(), "DBdump -r -h -mtan reads.db 1-100");
/// ```
pub fn tr_dump(handles: &Handles, range: ReadRange) -> Invocation {
    Invocation {
        kind: QueryKind::TandemRepeats,
        program: "DBdump".to_string(),
        args: vec![
            "-r".to_string(),
            "-h".to_string(),
            format!("-m{}", handles.track),
            handles.db.clone(),
            range.to_string(),
        ],
    }
}

/// `LAdump -c <db> <las> <range>`
pub fn alignment_dump(handles: &Handles, range: ReadRange) -> Invocation {
    Invocation {
        kind: QueryKind::Alignments,
        program: "LAdump".to_string(),
        args: vec![
            "-c".to_string(),
            handles.db.clone(),
            handles.las.clone(),
            range.to_string(),
        ],
    }
}

/// `LAshow4pathplot -a <db> <las> <read_id>`
pub fn path_dump(handles: &Handles, read_id: u64) -> Invocation {
    Invocation {
        kind: QueryKind::Paths,
        program: "LAshow4pathplot".to_string(),
        args: vec![
            "-a".to_string(),
            handles.db.clone(),
            handles.las.clone(),
            read_id.to_string(),
        ],
    }
}

/// Turns an invocation into a stream of dump lines.
pub trait DumpSource: Send + Sync {
    fn open(&self, invocation: &Invocation) -> Result<Box<dyn BufRead>>;
}

/// Runs the tools and streams their standard output.
#[derive(Debug, Clone, Default)]
pub struct ProcessSource;

impl DumpSource for ProcessSource {
    fn open(&self, invocation: &Invocation) -> Result<Box<dyn BufRead>> {
        let command = invocation.to_string();
        if which::which(&invocation.program).is_err() {
            return Err(DumpError::CommandFailed {
                command,
                message: format!("{} not found in PATH", invocation.program),
            });
        }

        log::debug!("Running `{}`", command);
        let mut child = Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .spawn()
            .map_err(|e| DumpError::CommandFailed {
                command: command.clone(),
                message: e.to_string(),
            })?;
        let stdout = child.stdout.take().ok_or_else(|| DumpError::CommandFailed {
            command: command.clone(),
            message: "stdout was not captured".to_string(),
        })?;

        Ok(Box::new(ChildOutput {
            command,
            child,
            stdout: BufReader::new(stdout),
            reaped: false,
        }))
    }
}

/// Carried by the read error of a tool that exited abnormally.
#[derive(Debug)]
struct ToolExit {
    command: String,
    status: ExitStatus,
}

impl fmt::Display for ToolExit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}` exited with {}", self.command, self.status)
    }
}

impl std::error::Error for ToolExit {}

/// The message of a read error raised because the tool behind the stream
/// failed or was killed; `None` for any other I/O error.
pub(crate) fn tool_exit_message(err: &io::Error) -> Option<String> {
    err.get_ref()
        .and_then(|e| e.downcast_ref::<ToolExit>())
        .map(|e| e.to_string())
}

/// Standard output of a running tool.
///
/// At end of stream the exit status is checked, so a killed or failing tool
/// shows up as an error instead of a short, silently accepted dump. Dropping
/// the stream early kills the tool.
struct ChildOutput {
    command: String,
    child: Child,
    stdout: BufReader<ChildStdout>,
    reaped: bool,
}

impl ChildOutput {
    fn check_exit(&mut self) -> io::Result<()> {
        if self.reaped {
            return Ok(());
        }
        self.reaped = true;
        let status = self.child.wait()?;
        if status.success() {
            Ok(())
        } else {
            Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                ToolExit {
                    command: self.command.clone(),
                    status,
                },
            ))
        }
    }
}

impl Read for ChildOutput {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.stdout.read(buf)?;
        if n == 0 && !buf.is_empty() {
            self.check_exit()?;
        }
        Ok(n)
    }
}

impl BufRead for ChildOutput {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        if self.stdout.fill_buf()?.is_empty() {
            self.check_exit()?;
        }
        self.stdout.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.stdout.consume(amt)
    }
}

impl Drop for ChildOutput {
    fn drop(&mut self) {
        if !self.reaped {
            let _ = self.child.kill();
            let _ = self.child.wait();
        }
    }
}

/// Serves previously saved dumps, one file per query kind.
///
/// Files may be gzipped; `stdin` reads standard input.
#[derive(Debug, Clone, Default)]
pub struct FileSource {
    pub tr_dump: Option<String>,
    pub alignment_dump: Option<String>,
    pub path_dump: Option<String>,
}

impl DumpSource for FileSource {
    fn open(&self, invocation: &Invocation) -> Result<Box<dyn BufRead>> {
        let file = match invocation.kind {
            QueryKind::TandemRepeats => &self.tr_dump,
            QueryKind::Alignments => &self.alignment_dump,
            QueryKind::Paths => &self.path_dump,
        };
        match file {
            Some(path) => {
                log::debug!("Reading {:?} dump from {} instead of `{}`", invocation.kind, path, invocation);
                crate::reader(path).map_err(DumpError::Io)
            }
            // No saved dump of this kind: an empty stream, i.e. no records
            None => {
                log::debug!("No saved {:?} dump, treating `{}` as empty", invocation.kind, invocation);
                Ok(Box::new(io::empty()))
            }
        }
    }
}

/// Serves dump text already held in memory and counts the queries it answers.
#[derive(Debug, Default)]
pub struct TextSource {
    pub tr_dump: String,
    pub alignment_dump: String,
    pub path_dump: String,
    opened: AtomicUsize,
}

impl TextSource {
    pub fn new(tr_dump: &str, alignment_dump: &str, path_dump: &str) -> Self {
        Self {
            tr_dump: tr_dump.to_string(),
            alignment_dump: alignment_dump.to_string(),
            path_dump: path_dump.to_string(),
            opened: AtomicUsize::new(0),
        }
    }

    /// Number of `open` calls so far
    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }
}

impl DumpSource for TextSource {
    fn open(&self, invocation: &Invocation) -> Result<Box<dyn BufRead>> {
        self.opened.fetch_add(1, Ordering::SeqCst);
        let text = match invocation.kind {
            QueryKind::TandemRepeats => &self.tr_dump,
            QueryKind::Alignments => &self.alignment_dump,
            QueryKind::Paths => &self.path_dump,
        };
        Ok(Box::new(io::Cursor::new(text.clone().into_bytes())))
    }
}
