//! File selection for restores
//!
//! A `FileChooser` hands out one session per restore. The session is the
//! pending file operation: it exists from the moment the restore starts
//! until it is detached, which `PendingSelection` does exactly once when it
//! goes out of scope.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

/// Kind of file a chooser should offer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcceptFilter {
    /// Accepted file extensions, without the dot
    pub extensions: &'static [&'static str],
    pub mime_type: &'static str,
    pub multiple: bool,
}

/// A single JSON document
pub const JSON_FILE: AcceptFilter = AcceptFilter {
    extensions: &["json"],
    mime_type: "application/json",
    multiple: false,
};

impl AcceptFilter {
    /// Whether `path` has one of the accepted extensions
    pub fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.extensions
                    .iter()
                    .any(|accepted| accepted.eq_ignore_ascii_case(ext))
            })
    }
}

/// What the user did with the chooser
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Chosen(PathBuf),
    Dismissed,
}

/// Something that can ask the user for a file
pub trait FileChooser {
    /// Per-call chooser state, owned by exactly one restore
    type Session;

    /// Create the chooser for one selection
    fn attach(&mut self, accept: &AcceptFilter) -> Self::Session;

    /// Show the chooser and wait for the user's decision
    ///
    /// `Err` means the chooser could not be presented at all.
    fn present(&mut self, session: &mut Self::Session) -> Result<Selection, String>;

    /// Tear the chooser down
    fn detach(&mut self, session: Self::Session);
}

/// An attached chooser session that detaches itself when dropped
pub(crate) struct PendingSelection<'c, C: FileChooser> {
    chooser: &'c mut C,
    session: Option<C::Session>,
}

impl<'c, C: FileChooser> PendingSelection<'c, C> {
    pub(crate) fn attach(chooser: &'c mut C, accept: &AcceptFilter) -> Self {
        let session = chooser.attach(accept);
        Self {
            chooser,
            session: Some(session),
        }
    }

    pub(crate) fn present(&mut self) -> Result<Selection, String> {
        match self.session.as_mut() {
            Some(session) => self.chooser.present(session),
            None => Err("file chooser was already detached".to_string()),
        }
    }
}

impl<C: FileChooser> Drop for PendingSelection<'_, C> {
    fn drop(&mut self) {
        if let Some(session) = self.session.take() {
            self.chooser.detach(session);
        }
    }
}

/// Chooser whose answer is already known, e.g. a path given on the command line
#[derive(Debug, Clone, Default)]
pub struct PathChooser {
    path: Option<PathBuf>,
}

impl PathChooser {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// A chooser that is always dismissed
    pub fn none() -> Self {
        Self { path: None }
    }
}

impl FileChooser for PathChooser {
    type Session = ();

    fn attach(&mut self, _accept: &AcceptFilter) {}

    fn present(&mut self, _session: &mut ()) -> Result<Selection, String> {
        Ok(match &self.path {
            Some(path) => Selection::Chosen(path.clone()),
            None => Selection::Dismissed,
        })
    }

    fn detach(&mut self, _session: ()) {}
}

/// Interactive chooser that asks for a path on a terminal
///
/// An empty answer or end of input dismisses the chooser. Paths that don't
/// match the accept filter are refused and the question is asked again.
pub struct PromptChooser<R, W> {
    input: R,
    output: W,
}

/// State of one prompt
#[derive(Debug)]
pub struct PromptSession {
    accept: AcceptFilter,
}

impl<R: BufRead, W: Write> PromptChooser<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, accept: &AcceptFilter) -> std::io::Result<Selection> {
        let pattern = accept
            .extensions
            .iter()
            .map(|ext| format!("*.{}", ext))
            .collect::<Vec<_>>()
            .join(", ");

        loop {
            write!(
                self.output,
                "Backup file ({}), leave empty to cancel: ",
                pattern
            )?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                return Ok(Selection::Dismissed);
            }

            let answer = line.trim();
            if answer.is_empty() {
                return Ok(Selection::Dismissed);
            }

            let path = PathBuf::from(answer);
            if accept.accepts(&path) {
                return Ok(Selection::Chosen(path));
            }
            writeln!(self.output, "'{}' is not a {} file.", answer, pattern)?;
        }
    }
}

impl<R: BufRead, W: Write> FileChooser for PromptChooser<R, W> {
    type Session = PromptSession;

    fn attach(&mut self, accept: &AcceptFilter) -> PromptSession {
        PromptSession { accept: *accept }
    }

    fn present(&mut self, session: &mut PromptSession) -> Result<Selection, String> {
        self.ask(&session.accept)
            .map_err(|e| format!("terminal unavailable: {}", e))
    }

    fn detach(&mut self, _session: PromptSession) {
        let _ = self.output.flush();
    }
}
