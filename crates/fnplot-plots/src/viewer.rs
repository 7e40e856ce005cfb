//! Handing rendered frames to an interactive viewer.
//!
//! A [`Viewer`] takes ownership of a rendered [`Frame`] and returns a
//! [`ViewerSession`]. The session owns everything the viewer needed: the
//! temporary directory holding the image and the spawned viewer process.
//! Closing or dropping the session stops a viewer that is still running and
//! removes its frame. Openers such as `xdg-open` hand the file to another
//! program and exit at once; their frames are left on disk for that program.

use fnplot_common::{PlotError, Result};
use fnplot_config::ViewerSettings;
use parking_lot::Mutex;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use tempfile::TempDir;
use tracing::{debug, info, warn};

/// A rendered PNG frame ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Window title.
    pub title: String,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Encoded PNG image.
    pub png: Vec<u8>,
}

/// Displays frames.
pub trait Viewer: Send + Sync {
    /// Opens a new session showing `frame`.
    fn open(&self, frame: Frame) -> Result<ViewerSession>;
}

/// Resources backing one displayed frame.
#[must_use = "dropping the session stops its viewer"]
pub struct ViewerSession {
    title: String,
    image_path: Option<PathBuf>,
    child: Option<Child>,
    dir: Option<TempDir>,
    open: bool,
}

impl ViewerSession {
    /// A session that owns no native resources.
    pub fn detached(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            image_path: None,
            child: None,
            dir: None,
            open: true,
        }
    }

    fn with_resources(title: String, dir: TempDir, image_path: PathBuf, child: Option<Child>) -> Self {
        Self {
            title,
            image_path: Some(image_path),
            child,
            dir: Some(dir),
            open: true,
        }
    }

    /// Title of the displayed frame.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Location of the frame on disk while the session is open.
    pub fn image_path(&self) -> Option<&Path> {
        self.image_path.as_deref()
    }

    /// Whether a viewer process was launched for this session.
    pub fn has_process(&self) -> bool {
        self.child.is_some()
    }

    /// Whether the session has not been closed yet.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Stops the viewer if it is still running and removes the frame.
    ///
    /// If the launched program has already exited it handed the frame on,
    /// so the frame is kept for whoever displays it now.
    pub fn close(mut self) -> Result<()> {
        self.release()
    }

    fn release(&mut self) -> Result<()> {
        if !self.open {
            return Ok(());
        }
        self.open = false;

        let mut handed_off = false;
        if let Some(mut child) = self.child.take() {
            match child.try_wait()? {
                Some(status) => {
                    debug!(pid = child.id(), %status, "Viewer exited, keeping frame");
                    handed_off = true;
                }
                None => {
                    debug!(pid = child.id(), "Stopping viewer process");
                    child.kill()?;
                    child.wait()?;
                }
            }
        }
        self.image_path = None;
        if let Some(dir) = self.dir.take() {
            if handed_off {
                #[allow(deprecated)]
                let kept = dir.into_path();
                debug!(path = %kept.display(), "Frame left for detached viewer");
            } else {
                dir.close()?;
            }
        }
        Ok(())
    }
}

impl Drop for ViewerSession {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            warn!(title = %self.title, error = %e, "Failed to release viewer session");
        }
    }
}

impl fmt::Debug for ViewerSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewerSession")
            .field("title", &self.title)
            .field("image_path", &self.image_path)
            .field("pid", &self.child.as_ref().map(Child::id))
            .field("open", &self.open)
            .finish()
    }
}

/// Opens frames with a desktop image viewer.
///
/// The frame is written as a PNG into a fresh temporary directory and the
/// configured command, or the platform opener, is launched with its path.
#[derive(Debug, Clone)]
pub struct SystemViewer {
    enabled: bool,
    command: Vec<String>,
}

impl SystemViewer {
    /// Creates a viewer from settings.
    pub fn new(settings: &ViewerSettings) -> Self {
        let command = match &settings.command {
            Some(command) if !command.is_empty() => command.clone(),
            _ => platform_opener(),
        };
        Self {
            enabled: settings.enabled,
            command,
        }
    }

    /// Program and leading arguments; the frame path is appended.
    pub fn command(&self) -> &[String] {
        &self.command
    }

    /// Whether frames are handed to the command or only written to disk.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn launch(&self, path: &Path) -> Result<Child> {
        let (program, args) = self
            .command
            .split_first()
            .ok_or_else(|| PlotError::viewer("viewer command is empty"))?;
        Command::new(program)
            .args(args)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| PlotError::viewer_with_source(format!("failed to launch '{program}'"), e))
    }
}

impl Default for SystemViewer {
    fn default() -> Self {
        Self::new(&ViewerSettings::default())
    }
}

impl Viewer for SystemViewer {
    fn open(&self, frame: Frame) -> Result<ViewerSession> {
        let dir = tempfile::Builder::new().prefix("fnplot-").tempdir()?;
        let image_path = dir.path().join(file_name(&frame.title));
        fs::write(&image_path, &frame.png)?;

        let child = if self.enabled {
            let child = self.launch(&image_path)?;
            info!(title = %frame.title, pid = child.id(), path = %image_path.display(), "Opened viewer");
            Some(child)
        } else {
            debug!(path = %image_path.display(), "Viewer disabled, frame rendered only");
            None
        };

        Ok(ViewerSession::with_resources(frame.title, dir, image_path, child))
    }
}

fn platform_opener() -> Vec<String> {
    let command: &[&str] = if cfg!(target_os = "windows") {
        &["cmd", "/C", "start", ""]
    } else if cfg!(target_os = "macos") {
        &["open"]
    } else {
        &["xdg-open"]
    };
    command.iter().map(|s| s.to_string()).collect()
}

/// File name for a frame, derived from its title.
fn file_name(title: &str) -> String {
    let stem: String = title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .take(64)
        .collect();
    if stem.trim_matches('_').is_empty() {
        "plot.png".to_string()
    } else {
        format!("{stem}.png")
    }
}

/// The viewer a plot opens frames with.
///
/// The system viewer follows the plot's settings; a custom one is kept when
/// settings change.
#[derive(Clone)]
pub(crate) enum ViewerSlot {
    System(SystemViewer),
    Custom(Arc<dyn Viewer>),
}

impl ViewerSlot {
    pub(crate) fn from_settings(settings: &ViewerSettings) -> Self {
        Self::System(SystemViewer::new(settings))
    }

    pub(crate) fn reconfigure(&mut self, settings: &ViewerSettings) {
        if let Self::System(viewer) = self {
            *viewer = SystemViewer::new(settings);
        }
    }

    pub(crate) fn open(&self, frame: Frame) -> Result<ViewerSession> {
        match self {
            Self::System(viewer) => viewer.open(frame),
            Self::Custom(viewer) => viewer.open(frame),
        }
    }
}

/// Keeps frames in memory instead of displaying them.
#[derive(Debug, Clone, Default)]
pub struct MemoryViewer {
    frames: Arc<Mutex<Vec<Frame>>>,
}

impl MemoryViewer {
    /// Creates an empty viewer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames opened so far, oldest first.
    pub fn frames(&self) -> Vec<Frame> {
        self.frames.lock().clone()
    }

    /// Number of frames opened so far.
    pub fn len(&self) -> usize {
        self.frames.lock().len()
    }

    /// Whether no frame has been opened.
    pub fn is_empty(&self) -> bool {
        self.frames.lock().is_empty()
    }
}

impl Viewer for MemoryViewer {
    fn open(&self, frame: Frame) -> Result<ViewerSession> {
        let session = ViewerSession::detached(frame.title.clone());
        self.frames.lock().push(frame);
        Ok(session)
    }
}
