use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use desk_logging::{desk_info, desk_warn};
use thiserror::Error;

const REPLY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    #[error("clipboard write failed: {0}")]
    Write(String),
}

pub trait ClipboardSink: Send + Sync {
    fn set_text(&self, text: String) -> Result<(), ClipboardError>;
}

/// A clipboard handle owned by the clipboard thread.
///
/// On X11 and Wayland the owner of a selection serves it to other programs,
/// so the handle has to outlive the write.
trait ClipboardBackend: Sized {
    fn open() -> Result<Self, ClipboardError>;
    fn write(&mut self, text: String) -> Result<(), ClipboardError>;
}

impl ClipboardBackend for arboard::Clipboard {
    fn open() -> Result<Self, ClipboardError> {
        arboard::Clipboard::new().map_err(|err| ClipboardError::Unavailable(err.to_string()))
    }

    fn write(&mut self, text: String) -> Result<(), ClipboardError> {
        self.set_text(text)
            .map_err(|err| ClipboardError::Write(err.to_string()))
    }
}

struct CopyRequest {
    text: String,
    reply: Sender<Result<(), ClipboardError>>,
}

/// The clipboard of the machine running the server.
///
/// Writes go to a dedicated thread that keeps one handle open for the life
/// of the process.
pub struct SystemClipboard {
    requests: Sender<CopyRequest>,
}

impl SystemClipboard {
    pub fn spawn() -> io::Result<Self> {
        Self::spawn_with::<arboard::Clipboard>()
    }

    fn spawn_with<B: ClipboardBackend + 'static>() -> io::Result<Self> {
        let (requests, rx) = mpsc::channel();
        thread::Builder::new()
            .name("clipboard".to_string())
            .spawn(move || serve_requests::<B>(rx))?;
        Ok(Self { requests })
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&self, text: String) -> Result<(), ClipboardError> {
        let (reply, answer) = mpsc::channel();
        self.requests
            .send(CopyRequest { text, reply })
            .map_err(|_| ClipboardError::Unavailable("clipboard thread stopped".to_string()))?;
        answer
            .recv_timeout(REPLY_TIMEOUT)
            .map_err(|_| ClipboardError::Unavailable("clipboard did not answer".to_string()))?
    }
}

fn serve_requests<B: ClipboardBackend>(rx: Receiver<CopyRequest>) {
    let mut handle: Option<B> = None;
    for request in rx {
        let result = write_text(&mut handle, request.text);
        if let Err(err) = &result {
            desk_warn!("Clipboard write failed: {}", err);
        }
        // The caller may have given up waiting.
        let _ = request.reply.send(result);
    }
    desk_info!("Clipboard thread exiting");
}

/// Opens the handle on first use and keeps it afterwards. A failed open is
/// retried on the next request.
fn write_text<B: ClipboardBackend>(
    handle: &mut Option<B>,
    text: String,
) -> Result<(), ClipboardError> {
    let mut clipboard = match handle.take() {
        Some(clipboard) => clipboard,
        None => B::open()?,
    };
    let result = clipboard.write(text);
    *handle = Some(clipboard);
    result
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    use pretty_assertions::assert_eq;

    use super::{ClipboardBackend, ClipboardError, ClipboardSink, SystemClipboard};

    static OPENED: AtomicUsize = AtomicUsize::new(0);
    static LIVE: AtomicUsize = AtomicUsize::new(0);
    static WRITTEN: Mutex<Vec<String>> = Mutex::new(Vec::new());

    /// Counts open handles so the test can see whether one outlives a write.
    struct CountingBackend;

    impl ClipboardBackend for CountingBackend {
        fn open() -> Result<Self, ClipboardError> {
            OPENED.fetch_add(1, Ordering::SeqCst);
            LIVE.fetch_add(1, Ordering::SeqCst);
            Ok(Self)
        }

        fn write(&mut self, text: String) -> Result<(), ClipboardError> {
            WRITTEN.lock().unwrap().push(text);
            Ok(())
        }
    }

    impl Drop for CountingBackend {
        fn drop(&mut self) {
            LIVE.fetch_sub(1, Ordering::SeqCst);
        }
    }

    static AVAILABLE: AtomicBool = AtomicBool::new(false);

    /// Fails to open until `AVAILABLE` is set.
    struct LateBackend;

    impl ClipboardBackend for LateBackend {
        fn open() -> Result<Self, ClipboardError> {
            if AVAILABLE.load(Ordering::SeqCst) {
                Ok(Self)
            } else {
                Err(ClipboardError::Unavailable("no display".to_string()))
            }
        }

        fn write(&mut self, _text: String) -> Result<(), ClipboardError> {
            Ok(())
        }
    }

    #[test]
    fn handle_stays_open_after_write() {
        let clipboard = SystemClipboard::spawn_with::<CountingBackend>().unwrap();

        clipboard.set_text("Dear Acme,".to_string()).unwrap();
        clipboard.set_text("Hire me.".to_string()).unwrap();

        assert_eq!(OPENED.load(Ordering::SeqCst), 1);
        assert_eq!(LIVE.load(Ordering::SeqCst), 1);
        assert_eq!(
            *WRITTEN.lock().unwrap(),
            vec!["Dear Acme,".to_string(), "Hire me.".to_string()]
        );
    }

    #[test]
    fn failed_open_is_reported_and_retried() {
        let clipboard = SystemClipboard::spawn_with::<LateBackend>().unwrap();

        let err = clipboard.set_text("x".to_string()).unwrap_err();
        assert!(matches!(err, ClipboardError::Unavailable(_)));

        AVAILABLE.store(true, Ordering::SeqCst);
        assert!(clipboard.set_text("x".to_string()).is_ok());
    }
}
