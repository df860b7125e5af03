use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use desk_logging::{desk_info, desk_warn};
use serde_json::Value;

use crate::{EngineEvent, Generator, JobId};

enum EngineCommand {
    Submit {
        job_id: JobId,
        endpoint: String,
        body: Value,
    },
}

/// Runs submissions on a dedicated runtime thread and reports completions.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Mutex<mpsc::Receiver<EngineEvent>>,
}

impl EngineHandle {
    pub fn new(generator: Arc<dyn Generator>) -> std::io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("letterdesk-engine")
            .enable_all()
            .build()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let generator = generator.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(generator.as_ref(), command, event_tx).await;
                });
            }
        });

        Ok(Self {
            cmd_tx,
            event_rx: Mutex::new(event_rx),
        })
    }

    pub fn submit(&self, job_id: JobId, endpoint: impl Into<String>, body: Value) {
        let _ = self.cmd_tx.send(EngineCommand::Submit {
            job_id,
            endpoint: endpoint.into(),
            body,
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }

    /// Waits up to `timeout` for the next event.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    generator: &dyn Generator,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Submit {
            job_id,
            endpoint,
            body,
        } => {
            let result = generator.generate(&endpoint, &body).await;
            match &result {
                Ok(_) => desk_info!("Job {} generated a document", job_id),
                Err(err) => desk_warn!("Job {} failed: {}", job_id, err),
            }
            let _ = event_tx.send(EngineEvent::GenerationCompleted { job_id, result });
        }
    }
}
