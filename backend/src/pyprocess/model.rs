use crate::config::PipelineConfig;
use crate::frame::Frame;
use crate::model::{InferenceError, PricePipeline};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::sync::Mutex;

const BRIDGE_SCRIPT: &str = include_str!("../../python/bridge.py");

#[derive(Serialize)]
struct PredictRequest<'a> {
    columns: &'a [String],
    rows: &'a [Vec<Value>],
}

#[derive(Debug, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum WorkerReply {
    Ready,
    Ok { predictions: Vec<Option<f64>> },
    Error { error: String },
}

type Launcher = Box<dyn Fn() -> Command + Send + Sync>;

struct Worker {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
}

impl Worker {
    /// Spawns a worker and waits for its ready line.
    fn start(launcher: &Launcher) -> Result<Self, InferenceError> {
        let mut child = launcher()
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(InferenceError::Spawn)?;

        let (Some(stdin), Some(stdout)) = (child.stdin.take(), child.stdout.take()) else {
            let _ = child.kill();
            return Err(InferenceError::WorkerExited);
        };
        let mut worker = Worker {
            child,
            stdin,
            stdout: BufReader::new(stdout),
        };

        match worker.read_reply()? {
            WorkerReply::Ready => Ok(worker),
            WorkerReply::Error { error } => Err(InferenceError::Load(error)),
            WorkerReply::Ok { .. } => Err(InferenceError::Protocol(
                "worker answered before it was ready".into(),
            )),
        }
    }

    /// Next reply line. Lines that are not replies are logged and skipped.
    fn read_reply(&mut self) -> Result<WorkerReply, InferenceError> {
        let mut line = String::new();
        loop {
            line.clear();
            if self.stdout.read_line(&mut line)? == 0 {
                return Err(InferenceError::WorkerExited);
            }
            let text = line.trim_end();
            if text.is_empty() {
                continue;
            }
            match serde_json::from_str(text) {
                Ok(reply) => return Ok(reply),
                Err(e) => log::warn!("Skipping pipeline worker output ({}): {}", e, text),
            }
        }
    }

    fn predict(&mut self, frame: &Frame) -> Result<Vec<f64>, InferenceError> {
        let request = PredictRequest {
            columns: &frame.columns,
            rows: &frame.rows,
        };
        let mut payload = serde_json::to_vec(&request)?;
        payload.push(b'\n');
        self.stdin.write_all(&payload)?;
        self.stdin.flush()?;

        match self.read_reply()? {
            WorkerReply::Ok { predictions } => predictions
                .into_iter()
                .enumerate()
                .map(|(row, p)| p.ok_or(InferenceError::NonFinite { row }))
                .collect(),
            WorkerReply::Error { error } => Err(InferenceError::Pipeline(error)),
            WorkerReply::Ready => Err(InferenceError::Protocol("unexpected ready reply".into())),
        }
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Worker faults after which its pipes can no longer be trusted.
fn is_worker_fault(err: &InferenceError) -> bool {
    matches!(
        err,
        InferenceError::WorkerExited | InferenceError::Io(_) | InferenceError::Protocol(_)
    )
}

/// Pricing pipeline hosted in a long-lived Python process.
///
/// The worker loads the joblib artifact once and then answers one JSON line per
/// request. Requests are serialized through the mutex. A worker that dies or
/// breaks the protocol is replaced; the request that hit the fault still fails.
pub struct PythonPipeline {
    launcher: Launcher,
    worker: Mutex<Option<Worker>>,
}

impl PythonPipeline {
    pub fn launch(config: &PipelineConfig) -> Result<Self, InferenceError> {
        log::info!(
            "Starting pipeline worker: {} (artifact {})",
            config.interpreter,
            config.artifact.display()
        );
        let interpreter = config.interpreter.clone();
        let artifact = config.artifact.clone();
        Self::spawn(move || {
            let mut command = Command::new(&interpreter);
            command.arg("-u").arg("-c").arg(BRIDGE_SCRIPT).arg(&artifact);
            command
        })
    }

    /// Starts the first worker from `launcher`; restarts reuse it.
    pub(crate) fn spawn<F>(launcher: F) -> Result<Self, InferenceError>
    where
        F: Fn() -> Command + Send + Sync + 'static,
    {
        let launcher: Launcher = Box::new(launcher);
        let worker = Worker::start(&launcher)?;
        Ok(Self {
            launcher,
            worker: Mutex::new(Some(worker)),
        })
    }
}

impl PricePipeline for PythonPipeline {
    fn predict(&self, frame: &Frame) -> Result<Vec<f64>, InferenceError> {
        let mut slot = self.worker.lock().map_err(|_| InferenceError::Poisoned)?;
        if slot.is_none() {
            log::info!("Restarting pipeline worker");
            *slot = Some(Worker::start(&self.launcher)?);
        }
        let Some(worker) = slot.as_mut() else {
            return Err(InferenceError::WorkerExited);
        };

        let result = worker.predict(frame);
        if let Err(e) = &result {
            if is_worker_fault(e) {
                log::warn!("Pipeline worker failed, restarting: {}", e);
                *slot = None;
                match Worker::start(&self.launcher) {
                    Ok(fresh) => *slot = Some(fresh),
                    Err(restart) => log::error!("Failed to restart pipeline worker: {}", restart),
                }
            }
        }
        result
    }
}
