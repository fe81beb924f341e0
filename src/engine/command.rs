//! Engine run as a child process.
//!
//! The canonical request is written to the child's stdin as JSON; a zero exit
//! status makes stdout the result.

use std::process::Stdio;

use futures_util::future::BoxFuture;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::engine::{bounded, Engine, EngineError, EngineResult};
use crate::normalize::CanonicalRequest;

/// Spawns one engine process per request.
#[derive(Debug, Clone)]
pub struct CommandEngine {
    program: String,
    args: Vec<String>,
    timeout_secs: Option<u64>,
}

impl CommandEngine {
    pub fn new(program: impl Into<String>, args: Vec<String>, timeout_secs: Option<u64>) -> Self {
        Self {
            program: program.into(),
            args,
            timeout_secs,
        }
    }

    async fn call(&self, request: CanonicalRequest) -> EngineResult<String> {
        let input = serde_json::to_vec(&request)?;

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(EngineError::Process)?;

        // Feed stdin concurrently so a chatty child cannot fill its stdout pipe
        // while we are still blocked writing. The pipe closes when the task ends.
        let writer = child.stdin.take().map(|mut stdin| {
            tokio::spawn(async move {
                if let Err(e) = stdin.write_all(&input).await {
                    tracing::debug!(error = %e, "Engine process closed stdin early");
                }
            })
        });

        let output = child.wait_with_output().await.map_err(EngineError::Process)?;
        if let Some(writer) = writer {
            let _ = writer.await;
        }

        if !output.status.success() {
            let status = output
                .status
                .code()
                .map_or_else(|| "signal".to_string(), |code| code.to_string());
            return Err(EngineError::Exit {
                status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        String::from_utf8(output.stdout).map_err(|_| EngineError::InvalidOutput)
    }
}

impl Engine for CommandEngine {
    fn name(&self) -> &'static str {
        "command"
    }

    fn run(&self, request: CanonicalRequest) -> BoxFuture<'_, EngineResult<String>> {
        Box::pin(bounded(self.timeout_secs, self.call(request)))
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::normalize::Parameters;

    fn request() -> CanonicalRequest {
        CanonicalRequest {
            action_signal: "0110".into(),
            row_data: r#"[{"v":1}]"#.into(),
            parameters: Parameters {
                max_lag: Some(4),
                ..Default::default()
            },
        }
    }

    #[tokio::test]
    async fn test_stdin_round_trip() {
        let engine = CommandEngine::new("cat", vec![], Some(10));
        let out = engine.run(request()).await.unwrap();
        let echoed: CanonicalRequest = serde_json::from_str(&out).unwrap();
        assert_eq!(echoed, request());
    }

    #[tokio::test]
    async fn test_non_zero_exit() {
        let engine = CommandEngine::new(
            "sh",
            vec!["-c".into(), "echo 'bins out of range' >&2; exit 3".into()],
            Some(10),
        );
        match engine.run(request()).await {
            Err(EngineError::Exit { status, stderr }) => {
                assert_eq!(status, "3");
                assert_eq!(stderr, "bins out of range");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_program() {
        let engine = CommandEngine::new("/nonexistent/engine-bin", vec![], None);
        let err = engine.run(request()).await.unwrap_err();
        assert!(matches!(err, EngineError::Process(_)));
    }

    #[tokio::test]
    async fn test_timeout_kills_child() {
        let engine = CommandEngine::new("sleep", vec!["5".into()], Some(1));
        let err = engine.run(request()).await.unwrap_err();
        assert!(matches!(err, EngineError::Timeout(1)));
    }
}
