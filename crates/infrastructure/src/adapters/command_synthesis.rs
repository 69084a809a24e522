//! Command-line synthesis engine
//!
//! Speaks each utterance by running an external TTS program such as
//! `espeak-ng` or `say`, one process per utterance. The argument template
//! may reference `{text}`, `{locale}`, `{language}`, `{rate}` and `{pitch}`.
//!
//! # Example
//!
//! ```toml
//! [speech]
//! engine = "command"
//!
//! [speech.command]
//! program = "espeak-ng"
//! args = ["-v", "{language}", "-s", "{rate}", "-p", "{pitch}", "{text}"]
//! ```

use std::process::Stdio;

use application::error::ApplicationError;
use application::ports::{CompletionSink, SynthesisPort, Utterance};
use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::process::Command;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};

use crate::config::CommandEngineConfig;

/// Engine backed by an external program
pub struct CommandSynthesisEngine {
    config: CommandEngineConfig,
    current: Mutex<Option<JoinHandle<()>>>,
}

impl std::fmt::Debug for CommandSynthesisEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandSynthesisEngine")
            .field("program", &self.config.program)
            .finish_non_exhaustive()
    }
}

impl CommandSynthesisEngine {
    #[must_use]
    pub fn new(config: CommandEngineConfig) -> Self {
        Self {
            config,
            current: Mutex::new(None),
        }
    }

    /// Expand the argument template for one utterance
    #[must_use]
    pub fn render_args(&self, utterance: &Utterance) -> Vec<String> {
        let rate = scale(self.config.base_rate, utterance.speed.value()).to_string();
        let pitch = scale(self.config.base_pitch, utterance.pitch.value()).to_string();

        self.config
            .args
            .iter()
            .map(|arg| {
                // text goes last so placeholders inside it stay literal
                arg.replace("{locale}", utterance.locale.language_tag())
                    .replace("{language}", utterance.locale.language())
                    .replace("{rate}", &rate)
                    .replace("{pitch}", &pitch)
                    .replace("{text}", &utterance.text)
            })
            .collect()
    }

    fn command(&self, args: &[String]) -> Command {
        let mut cmd = Command::new(&self.config.program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn scale(base: u32, factor: f32) -> u32 {
    (f64::from(base) * f64::from(factor)).round().max(0.0) as u32
}

#[async_trait]
impl SynthesisPort for CommandSynthesisEngine {
    /// Check that the program can be started at all
    async fn initialize(&self) -> Result<(), ApplicationError> {
        let check = Command::new(&self.config.program)
            .arg("--help")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await;

        match check {
            Ok(_) => {
                info!(program = %self.config.program, "Command TTS engine initialized");
                Ok(())
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(ApplicationError::Synthesis(
                format!("'{}' not found. Please install it.", self.config.program),
            )),
            Err(e) => Err(ApplicationError::Synthesis(format!(
                "Failed to run '{}': {e}",
                self.config.program
            ))),
        }
    }

    #[instrument(skip(self, utterance, completion), fields(utterance_id = %utterance.id, text_len = utterance.text.len()))]
    fn speak(
        &self,
        utterance: Utterance,
        completion: CompletionSink,
    ) -> Result<(), ApplicationError> {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| ApplicationError::Internal(format!("No async runtime: {e}")))?;

        let args = self.render_args(&utterance);
        let mut cmd = self.command(&args);
        debug!("Running TTS command: {:?}", cmd);

        let id = utterance.id;
        let handle = runtime.spawn(async move {
            match cmd.output().await {
                Ok(output) if output.status.success() => completion.done(id),
                Ok(output) => {
                    let stderr = String::from_utf8_lossy(&output.stderr);
                    let stderr = stderr.trim();
                    error!("TTS command failed: {}", stderr);
                    let reason = if stderr.is_empty() {
                        format!("TTS command exited with status {}", output.status)
                    } else {
                        stderr.to_string()
                    };
                    completion.failed(id, reason);
                },
                Err(e) => {
                    error!(error = %e, "Failed to run TTS command");
                    completion.failed(id, format!("Failed to run TTS command: {e}"));
                },
            }
        });

        if let Some(previous) = self.current.lock().replace(handle) {
            warn!("Previous TTS command still running, abandoning it");
            previous.abort();
        }
        Ok(())
    }

    /// Abort the running command; the child is killed when its future drops
    fn stop(&self) {
        if let Some(handle) = self.current.lock().take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use application::ports::SpeakOutcome;
    use domain::{Prosody, SpeechLocale, UtteranceId};

    use super::*;

    fn utterance(text: &str, speed: f32, pitch: f32) -> Utterance {
        Utterance {
            id: UtteranceId::new(),
            text: text.to_string(),
            speed: Prosody::clamped(speed),
            pitch: Prosody::clamped(pitch),
            locale: SpeechLocale::detect(text),
        }
    }

    fn engine(program: &str, args: &[&str]) -> CommandSynthesisEngine {
        CommandSynthesisEngine::new(CommandEngineConfig {
            program: program.to_string(),
            args: args.iter().map(ToString::to_string).collect(),
            ..CommandEngineConfig::default()
        })
    }

    #[test]
    fn default_template_renders_espeak_arguments() {
        let engine = CommandSynthesisEngine::new(CommandEngineConfig::default());
        let args = engine.render_args(&utterance("สวัสดี", 2.0, 0.5));
        assert_eq!(args, vec!["-v", "th", "-s", "350", "-p", "25", "สวัสดี"]);
    }

    #[test]
    fn placeholders_in_text_stay_literal() {
        let engine = engine("say", &["--lang={locale}", "{text}"]);
        let args = engine.render_args(&utterance("say {rate} please", 1.0, 1.0));
        assert_eq!(args, vec!["--lang=en-US", "say {rate} please"]);
    }

    #[test]
    fn scale_rounds() {
        assert_eq!(scale(175, 1.0), 175);
        assert_eq!(scale(175, 0.5), 88);
        assert_eq!(scale(50, 2.0), 100);
    }

    #[tokio::test]
    async fn missing_program_fails_initialization() {
        let engine = engine("voxqueue-definitely-not-installed", &[]);
        let result = engine.initialize().await;
        assert!(matches!(result, Err(ApplicationError::Synthesis(msg)) if msg.contains("not found")));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn zero_exit_reports_done() {
        let engine = engine("true", &[]);
        let (sink, mut rx) = CompletionSink::channel();

        engine.speak(utterance("Hello", 1.0, 1.0), sink).unwrap();
        let event = rx.recv().await.unwrap();
        assert_eq!(event.outcome, SpeakOutcome::Done);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn nonzero_exit_reports_stderr() {
        let engine = engine("sh", &["-c", "echo 'voice missing' >&2; exit 3"]);
        let (sink, mut rx) = CompletionSink::channel();

        engine.speak(utterance("Hello", 1.0, 1.0), sink).unwrap();
        let event = rx.recv().await.unwrap();
        assert_eq!(
            event.outcome,
            SpeakOutcome::Failed("voice missing".to_string())
        );
    }

    #[tokio::test]
    async fn unspawnable_program_reports_failed() {
        let engine = engine("voxqueue-definitely-not-installed", &[]);
        let (sink, mut rx) = CompletionSink::channel();

        engine.speak(utterance("Hello", 1.0, 1.0), sink).unwrap();
        let event = rx.recv().await.unwrap();
        assert!(matches!(event.outcome, SpeakOutcome::Failed(_)));
    }
}
