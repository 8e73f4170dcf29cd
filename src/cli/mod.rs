pub mod args;
pub mod prompt;
pub mod reporter;

pub use args::Cli;
pub use prompt::UserPrompter;
pub use reporter::{ConsolePresenter, ReportFormatter};

use crate::backend::{offline_registry, registry_from_env};
use crate::error::ParleyError;
use crate::orchestrator::ComparisonService;
use std::io::Read;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

pub struct CliHandler {
    cli: Cli,
}

impl CliHandler {
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    pub async fn run(&self) -> Result<i32, ParleyError> {
        // Step 1: resolve the prompt (arguments, falling back to stdin)
        let prompt = self.resolve_prompt()?;
        let config = self.cli.to_config()?;

        // Step 2: build the backend catalog
        let registry = if self.cli.offline {
            offline_registry()
        } else {
            registry_from_env(config.include_optional)
        };

        if self.cli.is_verbose() {
            eprintln!("🗂  {} backend(s) in the catalog", registry.len());
            if config.wants_auto_resolution() {
                eprintln!("🎯 No backends requested - picking the two most economical");
            }
        }
        for requested in &config.preferred_backends {
            if registry.get(requested).is_none() {
                eprintln!("⚠️  Requested backend '{requested}' is not in the catalog - skipping");
            }
        }

        // Step 3: wire the comparison service and its presenter
        let formatter = ReportFormatter::new(
            self.cli.should_use_color(),
            self.cli.is_verbose(),
            config.display_mode,
        );
        let service = ComparisonService::new(registry)
            .with_timeout(self.cli.get_timeout_seconds())
            .with_presenter(Arc::new(ConsolePresenter::new(formatter)));

        // Step 4: one shared cancellation token, triggered by Ctrl-C
        let cancel = CancellationToken::new();
        let watcher = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                eprintln!("\n🛑 Cancelling in-flight backend calls...");
                watcher.cancel();
            }
        });

        // Step 5: fan out and present (the presenter prints each snapshot)
        let mut session = service
            .start_session(&prompt, &config.preferred_backends, &cancel)
            .await?;

        if self.cli.is_debug() {
            for response in session.ordered_responses() {
                eprintln!(
                    "🔧 {} started_at={}ms latency={}ms",
                    response.backend_id, response.started_at_ms, response.latency_ms
                );
            }
        }

        // Step 6: offer incremental additions while the catalog has spares
        if !self.cli.no_interactive && !cancel.is_cancelled() {
            let prompter = UserPrompter::new(self.cli.should_use_color());
            loop {
                let unused = {
                    let used = session.backend_ids();
                    service.registry().unused(&used)
                };
                if unused.is_empty() {
                    break;
                }
                let Some(backend_id) = prompter.prompt_additional_backend(&unused)? else {
                    break;
                };
                match service.add_backend(&mut session, &backend_id, &cancel).await {
                    Ok(()) => {}
                    Err(ParleyError::UnknownBackend(id)) => {
                        eprintln!("⚠️  No backend named '{id}' in the catalog");
                    }
                    Err(other) => return Err(other),
                }
            }
        }

        // Step 7: exit code reflects whether anything answered
        if session.successful_responses().is_empty() {
            Ok(1)
        } else {
            Ok(0)
        }
    }

    fn resolve_prompt(&self) -> Result<String, ParleyError> {
        if let Some(prompt) = self.cli.prompt_text() {
            return Ok(prompt);
        }

        if self.cli.is_verbose() {
            eprintln!("📥 Reading prompt from stdin");
        }
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        if buffer.trim().is_empty() {
            return Err(ParleyError::NoInput);
        }
        Ok(buffer.trim().to_string())
    }
}
