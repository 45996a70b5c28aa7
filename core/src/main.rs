use std::{fs, sync::Arc};

use anyhow::{Context, Result};
use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
    signal::unix::{SignalKind, signal},
};

use noema::{
    arbitration::ArbitrationEngine,
    cli::parse_args,
    config::{Config, TextGenConfig},
    kernel::{Kernel, KernelPorts, compose_response},
    logging::init_tracing,
    memory::{ChainStorePort, FsChainStore, NoopChainStore, NoopMemoryIndex},
    perception::LlmPerception,
    sensorium::CycleInput,
    textgen::{NoopTextGen, OllamaTextGen, TextGenPort},
    types::CycleContext,
};

#[tokio::main]
async fn main() -> Result<()> {
    let args = parse_args()?;
    let mut config = Config::load(&args.config_path)
        .with_context(|| format!("failed to load config from {}", args.config_path.display()))?;
    if let Some(log_dir) = args.log_dir {
        config.logging.dir = log_dir;
    }
    if args.disable_arbitration {
        config.arbitration.enabled = false;
    }

    let logging_guard = init_tracing(&config.logging)?;
    tracing::info!(run_id = %logging_guard.run_id(), "noema starting");

    let textgen: Arc<dyn TextGenPort> = match &config.textgen {
        TextGenConfig::Ollama { config } => Arc::new(OllamaTextGen::new(
            config.base_url.clone(),
            config.model.clone(),
            config.timeout(),
        )),
        TextGenConfig::None => Arc::new(NoopTextGen),
    };

    let chains: Arc<dyn ChainStorePort> = if config.memory.persist_chains {
        fs::create_dir_all(&config.memory.chain_dir).with_context(|| {
            format!(
                "failed to create chain directory {}",
                config.memory.chain_dir.display()
            )
        })?;
        Arc::new(FsChainStore::new(config.memory.chain_dir.clone()))
    } else {
        Arc::new(NoopChainStore)
    };

    let kernel = Kernel::new(
        KernelPorts {
            textgen: Arc::clone(&textgen),
            perception: Arc::new(LlmPerception::new(Arc::clone(&textgen))),
            memory: Arc::new(NoopMemoryIndex),
            chains,
        },
        config.profile.clone(),
        CycleContext {
            reasoning_mode: config.kernel.reasoning_mode.clone(),
            ..CycleContext::default()
        },
    );
    let kernel = if config.arbitration.enabled {
        kernel.with_arbitration(Arc::new(ArbitrationEngine::new(
            Arc::clone(&textgen),
            config.arbitration.selection_threshold,
        )))
    } else {
        kernel
    };

    let cycle_task = tokio::spawn(run_cycles(kernel, textgen));

    let mut sigint =
        signal(SignalKind::interrupt()).context("unable to listen for SIGINT (Ctrl+C)")?;
    let mut sigterm = signal(SignalKind::terminate()).context("unable to listen for SIGTERM")?;

    let signal_name = tokio::select! {
        _ = sigint.recv() => "SIGINT",
        _ = sigterm.recv() => "SIGTERM",
        result = cycle_task => {
            result.context("cycle loop join failed")??;
            eprintln!("noema stopped: input closed");
            return Ok(());
        }
    };

    eprintln!("noema stopped: received {signal_name}");
    Ok(())
}

/// Reads one input per line from stdin and runs one cycle per line. An
/// ErrorRecord is reported and the loop continues; only EOF ends it.
async fn run_cycles(kernel: Kernel, textgen: Arc<dyn TextGenPort>) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let reply = match kernel.run_cycle(CycleInput::text_only(input)).await {
            Ok(chain) => compose_response(&chain, Some(textgen.as_ref())).await,
            Err(error_record) => {
                tracing::error!(
                    tick = error_record.tick,
                    error = %error_record.message,
                    "cycle ended with an error record"
                );
                format!("I could not process that input: {}", error_record.message)
            }
        };

        stdout
            .write_all(format!("{reply}\n").as_bytes())
            .await
            .context("failed to write reply")?;
        stdout.flush().await.context("failed to flush reply")?;
    }

    Ok(())
}
