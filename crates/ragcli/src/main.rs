mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use ragcore::ExecutionEvent;
use ragnodes::{build_workflow, NODE_NAMES};
use ragruntime::{RagRuntime, RuntimeConfig};
use std::io::Write;
use tokio::time::Duration;

#[derive(Parser)]
#[command(name = "rag")]
#[command(about = "Adaptive retrieval question answering", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer a question through the workflow
    Ask {
        /// The question; prompted from stdin when omitted
        question: Option<String>,

        /// Maximum node executions before the run is aborted
        #[arg(long)]
        max_steps: Option<usize>,

        /// Per-node timeout in seconds
        #[arg(long)]
        timeout_secs: Option<u64>,

        /// Show verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// List the workflow step names
    Nodes,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Ask {
            question,
            max_steps,
            timeout_secs,
            verbose,
        } => {
            // Initialize logging
            if verbose {
                tracing_subscriber::fmt()
                    .with_max_level(tracing::Level::DEBUG)
                    .init();
            } else {
                tracing_subscriber::fmt()
                    .with_max_level(tracing::Level::WARN)
                    .init();
            }

            ask(question, max_steps, timeout_secs).await?;
        }

        Commands::Nodes => {
            list_nodes();
        }
    }

    Ok(())
}

async fn ask(
    question: Option<String>,
    max_steps: Option<usize>,
    timeout_secs: Option<u64>,
) -> Result<()> {
    let question = match question {
        Some(question) => question,
        None => prompt_for_question()?,
    };

    let provider_config = config::provider_config_from_env()?;
    let graph = build_workflow(provider_config.collaborators());

    let mut runtime_config = RuntimeConfig::default();
    if let Some(max_steps) = max_steps {
        runtime_config.max_steps = max_steps;
    }
    if let Some(secs) = timeout_secs {
        runtime_config.node_timeout = Some(Duration::from_secs(secs));
    }

    let runtime = RagRuntime::with_config(graph, runtime_config)?;

    // Subscribe to events for real-time output
    let mut events = runtime.subscribe_events();
    let event_task = tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match event {
                ExecutionEvent::RunStarted { .. } => {
                    println!("▶️  Run started");
                }
                ExecutionEvent::NodeStarted { node, .. } => {
                    println!("  ⚡ {}", node);
                }
                ExecutionEvent::NodeCompleted { node, duration_ms, .. } => {
                    println!("  ✅ {} ({}ms)", node, duration_ms);
                }
                ExecutionEvent::NodeFailed { node, error, .. } => {
                    println!("  ❌ {} failed: {}", node, error);
                }
                ExecutionEvent::NodeEvent { node, event, .. } => match event {
                    ragcore::NodeEvent::Info { message } => {
                        println!("     ℹ️  [{}] {}", node, message);
                    }
                    ragcore::NodeEvent::Warning { message } => {
                        println!("     ⚠️  [{}] {}", node, message);
                    }
                },
                ExecutionEvent::RunCompleted { success, duration_ms, .. } => {
                    if success {
                        println!("✨ Run completed in {}ms", duration_ms);
                    } else {
                        println!("💥 Run failed after {}ms", duration_ms);
                    }
                }
            }
        }
    });

    let result = runtime.ask(question).await;

    // Let the event listener drain before printing the summary
    tokio::time::sleep(Duration::from_millis(100)).await;
    event_task.abort();

    let state = result?;

    println!();
    println!("✅ Final Answer:");
    println!("{}", state.answer.as_deref().unwrap_or("No answer returned."));

    Ok(())
}

fn prompt_for_question() -> Result<String> {
    print!("Ask a question: ");
    std::io::stdout().flush()?;

    let mut question = String::new();
    std::io::stdin().read_line(&mut question)?;
    Ok(question.trim().to_string())
}

fn list_nodes() {
    println!("📦 Workflow steps:");
    for name in NODE_NAMES {
        println!("  • {}", name);
    }
}
