use clap::{Parser, Subcommand};
use log::debug;
use std::error::Error;

use distill::drafts::{format_relative_time, DraftPatch, DraftStore, NewDraft};
use distill::{AppConfig, ContentType, OutputFormat, SummarizeRequest, Summarizer};

#[derive(Parser)]
#[command(name = "distill", version, about = "Distill articles, videos and text with an LLM")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server
    Serve {
        /// Address to listen on (overrides server.bind)
        #[arg(long)]
        bind: Option<String>,
    },
    /// Distill a URL, YouTube link or text and print the result
    Summarize {
        /// URL, YouTube link or raw text
        content: String,
        /// url, youtube or text; guessed from the content when omitted
        #[arg(long = "type")]
        content_type: Option<ContentType>,
        /// summary, bullets, takeaways, tweet, thread or linkedin
        #[arg(long, default_value = "summary")]
        format: OutputFormat,
        /// Save the input and result as a draft
        #[arg(long)]
        save: bool,
        /// Print the full JSON result
        #[arg(long)]
        json: bool,
    },
    /// Manage locally saved drafts
    Drafts {
        #[command(subcommand)]
        command: DraftsCommand,
    },
}

#[derive(Subcommand)]
enum DraftsCommand {
    /// List drafts, newest first
    List,
    /// Print one draft
    Show { id: String },
    /// Change fields of a draft
    Update {
        id: String,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        format: Option<OutputFormat>,
        #[arg(long)]
        summary: Option<String>,
    },
    /// Delete a draft
    Delete { id: String },
}

fn guess_content_type(content: &str) -> ContentType {
    let trimmed = content.trim_start();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        ContentType::Url
    } else {
        ContentType::Text
    }
}

fn preview(text: &str, max_chars: usize) -> String {
    let line = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if line.chars().count() > max_chars {
        format!("{}…", line.chars().take(max_chars).collect::<String>())
    } else {
        line
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut config = AppConfig::load()?;
    debug!("Default provider: {}", config.default_provider);

    match cli.command {
        Command::Serve { bind } => {
            if let Some(bind) = bind {
                config.server.bind = bind;
            }
            distill::server::serve(&config).await?;
        }
        Command::Summarize {
            content,
            content_type,
            format,
            save,
            json,
        } => {
            let summarizer = Summarizer::from_config(&config)?;
            let content_type = content_type.unwrap_or_else(|| guess_content_type(&content));
            let request = SummarizeRequest::new(content.clone(), content_type, format);
            let result = summarizer.handle(&request).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{}", result.summary);
                if let Some(hashtags) = &result.hashtags {
                    println!("\n{}", hashtags);
                }
            }

            if save {
                let store = DraftStore::new(config.drafts_path());
                let draft = store.create(NewDraft {
                    content,
                    output_format: format.id().to_string(),
                    summary: Some(result.summary),
                })?;
                eprintln!("Saved draft {}", draft.id);
            }
        }
        Command::Drafts { command } => {
            let store = DraftStore::new(config.drafts_path());
            match command {
                DraftsCommand::List => {
                    let drafts = store.list()?;
                    if drafts.is_empty() {
                        println!("No drafts saved in {}", store.path().display());
                    }
                    for draft in drafts {
                        println!(
                            "{}  {:<9}  {:<16}  {}",
                            draft.id,
                            draft.output_format,
                            format_relative_time(draft.updated_at),
                            preview(&draft.content, 60)
                        );
                    }
                }
                DraftsCommand::Show { id } => match store.get(&id)? {
                    Some(draft) => println!("{}", serde_json::to_string_pretty(&draft)?),
                    None => return Err(format!("No draft with id {}", id).into()),
                },
                DraftsCommand::Update {
                    id,
                    content,
                    format,
                    summary,
                } => {
                    let patch = DraftPatch {
                        content,
                        output_format: format.map(|format| format.id().to_string()),
                        summary,
                    };
                    if !store.update(&id, patch)? {
                        return Err(format!("No draft with id {}", id).into());
                    }
                    println!("Updated draft {}", id);
                }
                DraftsCommand::Delete { id } => {
                    if !store.delete(&id)? {
                        return Err(format!("No draft with id {}", id).into());
                    }
                    println!("Deleted draft {}", id);
                }
            }
        }
    }

    Ok(())
}
