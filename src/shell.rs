use std::io::{BufRead, Write};
use anyhow::{Result, Context};
use tracing::{error, info};
use crate::flow::{extract_message, FlowClient, FlowConfig};
use crate::tweaks::{ChatModel, EmbeddingModel, Settings, Temperature, Tweaks};

pub const TITLE: &str = "LangFlow Chat Application";
pub const EMPTY_PROMPT: &str = "Please enter a message.";

const HELP: &str = "Commands:
  :model <name>          chat model for the flow
  :embedding <name>      embedding model for the flow
  :temperature <0..1>    sampling temperature
  :settings              show the current settings
  :help                  show this list
  :quit                  leave the session
Anything else is sent as a message.";

#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// Nothing was sent; the user was asked for a message.
    Prompt,
    Reply(String),
    /// The request never produced a response body.
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// One chat session against a single flow. Submits run one at a time and the
/// next input is not read until the reply has been written.
pub struct Session {
    config: FlowConfig,
    client: FlowClient,
    tweaks: Tweaks,
    settings: Settings,
}

impl Session {
    /// Fails if the tweaks lack a component the settings are written into.
    pub fn new(config: FlowConfig, client: FlowClient, mut tweaks: Tweaks, settings: Settings) -> Result<Self> {
        settings
            .apply(&mut tweaks)
            .context("Tweaks do not match the session settings")?;
        Ok(Self { config, client, tweaks, settings })
    }

    #[cfg(test)]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[cfg(test)]
    pub fn tweaks(&self) -> &Tweaks {
        &self.tweaks
    }

    pub async fn submit<W: Write>(&mut self, message: &str, out: &mut W) -> Result<Submission> {
        if message.is_empty() {
            writeln!(out, "{}", EMPTY_PROMPT)?;
            return Ok(Submission::Prompt);
        }

        writeln!(out, "Sending message: {}", message)?;
        out.flush()?;
        self.settings.apply(&mut self.tweaks)?;

        match self.client.run_chat(message, &self.tweaks, &self.config).await {
            Ok(response) => {
                let text = extract_message(&response);
                writeln!(out, "Response: {}", text)?;
                Ok(Submission::Reply(text))
            }
            Err(e) => {
                error!("Flow run failed: {:#}", e);
                let reason = format!("{:#}", e);
                writeln!(out, "Error: {}", reason)?;
                Ok(Submission::Failed(reason))
            }
        }
    }

    /// Handles a `:` command line (without the colon).
    pub fn command<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Control> {
        let line = line.trim();
        let (name, arg) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let arg = arg.trim();

        match name {
            "model" => match arg.parse::<ChatModel>() {
                Ok(model) => {
                    self.settings.model = model;
                    writeln!(out, "Model set to {}", model)?;
                }
                Err(e) => writeln!(out, "{}", e)?,
            },
            "embedding" => match arg.parse::<EmbeddingModel>() {
                Ok(model) => {
                    self.settings.embedding_model = model;
                    writeln!(out, "Embedding model set to {}", model)?;
                }
                Err(e) => writeln!(out, "{}", e)?,
            },
            "temperature" | "temp" => match arg.parse::<Temperature>() {
                Ok(temperature) => {
                    self.settings.temperature = temperature;
                    writeln!(out, "Temperature set to {}", temperature)?;
                }
                Err(e) => writeln!(out, "{}", e)?,
            },
            "settings" => write_settings(&self.settings, out)?,
            "help" | "h" => writeln!(out, "{}", HELP)?,
            "quit" | "q" | "exit" => return Ok(Control::Quit),
            other => writeln!(out, "Unknown command ':{}'. Type :help for a list.", other)?,
        }
        Ok(Control::Continue)
    }

    /// Reads lines until `:quit` or end of input.
    pub async fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut out: W) -> Result<()> {
        writeln!(out, "{}", TITLE)?;
        write_settings(&self.settings, &mut out)?;
        writeln!(out, "Type a message, or :help for commands.")?;

        let mut line = String::new();
        loop {
            write!(out, "> ")?;
            out.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                writeln!(out)?;
                break;
            }
            let entry = line.trim_end_matches(['\r', '\n']);

            if let Some(command) = entry.strip_prefix(':') {
                if self.command(command, &mut out)? == Control::Quit {
                    break;
                }
                continue;
            }
            self.submit(entry, &mut out).await?;
        }

        info!("Session ended");
        Ok(())
    }
}

fn write_settings<W: Write>(settings: &Settings, out: &mut W) -> Result<()> {
    writeln!(out, "Session-Level Configurations")?;
    writeln!(out, "  Model:           {}", settings.model)?;
    writeln!(out, "  Embedding model: {}", settings.embedding_model)?;
    writeln!(out, "  Temperature:     {}", settings.temperature)?;
    Ok(())
}
