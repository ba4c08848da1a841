use crate::repl::{parse_command, ReplCommand, HELP};
use application::chat_controller::{ChatController, SendOutcome};
use application::display_timestamp;
use application::svg_service::SvgService;
use clap::Parser;
use colored::Colorize;
use domain::app_state::AppState;
use domain::conversation::{ChatMessage, Role};
use domain::mode::CredentialSource;
use domain::SvgError;
use infrastructure::config::Config;
use infrastructure::credential_store::CredentialStore;
use infrastructure::export;
use infrastructure::gemini_client::GeminiProvider;
use infrastructure::image_loader::load_image_data_uri;
use shared::interaction::{ask_confirmation, ask_line, ask_secret};
use shared::types::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "svgsmith")]
#[command(about = "Generate and refine SVG icons by chatting with Gemini")]
pub struct Cli {
    /// Trace a PNG or JPEG image into an icon
    #[arg(long, value_name = "PATH")]
    pub image: Option<PathBuf>,

    /// Rewrite the description into a more detailed prompt and print it
    #[arg(long)]
    pub optimize_prompt: bool,

    /// Ask for a Gemini API key and store it
    #[arg(long)]
    pub set_key: bool,

    /// Remove the stored Gemini API key
    #[arg(long)]
    pub clear_key: bool,

    /// Disable version history for this session
    #[arg(long)]
    pub no_history: bool,

    /// Where the API key comes from: env, storage or prompt
    #[arg(long, value_name = "SOURCE")]
    pub credential_source: Option<CredentialSource>,

    /// Write the resulting SVG to a file (one-shot mode)
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Copy the resulting SVG to the clipboard (one-shot mode)
    #[arg(long)]
    pub copy: bool,

    /// Debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Description of the icon; without one an interactive chat starts
    #[arg(trailing_var_arg = true)]
    pub args: Vec<String>,
}

pub struct CliApp {
    config: Config,
    credentials: Arc<CredentialStore>,
    controller: ChatController<GeminiProvider>,
    state: AppState,
    rendered: usize,
}

impl CliApp {
    pub fn new(cli: &Cli) -> Result<Self> {
        let mut config = Config::load();
        if cli.no_history {
            config.mode.persist_history = false;
        }
        if let Some(source) = cli.credential_source {
            config.mode.credential_source = source;
        }
        debug!(mode = ?config.mode, model = %config.gemini_model, "configuration loaded");

        let credentials = Arc::new(CredentialStore::open(
            &config.db_path,
            config.mode.credential_source,
            config.default_api_key.clone(),
        )?);
        let provider = GeminiProvider::new(&config, Arc::clone(&credentials));
        let state = AppState::new(config.mode, &display_timestamp());
        Ok(Self {
            config,
            credentials,
            controller: ChatController::new(SvgService::new(provider)),
            state,
            rendered: 0,
        })
    }

    pub async fn run(&mut self, cli: Cli) -> Result<()> {
        let args_str = cli.args.join(" ");
        if cli.clear_key {
            return self.handle_clear_key();
        }
        if cli.set_key {
            return self.handle_set_key();
        }
        self.ensure_credential()?;

        if cli.optimize_prompt {
            self.handle_optimize_prompt(&args_str).await
        } else if cli.image.is_some() || !args_str.trim().is_empty() {
            self.handle_one_shot(&args_str, cli.image.as_deref(), cli.output.as_deref(), cli.copy)
                .await
        } else {
            self.handle_chat().await
        }
    }

    /// In prompt mode an unresolved key is asked for once, up front.
    fn ensure_credential(&self) -> Result<()> {
        if self.credentials.source() == CredentialSource::Prompt && !self.credentials.is_set() {
            let key = ask_secret("Gemini API key")?;
            self.credentials.set(&key)?;
        }
        Ok(())
    }

    fn handle_set_key(&self) -> Result<()> {
        let key = ask_secret("Gemini API key (leave empty to clear)")?;
        self.credentials.set(&key)?;
        self.report_key_change();
        Ok(())
    }

    fn handle_clear_key(&self) -> Result<()> {
        if ask_confirmation("Remove the stored Gemini API key?", false)? {
            self.credentials.clear()?;
            self.report_key_change();
        }
        Ok(())
    }

    fn report_key_change(&self) {
        let status = if self.credentials.is_set() {
            "API key saved."
        } else {
            "API key cleared."
        };
        println!("{}", status.green());
        if self.credentials.source() == CredentialSource::Env {
            println!(
                "{}",
                "Credential source is 'env': the change lasts for this session only.".yellow()
            );
        }
    }

    async fn handle_optimize_prompt(&mut self, prompt: &str) -> Result<()> {
        eprintln!("Thinking...");
        match self.controller.optimize_prompt(&mut self.state, prompt).await {
            Ok(Some(optimized)) => println!("{}", optimized),
            Ok(None) => println!("{}", "Nothing to optimize: the prompt is empty.".yellow()),
            Err(err) => return Err(self.fail(err)),
        }
        Ok(())
    }

    async fn handle_one_shot(
        &mut self,
        prompt: &str,
        image: Option<&Path>,
        output: Option<&Path>,
        copy: bool,
    ) -> Result<()> {
        let image = match image {
            Some(path) => Some(load_image_data_uri(path)?),
            None => None,
        };
        eprintln!("Thinking...");
        if let Err(err) = self
            .controller
            .send_message(&mut self.state, prompt, image)
            .await
        {
            return Err(self.fail(err));
        }

        let svg = self.state.document.as_str();
        match output {
            Some(path) => {
                std::fs::write(path, svg)?;
                eprintln!("{}", format!("Saved to {}", path.display()).green());
            }
            None => println!("{}", svg),
        }
        if copy {
            export::copy_to_clipboard(svg)?;
            eprintln!("{}", "Copied to clipboard.".green());
        }
        Ok(())
    }

    async fn handle_chat(&mut self) -> Result<()> {
        println!(
            "{}",
            "SVG chat. Type /help for commands, 'exit' to quit.".bold()
        );
        self.render_new_messages();
        loop {
            let line = ask_line("You")?;
            match parse_command(&line) {
                ReplCommand::Exit => break,
                ReplCommand::Empty => continue,
                ReplCommand::Help => println!("{}", HELP),
                ReplCommand::Invalid(msg) => println!("{}", msg.yellow()),
                ReplCommand::Send(text) => self.send(&text, None).await,
                ReplCommand::Image { path, prompt } => match load_image_data_uri(&path) {
                    Ok(uri) => self.send(&prompt, Some(uri)).await,
                    Err(err) => println!("{}", err.to_string().red()),
                },
                ReplCommand::OptimizePrompt(text) => self.chat_optimize_prompt(&text).await?,
                ReplCommand::Show => println!("{}", self.state.document),
                ReplCommand::Load(path) => match std::fs::read_to_string(&path) {
                    Ok(code) => {
                        self.controller.edit_document(&mut self.state, &code);
                        println!("{}", format!("Loaded {}", path.display()).green());
                    }
                    Err(err) => {
                        println!("{}", format!("Cannot read {}: {}", path.display(), err).red())
                    }
                },
                ReplCommand::Save => {
                    if let Err(err) = self.controller.save_version(&mut self.state) {
                        println!("{}", err.to_string().yellow());
                    }
                }
                ReplCommand::History => self.print_history(),
                ReplCommand::Revert(id) => {
                    if let Err(err) = self.controller.revert_to(&mut self.state, id) {
                        println!("{}", err.to_string().yellow());
                    }
                }
                ReplCommand::Copy => match export::copy_to_clipboard(self.state.document.as_str()) {
                    Ok(()) => println!("{}", "Copied to clipboard.".green()),
                    Err(err) => println!("{}", failure_message(&err).red()),
                },
                ReplCommand::Export => {
                    match export::write_svg(&self.config.export_dir, self.state.document.as_str()) {
                        Ok(path) => println!("{}", format!("Saved to {}", path.display()).green()),
                        Err(err) => println!("{}", failure_message(&err).red()),
                    }
                }
                // A failed key change leaves the session running.
                ReplCommand::Key => {
                    if let Err(err) = self.handle_set_key() {
                        println!("{}", failure_message(&err).red());
                    }
                }
            }
            self.render_new_messages();
        }
        Ok(())
    }

    async fn send(&mut self, text: &str, image: Option<String>) {
        self.render_new_messages();
        eprintln!("Thinking...");
        match self.controller.send_message(&mut self.state, text, image).await {
            Ok(SendOutcome::Updated(_)) => {
                self.render_new_messages();
                println!("{}", self.state.document.to_string().cyan());
            }
            Ok(SendOutcome::Ignored) => {}
            Err(err) => {
                self.render_new_messages();
                self.print_error_banner(&err);
            }
        }
    }

    async fn chat_optimize_prompt(&mut self, prompt: &str) -> Result<()> {
        eprintln!("Thinking...");
        let optimized = match self.controller.optimize_prompt(&mut self.state, prompt).await {
            Ok(optimized) => optimized,
            Err(err) => {
                self.render_new_messages();
                if matches!(err, SvgError::MissingCredential) {
                    self.print_error_banner(&err);
                }
                return Ok(());
            }
        };
        self.render_new_messages();
        if let Some(optimized) = optimized {
            if ask_confirmation("Send the optimized prompt now?", true)? {
                self.send(&optimized, None).await;
            }
        }
        Ok(())
    }

    fn render_new_messages(&mut self) {
        let messages = self.state.conversation.messages();
        for message in messages.iter().skip(self.rendered) {
            println!("{}", format_message(message));
        }
        self.rendered = messages.len();
    }

    fn print_history(&self) {
        let Some(history) = self.state.history.as_ref() else {
            println!("{}", SvgError::HistoryDisabled.to_string().yellow());
            return;
        };
        if history.is_empty() {
            println!("{}", "No saved versions yet.".yellow());
            return;
        }
        let current = self.state.document.as_str().trim();
        for entry in history.newest_first() {
            let marker = if entry.code.trim() == current { "*" } else { " " };
            println!(
                "{} {} {}  {}",
                marker,
                format!("[{}]", entry.id).blue(),
                entry.timestamp,
                preview(&entry.code, 60).dimmed()
            );
        }
    }

    fn print_error_banner(&self, err: &SvgError) {
        if let Some(banner) = &self.state.last_error {
            eprintln!("{} {}", "Error:".red().bold(), banner.red());
        }
        if matches!(err, SvgError::MissingCredential) {
            eprintln!(
                "{}",
                "Configure a key with /key, --set-key or GEMINI_API_KEY.".yellow()
            );
        }
    }

    /// Logs the failure and hands back an error for the process exit path.
    fn fail(&self, err: SvgError) -> anyhow::Error {
        if matches!(err, SvgError::MissingCredential) {
            eprintln!(
                "{}",
                "Configure a key with --set-key or GEMINI_API_KEY.".yellow()
            );
        }
        anyhow::Error::new(err)
    }
}

fn format_message(message: &ChatMessage) -> String {
    let attachment = if message.image.is_some() {
        " [image attached]".dimmed().to_string()
    } else {
        String::new()
    };
    match message.role {
        Role::User => format!("{} {}{}", "you ›".blue().bold(), message.text, attachment),
        Role::Ai => format!("{} {}", "ai  ›".green().bold(), message.text),
    }
}

/// One line with the whole context chain, for failures the chat survives.
fn failure_message(err: &anyhow::Error) -> String {
    format!("{err:#}")
}

/// First `max` characters of the code on one line.
fn preview(code: &str, max: usize) -> String {
    let flat: String = code.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max {
        flat
    } else {
        let cut: String = flat.chars().take(max).collect();
        format!("{cut}…")
    }
}
