use clap::Parser;
use qrgen::api::{CmdMessage, GenerateRequest, QrApi};
use qrgen::config::{self, QrConfig};
use qrgen::error::Result;
use qrgen::model::{ContentType, FieldSet, OutputFormat};
use qrgen::render::QrCodeRenderer;
use qrgen::store::fs::FsLedger;
use std::io::{self, BufRead, IsTerminal, Write};

mod args;
mod print;
use args::{Cli, Commands, HistoryAction, OutputArgs};
use print::{print_history, print_messages};

type Api = QrApi<FsLedger, QrCodeRenderer>;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let api = init_api()?;

    match cli.command {
        Commands::Url { url, output } => {
            handle_generate(&api, FieldSet::new(ContentType::Url).with("url", url), output)
        }
        Commands::Text { text, output } => handle_generate(
            &api,
            FieldSet::new(ContentType::Text).with("text", text),
            output,
        ),
        Commands::Wifi {
            ssid,
            password,
            security,
            hidden,
            output,
        } => handle_generate(
            &api,
            FieldSet::new(ContentType::Wifi)
                .with("ssid", ssid)
                .with_opt("password", password)
                .with("security", security)
                .with_flag("hidden", hidden),
            output,
        ),
        Commands::Vcard {
            name,
            phone,
            email,
            org,
            title,
            url,
            output,
        } => handle_generate(
            &api,
            FieldSet::new(ContentType::VCard)
                .with("name", name)
                .with_opt("phone", phone)
                .with_opt("email", email)
                .with_opt("org", org)
                .with_opt("title", title)
                .with_opt("url", url),
            output,
        ),
        Commands::Email {
            address,
            subject,
            body,
            cc,
            bcc,
            output,
        } => handle_generate(
            &api,
            FieldSet::new(ContentType::Email)
                .with("address", address)
                .with_opt("subject", subject)
                .with_opt("body", body)
                .with_opt("cc", cc)
                .with_opt("bcc", bcc),
            output,
        ),
        Commands::Sms {
            phone,
            message,
            output,
        } => handle_generate(
            &api,
            FieldSet::new(ContentType::Sms)
                .with("phone", phone)
                .with_opt("message", message),
            output,
        ),
        Commands::History { limit, action } => match action {
            None => handle_history(&api, limit),
            Some(HistoryAction::Clear { yes }) => handle_clear(&api, yes),
            Some(HistoryAction::Replay {
                index,
                output,
                format,
            }) => handle_replay(&api, index, output, format.map(OutputFormat::from)),
        },
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn init_api() -> Result<Api> {
    let base = config::base_dir()?;
    let config = QrConfig::load(&base)?;
    let renderer = QrCodeRenderer::new(config.module_size, config.quiet_zone);
    let api = QrApi::new(FsLedger::in_dir(&base), renderer, config);
    log::debug!("history ledger at {}", api.history_location().display());
    Ok(api)
}

fn handle_generate(api: &Api, fields: FieldSet, output: OutputArgs) -> Result<()> {
    let request =
        GenerateRequest::new(fields, output.output).with_format(output.format.map(Into::into));
    let result = api.generate(&request)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_history(api: &Api, limit: Option<usize>) -> Result<()> {
    let result = api.history(limit)?;
    print_history(&result.history);
    print_messages(&result.messages);
    Ok(())
}

fn handle_clear(api: &Api, yes: bool) -> Result<()> {
    let count = api.history_count();
    if !yes && io::stdin().is_terminal() && count > 0 && !confirm(count)? {
        print_messages(&[CmdMessage::warning("Aborted. History left unchanged.")]);
        return Ok(());
    }
    let result = api.clear_history()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_replay(
    api: &Api,
    index: usize,
    output: Option<String>,
    format: Option<OutputFormat>,
) -> Result<()> {
    let result = api.replay(index, output, format)?;
    print_messages(&result.messages);
    Ok(())
}

fn confirm(count: usize) -> Result<bool> {
    print!("Clear all {} history entries? [y/N] ", count);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
