use std::path::{Path, PathBuf};

use chrono::Local;

use crate::cli::commands::{Cli, Commands, ConfigAction, ConfigCmd, LineArgs, RenderArgs};
use crate::cli::output::{
    CleanJson, RenderLineJson, ToggleJson, classified_to_json, rendered_to_json,
    transition_to_json,
};
use crate::io::config_io;
use crate::io::document::Document;
use crate::model::settings::Settings;
use crate::ops::{clean_line, toggle_line};
use crate::parse::classify;
use crate::render::render_line;

/// Settings file looked for next to the working directory when --config is
/// not given
const DEFAULT_CONFIG: &str = "stint.toml";

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let config_path = cli
        .config
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));
    let settings = config_io::load_settings(&config_path)?;

    match cli.command {
        Commands::Toggle(args) => cmd_toggle(args, &settings, json),
        Commands::Clean(args) => cmd_clean(args, json),
        Commands::Status(args) => cmd_status(args, json),
        Commands::Render(args) => cmd_render(args, &settings, json),
        Commands::Config(cmd) => cmd_config(cmd, &config_path, &settings, json),
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_toggle(
    args: LineArgs,
    settings: &Settings,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut doc = Document::read(&args.file)?;
    let before = doc.line(args.line)?.to_string();

    // The single wall-clock read for this invocation
    let now = Local::now().fixed_offset();
    let outcome = toggle_line(&before, settings, now);

    doc.set_line(args.line, outcome.line.clone())?;
    doc.write()?;

    if json {
        let out = ToggleJson {
            file: args.file.display().to_string(),
            line: args.line,
            before,
            after: outcome.line,
            transition: transition_to_json(&outcome.transition),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{}", outcome.line);
    }
    Ok(())
}

fn cmd_clean(args: LineArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut doc = Document::read(&args.file)?;
    let before = doc.line(args.line)?.to_string();
    let cleaned = clean_line(&before);

    if let Some(ref line) = cleaned {
        doc.set_line(args.line, line.clone())?;
        doc.write()?;
    }

    if json {
        let out = CleanJson {
            file: args.file.display().to_string(),
            line: args.line,
            cleaned: cleaned.is_some(),
            after: cleaned,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        match cleaned {
            Some(line) => println!("{}", line),
            None => println!("nothing to clean"),
        }
    }
    Ok(())
}

fn cmd_status(args: LineArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let doc = Document::read(&args.file)?;
    let text = doc.line(args.line)?;
    let classified = classify(text);

    if json {
        let out = classified_to_json(args.line, text, &classified);
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        use crate::model::line::ClassifiedLine::*;
        match &classified {
            Checkbox {
                checked, content, ..
            } => println!("checkbox [{}] {}", if *checked { "x" } else { " " }, content),
            Keyword {
                status,
                display_time,
                annotation,
                content,
                ..
            } => {
                print!("{}", status.keyword());
                if let Some(stamp) = display_time {
                    print!(" {}", stamp);
                }
                println!(" {}", content);
                if let Some(a) = annotation {
                    println!("tracking since {} (source: {})", a.start_time.to_rfc3339(), a.source.tag());
                }
            }
            ListItem { content, .. } => println!("list item: {}", content),
            Plain { content, .. } => {
                if content.is_empty() {
                    println!("blank line");
                } else {
                    println!("plain text: {}", content);
                }
            }
        }
    }
    Ok(())
}

fn cmd_render(
    args: RenderArgs,
    settings: &Settings,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    // The read-only projection is the reading-mode surface; it stays dark
    // until enable_reading_mode is switched on
    if !settings.enable_reading_mode {
        if json {
            println!("[]");
        }
        return Ok(());
    }

    let doc = Document::read(&args.file)?;

    let numbered: Vec<(usize, &str)> = match args.line {
        Some(n) => vec![(n, doc.line(n)?)],
        None => doc
            .lines()
            .iter()
            .enumerate()
            .map(|(i, l)| (i + 1, l.as_str()))
            .collect(),
    };

    if json {
        let rendered: Vec<RenderLineJson> = numbered
            .iter()
            .filter_map(|(n, text)| render_line(text, settings).map(|r| rendered_to_json(*n, &r)))
            .collect();
        println!("{}", serde_json::to_string_pretty(&rendered)?);
    } else {
        for (n, text) in numbered {
            if let Some(rendered) = render_line(text, settings) {
                println!("{:>4}  {}", n, rendered.to_plain_text());
            }
        }
    }
    Ok(())
}

fn cmd_config(
    cmd: ConfigCmd,
    config_path: &Path,
    settings: &Settings,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    match cmd.action {
        None => {
            if json {
                println!("{}", serde_json::to_string_pretty(settings)?);
            } else {
                print!("{}", toml::to_string_pretty(settings)?);
            }
        }
        Some(ConfigAction::Set { key, value }) => {
            config_io::set_value(config_path, &key, &value)?;
            if !json {
                println!("{} = {}", key, value);
            }
        }
    }
    Ok(())
}
