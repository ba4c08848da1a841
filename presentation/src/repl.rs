use std::path::PathBuf;

pub const HELP: &str = "\
Type a description to generate or edit the icon. Mention \"optimize\" or
\"simplify\" to clean up the current SVG instead.

  /image <path> [prompt]   trace a PNG or JPEG into an icon; quote paths
                           with spaces: /image \"my icons/cat.png\"
  /prompt <text>           rewrite a short description into a detailed one
  /show                    print the current SVG
  /load <path>             replace the current SVG with a file's contents
  /save                    snapshot the current SVG into history
  /history                 list saved versions, newest first
  /revert <id>             restore a saved version
  /copy                    copy the current SVG to the clipboard
  /export                  write the current SVG to icon-<timestamp>.svg
  /key                     set or clear the Gemini API key
  /help                    show this help
  exit | quit              leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Send(String),
    Image { path: PathBuf, prompt: String },
    OptimizePrompt(String),
    Show,
    Load(PathBuf),
    Save,
    History,
    Revert(u64),
    Copy,
    Export,
    Key,
    Help,
    Exit,
    Empty,
    /// Malformed or unknown slash command; carries the message to show.
    Invalid(String),
}

pub fn parse_command(line: &str) -> ReplCommand {
    let line = line.trim();
    if line.is_empty() {
        return ReplCommand::Empty;
    }
    if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
        return ReplCommand::Exit;
    }
    let Some(rest) = line.strip_prefix('/') else {
        return ReplCommand::Send(line.to_string());
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };
    match name {
        "image" => {
            if arg.is_empty() {
                return ReplCommand::Invalid("usage: /image <path> [prompt]".into());
            }
            let Some((path, prompt)) = split_path(arg) else {
                return ReplCommand::Invalid("unterminated quote in /image path".into());
            };
            if path.is_empty() {
                return ReplCommand::Invalid("usage: /image <path> [prompt]".into());
            }
            ReplCommand::Image {
                path: PathBuf::from(path),
                prompt: prompt.to_string(),
            }
        }
        "prompt" if !arg.is_empty() => ReplCommand::OptimizePrompt(arg.to_string()),
        "prompt" => ReplCommand::Invalid("usage: /prompt <text>".into()),
        "show" => ReplCommand::Show,
        "load" if !arg.is_empty() => ReplCommand::Load(PathBuf::from(arg)),
        "load" => ReplCommand::Invalid("usage: /load <path>".into()),
        "save" => ReplCommand::Save,
        "history" => ReplCommand::History,
        "revert" => match arg.parse::<u64>() {
            Ok(id) => ReplCommand::Revert(id),
            Err(_) => ReplCommand::Invalid("usage: /revert <id>".into()),
        },
        "copy" => ReplCommand::Copy,
        "export" => ReplCommand::Export,
        "key" => ReplCommand::Key,
        "help" | "?" => ReplCommand::Help,
        other => ReplCommand::Invalid(format!("unknown command '/{other}', try /help")),
    }
}

/// Leading path argument and the rest. A path starting with `"` runs to the
/// closing quote; `None` when that quote is missing.
fn split_path(arg: &str) -> Option<(&str, &str)> {
    if let Some(quoted) = arg.strip_prefix('"') {
        let (path, rest) = quoted.split_once('"')?;
        return Some((path, rest.trim()));
    }
    Some(match arg.split_once(char::is_whitespace) {
        Some((path, rest)) => (path, rest.trim()),
        None => (arg, ""),
    })
}
