/// Line-oriented command parsing for the interactive client
use crate::error::{AppError, AppResult};

pub const HELP: &str = "\
Commands:
  search [text]                 search titles, descriptions and cast
  genre [name]                  filter by genre (empty clears)
  ott [platform]                filter by streaming platform (empty clears)
  similar <n|title>             recommendations for a listed movie or a title
  parallel                      toggle parallel-universe recommendations
  like <n|title>                like a listed movie or a title
  song <name or lyrics>         match movies to a song's mood
  profile                       show your cinematic DNA
  prefs [toggle <genre>|save]   show, change or save favourite genres
  chat <message>                talk to the movie assistant
  history                       show the chat transcript
  login <email> <password>
  register <username> <email> <password>
  logout | whoami | help | quit";

/// A listed movie by position, or a free-form title
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovieRef {
    /// 1-based position in the current listing
    Index(usize),
    Title(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrefsAction {
    Show,
    Toggle(String),
    Save,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(String),
    Genre(String),
    Ott(String),
    Similar(MovieRef),
    Parallel,
    Like(MovieRef),
    Song(String),
    Profile,
    Prefs(PrefsAction),
    Chat(String),
    History,
    Login { email: String, password: String },
    Register {
        username: String,
        email: String,
        password: String,
    },
    Logout,
    WhoAmI,
    Help,
    Quit,
}

impl Command {
    /// Parses one input line; blank lines yield `None`
    pub fn parse(line: &str) -> AppResult<Option<Self>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_lowercase().as_str() {
            "search" | "s" => Command::Search(rest.to_string()),
            "genre" => Command::Genre(rest.to_string()),
            "ott" => Command::Ott(rest.to_string()),
            "similar" | "rec" => Command::Similar(movie_ref(word, rest)?),
            "parallel" => Command::Parallel,
            "like" => Command::Like(movie_ref(word, rest)?),
            "song" => Command::Song(required(word, rest)?),
            "profile" => Command::Profile,
            "prefs" => Command::Prefs(prefs_action(rest)?),
            "chat" | "c" => Command::Chat(required(word, rest)?),
            "history" => Command::History,
            "login" => {
                let [email, password] = words::<2>(word, rest)?;
                Command::Login { email, password }
            }
            "register" => {
                let [username, email, password] = words::<3>(word, rest)?;
                Command::Register {
                    username,
                    email,
                    password,
                }
            }
            "logout" => Command::Logout,
            "whoami" => Command::WhoAmI,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => {
                return Err(AppError::InvalidInput(format!(
                    "unknown command `{}` (try `help`)",
                    other
                )))
            }
        };

        Ok(Some(command))
    }
}

fn required(command: &str, rest: &str) -> AppResult<String> {
    if rest.is_empty() {
        return Err(AppError::InvalidInput(format!("`{}` needs an argument", command)));
    }
    Ok(rest.to_string())
}

fn movie_ref(command: &str, rest: &str) -> AppResult<MovieRef> {
    let target = required(command, rest)?;
    match target.parse::<usize>() {
        Ok(0) => Err(AppError::InvalidInput("listing positions start at 1".to_string())),
        Ok(index) => Ok(MovieRef::Index(index)),
        Err(_) => Ok(MovieRef::Title(target)),
    }
}

fn prefs_action(rest: &str) -> AppResult<PrefsAction> {
    let (action, arg) = match rest.split_once(char::is_whitespace) {
        Some((action, arg)) => (action, arg.trim()),
        None => (rest, ""),
    };

    match action {
        "" | "show" => Ok(PrefsAction::Show),
        "save" => Ok(PrefsAction::Save),
        "toggle" => Ok(PrefsAction::Toggle(required("prefs toggle", arg)?)),
        other => Err(AppError::InvalidInput(format!(
            "unknown prefs action `{}`",
            other
        ))),
    }
}

fn words<const N: usize>(command: &str, rest: &str) -> AppResult<[String; N]> {
    let parts: Vec<String> = rest.split_whitespace().map(str::to_string).collect();
    parts.try_into().map_err(|_| {
        AppError::InvalidInput(format!("`{}` takes exactly {} arguments", command, N))
    })
}
