//! The console's command table.
//!
//! Commands are a static slice of [`CommandSpec`]; [`CommandTable`] indexes it
//! by name once at startup and refuses duplicate names.

use std::collections::HashMap;

use folio_types::ui::Scrollback;
use thiserror::Error;

use crate::{
    context::Viewport,
    environment::{Environment, format_uptime},
};

/// Everything a handler may read or write.
pub struct CommandContext<'a> {
    pub args: &'a [&'a str],
    pub output: &'a mut Scrollback,
    pub env: &'a dyn Environment,
    pub viewport: Viewport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Continue,
    /// Close the console once the output is written.
    CloseConsole,
}

pub type CommandHandler = fn(&mut CommandContext<'_>) -> CommandOutcome;

#[derive(Debug, Clone, Copy)]
pub struct CommandSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub show_in_help: bool,
    pub handler: CommandHandler,
}

const COMMAND_SPECS: &[CommandSpec] = &[
    CommandSpec {
        name: "help",
        description: "Show available commands",
        show_in_help: true,
        handler: help,
    },
    CommandSpec {
        name: "about",
        description: "Who am I",
        show_in_help: true,
        handler: about,
    },
    CommandSpec {
        name: "contact",
        description: "How to reach me",
        show_in_help: true,
        handler: contact,
    },
    CommandSpec {
        name: "projects",
        description: "Things I have built",
        show_in_help: true,
        handler: projects,
    },
    CommandSpec {
        name: "clear",
        description: "Clear the terminal",
        show_in_help: true,
        handler: clear,
    },
    CommandSpec {
        name: "date",
        description: "Show the current date and time",
        show_in_help: true,
        handler: date,
    },
    CommandSpec {
        name: "exit",
        description: "Close the terminal",
        show_in_help: true,
        handler: exit,
    },
    CommandSpec {
        name: "sudo",
        description: "Run as root",
        show_in_help: false,
        handler: sudo,
    },
    CommandSpec {
        name: "ls",
        description: "List files",
        show_in_help: false,
        handler: ls,
    },
    CommandSpec {
        name: "whoami",
        description: "Print the current user",
        show_in_help: false,
        handler: whoami,
    },
    CommandSpec {
        name: "neofetch",
        description: "System information",
        show_in_help: false,
        handler: neofetch,
    },
];

#[must_use]
pub fn command_specs() -> &'static [CommandSpec] {
    COMMAND_SPECS
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandTableError {
    #[error("console command `{0}` is registered more than once")]
    DuplicateName(&'static str),
}

#[derive(Debug)]
pub struct CommandTable {
    by_name: HashMap<&'static str, &'static CommandSpec>,
}

impl CommandTable {
    pub fn new(specs: &'static [CommandSpec]) -> Result<Self, CommandTableError> {
        let mut by_name = HashMap::with_capacity(specs.len());
        for spec in specs {
            if by_name.insert(spec.name, spec).is_some() {
                return Err(CommandTableError::DuplicateName(spec.name));
            }
        }
        Ok(Self { by_name })
    }

    pub fn builtin() -> Result<Self, CommandTableError> {
        Self::new(COMMAND_SPECS)
    }

    /// Look up a command. Names are matched exactly; callers lower-case first.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&'static CommandSpec> {
        self.by_name.get(name).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

fn help(ctx: &mut CommandContext<'_>) -> CommandOutcome {
    let width = COMMAND_SPECS
        .iter()
        .filter(|spec| spec.show_in_help)
        .map(|spec| spec.name.len())
        .max()
        .unwrap_or(0);
    ctx.output.output("Available commands:");
    for spec in COMMAND_SPECS.iter().filter(|spec| spec.show_in_help) {
        ctx.output
            .output(format!("  {:<width$}  {}", spec.name, spec.description));
    }
    CommandOutcome::Continue
}

fn about(ctx: &mut CommandContext<'_>) -> CommandOutcome {
    ctx.output
        .output("Yuri Lyubchak, a web developer from Ukraine.");
    ctx.output
        .output("I build Telegram bots with PHP and Node.js on top of MySQL and MongoDB.");
    CommandOutcome::Continue
}

fn contact(ctx: &mut CommandContext<'_>) -> CommandOutcome {
    ctx.output.output("Email:    yuri@lyubchak.com");
    ctx.output.output("Telegram: @LyoSU");
    ctx.output.output("GitHub:   github.com/LyoSU");
    CommandOutcome::Continue
}

fn projects(ctx: &mut CommandContext<'_>) -> CommandOutcome {
    for line in [
        "* @fStikBot - sticker pack manager",
        "* @QuotLyBot - turns messages into quote stickers",
        "* @LyBot - inline helper for everyday chats",
        "* @HistoryAIBot - chat history summaries",
    ] {
        ctx.output.output(line);
    }
    CommandOutcome::Continue
}

fn clear(ctx: &mut CommandContext<'_>) -> CommandOutcome {
    ctx.output.clear();
    CommandOutcome::Continue
}

fn date(ctx: &mut CommandContext<'_>) -> CommandOutcome {
    let now = ctx.env.now();
    ctx.output
        .output(now.format("%a %b %e %Y %H:%M:%S").to_string());
    CommandOutcome::Continue
}

fn exit(_ctx: &mut CommandContext<'_>) -> CommandOutcome {
    CommandOutcome::CloseConsole
}

fn sudo(ctx: &mut CommandContext<'_>) -> CommandOutcome {
    if ctx.args.join(" ") == "make me a sandwich" {
        ctx.output.error("Make it yourself.");
    } else {
        ctx.output.error("Permission denied: you are not root.");
    }
    CommandOutcome::Continue
}

fn ls(ctx: &mut CommandContext<'_>) -> CommandOutcome {
    for line in [
        "drwxr-xr-x  guest  projects/",
        "-rw-r--r--  guest  about.txt",
        "-rw-r--r--  guest  contacts.txt",
        "-rw-------  root   secrets.txt",
    ] {
        ctx.output.output(line);
    }
    CommandOutcome::Continue
}

fn whoami(ctx: &mut CommandContext<'_>) -> CommandOutcome {
    ctx.output.output("guest");
    CommandOutcome::Continue
}

fn neofetch(ctx: &mut CommandContext<'_>) -> CommandOutcome {
    const LOGO: [&str; 6] = [
        r"  _____  ",
        r" |  ___| ",
        r" | |_    ",
        r" |  _|   ",
        r" |_|     ",
        r"         ",
    ];
    let info = [
        "guest@folio".to_owned(),
        "-----------".to_owned(),
        format!("OS: {} {}", ctx.env.platform(), ctx.env.arch()),
        format!("Uptime: {}", format_uptime(ctx.env.uptime())),
        format!(
            "Resolution: {}x{}",
            ctx.viewport.width, ctx.viewport.height
        ),
        "Shell: folio-sh".to_owned(),
    ];
    for (logo, info) in LOGO.iter().zip(info) {
        ctx.output.output(format!("{logo}  {info}"));
    }
    CommandOutcome::Continue
}
