//! Chat command dispatch
//!
//! Maps `!command name [realm]` messages to report builds. Each command is a
//! variant of [`ChatCommand`]; the invoking message and everything a command
//! needs travel in an explicit [`MessageContext`].

use armory::{ArmoryError, CharacterReport, Realms, ReportBuilder, ReportOptions, Transport};
use armory_idb::ItemLookup;

pub const PREFIX: char = '!';

pub const HELP: &str = "**Supported commands**:
            **!help**: Displays this help text.
            **!guild [player_name] [realm?]**: Displays the guild of the player.
            **!gs [player_name] [realm?]**: Displays the GearScore of the player.
            **!ench [player_name] [realm?]**: Displays which enchants are missing from the player's currently equipped items.
            **!gems [player_name] [realm?]**: Displays which gems are missing from the player's currently equipped items.
            **!armory [player_name] [realm?]**: Returns a link to the player's armory.
            **!sum [player_name] [realm?]**: Lists all the details regarding the given player.
            **!achievements or !achi [player_name] [realm?]**: Displays a table with the achievement progress of the player.
            **[realm?]** is an optional parameter. By default = {realm}.
**Example of usage**:
            !sum Cly Icecrown
            !guild Cly
            !gs Cly Lordaeron
            !achi Cly";

pub const INVALID_COMMAND: &str = "**Invalid command**:
Please execute the !help command to see the list of supported commands and an example of usage.";

/// An incoming chat message
#[derive(Debug, Clone)]
pub struct Message {
    pub author: String,
    pub content: String,
}

impl Message {
    pub fn new(author: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            content: content.into(),
        }
    }
}

/// What a command handler may use
pub struct MessageContext<'a, T, L> {
    pub builder: &'a ReportBuilder<T, L>,
    pub realms: &'a Realms,
    pub default_realm: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatCommand {
    Help,
    Character(Query),
}

/// Commands answered from a character report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query {
    Guild,
    GearScore,
    Enchants,
    Gems,
    Armory,
    Summary,
    Achievements,
}

pub const COMMANDS: &[ChatCommand] = &[
    ChatCommand::Help,
    ChatCommand::Character(Query::Guild),
    ChatCommand::Character(Query::GearScore),
    ChatCommand::Character(Query::Enchants),
    ChatCommand::Character(Query::Gems),
    ChatCommand::Character(Query::Armory),
    ChatCommand::Character(Query::Summary),
    ChatCommand::Character(Query::Achievements),
];

/// Validated arguments of a character command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterArgs {
    pub name: String,
    pub realm: String,
}

impl ChatCommand {
    pub fn name(self) -> &'static str {
        match self {
            Self::Help => "help",
            Self::Character(query) => query.name(),
        }
    }

    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Character(Query::Summary) => &["summary"],
            Self::Character(Query::Achievements) => &["achi"],
            _ => &[],
        }
    }

    /// Look up a command by name or alias, without the prefix
    pub fn from_name(name: &str) -> Option<Self> {
        COMMANDS
            .iter()
            .copied()
            .find(|c| c.name() == name || c.aliases().contains(&name))
    }
}

impl Query {
    pub fn name(self) -> &'static str {
        match self {
            Self::Guild => "guild",
            Self::GearScore => "gs",
            Self::Enchants => "ench",
            Self::Gems => "gems",
            Self::Armory => "armory",
            Self::Summary => "sum",
            Self::Achievements => "achievements",
        }
    }

    /// Check arity and realm. `args` excludes the command token.
    pub fn validate(
        self,
        args: &[&str],
        realms: &Realms,
        default_realm: &str,
    ) -> Option<CharacterArgs> {
        let (name, realm) = match args {
            [name] => (name, default_realm.to_string()),
            [name, realm] => (name, realms.resolve(realm)?),
            _ => return None,
        };
        Some(CharacterArgs {
            name: name.to_string(),
            realm,
        })
    }

    fn options(self) -> ReportOptions {
        ReportOptions {
            achievements: self == Self::Achievements,
        }
    }

    fn reply(self, report: &CharacterReport) -> Result<String, ArmoryError> {
        Ok(match self {
            Self::Guild => report.guild_reply(),
            Self::GearScore => report.gear_score_reply()?,
            Self::Enchants => report.enchants.clone(),
            Self::Gems => report.gems.clone(),
            Self::Armory => report.armory_reply(),
            Self::Summary => report.summary.clone(),
            Self::Achievements => report.achievements_reply(),
        })
    }

    /// Run a validated character command; failures become reply text
    pub async fn execute<T: Transport, L: ItemLookup>(
        self,
        ctx: &MessageContext<'_, T, L>,
        args: &CharacterArgs,
    ) -> String {
        let result = ctx
            .builder
            .build(&args.realm, &args.name, self.options())
            .await
            .and_then(|report| self.reply(&report));

        match result {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!("!{} {} {} failed: {}", self.name(), args.name, args.realm, e);
                e.user_message()
            }
        }
    }
}

pub fn help_text(default_realm: &str) -> String {
    HELP.replace("{realm}", default_realm)
}

/// Produce the reply to one message, or `None` when it is not a command
pub async fn dispatch<T: Transport, L: ItemLookup>(
    ctx: &MessageContext<'_, T, L>,
    message: &Message,
) -> Option<String> {
    let content = message.content.trim();
    let body = content.strip_prefix(PREFIX)?;
    tracing::info!("{}:> {}", message.author, content);

    let tokens: Vec<&str> = body.split_whitespace().collect();
    let Some((name, args)) = tokens.split_first() else {
        return Some(INVALID_COMMAND.to_string());
    };
    let Some(command) = ChatCommand::from_name(name) else {
        return Some(INVALID_COMMAND.to_string());
    };

    let reply = match command {
        ChatCommand::Help if args.is_empty() => help_text(ctx.default_realm),
        ChatCommand::Help => INVALID_COMMAND.to_string(),
        ChatCommand::Character(query) => {
            match query.validate(args, ctx.realms, ctx.default_realm) {
                Some(args) => query.execute(ctx, &args).await,
                None => INVALID_COMMAND.to_string(),
            }
        }
    };
    Some(reply)
}
