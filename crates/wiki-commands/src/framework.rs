//! Poise framework setup, command filters and rejection handling.

use crate::adapter;
use crate::filter::{Denial, FilterChain};
use crate::model::{Actor, CommandInvocation};
use crate::registry::CommandRegistry;
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use wiki_config::{Config, ConfigCache, DiscordConfig};

/// Reply sent when a command fails for an unexpected reason.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong while running this command";

/// Application data accessible in all commands.
#[derive(Debug)]
pub struct Data {
    /// Application configuration.
    pub config: ConfigCache,
    /// Command metadata used by the filters.
    pub registry: Arc<CommandRegistry>,
    /// Filters run before every command.
    pub filters: Arc<FilterChain>,
}

impl Data {
    /// Creates the framework data.
    pub fn new(config: Arc<Config>, registry: CommandRegistry, filters: FilterChain) -> Self {
        Self {
            config: ConfigCache::from_shared(config),
            registry: Arc::new(registry),
            filters: Arc::new(filters),
        }
    }

    /// Runs the filter chain for `actor` invoking `command`.
    pub fn evaluate(&self, command: &str, actor: &dyn Actor) -> Option<Denial> {
        let metadata = self.registry.metadata_for(command);
        self.filters
            .evaluate(&CommandInvocation::new(command, actor), &metadata)
    }

    /// Whether any filter applies to one of `path`, the qualified names of a
    /// command and its parents.
    pub fn needs_actor(&self, path: &[&str]) -> bool {
        path.iter()
            .any(|command| self.filters.applies_to(&self.registry.metadata_for(command)))
    }

    /// Runs the filter chain for every command of `path`, parents first.
    ///
    /// Requirements on a parent command also gate its subcommands.
    pub fn evaluate_path(&self, path: &[&str], actor: &dyn Actor) -> Option<Denial> {
        path.iter().find_map(|command| self.evaluate(command, actor))
    }
}

/// Marks an invocation whose filters already passed.
///
/// Poise runs the command check again for each parent of a subcommand.
struct FiltersPassed;

/// Application error type for commands.
pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// Command context type.
pub type Context<'a> = poise::Context<'a, Data, Error>;

/// Every command of the bot.
pub fn commands() -> Vec<poise::Command<Data, Error>> {
    vec![
        crate::say::say(),
        crate::staff_only::staff_only(),
        crate::clicker::clicker(),
    ]
}

/// Qualified names of `commands` and their subcommands, with their guild-only flag.
pub fn command_names(commands: &[poise::Command<Data, Error>]) -> Vec<(String, bool)> {
    let mut names = Vec::new();
    collect_names(commands, None, &mut names);
    names
}

// Subcommand qualified names are only filled in once the framework is built
fn collect_names(
    commands: &[poise::Command<Data, Error>],
    parent: Option<&str>,
    names: &mut Vec<(String, bool)>,
) {
    for command in commands {
        let name = match parent {
            Some(parent) => format!("{parent} {}", command.name),
            None => command.name.clone(),
        };
        collect_names(&command.subcommands, Some(&name), names);
        names.push((name, command.guild_only));
    }
}

/// Builds the registry for `commands`, seeded from the configuration.
pub fn prepare_registry(
    config: &Config,
    commands: &[poise::Command<Data, Error>],
) -> CommandRegistry {
    let mut registry = CommandRegistry::from_config(&config.commands);
    let names = command_names(commands);
    registry.sync_with_commands(names.iter().map(|(name, guild_only)| (name.as_str(), *guild_only)));
    registry
}

/// Text command prefixes; `<ping>` turns into mention-as-prefix.
pub fn prefix_options(discord: &DiscordConfig) -> poise::PrefixFrameworkOptions<Data, Error> {
    let mut literals = discord.literal_prefixes();
    poise::PrefixFrameworkOptions {
        prefix: literals.next().map(str::to_string),
        // Prefixes live as long as the framework, which lives as long as the process
        additional_prefixes: literals
            .map(|p| poise::Prefix::Literal(Box::leak(p.to_string().into_boxed_str())))
            .collect(),
        mention_as_prefix: discord.use_ping_as_prefix(),
        ..Default::default()
    }
}

/// Framework options: commands, prefixes, owners and the filter/rejection hooks.
pub fn framework_options(config: &Config) -> poise::FrameworkOptions<Data, Error> {
    poise::FrameworkOptions {
        commands: commands(),
        prefix_options: prefix_options(&config.discord),
        owners: config
            .discord
            .owner_ids
            .iter()
            .map(|id| serenity::UserId::new(id.get()))
            .collect(),
        initialize_owners: true,
        command_check: Some(|ctx| Box::pin(run_command_filters(ctx))),
        on_error: |error| Box::pin(on_error(error)),
        pre_command: |ctx| {
            Box::pin(async move {
                debug!(
                    "Executing '{}' for user {}",
                    ctx.command().qualified_name,
                    ctx.author().id
                );
            })
        },
        ..Default::default()
    }
}

/// Creates a new Poise framework.
pub fn build_framework(config: Arc<Config>) -> poise::Framework<Data, Error> {
    poise::Framework::builder()
        .options(framework_options(&config))
        .setup(move |ctx, ready, framework| {
            Box::pin(async move { setup(ctx, ready, framework, config).await })
        })
        .build()
}

async fn setup(
    ctx: &serenity::Context,
    ready: &serenity::Ready,
    framework: &poise::Framework<Data, Error>,
    config: Arc<Config>,
) -> Result<Data, Error> {
    let commands = &framework.options().commands;
    register_commands(ctx, commands, &config).await?;

    let registry = prepare_registry(&config, commands);
    info!(
        "{} is connected and ready with {} commands",
        ready.user.name,
        registry.len()
    );

    Ok(Data::new(config, registry, FilterChain::with_defaults()))
}

async fn register_commands(
    ctx: &serenity::Context,
    commands: &[poise::Command<Data, Error>],
    config: &Config,
) -> Result<(), Error> {
    if config.environment.is_dev() {
        for guild_id in &config.discord.test_guild_ids {
            let guild_id = serenity::GuildId::new(guild_id.get());
            poise::builtins::register_in_guild(ctx, commands, guild_id).await?;
            info!("Registered commands in test guild {}", guild_id);
        }
    } else {
        poise::builtins::register_globally(ctx, commands).await?;
        info!("Registered commands globally");
    }
    Ok(())
}

/// Qualified names of the invoked command's parents, then of the command itself.
fn command_path<'a>(ctx: Context<'a>) -> Vec<&'a str> {
    ctx.parent_commands()
        .iter()
        .copied()
        .chain(std::iter::once(ctx.command()))
        .map(|command| command.qualified_name.as_str())
        .collect()
}

/// Command check running the filter chain; denials surface as [`Denial`] errors.
///
/// The member and guild are only looked up when a filter applies, so
/// ungated commands never depend on that lookup.
async fn run_command_filters(ctx: Context<'_>) -> Result<bool, Error> {
    if ctx.invocation_data::<FiltersPassed>().await.is_some() {
        return Ok(true);
    }

    let path = command_path(ctx);
    let data = ctx.data();
    if data.needs_actor(&path) {
        let actor = adapter::invocation_actor(ctx).await?;
        if let Some(denial) = data.evaluate_path(&path, &actor) {
            return Err(denial.into());
        }
    }

    ctx.set_invocation_data(FiltersPassed).await;
    Ok(true)
}

/// Replies to the invoking user with an ephemeral message.
async fn reject(ctx: Context<'_>, message: &str) {
    let reply = poise::CreateReply::default().content(message).ephemeral(true);
    if let Err(e) = ctx.send(reply).await {
        warn!(
            "Could not send rejection for '{}': {}",
            ctx.command().qualified_name,
            e
        );
    }
}

/// Error handler answering denials and command failures ephemerally.
pub async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::CommandCheckFailed {
            error: Some(error),
            ctx,
            ..
        } => {
            if let Some(denial) = error.downcast_ref::<Denial>() {
                reject(ctx, &denial.reason).await;
            } else {
                error!(
                    "Could not evaluate filters for '{}': {}",
                    ctx.command().qualified_name,
                    error
                );
                reject(ctx, GENERIC_FAILURE_MESSAGE).await;
            }
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!(
                "Command '{}' failed: {}",
                ctx.command().qualified_name,
                error
            );
            let message = if ctx.data().config.is_dev() {
                format!("{GENERIC_FAILURE_MESSAGE}: {error}")
            } else {
                GENERIC_FAILURE_MESSAGE.to_string()
            };
            reject(ctx, &message).await;
        }
        other => {
            if let Err(e) = poise::builtins::on_error(other).await {
                error!("Error while handling command error: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::MISSING_ROLES_MESSAGE;
    use crate::model::{GuildSnapshot, MemberSnapshot, Role};
    use crate::registry::STAFF_ONLY_COMMAND;
    use wiki_common::{GuildId, RoleId, UserId};

    fn config() -> Config {
        let mut config = Config::default();
        config.discord.token = "token".to_string();
        config.discord.prefixes = vec!["<ping>".to_string(), "!".to_string(), "w!".to_string()];
        config.commands.staff_role_id = Some(RoleId(1));
        config
    }

    #[test]
    fn test_command_names_include_subcommands() {
        let names = command_names(&commands());
        let names: Vec<_> = names.iter().map(|(n, _)| n.as_str()).collect();

        assert!(names.contains(&"say"));
        assert!(names.contains(&STAFF_ONLY_COMMAND));
        assert!(names.contains(&"clicker"));
        assert!(names.contains(&"clicker ephemeral"));
    }

    #[test]
    fn test_prefix_options() {
        let options = prefix_options(&config().discord);

        assert_eq!(options.prefix.as_deref(), Some("!"));
        assert_eq!(options.additional_prefixes.len(), 1);
        assert!(options.mention_as_prefix);
    }

    #[test]
    fn test_staff_only_is_guild_only_and_gated() {
        let config = config();
        let registry = prepare_registry(&config, &commands());
        let metadata = registry.get(STAFF_ONLY_COMMAND).unwrap();

        assert!(metadata.is_guild_only());
        assert_eq!(metadata.find_required_roles().unwrap().roles(), &[RoleId(1)]);
    }

    #[test]
    fn test_data_evaluate() {
        let config = config();
        let registry = prepare_registry(&config, &commands());
        let data = Data::new(Arc::new(config), registry, FilterChain::with_defaults());

        let guild = GuildSnapshot::new(GuildId(10), [Role::new(RoleId(1), "staff")]);
        let staff = MemberSnapshot::in_guild(UserId(1), "staff", guild.clone(), [RoleId(1)]);
        let visitor = MemberSnapshot::in_guild(UserId(2), "visitor", guild, Vec::new());

        assert_eq!(data.evaluate(STAFF_ONLY_COMMAND, &staff), None);
        assert_eq!(
            data.evaluate(STAFF_ONLY_COMMAND, &visitor).map(|d| d.reason),
            Some(MISSING_ROLES_MESSAGE.to_string())
        );
        assert_eq!(data.evaluate("say", &visitor), None);
    }

    #[test]
    fn test_ungated_commands_need_no_actor() {
        let config = config();
        let registry = prepare_registry(&config, &commands());
        let data = Data::new(Arc::new(config), registry, FilterChain::with_defaults());

        assert!(!data.needs_actor(&["say"]));
        assert!(!data.needs_actor(&["clicker", "clicker ephemeral"]));
        assert!(data.needs_actor(&[STAFF_ONLY_COMMAND]));
    }

    #[test]
    fn test_parent_requirements_gate_subcommands() {
        let mut config = config();
        config
            .commands
            .required_roles
            .insert("clicker".to_string(), vec![RoleId(1)]);
        let registry = prepare_registry(&config, &commands());
        let data = Data::new(Arc::new(config), registry, FilterChain::with_defaults());

        let guild = GuildSnapshot::new(GuildId(10), [Role::new(RoleId(1), "staff")]);
        let staff = MemberSnapshot::in_guild(UserId(1), "staff", guild.clone(), [RoleId(1)]);
        let visitor = MemberSnapshot::in_guild(UserId(2), "visitor", guild, Vec::new());
        let path = ["clicker", "clicker ephemeral"];

        assert!(data.needs_actor(&path));
        assert_eq!(data.evaluate_path(&path, &staff), None);
        assert_eq!(
            data.evaluate_path(&path, &visitor).map(|d| d.reason),
            Some(MISSING_ROLES_MESSAGE.to_string())
        );
    }

    #[test]
    fn test_data_reads_environment_from_config_cache() {
        let mut config = config();
        let registry = prepare_registry(&config, &commands());
        let data = Data::new(Arc::new(config.clone()), registry.clone(), FilterChain::new());
        assert!(!data.config.is_dev());

        config.environment = wiki_config::Environment::Development;
        let data = Data::new(Arc::new(config), registry, FilterChain::new());
        assert!(data.config.is_dev());
    }
}
