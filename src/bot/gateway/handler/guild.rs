use dioxus_logger::tracing;
use serenity::all::{Context, Guild, UnavailableGuild};

use crate::model::session::ServerSummary;

use super::Handler;

fn server_summary(guild: &Guild) -> ServerSummary {
    ServerSummary {
        name: guild.name.clone(),
        id: guild.id.get(),
        member_count: guild.member_count,
    }
}

/// Sorts servers by name, ignoring case.
fn sort_servers(servers: &mut [ServerSummary]) {
    servers.sort_by_key(|server| server.name.to_lowercase());
}

/// Servers currently in the cache, sorted by name.
pub fn cached_servers(ctx: &Context) -> Vec<ServerSummary> {
    let mut servers: Vec<ServerSummary> = ctx
        .cache
        .guilds()
        .into_iter()
        .filter_map(|guild_id| ctx.cache.guild(guild_id).map(|guild| server_summary(&guild)))
        .collect();
    sort_servers(&mut servers);
    servers
}

pub fn refresh_servers(handler: &Handler, ctx: &Context) {
    handler.wiring.signals.servers_changed(cached_servers(ctx));
}

pub async fn handle_guild_create(handler: &Handler, ctx: Context, guild: Guild) {
    tracing::debug!(
        "Guild create event: {} ({}) - member_count: {}",
        guild.name,
        guild.id,
        guild.member_count
    );
    refresh_servers(handler, &ctx);
}

pub async fn handle_guild_delete(handler: &Handler, ctx: Context, incomplete: UnavailableGuild) {
    if incomplete.unavailable {
        tracing::warn!("Guild {} became unavailable", incomplete.id);
    } else {
        tracing::info!("Removed from guild {}", incomplete.id);
    }
    refresh_servers(handler, &ctx);
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::serenity::create_test_guild;

    /// Tests the server list shown on the control panel.
    ///
    /// Expected: summaries carry name, id and member count, sorted case-insensitively
    #[test]
    fn summaries_sorted_by_name() {
        let mut servers = vec![
            server_summary(&create_test_guild(3, "tavern", 12, 0)),
            server_summary(&create_test_guild(1, "Guild Hall", 40, 2)),
            server_summary(&create_test_guild(2, "armoury", 5, 1)),
        ];

        sort_servers(&mut servers);

        let names: Vec<&str> = servers.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["armoury", "Guild Hall", "tavern"]);
        assert_eq!(servers[1].id, 1);
        assert_eq!(servers[1].member_count, 40);
    }
}
