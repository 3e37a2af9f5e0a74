//! Fixed values shared across tests.

/// A token with the shape of a Discord bot token. It authenticates nowhere.
pub const TEST_TOKEN: &str =
    "MTIzNDU2Nzg5MDEyMzQ1Njc4OQ.Gx7kPq.T3stT0kenN0tR3alAtAllJustPadd1ngXYZ";

pub const TEST_GUILD_ID: u64 = 197038439483310086;
pub const TEST_USER_ID: u64 = 175928847299117063;
pub const TEST_CHANNEL_ID: u64 = 381870553235193857;
