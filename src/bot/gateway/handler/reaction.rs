use dioxus_logger::tracing;
use serenity::all::{Reaction, ReactionType};

use super::Handler;

/// Resumes commands waiting for this reaction.
pub fn handle_reaction_add(handler: &Handler, reaction: Reaction) {
    let Some(user_id) = reaction.user_id else {
        return;
    };
    let ReactionType::Unicode(emoji) = &reaction.emoji else {
        return;
    };

    let resumed = handler.wiring.dispatcher.suspensions().notify_reaction(
        reaction.message_id.get(),
        user_id.get(),
        emoji,
    );
    if resumed > 0 {
        tracing::debug!(
            "Reaction {} on message {} resumed {} command(s)",
            emoji,
            reaction.message_id,
            resumed
        );
    }
}
