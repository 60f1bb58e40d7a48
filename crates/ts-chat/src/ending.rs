/// Text whose presence in a reply ends the roleplay.
pub const END_SENTINEL: &str = "The end";

/// Whether `reply` tells the session to stop.
///
/// The match is a case-sensitive substring search, so "the end" or
/// "The End." keep the story going.
pub fn is_roleplay_finished(reply: &str) -> bool {
    reply.contains(END_SENTINEL)
}
