/// Host capability for yes/no confirmation before destructive actions.
pub trait Prompt {
    async fn confirm(&self, message: &str) -> bool;
}
