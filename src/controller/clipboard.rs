use std::io;

/// Host capability for putting text on the system clipboard.
pub trait Clipboard {
    async fn write_text(&self, text: &str) -> io::Result<()>;
}
