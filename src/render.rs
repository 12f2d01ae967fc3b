use std::io::Write;

/// Display of the running transcript.
pub trait TranscriptRenderer: Send {
    /// Show one exchange. The reply may contain lightweight markup.
    fn render(&mut self, user: &str, assistant: &str);

    /// Drop everything shown so far.
    fn clear(&mut self);
}

/// Writes the transcript as plain `User:` / `AI:` lines.
pub struct TerminalRenderer<W> {
    out: W,
}

impl TerminalRenderer<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write(&mut self, text: &str) {
        if let Err(err) = self
            .out
            .write_all(text.as_bytes())
            .and_then(|_| self.out.flush())
        {
            log::warn!("Transcript write failed: {err}");
        }
    }
}

impl<W: Write + Send> TranscriptRenderer for TerminalRenderer<W> {
    fn render(&mut self, user: &str, assistant: &str) {
        self.write(&format!("User: {user}\nAI: {assistant}\n"));
    }

    fn clear(&mut self) {
        self.write("--- chat history cleared ---\n");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_user_then_ai_line() {
        let mut renderer = TerminalRenderer::new(Vec::new());
        renderer.render("what is the time", "It's **3 PM**.");
        let out = String::from_utf8(renderer.into_inner()).expect("utf8");
        assert_eq!(out, "User: what is the time\nAI: It's **3 PM**.\n");
    }

    #[test]
    fn clear_marks_the_break() {
        let mut renderer = TerminalRenderer::new(Vec::new());
        renderer.render("a", "b");
        renderer.clear();
        let out = String::from_utf8(renderer.into_inner()).expect("utf8");
        assert!(out.ends_with("--- chat history cleared ---\n"));
    }
}
