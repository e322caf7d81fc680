use std::io::{ self, BufRead, Write };
use std::path::Path;

use log::{ info, warn };

use crate::error::ChatError;
use crate::llm::chat::ChatGateway;
use crate::models::chat::{ ImageInput, Part, Turn };
use crate::transcript::Transcript;

/// Terminal front-end for one chat session.
///
/// The blocking read loop makes input single-flight by construction: a
/// gateway call always finishes before the next command can start, so the
/// transcript never sees two operations in flight.
pub struct Repl<'a> {
    gateway: &'a dyn ChatGateway,
    transcript: Transcript,
    staged_image: Option<ImageInput>,
}

impl<'a> Repl<'a> {
    pub fn new(gateway: &'a dyn ChatGateway) -> Self {
        Self {
            gateway,
            transcript: Transcript::new(),
            staged_image: None,
        }
    }

    pub async fn run(mut self) -> Result<(), ChatError> {
        info!("session {} started", self.transcript.id());
        println!("chatflex - type a message, /image <path> to attach, /regen, /quit");

        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();
        loop {
            print!("you> ");
            io::stdout().flush()?;
            let line = match lines.next() {
                Some(line) => line?,
                None => break,
            };
            let line = line.trim();

            if line == "/quit" {
                break;
            } else if line == "/regen" {
                self.regenerate().await;
            } else if let Some(path) = line.strip_prefix("/image ") {
                self.stage_image(path.trim());
            } else {
                self.send(line).await;
            }
        }
        let elapsed = chrono::Utc::now().timestamp() - self.transcript.created_at();
        info!(
            "session {} ended after {} turns in {}s",
            self.transcript.id(),
            self.transcript.len(),
            elapsed
        );
        Ok(())
    }

    fn stage_image(&mut self, path: &str) {
        let Some(mime_type) = mime_for_path(path) else {
            println!("unsupported image type; use png, jpg, gif or webp");
            return;
        };
        match std::fs::read(path) {
            Ok(bytes) => {
                println!("attached {} ({} bytes); it goes out with your next message", path, bytes.len());
                self.staged_image = Some(ImageInput { bytes, mime_type });
            }
            Err(e) => {
                warn!("could not read {}: {}", path, e);
                println!("could not read {}: {}", path, e);
            }
        }
    }

    async fn send(&mut self, prompt: &str) {
        let image = self.staged_image.take();
        let turn = match Turn::from_input(Some(prompt), image.as_ref()) {
            Ok(turn) => turn,
            Err(e) => {
                println!("{}", e);
                return;
            }
        };
        self.transcript.append_user(turn);
        match self.transcript.request_completion(self.gateway).await {
            Ok(reply) => render_reply(&reply),
            // Generic Display only; the detailed cause was already logged.
            Err(e) => println!("{}", e),
        }
    }

    async fn regenerate(&mut self) {
        match self.transcript.regenerate_last(self.gateway).await {
            Ok(Some(reply)) => render_reply(&reply),
            Ok(None) => println!("nothing to regenerate yet"),
            Err(e) => println!("{}", e),
        }
    }
}

fn render_reply(reply: &Turn) {
    for part in reply.parts() {
        if let Part::Text { text } = part {
            println!("assistant> {}", text);
        }
    }
}

fn mime_for_path(path: &str) -> Option<String> {
    let ext = Path::new(path).extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "png" => Some("image/png".to_string()),
        "jpg" | "jpeg" => Some("image/jpeg".to_string()),
        "gif" => Some("image/gif".to_string()),
        "webp" => Some("image/webp".to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_inference_covers_the_uploader_set() {
        assert_eq!(mime_for_path("a.png").as_deref(), Some("image/png"));
        assert_eq!(mime_for_path("photo.JPEG").as_deref(), Some("image/jpeg"));
        assert_eq!(mime_for_path("anim.gif").as_deref(), Some("image/gif"));
        assert_eq!(mime_for_path("pic.webp").as_deref(), Some("image/webp"));
        assert_eq!(mime_for_path("doc.pdf"), None);
        assert_eq!(mime_for_path("noext"), None);
    }
}
