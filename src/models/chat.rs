use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{ Serialize, Deserialize };

use crate::error::ChatError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// Image types the gateway accepts inline.
///
/// Note `image/jpeg` parses to `Jpg`: the data-URI token the gateway expects
/// is `jpg`, not the MIME subtype.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageType {
    Png,
    Jpg,
    Gif,
    Webp,
}

impl ImageType {
    pub fn from_mime(mime: &str) -> Result<Self, ChatError> {
        let subtype = mime.rsplit('/').next().unwrap_or(mime);
        match subtype.to_lowercase().as_str() {
            "png" => Ok(ImageType::Png),
            "jpg" | "jpeg" => Ok(ImageType::Jpg),
            "gif" => Ok(ImageType::Gif),
            "webp" => Ok(ImageType::Webp),
            _ => Err(ChatError::InvalidImage(mime.to_string())),
        }
    }

    pub fn token(&self) -> &'static str {
        match self {
            ImageType::Png => "png",
            ImageType::Jpg => "jpg",
            ImageType::Gif => "gif",
            ImageType::Webp => "webp",
        }
    }
}

/// Raw image bytes plus the MIME type the uploader declared for them.
#[derive(Clone, Debug)]
pub struct ImageInput {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

/// One content fragment of a [`Turn`].
///
/// Image bytes are base64-encoded exactly once, at construction; the stored
/// payload is already in the gateway's inline-data representation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Part {
    Text { text: String },
    Image { media_type: ImageType, data: String },
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text { text: text.into() }
    }

    pub fn image(image: &ImageInput) -> Result<Self, ChatError> {
        let media_type = ImageType::from_mime(&image.mime_type)?;
        Ok(Part::Image {
            media_type,
            data: BASE64.encode(&image.bytes),
        })
    }

    /// The `data:image/<type>;base64,<payload>` form the gateway consumes.
    pub fn data_url(&self) -> Option<String> {
        match self {
            Part::Text { .. } => None,
            Part::Image { media_type, data } => {
                Some(format!("data:image/{};base64,{}", media_type.token(), data))
            }
        }
    }
}

/// One message in the conversation. Parts are fixed once the turn exists;
/// edits happen by removing and re-appending a turn, never in place.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    role: Role,
    parts: Vec<Part>,
}

impl Turn {
    /// Build a user turn from raw input: prompt text, optional image.
    ///
    /// Part order is fixed: text first (when present), then the image. Fails
    /// with [`ChatError::EmptyInput`] when neither is supplied.
    pub fn from_input(
        prompt: Option<&str>,
        image: Option<&ImageInput>
    ) -> Result<Self, ChatError> {
        let prompt = prompt.filter(|p| !p.is_empty());
        let mut parts = Vec::new();
        if let Some(text) = prompt {
            parts.push(Part::text(text));
        }
        if let Some(image) = image {
            parts.push(Part::image(image)?);
        }
        if parts.is_empty() {
            return Err(ChatError::EmptyInput);
        }
        Ok(Turn { role: Role::User, parts })
    }

    pub fn user(text: impl Into<String>) -> Self {
        Turn {
            role: Role::User,
            parts: vec![Part::text(text)],
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Turn {
            role: Role::Assistant,
            parts: vec![Part::text(text)],
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }
}
