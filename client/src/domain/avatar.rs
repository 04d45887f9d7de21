//! Avatar choices: catalogue presets or uploaded images embedded as data URLs.
//!
//! Reading the file is the shell's job; this module only decides whether the
//! bytes it hands over may be embedded in a profile update.

use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

/// Largest uploaded avatar accepted, in bytes (5 MiB).
pub const MAX_AVATAR_BYTES: usize = 5 * 1024 * 1024;

const ALLOWED_MIME_TYPES: [&str; 4] = ["image/png", "image/jpeg", "image/gif", "image/webp"];

/// Reasons an uploaded avatar is refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AvatarError {
    #[error("avatar image is empty")]
    Empty,
    #[error("avatar type {mime} is not supported")]
    UnsupportedType { mime: String },
    #[error("avatar is {size} bytes; the limit is {max} bytes")]
    TooLarge { size: usize, max: usize },
    #[error("avatar data URL is malformed")]
    MalformedDataUrl,
}

impl AvatarError {
    /// Stable code reported to the avatar selector.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::UnsupportedType { .. } => "unsupported_type",
            Self::TooLarge { .. } => "too_large",
            Self::MalformedDataUrl => "malformed",
        }
    }
}

/// An uploaded image encoded as `data:<mime>;base64,<payload>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AvatarImage(String);

impl AvatarImage {
    /// Encode raw image bytes, enforcing the type allow-list and size cap.
    ///
    /// # Examples
    /// ```
    /// use rooms_client::domain::AvatarImage;
    ///
    /// let image = AvatarImage::from_bytes("image/png", &[0x89, b'P', b'N', b'G']).expect("small png");
    /// assert!(image.as_ref().starts_with("data:image/png;base64,"));
    /// ```
    pub fn from_bytes(mime: &str, bytes: &[u8]) -> Result<Self, AvatarError> {
        let mime = normalise_mime(mime)?;
        check_size(bytes.len())?;
        Ok(Self(format!("data:{mime};base64,{}", STANDARD.encode(bytes))))
    }

    /// Validate an existing data URL, such as one echoed back by the backend.
    pub fn from_data_url(data_url: &str) -> Result<Self, AvatarError> {
        let rest = data_url
            .strip_prefix("data:")
            .ok_or(AvatarError::MalformedDataUrl)?;
        let (mime, payload) = rest
            .split_once(";base64,")
            .ok_or(AvatarError::MalformedDataUrl)?;
        let bytes = STANDARD
            .decode(payload)
            .map_err(|_| AvatarError::MalformedDataUrl)?;
        Self::from_bytes(mime, &bytes)
    }
}

fn normalise_mime(mime: &str) -> Result<String, AvatarError> {
    let lowered = mime.trim().to_ascii_lowercase();
    if ALLOWED_MIME_TYPES.contains(&lowered.as_str()) {
        Ok(lowered)
    } else {
        Err(AvatarError::UnsupportedType {
            mime: mime.to_owned(),
        })
    }
}

fn check_size(size: usize) -> Result<(), AvatarError> {
    if size == 0 {
        return Err(AvatarError::Empty);
    }
    if size > MAX_AVATAR_BYTES {
        return Err(AvatarError::TooLarge {
            size,
            max: MAX_AVATAR_BYTES,
        });
    }
    Ok(())
}

impl AsRef<str> for AvatarImage {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for AvatarImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<AvatarImage> for String {
    fn from(value: AvatarImage) -> Self {
        value.0
    }
}

impl TryFrom<String> for AvatarImage {
    type Error = AvatarError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_data_url(&value)
    }
}

/// The avatar a user picked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum AvatarChoice {
    /// A preset from the avatar catalogue, referenced by id.
    Preset { id: String },
    /// An uploaded image.
    Upload { image: AvatarImage },
}
