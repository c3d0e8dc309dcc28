//! Contact payload parsing and field validation

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

use super::error::HandlerError;

/// Upper bound on `name`, in characters
pub const NAME_MAX_CHARS: usize = 100;
/// Upper bound on `message`, in characters
pub const MESSAGE_MAX_CHARS: usize = 1000;

/// `local@domain.tld`: no whitespace, exactly one `@`, a dot after it
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// Form fields submitted by a user
///
/// Empty strings and non-string JSON values are stored as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactPayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

/// Expected, caller-facing validation failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    MethodNotAllowed,
    MissingFields,
    InvalidEmail,
    TooLong,
}

impl Rejection {
    pub const fn status(self) -> u16 {
        match self {
            Self::MethodNotAllowed => 405,
            Self::MissingFields | Self::InvalidEmail | Self::TooLong => 400,
        }
    }

    pub const fn message(self) -> &'static str {
        match self {
            Self::MethodNotAllowed => "Method Not Allowed",
            Self::MissingFields => "name, email, message は必須です",
            Self::InvalidEmail => "有効なメールアドレスを入力してください",
            Self::TooLong => "入力内容が長すぎます",
        }
    }
}

impl ContactPayload {
    /// Parse a raw request body
    ///
    /// An absent body is treated as `{}`. Malformed JSON and a literal
    /// `null` are errors; any other non-object value yields no fields.
    pub fn parse(body: Option<&str>) -> Result<Self, HandlerError> {
        let value: Value = match body {
            Some(raw) => serde_json::from_str(raw)?,
            None => return Ok(Self::default()),
        };

        match value {
            Value::Null => Err(HandlerError::NullBody),
            Value::Object(map) => {
                let field = |key: &str| {
                    map.get(key)
                        .and_then(Value::as_str)
                        .filter(|s| !s.is_empty())
                        .map(ToString::to_string)
                };
                Ok(Self {
                    name: field("name"),
                    email: field("email"),
                    message: field("message"),
                })
            }
            _ => Ok(Self::default()),
        }
    }

    /// Run the field checks in order: presence, email shape, lengths
    pub fn validate(&self) -> Result<(), Rejection> {
        let (Some(name), Some(email), Some(message)) = (
            self.name.as_deref(),
            self.email.as_deref(),
            self.message.as_deref(),
        ) else {
            return Err(Rejection::MissingFields);
        };

        if !is_valid_email(email) {
            return Err(Rejection::InvalidEmail);
        }

        if name.chars().count() > NAME_MAX_CHARS || message.chars().count() > MESSAGE_MAX_CHARS {
            return Err(Rejection::TooLong);
        }

        Ok(())
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}
