//! User Name Value Object
//!
//! ユーザー名はログインと表示に使う公開ハンドル。
//!
//! ## 不変条件
//! - NFKC正規化と前後の空白除去の後に検証する
//! - 長さ: 3〜30文字
//! - 使用可能文字: ASCII英数字と `_` `.` `-`
//! - 大文字小文字は保持し、一意性も入力どおりに判定する

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

/// Minimum length for user name (in characters)
pub const USER_NAME_MIN_LENGTH: usize = 3;

/// Maximum length for user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 30;

const ALLOWED_SPECIAL_CHARS: &[char] = &['_', '.', '-'];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserNameError {
    #[error("Username is required")]
    Empty,

    #[error("Username is too short ({length} chars, minimum {min})")]
    TooShort { length: usize, min: usize },

    #[error("Username is too long ({length} chars, maximum {max})")]
    TooLong { length: usize, max: usize },

    #[error("Username cannot contain whitespace")]
    ContainsWhitespace,

    #[error("Invalid character '{char}' in username. Only letters, digits, _, . and - are allowed")]
    InvalidCharacter { char: char },
}

/// Validated user name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName(String);

impl UserName {
    pub fn new(input: impl AsRef<str>) -> Result<Self, UserNameError> {
        let normalized: String = input.as_ref().nfkc().collect::<String>().trim().to_string();
        Self::validate(&normalized)?;
        Ok(Self(normalized))
    }

    fn validate(name: &str) -> Result<(), UserNameError> {
        if name.is_empty() {
            return Err(UserNameError::Empty);
        }

        let length = name.chars().count();
        if length < USER_NAME_MIN_LENGTH {
            return Err(UserNameError::TooShort {
                length,
                min: USER_NAME_MIN_LENGTH,
            });
        }
        if length > USER_NAME_MAX_LENGTH {
            return Err(UserNameError::TooLong {
                length,
                max: USER_NAME_MAX_LENGTH,
            });
        }

        if name.chars().any(char::is_whitespace) {
            return Err(UserNameError::ContainsWhitespace);
        }

        if let Some(bad) = name
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || ALLOWED_SPECIAL_CHARS.contains(c)))
        {
            return Err(UserNameError::InvalidCharacter { char: bad });
        }

        Ok(())
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for UserName {
    type Error = UserNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserName> for String {
    fn from(value: UserName) -> Self {
        value.0
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_user_names() {
        assert_eq!(UserName::new("alice").unwrap().as_str(), "alice");
        assert_eq!(UserName::new("  Bob_99 ").unwrap().as_str(), "Bob_99");
        assert!(UserName::new("first.last-2").is_ok());
    }

    #[test]
    fn test_case_is_preserved() {
        let a = UserName::new("Alice").unwrap();
        let b = UserName::new("alice").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_fullwidth_input_is_normalized() {
        // Fullwidth "ａｌｉｃｅ" folds to ASCII under NFKC
        assert_eq!(UserName::new("ａｌｉｃｅ").unwrap().as_str(), "alice");
    }

    #[test]
    fn test_invalid_user_names() {
        assert_eq!(UserName::new("   ").unwrap_err(), UserNameError::Empty);
        assert!(matches!(
            UserName::new("ab"),
            Err(UserNameError::TooShort { .. })
        ));
        assert!(matches!(
            UserName::new("a".repeat(31)),
            Err(UserNameError::TooLong { .. })
        ));
        assert_eq!(
            UserName::new("al ice").unwrap_err(),
            UserNameError::ContainsWhitespace
        );
        assert_eq!(
            UserName::new("alice!").unwrap_err(),
            UserNameError::InvalidCharacter { char: '!' }
        );
    }

    #[test]
    fn test_serde_validates() {
        let parsed: Result<UserName, _> = serde_json::from_str("\"x\"");
        assert!(parsed.is_err());
        let parsed: UserName = serde_json::from_str("\"alice\"").unwrap();
        assert_eq!(parsed.as_str(), "alice");
    }
}
