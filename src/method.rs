//! Confidentiality method applied before hiding / after extracting.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How the secret is protected before it is hidden.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// Hide the secret as-is.
    #[default]
    None,
    /// Encrypt with a shared password.
    Symmetric,
    /// Encrypt for the holder of a private key.
    Asymmetric,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::None => "none",
            Method::Symmetric => "symmetric",
            Method::Asymmetric => "asymmetric",
        }
    }

    /// Returns true if this method needs key material.
    pub fn requires_key(&self) -> bool {
        !matches!(self, Method::None)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown [`Method`] name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown method: {0}. Expected: none | symmetric | asymmetric")]
pub struct ParseMethodError(String);

impl FromStr for Method {
    type Err = ParseMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "plain" => Ok(Method::None),
            "symmetric" | "aes" | "password" => Ok(Method::Symmetric),
            "asymmetric" | "rsa" | "public-key" | "pubkey" => Ok(Method::Asymmetric),
            _ => Err(ParseMethodError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!("none".parse::<Method>(), Ok(Method::None));
        assert_eq!("AES".parse::<Method>(), Ok(Method::Symmetric));
        assert_eq!(" password ".parse::<Method>(), Ok(Method::Symmetric));
        assert_eq!("rsa".parse::<Method>(), Ok(Method::Asymmetric));
        assert_eq!("public-key".parse::<Method>(), Ok(Method::Asymmetric));
    }

    #[test]
    fn test_parse_unknown() {
        assert!("rot13".parse::<Method>().is_err());
    }

    #[test]
    fn test_display_roundtrip() {
        for method in [Method::None, Method::Symmetric, Method::Asymmetric] {
            assert_eq!(method.to_string().parse::<Method>(), Ok(method));
        }
    }

    #[test]
    fn test_requires_key() {
        assert!(!Method::None.requires_key());
        assert!(Method::Symmetric.requires_key());
        assert!(Method::Asymmetric.requires_key());
    }
}
