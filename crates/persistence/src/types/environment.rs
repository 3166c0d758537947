//! Hosting environments for rewritten collection links.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, UsageError};

/// The external environment that hosts collection documents.
///
/// Every collection link rewritten by one save points at the same
/// environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostingEnvironment {
    /// European Weather Cloud (selection `1`).
    Ewc,
    /// Amazon Web Services (selection `2`).
    Aws,
}

impl HostingEnvironment {
    /// Resolves a numeric selection: `1` is EWC, `2` is AWS.
    pub fn from_selection(selection: u8) -> Result<Self, UsageError> {
        match selection {
            1 => Ok(HostingEnvironment::Ewc),
            2 => Ok(HostingEnvironment::Aws),
            other => Err(UsageError::InvalidEnvironment {
                selection: other.to_string(),
            }),
        }
    }

    /// Returns the numeric selection for this environment.
    pub fn selection(&self) -> u8 {
        match self {
            HostingEnvironment::Ewc => 1,
            HostingEnvironment::Aws => 2,
        }
    }
}

impl fmt::Display for HostingEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostingEnvironment::Ewc => write!(f, "EWC"),
            HostingEnvironment::Aws => write!(f, "AWS"),
        }
    }
}

impl FromStr for HostingEnvironment {
    type Err = UsageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || UsageError::InvalidEnvironment {
            selection: s.to_string(),
        };
        let selection: u8 = s.trim().parse().map_err(|_| invalid())?;
        Self::from_selection(selection).map_err(|_| invalid())
    }
}

/// Base URLs of the two hosting environments.
///
/// Rewritten collection links point at `{base_url}/{collection_id}`. Trailing
/// `/` characters are trimmed from the base URL first, so
/// `https://ewc.example.org/` and `https://ewc.example.org` give the same href.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostingUrls {
    /// Base URL of the EWC environment.
    pub ewc: String,
    /// Base URL of the AWS environment.
    pub aws: String,
}

impl HostingUrls {
    /// Creates a pair of hosting base URLs.
    pub fn new(ewc: impl Into<String>, aws: impl Into<String>) -> Self {
        Self {
            ewc: ewc.into(),
            aws: aws.into(),
        }
    }

    /// Returns the base URL for an environment.
    pub fn base_url(&self, environment: HostingEnvironment) -> &str {
        match environment {
            HostingEnvironment::Ewc => &self.ewc,
            HostingEnvironment::Aws => &self.aws,
        }
    }

    /// Checks that both base URLs are absolute URLs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for environment in [HostingEnvironment::Ewc, HostingEnvironment::Aws] {
            let url = self.base_url(environment);
            if url.is_empty() {
                return Err(ConfigError::MissingDefinition {
                    name: format!("{} base URL", environment),
                });
            }
            url::Url::parse(url).map_err(|e| ConfigError::InvalidHostingUrl {
                environment: environment.to_string(),
                url: url.to_string(),
                message: e.to_string(),
            })?;
        }
        Ok(())
    }
}
