use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;

/// B-Fabric deployment the session token was issued by
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum)]
pub enum Environment {
    Test,
    Prod,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Environment::Test => write!(f, "test"),
            Environment::Prod => write!(f, "prod"),
        }
    }
}

impl FromStr for Environment {
    type Err = anyhow::Error;

    /// Tokens spell the environment in mixed case ("Test", "Production")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "test" => Ok(Environment::Test),
            "prod" | "production" => Ok(Environment::Prod),
            other => Err(anyhow::anyhow!("unknown environment '{other}'")),
        }
    }
}
