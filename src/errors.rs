use std::ops::Deref;

use thiserror::Error;

#[derive(Debug, Error)]
#[error(transparent)]
/// Default rejection type for a [Task](`crate::Task`)
///
/// Computations that do not care about a specific rejection type can use
/// this wrapper to carry any error through the rejection channel.
pub struct Error(Box<dyn std::error::Error + Send + Sync>);

impl Error {
    pub fn new<E: std::error::Error + Send + Sync + 'static>(err: E) -> Self {
        Self(Box::new(err))
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self(err.into())
    }
}

impl Deref for Error {
    type Target = Box<dyn std::error::Error + Send + Sync>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
