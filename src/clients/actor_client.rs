use crate::framework::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Lookup and removal shared by resource-specific clients.
///
/// Implementors only expose their inner [`ResourceClient`]; errors are
/// converted through `From<FrameworkError>`.
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: From<FrameworkError> + Send + Sync;

    fn inner(&self) -> &ResourceClient<T>;

    /// Fetch an entity by id, `None` when absent.
    #[instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        debug!("Sending request");
        Ok(self.inner().get(id).await?)
    }

    /// Fetch an entity that must exist.
    #[instrument(skip(self))]
    async fn require(&self, id: T::Id) -> Result<T, Self::Error> {
        match self.inner().get(id.clone()).await? {
            Some(item) => Ok(item),
            None => Err(FrameworkError::NotFound(id.to_string()).into()),
        }
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        debug!("Sending request");
        Ok(self.inner().delete(id).await?)
    }
}
