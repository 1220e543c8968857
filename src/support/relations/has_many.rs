use async_trait::async_trait;

use super::{Related, Resolve};
use crate::error::Result;
use crate::support::builder::Builder;
use crate::support::model::Model;

/// Every record of the related type listed under the parent.
#[derive(Debug, Clone)]
pub struct HasMany {
    builder: Builder,
    parent: Model,
}

impl HasMany {
    #[must_use]
    pub fn new(builder: Builder, parent: Model) -> Self {
        Self { builder, parent }
    }
}

#[async_trait]
impl Resolve for HasMany {
    fn builder(&self) -> &Builder {
        &self.builder
    }

    fn builder_mut(&mut self) -> &mut Builder {
        &mut self.builder
    }

    fn parent(&self) -> &Model {
        &self.parent
    }

    async fn resolve(&self) -> Result<Related> {
        Ok(Related::Many(self.builder.get().await?))
    }
}
