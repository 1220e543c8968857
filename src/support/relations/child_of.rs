use async_trait::async_trait;

use super::{BelongsTo, Related, Resolve};
use crate::error::Result;
use crate::support::attributes::Value;
use crate::support::builder::Builder;
use crate::support::model::Model;

/// The parent a model was loaded through.
///
/// Resolves to the in-memory parent and never touches the network. A
/// parent of another type than the builder's resolves to nothing.
#[derive(Debug, Clone)]
pub struct ChildOf(BelongsTo);

impl ChildOf {
    #[must_use]
    pub fn new(builder: Builder, child: Model, foreign_key: impl Into<String>) -> Self {
        Self(BelongsTo::new(builder, child, foreign_key))
    }

    #[must_use]
    pub fn child(&self) -> &Model {
        self.0.child()
    }

    #[must_use]
    pub fn foreign_key_name(&self) -> &str {
        self.0.foreign_key_name()
    }

    #[must_use]
    pub fn foreign_key(&self) -> Value {
        self.0.foreign_key()
    }
}

#[async_trait]
impl Resolve for ChildOf {
    fn builder(&self) -> &Builder {
        self.0.builder()
    }

    fn builder_mut(&mut self) -> &mut Builder {
        self.0.builder_mut()
    }

    fn parent(&self) -> &Model {
        self.0.child()
    }

    async fn resolve(&self) -> Result<Related> {
        let wanted = self.0.builder().kind();
        let parent = self
            .0
            .child()
            .parent()
            .filter(|parent| Some(parent.kind()) == wanted);

        Ok(parent.cloned().into())
    }
}
