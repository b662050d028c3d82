//! The packing capability and its backends.

use crate::config::{BackendKind, EngineConfig};
use crate::context::PackContext;
use crate::error::PackingError;
use crate::local::LocalPacker;
use crate::remote::{HttpGateway, PackingGateway, RemotePacker};
use crate::types::{ContainerInput, ItemInput, PackingResult};
use std::sync::Arc;

/// Packs items into a single container.
///
/// Calls are independent: implementations hold no per-call state, so one
/// packer may serve many threads.
pub trait Packer: Send + Sync {
    /// Packs `items` into `container`.
    ///
    /// Any error means nothing was packed.
    fn pack(
        &self,
        ctx: &PackContext,
        container: &ContainerInput,
        items: &[ItemInput],
    ) -> Result<PackingResult, PackingError>;

    /// Name reported in [`PackingResult::strategy`].
    fn strategy_name(&self) -> &'static str;
}

impl Packer for LocalPacker {
    fn pack(
        &self,
        ctx: &PackContext,
        container: &ContainerInput,
        items: &[ItemInput],
    ) -> Result<PackingResult, PackingError> {
        LocalPacker::pack(self, ctx, container, items)
    }

    fn strategy_name(&self) -> &'static str {
        Self::STRATEGY_NAME
    }
}

impl Packer for RemotePacker {
    fn pack(
        &self,
        ctx: &PackContext,
        container: &ContainerInput,
        items: &[ItemInput],
    ) -> Result<PackingResult, PackingError> {
        RemotePacker::pack(self, ctx, container, items)
    }

    fn strategy_name(&self) -> &'static str {
        Self::STRATEGY_NAME
    }
}

/// The backend chosen at construction. Never switched per call.
#[derive(Debug, Clone)]
pub enum PackerBackend {
    /// Embedded library.
    Local(LocalPacker),
    /// Remote packing service.
    Remote(RemotePacker),
}

impl PackerBackend {
    /// Local backend.
    pub fn local() -> Self {
        Self::Local(LocalPacker::new())
    }

    /// Remote backend over the given gateway.
    pub fn remote(gateway: Arc<dyn PackingGateway>) -> Self {
        Self::Remote(RemotePacker::new(gateway))
    }

    /// Builds the configured backend.
    ///
    /// A remote backend without gateway settings is a configuration error.
    pub fn from_config(config: &EngineConfig) -> Result<Self, PackingError> {
        match config.backend {
            BackendKind::Local => Ok(Self::local()),
            BackendKind::Remote => {
                let gateway = config.gateway.as_ref().ok_or_else(|| {
                    PackingError::Configuration(
                        "remote backend selected but no gateway is configured".into(),
                    )
                })?;
                let gateway = HttpGateway::new(gateway)?;
                log::info!("using remote packing service at {}", gateway.url());
                Ok(Self::remote(Arc::new(gateway)))
            }
        }
    }
}

impl Packer for PackerBackend {
    fn pack(
        &self,
        ctx: &PackContext,
        container: &ContainerInput,
        items: &[ItemInput],
    ) -> Result<PackingResult, PackingError> {
        match self {
            Self::Local(packer) => packer.pack(ctx, container, items),
            Self::Remote(packer) => packer.pack(ctx, container, items),
        }
    }

    fn strategy_name(&self) -> &'static str {
        match self {
            Self::Local(packer) => Packer::strategy_name(packer),
            Self::Remote(packer) => Packer::strategy_name(packer),
        }
    }
}
