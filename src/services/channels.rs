//! Third-party channel integrations (Tiledesk, WhatsApp).
//!
//! These calls go to the bridge service rather than the agent-builder
//! backend.

use crate::access::DataAccess;
use crate::error::Result;
use crate::types::{
    Ack, ConnectTiledeskRequest, ConnectWhatsappRequest, TiledeskBot, WhatsappChannel,
};
use std::sync::Arc;

/// Service for channel integrations.
#[derive(Clone)]
pub struct ChannelService {
    access: Arc<dyn DataAccess>,
}

impl std::fmt::Debug for ChannelService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChannelService")
            .field("adapter", &self.access.adapter_name())
            .finish()
    }
}

impl ChannelService {
    #[must_use]
    pub fn new(access: Arc<dyn DataAccess>) -> Self {
        Self { access }
    }

    /// The Tiledesk bot connected to an agent, `None` when not connected.
    pub async fn tiledesk_bot(&self, agent_id: &str) -> Result<Option<TiledeskBot>> {
        self.access.get_tiledesk_bot(agent_id).await
    }

    pub async fn connect_tiledesk(
        &self,
        agent_id: &str,
        req: &ConnectTiledeskRequest,
    ) -> Result<TiledeskBot> {
        let bot = self.access.connect_tiledesk_bot(agent_id, req).await?;
        tracing::info!(agent_id, bot_id = %bot.id, "Tiledesk bot connected");
        Ok(bot)
    }

    pub async fn disconnect_tiledesk(&self, agent_id: &str) -> Result<Ack> {
        self.access.disconnect_tiledesk_bot(agent_id).await
    }

    /// The WhatsApp channel bound to an agent, `None` when not connected.
    pub async fn whatsapp_channel(&self, agent_id: &str) -> Result<Option<WhatsappChannel>> {
        self.access.get_whatsapp_channel(agent_id).await
    }

    pub async fn connect_whatsapp(
        &self,
        agent_id: &str,
        req: &ConnectWhatsappRequest,
    ) -> Result<WhatsappChannel> {
        let channel = self.access.connect_whatsapp_channel(agent_id, req).await?;
        tracing::info!(agent_id, channel_id = %channel.id, "WhatsApp channel connected");
        Ok(channel)
    }

    pub async fn disconnect_whatsapp(&self, agent_id: &str) -> Result<Ack> {
        self.access.disconnect_whatsapp_channel(agent_id).await
    }
}
