use anyhow::Result;
use chrono::Utc;
use dotenvy::dotenv;
use log::{debug, error, info};
use serenity::async_trait;
use serenity::model::application::interaction::message_component::MessageComponentInteraction;
use serenity::model::application::interaction::{Interaction, InteractionResponseType};
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::prelude::*;
use std::sync::Arc;

use electives::commands::{default_chain, DecoderChain, Inbound};
use electives::core::Config;
use electives::features::catalog::{load_catalog, CatalogSource};
use electives::features::conversation::{ConversationStore, Dispatcher, Outbox};
use electives::features::reminders::ReminderScheduler;
use electives::message_components::DiscordOutbox;

struct Handler {
    dispatcher: Dispatcher,
    decoders: DecoderChain,
}

impl Handler {
    async fn handle(&self, chat: u64, inbound: Inbound, outbox: &dyn Outbox) {
        let Some((decoder, action)) = self.decoders.decode(&inbound) else {
            debug!("Chat {chat}: no decoder matched {:?}", inbound.source);
            return;
        };
        debug!("Chat {chat}: {decoder} decoded {}", action.name());

        let report = self
            .dispatcher
            .dispatch(chat, action, inbound.now, outbox)
            .await;
        if report.failed > 0 {
            error!(
                "Chat {chat}: {} of {} replies failed to deliver",
                report.failed,
                report.delivered + report.failed
            );
        }
    }

    async fn handle_component(&self, ctx: &Context, component: &MessageComponentInteraction) {
        // Acknowledge first; Discord expects an answer within three seconds.
        if let Err(e) = component
            .create_interaction_response(&ctx.http, |response| {
                response.kind(InteractionResponseType::DeferredUpdateMessage)
            })
            .await
        {
            error!(
                "Failed to acknowledge component '{}': {e}",
                component.data.custom_id
            );
        }

        let outbox = DiscordOutbox::editing(ctx.http.clone(), component.message.id);
        let inbound = Inbound::button(component.data.custom_id.clone(), Utc::now());
        self.handle(component.channel_id.0, inbound, &outbox).await;
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }

        let outbox = DiscordOutbox::new(ctx.http.clone());
        let inbound = Inbound::message(msg.content.clone(), Utc::now());
        self.handle(msg.channel_id.0, inbound, &outbox).await;
    }

    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!("🎉 {} is connected and ready!", ready.user.name);
        info!("📡 Connected to {} guilds", ready.guilds.len());
        info!("🤖 Bot ID: {}", ready.user.id);
        info!("🔌 Decoders: {}", self.decoders.names().join(", "));
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        match interaction {
            Interaction::MessageComponent(component) => {
                self.handle_component(&ctx, &component).await;
            }
            Interaction::Ping(_) => {
                info!("Ping interaction received - Discord health check");
            }
            _ => {}
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting course electives bot...");

    let source = CatalogSource::parse(&config.catalog_source);
    let catalog = load_catalog(&source).await.map_err(|e| {
        error!("❌ Failed to load course catalog from {source}: {e}");
        e
    })?;

    let store = ConversationStore::new(catalog.into_shared(), config.utc_offset);
    let handler = Handler {
        dispatcher: Dispatcher::new(store.clone()),
        decoders: default_chain(),
    };

    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    let mut client = Client::builder(&config.discord_token, intents)
        .event_handler(handler)
        .await
        .map_err(|e| {
            error!("Failed to create Discord client: {e}");
            anyhow::anyhow!("Client creation failed: {}", e)
        })?;

    info!("Bot configured successfully. Connecting to Discord gateway...");

    // Start the reminder scheduler
    let scheduler = ReminderScheduler::new(store, config.reminder_interval);
    let outbox: Arc<dyn Outbox> = Arc::new(DiscordOutbox::new(client.cache_and_http.http.clone()));
    tokio::spawn(async move {
        scheduler.run(outbox).await;
    });

    if let Err(why) = client.start().await {
        error!("Gateway connection failed: {why:?}");
        return Err(anyhow::anyhow!(
            "Failed to establish gateway connection: {}",
            why
        ));
    }

    Ok(())
}
