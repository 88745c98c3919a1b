use std::sync::Arc;

use reqwest::Client;

use super::{config::Config, relay::ChatRelay};

pub struct State {
    pub config: Config,
    pub relay: ChatRelay,
}

impl State {
    pub fn new(config: Config) -> Arc<Self> {
        let relay = ChatRelay::from_config(Client::new(), config.chat.clone());

        Arc::new(Self { config, relay })
    }
}
