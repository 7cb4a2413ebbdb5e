//! Entity platform
//!
//! A platform owns the entities one integration added for one domain set.
//! It assigns each entity an entity id, renders its state into the state
//! machine on registration, and re-renders it whenever the entity (or the
//! integration on its behalf) sends an update request.

use std::collections::HashMap;
use std::sync::Arc;

use ha_core::states::STATE_UNKNOWN;
use ha_core::{EntityId, State};
use ha_state_machine::StateMachine;
use serde_json::json;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::entity::{Entity, UpdateRequester};

struct RegisteredEntity {
    entity_id: EntityId,
    entity: Arc<dyn Entity>,
}

pub struct EntityPlatform {
    states: Arc<StateMachine>,
    /// Registered entities keyed by unique id
    entities: HashMap<String, RegisteredEntity>,
    requester: UpdateRequester,
    requests: mpsc::UnboundedReceiver<String>,
}

impl EntityPlatform {
    pub fn new(states: Arc<StateMachine>) -> Self {
        let (requester, requests) = UpdateRequester::channel();
        Self {
            states,
            entities: HashMap::new(),
            requester,
            requests,
        }
    }

    /// Handle entities use to request a re-render
    pub fn update_requester(&self) -> UpdateRequester {
        self.requester.clone()
    }

    /// Register entities and write their initial state
    ///
    /// An entity whose unique id is already registered, or whose name
    /// cannot produce an entity id, is skipped. Returns how many were added.
    pub fn add_entities(&mut self, entities: Vec<Arc<dyn Entity>>) -> usize {
        let mut added = 0;

        for entity in entities {
            let unique_id = entity.unique_id();
            if self.entities.contains_key(&unique_id) {
                warn!(unique_id = %unique_id, "Entity already registered, skipping");
                continue;
            }

            let entity_id = match EntityId::generate(entity.domain(), &entity.name(), |candidate| {
                self.states.contains(candidate)
            }) {
                Ok(entity_id) => entity_id,
                Err(e) => {
                    warn!(unique_id = %unique_id, "Cannot generate entity id: {}", e);
                    continue;
                }
            };

            debug!(unique_id = %unique_id, entity_id = %entity_id, "Adding entity");
            self.entities
                .insert(unique_id.clone(), RegisteredEntity { entity_id, entity });
            self.write_state(&unique_id);
            added += 1;
        }

        if added > 0 {
            info!("Added {} entities", added);
        }
        added
    }

    /// Entity id assigned to a registered entity
    pub fn entity_id(&self, unique_id: &str) -> Option<&EntityId> {
        self.entities.get(unique_id).map(|r| &r.entity_id)
    }

    /// Number of registered entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Render one entity into the state machine
    pub fn write_state(&self, unique_id: &str) -> Option<State> {
        let Some(registered) = self.entities.get(unique_id) else {
            debug!(unique_id, "Update requested for unknown entity");
            return None;
        };

        let entity = &registered.entity;
        let state = entity.state().unwrap_or_else(|| STATE_UNKNOWN.to_string());
        let mut attributes = entity.attributes();
        attributes.insert("friendly_name".to_string(), json!(entity.name()));

        Some(
            self.states
                .set(registered.entity_id.clone(), state, attributes),
        )
    }

    /// Render every entity with a pending update request
    ///
    /// Returns the number of requests handled.
    pub fn process_pending_updates(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(unique_id) = self.requests.try_recv() {
            self.write_state(&unique_id);
            handled += 1;
        }
        handled
    }

    /// Render update requests as they arrive until every requester is gone
    pub async fn run(mut self) {
        // Drop our own sender so the loop ends with the last entity
        let (closed, _) = UpdateRequester::channel();
        self.requester = closed;

        while let Some(unique_id) = self.requests.recv().await {
            self.write_state(&unique_id);
        }
        debug!("Entity platform stopped");
    }

    /// Remove every entity and its state
    pub fn unload(&mut self) {
        for (_, registered) in self.entities.drain() {
            self.states.remove(&registered.entity_id);
        }
    }
}
