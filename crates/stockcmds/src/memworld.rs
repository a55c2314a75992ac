//! A small in-memory world: rooms, actors and an object factory with
//! captured outboxes. Enough to exercise the dispatch engine end to end
//! without a running shard.

use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::Weak;

use mudcmds::{Actor, ActorId, Locus, ObjectFactory};
use tracing::debug;

pub struct MemRoom {
    name: String,
    // Weak so the world owns actor lifetimes, not the room.
    occupants: Mutex<Vec<Weak<MemActor>>>,
}

impl MemRoom {
    pub fn name(&self) -> &str {
        &self.name
    }

    fn present(&self) -> Vec<Arc<MemActor>> {
        self.occupants
            .lock()
            .unwrap()
            .iter()
            .filter_map(Weak::upgrade)
            .collect()
    }
}

impl Locus for MemRoom {
    fn msg_contents(&self, text: &str, exclude: &[ActorId]) {
        for a in self.present() {
            if exclude.contains(&a.id()) {
                continue;
            }
            a.msg(text);
        }
    }
}

pub struct MemActor {
    id: ActorId,
    name: String,
    // lowercase permission names
    perms: Vec<String>,
    room: Mutex<Option<Arc<MemRoom>>>,
    outbox: Mutex<Vec<String>>,
}

impl MemActor {
    /// Drain everything delivered to this actor so far.
    pub fn take_msgs(&self) -> Vec<String> {
        std::mem::take(&mut self.outbox.lock().unwrap())
    }
}

impl Actor for MemActor {
    fn id(&self) -> ActorId {
        self.id
    }

    fn name(&self) -> String {
        self.name.clone()
    }

    fn msg(&self, text: &str) {
        self.outbox.lock().unwrap().push(text.to_string());
    }

    fn location(&self) -> Option<Arc<dyn Locus>> {
        let room: Arc<dyn Locus> = self.room.lock().unwrap().clone()?;
        Some(room)
    }

    fn search(&self, token: &str) -> Option<Arc<dyn Actor>> {
        let token = token.trim();
        let room = self.room.lock().unwrap().clone();
        if let Some(room) = room {
            for other in room.present() {
                if other.id != self.id && other.name.eq_ignore_ascii_case(token) {
                    let found: Arc<dyn Actor> = other;
                    return Some(found);
                }
            }
        }
        // the searcher owns the miss message
        self.msg(&format!("Could not find '{token}'."));
        None
    }

    fn has_perm(&self, perm: &str) -> bool {
        self.perms.iter().any(|p| p.eq_ignore_ascii_case(perm))
    }
}

/// What the factory was asked to build, for assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedObject {
    pub id: ActorId,
    pub type_tag: String,
    pub key: String,
    pub locks: String,
}

#[derive(Default)]
pub struct MemWorld {
    next_id: AtomicU64,
    actors: Mutex<Vec<Arc<MemActor>>>,
    rooms: Mutex<Vec<Arc<MemRoom>>>,
    created: Mutex<Vec<CreatedObject>>,
}

impl MemWorld {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            next_id: AtomicU64::new(1),
            ..Self::default()
        })
    }

    pub fn add_room(&self, name: &str) -> Arc<MemRoom> {
        let room = Arc::new(MemRoom {
            name: name.to_string(),
            occupants: Mutex::new(Vec::new()),
        });
        self.rooms.lock().unwrap().push(room.clone());
        room
    }

    pub fn spawn(&self, name: &str, perms: &[&str], room: Option<&Arc<MemRoom>>) -> Arc<MemActor> {
        let actor = Arc::new(MemActor {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            name: name.to_string(),
            perms: perms.iter().map(|p| p.to_ascii_lowercase()).collect(),
            room: Mutex::new(room.cloned()),
            outbox: Mutex::new(Vec::new()),
        });
        if let Some(room) = room {
            room.occupants.lock().unwrap().push(Arc::downgrade(&actor));
        }
        self.actors.lock().unwrap().push(actor.clone());
        actor
    }

    pub fn created(&self) -> Vec<CreatedObject> {
        self.created.lock().unwrap().clone()
    }

    fn room_for_locus(&self, locus: &Arc<dyn Locus>) -> Option<Arc<MemRoom>> {
        self.rooms
            .lock()
            .unwrap()
            .iter()
            .find(|r| {
                let as_locus: Arc<dyn Locus> = (*r).clone();
                Arc::ptr_eq(&as_locus, locus)
            })
            .cloned()
    }
}

impl ObjectFactory for MemWorld {
    fn create(
        &self,
        type_tag: &str,
        key: &str,
        location: &Arc<dyn Locus>,
        locks: &str,
    ) -> anyhow::Result<ActorId> {
        let npc = Arc::new(MemActor {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            name: key.to_string(),
            perms: Vec::new(),
            room: Mutex::new(self.room_for_locus(location)),
            outbox: Mutex::new(Vec::new()),
        });
        if let Some(room) = npc.room.lock().unwrap().as_ref() {
            room.occupants.lock().unwrap().push(Arc::downgrade(&npc));
        }
        debug!("created {type_tag} {key:?} ({})", npc.id);
        self.created.lock().unwrap().push(CreatedObject {
            id: npc.id,
            type_tag: type_tag.to_string(),
            key: key.to_string(),
            locks: locks.to_string(),
        });
        self.actors.lock().unwrap().push(npc.clone());
        Ok(npc.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_broadcast_honors_exclusions() {
        let world = MemWorld::new();
        let tavern = world.add_room("tavern");
        let alice = world.spawn("Alice", &[], Some(&tavern));
        let bob = world.spawn("Bob", &[], Some(&tavern));
        let eve = world.spawn("Eve", &[], Some(&tavern));

        tavern.msg_contents("Alice smiles.", &[alice.id()]);
        assert!(alice.take_msgs().is_empty());
        assert_eq!(bob.take_msgs(), vec!["Alice smiles."]);
        assert_eq!(eve.take_msgs(), vec!["Alice smiles."]);

        tavern.msg_contents("Alice smiles to Bob.", &[alice.id(), bob.id()]);
        assert!(bob.take_msgs().is_empty());
        assert_eq!(eve.take_msgs(), vec!["Alice smiles to Bob."]);
    }

    #[test]
    fn search_finds_co_located_actors_only() {
        let world = MemWorld::new();
        let tavern = world.add_room("tavern");
        let cellar = world.add_room("cellar");
        let alice = world.spawn("Alice", &[], Some(&tavern));
        world.spawn("Bob", &[], Some(&tavern));
        world.spawn("Carol", &[], Some(&cellar));

        assert!(alice.search("bob").is_some());
        assert!(alice.search("Carol").is_none());
        assert_eq!(alice.take_msgs(), vec!["Could not find 'Carol'."]);
    }

    #[test]
    fn factory_places_npc_in_the_room() {
        let world = MemWorld::new();
        let tavern = world.add_room("tavern");
        let alice = world.spawn("Alice", &[], Some(&tavern));
        let locus: Arc<dyn Locus> = tavern.clone();

        let id = world
            .create("character", "Goblin", &locus, "edit:id(1) and perm(Builders)")
            .unwrap();
        assert!(alice.search("goblin").is_some());
        assert_eq!(world.created()[0].id, id);
        assert_eq!(world.created()[0].type_tag, "character");
    }
}
