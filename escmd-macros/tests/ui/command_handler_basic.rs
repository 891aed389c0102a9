use escmd_application::{
    AppResult, CommandDispatcher, CommandTable, DispatcherOptions, FrozenMessage,
};
use escmd_domain::persist::InMemoryEntityStore;
use escmd_macros::{command_handler, entity};
use serde_json::Value;

#[entity]
struct Lamp {
    on: bool,
}

struct Lamps {
    store: InMemoryEntityStore<Lamp>,
    options: DispatcherOptions,
    commands: CommandTable<Self>,
}

#[command_handler]
impl Lamps {
    async fn toggle(&self, _message: FrozenMessage, mut lamp: Lamp) -> AppResult<Value> {
        lamp.on = !lamp.on;
        lamp.version += 1;
        self.commit(&lamp).await
    }

    #[command(name = "switch-off")]
    async fn off(&self, _message: FrozenMessage, mut lamp: Lamp) -> AppResult<Value> {
        lamp.on = false;
        lamp.version += 1;
        self.commit(&lamp).await
    }
}

impl CommandDispatcher for Lamps {
    type Entity = Lamp;
    type Store = InMemoryEntityStore<Lamp>;

    fn store(&self) -> &Self::Store {
        &self.store
    }

    fn options(&self) -> &DispatcherOptions {
        &self.options
    }

    fn commands(&self) -> &CommandTable<Self> {
        &self.commands
    }
}

fn main() {
    let lamps = Lamps {
        store: InMemoryEntityStore::new(),
        options: DispatcherOptions::default(),
        commands: Lamps::command_table().unwrap(),
    };
    assert_eq!(lamps.commands().names(), vec!["switch-off", "toggle"]);
    assert_eq!(lamps.options().name(), "dispatcher");
    assert!(lamps.store().is_empty());
}
