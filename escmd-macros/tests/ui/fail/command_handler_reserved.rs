use escmd_application::{
    AppResult, CommandDispatcher, CommandTable, DispatcherOptions, FrozenMessage,
};
use escmd_domain::persist::InMemoryEntityStore;
use escmd_macros::{command_handler, entity};
use serde_json::Value;

#[entity]
struct Lamp {}

struct Lamps {
    store: InMemoryEntityStore<Lamp>,
    options: DispatcherOptions,
    commands: CommandTable<Self>,
}

#[command_handler]
impl Lamps {
    #[command(name = "exec")]
    async fn run(&self, _message: FrozenMessage, lamp: Lamp) -> AppResult<Value> {
        self.commit(&lamp).await
    }

    async fn get(&self, _message: FrozenMessage, lamp: Lamp) -> AppResult<Value> {
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
    let _ = Lamps {
        store: InMemoryEntityStore::new(),
        options: DispatcherOptions::default(),
        commands: CommandTable::new(),
    };
    let _ = Lamps::command_table();
}
