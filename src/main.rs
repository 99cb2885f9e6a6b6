//! Gacha Pon entry point
//!
//! Wasm builds expose the core to the JS presentation layer as a
//! `GachaApp` bridge; native builds run one console draw for smoke-testing.

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use wasm_bindgen::prelude::*;

    use gacha_pon::ceremony::{Ceremony, CeremonyPhase, ScriptedCeremony};
    use gacha_pon::lottery::{LotteryEngine, PendingDraw};
    use gacha_pon::persistence::LocalStorageStore;
    use gacha_pon::repository::{ItemRepository, ItemUpdate};
    use gacha_pon::{GachaError, Item, ItemId};

    fn to_js(err: GachaError) -> JsValue {
        JsValue::from_str(&err.to_string())
    }

    fn item_json(item: &Item) -> String {
        serde_json::to_string(item).unwrap_or_else(|_| "null".to_string())
    }

    fn items_json(items: &[Item]) -> String {
        serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string())
    }

    fn parse_id(id: &str) -> Result<ItemId, JsValue> {
        ItemId::parse_str(id).map_err(|_| JsValue::from_str("invalid item id"))
    }

    /// Core bridge consumed by the JS UI. Item payloads cross the boundary
    /// as JSON strings in the stored-document item shape.
    #[wasm_bindgen]
    pub struct GachaApp {
        repo: ItemRepository,
        engine: LotteryEngine,
        ceremony: ScriptedCeremony,
        pending: Option<PendingDraw>,
    }

    #[wasm_bindgen]
    impl GachaApp {
        #[wasm_bindgen(constructor)]
        pub fn new() -> GachaApp {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);
            GachaApp {
                repo: ItemRepository::load(Box::new(LocalStorageStore::new())),
                engine: LotteryEngine::new(),
                ceremony: ScriptedCeremony::new(),
                pending: None,
            }
        }

        // === Item management ===

        pub fn items(&self) -> String {
            items_json(&self.repo.all_items())
        }

        pub fn eligible_items(&self) -> String {
            items_json(&self.repo.eligible_items())
        }

        pub fn winner_history(&self) -> String {
            items_json(&self.repo.winner_history())
        }

        pub fn add_item(&mut self, name: &str) -> Result<String, JsValue> {
            let item = self.repo.add_item(name, None).map_err(to_js)?;
            Ok(item_json(&item))
        }

        pub fn rename_item(&mut self, id: &str, name: &str) -> Result<String, JsValue> {
            let id = parse_id(id)?;
            let item = self
                .repo
                .update_item(id, ItemUpdate::name(name))
                .map_err(to_js)?;
            Ok(item_json(&item))
        }

        pub fn toggle_winner(&mut self, id: &str) -> Result<String, JsValue> {
            let id = parse_id(id)?;
            let current = self
                .repo
                .item(id)
                .ok_or_else(|| JsValue::from_str("item not found"))?;
            let item = self
                .repo
                .update_item(id, ItemUpdate::winner(!current.is_winner))
                .map_err(to_js)?;
            Ok(item_json(&item))
        }

        pub fn delete_item(&mut self, id: &str) -> Result<bool, JsValue> {
            let id = parse_id(id)?;
            self.repo.delete_item(id).map_err(to_js)
        }

        pub fn reset_all(&mut self) -> Result<(), JsValue> {
            self.repo.reset_all().map_err(to_js)
        }

        pub fn delete_all(&mut self) -> Result<(), JsValue> {
            self.repo.delete_all().map_err(to_js)
        }

        // === Draw flow ===

        /// Begin a draw: fixes the winner, starts the ceremony.
        pub fn start_draw(&mut self) -> Result<(), JsValue> {
            let eligible = self.repo.eligible_items();
            let pending = self.engine.begin_draw(&eligible).map_err(to_js)?;
            self.ceremony.begin(&eligible);
            self.pending = Some(pending);
            Ok(())
        }

        /// Advance the ceremony by `dt` seconds; true once it has finished.
        pub fn tick(&mut self, dt: f32) -> bool {
            self.ceremony.tick(dt) == CeremonyPhase::Done
        }

        pub fn skip_ceremony(&mut self) {
            self.ceremony.skip();
        }

        pub fn status_message(&self) -> Option<String> {
            self.ceremony.status_message().map(str::to_string)
        }

        /// Commit the pending winner once the ceremony is done.
        pub fn finish_draw(&mut self) -> Result<String, JsValue> {
            let pending = self
                .pending
                .take()
                .ok_or_else(|| JsValue::from_str("no draw in progress"))?;
            let winner = self.engine.commit(pending, &mut self.repo).map_err(to_js)?;
            Ok(item_json(&winner))
        }

        /// Drop a draw whose ceremony faulted, without committing.
        pub fn cancel_draw(&mut self) {
            if let Some(pending) = self.pending.take() {
                self.engine.abort(pending);
            }
        }

        pub fn is_drawing(&self) -> bool {
            self.engine.is_running()
        }

        // === Backup ===

        pub fn export_data(&self) -> Option<String> {
            self.repo.export()
        }

        pub fn import_data(&mut self, json: &str) -> Result<(), JsValue> {
            self.repo.import(json).map_err(to_js)
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::{thread, time::Duration};

    use gacha_pon::ceremony::{Ceremony, CeremonyPhase, ScriptedCeremony};
    use gacha_pon::lottery::LotteryEngine;
    use gacha_pon::persistence::MemoryStore;
    use gacha_pon::repository::ItemRepository;

    env_logger::init();
    log::info!("Gacha Pon (native) starting...");

    let mut repo = ItemRepository::load(Box::new(MemoryStore::new()));
    let mut engine = LotteryEngine::new();
    let mut ceremony = ScriptedCeremony::new();

    println!("Capsules:");
    for item in repo.all_items() {
        println!("  {}  {}", item.color, item.name);
    }

    let eligible = repo.eligible_items();
    let pending = match engine.begin_draw(&eligible) {
        Ok(pending) => pending,
        Err(err) => {
            eprintln!("Cannot draw: {err}");
            return;
        }
    };

    ceremony.begin(&eligible);
    let mut last_message = String::new();
    loop {
        if let Some(message) = ceremony.status_message() {
            if message != last_message {
                println!("{message}");
                last_message = message.to_string();
            }
        }
        if ceremony.tick(0.1) == CeremonyPhase::Done {
            break;
        }
        thread::sleep(Duration::from_millis(100));
    }

    match engine.commit(pending, &mut repo) {
        Ok(winner) => println!("\nWinner: {}", winner.name),
        Err(err) => eprintln!("Draw failed: {err}"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is the GachaApp bridge, this is just to satisfy the compiler
}
